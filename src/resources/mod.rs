pub mod gazetteer;
pub mod requirements;
pub mod stemmer;
pub mod word_clusterer;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use failure::format_err;

use crate::errors::*;
use crate::language::Language;
use crate::utils::EntityName;

use self::gazetteer::Gazetteer;
use self::stemmer::Stemmer;
use self::word_clusterer::WordClusterer;

/// Language dependent resources and entity ontology used when fitting feature factories
pub trait ResourceProvider: Send + Sync {
    fn stemmer(&self, language: Language) -> Result<Arc<dyn Stemmer>>;
    fn gazetteer(&self, language: Language, name: &str) -> Result<Arc<dyn Gazetteer>>;
    fn word_clusterer(&self, language: Language, name: &str) -> Result<Arc<dyn WordClusterer>>;
    /// Builtin entities parsed with grammars in the given language
    fn supported_grammar_entities(&self, language: Language) -> Result<Vec<EntityName>>;
    /// Whether the builtin entity is resolved through a gazetteer, like a music album
    fn is_gazetteer_entity(&self, entity: &str) -> bool;
}

/// In-memory `ResourceProvider`
#[derive(Default)]
pub struct SharedResources {
    stemmers: HashMap<Language, Arc<dyn Stemmer>>,
    gazetteers: HashMap<(Language, String), Arc<dyn Gazetteer>>,
    word_clusterers: HashMap<(Language, String), Arc<dyn WordClusterer>>,
    grammar_entities: HashMap<Language, Vec<EntityName>>,
    gazetteer_entities: HashSet<EntityName>,
}

impl SharedResources {
    pub fn builder() -> SharedResourcesBuilder {
        SharedResourcesBuilder::default()
    }
}

impl ResourceProvider for SharedResources {
    fn stemmer(&self, language: Language) -> Result<Arc<dyn Stemmer>> {
        self.stemmers
            .get(&language)
            .cloned()
            .ok_or_else(|| format_err!("Cannot find stemmer for language '{}'", language))
    }

    fn gazetteer(&self, language: Language, name: &str) -> Result<Arc<dyn Gazetteer>> {
        self.gazetteers
            .get(&(language, name.to_string()))
            .cloned()
            .ok_or_else(|| {
                format_err!("Cannot find gazetteer '{}' for language '{}'", name, language)
            })
    }

    fn word_clusterer(&self, language: Language, name: &str) -> Result<Arc<dyn WordClusterer>> {
        self.word_clusterers
            .get(&(language, name.to_string()))
            .cloned()
            .ok_or_else(|| {
                format_err!("Cannot find word clusters '{}' for language '{}'", name, language)
            })
    }

    fn supported_grammar_entities(&self, language: Language) -> Result<Vec<EntityName>> {
        Ok(self
            .grammar_entities
            .get(&language)
            .cloned()
            .unwrap_or_else(|| vec![]))
    }

    fn is_gazetteer_entity(&self, entity: &str) -> bool {
        self.gazetteer_entities.contains(entity)
    }
}

#[derive(Default)]
pub struct SharedResourcesBuilder {
    resources: SharedResources,
}

impl SharedResourcesBuilder {
    pub fn stemmer<S: Stemmer + 'static>(mut self, language: Language, stemmer: S) -> Self {
        self.resources
            .stemmers
            .insert(language, Arc::new(stemmer) as _);
        self
    }

    pub fn gazetteer<G: Gazetteer + 'static>(
        mut self,
        language: Language,
        name: &str,
        gazetteer: G,
    ) -> Self {
        self.resources
            .gazetteers
            .insert((language, name.to_string()), Arc::new(gazetteer) as _);
        self
    }

    pub fn word_clusterer<W: WordClusterer + 'static>(
        mut self,
        language: Language,
        name: &str,
        word_clusterer: W,
    ) -> Self {
        self.resources
            .word_clusterers
            .insert((language, name.to_string()), Arc::new(word_clusterer) as _);
        self
    }

    pub fn grammar_entities<I>(mut self, language: Language, entities: I) -> Self
    where
        I: IntoIterator<Item = EntityName>,
    {
        self.resources
            .grammar_entities
            .insert(language, entities.into_iter().collect());
        self
    }

    pub fn gazetteer_entities<I>(mut self, entities: I) -> Self
    where
        I: IntoIterator<Item = EntityName>,
    {
        self.resources.gazetteer_entities.extend(entities);
        self
    }

    pub fn build(self) -> SharedResources {
        self.resources
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::gazetteer::HashSetGazetteer;

    #[test]
    fn test_missing_resources_are_reported() {
        // Given
        let resources = SharedResources::builder()
            .gazetteer(
                Language::EN,
                "top_words",
                vec!["the".to_string()].into_iter().collect::<HashSetGazetteer>(),
            )
            .build();

        // When / Then
        assert!(resources.gazetteer(Language::EN, "top_words").is_ok());
        assert!(resources.gazetteer(Language::FR, "top_words").is_err());
        assert!(resources.stemmer(Language::EN).is_err());
        assert!(resources.word_clusterer(Language::EN, "brown_clusters").is_err());
        assert_eq!(
            Vec::<EntityName>::new(),
            resources.supported_grammar_entities(Language::EN).unwrap()
        );
    }
}
