use std::collections::{BTreeSet, HashMap};

use failure::format_err;
use serde_derive::{Deserialize, Serialize};

use crate::errors::*;
use crate::language::Language;
use crate::resources::ResourceProvider;
use crate::utils::{EntityName, IntentName, SlotName};

/// Training dataset, as far as feature factories are concerned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub language: Language,
    #[serde(default)]
    pub intents: HashMap<IntentName, Intent>,
    #[serde(default)]
    pub entities: HashMap<EntityName, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub utterances: Vec<Utterance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    pub data: Vec<Chunk>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
    #[serde(default)]
    pub entity: Option<EntityName>,
    #[serde(default)]
    pub slot_name: Option<SlotName>,
}

impl Dataset {
    /// Entities referenced by the slots of an intent
    pub fn intent_entities(&self, intent: &str) -> Result<BTreeSet<EntityName>> {
        let intent_data = self
            .intents
            .get(intent)
            .ok_or_else(|| format_err!("Unknown intent: '{}'", intent))?;
        Ok(intent_data
            .utterances
            .iter()
            .flat_map(|utterance| utterance.data.iter())
            .filter_map(|chunk| chunk.entity.clone())
            .collect())
    }

    /// Gazetteer based builtin entities used in the dataset
    ///
    /// When an intent is provided, only the entities appearing in its utterances are
    /// considered.
    pub fn gazetteer_entities(
        &self,
        intent: Option<&str>,
        resources: &dyn ResourceProvider,
    ) -> Result<BTreeSet<EntityName>> {
        let candidates = if let Some(intent) = intent {
            self.intent_entities(intent)?
        } else {
            self.entities.keys().cloned().collect()
        };
        Ok(candidates
            .into_iter()
            .filter(|entity| resources.is_gazetteer_entity(entity))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::SharedResources;

    fn sample_dataset() -> Dataset {
        let json = r#"{
            "language": "en",
            "intents": {
                "PlayMusic": {
                    "utterances": [
                        {
                            "data": [
                                {"text": "play "},
                                {"text": "thriller", "entity": "snips/musicAlbum", "slot_name": "album"},
                                {"text": " by "},
                                {"text": "michael jackson", "entity": "artist", "slot_name": "artist"}
                            ]
                        }
                    ]
                },
                "GetWeather": {
                    "utterances": [
                        {
                            "data": [
                                {"text": "weather in "},
                                {"text": "paris", "entity": "city", "slot_name": "location"}
                            ]
                        }
                    ]
                }
            },
            "entities": {
                "snips/musicAlbum": {},
                "snips/musicTrack": {},
                "artist": {"automatically_extensible": true},
                "city": {"automatically_extensible": false}
            }
        }"#;
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_intent_entities() {
        // Given
        let dataset = sample_dataset();

        // When
        let entities = dataset.intent_entities("PlayMusic").unwrap();

        // Then
        let expected_entities = btreeset! {"snips/musicAlbum".to_string(), "artist".to_string()};
        assert_eq!(expected_entities, entities);
        assert!(dataset.intent_entities("Unknown").is_err());
    }

    #[test]
    fn test_gazetteer_entities() {
        // Given
        let dataset = sample_dataset();
        let resources = SharedResources::builder()
            .gazetteer_entities(vec![
                "snips/musicAlbum".to_string(),
                "snips/musicTrack".to_string(),
            ])
            .build();

        // When
        let all_entities = dataset.gazetteer_entities(None, &resources).unwrap();
        let intent_entities = dataset
            .gazetteer_entities(Some("PlayMusic"), &resources)
            .unwrap();
        let no_entities = dataset
            .gazetteer_entities(Some("GetWeather"), &resources)
            .unwrap();

        // Then
        assert_eq!(
            btreeset! {"snips/musicAlbum".to_string(), "snips/musicTrack".to_string()},
            all_entities
        );
        assert_eq!(btreeset! {"snips/musicAlbum".to_string()}, intent_entities);
        assert!(no_entities.is_empty());
    }
}
