use std::collections::HashMap;
use std::iter::FromIterator;
use std::sync::Arc;

use crate::dataset::Dataset;
use crate::entity_parser::{BuiltinEntity, BuiltinEntityParser, CustomEntity, CustomEntityParser};
use crate::errors::*;
use crate::language::Language;
use crate::preprocessing::Token;
use crate::utils::EntityName;

/// Splits the input on whitespaces, keeping track of character ranges
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = vec![];
    let mut current: Option<(String, usize)> = None;
    for (index, c) in input.chars().enumerate() {
        if c.is_whitespace() {
            if let Some((value, start)) = current.take() {
                tokens.push(Token::new(value, start..index));
            }
        } else if let Some((ref mut value, _)) = current {
            value.push(c);
        } else {
            current = Some((c.to_string(), index));
        }
    }
    if let Some((value, start)) = current {
        let end = start + value.chars().count();
        tokens.push(Token::new(value, start..end));
    }
    tokens
}

pub fn empty_dataset(language: Language) -> Dataset {
    Dataset {
        language,
        intents: HashMap::new(),
        entities: HashMap::new(),
    }
}

pub fn music_dataset() -> Dataset {
    let json = r#"{
        "language": "en",
        "intents": {
            "PlayMusic": {
                "utterances": [
                    {
                        "data": [
                            {"text": "play "},
                            {"text": "three", "entity": "snips/number", "slot_name": "count"},
                            {"text": " songs by "},
                            {"text": "the beatles", "entity": "snips/musicArtist", "slot_name": "artist"}
                        ]
                    },
                    {
                        "data": [
                            {"text": "play my "},
                            {"text": "workout", "entity": "playlist", "slot_name": "playlist"},
                            {"text": " playlist"}
                        ]
                    }
                ]
            },
            "AddToPlaylist": {
                "utterances": [
                    {
                        "data": [
                            {"text": "add "},
                            {"text": "abbey road", "entity": "snips/musicAlbum", "slot_name": "album"}
                        ]
                    }
                ]
            }
        },
        "entities": {
            "snips/number": {},
            "snips/musicArtist": {},
            "snips/musicAlbum": {},
            "playlist": {"automatically_extensible": true}
        }
    }"#;
    serde_json::from_str(json).unwrap()
}

#[derive(Default)]
pub struct MockedBuiltinEntityParser {
    mocked_outputs: HashMap<String, Vec<BuiltinEntity>>,
}

impl BuiltinEntityParser for MockedBuiltinEntityParser {
    fn extract_entities(
        &self,
        sentence: &str,
        filter_entity_kinds: Option<&[EntityName]>,
        _use_cache: bool,
    ) -> Result<Vec<BuiltinEntity>> {
        Ok(self
            .mocked_outputs
            .get(sentence)
            .cloned()
            .unwrap_or_else(|| vec![])
            .into_iter()
            .filter(|entity| {
                filter_entity_kinds.map_or(true, |kinds| kinds.contains(&entity.entity_kind))
            })
            .collect())
    }
}

impl FromIterator<(String, Vec<BuiltinEntity>)> for MockedBuiltinEntityParser {
    fn from_iter<T: IntoIterator<Item = (String, Vec<BuiltinEntity>)>>(iter: T) -> Self {
        Self {
            mocked_outputs: HashMap::from_iter(iter),
        }
    }
}

#[derive(Default)]
pub struct MockedCustomEntityParser {
    mocked_outputs: HashMap<String, Vec<CustomEntity>>,
}

impl CustomEntityParser for MockedCustomEntityParser {
    fn entities(&self) -> Vec<EntityName> {
        self.mocked_outputs
            .values()
            .flat_map(|entities| entities.iter().map(|e| e.entity_identifier.clone()))
            .collect()
    }

    fn extract_entities(
        &self,
        sentence: &str,
        filter_entity_kinds: Option<&[EntityName]>,
        _use_cache: bool,
    ) -> Result<Vec<CustomEntity>> {
        Ok(self
            .mocked_outputs
            .get(sentence)
            .cloned()
            .unwrap_or_else(|| vec![])
            .into_iter()
            .filter(|entity| {
                filter_entity_kinds.map_or(true, |kinds| kinds.contains(&entity.entity_identifier))
            })
            .collect())
    }
}

impl FromIterator<(String, Vec<CustomEntity>)> for MockedCustomEntityParser {
    fn from_iter<T: IntoIterator<Item = (String, Vec<CustomEntity>)>>(iter: T) -> Self {
        Self {
            mocked_outputs: HashMap::from_iter(iter),
        }
    }
}

pub fn mocked_builtin_parser(
    outputs: Vec<(String, Vec<BuiltinEntity>)>,
) -> Arc<dyn BuiltinEntityParser> {
    Arc::new(outputs.into_iter().collect::<MockedBuiltinEntityParser>())
}

pub fn mocked_custom_parser(
    outputs: Vec<(String, Vec<CustomEntity>)>,
) -> Arc<dyn CustomEntityParser> {
    Arc::new(outputs.into_iter().collect::<MockedCustomEntityParser>())
}

#[test]
fn test_tokenize() {
    assert_eq!(
        vec![
            Token::new("hello".to_string(), 0..5),
            Token::new("wörld".to_string(), 7..12),
        ],
        tokenize("hello  wörld ")
    );
}
