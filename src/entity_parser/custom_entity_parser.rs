use std::ops::Range;

use serde_derive::{Deserialize, Serialize};

use super::utils::ParsingCache;
use crate::errors::*;
use crate::utils::EntityName;

/// Match of a dataset defined entity in a text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomEntity {
    pub value: String,
    pub resolved_value: String,
    pub range: Range<usize>,
    pub entity_identifier: EntityName,
}

pub trait CustomEntityParser: Send + Sync {
    /// Entities that this parser is able to recognize
    fn entities(&self) -> Vec<EntityName>;

    fn extract_entities(
        &self,
        sentence: &str,
        filter_entity_kinds: Option<&[EntityName]>,
        use_cache: bool,
    ) -> Result<Vec<CustomEntity>>;
}

/// Wraps a custom entity parser with a LRU cache keyed by the input and the entity scope
pub struct CachingCustomEntityParser<P: CustomEntityParser> {
    parser: P,
    cache: ParsingCache<CustomEntity>,
}

impl<P: CustomEntityParser> CachingCustomEntityParser<P> {
    pub fn new(parser: P, cache_capacity: usize) -> Self {
        Self {
            parser,
            cache: ParsingCache::new(cache_capacity),
        }
    }
}

impl<P: CustomEntityParser> CustomEntityParser for CachingCustomEntityParser<P> {
    fn entities(&self) -> Vec<EntityName> {
        self.parser.entities()
    }

    fn extract_entities(
        &self,
        sentence: &str,
        filter_entity_kinds: Option<&[EntityName]>,
        use_cache: bool,
    ) -> Result<Vec<CustomEntity>> {
        self.cache
            .get_or_parse(sentence, filter_entity_kinds, use_cache, |sentence, scope| {
                self.parser.extract_entities(sentence, scope, false)
            })
    }
}
