use std::ops::Range;

use serde_derive::{Deserialize, Serialize};

use super::utils::ParsingCache;
use crate::errors::*;
use crate::utils::EntityName;

/// Builtin entity, such as a date or a number, found in a text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuiltinEntity {
    pub value: String,
    pub range: Range<usize>,
    pub entity_kind: EntityName,
}

pub trait BuiltinEntityParser: Send + Sync {
    fn extract_entities(
        &self,
        sentence: &str,
        filter_entity_kinds: Option<&[EntityName]>,
        use_cache: bool,
    ) -> Result<Vec<BuiltinEntity>>;
}

/// Wraps a builtin entity parser with a LRU cache keyed by the input and the entity scope
pub struct CachingBuiltinEntityParser<P: BuiltinEntityParser> {
    parser: P,
    cache: ParsingCache<BuiltinEntity>,
}

impl<P: BuiltinEntityParser> CachingBuiltinEntityParser<P> {
    pub fn new(parser: P, cache_capacity: usize) -> Self {
        Self {
            parser,
            cache: ParsingCache::new(cache_capacity),
        }
    }
}

impl<P: BuiltinEntityParser> BuiltinEntityParser for CachingBuiltinEntityParser<P> {
    fn extract_entities(
        &self,
        sentence: &str,
        filter_entity_kinds: Option<&[EntityName]>,
        use_cache: bool,
    ) -> Result<Vec<BuiltinEntity>> {
        self.cache
            .get_or_parse(sentence, filter_entity_kinds, use_cache, |sentence, scope| {
                self.parser.extract_entities(sentence, scope, false)
            })
    }
}
