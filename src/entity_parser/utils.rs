use std::sync::Mutex;

use failure::format_err;
use lru_cache::LruCache;

use crate::errors::*;
use crate::utils::EntityName;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ParsingKey {
    sentence: String,
    scope: Option<Vec<EntityName>>,
}

/// LRU store of parsed entities, shared by the caching entity parsers
///
/// Entries are keyed by the parsed sentence together with the requested entity scope, so
/// that the same sentence parsed with two different scopes yields two entries. Failed
/// parsings are never stored.
pub struct ParsingCache<E: Clone> {
    entries: Mutex<LruCache<ParsingKey, Vec<E>>>,
}

impl<E: Clone> ParsingCache<E> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn get_or_parse<F>(
        &self,
        sentence: &str,
        scope: Option<&[EntityName]>,
        use_cache: bool,
        parse: F,
    ) -> Result<Vec<E>>
    where
        F: FnOnce(&str, Option<&[EntityName]>) -> Result<Vec<E>>,
    {
        if !use_cache {
            return parse(sentence, scope);
        }
        let key = ParsingKey {
            sentence: sentence.to_string(),
            scope: scope.map(|kinds| kinds.to_vec()),
        };
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| format_err!("Poisonous mutex: {}", e))?;
        if let Some(entities) = entries.get_mut(&key) {
            return Ok(entities.clone());
        }
        let entities = parse(sentence, scope)?;
        entries.insert(key, entities.clone());
        Ok(entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_parsing_cache_is_keyed_by_sentence_and_scope() {
        // Given
        let cache = ParsingCache::<usize>::new(10);
        let nb_parsings = Cell::new(0);
        let parse = |sentence: &str, _: Option<&[EntityName]>| {
            nb_parsings.set(nb_parsings.get() + 1);
            Ok(vec![sentence.len()])
        };
        let scope = vec!["city".to_string()];

        // When
        let first = cache.get_or_parse("hello", None, true, &parse).unwrap();
        let second = cache.get_or_parse("hello", None, true, &parse).unwrap();
        cache.get_or_parse("hello", Some(&scope), true, &parse).unwrap();
        cache.get_or_parse("hi", None, true, &parse).unwrap();

        // Then
        assert_eq!(vec![5], first);
        assert_eq!(first, second);
        assert_eq!(3, nb_parsings.get());
    }

    #[test]
    fn test_parsing_cache_can_be_bypassed() {
        // Given
        let cache = ParsingCache::<usize>::new(10);
        let nb_parsings = Cell::new(0);
        let parse = |sentence: &str, _: Option<&[EntityName]>| {
            nb_parsings.set(nb_parsings.get() + 1);
            Ok(vec![sentence.len()])
        };

        // When
        cache.get_or_parse("hello", None, false, &parse).unwrap();
        cache.get_or_parse("hello", None, false, &parse).unwrap();

        // Then
        assert_eq!(2, nb_parsings.get());
    }

    #[test]
    fn test_parsing_cache_does_not_store_errors() {
        // Given
        let cache = ParsingCache::<usize>::new(10);

        // When
        let failure = cache.get_or_parse("a", None, true, |_, _| Err(format_err!("boom")));
        let success = cache.get_or_parse("a", None, true, |sentence, _| Ok(vec![sentence.len()]));

        // Then
        assert!(failure.is_err());
        assert_eq!(vec![1], success.unwrap());
    }
}
