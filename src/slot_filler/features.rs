use std::sync::Arc;

use itertools::Itertools;

use super::crf_utils::{get_scheme_prefix, TaggingScheme};
use super::features_utils::{get_word_chunk, initial_string_from_tokens, respan_token};
use crate::entity_parser::{BuiltinEntityParser, CustomEntityParser};
use crate::errors::*;
use crate::preprocessing::{get_shape, normalize_token, stem_token, Token};
use crate::resources::gazetteer::Gazetteer;
use crate::resources::stemmer::Stemmer;
use crate::resources::word_clusterer::WordClusterer;
use crate::utils::{range_contains, ranges_overlap, EntityName};

pub const RARE_WORD: &str = "rare_word";

pub fn is_digit(value: &str) -> Option<String> {
    if !value.is_empty() && value.chars().all(|c| c.is_digit(10)) {
        Some("1".to_string())
    } else {
        None
    }
}

pub fn is_first(token_index: usize) -> Option<String> {
    if token_index == 0 {
        Some("1".to_string())
    } else {
        None
    }
}

pub fn is_last(tokens: &[Token], token_index: usize) -> Option<String> {
    if token_index + 1 == tokens.len() {
        Some("1".to_string())
    } else {
        None
    }
}

pub fn length(value: &str) -> Option<String> {
    Some(value.chars().count().to_string())
}

pub fn prefix(token: &Token, prefix_size: usize) -> Option<String> {
    Some(get_word_chunk(&normalize_token(token), prefix_size, 0, false))
}

pub fn suffix(token: &Token, suffix_size: usize) -> Option<String> {
    let chunk_end = token.value.chars().count();
    Some(get_word_chunk(&normalize_token(token), suffix_size, chunk_end, true))
}

fn stem_or_normalize(token: &Token, opt_stemmer: Option<&dyn Stemmer>) -> String {
    opt_stemmer
        .map(|stemmer| stem_token(token, stemmer))
        .unwrap_or_else(|| normalize_token(token))
}

fn ngram_window(tokens: &[Token], token_index: usize, ngram_size: usize) -> Option<&[Token]> {
    match token_index.checked_add(ngram_size) {
        Some(end) if end <= tokens.len() && token_index < tokens.len() => {
            Some(&tokens[token_index..end])
        }
        _ => None,
    }
}

pub fn ngram(
    tokens: &[Token],
    token_index: usize,
    ngram_size: usize,
    separator: &str,
    opt_stemmer: Option<&dyn Stemmer>,
    opt_common_words_gazetteer: Option<&dyn Gazetteer>,
) -> Option<String> {
    let window = ngram_window(tokens, token_index, ngram_size)?;
    let result = window
        .iter()
        .map(|token| {
            let value = stem_or_normalize(token, opt_stemmer);
            match opt_common_words_gazetteer {
                Some(gazetteer) if !gazetteer.contains(&value) => RARE_WORD.to_string(),
                _ => value,
            }
        })
        .join(separator);
    Some(result)
}

pub fn shape_ngram(
    tokens: &[Token],
    token_index: usize,
    ngram_size: usize,
    separator: &str,
) -> Option<String> {
    Some(
        ngram_window(tokens, token_index, ngram_size)?
            .iter()
            .map(|token| get_shape(&token.value))
            .join(separator),
    )
}

pub fn word_cluster(
    token: &Token,
    word_clusterer: &dyn WordClusterer,
    opt_stemmer: Option<&dyn Stemmer>,
) -> Option<String> {
    word_clusterer.get_cluster(&stem_or_normalize(token, opt_stemmer))
}

/// Tagging scheme prefix of `token_index` within the tokens matched by an entity
///
/// Only the first entity match overlapping the considered token is used, the other ones are
/// ignored.
pub fn custom_entity_match(
    tokens: &[Token],
    token_index: usize,
    entity: &str,
    custom_entity_parser: &dyn CustomEntityParser,
    opt_stemmer: Option<&dyn Stemmer>,
    tagging_scheme: TaggingScheme,
) -> Result<Option<String>> {
    if token_index >= tokens.len() {
        return Ok(None);
    }
    let transformed_tokens = tokens
        .iter()
        .map(|token| respan_token(token, stem_or_normalize(token, opt_stemmer)))
        .collect_vec();
    let text = initial_string_from_tokens(&transformed_tokens);
    let token_range = &transformed_tokens[token_index].char_range;
    let scope = [entity.to_string()];
    let opt_entity = custom_entity_parser
        .extract_entities(&text, Some(&scope), true)?
        .into_iter()
        .find(|custom_entity| ranges_overlap(&custom_entity.range, token_range));

    Ok(opt_entity.and_then(|custom_entity| {
        let matched_indexes = transformed_tokens
            .iter()
            .positions(|token| range_contains(&custom_entity.range, &token.char_range))
            .collect_vec();
        entity_match_prefix(token_index, &matched_indexes, tagging_scheme)
    }))
}

/// Same as `custom_entity_match` but on raw tokens, considering only entity matches which
/// contain the whole token
pub fn builtin_entity_match(
    tokens: &[Token],
    token_index: usize,
    builtin_entity: &str,
    builtin_entity_parser: &dyn BuiltinEntityParser,
    tagging_scheme: TaggingScheme,
) -> Result<Option<String>> {
    if token_index >= tokens.len() {
        return Ok(None);
    }
    let text = initial_string_from_tokens(tokens);
    let token_range = &tokens[token_index].char_range;
    let scope = [builtin_entity.to_string()];
    let opt_entity = builtin_entity_parser
        .extract_entities(&text, Some(&scope), true)?
        .into_iter()
        .find(|entity| range_contains(&entity.range, token_range));

    Ok(opt_entity.and_then(|entity| {
        let matched_indexes = tokens
            .iter()
            .positions(|token| range_contains(&entity.range, &token.char_range))
            .collect_vec();
        entity_match_prefix(token_index, &matched_indexes, tagging_scheme)
    }))
}

fn entity_match_prefix(
    token_index: usize,
    matched_indexes: &[usize],
    tagging_scheme: TaggingScheme,
) -> Option<String> {
    if matched_indexes.is_empty() {
        return None;
    }
    Some(get_scheme_prefix(token_index, matched_indexes, tagging_scheme).to_string())
}

#[derive(Clone)]
pub struct NgramFeature {
    pub ngram_size: usize,
    pub separator: &'static str,
    pub opt_stemmer: Option<Arc<dyn Stemmer>>,
    pub opt_common_words_gazetteer: Option<Arc<dyn Gazetteer>>,
}

impl NgramFeature {
    pub fn compute(&self, tokens: &[Token], token_index: usize) -> Option<String> {
        ngram(
            tokens,
            token_index,
            self.ngram_size,
            self.separator,
            self.opt_stemmer.as_ref().map(|s| &**s),
            self.opt_common_words_gazetteer.as_ref().map(|g| &**g),
        )
    }
}

#[derive(Clone)]
pub struct ShapeNgramFeature {
    pub ngram_size: usize,
    pub separator: &'static str,
}

impl ShapeNgramFeature {
    pub fn compute(&self, tokens: &[Token], token_index: usize) -> Option<String> {
        shape_ngram(tokens, token_index, self.ngram_size, self.separator)
    }
}

#[derive(Clone)]
pub struct WordClusterFeature {
    pub cluster_name: String,
    pub word_clusterer: Arc<dyn WordClusterer>,
    pub opt_stemmer: Option<Arc<dyn Stemmer>>,
}

impl WordClusterFeature {
    pub fn compute(&self, tokens: &[Token], token_index: usize) -> Option<String> {
        tokens.get(token_index).and_then(|token| {
            word_cluster(
                token,
                &*self.word_clusterer,
                self.opt_stemmer.as_ref().map(|s| &**s),
            )
        })
    }
}

#[derive(Clone)]
pub struct CustomEntityMatchFeature {
    pub entity: EntityName,
    pub tagging_scheme: TaggingScheme,
    pub opt_stemmer: Option<Arc<dyn Stemmer>>,
    pub custom_entity_parser: Arc<dyn CustomEntityParser>,
}

impl CustomEntityMatchFeature {
    pub fn compute(&self, tokens: &[Token], token_index: usize) -> Result<Option<String>> {
        custom_entity_match(
            tokens,
            token_index,
            &self.entity,
            &*self.custom_entity_parser,
            self.opt_stemmer.as_ref().map(|s| &**s),
            self.tagging_scheme,
        )
    }
}

#[derive(Clone)]
pub struct BuiltinEntityMatchFeature {
    pub builtin_entity: EntityName,
    pub tagging_scheme: TaggingScheme,
    pub builtin_entity_parser: Arc<dyn BuiltinEntityParser>,
}

impl BuiltinEntityMatchFeature {
    pub fn compute(&self, tokens: &[Token], token_index: usize) -> Result<Option<String>> {
        builtin_entity_match(
            tokens,
            token_index,
            &self.builtin_entity,
            &*self.builtin_entity_parser,
            self.tagging_scheme,
        )
    }
}
