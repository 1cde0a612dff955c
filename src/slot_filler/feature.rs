use std::fmt;

use super::features::*;
use crate::errors::*;
use crate::preprocessing::Token;

/// Reserved base name, used by the tagger for the raw token value
pub const WORD_FEATURE_NAME: &str = "word";

/// Function computing an optional string value for a token of a sentence
#[derive(Clone)]
pub enum FeatureFunction {
    IsDigit,
    IsFirst,
    IsLast,
    Prefix { prefix_size: usize },
    Suffix { suffix_size: usize },
    Length,
    Ngram(NgramFeature),
    ShapeNgram(ShapeNgramFeature),
    WordCluster(WordClusterFeature),
    CustomEntityMatch(CustomEntityMatchFeature),
    BuiltinEntityMatch(BuiltinEntityMatchFeature),
}

impl FeatureFunction {
    /// Computes the feature value at `token_index`, which yields `None` when out of bounds
    pub fn compute(&self, tokens: &[Token], token_index: usize) -> Result<Option<String>> {
        if token_index >= tokens.len() {
            return Ok(None);
        }
        let token = &tokens[token_index];
        Ok(match self {
            FeatureFunction::IsDigit => is_digit(&token.value),
            FeatureFunction::IsFirst => is_first(token_index),
            FeatureFunction::IsLast => is_last(tokens, token_index),
            FeatureFunction::Prefix { prefix_size } => prefix(token, *prefix_size),
            FeatureFunction::Suffix { suffix_size } => suffix(token, *suffix_size),
            FeatureFunction::Length => length(&token.value),
            FeatureFunction::Ngram(feature) => feature.compute(tokens, token_index),
            FeatureFunction::ShapeNgram(feature) => feature.compute(tokens, token_index),
            FeatureFunction::WordCluster(feature) => feature.compute(tokens, token_index),
            FeatureFunction::CustomEntityMatch(feature) => feature.compute(tokens, token_index)?,
            FeatureFunction::BuiltinEntityMatch(feature) => feature.compute(tokens, token_index)?,
        })
    }
}

impl fmt::Debug for FeatureFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind = match self {
            FeatureFunction::IsDigit => "is_digit",
            FeatureFunction::IsFirst => "is_first",
            FeatureFunction::IsLast => "is_last",
            FeatureFunction::Prefix { .. } => "prefix",
            FeatureFunction::Suffix { .. } => "suffix",
            FeatureFunction::Length => "length",
            FeatureFunction::Ngram(_) => "ngram",
            FeatureFunction::ShapeNgram(_) => "shape_ngram",
            FeatureFunction::WordCluster(_) => "word_cluster",
            FeatureFunction::CustomEntityMatch(_) => "entity_match",
            FeatureFunction::BuiltinEntityMatch(_) => "builtin_entity_match",
        };
        write!(f, "FeatureFunction({})", kind)
    }
}

/// Named feature, computed on the token located `offset` positions away from the current one
#[derive(Debug, Clone)]
pub struct Feature {
    pub base_name: String,
    pub name: String,
    pub offset: i32,
    pub drop_out: f32,
    pub function: FeatureFunction,
}

impl Feature {
    pub fn new(
        base_name: &str,
        offset: i32,
        drop_out: f32,
        function: FeatureFunction,
    ) -> Result<Self> {
        if base_name == WORD_FEATURE_NAME {
            return Err(FeatureFactoryError::ReservedFeatureName(base_name.to_string()).into());
        }
        Ok(Self {
            base_name: base_name.to_string(),
            name: offset_name(base_name, offset),
            offset,
            drop_out,
            function,
        })
    }

    /// Value of the feature for the token at `token_index`, computed at `token_index + offset`
    pub fn compute(&self, tokens: &[Token], token_index: usize) -> Result<Option<String>> {
        match self.shifted_index(token_index, tokens.len()) {
            Some(index) => self.function.compute(tokens, index),
            None => Ok(None),
        }
    }

    /// Index of the token the feature looks at, if it exists
    pub fn shifted_index(&self, token_index: usize, nb_tokens: usize) -> Option<usize> {
        let index = token_index as i64 + self.offset as i64;
        if index < 0 || index >= nb_tokens as i64 {
            None
        } else {
            Some(index as usize)
        }
    }
}

fn offset_name(base_name: &str, offset: i32) -> String {
    if offset == 0 {
        base_name.to_string()
    } else {
        format!("{}[{:+}]", base_name, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutils::tokenize;

    #[test]
    fn test_offset_names() {
        assert_eq!("ngram_1", offset_name("ngram_1", 0));
        assert_eq!("ngram_1[+2]", offset_name("ngram_1", 2));
        assert_eq!("ngram_1[-1]", offset_name("ngram_1", -1));
    }

    #[test]
    fn test_word_is_reserved() {
        assert!(Feature::new("word", 0, 0.0, FeatureFunction::Length).is_err());
        assert!(Feature::new("length", 0, 0.0, FeatureFunction::Length).is_ok());
    }

    #[test]
    fn test_feature_with_offset() {
        // Given
        let tokens = tokenize("I love 42 birds");
        let feature = Feature::new("is_digit", 1, 0.0, FeatureFunction::IsDigit).unwrap();

        // When
        let results = (0..tokens.len())
            .map(|i| feature.compute(&tokens, i).unwrap())
            .collect::<Vec<_>>();

        // Then
        assert_eq!("is_digit[+1]", feature.name.as_str());
        assert_eq!(vec![None, Some("1".to_string()), None, None], results);
    }

    #[test]
    fn test_out_of_range_offsets() {
        // Given
        let tokens = tokenize("hello world");
        let left = Feature::new("length", -2, 0.0, FeatureFunction::Length).unwrap();
        let right = Feature::new("length", 5, 0.0, FeatureFunction::Length).unwrap();

        // When / Then
        assert_eq!(None, left.compute(&tokens, 1).unwrap());
        assert_eq!(None, right.compute(&tokens, 0).unwrap());
        assert_eq!(None, FeatureFunction::IsLast.compute(&[], 0).unwrap());
    }
}
