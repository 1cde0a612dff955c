use crate::errors::*;

pub const BEGINNING_PREFIX: &str = "B-";
pub const INSIDE_PREFIX: &str = "I-";
pub const LAST_PREFIX: &str = "L-";
pub const UNIT_PREFIX: &str = "U-";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TaggingScheme {
    IO,
    BIO,
    BILOU,
}

impl TaggingScheme {
    pub fn from_u8(i: u8) -> Result<TaggingScheme> {
        match i {
            0 => Ok(TaggingScheme::IO),
            1 => Ok(TaggingScheme::BIO),
            2 => Ok(TaggingScheme::BILOU),
            _ => Err(FeatureFactoryError::UnknownTaggingScheme(i as u64).into()),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            TaggingScheme::IO => 0,
            TaggingScheme::BIO => 1,
            TaggingScheme::BILOU => 2,
        }
    }
}

/// Prefix of the tag of the token at `index`, within a match spanning the sorted token `indexes`
pub fn get_scheme_prefix(index: usize, indexes: &[usize], tagging_scheme: TaggingScheme) -> &'static str {
    match tagging_scheme {
        TaggingScheme::IO => INSIDE_PREFIX,
        TaggingScheme::BIO => {
            if Some(&index) == indexes.first() {
                BEGINNING_PREFIX
            } else {
                INSIDE_PREFIX
            }
        }
        TaggingScheme::BILOU => {
            if indexes.len() == 1 {
                UNIT_PREFIX
            } else if Some(&index) == indexes.first() {
                BEGINNING_PREFIX
            } else if Some(&index) == indexes.last() {
                LAST_PREFIX
            } else {
                INSIDE_PREFIX
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_scheme_prefix() {
        // Given
        let indexes = vec![3, 4, 5];

        // When
        let actual_results = vec![
            get_scheme_prefix(5, &indexes, TaggingScheme::IO),
            get_scheme_prefix(3, &indexes, TaggingScheme::BIO),
            get_scheme_prefix(4, &indexes, TaggingScheme::BIO),
            get_scheme_prefix(3, &indexes, TaggingScheme::BILOU),
            get_scheme_prefix(4, &indexes, TaggingScheme::BILOU),
            get_scheme_prefix(5, &indexes, TaggingScheme::BILOU),
            get_scheme_prefix(1, &[1], TaggingScheme::BILOU),
            get_scheme_prefix(1, &[1], TaggingScheme::BIO),
        ];

        // Then
        let expected_results = vec!["I-", "B-", "I-", "B-", "I-", "L-", "U-", "B-"];
        assert_eq!(actual_results, expected_results);
    }

    #[test]
    fn test_get_scheme_prefix_with_no_matched_index() {
        assert_eq!("I-", get_scheme_prefix(0, &[], TaggingScheme::IO));
        assert_eq!("I-", get_scheme_prefix(0, &[], TaggingScheme::BIO));
        assert_eq!("I-", get_scheme_prefix(0, &[], TaggingScheme::BILOU));
    }

    #[test]
    fn test_tagging_scheme_from_u8() {
        assert_eq!(TaggingScheme::BILOU, TaggingScheme::from_u8(2).unwrap());
        assert_eq!(1, TaggingScheme::from_u8(1).unwrap().code());
        assert!(TaggingScheme::from_u8(3).is_err());
    }
}
