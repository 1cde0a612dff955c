use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::errors::*;

#[allow(non_camel_case_types)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
    DE,
    EN,
    ES,
    FR,
    IT,
    JA,
    KO,
    PT_PT,
    PT_BR,
}

impl Language {
    pub fn all() -> &'static [Language] {
        &[
            Language::DE,
            Language::EN,
            Language::ES,
            Language::FR,
            Language::IT,
            Language::JA,
            Language::KO,
            Language::PT_PT,
            Language::PT_BR,
        ]
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::DE => "de",
            Language::EN => "en",
            Language::ES => "es",
            Language::FR => "fr",
            Language::IT => "it",
            Language::JA => "ja",
            Language::KO => "ko",
            Language::PT_PT => "pt_pt",
            Language::PT_BR => "pt_br",
        }
    }

    /// Separator used to join several token values into a single feature value
    pub fn default_sep(&self) -> &'static str {
        match self {
            Language::JA => "",
            _ => " ",
        }
    }
}

impl FromStr for Language {
    type Err = ::failure::Error;

    fn from_str(s: &str) -> Result<Language> {
        let lowercased = s.to_lowercase();
        Language::all()
            .iter()
            .find(|language| language.code() == lowercased)
            .cloned()
            .ok_or_else(|| FeatureFactoryError::UnknownLanguage(s.to_string()).into())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> ::std::result::Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Language::from_str(&code).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_str() {
        assert_eq!(Language::EN, Language::from_str("en").unwrap());
        assert_eq!(Language::PT_BR, Language::from_str("PT_BR").unwrap());
        assert!(Language::from_str("xx").is_err());
    }

    #[test]
    fn test_default_sep() {
        assert_eq!(" ", Language::FR.default_sep());
        assert_eq!("", Language::JA.default_sep());
    }

    #[test]
    fn test_deserialize_language() {
        let language: Language = serde_json::from_str("\"de\"").unwrap();
        assert_eq!(Language::DE, language);
    }
}
