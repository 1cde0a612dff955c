use std::collections::HashMap;
use std::io::Read;
use std::iter::FromIterator;

use crate::errors::*;

pub trait Stemmer: Send + Sync {
    fn stem(&self, value: &str) -> String;
}

/// Lookup table mapping inflected forms to their stem
///
/// Unknown values are their own stem.
pub struct HashMapStemmer {
    stems: HashMap<String, String>,
}

impl HashMapStemmer {
    /// Reads records of the form `stem,inflection_1,inflection_2,...`
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .quoting(false)
            .flexible(true)
            .has_headers(false)
            .from_reader(reader);
        let mut stems = HashMap::new();
        for record in csv_reader.records() {
            let record = record?;
            let mut fields = record.iter();
            if let Some(stem) = fields.next() {
                stems.extend(fields.map(|inflection| (inflection.to_string(), stem.to_string())));
            }
        }
        Ok(Self { stems })
    }
}

impl FromIterator<(String, String)> for HashMapStemmer {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            stems: HashMap::from_iter(iter),
        }
    }
}

impl Stemmer for HashMapStemmer {
    fn stem(&self, value: &str) -> String {
        self.stems
            .get(value)
            .cloned()
            .unwrap_or_else(|| value.to_string())
    }
}
