use std::collections::HashMap;
use std::io::Read;
use std::iter::FromIterator;

use failure::format_err;

use crate::errors::*;

pub trait WordClusterer: Send + Sync {
    fn get_cluster(&self, word: &str) -> Option<String>;
}

pub struct HashMapWordClusterer {
    values: HashMap<String, String>,
}

impl HashMapWordClusterer {
    /// Reads tab separated `word<TAB>cluster` records
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .quoting(false)
            .flexible(true)
            .has_headers(false)
            .from_reader(reader);
        let mut values = HashMap::<String, String>::new();
        for record in csv_reader.records() {
            let record = record?;
            match (record.get(0), record.get(1)) {
                (Some(word), Some(cluster)) => {
                    values.insert(word.to_string(), cluster.to_string());
                }
                _ => {
                    return Err(format_err!(
                        "Invalid word cluster record, expected 'word<TAB>cluster': {:?}",
                        record
                    ))
                }
            }
        }
        Ok(Self { values })
    }
}

impl FromIterator<(String, String)> for HashMapWordClusterer {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            values: HashMap::from_iter(iter),
        }
    }
}

impl WordClusterer for HashMapWordClusterer {
    fn get_cluster(&self, word: &str) -> Option<String> {
        self.values.get(word).cloned()
    }
}
