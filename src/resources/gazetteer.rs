use std::collections::HashSet;
use std::io::{BufRead, BufReader, Read};
use std::iter::FromIterator;

use crate::errors::*;
use crate::preprocessing::normalize;

/// Set of normalized words, such as the most common words of a language
pub trait Gazetteer: Send + Sync {
    fn contains(&self, value: &str) -> bool;
}

pub struct HashSetGazetteer {
    values: HashSet<String>,
}

impl HashSetGazetteer {
    /// Reads one word per line
    ///
    /// Words are normalized, blank lines are skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        BufReader::new(reader)
            .lines()
            .filter_map(|line| match line {
                Ok(ref word) if word.trim().is_empty() => None,
                Ok(word) => Some(Ok(normalize(word.trim()))),
                Err(e) => Some(Err(failure::Error::from(e))),
            })
            .collect()
    }
}

impl FromIterator<String> for HashSetGazetteer {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self {
            values: HashSet::from_iter(iter),
        }
    }
}

impl Gazetteer for HashSetGazetteer {
    fn contains(&self, value: &str) -> bool {
        self.values.contains(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_common_words() {
        // Given
        let common_words: &[u8] = "the\nOf\n\n  and \nto\n".as_ref();

        // When
        let gazetteer = HashSetGazetteer::from_reader(common_words).unwrap();

        // Then
        assert!(gazetteer.contains("the"));
        assert!(gazetteer.contains("of"));
        assert!(gazetteer.contains("and"));
        assert!(!gazetteer.contains("Of"));
        assert!(!gazetteer.contains(""));
        assert!(!gazetteer.contains("beatles"));
    }
}
