use std::collections::BTreeSet;

use serde_derive::{Deserialize, Serialize};

/// Flavour of custom entity values the custom entity parser must be built with
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomEntityParserUsage {
    WithStems,
    WithoutStems,
    WithAndWithoutStems,
}

impl CustomEntityParserUsage {
    pub fn merge(self, other: CustomEntityParserUsage) -> CustomEntityParserUsage {
        if self == other {
            self
        } else {
            CustomEntityParserUsage::WithAndWithoutStems
        }
    }
}

/// A resource that a feature factory needs to be provisioned with before fitting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceRequirement {
    Gazetteers(BTreeSet<String>),
    Stems(bool),
    WordClusters(BTreeSet<String>),
    CustomEntityParserUsage(CustomEntityParserUsage),
}

/// Union of the resources required by several feature factories
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredResources {
    pub gazetteers: BTreeSet<String>,
    pub stems: bool,
    pub word_clusters: BTreeSet<String>,
    pub custom_entity_parser_usage: Option<CustomEntityParserUsage>,
}

impl RequiredResources {
    pub fn add(&mut self, requirement: ResourceRequirement) {
        match requirement {
            ResourceRequirement::Gazetteers(names) => self.gazetteers.extend(names),
            ResourceRequirement::Stems(stems) => self.stems |= stems,
            ResourceRequirement::WordClusters(names) => self.word_clusters.extend(names),
            ResourceRequirement::CustomEntityParserUsage(usage) => {
                self.custom_entity_parser_usage = Some(
                    self.custom_entity_parser_usage
                        .map_or(usage, |current| current.merge(usage)),
                )
            }
        }
    }

    pub fn merge(mut self, other: RequiredResources) -> RequiredResources {
        self.gazetteers.extend(other.gazetteers);
        self.stems |= other.stems;
        self.word_clusters.extend(other.word_clusters);
        if let Some(usage) = other.custom_entity_parser_usage {
            self.add(ResourceRequirement::CustomEntityParserUsage(usage));
        }
        self
    }
}

impl std::iter::FromIterator<ResourceRequirement> for RequiredResources {
    fn from_iter<T: IntoIterator<Item = ResourceRequirement>>(iter: T) -> Self {
        let mut resources = RequiredResources::default();
        for requirement in iter {
            resources.add(requirement);
        }
        resources
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_parser_usages() {
        use self::CustomEntityParserUsage::*;
        assert_eq!(WithStems, WithStems.merge(WithStems));
        assert_eq!(WithAndWithoutStems, WithStems.merge(WithoutStems));
        assert_eq!(WithAndWithoutStems, WithAndWithoutStems.merge(WithoutStems));
    }

    #[test]
    fn test_collect_required_resources() {
        // Given
        let requirements = vec![
            ResourceRequirement::Gazetteers(btreeset! {"top_10000_words".to_string()}),
            ResourceRequirement::Stems(false),
            ResourceRequirement::WordClusters(btreeset! {"brown_clusters".to_string()}),
            ResourceRequirement::Stems(true),
            ResourceRequirement::CustomEntityParserUsage(CustomEntityParserUsage::WithoutStems),
            ResourceRequirement::CustomEntityParserUsage(CustomEntityParserUsage::WithStems),
        ];

        // When
        let resources: RequiredResources = requirements.into_iter().collect();

        // Then
        let expected_resources = RequiredResources {
            gazetteers: btreeset! {"top_10000_words".to_string()},
            stems: true,
            word_clusters: btreeset! {"brown_clusters".to_string()},
            custom_entity_parser_usage: Some(CustomEntityParserUsage::WithAndWithoutStems),
        };
        assert_eq!(expected_resources, resources);
    }

    #[test]
    fn test_merge_required_resources() {
        // Given
        let lhs = RequiredResources {
            gazetteers: btreeset! {"a".to_string()},
            ..Default::default()
        };
        let rhs = RequiredResources {
            gazetteers: btreeset! {"b".to_string()},
            stems: true,
            word_clusters: BTreeSet::new(),
            custom_entity_parser_usage: Some(CustomEntityParserUsage::WithStems),
        };

        // When
        let merged = lhs.merge(rhs);

        // Then
        assert_eq!(btreeset! {"a".to_string(), "b".to_string()}, merged.gazetteers);
        assert!(merged.stems);
        assert_eq!(Some(CustomEntityParserUsage::WithStems), merged.custom_entity_parser_usage);
    }
}
