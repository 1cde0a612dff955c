use std::collections::HashMap;
use std::sync::Arc;

use itertools::Itertools;
use log::{debug, info};

use super::crf_utils::TaggingScheme;
use super::feature::{Feature, FeatureFunction};
use super::features::*;
use crate::dataset::Dataset;
use crate::entity_parser::{BuiltinEntityParser, CustomEntityParser};
use crate::errors::*;
use crate::language::Language;
use crate::models::feature_factory::*;
use crate::resources::gazetteer::Gazetteer;
use crate::resources::requirements::{CustomEntityParserUsage, ResourceRequirement};
use crate::resources::stemmer::Stemmer;
use crate::resources::word_clusterer::WordClusterer;
use crate::resources::ResourceProvider;
use crate::utils::EntityName;

pub const FACTORY_NAMES: [&str; 11] = [
    "is_digit",
    "is_first",
    "is_last",
    "prefix",
    "suffix",
    "length",
    "ngram",
    "shape_ngram",
    "word_cluster",
    "entity_match",
    "builtin_entity_match",
];

const LANGUAGE_CODE_ARG: &str = "language_code";
const ENTITY_LABELS_ARG: &str = "entity_labels";

/// Kind of a feature factory along with its validated parameters
#[derive(Debug, Clone, PartialEq)]
pub enum FactoryKind {
    IsDigit,
    IsFirst,
    IsLast,
    Prefix {
        prefix_size: usize,
    },
    Suffix {
        suffix_size: usize,
    },
    Length,
    Ngram {
        n: usize,
        use_stemming: bool,
        common_words_gazetteer_name: Option<String>,
    },
    ShapeNgram {
        n: usize,
    },
    WordCluster {
        cluster_name: String,
        use_stemming: bool,
    },
    CustomEntityMatch {
        use_stemming: bool,
        tagging_scheme: TaggingScheme,
    },
    BuiltinEntityMatch {
        tagging_scheme: TaggingScheme,
    },
}

impl FactoryKind {
    fn from_config(config: &FactoryConfig) -> Result<Self> {
        let args = &config.args;
        let factory_name = config.factory_name.as_str();
        Ok(match factory_name {
            "is_digit" => FactoryKind::IsDigit,
            "is_first" => FactoryKind::IsFirst,
            "is_last" => FactoryKind::IsLast,
            "prefix" => FactoryKind::Prefix {
                prefix_size: parse_as_positive(args, factory_name, "prefix_size")?,
            },
            "suffix" => FactoryKind::Suffix {
                suffix_size: parse_as_positive(args, factory_name, "suffix_size")?,
            },
            "length" => FactoryKind::Length,
            "ngram" => FactoryKind::Ngram {
                n: parse_as_positive(args, factory_name, "n")?,
                use_stemming: parse_as_bool(args, "use_stemming")?,
                common_words_gazetteer_name: parse_as_opt_string(
                    args,
                    "common_words_gazetteer_name",
                )?,
            },
            "shape_ngram" => FactoryKind::ShapeNgram {
                n: parse_as_positive(args, factory_name, "n")?,
            },
            "word_cluster" => FactoryKind::WordCluster {
                cluster_name: parse_as_string(args, "cluster_name")?,
                use_stemming: parse_as_bool(args, "use_stemming")?,
            },
            "entity_match" => FactoryKind::CustomEntityMatch {
                use_stemming: parse_as_bool(args, "use_stemming")?,
                tagging_scheme: parse_as_tagging_scheme(args)?,
            },
            "builtin_entity_match" => FactoryKind::BuiltinEntityMatch {
                tagging_scheme: parse_as_tagging_scheme(args)?,
            },
            _ => return Err(FeatureFactoryError::UnknownFactory(factory_name.to_string()).into()),
        })
    }

    /// Whether the features depend on the language, through resources or token separators
    fn requires_language(&self) -> bool {
        match self {
            FactoryKind::Ngram { .. }
            | FactoryKind::ShapeNgram { .. }
            | FactoryKind::WordCluster { .. }
            | FactoryKind::CustomEntityMatch { .. }
            | FactoryKind::BuiltinEntityMatch { .. } => true,
            _ => false,
        }
    }

    fn use_stemming(&self) -> bool {
        match self {
            FactoryKind::Ngram { use_stemming, .. }
            | FactoryKind::WordCluster { use_stemming, .. }
            | FactoryKind::CustomEntityMatch { use_stemming, .. } => *use_stemming,
            _ => false,
        }
    }
}

fn parse_as_positive(
    args: &HashMap<String, serde_json::Value>,
    factory_name: &str,
    arg_name: &str,
) -> Result<usize> {
    let value = parse_as_u64(args, arg_name)?;
    if value < 1 {
        return Err(FeatureFactoryError::InvalidParameter {
            factory: factory_name.to_string(),
            parameter: arg_name.to_string(),
            reason: format!("must be greater than or equal to 1, got {}", value),
        }
        .into());
    }
    Ok(value as usize)
}

fn parse_as_tagging_scheme(args: &HashMap<String, serde_json::Value>) -> Result<TaggingScheme> {
    let code = parse_as_u64(args, "tagging_scheme_code")?;
    if code > u64::from(u8::max_value()) {
        return Err(FeatureFactoryError::UnknownTaggingScheme(code).into());
    }
    TaggingScheme::from_u8(code as u8)
}

/// Builds the feature factory described by `config`
pub fn get_feature_factory(config: &FactoryConfig) -> Result<FeatureFactory> {
    FeatureFactory::from_config(config)
}

/// Feature factory which is not bound to a language yet
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureFactory {
    config: FactoryConfig,
    kind: FactoryKind,
}

impl FeatureFactory {
    pub fn from_config(config: &FactoryConfig) -> Result<Self> {
        let kind = FactoryKind::from_config(config)?;
        if !(0.0..1.0).contains(&config.drop_out) {
            return Err(FeatureFactoryError::InvalidParameter {
                factory: config.factory_name.clone(),
                parameter: "drop_out".to_string(),
                reason: format!("must be in [0, 1), got {}", config.drop_out),
            }
            .into());
        }
        Ok(Self {
            config: config.clone(),
            kind,
        })
    }

    pub fn factory_name(&self) -> &str {
        &self.config.factory_name
    }

    pub fn args(&self) -> &HashMap<String, serde_json::Value> {
        &self.config.args
    }

    pub fn offsets(&self) -> &[i32] {
        &self.config.offsets
    }

    pub fn drop_out(&self) -> f32 {
        self.config.drop_out
    }

    pub fn kind(&self) -> &FactoryKind {
        &self.kind
    }

    /// Resources which must be provisioned before fitting the factory, if any
    pub fn get_required_resources(&self) -> Option<Vec<ResourceRequirement>> {
        match &self.kind {
            FactoryKind::Ngram {
                use_stemming,
                common_words_gazetteer_name,
                ..
            } => {
                let mut requirements = vec![];
                if let Some(gazetteer_name) = common_words_gazetteer_name {
                    requirements.push(ResourceRequirement::Gazetteers(
                        Some(gazetteer_name.clone()).into_iter().collect(),
                    ));
                }
                if *use_stemming {
                    requirements.push(ResourceRequirement::Stems(true));
                }
                Some(requirements)
            }
            FactoryKind::WordCluster {
                cluster_name,
                use_stemming,
            } => Some(vec![
                ResourceRequirement::WordClusters(Some(cluster_name.clone()).into_iter().collect()),
                ResourceRequirement::Stems(*use_stemming),
            ]),
            FactoryKind::CustomEntityMatch { use_stemming, .. } => {
                let usage = if *use_stemming {
                    CustomEntityParserUsage::WithStems
                } else {
                    CustomEntityParserUsage::WithoutStems
                };
                Some(vec![
                    ResourceRequirement::Stems(*use_stemming),
                    ResourceRequirement::CustomEntityParserUsage(usage),
                ])
            }
            _ => None,
        }
    }

    /// Binds the factory to the dataset language
    ///
    /// Builtin entity matching is additionally scoped to the grammar entities of the language
    /// and to the gazetteer entities used in the dataset, or in the intent when provided.
    pub fn fit(
        self,
        dataset: &Dataset,
        intent: Option<&str>,
        resources: &dyn ResourceProvider,
    ) -> Result<FittedFeatureFactory> {
        let language = dataset.language;
        let builtin_entity_scope = match self.kind {
            FactoryKind::BuiltinEntityMatch { .. } => {
                let grammar_entities = resources.supported_grammar_entities(language)?;
                let gazetteer_entities = dataset.gazetteer_entities(intent, resources)?;
                grammar_entities
                    .into_iter()
                    .chain(gazetteer_entities.into_iter())
                    .unique()
                    .collect()
            }
            _ => vec![],
        };
        info!(
            "Fitting '{}' feature factory in language '{}'",
            self.factory_name(),
            language
        );
        self.bind(language, builtin_entity_scope, resources)
    }

    /// Resolves the language dependent resources of the factory
    pub fn bind(
        self,
        language: Language,
        builtin_entity_scope: Vec<EntityName>,
        resources: &dyn ResourceProvider,
    ) -> Result<FittedFeatureFactory> {
        self.bind_opt_language(Some(language), builtin_entity_scope, resources)
    }

    /// Factories whose features do not depend on the language can be bound without one
    fn bind_opt_language(
        self,
        opt_language: Option<Language>,
        builtin_entity_scope: Vec<EntityName>,
        resources: &dyn ResourceProvider,
    ) -> Result<FittedFeatureFactory> {
        let language = if self.kind.requires_language() {
            Some(opt_language.ok_or_else(|| FeatureFactoryError::NotFitted {
                factory: self.config.factory_name.clone(),
                missing: LANGUAGE_CODE_ARG,
            })?)
        } else {
            None
        };
        let opt_stemmer = match language {
            Some(language) if self.kind.use_stemming() => Some(resources.stemmer(language)?),
            _ => None,
        };
        let opt_gazetteer = match (&self.kind, language) {
            (
                FactoryKind::Ngram {
                    common_words_gazetteer_name: Some(gazetteer_name),
                    ..
                },
                Some(language),
            ) => Some(resources.gazetteer(language, gazetteer_name)?),
            _ => None,
        };
        let opt_word_clusterer = match (&self.kind, language) {
            (FactoryKind::WordCluster { cluster_name, .. }, Some(language)) => {
                Some(resources.word_clusterer(language, cluster_name)?)
            }
            _ => None,
        };
        let entity_labels = match &self.kind {
            FactoryKind::BuiltinEntityMatch { .. } => builtin_entity_scope,
            _ => vec![],
        };
        Ok(FittedFeatureFactory {
            config: self.config,
            kind: self.kind,
            language,
            entity_labels,
            opt_stemmer,
            opt_gazetteer,
            opt_word_clusterer,
        })
    }
}

/// Feature factory bound to a language and to its resources, ready to build features
pub struct FittedFeatureFactory {
    config: FactoryConfig,
    kind: FactoryKind,
    language: Option<Language>,
    entity_labels: Vec<EntityName>,
    opt_stemmer: Option<Arc<dyn Stemmer>>,
    opt_gazetteer: Option<Arc<dyn Gazetteer>>,
    opt_word_clusterer: Option<Arc<dyn WordClusterer>>,
}

impl FittedFeatureFactory {
    /// Restores a factory from a configuration produced by `FittedFeatureFactory::config`
    pub fn from_config(
        config: &FactoryConfig,
        resources: &dyn ResourceProvider,
    ) -> Result<Self> {
        let factory = FeatureFactory::from_config(config)?;
        let opt_language = parse_as_opt_string(&config.args, LANGUAGE_CODE_ARG)?
            .map(|language_code| language_code.parse::<Language>())
            .transpose()?;
        let builtin_entity_scope = match factory.kind {
            FactoryKind::BuiltinEntityMatch { .. } => {
                if !config.args.contains_key(ENTITY_LABELS_ARG) {
                    return Err(FeatureFactoryError::NotFitted {
                        factory: config.factory_name.clone(),
                        missing: ENTITY_LABELS_ARG,
                    }
                    .into());
                }
                parse_as_vec_string(&config.args, ENTITY_LABELS_ARG)?
            }
            _ => vec![],
        };
        factory.bind_opt_language(opt_language, builtin_entity_scope, resources)
    }

    /// Configuration of the factory, enriched with the state bound when fitting
    pub fn config(&self) -> FactoryConfig {
        let mut config = self.config.clone();
        if let Some(language) = self.language {
            config = config.arg(LANGUAGE_CODE_ARG, language.code());
        }
        if let FactoryKind::BuiltinEntityMatch { .. } = self.kind {
            config = config.arg(ENTITY_LABELS_ARG, self.entity_labels.clone());
        }
        config
    }

    pub fn factory_name(&self) -> &str {
        &self.config.factory_name
    }

    pub fn offsets(&self) -> &[i32] {
        &self.config.offsets
    }

    pub fn drop_out(&self) -> f32 {
        self.config.drop_out
    }

    pub fn kind(&self) -> &FactoryKind {
        &self.kind
    }

    /// Language of the language dependent factories
    pub fn language(&self) -> Option<Language> {
        self.language
    }

    /// Builtin entities scope resolved when fitting, empty for other kinds of factories
    pub fn entity_labels(&self) -> &[EntityName] {
        &self.entity_labels
    }

    /// One feature per offset, or per entity label and offset for the entity matching kinds
    pub fn build_features(
        &self,
        builtin_entity_parser: Arc<dyn BuiltinEntityParser>,
        custom_entity_parser: Arc<dyn CustomEntityParser>,
    ) -> Result<Vec<Feature>> {
        let separator = self
            .language
            .map_or(" ", |language| language.default_sep());
        let named_functions: Vec<(String, FeatureFunction)> = match &self.kind {
            FactoryKind::IsDigit => vec![("is_digit".to_string(), FeatureFunction::IsDigit)],
            FactoryKind::IsFirst => vec![("is_first".to_string(), FeatureFunction::IsFirst)],
            FactoryKind::IsLast => vec![("is_last".to_string(), FeatureFunction::IsLast)],
            FactoryKind::Prefix { prefix_size } => vec![(
                format!("prefix_{}", prefix_size),
                FeatureFunction::Prefix {
                    prefix_size: *prefix_size,
                },
            )],
            FactoryKind::Suffix { suffix_size } => vec![(
                format!("suffix_{}", suffix_size),
                FeatureFunction::Suffix {
                    suffix_size: *suffix_size,
                },
            )],
            FactoryKind::Length => vec![("length".to_string(), FeatureFunction::Length)],
            FactoryKind::Ngram { n, .. } => vec![(
                format!("ngram_{}", n),
                FeatureFunction::Ngram(NgramFeature {
                    ngram_size: *n,
                    separator,
                    opt_stemmer: self.opt_stemmer.clone(),
                    opt_common_words_gazetteer: self.opt_gazetteer.clone(),
                }),
            )],
            FactoryKind::ShapeNgram { n } => vec![(
                format!("shape_ngram_{}", n),
                FeatureFunction::ShapeNgram(ShapeNgramFeature {
                    ngram_size: *n,
                    separator,
                }),
            )],
            FactoryKind::WordCluster { cluster_name, .. } => {
                let word_clusterer = self.opt_word_clusterer.clone().ok_or_else(|| {
                    FeatureFactoryError::NotFitted {
                        factory: self.factory_name().to_string(),
                        missing: "word_clusterer",
                    }
                })?;
                vec![(
                    format!("word_cluster_{}", cluster_name),
                    FeatureFunction::WordCluster(WordClusterFeature {
                        cluster_name: cluster_name.clone(),
                        word_clusterer,
                        opt_stemmer: self.opt_stemmer.clone(),
                    }),
                )]
            }
            FactoryKind::CustomEntityMatch { tagging_scheme, .. } => custom_entity_parser
                .entities()
                .into_iter()
                .sorted()
                .dedup()
                .map(|entity| {
                    (
                        format!("entity_match_{}", entity),
                        FeatureFunction::CustomEntityMatch(CustomEntityMatchFeature {
                            entity,
                            tagging_scheme: *tagging_scheme,
                            opt_stemmer: self.opt_stemmer.clone(),
                            custom_entity_parser: custom_entity_parser.clone(),
                        }),
                    )
                })
                .collect(),
            FactoryKind::BuiltinEntityMatch { tagging_scheme } => self
                .entity_labels
                .iter()
                .map(|builtin_entity| {
                    (
                        format!("builtin_entity_match_{}", builtin_entity),
                        FeatureFunction::BuiltinEntityMatch(BuiltinEntityMatchFeature {
                            builtin_entity: builtin_entity.clone(),
                            tagging_scheme: *tagging_scheme,
                            builtin_entity_parser: builtin_entity_parser.clone(),
                        }),
                    )
                })
                .collect(),
        };

        let features = named_functions
            .iter()
            .flat_map(|(name, function)| {
                self.config
                    .offsets
                    .iter()
                    .map(move |offset| (name, *offset, function))
            })
            .map(|(name, offset, function)| {
                Feature::new(name, offset, self.config.drop_out, function.clone())
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(
            "Built {} features with '{}' feature factory",
            features.len(),
            self.factory_name()
        );
        Ok(features)
    }
}
