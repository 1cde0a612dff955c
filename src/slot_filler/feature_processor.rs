use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use failure::ResultExt;
use log::info;
use rand::Rng;

use super::feature::Feature;
use super::feature_factory::{get_feature_factory, FittedFeatureFactory};
use crate::dataset::Dataset;
use crate::entity_parser::{BuiltinEntityParser, CustomEntityParser};
use crate::errors::*;
use crate::models::FactoryConfig;
use crate::preprocessing::Token;
use crate::resources::requirements::RequiredResources;
use crate::resources::ResourceProvider;

/// Computes the features of all the configured factories on tokenized sentences
pub struct FeatureProcessor {
    features: Vec<Feature>,
    /// Features of the same cache group compute the same function, and share their values
    cache_groups: Vec<usize>,
}

impl FeatureProcessor {
    /// Features with the same base name are assumed to compute the same function
    pub fn new(features: Vec<Feature>) -> Result<Self> {
        let group_keys = features
            .iter()
            .map(|feature| (0, feature.base_name.clone()))
            .collect();
        Self::with_cache_groups(features, group_keys)
    }

    fn with_cache_groups(features: Vec<Feature>, group_keys: Vec<(usize, String)>) -> Result<Self> {
        let mut names = HashSet::new();
        for feature in features.iter() {
            if !names.insert(feature.name.as_str()) {
                return Err(FeatureFactoryError::DuplicateFeatureName(feature.name.clone()).into());
            }
        }
        let mut group_ids = HashMap::new();
        let cache_groups = group_keys
            .into_iter()
            .map(|key| {
                let next_id = group_ids.len();
                *group_ids.entry(key).or_insert(next_id)
            })
            .collect();
        Ok(Self {
            features,
            cache_groups,
        })
    }

    pub fn fit(
        configs: &[FactoryConfig],
        dataset: &Dataset,
        intent: Option<&str>,
        resources: &dyn ResourceProvider,
        builtin_entity_parser: Arc<dyn BuiltinEntityParser>,
        custom_entity_parser: Arc<dyn CustomEntityParser>,
    ) -> Result<Self> {
        let fitted_factories = configs
            .iter()
            .map(|config| {
                Ok(get_feature_factory(config)?
                    .fit(dataset, intent, resources)
                    .with_context(|_| format!("Cannot fit '{}' factory", config.factory_name))?)
            })
            .collect::<Result<Vec<_>>>()?;
        let processor = Self::from_fitted_factories(
            &fitted_factories,
            builtin_entity_parser,
            custom_entity_parser,
        )?;
        info!(
            "Fitted {} feature factories producing {} features",
            fitted_factories.len(),
            processor.features.len()
        );
        Ok(processor)
    }

    pub fn from_fitted_factories(
        factories: &[FittedFeatureFactory],
        builtin_entity_parser: Arc<dyn BuiltinEntityParser>,
        custom_entity_parser: Arc<dyn CustomEntityParser>,
    ) -> Result<Self> {
        let mut features = vec![];
        let mut group_keys = vec![];
        // Two factories may share a base name while computing different values, such as
        // ngrams with and without stemming, hence the factory index in the cache group
        for (factory_index, factory) in factories.iter().enumerate() {
            for feature in factory
                .build_features(builtin_entity_parser.clone(), custom_entity_parser.clone())?
            {
                group_keys.push((factory_index, feature.base_name.clone()));
                features.push(feature);
            }
        }
        Self::with_cache_groups(features, group_keys)
    }

    /// Union of the resources needed by the factories described by `configs`
    pub fn required_resources(configs: &[FactoryConfig]) -> Result<RequiredResources> {
        Ok(configs
            .iter()
            .map(get_feature_factory)
            .collect::<Result<Vec<_>>>()?
            .iter()
            .filter_map(|factory| factory.get_required_resources())
            .flatten()
            .collect())
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Returns, for each token, the names and values of the features which have a value
    pub fn compute_features(&self, tokens: &[Token]) -> Result<Vec<Vec<(String, String)>>> {
        self.compute_filtered_features(tokens, |_| true)
    }

    /// Same as `compute_features`, except that each feature is randomly skipped according to
    /// its drop out probability
    pub fn compute_features_with_drop_out<R: Rng>(
        &self,
        tokens: &[Token],
        rng: &mut R,
    ) -> Result<Vec<Vec<(String, String)>>> {
        self.compute_filtered_features(tokens, |feature| {
            feature.drop_out <= 0.0 || rng.gen::<f32>() >= feature.drop_out
        })
    }

    fn compute_filtered_features<F>(
        &self,
        tokens: &[Token],
        mut keep_feature: F,
    ) -> Result<Vec<Vec<(String, String)>>>
    where
        F: FnMut(&Feature) -> bool,
    {
        // Computed once per cache group and token
        let mut cache: HashMap<(usize, usize), Option<String>> = HashMap::new();
        let mut features = Vec::with_capacity(tokens.len());
        for token_index in 0..tokens.len() {
            let mut token_features = vec![];
            for (feature, cache_group) in self.features.iter().zip(self.cache_groups.iter()) {
                if !keep_feature(feature) {
                    continue;
                }
                let shifted_index = match feature.shifted_index(token_index, tokens.len()) {
                    Some(index) => index,
                    None => continue,
                };
                let cache_key = (*cache_group, shifted_index);
                let opt_value = match cache.get(&cache_key) {
                    Some(opt_value) => opt_value.clone(),
                    None => {
                        let opt_value = feature.function.compute(tokens, shifted_index)?;
                        cache.insert(cache_key, opt_value.clone());
                        opt_value
                    }
                };
                if let Some(value) = opt_value {
                    token_features.push((feature.name.clone(), value));
                }
            }
            features.push(token_features);
        }
        Ok(features)
    }
}
