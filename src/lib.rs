#[cfg(test)]
#[macro_use]
extern crate maplit;

pub mod dataset;
pub mod entity_parser;
pub mod errors;
pub mod language;
pub mod models;
pub mod preprocessing;
pub mod resources;
pub mod slot_filler;
#[cfg(test)]
mod testutils;
pub mod utils;

pub use crate::dataset::Dataset;
pub use crate::errors::*;
pub use crate::language::Language;
pub use crate::models::*;
pub use crate::preprocessing::Token;
pub use crate::resources::requirements::{
    CustomEntityParserUsage, RequiredResources, ResourceRequirement,
};
pub use crate::resources::{ResourceProvider, SharedResources};
pub use crate::slot_filler::{
    get_feature_factory, Feature, FeatureFactory, FeatureProcessor, FittedFeatureFactory,
    TaggingScheme,
};
