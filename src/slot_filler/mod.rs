pub mod crf_utils;
pub mod feature;
pub mod feature_factory;
pub mod feature_processor;
pub mod features;
mod features_utils;

pub use self::crf_utils::TaggingScheme;
pub use self::feature::{Feature, FeatureFunction};
pub use self::feature_factory::{
    get_feature_factory, FactoryKind, FeatureFactory, FittedFeatureFactory,
};
pub use self::feature_processor::FeatureProcessor;
