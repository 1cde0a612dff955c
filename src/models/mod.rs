pub mod feature_factory;

pub use self::feature_factory::FactoryConfig;
