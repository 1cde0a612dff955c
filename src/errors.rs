use failure::Fail;

#[derive(Debug, Fail)]
pub enum FeatureFactoryError {
    #[fail(display = "Unknown feature factory: '{}'", _0)]
    UnknownFactory(String),
    #[fail(display = "Invalid parameter '{}' for factory '{}': {}", parameter, factory, reason)]
    InvalidParameter {
        factory: String,
        parameter: String,
        reason: String,
    },
    #[fail(display = "Can't retrieve '{}' parameter", _0)]
    MissingArgument(String),
    #[fail(display = "'{}' isn't a {}", arg_name, expected_type)]
    InvalidArgumentType {
        arg_name: String,
        expected_type: &'static str,
    },
    #[fail(display = "Unknown tagging scheme identifier: {}", _0)]
    UnknownTaggingScheme(u64),
    #[fail(display = "Unknown language: '{}'", _0)]
    UnknownLanguage(String),
    #[fail(display = "Factory '{}' is not fitted: missing '{}'", factory, missing)]
    NotFitted {
        factory: String,
        missing: &'static str,
    },
    #[fail(display = "'{}' is a reserved feature name", _0)]
    ReservedFeatureName(String),
    #[fail(display = "Feature name '{}' is produced more than once", _0)]
    DuplicateFeatureName(String),
}

pub type Result<T> = ::std::result::Result<T, ::failure::Error>;
