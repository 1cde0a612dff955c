pub mod builtin_entity_parser;
pub mod custom_entity_parser;
mod utils;

pub use self::builtin_entity_parser::{
    BuiltinEntity, BuiltinEntityParser, CachingBuiltinEntityParser,
};
pub use self::custom_entity_parser::{
    CachingCustomEntityParser, CustomEntity, CustomEntityParser,
};
