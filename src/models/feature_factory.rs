use std::collections::HashMap;

use serde_derive::{Deserialize, Serialize};

use crate::errors::*;

/// Declarative description of a feature factory
///
/// An empty list of `offsets` corresponds to no feature at all. The optional `drop_out` is only
/// used at train time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactoryConfig {
    pub factory_name: String,
    #[serde(default)]
    pub args: HashMap<String, serde_json::Value>,
    pub offsets: Vec<i32>,
    #[serde(default)]
    pub drop_out: f32,
}

impl FactoryConfig {
    pub fn new(factory_name: &str, offsets: Vec<i32>) -> Self {
        Self {
            factory_name: factory_name.to_string(),
            args: HashMap::new(),
            offsets,
            drop_out: 0.0,
        }
    }

    pub fn arg<V: Into<serde_json::Value>>(mut self, name: &str, value: V) -> Self {
        self.args.insert(name.to_string(), value.into());
        self
    }

    pub fn drop_out(mut self, drop_out: f32) -> Self {
        self.drop_out = drop_out;
        self
    }
}

fn get_arg<'a>(
    args: &'a HashMap<String, serde_json::Value>,
    arg_name: &str,
) -> Result<&'a serde_json::Value> {
    Ok(args
        .get(arg_name)
        .ok_or_else(|| FeatureFactoryError::MissingArgument(arg_name.to_string()))?)
}

fn invalid_type(arg_name: &str, expected_type: &'static str) -> FeatureFactoryError {
    FeatureFactoryError::InvalidArgumentType {
        arg_name: arg_name.to_string(),
        expected_type,
    }
}

pub fn parse_as_string(args: &HashMap<String, serde_json::Value>, arg_name: &str) -> Result<String> {
    Ok(get_arg(args, arg_name)?
        .as_str()
        .ok_or_else(|| invalid_type(arg_name, "string"))?
        .to_string())
}

/// A missing argument and a `null` one are both parsed as `None`
pub fn parse_as_opt_string(
    args: &HashMap<String, serde_json::Value>,
    arg_name: &str,
) -> Result<Option<String>> {
    match args.get(arg_name) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(value) => Ok(Some(
            value
                .as_str()
                .ok_or_else(|| invalid_type(arg_name, "string"))?
                .to_string(),
        )),
    }
}

pub fn parse_as_vec_string(
    args: &HashMap<String, serde_json::Value>,
    arg_name: &str,
) -> Result<Vec<String>> {
    get_arg(args, arg_name)?
        .as_array()
        .ok_or_else(|| invalid_type(arg_name, "array"))?
        .iter()
        .map(|v| {
            Ok(v.as_str()
                .ok_or_else(|| invalid_type(arg_name, "array of strings"))?
                .to_string())
        })
        .collect()
}

pub fn parse_as_bool(args: &HashMap<String, serde_json::Value>, arg_name: &str) -> Result<bool> {
    Ok(get_arg(args, arg_name)?
        .as_bool()
        .ok_or_else(|| invalid_type(arg_name, "bool"))?)
}

pub fn parse_as_u64(args: &HashMap<String, serde_json::Value>, arg_name: &str) -> Result<u64> {
    Ok(get_arg(args, arg_name)?
        .as_u64()
        .ok_or_else(|| invalid_type(arg_name, "u64"))?)
}
