use impl_helper::ImplHelper;
use serde::{
    de::{Error, Unexpected, Visitor},
    Deserialize, Deserializer,
};
use serde_json::Value;
use std::fmt;

use crate::{
    deprecation::{Deprecation, DeprecationSink},
    error::{PaginationError, Result},
};

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_PER_PAGE: usize = 10;
pub const DEFAULT_PER_BLOCK: usize = 10;

/// Requested page plus the page and block sizes.
///
/// `Deserialize` accepts only the current names. Legacy names are read by
/// [`PaginatorConfig::from_params`] and [`PaginatorConfig::from_json`], which
/// report them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ImplHelper)]
#[serde(default, deny_unknown_fields)]
pub struct PaginatorConfig {
    #[helper(copy, set)]
    #[serde(deserialize_with = "coerce_usize")]
    page: usize,

    #[helper(copy, set)]
    #[serde(deserialize_with = "coerce_usize")]
    per_page: usize,

    #[helper(copy, set)]
    #[serde(deserialize_with = "coerce_usize")]
    per_block: usize,
}

impl Default for PaginatorConfig {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            per_block: DEFAULT_PER_BLOCK,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Param {
    Page,
    PerPage,
    PerBlock,
}

impl Param {
    fn name(self) -> &'static str {
        match self {
            Param::Page => "page",
            Param::PerPage => "per_page",
            Param::PerBlock => "per_block",
        }
    }

    /// Maps current and legacy names, reporting the legacy ones.
    fn resolve(name: &str, sink: &dyn DeprecationSink) -> Result<Self> {
        let (param, legacy) = match name {
            "page" => (Param::Page, None),
            "per_page" => (Param::PerPage, None),
            "per_block" => (Param::PerBlock, None),
            "current_page" => (Param::Page, Some("current_page")),
            "rows_per_page" => (Param::PerPage, Some("rows_per_page")),
            "pages_per_block" => (Param::PerBlock, Some("pages_per_block")),
            _ => {
                return Err(PaginationError::UnknownParameter {
                    name: name.to_string(),
                })
            }
        };

        if let Some(legacy) = legacy {
            sink.deprecated(&Deprecation::parameter(legacy, param.name()));
        }

        Ok(param)
    }
}

impl PaginatorConfig {
    pub fn new(page: usize, per_page: usize, per_block: usize) -> Self {
        Self {
            page,
            per_page,
            per_block,
        }
    }

    fn apply(&mut self, param: Param, value: usize) {
        match param {
            Param::Page => self.page = value,
            Param::PerPage => self.per_page = value,
            Param::PerBlock => self.per_block = value,
        }
    }

    /// Builds a config from loosely typed `(name, value)` pairs, e.g. query string parameters.
    ///
    /// Missing names keep their defaults and later pairs override earlier ones.
    pub fn from_params<I, K, V>(params: I, sink: &dyn DeprecationSink) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();

        for (name, value) in params {
            let (name, value) = (name.as_ref(), value.as_ref());
            let param = Param::resolve(name, sink)?;
            let number = coerce_str(value).ok_or_else(|| PaginationError::InvalidNumber {
                name: name.to_string(),
                value: value.to_string(),
            })?;

            config.apply(param, number);
        }

        Ok(config)
    }

    /// Same as [`PaginatorConfig::from_params`] for a JSON object.
    ///
    /// Values may be integers, floats (truncated) or numeric strings.
    pub fn from_json(value: &Value, sink: &dyn DeprecationSink) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(PaginationError::NotAnObject {
                found: json_type(value),
            });
        };

        let mut config = Self::default();

        for (name, value) in map {
            let param = Param::resolve(name, sink)?;
            let number = coerce_usize(value).map_err(|_| PaginationError::InvalidNumber {
                name: name.clone(),
                value: value.to_string(),
            })?;

            config.apply(param, number);
        }

        Ok(config)
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn coerce_str(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok()
}

struct CoercedVisitor;

impl<'de> Visitor<'de> for CoercedVisitor {
    type Value = usize;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a non-negative integer or a string holding one")
    }

    fn visit_u64<E: Error>(self, value: u64) -> std::result::Result<usize, E> {
        usize::try_from(value).map_err(|_| E::invalid_value(Unexpected::Unsigned(value), &self))
    }

    fn visit_i64<E: Error>(self, value: i64) -> std::result::Result<usize, E> {
        usize::try_from(value).map_err(|_| E::invalid_value(Unexpected::Signed(value), &self))
    }

    fn visit_f64<E: Error>(self, value: f64) -> std::result::Result<usize, E> {
        if value.is_finite() && value >= 0.0 && value <= usize::MAX as f64 {
            Ok(value.trunc() as usize)
        } else {
            Err(E::invalid_value(Unexpected::Float(value), &self))
        }
    }

    fn visit_str<E: Error>(self, value: &str) -> std::result::Result<usize, E> {
        coerce_str(value).ok_or_else(|| E::invalid_value(Unexpected::Str(value), &self))
    }
}

fn coerce_usize<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(CoercedVisitor)
}
