//! Product input schema.

use jiff::Timestamp;
use serde::de::{DeserializeOwned, Error as _};
use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::{
    domain::products::records::{Product, ProductUuid},
    schemas::base::{MetaGenerator, Record, RecordMeta, SystemGenerator},
};

/// Reasons a candidate product is rejected.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("product input must be a JSON object")]
    NotAnObject,

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid value for `{field}`: {source}")]
    InvalidField {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("`id` must be a version 4 UUID, got {0}")]
    UnsupportedIdVersion(ProductUuid),
}

/// Business fields of a product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductData {
    pub name: String,
    pub quantity: i64,
    pub price: f64,
    pub status: bool,
}

/// A validated product, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductIn {
    pub meta: RecordMeta<Product>,
    pub name: String,
    pub quantity: i64,
    pub price: f64,
    pub status: bool,
}

impl ProductIn {
    #[must_use]
    pub fn new(data: ProductData, meta: RecordMeta<Product>) -> Self {
        let ProductData {
            name,
            quantity,
            price,
            status,
        } = data;

        Self {
            meta,
            name,
            quantity,
            price,
            status,
        }
    }

    /// Validate an untyped candidate.
    ///
    /// `name`, `quantity`, `price` and `status` are required. `name` must be a
    /// string; `quantity` also accepts whole floats and integer strings,
    /// `price` numeric strings, and `status` `0`/`1` and yes/no spellings.
    /// `id`, `created_at` and `updated_at` are generated when absent but must
    /// not be `null`. Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] naming the first offending field.
    pub fn from_json(value: Value) -> Result<Self, SchemaError> {
        Self::from_json_with(value, &SystemGenerator)
    }

    /// Same as [`ProductIn::from_json`], drawing defaults from `generator`.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] naming the first offending field.
    pub fn from_json_with(
        value: Value,
        generator: &impl MetaGenerator,
    ) -> Result<Self, SchemaError> {
        let Value::Object(mut object) = value else {
            return Err(SchemaError::NotAnObject);
        };

        let id = optional(&mut object, "id", strict::<ProductUuid>)?;

        if let Some(id) = id
            && !id.is_v4()
        {
            return Err(SchemaError::UnsupportedIdVersion(id));
        }

        let created_at = optional(&mut object, "created_at", strict::<Timestamp>)?;
        let updated_at = optional(&mut object, "updated_at", strict::<Timestamp>)?;

        let data = ProductData {
            name: required(&mut object, "name", strict::<String>)?,
            quantity: required(&mut object, "quantity", lax_i64)?,
            price: required(&mut object, "price", lax_f64)?,
            status: required(&mut object, "status", lax_bool)?,
        };

        Ok(Self::new(
            data,
            RecordMeta::resolve(id, created_at, updated_at, generator),
        ))
    }
}

impl TryFrom<Value> for ProductIn {
    type Error = SchemaError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_json(value)
    }
}

impl Record for ProductIn {
    type Kind = Product;

    fn meta(&self) -> &RecordMeta<Product> {
        &self.meta
    }
}

type Decode<T> = fn(Value) -> Result<T, serde_json::Error>;

fn required<T>(
    object: &mut Map<String, Value>,
    field: &'static str,
    decode: Decode<T>,
) -> Result<T, SchemaError> {
    optional(object, field, decode)?.ok_or(SchemaError::MissingField(field))
}

/// `Ok(None)` only when the key is absent; an explicit `null` is invalid.
fn optional<T>(
    object: &mut Map<String, Value>,
    field: &'static str,
    decode: Decode<T>,
) -> Result<Option<T>, SchemaError> {
    let Some(value) = object.remove(field) else {
        return Ok(None);
    };

    let decoded = if value.is_null() {
        Err(serde_json::Error::custom("null is not allowed"))
    } else {
        decode(value)
    };

    decoded
        .map(Some)
        .map_err(|source| SchemaError::InvalidField { field, source })
}

fn strict<T: DeserializeOwned>(value: Value) -> Result<T, serde_json::Error> {
    serde_json::from_value(value)
}

/// Integers, integral floats, booleans and integer strings.
fn lax_i64(value: Value) -> Result<i64, serde_json::Error> {
    match value {
        Value::Number(number) => integral(&number)
            .ok_or_else(|| serde_json::Error::custom(format!("{number} is not an integer"))),
        Value::Bool(flag) => Ok(i64::from(flag)),
        Value::String(text) => text
            .trim()
            .parse()
            .map_err(|_| serde_json::Error::custom(format!("{text:?} is not an integer"))),
        other => Err(serde_json::Error::custom(format!(
            "expected an integer, got {other}"
        ))),
    }
}

/// Whole floats within `i64` range convert exactly.
fn integral(number: &Number) -> Option<i64> {
    number.as_i64().or_else(|| {
        number
            .as_f64()
            .filter(|float| float.fract() == 0.0)
            .filter(|float| *float >= i64::MIN as f64 && *float < i64::MAX as f64)
            .map(|float| float as i64)
    })
}

/// Numbers, booleans and numeric strings.
fn lax_f64(value: Value) -> Result<f64, serde_json::Error> {
    match value {
        Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| serde_json::Error::custom(format!("{number} is not a number"))),
        Value::Bool(flag) => Ok(f64::from(u8::from(flag))),
        Value::String(text) => text
            .trim()
            .parse()
            .map_err(|_| serde_json::Error::custom(format!("{text:?} is not a number"))),
        other => Err(serde_json::Error::custom(format!(
            "expected a number, got {other}"
        ))),
    }
}

const TRUE_WORDS: [&str; 6] = ["1", "on", "t", "true", "y", "yes"];
const FALSE_WORDS: [&str; 6] = ["0", "off", "f", "false", "n", "no"];

/// Booleans, `0`/`1` and the usual yes/no spellings (case-insensitive).
fn lax_bool(value: Value) -> Result<bool, serde_json::Error> {
    let parsed = match &value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => match number.as_f64() {
            Some(one) if one == 1.0 => Some(true),
            Some(zero) if zero == 0.0 => Some(false),
            _ => None,
        },
        Value::String(text) => {
            let word = text.trim().to_ascii_lowercase();

            if TRUE_WORDS.contains(&word.as_str()) {
                Some(true)
            } else if FALSE_WORDS.contains(&word.as_str()) {
                Some(false)
            } else {
                None
            }
        }
        _ => None,
    };

    parsed.ok_or_else(|| serde_json::Error::custom(format!("{value} is not a boolean")))
}
