//! Schemas

pub mod base;
pub mod product;

pub use base::{MetaGenerator, Record, RecordMeta, SystemGenerator};
pub use product::{ProductData, ProductIn, SchemaError};
