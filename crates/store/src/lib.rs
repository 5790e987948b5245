//! Product store: schemas, persistence and services.

pub mod context;
pub mod database;
pub mod domain;
pub mod schemas;

#[cfg(test)]
mod test;

mod uuids;

pub use uuids::TypedUuid;
