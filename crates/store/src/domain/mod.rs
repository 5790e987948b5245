//! Store Domain Concerns

pub mod products;
