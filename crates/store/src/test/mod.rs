//! Test support: a session database, per-test cleanup and sample data.

mod db;

pub(crate) use context::TestContext;
pub(crate) use db::run;
