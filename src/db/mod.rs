//! Database layer: pool and repositories for SQLite.

mod pool;
mod repositories;

pub use pool::{create_pool, DbPool};
pub use repositories::*;
