//! Rank-based permission synchronization.
//!
//! - `store`: the [`AuthorizationStore`] boundary
//! - `memory`: process-local store for dry runs and tests
//! - `postgres`: `sqlx` store over the `auth_*` tables
//! - `service`: [`synchronize`] and permission seeding

pub mod memory;
pub mod postgres;
pub mod service;
pub mod store;

pub use memory::InMemoryAuthorizationStore;
pub use postgres::PgAuthorizationStore;
pub use service::{current_rank, seed_permissions, synchronize};
pub use store::AuthorizationStore;
