//! Database repositories
//!
//! Provides the data access layer. Lookups return `Ok(None)` for
//! absent records; errors are reserved for store failures.

pub mod blog;
pub mod user;

pub use blog::BlogRepository;
pub use user::UserRepository;
