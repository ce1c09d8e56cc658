//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories, the auth components, and external collaborators.

pub mod blog;
pub mod user;

pub use blog::BlogService;
pub use user::UserService;
