//! Postgres repositories for VideoHub.
//!
//! Repositories own all SQL. Handlers and services never see `sqlx` types
//! beyond the shared `PgPool`.

pub mod account;
pub mod video;

pub use account::AccountRepository;
pub use video::VideoRepository;
