pub mod middleware;
pub mod tokens;

pub use middleware::{auth_middleware, CurrentAccount};
pub use tokens::TokenService;
