pub mod jwt;
pub mod middleware;
pub mod models;

pub use jwt::{IdentityProvider, JwtIdentityProvider};
pub use models::OwnerIdentity;
