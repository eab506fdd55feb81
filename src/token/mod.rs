mod coordinator;
mod store;

pub use coordinator::RefreshCoordinator;
pub use store::{AccessToken, TokenStore};
