pub mod credential;
pub mod flag;

pub use credential::PostgresCredentialStore;
pub use flag::PostgresFlagStore;
