pub mod memory;
pub mod postgres;
pub mod timeout;

pub use memory::InMemoryCredentialStore;
pub use postgres::PostgresCredentialStore;
pub use timeout::TimeoutCredentialStore;
