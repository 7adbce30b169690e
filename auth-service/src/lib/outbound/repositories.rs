pub mod account;
pub mod role;

pub use account::PostgresAccountRepository;
pub use role::PostgresRoleStore;
