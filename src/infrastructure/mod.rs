pub mod credential_pool;

pub use credential_pool::{Channel, Credential, CredentialPool};
