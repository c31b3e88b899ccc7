/// Credential persistence and global git identity - Gateway
mod credentials;
mod identity;

pub use credentials::{CredentialStore, Credentials, Identity};
pub use identity::ensure_identity;
