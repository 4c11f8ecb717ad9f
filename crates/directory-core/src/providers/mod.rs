//! Ports to collaborators outside the directory: the geographic reference
//! service and the credential/token mechanism.

pub mod address_lookup;
pub mod auth_provider;

pub use address_lookup::AddressLookup;
pub use auth_provider::AuthProvider;

#[cfg(test)]
pub use auth_provider::MockAuthProvider;
