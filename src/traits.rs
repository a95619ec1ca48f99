//! Traits related to the key components.

mod keys;

pub use keys::{PrivateKeyParts, PublicKeyParts};
