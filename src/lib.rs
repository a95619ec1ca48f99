//! RSA public-key cryptography: key generation, the CRT-accelerated and
//! blinded integer primitives, and the PKCS#1 v1.5, OAEP and PSS padding
//! schemes of [RFC 8017].
//!
//! # Usage
//!
//! Generate a key and round-trip a message through PKCS#1 v1.5 encryption:
//!
//! ```
//! use rsa_core::{pkcs1v15, RsaPrivateKey};
//!
//! let mut rng = rand::thread_rng();
//! let priv_key = RsaPrivateKey::new(&mut rng, 512).expect("failed to generate a key");
//! let pub_key = priv_key.to_public_key();
//!
//! let ciphertext = pkcs1v15::encrypt(&mut rng, &pub_key, b"hello world").unwrap();
//! let plaintext = pkcs1v15::decrypt(&priv_key, &ciphertext);
//! assert_eq!(plaintext.as_deref(), Some(&b"hello world"[..]));
//! ```
//!
//! Sign and verify with PSS, parameterized by the hash:
//!
//! ```
//! use rsa_core::{pss, RsaPrivateKey};
//! use sha2::Sha256;
//!
//! let mut rng = rand::thread_rng();
//! let priv_key = RsaPrivateKey::new(&mut rng, 1024).expect("failed to generate a key");
//! let pub_key = priv_key.to_public_key();
//!
//! let sig = pss::sign::<_, Sha256>(&mut rng, &priv_key, b"attested", None).unwrap();
//! assert!(pss::verify::<Sha256>(&pub_key, b"attested", &sig, None));
//! ```
//!
//! Private-key operations mask their operand by default (see
//! [`raw::Blinding`]); decryption entry points come in a thread-local-RNG
//! flavour and a `_blinded` flavour taking an explicit mode.
//!
//! [RFC 8017]: https://datatracker.ietf.org/doc/html/rfc8017

pub mod errors;
pub mod oaep;
pub mod pkcs1v15;
pub mod pss;
pub mod raw;
pub mod traits;

mod algorithms;
mod key;

pub use crate::errors::{Error, Result};
pub use crate::key::{RsaPrivateKey, RsaPublicKey};
pub use crate::raw::Blinding;
pub use crate::traits::{PrivateKeyParts, PublicKeyParts};
