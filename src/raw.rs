//! Byte-level access to the integer primitives.
//!
//! This is the only layer that fixes output lengths: operands are read as
//! big-endian integers and results are re-emitted as left-zero-padded buffers
//! of the caller's size. Everything here applies raw RSA without padding;
//! outside of implementing a padding scheme there is no safe use for it.

use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::algorithms::pad::{uint_to_be_pad, uint_to_zeroizing_be_pad};
use crate::algorithms::rsa;
use crate::errors::Result;
use crate::key::{RsaPrivateKey, RsaPublicKey};

/// Masking of the integer handed to the private-key exponentiation, the
/// defence against timing side channels correlated with the ciphertext.
pub enum Blinding<'a> {
    /// No masking. Acceptable only when the operand is public, as it is when
    /// signing.
    Off,
    /// Mask with a fresh factor drawn from the thread-local generator.
    Default,
    /// Mask with a fresh factor drawn from the supplied generator.
    With(&'a mut dyn CryptoRngCore),
}

impl Default for Blinding<'_> {
    fn default() -> Self {
        Blinding::Default
    }
}

pub trait EncryptionPrimitive {
    /// Do NOT use directly! Only for implementors.
    fn raw_encryption_primitive(&self, plaintext: &[u8], pad_size: usize) -> Result<Vec<u8>> {
        let int = Zeroizing::new(BigUint::from_bytes_be(plaintext));
        self.raw_int_encryption_primitive(&int, pad_size)
    }

    fn raw_int_encryption_primitive(&self, plaintext: &BigUint, pad_size: usize)
        -> Result<Vec<u8>>;
}

pub trait DecryptionPrimitive {
    /// Do NOT use directly! Only for implementors.
    fn raw_decryption_primitive(
        &self,
        blinding: Blinding<'_>,
        ciphertext: &[u8],
        pad_size: usize,
    ) -> Result<Vec<u8>> {
        let int = Zeroizing::new(BigUint::from_bytes_be(ciphertext));
        self.raw_int_decryption_primitive(blinding, &int, pad_size)
    }

    fn raw_int_decryption_primitive(
        &self,
        blinding: Blinding<'_>,
        ciphertext: &BigUint,
        pad_size: usize,
    ) -> Result<Vec<u8>>;
}

impl EncryptionPrimitive for RsaPublicKey {
    fn raw_int_encryption_primitive(
        &self,
        plaintext: &BigUint,
        pad_size: usize,
    ) -> Result<Vec<u8>> {
        uint_to_be_pad(rsa::encrypt(self, plaintext)?, pad_size)
    }
}

impl DecryptionPrimitive for RsaPrivateKey {
    fn raw_int_decryption_primitive(
        &self,
        blinding: Blinding<'_>,
        ciphertext: &BigUint,
        pad_size: usize,
    ) -> Result<Vec<u8>> {
        let m = match blinding {
            Blinding::Off => rsa::decrypt_and_check::<dyn CryptoRngCore>(None, self, ciphertext)?,
            Blinding::Default => {
                let mut rng = rand::thread_rng();
                rsa::decrypt_and_check(Some(&mut rng), self, ciphertext)?
            }
            Blinding::With(rng) => rsa::decrypt_and_check(Some(rng), self, ciphertext)?,
        };

        uint_to_zeroizing_be_pad(m, pad_size)
    }
}
