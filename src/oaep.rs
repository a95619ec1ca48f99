//! Encryption and decryption using [OAEP padding].
//!
//! The hash `D` digests the optional label and drives MGF1; both uses share
//! one function, instantiated at compile time.
//!
//! [OAEP padding]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.1

use digest::{Digest, FixedOutputReset};
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::algorithms::oaep::{oaep_decrypt, oaep_encrypt};
use crate::errors::Result;
use crate::key::{check_public, RsaPrivateKey, RsaPublicKey};
use crate::raw::{Blinding, DecryptionPrimitive, EncryptionPrimitive};
use crate::traits::PublicKeyParts;

/// Encrypts the given message with RSA-OAEP.
///
/// The message must be no longer than `size() - 2 * output_size() - 2` bytes.
/// The label defaults to the empty string.
pub fn encrypt<R, D>(
    rng: &mut R,
    pub_key: &RsaPublicKey,
    msg: &[u8],
    label: Option<&[u8]>,
) -> Result<Vec<u8>>
where
    R: CryptoRngCore + ?Sized,
    D: Digest + FixedOutputReset,
{
    check_public(pub_key)?;

    let k = pub_key.size();
    let em = oaep_encrypt::<_, D>(rng, msg, label.unwrap_or_default(), k)?;
    pub_key.raw_encryption_primitive(&em, k)
}

/// Decrypts an OAEP ciphertext, blinding the private operation with the
/// thread-local generator.
///
/// The label must match the one given at encryption. Any failure, including
/// a ciphertext of the wrong length, surfaces as an undifferentiated `None`.
pub fn decrypt<D>(
    priv_key: &RsaPrivateKey,
    ciphertext: &[u8],
    label: Option<&[u8]>,
) -> Option<Vec<u8>>
where
    D: Digest + FixedOutputReset,
{
    decrypt_blinded::<D>(priv_key, Blinding::Default, ciphertext, label)
}

/// Same as [`decrypt`], with an explicit blinding mode.
pub fn decrypt_blinded<D>(
    priv_key: &RsaPrivateKey,
    blinding: Blinding<'_>,
    ciphertext: &[u8],
    label: Option<&[u8]>,
) -> Option<Vec<u8>>
where
    D: Digest + FixedOutputReset,
{
    let k = priv_key.size();
    if ciphertext.len() != k || k < 2 * <D as Digest>::output_size() + 2 {
        return None;
    }

    let mut em = Zeroizing::new(
        priv_key
            .raw_decryption_primitive(blinding, ciphertext, k)
            .ok()?,
    );
    oaep_decrypt::<D>(&mut em, label.unwrap_or_default(), k)
}
