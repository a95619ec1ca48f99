//! PKCS#1 v1.5 support as described in [RFC8017 § 8.2].
//!
//! The signing direction here carries the message itself: [`sign`] embeds it
//! in a deterministic type-01 block and [`verify`] recovers it from the
//! signature.
//!
//! [RFC8017 § 8.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-8.2

use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::algorithms::pkcs1v15::{
    pkcs1v15_encrypt_pad, pkcs1v15_encrypt_unpad, pkcs1v15_sign_pad, pkcs1v15_sign_unpad,
};
use crate::errors::Result;
use crate::key::{check_public, RsaPrivateKey, RsaPublicKey};
use crate::raw::{Blinding, DecryptionPrimitive, EncryptionPrimitive};
use crate::traits::PublicKeyParts;

/// Encrypts the given message with RSA and the padding scheme from PKCS#1 v1.5.
///
/// The message must be no longer than the length of the public modulus minus
/// 11 bytes.
pub fn encrypt<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    pub_key: &RsaPublicKey,
    msg: &[u8],
) -> Result<Vec<u8>> {
    check_public(pub_key)?;

    let k = pub_key.size();
    let em = pkcs1v15_encrypt_pad(rng, msg, k)?;
    pub_key.raw_encryption_primitive(&em, k)
}

/// Decrypts a PKCS#1 v1.5 ciphertext, blinding the private operation with
/// the thread-local generator.
///
/// Any failure, including a ciphertext of the wrong length, surfaces as an
/// undifferentiated `None`.
pub fn decrypt(priv_key: &RsaPrivateKey, ciphertext: &[u8]) -> Option<Vec<u8>> {
    decrypt_blinded(priv_key, Blinding::Default, ciphertext)
}

/// Same as [`decrypt`], with an explicit blinding mode.
pub fn decrypt_blinded(
    priv_key: &RsaPrivateKey,
    blinding: Blinding<'_>,
    ciphertext: &[u8],
) -> Option<Vec<u8>> {
    let k = priv_key.size();
    if ciphertext.len() != k {
        return None;
    }

    let em = Zeroizing::new(
        priv_key
            .raw_decryption_primitive(blinding, ciphertext, k)
            .ok()?,
    );
    pkcs1v15_encrypt_unpad(&em, k)
}

/// Signs the message by embedding it in a deterministic type-01 block and
/// applying the private-key operation, with default blinding.
///
/// The message must be no longer than the length of the public modulus minus
/// 11 bytes.
pub fn sign(priv_key: &RsaPrivateKey, msg: &[u8]) -> Result<Vec<u8>> {
    sign_blinded(priv_key, Blinding::Default, msg)
}

/// Same as [`sign`], with an explicit blinding mode.
pub fn sign_blinded(
    priv_key: &RsaPrivateKey,
    blinding: Blinding<'_>,
    msg: &[u8],
) -> Result<Vec<u8>> {
    let k = priv_key.size();
    let em = pkcs1v15_sign_pad(msg, k)?;
    priv_key.raw_decryption_primitive(blinding, &em, k)
}

/// Verifies a PKCS#1 v1.5 signature, recovering the signed payload.
pub fn verify(pub_key: &RsaPublicKey, sig: &[u8]) -> Option<Vec<u8>> {
    let k = pub_key.size();
    if sig.len() != k {
        return None;
    }

    let em = pub_key.raw_encryption_primitive(sig, k).ok()?;
    pkcs1v15_sign_unpad(&em, k)
}
