//! Support for the [Probabilistic Signature Scheme] (PSS) a.k.a. RSASSA-PSS.
//!
//! Designed by Mihir Bellare and Phillip Rogaway. Specified in [RFC8017 § 8.1].
//!
//! [Probabilistic Signature Scheme]: https://en.wikipedia.org/wiki/Probabilistic_signature_scheme
//! [RFC8017 § 8.1]: https://datatracker.ietf.org/doc/html/rfc8017#section-8.1

use digest::{Digest, FixedOutputReset};
use rand_core::CryptoRngCore;

use crate::algorithms::pss::{emsa_pss_encode, emsa_pss_verify};
use crate::errors::Result;
use crate::key::{RsaPrivateKey, RsaPublicKey};
use crate::raw::{Blinding, DecryptionPrimitive, EncryptionPrimitive};
use crate::traits::PublicKeyParts;

/// Signs the message with RSASSA-PSS.
///
/// The message is hashed with `D`, which also drives MGF1. The salt length
/// defaults to the digest size. Signatures span the encoded block of
/// `bits - 1` bits and so occupy `(bits - 1).div_ceil(8)` bytes, which can be
/// one byte fewer than [`PublicKeyParts::size`].
pub fn sign<R, D>(
    rng: &mut R,
    priv_key: &RsaPrivateKey,
    msg: &[u8],
    salt_len: Option<usize>,
) -> Result<Vec<u8>>
where
    R: CryptoRngCore + ?Sized,
    D: Digest + FixedOutputReset,
{
    let s_len = salt_len.unwrap_or_else(|| <D as Digest>::output_size());
    let em_bits = priv_key.bits() - 1;
    let em_len = em_bits.div_ceil(8);

    let mut salt = vec![0u8; s_len];
    rng.fill_bytes(&mut salt);

    let m_hash = D::digest(msg);
    let em = emsa_pss_encode::<D>(&m_hash, em_bits, &salt)?;

    // The operand of the private exponentiation is the encoded block, which
    // is public, so it runs unmasked.
    priv_key.raw_decryption_primitive(Blinding::Off, &em, em_len)
}

/// Verifies an RSASSA-PSS signature over `msg`.
///
/// The salt length must match the one used when signing; it defaults to the
/// digest size.
pub fn verify<D>(pub_key: &RsaPublicKey, msg: &[u8], sig: &[u8], salt_len: Option<usize>) -> bool
where
    D: Digest + FixedOutputReset,
{
    let s_len = salt_len.unwrap_or_else(|| <D as Digest>::output_size());
    let bits = pub_key.bits();
    if bits < 2 {
        return false;
    }

    let em_bits = bits - 1;
    let em_len = em_bits.div_ceil(8);
    if sig.len() != em_len {
        return false;
    }

    let mut em = match pub_key.raw_encryption_primitive(sig, em_len) {
        Ok(em) => em,
        Err(_) => return false,
    };

    let m_hash = D::digest(msg);
    emsa_pss_verify::<D>(&m_hash, &mut em, em_bits, s_len)
}
