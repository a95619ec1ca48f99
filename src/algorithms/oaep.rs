//! Encryption and decryption using [OAEP padding].
//!
//! [OAEP padding]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.1

use digest::{Digest, FixedOutputReset};
use rand_core::CryptoRngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroizing;

use super::mgf::mgf1_xor;
use crate::errors::{Error, Result};

// 2**61 - 1, the input limit of the SHA family (pow is not const yet)
const MAX_LABEL_LEN: u64 = 2_305_843_009_213_693_951;

/// Applies EME-OAEP encoding to the given message.
///
/// The message must be no longer than the length of the public modulus minus
/// `2 + (2 * hash.size())`.
#[inline]
pub(crate) fn oaep_encrypt<R, D>(
    rng: &mut R,
    msg: &[u8],
    label: &[u8],
    k: usize,
) -> Result<Zeroizing<Vec<u8>>>
where
    R: CryptoRngCore + ?Sized,
    D: Digest + FixedOutputReset,
{
    let h_size = <D as Digest>::output_size();

    if label.len() as u64 > MAX_LABEL_LEN {
        return Err(Error::InvalidMessage);
    }
    if msg.len() + 2 * h_size + 2 > k {
        return Err(Error::InvalidMessage);
    }

    let p_hash = D::digest(label);

    let mut em = Zeroizing::new(vec![0u8; k]);

    let (_, payload) = em.split_at_mut(1);
    let (seed, db) = payload.split_at_mut(h_size);
    rng.fill_bytes(seed);

    // Data block DB = pHash || PS || 01 || M
    let db_len = k - h_size - 1;

    db[0..h_size].copy_from_slice(&p_hash);
    db[db_len - msg.len() - 1] = 1;
    db[db_len - msg.len()..].copy_from_slice(msg);

    let mut mgf_digest = D::new();
    mgf1_xor(db, &mut mgf_digest, seed);
    mgf1_xor(seed, &mut mgf_digest, db);

    Ok(em)
}

/// Removes the EME-OAEP encoding, recovering the message.
///
/// The label-hash comparison, the leading-byte check and the separator scan
/// are folded into a single verdict, so the returned option does not disclose
/// which of them failed.
#[inline]
pub(crate) fn oaep_decrypt<D>(em: &mut [u8], label: &[u8], k: usize) -> Option<Vec<u8>>
where
    D: Digest + FixedOutputReset,
{
    let h_size = <D as Digest>::output_size();

    if em.len() != k || k < 2 * h_size + 2 {
        return None;
    }
    if label.len() as u64 > MAX_LABEL_LEN {
        return None;
    }

    let expected_p_hash = D::digest(label);

    let first_byte_is_zero = em[0].ct_eq(&0u8);

    let (_, payload) = em.split_at_mut(1);
    let (seed, db) = payload.split_at_mut(h_size);

    let mut mgf_digest = D::new();
    mgf1_xor(seed, &mut mgf_digest, db);
    mgf1_xor(db, &mut mgf_digest, seed);

    let hash_is_equal = db[0..h_size].ct_eq(&expected_p_hash);

    // The unmasked data block past the label hash must be zero or more 0x00,
    // followed by 0x01, followed by the message.
    //   looking_for_index: 1 iff we are still looking for the 0x01.
    //   index: the offset of the first 0x01 byte.
    //   nonzero_before_one: 1 iff we saw a non-zero byte before the 1.
    let mut looking_for_index = Choice::from(1u8);
    let mut index = 0u32;
    let mut nonzero_before_one = Choice::from(0u8);

    for (i, el) in db.iter().skip(h_size).enumerate() {
        let equals0 = el.ct_eq(&0u8);
        let equals1 = el.ct_eq(&1u8);
        index.conditional_assign(&(i as u32), looking_for_index & equals1);
        looking_for_index &= !equals1;
        nonzero_before_one |= looking_for_index & !equals0;
    }

    let valid = first_byte_is_zero & hash_is_equal & !nonzero_before_one & !looking_for_index;

    if valid.into() {
        Some(db[h_size + index as usize + 1..].to_vec())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
    use sha2::Sha256;

    #[test]
    fn test_encode_decode_roundtrip() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let k = 128;

        for len in [0usize, 1, 17, 62] {
            let msg = vec![0x5a; len];
            let mut em = oaep_encrypt::<_, Sha256>(&mut rng, &msg, b"", k).unwrap();
            assert_eq!(em.len(), k);
            assert_eq!(em[0], 0);
            assert_eq!(oaep_decrypt::<Sha256>(&mut em, b"", k).as_deref(), Some(&msg[..]));
        }
    }

    #[test]
    fn test_message_limit() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let k = 128;

        // msgMax = k - 2 hLen - 2 = 62 for SHA-256
        assert!(oaep_encrypt::<_, Sha256>(&mut rng, &[0u8; 62], b"", k).is_ok());
        assert_eq!(
            oaep_encrypt::<_, Sha256>(&mut rng, &[0u8; 63], b"", k).err(),
            Some(Error::InvalidMessage)
        );
    }

    #[test]
    fn test_label_mismatch() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let k = 128;

        let mut em = oaep_encrypt::<_, Sha256>(&mut rng, b"secret", b"alpha", k).unwrap();
        assert_eq!(oaep_decrypt::<Sha256>(&mut em, b"beta", k), None);

        let mut em = oaep_encrypt::<_, Sha256>(&mut rng, b"secret", b"alpha", k).unwrap();
        assert_eq!(
            oaep_decrypt::<Sha256>(&mut em, b"alpha", k).as_deref(),
            Some(&b"secret"[..])
        );
    }

    #[test]
    fn test_tampered_block() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let k = 128;

        let mut em = oaep_encrypt::<_, Sha256>(&mut rng, b"secret", b"", k).unwrap();
        em[0] = 1;
        assert_eq!(oaep_decrypt::<Sha256>(&mut em, b"", k), None);
    }
}
