//! PKCS#1 v1.5 padding as described in [RFC8017 § 8.2].
//!
//! [RFC8017 § 8.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-8.2

use rand_core::CryptoRngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroizing;

use crate::errors::{Error, Result};

/// Fills the provided slice with random values, which are guaranteed
/// to not be zero.
#[inline]
fn non_zero_random_bytes<R: CryptoRngCore + ?Sized>(rng: &mut R, data: &mut [u8]) {
    rng.fill_bytes(data);

    for el in data {
        if *el == 0u8 {
            while *el == 0u8 {
                rng.fill_bytes(core::slice::from_mut(el));
            }
        }
    }
}

/// Applies the padding scheme from PKCS#1 v1.5 for encryption. The message
/// must be no longer than the length of the public modulus minus 11 bytes.
pub(crate) fn pkcs1v15_encrypt_pad<R>(
    rng: &mut R,
    msg: &[u8],
    k: usize,
) -> Result<Zeroizing<Vec<u8>>>
where
    R: CryptoRngCore + ?Sized,
{
    if msg.len() + 11 > k {
        return Err(Error::InvalidMessage);
    }

    // EM = 0x00 || 0x02 || PS || 0x00 || M
    let mut em = Zeroizing::new(vec![0u8; k]);
    em[1] = 2;
    non_zero_random_bytes(rng, &mut em[2..k - msg.len() - 1]);
    em[k - msg.len() - 1] = 0;
    em[k - msg.len()..].copy_from_slice(msg);
    Ok(em)
}

/// Applies the padding scheme from PKCS#1 v1.5 for signing. The message
/// must be no longer than the length of the public modulus minus 11 bytes.
pub(crate) fn pkcs1v15_sign_pad(msg: &[u8], k: usize) -> Result<Vec<u8>> {
    if msg.len() + 11 > k {
        return Err(Error::InvalidMessage);
    }

    // EM = 0x00 || 0x01 || PS || 0x00 || M
    let mut em = vec![0xff; k];
    em[0] = 0;
    em[1] = 1;
    em[k - msg.len() - 1] = 0;
    em[k - msg.len()..].copy_from_slice(msg);

    Ok(em)
}

/// Removes the encryption padding scheme from PKCS#1 v1.5, returning the
/// message. The whole block is validated in one branch-free pass, and the
/// returned option does not disclose which structural check failed.
#[inline]
pub(crate) fn pkcs1v15_encrypt_unpad(em: &[u8], k: usize) -> Option<Vec<u8>> {
    if k < 11 || em.len() != k {
        return None;
    }

    let first_byte_is_zero = em[0].ct_eq(&0u8);
    let second_byte_is_two = em[1].ct_eq(&2u8);

    // The remainder of the plaintext must be a string of non-zero random
    // octets, followed by a 0, followed by the message.
    //   looking_for_index: 1 iff we are still looking for the zero.
    //   index: the offset of the first zero byte.
    let mut looking_for_index = Choice::from(1u8);
    let mut index = 0u32;

    for (i, el) in em.iter().enumerate().skip(2) {
        let equals0 = el.ct_eq(&0u8);
        index.conditional_assign(&(i as u32), looking_for_index & equals0);
        looking_for_index &= !equals0;
    }

    // The PS padding must be at least 8 bytes long, and it starts two
    // bytes into em.
    let valid_ps = Choice::from((((2i32 + 8i32 - index as i32 - 1i32) >> 31) & 1) as u8);
    let valid = first_byte_is_zero & second_byte_is_two & !looking_for_index & valid_ps;
    index = u32::conditional_select(&0, &(index + 1), valid);

    if valid.into() {
        Some(em[index as usize..].to_vec())
    } else {
        None
    }
}

/// Removes the signing padding scheme from PKCS#1 v1.5, recovering the
/// signed payload.
#[inline]
pub(crate) fn pkcs1v15_sign_unpad(em: &[u8], k: usize) -> Option<Vec<u8>> {
    if k < 11 || em.len() != k {
        return None;
    }

    let mut valid = em[0].ct_eq(&0u8) & em[1].ct_eq(&1u8);

    // The padding is a run of 0xff octets closed by a single zero, with the
    // payload after it. The first byte that is not 0xff ends the run and
    // must be that zero separator.
    //   looking_for_index: 1 iff the run of 0xff octets is still open.
    //   index: the offset of the byte that closed it.
    let mut looking_for_index = Choice::from(1u8);
    let mut separator_is_zero = Choice::from(0u8);
    let mut index = 0u32;

    for (i, el) in em.iter().enumerate().skip(2) {
        let is_ff = el.ct_eq(&0xff);
        let boundary = looking_for_index & !is_ff;
        index.conditional_assign(&(i as u32), boundary);
        separator_is_zero |= boundary & el.ct_eq(&0u8);
        looking_for_index &= is_ff;
    }

    valid &= !looking_for_index;
    valid &= separator_is_zero;
    // At least 8 padding octets before the separator.
    valid &= Choice::from((((2i32 + 8i32 - index as i32 - 1i32) >> 31) & 1) as u8);

    if valid.into() {
        Some(em[index as usize + 1..].to_vec())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

    #[test]
    fn test_non_zero_bytes() {
        for _ in 0..10 {
            let mut rng = ChaCha8Rng::from_seed([42; 32]);
            let mut b = vec![0u8; 512];
            non_zero_random_bytes(&mut rng, &mut b);
            for el in &b {
                assert_ne!(*el, 0u8);
            }
        }
    }

    #[test]
    fn test_encrypt_pad_tiny() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let k = 8;
        let message = vec![1u8; 4];
        let res = pkcs1v15_encrypt_pad(&mut rng, &message, k);
        assert_eq!(res.err(), Some(Error::InvalidMessage));
    }

    #[test]
    fn test_encrypt_pad_boundaries() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let k = 32;

        let em = pkcs1v15_encrypt_pad(&mut rng, &[0xaa; 21], k).unwrap();
        assert_eq!(em.len(), k);
        assert_eq!(&em[..2], &[0x00, 0x02]);
        assert_eq!(em[k - 22], 0x00);
        assert!(em[2..k - 22].iter().all(|&b| b != 0));

        assert_eq!(
            pkcs1v15_encrypt_pad(&mut rng, &[0xaa; 22], k).err(),
            Some(Error::InvalidMessage)
        );
    }

    #[test]
    fn test_sign_pad_fixed_output() {
        let em = pkcs1v15_sign_pad(b"ab", 16).unwrap();
        assert_eq!(em, hex!("0001 ffffffffffffffffffffff 00 6162"));

        assert_eq!(pkcs1v15_sign_pad(&[0u8; 6], 16), Err(Error::InvalidMessage));
    }

    #[test]
    fn test_sign_unpad_roundtrip() {
        let em = pkcs1v15_sign_pad(b"payload", 32).unwrap();
        assert_eq!(pkcs1v15_sign_unpad(&em, 32).as_deref(), Some(&b"payload"[..]));
    }

    #[test]
    fn test_sign_unpad_rejects_malformed() {
        // 7-octet padding run
        let em = hex!("0001 ffffffffffffff 00 6162636465");
        assert_eq!(pkcs1v15_sign_unpad(&em, em.len()), None);

        // wrong block type
        let mut em = pkcs1v15_sign_pad(b"payload", 32).unwrap();
        em[1] = 2;
        assert_eq!(pkcs1v15_sign_unpad(&em, 32), None);

        // separator is not zero
        let mut em = pkcs1v15_sign_pad(b"payload", 32).unwrap();
        em[32 - 8] = 0xfe;
        assert_eq!(pkcs1v15_sign_unpad(&em, 32), None);

        // run never terminates
        let mut em = vec![0xff; 32];
        em[0] = 0;
        em[1] = 1;
        assert_eq!(pkcs1v15_sign_unpad(&em, 32), None);
    }

    #[test]
    fn test_encrypt_unpad_roundtrip() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let em = pkcs1v15_encrypt_pad(&mut rng, b"payload", 32).unwrap();
        assert_eq!(
            pkcs1v15_encrypt_unpad(&em, 32).as_deref(),
            Some(&b"payload"[..])
        );
    }

    #[test]
    fn test_encrypt_unpad_rejects_malformed() {
        // 7-octet padding run
        let em = hex!("0002 02030405060708 00 6162636465");
        assert_eq!(pkcs1v15_encrypt_unpad(&em, em.len()), None);

        // leading byte is not zero
        let em = hex!("0102 0203040506070809 00 6162636465");
        assert_eq!(pkcs1v15_encrypt_unpad(&em, em.len()), None);

        // wrong block type
        let em = hex!("0001 0203040506070809 00 6162636465");
        assert_eq!(pkcs1v15_encrypt_unpad(&em, em.len()), None);

        // no separator
        let em = hex!("0002 0203040506070809 ff 6162636465");
        assert_eq!(pkcs1v15_encrypt_unpad(&em, em.len()), None);
    }
}
