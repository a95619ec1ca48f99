//! EMSA-PSS encoding and verification per [RFC8017 § 9.1].
//!
//! [RFC8017 § 9.1]: https://datatracker.ietf.org/doc/html/rfc8017#section-9.1

use digest::{Digest, FixedOutputReset};
use subtle::{Choice, ConstantTimeEq};

use super::mgf::mgf1_xor;
use crate::errors::{Error, Result};

pub(crate) fn emsa_pss_encode<D>(m_hash: &[u8], em_bits: usize, salt: &[u8]) -> Result<Vec<u8>>
where
    D: Digest + FixedOutputReset,
{
    // See [1], section 9.1.1
    let h_len = <D as Digest>::output_size();
    let s_len = salt.len();
    let em_len = em_bits.div_ceil(8);

    // 2.  Let mHash = Hash(M), an octet string of length hLen.
    if m_hash.len() != h_len {
        return Err(Error::InvalidMessage);
    }

    // 3.  If emLen < hLen + sLen + 2, output "encoding error" and stop.
    if em_len < h_len + s_len + 2 {
        return Err(Error::InvalidMessage);
    }

    let mut em = vec![0; em_len];

    let (db, h) = em.split_at_mut(em_len - h_len - 1);
    let h = &mut h[..h_len];

    // 5.  Let
    //       M' = (0x)00 00 00 00 00 00 00 00 || mHash || salt;
    //
    //     M' is an octet string of length 8 + hLen + sLen with eight
    //     initial zero octets.
    //
    // 6.  Let H = Hash(M'), an octet string of length hLen.
    let prefix = [0u8; 8];

    let mut hash = D::new();
    Digest::update(&mut hash, prefix);
    Digest::update(&mut hash, m_hash);
    Digest::update(&mut hash, salt);
    let hashed = hash.finalize_reset();
    h.copy_from_slice(&hashed);

    // 7.  Generate an octet string PS consisting of emLen - sLen - hLen - 2
    //     zero octets. The length of PS may be 0.
    //
    // 8.  Let DB = PS || 0x01 || salt; DB is an octet string of length
    //     emLen - hLen - 1.
    db[em_len - s_len - h_len - 2] = 0x01;
    db[em_len - s_len - h_len - 1..].copy_from_slice(salt);

    // 9.  Let dbMask = MGF(H, emLen - hLen - 1).
    //
    // 10. Let maskedDB = DB \xor dbMask.
    mgf1_xor(db, &mut hash, &*h);

    // 11. Set the leftmost 8 * emLen - emBits bits of the leftmost octet in
    //     maskedDB to zero.
    db[0] &= 0xff >> (8 * em_len - em_bits);

    // 12. Let EM = maskedDB || H || 0xbc.
    em[em_len - 1] = 0xbc;

    Ok(em)
}

pub(crate) fn emsa_pss_verify<D>(m_hash: &[u8], em: &mut [u8], em_bits: usize, s_len: usize) -> bool
where
    D: Digest + FixedOutputReset,
{
    // See [1], section 9.1.2
    let h_len = <D as Digest>::output_size();
    let em_len = em_bits.div_ceil(8);

    // 3.  If emLen < hLen + sLen + 2, output "inconsistent" and stop.
    if em.len() != em_len || m_hash.len() != h_len || em_len < h_len + s_len + 2 {
        return false;
    }

    // 4.  The rightmost octet of EM must have hexadecimal value 0xbc.
    let trailer_is_bc = em[em_len - 1].ct_eq(&0xbc);

    // 5.  Let maskedDB be the leftmost emLen - hLen - 1 octets of EM, and
    //     let H be the next hLen octets.
    let (db, rest) = em.split_at_mut(em_len - h_len - 1);
    let h = &mut rest[..h_len];

    // 6.  The leftmost 8 * emLen - emBits bits of the leftmost octet in
    //     maskedDB must all equal zero.
    let top_bits_are_zero = (db[0] & !(0xffu8 >> (8 * em_len - em_bits))).ct_eq(&0u8);

    // 7.  Let dbMask = MGF(H, emLen - hLen - 1).
    //
    // 8.  Let DB = maskedDB \xor dbMask.
    let mut hash = D::new();
    mgf1_xor(db, &mut hash, &*h);

    // 9.  Set the leftmost 8 * emLen - emBits bits of the leftmost octet in
    //     DB to zero.
    db[0] &= 0xff >> (8 * em_len - em_bits);

    // 10. The emLen - hLen - sLen - 2 leftmost octets of DB must be zero,
    //     and the octet right after them must be 0x01.
    let (zeroes, rest) = db.split_at(em_len - h_len - s_len - 2);
    let mut salt_is_valid: Choice = zeroes
        .iter()
        .fold(Choice::from(1u8), |a, e| a & e.ct_eq(&0x00));
    salt_is_valid &= rest[0].ct_eq(&0x01);

    // 11. Let salt be the last sLen octets of DB.
    let salt = &db[db.len() - s_len..];

    // 12. Let
    //       M' = (0x)00 00 00 00 00 00 00 00 || mHash || salt;
    //
    // 13. Let H' = Hash(M'), an octet string of length hLen.
    let prefix = [0u8; 8];
    Digest::update(&mut hash, prefix);
    Digest::update(&mut hash, m_hash);
    Digest::update(&mut hash, salt);
    let h0 = hash.finalize_reset();

    // 14. The structural checks and H = H' must all hold together; a single
    //     verdict keeps the failure cause opaque.
    (trailer_is_bc & top_bits_are_zero & salt_is_valid & h0.ct_eq(h)).into()
}
