//! Generic RSA implementation

use std::borrow::Cow;

use num_bigint::{BigUint, IntoBigUint, ModInverse, RandBigInt};
use num_traits::Zero;
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use crate::errors::{Error, Result};
use crate::key::RsaPrivateKey;
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// Raw RSA encryption of m with the public key. No padding is performed.
#[inline]
pub(crate) fn encrypt<K: PublicKeyParts>(key: &K, m: &BigUint) -> Result<BigUint> {
    check_range(m, key.n())?;
    Ok(m.modpow(key.e(), key.n()))
}

/// Performs raw RSA decryption with no padding, resulting in a plaintext
/// `BigUint`. Performs RSA blinding if an `Rng` is passed.
#[inline]
pub(crate) fn decrypt<R: CryptoRngCore + ?Sized>(
    mut rng: Option<&mut R>,
    priv_key: &RsaPrivateKey,
    c: &BigUint,
) -> Result<BigUint> {
    check_range(c, priv_key.n())?;

    let mut ir = None;

    let c = if let Some(ref mut rng) = rng {
        let (blinded, unblinder) = blind(rng, priv_key, c);
        ir = Some(unblinder);
        Cow::Owned(blinded)
    } else {
        Cow::Borrowed(c)
    };

    // m1 = c^dp mod p, m2 = c^dq mod q
    let mut m1 = c.modpow(priv_key.dp(), priv_key.p());
    let mut m2 = c.modpow(priv_key.dq(), priv_key.q());

    // h = qinv (m1 - m2) mod p. Adding p before the subtraction keeps the
    // difference non-negative; m2 < q < p.
    let mut h = ((priv_key.p() + &m1) - &m2) % priv_key.p();
    h = (&h * priv_key.qinv()) % priv_key.p();

    // m = m2 + h q
    let m = &m2 + &h * priv_key.q();

    m1.zeroize();
    m2.zeroize();
    h.zeroize();

    match ir {
        Some(ref ir) => {
            // unblind
            Ok(unblind(priv_key, &m, ir))
        }
        None => Ok(m),
    }
}

/// Performs RSA decryption, resulting in a plaintext `BigUint`.
/// Performs RSA blinding if an `Rng` is passed.
/// This will also check for errors in the CRT computation.
#[inline]
pub(crate) fn decrypt_and_check<R: CryptoRngCore + ?Sized>(
    rng: Option<&mut R>,
    priv_key: &RsaPrivateKey,
    c: &BigUint,
) -> Result<BigUint> {
    let m = decrypt(rng, priv_key, c)?;

    // In order to defend against errors in the CRT computation, m^e is
    // calculated, which should match the original ciphertext.
    let check = encrypt(priv_key, &m)?;

    if c != &check {
        return Err(Error::Internal);
    }

    Ok(m)
}

/// Returns the blinded c, along with the unblinding factor.
fn blind<R: CryptoRngCore + ?Sized, K: PublicKeyParts>(
    rng: &mut R,
    key: &K,
    c: &BigUint,
) -> (BigUint, BigUint) {
    // Blinding involves multiplying c by r^e.
    // Then the decryption operation performs (m^e * r^e)^d mod n
    // which equals mr mod n. The factor of r can then be removed
    // by multiplying by the multiplicative inverse of r.

    let two = BigUint::from(2u64);
    let mut r: BigUint;
    let unblinder;
    loop {
        // r is drawn from [2, n); the inversion fails only for the
        // negligible fraction of candidates sharing a factor with n.
        r = rng.gen_biguint_range(&two, key.n());
        if let Some(ir) = r.clone().mod_inverse(key.n()) {
            if let Some(ub) = ir.into_biguint() {
                unblinder = ub;
                break;
            }
        }
    }

    let blinded = {
        // r^e (mod n)
        let mut rpowe = r.modpow(key.e(), key.n());
        // c * r^e (mod n)
        let mut blinded = c * &rpowe;
        blinded %= key.n();

        rpowe.zeroize();

        blinded
    };
    r.zeroize();

    (blinded, unblinder)
}

/// Given an m and an unblinding factor, unblind the m.
fn unblind(key: &impl PublicKeyParts, m: &BigUint, unblinder: &BigUint) -> BigUint {
    // m * r^-1 (mod n)
    (m * unblinder) % key.n()
}

#[inline]
fn check_range(m: &BigUint, n: &BigUint) -> Result<()> {
    if m.is_zero() || m >= n {
        return Err(Error::InvalidMessage);
    }

    Ok(())
}
