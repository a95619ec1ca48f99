use num_bigint::{BigUint, IntoBigUint, ModInverse};
use num_integer::Integer;
use num_traits::One;
use rand_core::CryptoRngCore;
use zeroize::{Zeroize, Zeroizing};

use crate::algorithms::generate::generate_two_primes;
use crate::errors::{Error, Result};
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// Represents the public part of an RSA key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    n: BigUint,
    e: BigUint,
}

/// Represents a whole RSA key, public and private parts.
#[derive(Debug, Clone)]
pub struct RsaPrivateKey {
    /// Modulus
    n: BigUint,
    /// Public exponent
    e: BigUint,
    /// Private exponent
    d: BigUint,
    /// Larger prime factor of the modulus
    p: BigUint,
    /// Smaller prime factor of the modulus
    q: BigUint,
    /// Precomputed `d mod (p-1)`
    dp: BigUint,
    /// Precomputed `d mod (q-1)`
    dq: BigUint,
    /// Precomputed `q^-1 mod p`
    qinv: BigUint,
}

impl PartialEq for RsaPrivateKey {
    #[inline]
    fn eq(&self, other: &RsaPrivateKey) -> bool {
        self.n == other.n
            && self.e == other.e
            && self.d == other.d
            && self.p == other.p
            && self.q == other.q
    }
}

impl Eq for RsaPrivateKey {}

impl Zeroize for RsaPrivateKey {
    fn zeroize(&mut self) {
        self.d.zeroize();
        self.p.zeroize();
        self.q.zeroize();
        self.dp.zeroize();
        self.dq.zeroize();
        self.qinv.zeroize();
    }
}

impl Drop for RsaPrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl From<RsaPrivateKey> for RsaPublicKey {
    fn from(private_key: RsaPrivateKey) -> Self {
        (&private_key).into()
    }
}

impl From<&RsaPrivateKey> for RsaPublicKey {
    fn from(private_key: &RsaPrivateKey) -> Self {
        private_key.to_public_key()
    }
}

impl PublicKeyParts for RsaPublicKey {
    fn n(&self) -> &BigUint {
        &self.n
    }

    fn e(&self) -> &BigUint {
        &self.e
    }
}

impl RsaPublicKey {
    /// Create a new key from its components.
    pub fn new(n: BigUint, e: BigUint) -> Result<Self> {
        let k = RsaPublicKey { n, e };
        check_public(&k)?;

        Ok(k)
    }
}

impl PublicKeyParts for RsaPrivateKey {
    fn n(&self) -> &BigUint {
        &self.n
    }

    fn e(&self) -> &BigUint {
        &self.e
    }
}

impl PrivateKeyParts for RsaPrivateKey {
    fn d(&self) -> &BigUint {
        &self.d
    }

    fn p(&self) -> &BigUint {
        &self.p
    }

    fn q(&self) -> &BigUint {
        &self.q
    }

    fn dp(&self) -> &BigUint {
        &self.dp
    }

    fn dq(&self) -> &BigUint {
        &self.dq
    }

    fn qinv(&self) -> &BigUint {
        &self.qinv
    }
}

impl RsaPrivateKey {
    /// Generate a new RSA key pair of the given bit size using the passed in `rng`.
    ///
    /// The public exponent is 65537.
    pub fn new<R: CryptoRngCore + ?Sized>(rng: &mut R, bit_size: usize) -> Result<RsaPrivateKey> {
        Self::new_with_exp(rng, bit_size, &BigUint::from(65537u64))
    }

    /// Generate a new RSA key pair of the given bit size and public exponent.
    ///
    /// The exponent must be an odd prime narrower than `bit_size`, and
    /// `bit_size` must be at least 10 bits.
    pub fn new_with_exp<R: CryptoRngCore + ?Sized>(
        rng: &mut R,
        bit_size: usize,
        exp: &BigUint,
    ) -> Result<RsaPrivateKey> {
        let (p, q) = generate_two_primes(rng, bit_size, exp)?;
        Self::from_primes(exp.clone(), p, q)
    }

    /// Constructs an RSA key pair from a public exponent and two primes,
    /// deriving the private exponent and the CRT accelerators.
    ///
    /// The primes may be given in either order; the key stores the larger one
    /// first. Fails with [`Error::InvalidKey`] when the primes coincide, when
    /// `e < 3`, or when `e` is not invertible modulo `(p-1)(q-1)`.
    pub fn from_primes(e: BigUint, p: BigUint, q: BigUint) -> Result<RsaPrivateKey> {
        if e < BigUint::from(3u64) {
            return Err(Error::InvalidKey);
        }
        if p == q {
            return Err(Error::InvalidKey);
        }

        // qinv below is q^-1 mod p, which assumes p > q.
        let (p, q) = if p > q { (p, q) } else { (q, p) };

        let p1 = Zeroizing::new(&p - BigUint::one());
        let q1 = Zeroizing::new(&q - BigUint::one());
        if !p1.gcd(&e).is_one() || !q1.gcd(&e).is_one() {
            return Err(Error::InvalidKey);
        }

        let n = &p * &q;
        if e >= n {
            return Err(Error::InvalidKey);
        }

        let totient = Zeroizing::new(&*p1 * &*q1);
        let d = e
            .clone()
            .mod_inverse(&*totient)
            .and_then(IntoBigUint::into_biguint)
            .ok_or(Error::InvalidKey)?;

        let dp = &d % &*p1;
        let dq = &d % &*q1;
        let qinv = q
            .clone()
            .mod_inverse(&p)
            .and_then(IntoBigUint::into_biguint)
            .ok_or(Error::InvalidKey)?;

        Ok(RsaPrivateKey {
            n,
            e,
            d,
            p,
            q,
            dp,
            dq,
            qinv,
        })
    }

    /// Get the public key from the private key, cloning `n` and `e`.
    ///
    /// Generally this is not needed since `RsaPrivateKey` exposes the public
    /// components itself, but it can occasionally be useful to discard the
    /// private information entirely.
    pub fn to_public_key(&self) -> RsaPublicKey {
        RsaPublicKey {
            n: self.n.clone(),
            e: self.e.clone(),
        }
    }

    /// Performs basic sanity checks on the key.
    /// Returns `Ok(())` if everything is good, otherwise an appropriate error.
    pub fn validate(&self) -> Result<()> {
        check_public(self)?;

        // The factors must be ordered and multiply to n.
        if self.p <= self.q {
            return Err(Error::InvalidKey);
        }
        if &self.p * &self.q != self.n {
            return Err(Error::InvalidKey);
        }

        // Check that de ≡ 1 mod p-1 and de ≡ 1 mod q-1. This implies that e
        // has a multiplicative inverse modulo the totient, and that a^de ≡ a
        // mod n for all a coprime to n, as required.
        let de = Zeroizing::new(&self.e * &self.d);
        if !(&*de % (&self.p - BigUint::one())).is_one() {
            return Err(Error::InvalidKey);
        }
        if !(&*de % (&self.q - BigUint::one())).is_one() {
            return Err(Error::InvalidKey);
        }

        Ok(())
    }
}

/// Check that the public key is well formed: the exponent must be odd and
/// lie strictly between 1 and the modulus.
#[inline]
pub(crate) fn check_public(public_key: &impl PublicKeyParts) -> Result<()> {
    if public_key.e() <= &BigUint::one() || public_key.e() >= public_key.n() {
        return Err(Error::InvalidKey);
    }

    if public_key.e().is_even() {
        return Err(Error::InvalidKey);
    }

    Ok(())
}
