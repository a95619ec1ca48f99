//! Generate prime components for the RSA private key.

use num_bigint::prime::probably_prime;
use num_bigint::{BigUint, RandPrime};
use num_integer::Integer;
use num_traits::One;
use rand_core::CryptoRngCore;

use crate::errors::{Error, Result};

/// Miller-Rabin rounds used to screen a caller-supplied public exponent,
/// giving an error bound of 4^-64 on top of the Baillie-PSW pass.
const EXP_PRIME_ROUNDS: usize = 64;

/// Samples the two prime factors of a fresh RSA key of `bit_size` bits,
/// compatible with the public exponent `exp`.
///
/// Each factor has its top two bits set, so the product has exactly the
/// requested width. A draw is rejected and retried when the factors
/// coincide or when `exp` divides either `factor - 1`.
pub(crate) fn generate_two_primes<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    bit_size: usize,
    exp: &BigUint,
) -> Result<(BigUint, BigUint)> {
    if bit_size < 10 {
        return Err(Error::InvalidArguments);
    }

    if exp < &BigUint::from(3u64)
        || exp.bits() >= bit_size
        || !probably_prime(exp, EXP_PRIME_ROUNDS)
    {
        return Err(Error::InvalidArguments);
    }

    loop {
        let p = rng.gen_prime(bit_size / 2);
        let q = rng.gen_prime(bit_size - bit_size / 2);

        if p == q {
            continue;
        }

        if !(&p - BigUint::one()).gcd(exp).is_one() {
            continue;
        }
        if !(&q - BigUint::one()).gcd(exp).is_one() {
            continue;
        }

        if (&p * &q).bits() != bit_size {
            continue;
        }

        return Ok((p, q));
    }
}
