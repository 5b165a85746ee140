//! Arithmetic in the prime field used for sharing.

use num_bigint_dig::{prime::probably_prime, BigUint, ModInverse, RandBigInt};
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};

use super::SharingError;

/// Integers modulo a prime `p`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeField {
    modulus: BigUint,
}

impl PrimeField {
    /// Smallest modulus accepted. Field points are small positive integers,
    /// so the modulus must leave room for every child of a threshold node.
    const MIN_MODULUS: u64 = 1 << 16;

    /// Miller-Rabin rounds on top of the Baillie-PSW test.
    const PRIMALITY_ROUNDS: usize = 10;

    pub fn new(modulus: BigUint) -> Result<Self, SharingError> {
        if modulus < BigUint::from(Self::MIN_MODULUS)
            || !probably_prime(&modulus, Self::PRIMALITY_ROUNDS)
        {
            return Err(SharingError::InvalidModulus);
        }
        Ok(Self { modulus })
    }

    /// Parse a decimal modulus.
    pub fn from_decimal(modulus: &str) -> Result<Self, SharingError> {
        let modulus = BigUint::parse_bytes(modulus.trim().as_bytes(), 10)
            .ok_or(SharingError::InvalidModulus)?;
        Self::new(modulus)
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Whether `value` is a canonical field element.
    pub fn contains(&self, value: &BigUint) -> bool {
        value < &self.modulus
    }

    /// Whether the points `1..=count` are distinct and non-zero in this field.
    pub fn supports_points(&self, count: usize) -> bool {
        BigUint::from(count) < self.modulus
    }

    pub fn random_element(&self, rng: &mut (impl CryptoRng + RngCore)) -> BigUint {
        rng.gen_biguint_below(&self.modulus)
    }

    /// Random polynomial of the given degree with constant term `constant`.
    /// Coefficients are in ascending order of degree.
    pub fn random_polynomial(
        &self,
        rng: &mut (impl CryptoRng + RngCore),
        constant: &BigUint,
        degree: usize,
    ) -> Vec<BigUint> {
        std::iter::once(constant.clone())
            .chain((0..degree).map(|_| self.random_element(rng)))
            .collect()
    }

    /// Evaluate a polynomial at `x` using Horner's rule.
    pub fn evaluate(&self, coefficients: &[BigUint], x: u64) -> BigUint {
        let x = BigUint::from(x);
        coefficients
            .iter()
            .rev()
            .fold(BigUint::zero(), |acc, coefficient| {
                (acc * &x + coefficient) % &self.modulus
            })
    }

    /// Recover the constant term of the unique polynomial of degree
    /// `points.len() - 1` through the given `(x, y)` points.
    ///
    /// Returns `None` unless the `x` values are distinct and non-zero modulo
    /// the modulus.
    pub fn interpolate_at_zero(&self, points: &[(u64, &BigUint)]) -> Option<BigUint> {
        let p = &self.modulus;
        let xs: Vec<BigUint> = points.iter().map(|(x, _)| BigUint::from(*x) % p).collect();
        points
            .iter()
            .enumerate()
            .try_fold(BigUint::zero(), |acc, (j, (_, y_j))| {
                // l_j(0) = prod_{m != j} x_m / (x_m - x_j)
                let (numerator, denominator) = xs
                    .iter()
                    .enumerate()
                    .filter(|(m, _)| *m != j)
                    .fold(
                        (BigUint::one(), BigUint::one()),
                        |(numerator, denominator), (_, x_m)| {
                            let difference = (x_m + p - &xs[j]) % p;
                            ((numerator * x_m) % p, (denominator * difference) % p)
                        },
                    );
                if numerator.is_zero() {
                    return None;
                }
                let inverse = denominator.mod_inverse(p)?.to_biguint()?;
                let basis = (numerator * inverse) % p;
                Some((acc + basis * *y_j) % p)
            })
    }
}
