//! Affine point arithmetic, key generation and raw ECDSA
//!
//! Everything works on arbitrary prime-field curves given as
//! [`EcDomainParameters`], so none of the routines is constant time. They
//! serve protocol steps on public data (verification, Chip Authentication
//! key agreement) and the software HSM backend.

use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};
use tracing::trace;

use super::keys::{EcPrivateKey, EcPublicKey};
use super::params::EcDomainParameters;
use super::point::{to_fixed_length, EcPoint};
use super::signature::EcdsaSignature;
use crate::error::{Error, Result};
use crate::hash::DigestAlgorithm;

/// `(a - b) mod m` for reduced or unreduced non-negative operands
fn sub_mod(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    let a = a % m;
    let b = b % m;
    if a >= b {
        a - b
    } else {
        m - (b - a)
    }
}

/// Multiplicative inverse modulo `m`
fn inv_mod(value: &BigUint, m: &BigUint) -> Result<BigUint> {
    value.modinv(m).ok_or(Error::Processing {
        operation: "modular inversion",
        details: "value not invertible",
    })
}

/// Coordinates reduced modulo `prime`, or `None` for infinity
fn reduced(point: &EcPoint, prime: &BigUint) -> Option<(BigUint, BigUint)> {
    match point {
        EcPoint::Infinity => None,
        EcPoint::Affine { x, y } => Some((x % prime, y % prime)),
    }
}

/// Point doubling `2P`
///
/// Doubling infinity or a point with `y = 0` gives infinity.
pub fn double_ec_point(point: &EcPoint, a: &BigUint, prime: &BigUint) -> Result<EcPoint> {
    let (x, y) = match reduced(point, prime) {
        None => return Ok(EcPoint::Infinity),
        Some(coords) => coords,
    };
    if y.is_zero() {
        return Ok(EcPoint::Infinity);
    }

    // λ = (3x² + a) / 2y
    let numerator = (BigUint::from(3u8) * &x * &x + a) % prime;
    let denominator = inv_mod(&((&y << 1u32) % prime), prime)?;
    let lambda = numerator * denominator % prime;

    // x₃ = λ² - 2x, y₃ = λ(x - x₃) - y
    let x3 = sub_mod(&(&lambda * &lambda), &(&x << 1u32), prime);
    let y3 = sub_mod(&(&lambda * sub_mod(&x, &x3, prime)), &y, prime);
    Ok(EcPoint::new(x3, y3))
}

/// Point addition `P + Q`
///
/// Infinity is the identity on either side, `P + P` doubles and `P + (-P)`
/// gives infinity.
pub fn add_ec_points(
    p: &EcPoint,
    q: &EcPoint,
    a: &BigUint,
    prime: &BigUint,
) -> Result<EcPoint> {
    let (x1, y1) = match reduced(p, prime) {
        None => return Ok(q.clone()),
        Some(coords) => coords,
    };
    let (x2, y2) = match reduced(q, prime) {
        None => return Ok(p.clone()),
        Some(coords) => coords,
    };

    if x1 == x2 {
        if y1 == y2 {
            return double_ec_point(p, a, prime);
        }
        // y₂ = -y₁
        return Ok(EcPoint::Infinity);
    }

    // λ = (y₂ - y₁) / (x₂ - x₁)
    let lambda = sub_mod(&y2, &y1, prime) * inv_mod(&sub_mod(&x2, &x1, prime), prime)? % prime;
    let x3 = sub_mod(&sub_mod(&(&lambda * &lambda), &x1, prime), &x2, prime);
    let y3 = sub_mod(&(&lambda * sub_mod(&x1, &x3, prime)), &y1, prime);
    Ok(EcPoint::new(x3, y3))
}

/// Point negation `-P`
pub fn negate_ec_point(point: &EcPoint, prime: &BigUint) -> EcPoint {
    match reduced(point, prime) {
        None => EcPoint::Infinity,
        Some((x, y)) => EcPoint::new(x, sub_mod(&BigUint::zero(), &y, prime)),
    }
}

/// Scalar multiplication `k·P`, double-and-add from the most significant bit
///
/// `k` must be positive; `k = 1` returns `P` unchanged.
pub fn multiply_ec_point(
    point: &EcPoint,
    scalar: &BigUint,
    a: &BigUint,
    prime: &BigUint,
) -> Result<EcPoint> {
    if scalar.is_zero() {
        return Err(Error::param("scalar", "must be positive"));
    }
    if scalar.is_one() {
        return Ok(point.clone());
    }

    let mut result = point.clone();
    for i in (0..scalar.bits() - 1).rev() {
        result = double_ec_point(&result, a, prime)?;
        if scalar.bit(i) {
            result = add_ec_points(&result, point, a, prime)?;
        }
    }
    Ok(result)
}

/// `k·P` where a zero scalar yields infinity instead of an error
fn multiply_or_infinity(
    point: &EcPoint,
    scalar: &BigUint,
    params: &EcDomainParameters,
) -> Result<EcPoint> {
    if scalar.is_zero() {
        return Ok(EcPoint::Infinity);
    }
    multiply_ec_point(point, scalar, params.a(), params.prime())
}

/// Whether `point` is a finite point on the curve of `params`
pub fn is_point_on_curve(point: &EcPoint, params: &EcDomainParameters) -> bool {
    params.contains(point)
}

/// Draw `d` uniformly from `[1, n - 1]` by rejection sampling
fn random_scalar<R: CryptoRng + RngCore>(order: &BigUint, rng: &mut R) -> BigUint {
    let bits = order.bits();
    loop {
        let candidate = rng.gen_biguint(bits);
        if !candidate.is_zero() && candidate < *order {
            return candidate;
        }
    }
}

/// Fresh key pair `(Q, d)` with `Q = d·G`
pub fn generate_key_pair<R: CryptoRng + RngCore>(
    params: &EcDomainParameters,
    rng: &mut R,
) -> Result<(EcPublicKey, EcPrivateKey)> {
    let d = random_scalar(params.order(), rng);
    let q = multiply_ec_point(params.generator(), &d, params.a(), params.prime())?;
    let private = EcPrivateKey::new(&d, params.clone())?;
    let public = EcPublicKey::new(q, params.clone())?;
    Ok((public, private))
}

/// ECDH shared point `d·W`
pub fn calc_shared_secret(private: &EcPrivateKey, public: &EcPublicKey) -> Result<EcPoint> {
    if private.params() != public.params() {
        return Err(Error::param(
            "key agreement",
            "keys belong to different domain parameters",
        ));
    }
    let params = public.params();
    multiply_ec_point(public.point(), &private.scalar(), params.a(), params.prime())
}

/// Leftmost `bitlen(n)` bits of the hash as an integer (FIPS 186-4, 6.4)
fn hash_to_integer(hash: &[u8], order: &BigUint) -> BigUint {
    let e = BigUint::from_bytes_be(hash);
    let hash_bits = 8 * hash.len() as u64;
    let order_bits = order.bits();
    if hash_bits > order_bits {
        e >> (hash_bits - order_bits)
    } else {
        e
    }
}

/// Sign `message` with ECDSA, returning the plain `r || s` form
///
/// Each half is [`EcDomainParameters::signature_component_len`] bytes.
///
/// Algorithm:
/// 1. e = leftmost bits of HASH(m)
/// 2. k random in [1, n-1], (x₁, y₁) = k·G
/// 3. r = x₁ mod n; retry when r = 0
/// 4. s = k⁻¹(e + r·d) mod n; retry when s = 0
pub fn sign_raw<R: CryptoRng + RngCore>(
    private: &EcPrivateKey,
    message: &[u8],
    digest: DigestAlgorithm,
    rng: &mut R,
) -> Result<Vec<u8>> {
    let params = private.params();
    let n = params.order();
    let e = hash_to_integer(&digest.digest(message), n);
    let d = private.scalar();

    loop {
        let k = random_scalar(n, rng);
        let kg = multiply_ec_point(params.generator(), &k, params.a(), params.prime())?;
        let r = match kg.x() {
            Some(x) => x % n,
            None => continue,
        };
        if r.is_zero() {
            continue;
        }
        let s = inv_mod(&k, n)? * ((&e + &r * &d) % n) % n;
        if s.is_zero() {
            continue;
        }
        return EcdsaSignature::new(r, s).to_raw(params.signature_component_len());
    }
}

/// Verify a plain `r || s` ECDSA signature
///
/// Malformed signatures, unknown digests and degenerate intermediate
/// results all yield `false`.
pub fn verify_signature(
    signature: &[u8],
    message: &[u8],
    public_key: &EcPublicKey,
    digest_name: &str,
) -> bool {
    let digest = match DigestAlgorithm::from_name(digest_name) {
        Ok(d) => d,
        Err(_) => {
            trace!(digest = digest_name, "unknown digest, signature rejected");
            return false;
        }
    };
    let sig = match EcdsaSignature::from_raw(signature) {
        Ok(sig) => sig,
        Err(_) => return false,
    };
    verify_components(&sig, message, public_key, digest).unwrap_or(false)
}

fn verify_components(
    sig: &EcdsaSignature,
    message: &[u8],
    public_key: &EcPublicKey,
    digest: DigestAlgorithm,
) -> Result<bool> {
    let params = public_key.params();
    let n = params.order();
    let (r, s) = (sig.r(), sig.s());
    if r.is_zero() || r >= n || s.is_zero() || s >= n {
        return Ok(false);
    }

    let e = hash_to_integer(&digest.digest(message), n);
    let w = inv_mod(s, n)?;
    let u1 = &e * &w % n;
    let u2 = r * &w % n;

    let p1 = multiply_or_infinity(params.generator(), &u1, params)?;
    let p2 = multiply_or_infinity(public_key.point(), &u2, params)?;
    let q = add_ec_points(&p1, &p2, params.a(), params.prime())?;

    Ok(match q.x() {
        Some(x) => x % n == *r,
        None => false,
    })
}

/// Big-endian `x` coordinate of a shared point at field width
pub fn shared_secret_bytes(point: &EcPoint, params: &EcDomainParameters) -> Result<Vec<u8>> {
    point
        .x()
        .map(|x| to_fixed_length(x, params.field_size_bytes()))
        .ok_or_else(|| Error::param("shared secret", "point at infinity"))
}

