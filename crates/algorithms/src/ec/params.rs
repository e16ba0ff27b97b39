//! Elliptic-curve domain parameters over prime fields

use eidcrypt_params::traditional::curves::StandardCurve;
use eidcrypt_params::traditional::oids;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

use super::point::{to_fixed_length, EcPoint};
use crate::asn1::{Oid, Tlv};
use crate::error::{validate, Error, Result};

/// Version of the explicit `ECParameters` structure
const EC_PARAMETERS_VERSION: u64 = 1;

/// `(p, a, b, G, n, h)` of a short Weierstrass curve `y² = x³ + ax + b`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcDomainParameters {
    prime: BigUint,
    a: BigUint,
    b: BigUint,
    generator: EcPoint,
    order: BigUint,
    cofactor: BigUint,
}

impl EcDomainParameters {
    /// Validate and assemble domain parameters
    ///
    /// The prime must be odd and greater than 3, both coefficients must be
    /// field elements, the generator must be a finite point on the curve,
    /// the order must exceed 1 and the cofactor must be at least 1.
    pub fn new(
        prime: BigUint,
        a: BigUint,
        b: BigUint,
        generator: EcPoint,
        order: BigUint,
        cofactor: BigUint,
    ) -> Result<Self> {
        validate::parameter(
            prime > BigUint::from(3u8) && prime.is_odd(),
            "prime modulus",
            "must be an odd prime greater than 3",
        )?;
        validate::parameter(a < prime, "first coefficient", "must be reduced modulo p")?;
        validate::parameter(b < prime, "second coefficient", "must be reduced modulo p")?;
        validate::parameter(order > BigUint::one(), "order", "must be greater than 1")?;
        validate::parameter(!cofactor.is_zero(), "cofactor", "must be at least 1")?;

        let params = Self {
            prime,
            a,
            b,
            generator,
            order,
            cofactor,
        };
        validate::parameter(
            params.contains(&params.generator),
            "generator",
            "not a finite point on the curve",
        )?;
        Ok(params)
    }

    /// Parameters of a standardized curve table entry
    pub fn from_standard_curve(curve: &StandardCurve) -> Result<Self> {
        let hex = |name: &'static str, value: &str| {
            BigUint::parse_bytes(value.as_bytes(), 16)
                .ok_or_else(|| Error::param(name, "malformed curve constant"))
        };
        Self::new(
            hex("p", curve.p)?,
            hex("a", curve.a)?,
            hex("b", curve.b)?,
            EcPoint::new(hex("gx", curve.gx)?, hex("gy", curve.gy)?),
            hex("n", curve.n)?,
            BigUint::from(curve.h),
        )
    }

    /// Prime modulus p
    pub fn prime(&self) -> &BigUint {
        &self.prime
    }

    /// Coefficient a
    pub fn a(&self) -> &BigUint {
        &self.a
    }

    /// Coefficient b
    pub fn b(&self) -> &BigUint {
        &self.b
    }

    /// Base point G
    pub fn generator(&self) -> &EcPoint {
        &self.generator
    }

    /// Order n of G
    pub fn order(&self) -> &BigUint {
        &self.order
    }

    /// Cofactor h
    pub fn cofactor(&self) -> &BigUint {
        &self.cofactor
    }

    /// Bit length of p
    pub fn field_size_bits(&self) -> usize {
        self.prime.bits() as usize
    }

    /// Bytes needed for one field element
    pub fn field_size_bytes(&self) -> usize {
        (self.field_size_bits() + 7) / 8
    }

    /// Bytes of one half of a plain `r || s` signature
    pub fn signature_component_len(&self) -> usize {
        let order_bytes = (self.order.bits() as usize + 7) / 8;
        order_bytes.max(self.field_size_bytes())
    }

    /// Whether `point` is a finite point satisfying the curve equation
    pub fn contains(&self, point: &EcPoint) -> bool {
        let (x, y) = match point {
            EcPoint::Infinity => return false,
            EcPoint::Affine { x, y } => (x, y),
        };
        if *x >= self.prime || *y >= self.prime {
            return false;
        }
        let p = &self.prime;
        let lhs = (y * y) % p;
        let rhs = (x * x * x + &self.a * x + &self.b) % p;
        lhs == rhs
    }

    /// Explicit `ECParameters` as used in SubjectPublicKeyInfo
    ///
    /// `SEQUENCE { version, fieldID, curve, base, order, cofactor }` with
    /// the coefficients and the base point padded to the field size.
    pub fn to_explicit_asn1(&self) -> Result<Tlv> {
        let fs = self.field_size_bytes();
        let prime_field = Oid::from_arcs(oids::PRIME_FIELD)?;
        Ok(Tlv::sequence(&[
            Tlv::small_integer(EC_PARAMETERS_VERSION),
            Tlv::sequence(&[Tlv::oid(&prime_field), Tlv::integer(&self.prime)]),
            Tlv::sequence(&[
                Tlv::octet_string(&to_fixed_length(&self.a, fs)),
                Tlv::octet_string(&to_fixed_length(&self.b, fs)),
            ]),
            Tlv::octet_string(&self.generator.to_uncompressed(fs)?),
            Tlv::integer(&self.order),
            Tlv::integer(&self.cofactor),
        ]))
    }
}
