//! EC key value types
//!
//! Public keys encode to a SubjectPublicKeyInfo with explicit domain
//! parameters, the only form card terminals accept for arbitrary curves.
//! Private keys have no encoded form at all.

use core::fmt;

use eidcrypt_params::traditional::oids;
use num_bigint::BigUint;
use num_traits::Zero;
use zeroize::Zeroizing;

use super::params::EcDomainParameters;
use super::point::{point_from_bytes, to_fixed_length, EcPoint};
use super::util::parameters_from_explicit_asn1;
use crate::asn1::{tag, AlgorithmIdentifier, Oid, Tlv};
use crate::error::{validate, Error, Result};

/// Public point `W` with its domain parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcPublicKey {
    point: EcPoint,
    params: EcDomainParameters,
}

impl EcPublicKey {
    /// Key from a point that must lie on the curve
    pub fn new(point: EcPoint, params: EcDomainParameters) -> Result<Self> {
        validate::parameter(
            params.contains(&point),
            "public point",
            "not a finite point on the curve",
        )?;
        Ok(Self { point, params })
    }

    /// The public point W
    pub fn point(&self) -> &EcPoint {
        &self.point
    }

    /// Domain parameters
    pub fn params(&self) -> &EcDomainParameters {
        &self.params
    }

    /// `04 || Wx || Wy` at field width
    pub fn to_uncompressed(&self) -> Result<Vec<u8>> {
        self.point.to_uncompressed(self.params.field_size_bytes())
    }

    /// Key algorithm name
    pub fn algorithm(&self) -> &'static str {
        "EC"
    }

    /// DER SubjectPublicKeyInfo with explicit domain parameters
    pub fn encoded(&self) -> Result<Vec<u8>> {
        let algorithm = AlgorithmIdentifier::new(
            Oid::from_arcs(oids::EC_PUBLIC_KEY)?,
            Some(self.params.to_explicit_asn1()?),
        );
        Ok(Tlv::sequence(&[
            algorithm.to_tlv(),
            Tlv::bit_string(&self.to_uncompressed()?),
        ])
        .to_der())
    }

    /// Parse a SubjectPublicKeyInfo carrying explicit domain parameters
    pub fn from_spki(der: &[u8]) -> Result<Self> {
        let spki = Tlv::from_der(der)?;
        spki.expect_tag(tag::SEQUENCE, "SubjectPublicKeyInfo")?;
        let children = spki.children()?;
        let (alg, key) = match children.as_slice() {
            [alg, key] => (alg, key),
            _ => {
                return Err(Error::encoding(
                    "SubjectPublicKeyInfo",
                    "expected algorithm and key",
                ))
            }
        };
        let algorithm = AlgorithmIdentifier::from_tlv(alg)?;
        if !algorithm.algorithm().is(oids::EC_PUBLIC_KEY) {
            return Err(Error::param(
                "SubjectPublicKeyInfo",
                format!("not an EC key: {}", algorithm.algorithm()),
            ));
        }
        let params = match algorithm.parameters() {
            Some(p) => parameters_from_explicit_asn1(p)?,
            None => {
                return Err(Error::MissingDomainParameters {
                    context: "SubjectPublicKeyInfo",
                })
            }
        };
        let point = point_from_bytes(key.as_bit_string()?, params.field_size_bytes())?;
        Self::new(point, params)
    }
}

/// Private scalar `d` with its domain parameters
///
/// The scalar is held as zeroizing fixed-width bytes; the `BigUint`
/// temporaries created during arithmetic are not wiped.
#[derive(Clone, PartialEq, Eq)]
pub struct EcPrivateKey {
    scalar: Zeroizing<Vec<u8>>,
    params: EcDomainParameters,
}

impl EcPrivateKey {
    /// Key from a scalar in `[1, n - 1]`
    pub fn new(scalar: &BigUint, params: EcDomainParameters) -> Result<Self> {
        validate::parameter(
            !scalar.is_zero() && scalar < params.order(),
            "private scalar",
            "must lie in [1, n-1]",
        )?;
        let len = (params.order().bits() as usize + 7) / 8;
        Ok(Self {
            scalar: Zeroizing::new(to_fixed_length(scalar, len)),
            params,
        })
    }

    /// Key from big-endian scalar bytes
    pub fn from_bytes(bytes: &[u8], params: EcDomainParameters) -> Result<Self> {
        Self::new(&BigUint::from_bytes_be(bytes), params)
    }

    /// Domain parameters
    pub fn params(&self) -> &EcDomainParameters {
        &self.params
    }

    /// The scalar d
    pub fn scalar(&self) -> BigUint {
        BigUint::from_bytes_be(&self.scalar)
    }

    /// Raw big-endian scalar at order width, for key export between HSMs
    pub fn to_scalar_bytes(&self) -> Zeroizing<Vec<u8>> {
        self.scalar.clone()
    }

    /// Key algorithm name
    pub fn algorithm(&self) -> &'static str {
        "EC"
    }

    /// Private keys never leave in encoded form
    pub fn encoded(&self) -> Result<Vec<u8>> {
        Err(Error::not_supported("encoded form of EC private keys"))
    }
}

impl fmt::Debug for EcPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcPrivateKey")
            .field("field_size_bits", &self.params.field_size_bits())
            .finish_non_exhaustive()
    }
}
