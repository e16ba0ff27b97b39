//! ECDSA signature value and its two wire formats
//!
//! X.509 and PKCS#11 providers use `SEQUENCE { r INTEGER, s INTEGER }`;
//! Terminal Authentication uses the plain concatenation `r || s` with both
//! halves at the same fixed width.

use num_bigint::BigUint;

use super::point::to_fixed_length;
use crate::asn1::{tag, Tlv};
use crate::error::{validate, Error, Result};

/// ECDSA signature components (r, s)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcdsaSignature {
    r: BigUint,
    s: BigUint,
}

impl EcdsaSignature {
    /// Signature from its components
    pub fn new(r: BigUint, s: BigUint) -> Self {
        Self { r, s }
    }

    /// Component r
    pub fn r(&self) -> &BigUint {
        &self.r
    }

    /// Component s
    pub fn s(&self) -> &BigUint {
        &self.s
    }

    /// Split a plain signature into equal halves
    pub fn from_raw(raw: &[u8]) -> Result<Self> {
        validate::parameter(!raw.is_empty(), "signature", "must not be empty")?;
        validate::parameter(raw.len() % 2 == 0, "signature", "odd length")?;
        let (r, s) = raw.split_at(raw.len() / 2);
        Ok(Self::new(
            BigUint::from_bytes_be(r),
            BigUint::from_bytes_be(s),
        ))
    }

    /// Plain `r || s` with each half padded or cut to `component_len` bytes
    pub fn to_raw(&self, component_len: usize) -> Result<Vec<u8>> {
        validate::parameter(component_len > 0, "component length", "must be positive")?;
        let mut out = to_fixed_length(&self.r, component_len);
        out.extend_from_slice(&to_fixed_length(&self.s, component_len));
        Ok(out)
    }

    /// Parse `SEQUENCE { r INTEGER, s INTEGER }`
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let seq = Tlv::from_der(der)?;
        seq.expect_tag(tag::SEQUENCE, "ECDSA signature")?;
        let children = seq.children()?;
        match children.as_slice() {
            [r, s] => Ok(Self::new(r.as_integer()?, s.as_integer()?)),
            _ => Err(Error::encoding(
                "ECDSA signature",
                "expected exactly two INTEGERs",
            )),
        }
    }

    /// Serialize to DER
    pub fn to_der(&self) -> Vec<u8> {
        Tlv::sequence(&[Tlv::integer(&self.r), Tlv::integer(&self.s)]).to_der()
    }
}

/// Convert a DER signature into the plain form used by Terminal Authentication
pub fn der_to_raw(der: &[u8], component_len: usize) -> Result<Vec<u8>> {
    EcdsaSignature::from_der(der)?.to_raw(component_len)
}

/// Convert a plain signature into DER
pub fn raw_to_der(raw: &[u8]) -> Result<Vec<u8>> {
    Ok(EcdsaSignature::from_raw(raw)?.to_der())
}
