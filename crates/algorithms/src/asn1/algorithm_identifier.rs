//! X.509 `AlgorithmIdentifier`

use super::{tag, Oid, Tlv};
use crate::error::{Error, Result};

/// `SEQUENCE { algorithm OBJECT IDENTIFIER, parameters ANY OPTIONAL }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmIdentifier {
    algorithm: Oid,
    parameters: Option<Tlv>,
}

impl AlgorithmIdentifier {
    /// Identifier with optional parameters
    pub fn new(algorithm: Oid, parameters: Option<Tlv>) -> Self {
        Self {
            algorithm,
            parameters,
        }
    }

    /// Decode from an already parsed SEQUENCE
    pub fn from_tlv(tlv: &Tlv) -> Result<Self> {
        tlv.expect_tag(tag::SEQUENCE, "AlgorithmIdentifier")?;
        let mut children = tlv.children()?.into_iter();
        let algorithm = children
            .next()
            .ok_or_else(|| Error::encoding("AlgorithmIdentifier", "empty sequence"))?
            .as_oid()?;
        Ok(Self {
            algorithm,
            parameters: children.next(),
        })
    }

    /// Decode from DER
    pub fn from_der(der: &[u8]) -> Result<Self> {
        Self::from_tlv(&Tlv::from_der(der)?)
    }

    /// Algorithm OID
    pub fn algorithm(&self) -> &Oid {
        &self.algorithm
    }

    /// Raw parameters element, if any
    pub fn parameters(&self) -> Option<&Tlv> {
        self.parameters.as_ref()
    }

    /// Parameters read as a signed INTEGER, e.g. a standardized domain parameter ID
    ///
    /// Values beyond the `i64` range saturate, so an oversized ID still
    /// reads as present.
    pub fn parameter_id(&self) -> Option<i64> {
        self.parameters
            .as_ref()
            .filter(|p| p.tag() == tag::INTEGER)
            .and_then(|p| p.as_saturating_integer().ok())
    }

    /// Encode as a SEQUENCE element
    pub fn to_tlv(&self) -> Tlv {
        let mut children = vec![Tlv::oid(&self.algorithm)];
        if let Some(params) = &self.parameters {
            children.push(params.clone());
        }
        Tlv::sequence(&children)
    }
}
