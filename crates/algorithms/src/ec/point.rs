//! Affine points and their uncompressed encoding

use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::{validate, Error, Result};

/// Prefix octet of an uncompressed point
pub const UNCOMPRESSED_PREFIX: u8 = 0x04;

/// A point on a short Weierstrass curve over a prime field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EcPoint {
    /// The neutral element
    Infinity,
    /// A finite point
    Affine {
        /// x coordinate
        x: BigUint,
        /// y coordinate
        y: BigUint,
    },
}

impl EcPoint {
    /// Finite point from its coordinates
    pub fn new(x: BigUint, y: BigUint) -> Self {
        EcPoint::Affine { x, y }
    }

    /// Whether this is the point at infinity
    pub fn is_infinity(&self) -> bool {
        matches!(self, EcPoint::Infinity)
    }

    /// x coordinate of a finite point
    pub fn x(&self) -> Option<&BigUint> {
        match self {
            EcPoint::Infinity => None,
            EcPoint::Affine { x, .. } => Some(x),
        }
    }

    /// y coordinate of a finite point
    pub fn y(&self) -> Option<&BigUint> {
        match self {
            EcPoint::Infinity => None,
            EcPoint::Affine { y, .. } => Some(y),
        }
    }

    /// `04 || X || Y` with both coordinates at `field_size` bytes
    ///
    /// The point at infinity has no uncompressed form.
    pub fn to_uncompressed(&self, field_size: usize) -> Result<Vec<u8>> {
        let (x, y) = match self {
            EcPoint::Infinity => {
                return Err(Error::param("point", "point at infinity cannot be encoded"))
            }
            EcPoint::Affine { x, y } => (x, y),
        };
        validate::parameter(
            x.bits() <= 8 * field_size as u64 && y.bits() <= 8 * field_size as u64,
            "point",
            "coordinate exceeds field size",
        )?;
        let mut out = Vec::with_capacity(1 + 2 * field_size);
        out.push(UNCOMPRESSED_PREFIX);
        out.extend_from_slice(&to_fixed_length(x, field_size));
        out.extend_from_slice(&to_fixed_length(y, field_size));
        Ok(out)
    }
}

/// Decode an uncompressed point of a curve with `field_size`-byte coordinates
///
/// The encoding must be exactly `2 * field_size + 1` bytes and start with
/// `04`. Curve membership is not checked here.
pub fn point_from_bytes(bytes: &[u8], field_size: usize) -> Result<EcPoint> {
    validate::parameter(field_size > 0, "field size", "must be positive")?;
    validate::length("uncompressed point", bytes.len(), 2 * field_size + 1)?;
    if bytes[0] != UNCOMPRESSED_PREFIX {
        return Err(Error::param(
            "point",
            "only uncompressed encoding (prefix 04) supported",
        ));
    }
    let x = BigUint::from_bytes_be(&bytes[1..=field_size]);
    let y = BigUint::from_bytes_be(&bytes[field_size + 1..]);
    Ok(EcPoint::new(x, y))
}

/// Big-endian bytes of `value`, left-padded with zeros or cut to the
/// trailing `len` bytes
pub fn to_fixed_length(value: &BigUint, len: usize) -> Vec<u8> {
    let bytes = if value.is_zero() {
        Vec::new()
    } else {
        value.to_bytes_be()
    };
    if bytes.len() >= len {
        return bytes[bytes.len() - len..].to_vec();
    }
    let mut out = vec![0u8; len - bytes.len()];
    out.extend_from_slice(&bytes);
    out
}
