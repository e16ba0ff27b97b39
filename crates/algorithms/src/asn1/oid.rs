//! Object identifiers

use core::fmt;
use core::str::FromStr;

use crate::error::{Error, Result};

/// An OBJECT IDENTIFIER held as its DER content octets
///
/// Equality, ordering and hashing work on the canonical encoding, so two
/// identifiers compare equal exactly when their encodings do.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Oid(Vec<u8>);

impl Oid {
    /// Build an identifier from its arcs
    pub fn from_arcs(arcs: &[u64]) -> Result<Self> {
        if arcs.len() < 2 {
            return Err(Error::param("OID", "at least two arcs required"));
        }
        if arcs[0] > 2 || (arcs[0] < 2 && arcs[1] > 39) {
            return Err(Error::param("OID", "invalid leading arcs"));
        }
        let first = arcs[0]
            .checked_mul(40)
            .and_then(|v| v.checked_add(arcs[1]))
            .ok_or_else(|| Error::param("OID", "leading arcs overflow"))?;
        let mut out = Vec::new();
        encode_base128(first, &mut out);
        for arc in &arcs[2..] {
            encode_base128(*arc, &mut out);
        }
        Ok(Self(out))
    }

    /// Wrap DER content octets after checking they are canonical
    pub fn from_content(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(Error::encoding("OBJECT IDENTIFIER", "empty content"));
        }
        if bytes[bytes.len() - 1] & 0x80 != 0 {
            return Err(Error::encoding("OBJECT IDENTIFIER", "truncated sub-identifier"));
        }
        let mut at_start = true;
        for b in bytes {
            if at_start && *b == 0x80 {
                return Err(Error::encoding("OBJECT IDENTIFIER", "non-minimal sub-identifier"));
            }
            at_start = b & 0x80 == 0;
        }
        Ok(Self(bytes.to_vec()))
    }

    /// Content octets
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Decoded arcs
    pub fn arcs(&self) -> Vec<u64> {
        let mut subids = Vec::new();
        let mut acc: u64 = 0;
        for b in &self.0 {
            acc = (acc << 7) | (b & 0x7F) as u64;
            if b & 0x80 == 0 {
                subids.push(acc);
                acc = 0;
            }
        }
        let mut arcs = Vec::with_capacity(subids.len() + 1);
        if let Some((first, rest)) = subids.split_first() {
            let (a0, a1) = match *first {
                v if v < 40 => (0, v),
                v if v < 80 => (1, v - 40),
                v => (2, v - 80),
            };
            arcs.push(a0);
            arcs.push(a1);
            arcs.extend_from_slice(rest);
        }
        arcs
    }

    /// Whether this identifier equals the one spelled by `arcs`
    pub fn is(&self, arcs: &[u64]) -> bool {
        self.arcs() == arcs
    }

    /// Whether `prefix` is a (not necessarily proper) prefix of this identifier
    pub fn starts_with(&self, prefix: &[u64]) -> bool {
        self.arcs().starts_with(prefix)
    }
}

fn encode_base128(mut value: u64, out: &mut Vec<u8>) {
    let mut tmp = [0u8; 10];
    let mut i = tmp.len();
    loop {
        i -= 1;
        tmp[i] = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            break;
        }
    }
    let last = tmp.len() - 1;
    for (j, b) in tmp.iter().enumerate().skip(i) {
        out.push(if j == last { *b } else { b | 0x80 });
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arcs = self.arcs();
        for (i, arc) in arcs.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", arc)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Oid({})", self)
    }
}

impl FromStr for Oid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let arcs = s
            .trim()
            .split('.')
            .map(|part| {
                part.parse::<u64>()
                    .map_err(|_| Error::param("OID", format!("invalid arc '{}'", part)))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_arcs(&arcs)
    }
}
