//! Minimal BER-TLV / DER codec
//!
//! Card structures mix universal ASN.1 types with application and
//! context-specific tags of more than one byte (`7F49`, `5F20`), which is
//! why this module keeps tags as their raw big-endian byte value instead of
//! a class/number pair. Decoding accepts definite lengths only. Encoding
//! always produces DER lengths.

pub mod algorithm_identifier;
pub mod oid;
pub mod tag;

pub use algorithm_identifier::AlgorithmIdentifier;
pub use oid::Oid;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::ToPrimitive;

use crate::error::{Error, Result};

/// One decoded or to-be-encoded tag-length-value element
#[derive(Clone, PartialEq, Eq)]
pub struct Tlv {
    tag: u32,
    value: Vec<u8>,
}

impl core::fmt::Debug for Tlv {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Tlv({:X}, {})", self.tag, hex::encode_upper(&self.value))
    }
}

impl Tlv {
    /// Create a primitive element from raw content bytes
    pub fn new(tag: u32, value: impl Into<Vec<u8>>) -> Self {
        Self {
            tag,
            value: value.into(),
        }
    }

    /// Create a constructed element from its children
    pub fn constructed(tag: u32, children: &[Tlv]) -> Self {
        let mut value = Vec::new();
        for child in children {
            child.encode_into(&mut value);
        }
        Self { tag, value }
    }

    /// SEQUENCE of the given children
    pub fn sequence(children: &[Tlv]) -> Self {
        Self::constructed(tag::SEQUENCE, children)
    }

    /// SET of the given children, in the given order
    pub fn set(children: &[Tlv]) -> Self {
        Self::constructed(tag::SET, children)
    }

    /// Non-negative INTEGER, with a leading zero octet when the high bit is set
    pub fn integer(value: &BigUint) -> Self {
        Self::new(tag::INTEGER, unsigned_integer_content(value))
    }

    /// Small non-negative INTEGER
    pub fn small_integer(value: u64) -> Self {
        Self::integer(&BigUint::from(value))
    }

    /// OCTET STRING
    pub fn octet_string(bytes: &[u8]) -> Self {
        Self::new(tag::OCTET_STRING, bytes)
    }

    /// BIT STRING without unused bits
    pub fn bit_string(bytes: &[u8]) -> Self {
        let mut value = Vec::with_capacity(bytes.len() + 1);
        value.push(0);
        value.extend_from_slice(bytes);
        Self::new(tag::BIT_STRING, value)
    }

    /// NULL
    pub fn null() -> Self {
        Self::new(tag::NULL, Vec::new())
    }

    /// OBJECT IDENTIFIER
    pub fn oid(oid: &Oid) -> Self {
        Self::new(tag::OBJECT_IDENTIFIER, oid.as_bytes())
    }

    /// UTF8String
    pub fn utf8_string(s: &str) -> Self {
        Self::new(tag::UTF8_STRING, s.as_bytes())
    }

    /// Raw tag value, e.g. `0x30` or `0x7F49`
    pub fn tag(&self) -> u32 {
        self.tag
    }

    /// Content octets
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Consume the element, returning its content octets
    pub fn into_value(self) -> Vec<u8> {
        self.value
    }

    /// Whether the constructed bit is set in the leading tag octet
    pub fn is_constructed(&self) -> bool {
        leading_tag_byte(self.tag) & 0x20 != 0
    }

    /// Decode one element from the start of `input`, returning it and the
    /// number of bytes consumed
    pub fn parse(input: &[u8]) -> Result<(Self, usize)> {
        let (tag, mut pos) = read_tag(input)?;
        let (len, len_size) = read_length(&input[pos..])?;
        pos += len_size;
        let end = pos
            .checked_add(len)
            .filter(|end| *end <= input.len())
            .ok_or_else(|| Error::encoding("TLV", "length exceeds input"))?;
        Ok((Self::new(tag, &input[pos..end]), end))
    }

    /// Decode exactly one element occupying all of `input`
    pub fn from_der(input: &[u8]) -> Result<Self> {
        let (tlv, used) = Self::parse(input)?;
        if used != input.len() {
            return Err(Error::encoding("TLV", "trailing bytes after element"));
        }
        Ok(tlv)
    }

    /// Decode a run of concatenated elements
    pub fn parse_all(mut input: &[u8]) -> Result<Vec<Self>> {
        let mut out = Vec::new();
        while !input.is_empty() {
            let (tlv, used) = Self::parse(input)?;
            out.push(tlv);
            input = &input[used..];
        }
        Ok(out)
    }

    /// Children of a constructed element
    pub fn children(&self) -> Result<Vec<Self>> {
        if !self.is_constructed() {
            return Err(Error::encoding("TLV", "primitive element has no children"));
        }
        Self::parse_all(&self.value)
    }

    /// First direct child with the given tag
    pub fn find_child(&self, tag: u32) -> Result<Option<Self>> {
        Ok(self.children()?.into_iter().find(|c| c.tag == tag))
    }

    /// First direct child with the given tag, failing when absent
    pub fn require_child(&self, tag: u32, context: &'static str) -> Result<Self> {
        self.find_child(tag)?
            .ok_or_else(|| Error::encoding(context, format!("missing element {:X}", tag)))
    }

    /// Fail unless the element carries `expected` as its tag
    pub fn expect_tag(&self, expected: u32, context: &'static str) -> Result<&Self> {
        if self.tag != expected {
            return Err(Error::encoding(
                context,
                format!("expected tag {:X}, found {:X}", expected, self.tag),
            ));
        }
        Ok(self)
    }

    /// Content of a DER INTEGER as an unsigned value; negative values are rejected
    pub fn as_integer(&self) -> Result<BigUint> {
        self.expect_tag(tag::INTEGER, "INTEGER")?;
        match self.value.first() {
            None => Err(Error::encoding("INTEGER", "empty content")),
            Some(b) if b & 0x80 != 0 => Err(Error::encoding("INTEGER", "negative value")),
            Some(_) => Ok(BigUint::from_bytes_be(&self.value)),
        }
    }

    /// Content of a DER INTEGER that fits into an `i64`
    pub fn as_small_integer(&self) -> Result<i64> {
        self.as_integer()?
            .to_i64()
            .ok_or_else(|| Error::encoding("INTEGER", "value out of range"))
    }

    /// Content of a DER INTEGER as two's complement, saturating at the `i64` bounds
    pub fn as_saturating_integer(&self) -> Result<i64> {
        self.expect_tag(tag::INTEGER, "INTEGER")?;
        if self.value.is_empty() {
            return Err(Error::encoding("INTEGER", "empty content"));
        }
        let value = BigInt::from_signed_bytes_be(&self.value);
        Ok(value.to_i64().unwrap_or(match value.sign() {
            Sign::Minus => i64::MIN,
            _ => i64::MAX,
        }))
    }

    /// Content interpreted as an unsigned big-endian magnitude, whatever the tag
    pub fn as_unsigned(&self) -> BigUint {
        BigUint::from_bytes_be(&self.value)
    }

    /// Content of a BIT STRING without unused bits
    pub fn as_bit_string(&self) -> Result<&[u8]> {
        self.expect_tag(tag::BIT_STRING, "BIT STRING")?;
        match self.value.split_first() {
            Some((0, rest)) => Ok(rest),
            Some(_) => Err(Error::encoding("BIT STRING", "unused bits not supported")),
            None => Err(Error::encoding("BIT STRING", "empty content")),
        }
    }

    /// Content of an OBJECT IDENTIFIER
    pub fn as_oid(&self) -> Result<Oid> {
        self.expect_tag(tag::OBJECT_IDENTIFIER, "OBJECT IDENTIFIER")?;
        Oid::from_content(&self.value)
    }

    /// Append the DER encoding of this element to `out`
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        write_tag(self.tag, out);
        write_length(self.value.len(), out);
        out.extend_from_slice(&self.value);
    }

    /// DER encoding of this element
    pub fn to_der(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.value.len() + 6);
        self.encode_into(&mut out);
        out
    }
}

/// Minimal two's-complement content octets for a non-negative integer
pub fn unsigned_integer_content(value: &BigUint) -> Vec<u8> {
    let mut bytes = value.to_bytes_be();
    if bytes[0] & 0x80 != 0 {
        bytes.insert(0, 0);
    }
    bytes
}

fn leading_tag_byte(tag: u32) -> u8 {
    let bytes = tag.to_be_bytes();
    bytes.iter().copied().find(|b| *b != 0).unwrap_or(0)
}

fn read_tag(input: &[u8]) -> Result<(u32, usize)> {
    let first = *input
        .first()
        .ok_or_else(|| Error::encoding("TLV", "empty input"))?;
    let mut tag = first as u32;
    let mut pos = 1;
    if first & 0x1F == 0x1F {
        loop {
            let b = *input
                .get(pos)
                .ok_or_else(|| Error::encoding("TLV", "truncated tag"))?;
            pos += 1;
            if pos > 4 {
                return Err(Error::encoding("TLV", "tag longer than four octets"));
            }
            tag = (tag << 8) | b as u32;
            if b & 0x80 == 0 {
                break;
            }
        }
    }
    Ok((tag, pos))
}

fn read_length(input: &[u8]) -> Result<(usize, usize)> {
    let first = *input
        .first()
        .ok_or_else(|| Error::encoding("TLV", "missing length"))?;
    if first < 0x80 {
        return Ok((first as usize, 1));
    }
    let count = (first & 0x7F) as usize;
    if count == 0 {
        return Err(Error::encoding("TLV", "indefinite length not supported"));
    }
    if count > 4 {
        return Err(Error::encoding("TLV", "length field too long"));
    }
    let bytes = input
        .get(1..=count)
        .ok_or_else(|| Error::encoding("TLV", "truncated length"))?;
    let len = bytes.iter().fold(0usize, |acc, b| (acc << 8) | *b as usize);
    Ok((len, 1 + count))
}

fn write_tag(tag: u32, out: &mut Vec<u8>) {
    let bytes = tag.to_be_bytes();
    let skip = bytes.iter().take(3).take_while(|b| **b == 0).count();
    out.extend_from_slice(&bytes[skip..]);
}

fn write_length(len: usize, out: &mut Vec<u8>) {
    if len < 0x80 {
        out.push(len as u8);
        return;
    }
    let bytes = (len as u64).to_be_bytes();
    let skip = bytes.iter().take_while(|b| **b == 0).count();
    out.push(0x80 | (bytes.len() - skip) as u8);
    out.extend_from_slice(&bytes[skip..]);
}
