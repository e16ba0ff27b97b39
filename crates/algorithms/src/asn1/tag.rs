//! Tag values used by X.509, TR-03110 security infos and CV certificates

/// INTEGER
pub const INTEGER: u32 = 0x02;
/// BIT STRING
pub const BIT_STRING: u32 = 0x03;
/// OCTET STRING
pub const OCTET_STRING: u32 = 0x04;
/// NULL
pub const NULL: u32 = 0x05;
/// OBJECT IDENTIFIER
pub const OBJECT_IDENTIFIER: u32 = 0x06;
/// UTF8String
pub const UTF8_STRING: u32 = 0x0C;
/// PrintableString
pub const PRINTABLE_STRING: u32 = 0x13;
/// UTCTime
pub const UTC_TIME: u32 = 0x17;
/// GeneralizedTime
pub const GENERALIZED_TIME: u32 = 0x18;
/// SEQUENCE (constructed)
pub const SEQUENCE: u32 = 0x30;
/// SET (constructed)
pub const SET: u32 = 0x31;
/// Context-specific constructed `[0]`
pub const CONTEXT_0: u32 = 0xA0;

/// CV certificate
pub const CV_CERTIFICATE: u32 = 0x7F21;
/// CV certificate body
pub const CERTIFICATE_BODY: u32 = 0x7F4E;
/// Public key data object
pub const PUBLIC_KEY: u32 = 0x7F49;
/// Certificate holder reference
pub const HOLDER_REFERENCE: u32 = 0x5F20;
/// Certification authority reference
pub const AUTHORITY_REFERENCE: u32 = 0x42;

/// Public key: prime modulus p
pub const PK_PRIME: u32 = 0x81;
/// Public key: coefficient a
pub const PK_COEFFICIENT_A: u32 = 0x82;
/// Public key: coefficient b
pub const PK_COEFFICIENT_B: u32 = 0x83;
/// Public key: generator G (uncompressed point)
pub const PK_GENERATOR: u32 = 0x84;
/// Public key: order n of G
pub const PK_ORDER: u32 = 0x85;
/// Public key: public point Y
pub const PK_PUBLIC_POINT: u32 = 0x86;
/// Public key: cofactor h
pub const PK_COFACTOR: u32 = 0x87;
