//! Object identifier arcs
//!
//! Identifiers are given as component arrays. The algorithms crate turns
//! them into comparable `Oid` values.

/// bsi-de: 0.4.0.127.0.7
pub const BSI_DE: &[u64] = &[0, 4, 0, 127, 0, 7];

/// Standardized domain parameters (BSI TR-03111): 0.4.0.127.0.7.1.2
pub const STANDARDIZED_DOMAIN_PARAMETERS: &[u64] = &[0, 4, 0, 127, 0, 7, 1, 2];

/// id-PK-DH: 0.4.0.127.0.7.2.2.1.1
pub const PK_DH: &[u64] = &[0, 4, 0, 127, 0, 7, 2, 2, 1, 1];
/// id-PK-ECDH: 0.4.0.127.0.7.2.2.1.2
pub const PK_ECDH: &[u64] = &[0, 4, 0, 127, 0, 7, 2, 2, 1, 2];

/// id-TA-RSA-v1-5-SHA-1
pub const TA_RSA_V1_5_SHA_1: &[u64] = &[0, 4, 0, 127, 0, 7, 2, 2, 2, 1, 1];
/// id-TA-RSA-v1-5-SHA-256
pub const TA_RSA_V1_5_SHA_256: &[u64] = &[0, 4, 0, 127, 0, 7, 2, 2, 2, 1, 2];
/// id-TA-RSA-PSS-SHA-1
pub const TA_RSA_PSS_SHA_1: &[u64] = &[0, 4, 0, 127, 0, 7, 2, 2, 2, 1, 3];
/// id-TA-RSA-PSS-SHA-256
pub const TA_RSA_PSS_SHA_256: &[u64] = &[0, 4, 0, 127, 0, 7, 2, 2, 2, 1, 4];
/// id-TA-RSA-v1-5-SHA-512
pub const TA_RSA_V1_5_SHA_512: &[u64] = &[0, 4, 0, 127, 0, 7, 2, 2, 2, 1, 5];
/// id-TA-RSA-PSS-SHA-512
pub const TA_RSA_PSS_SHA_512: &[u64] = &[0, 4, 0, 127, 0, 7, 2, 2, 2, 1, 6];

/// id-TA-ECDSA-SHA-1
pub const TA_ECDSA_SHA_1: &[u64] = &[0, 4, 0, 127, 0, 7, 2, 2, 2, 2, 1];
/// id-TA-ECDSA-SHA-224
pub const TA_ECDSA_SHA_224: &[u64] = &[0, 4, 0, 127, 0, 7, 2, 2, 2, 2, 2];
/// id-TA-ECDSA-SHA-256
pub const TA_ECDSA_SHA_256: &[u64] = &[0, 4, 0, 127, 0, 7, 2, 2, 2, 2, 3];
/// id-TA-ECDSA-SHA-384
pub const TA_ECDSA_SHA_384: &[u64] = &[0, 4, 0, 127, 0, 7, 2, 2, 2, 2, 4];
/// id-TA-ECDSA-SHA-512
pub const TA_ECDSA_SHA_512: &[u64] = &[0, 4, 0, 127, 0, 7, 2, 2, 2, 2, 5];

/// id-CA-ECDH: 0.4.0.127.0.7.2.2.3.2
pub const CA_ECDH: &[u64] = &[0, 4, 0, 127, 0, 7, 2, 2, 3, 2];
/// id-CA-ECDH-AES-CBC-CMAC-128
pub const CA_ECDH_AES_CBC_CMAC_128: &[u64] = &[0, 4, 0, 127, 0, 7, 2, 2, 3, 2, 2];
/// id-CA-ECDH-AES-CBC-CMAC-192
pub const CA_ECDH_AES_CBC_CMAC_192: &[u64] = &[0, 4, 0, 127, 0, 7, 2, 2, 3, 2, 3];
/// id-CA-ECDH-AES-CBC-CMAC-256
pub const CA_ECDH_AES_CBC_CMAC_256: &[u64] = &[0, 4, 0, 127, 0, 7, 2, 2, 3, 2, 4];

/// id-PACE: 0.4.0.127.0.7.2.2.4
pub const PACE: &[u64] = &[0, 4, 0, 127, 0, 7, 2, 2, 4];

/// id-RI-ECDH-SHA-256: 0.4.0.127.0.7.2.2.5.2.3
pub const RI_ECDH_SHA_256: &[u64] = &[0, 4, 0, 127, 0, 7, 2, 2, 5, 2, 3];

/// ecPublicKey (ANSI X9.62): 1.2.840.10045.2.1
pub const EC_PUBLIC_KEY: &[u64] = &[1, 2, 840, 10045, 2, 1];
/// prime-field (ANSI X9.62): 1.2.840.10045.1.1
pub const PRIME_FIELD: &[u64] = &[1, 2, 840, 10045, 1, 1];
/// characteristic-two-field (ANSI X9.62): 1.2.840.10045.1.2
pub const CHARACTERISTIC_TWO_FIELD: &[u64] = &[1, 2, 840, 10045, 1, 2];

/// ecdsa-with-SHA1
pub const ECDSA_WITH_SHA1: &[u64] = &[1, 2, 840, 10045, 4, 1];
/// ecdsa-with-SHA224
pub const ECDSA_WITH_SHA224: &[u64] = &[1, 2, 840, 10045, 4, 3, 1];
/// ecdsa-with-SHA256
pub const ECDSA_WITH_SHA256: &[u64] = &[1, 2, 840, 10045, 4, 3, 2];
/// ecdsa-with-SHA384
pub const ECDSA_WITH_SHA384: &[u64] = &[1, 2, 840, 10045, 4, 3, 3];
/// ecdsa-with-SHA512
pub const ECDSA_WITH_SHA512: &[u64] = &[1, 2, 840, 10045, 4, 3, 4];

/// rsaEncryption (PKCS #1): 1.2.840.113549.1.1.1
pub const RSA_ENCRYPTION: &[u64] = &[1, 2, 840, 113549, 1, 1, 1];
/// sha256WithRSAEncryption (PKCS #1): 1.2.840.113549.1.1.11
pub const SHA256_WITH_RSA_ENCRYPTION: &[u64] = &[1, 2, 840, 113549, 1, 1, 11];

/// id-sha1
pub const SHA1: &[u64] = &[1, 3, 14, 3, 2, 26];
/// id-sha256
pub const SHA256: &[u64] = &[2, 16, 840, 1, 101, 3, 4, 2, 1];
/// id-sha384
pub const SHA384: &[u64] = &[2, 16, 840, 1, 101, 3, 4, 2, 2];
/// id-sha512
pub const SHA512: &[u64] = &[2, 16, 840, 1, 101, 3, 4, 2, 3];
/// id-sha224
pub const SHA224: &[u64] = &[2, 16, 840, 1, 101, 3, 4, 2, 4];

/// id-at-commonName: 2.5.4.3
pub const COMMON_NAME: &[u64] = &[2, 5, 4, 3];
