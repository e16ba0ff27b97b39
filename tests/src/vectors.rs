//! Published known-answer vectors

/// AES-128 key used by RFC 4493 and NIST SP 800-38B
pub const CMAC_AES128_KEY: &str = "2b7e151628aed2a6abf7158809cf4f3c";

/// RFC 4493 examples: (message, full 16-byte tag)
pub const CMAC_AES128: &[(&str, &str)] = &[
    ("", "bb1d6929e95937287fa37d129b756746"),
    (
        "6bc1bee22e409f96e93d7e117393172a",
        "070a16b46b4d4144f79bdd9dd04a287c",
    ),
    (
        "6bc1bee22e409f96e93d7e117393172aae2d8a571e03ac9c9eb76fac45af8e5130c81c46a35ce411",
        "dfa66747de9ae63030ca32611497c827",
    ),
    (
        "6bc1bee22e409f96e93d7e117393172aae2d8a571e03ac9c9eb76fac45af8e5130c81c46a35ce411e5fbc1191a0a52eff69f2445df4f9b17ad2b417be66c3710",
        "51f0bebf7e3b9d92fc49741779363cfe",
    ),
];

/// NIST SP 800-38A F.2.1 CBC-AES128 first block: (key, iv, plaintext, ciphertext)
pub const CBC_AES128: (&str, &str, &str, &str) = (
    "2b7e151628aed2a6abf7158809cf4f3c",
    "000102030405060708090a0b0c0d0e0f",
    "6bc1bee22e409f96e93d7e117393172a",
    "7649abac8119b246cee98e9b12e9197d",
);

/// Decode a hex vector, panicking on malformed input
pub fn bytes(hex_str: &str) -> Vec<u8> {
    hex::decode(hex_str).expect("valid hex vector")
}
