use super::*;
use crate::error::Error;

fn check_vector(key_hex: &str, expected_hex: &str, name: &str) {
    let key = hex::decode(key_hex).unwrap();
    let plaintext = hex::decode("00112233445566778899aabbccddeeff").unwrap();
    let cipher = Aes::new(&key).unwrap();
    assert_eq!(cipher.name(), name);

    let mut block = plaintext.clone();
    cipher.encrypt_block(&mut block).unwrap();
    assert_eq!(hex::encode(&block), expected_hex);

    cipher.decrypt_block(&mut block).unwrap();
    assert_eq!(block, plaintext);
}

// FIPS 197, Appendix C
#[test]
fn test_aes128_fips197() {
    check_vector(
        "000102030405060708090a0b0c0d0e0f",
        "69c4e0d86a7b0430d8cdb78070b4c55a",
        "AES-128",
    );
}

#[test]
fn test_aes192_fips197() {
    check_vector(
        "000102030405060708090a0b0c0d0e0f1011121314151617",
        "dda97ca4864cdfe06eaf70a0ec0d7191",
        "AES-192",
    );
}

#[test]
fn test_aes256_fips197() {
    check_vector(
        "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f",
        "8ea2b7ca516745bfeafc49904b496089",
        "AES-256",
    );
}

#[test]
fn test_sbox_known_entries() {
    assert_eq!(sbox(0x00), 0x63);
    assert_eq!(sbox(0x53), 0xed);
    for x in 0..=255u8 {
        assert_eq!(inv_sbox(sbox(x)), x);
    }
}

#[test]
fn test_invalid_key_and_block_lengths() {
    assert!(matches!(Aes::new(&[0u8; 15]), Err(Error::Length { .. })));
    assert!(matches!(Aes::new(&[0u8; 33]), Err(Error::Length { .. })));

    let cipher = Aes::new(&[0u8; 16]).unwrap();
    let mut short = [0u8; 15];
    assert!(cipher.encrypt_block(&mut short).is_err());
    assert!(cipher.decrypt_block(&mut short).is_err());
}
