//! Property-based tests for AES-CBC and AES-CMAC

use eidcrypt_algorithms::{cmac, cmac_with_iv, decipher_aes, encipher_aes, SecretKey, SendSequenceCounter};
use proptest::prelude::*;

/// AES key of a random supported size
fn aes_key() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![Just(16usize), Just(24), Just(32)]
        .prop_flat_map(|len| prop::collection::vec(any::<u8>(), len))
}

/// Data that's a multiple of 16 bytes (AES block size)
fn block_aligned_data() -> impl Strategy<Value = Vec<u8>> {
    (1usize..=16).prop_flat_map(|blocks| prop::collection::vec(any::<u8>(), blocks * 16))
}

proptest! {
    #[test]
    fn cbc_roundtrip(key in aes_key(), iv in any::<[u8; 16]>(), data in block_aligned_data()) {
        let key = SecretKey::aes(&key);
        let ciphertext = encipher_aes("AES/CBC/NoPadding", &key, Some(&iv[..]), &data).unwrap();
        prop_assert_eq!(ciphertext.len(), data.len());
        let plaintext = decipher_aes("AES/CBC/NoPadding", &key, Some(&iv[..]), &ciphertext).unwrap();
        prop_assert_eq!(plaintext, data);
    }

    #[test]
    fn ecb_roundtrip(key in aes_key(), data in block_aligned_data()) {
        let key = SecretKey::aes(&key);
        let ciphertext = encipher_aes("AES/ECB/NoPadding", &key, None, &data).unwrap();
        let plaintext = decipher_aes("AES/ECB/NoPadding", &key, None, &ciphertext).unwrap();
        prop_assert_eq!(plaintext, data);
    }

    #[test]
    fn unaligned_data_rejected(key in aes_key(), extra in 1usize..16) {
        let key = SecretKey::aes(&key);
        let data = vec![0u8; 16 + extra];
        prop_assert!(encipher_aes("AES/CBC/NoPadding", &key, Some(&[0u8; 16][..]), &data).is_err());
    }

    #[test]
    fn cmac_length_and_prefix(
        key in aes_key(),
        data in prop::collection::vec(any::<u8>(), 0..100),
        length in 1usize..=16,
    ) {
        let key = SecretKey::aes(&key);
        let full = cmac(&data, &key, Some(16)).unwrap();
        let tag = cmac(&data, &key, Some(length)).unwrap();
        prop_assert_eq!(tag.len(), length);
        prop_assert_eq!(&tag[..], &full[..length]);
        prop_assert_eq!(cmac(&data, &key, Some(length)).unwrap(), tag);
    }

    #[test]
    fn cmac_detects_single_bit_changes(
        key in aes_key(),
        data in prop::collection::vec(any::<u8>(), 1..100),
        flip in any::<prop::sample::Index>(),
    ) {
        let key = SecretKey::aes(&key);
        let mut changed = data.clone();
        let bit = flip.index(changed.len() * 8);
        changed[bit / 8] ^= 1 << (bit % 8);
        prop_assert_ne!(
            cmac(&data, &key, Some(16)).unwrap(),
            cmac(&changed, &key, Some(16)).unwrap()
        );
    }

    #[test]
    fn cmac_with_iv_is_prefixed_cmac(
        key in aes_key(),
        counter in any::<[u8; 16]>(),
        data in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let key = SecretKey::aes(&key);
        let ssc = SendSequenceCounter::new(&counter).unwrap();
        let mut prefixed = ssc.as_iv().to_vec();
        prefixed.extend_from_slice(&data);
        prop_assert_eq!(
            cmac_with_iv(&data, &key, ssc.as_iv(), None).unwrap(),
            cmac(&prefixed, &key, None).unwrap()
        );
    }

    #[test]
    fn counter_increment_changes_tag(
        key in aes_key(),
        counter in any::<[u8; 16]>(),
        data in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let key = SecretKey::aes(&key);
        let mut ssc = SendSequenceCounter::new(&counter).unwrap();
        let before = cmac_with_iv(&data, &key, ssc.as_iv(), Some(16)).unwrap();
        ssc.increment();
        let after = cmac_with_iv(&data, &key, ssc.as_iv(), Some(16)).unwrap();
        prop_assert_ne!(before, after);
    }
}
