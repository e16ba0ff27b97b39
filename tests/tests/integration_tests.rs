//! End-to-end flows across the primitive and HSM layers

use eidcrypt_algorithms::asn1::{AlgorithmIdentifier, Oid, Tlv};
use eidcrypt_algorithms::ec::util::encode_public_key_template;
use eidcrypt_algorithms::ec::{
    build_parameter_spec, calc_shared_secret, generate_key_pair, parameter_spec_from_algorithm_identifier,
    parameter_spec_from_cvc, parameter_spec_from_domain_parameters, parameter_spec_from_public_key,
    shared_secret_bytes, verify_signature, DomainParameterInfo,
};
use eidcrypt_algorithms::{cmac, cmac_with_iv, decipher_aes, encipher_aes, SecretKey};
use eidcrypt_hsm::{HsmService, KeySpec, X509Certificate};
use eidcrypt_params::traditional::oids;
use eidcrypt_tests::vectors::{self, bytes};
use eidcrypt_tests::{curve, seeded_rng, session_keys, software_hsm};

#[test]
fn test_terminal_key_signs_raw_ecdsa() {
    let hsm = software_hsm();
    let spec = KeySpec::standardized_curve(12).unwrap();
    let public = hsm
        .generate_key_pair("ECDSA", &spec, "terminal", None, false, 12)
        .unwrap();

    let ta = Oid::from_arcs(oids::TA_ECDSA_SHA_256).unwrap();
    let signature = hsm.sign("terminal", &ta, b"hello").unwrap();
    assert_eq!(signature.len(), 64);
    assert!(verify_signature(&signature, b"hello", public.as_ec().unwrap(), "SHA-256"));
    assert!(!verify_signature(&signature, b"hellp", public.as_ec().unwrap(), "SHA-256"));
}

#[test]
fn test_certificate_chain_verifies_up_to_root() {
    let hsm = software_hsm();
    let spec = KeySpec::standardized_curve(13).unwrap();
    let root = hsm
        .generate_key_pair("EC", &spec, "root", None, false, 24)
        .unwrap();
    let leaf = hsm
        .generate_key_pair("EC", &spec, "leaf", Some("root"), false, 6)
        .unwrap();

    let chain = hsm.get_certificate_chain("leaf").unwrap();
    assert_eq!(chain.len(), 2);
    let leaf_cert = X509Certificate::from_der(&chain[0]).unwrap();
    let root_cert = X509Certificate::from_der(&chain[1]).unwrap();

    assert_eq!(leaf_cert.public_key().unwrap(), leaf);
    assert_eq!(leaf_cert.issuer(), "root");
    assert!(leaf_cert.verify(root.as_ec().unwrap()));
    assert!(!leaf_cert.verify(leaf.as_ec().unwrap()));
    assert!(root_cert.is_self_issued());
    assert!(root_cert.verify(root.as_ec().unwrap()));
    assert_eq!(
        hsm.get_expiration_date("leaf").unwrap(),
        leaf_cert.not_after()
    );
}

#[test]
fn test_secure_messaging_round_trip() {
    // both sides agree on a Chip Authentication secret
    let params = curve(13);
    let mut rng = seeded_rng(7);
    let (chip_public, chip_private) = generate_key_pair(&params, &mut rng).unwrap();
    let (terminal_public, terminal_private) = generate_key_pair(&params, &mut rng).unwrap();
    let chip_secret = calc_shared_secret(&chip_private, &terminal_public).unwrap();
    let terminal_secret = calc_shared_secret(&terminal_private, &chip_public).unwrap();
    let secret = shared_secret_bytes(&terminal_secret, &params).unwrap();
    assert_eq!(secret, shared_secret_bytes(&chip_secret, &params).unwrap());

    let mut terminal = session_keys(&secret, 16).unwrap();
    let mut chip = session_keys(&secret, 16).unwrap();
    let command = b"00B0000000000000".to_vec();

    terminal.ssc_mut().increment();
    let iv = terminal.ssc().encrypted_iv(terminal.enc_key()).unwrap();
    let cryptogram = encipher_aes("AES/CBC/NoPadding", terminal.enc_key(), Some(iv.as_slice()), &command).unwrap();
    let mac = cmac_with_iv(&cryptogram, terminal.mac_key(), terminal.ssc().as_iv(), None).unwrap();
    assert_eq!(mac.len(), 8);

    chip.ssc_mut().increment();
    let expected = cmac_with_iv(&cryptogram, chip.mac_key(), chip.ssc().as_iv(), None).unwrap();
    assert_eq!(mac, expected);
    let iv = chip.ssc().encrypted_iv(chip.enc_key()).unwrap();
    let plain = decipher_aes("AES/CBC/NoPadding", chip.enc_key(), Some(iv.as_slice()), &cryptogram).unwrap();
    assert_eq!(plain, command);

    // a replayed counter no longer authenticates
    chip.ssc_mut().increment();
    let replayed = cmac_with_iv(&cryptogram, chip.mac_key(), chip.ssc().as_iv(), None).unwrap();
    assert_ne!(mac, replayed);
}

#[test]
fn test_cmac_published_vectors() {
    let key = SecretKey::aes(&bytes(vectors::CMAC_AES128_KEY));
    for (message, tag) in vectors::CMAC_AES128 {
        let full = cmac(&bytes(message), &key, Some(16)).unwrap();
        assert_eq!(hex::encode(&full), *tag);
        let short = cmac(&bytes(message), &key, None).unwrap();
        assert_eq!(short[..], full[..8]);
    }
}

#[test]
fn test_cbc_published_vector() {
    let (key, iv, plain, cipher) = vectors::CBC_AES128;
    let key = SecretKey::aes(&bytes(key));
    let out = encipher_aes("AES/CBC/NoPadding", &key, Some(bytes(iv).as_slice()), &bytes(plain)).unwrap();
    assert_eq!(hex::encode(out), cipher);
}

#[test]
fn test_every_parameter_source_agrees() {
    let params = curve(16);
    let fs = params.field_size_bytes();
    let mut rng = seeded_rng(16);
    let (public, _) = generate_key_pair(&params, &mut rng).unwrap();

    let from_values = build_parameter_spec(
        params.prime(),
        params.a(),
        params.b(),
        &params.generator().to_uncompressed(fs).unwrap(),
        params.order(),
        params.cofactor(),
    )
    .unwrap();

    let explicit = AlgorithmIdentifier::new(
        Oid::from_arcs(oids::EC_PUBLIC_KEY).unwrap(),
        Some(params.to_explicit_asn1().unwrap()),
    );
    let from_identifier = parameter_spec_from_algorithm_identifier(&explicit).unwrap();

    let standardized = AlgorithmIdentifier::new(
        Oid::from_arcs(oids::STANDARDIZED_DOMAIN_PARAMETERS).unwrap(),
        Some(Tlv::small_integer(16)),
    );
    let info = DomainParameterInfo::new(Oid::from_arcs(oids::CA_ECDH).unwrap(), standardized, None);
    let from_info = parameter_spec_from_domain_parameters(&info).unwrap();

    let ta = Oid::from_arcs(oids::TA_ECDSA_SHA_512).unwrap();
    let template = encode_public_key_template(&public, &ta, true).unwrap();
    let from_cvc = parameter_spec_from_cvc(&template).unwrap();
    let from_key = parameter_spec_from_public_key(&template.to_der()).unwrap();

    for derived in [from_values, from_identifier, from_info, from_cvc, from_key] {
        assert_eq!(derived, params);
    }
}

#[test]
fn test_spki_survives_the_hsm() {
    let hsm = software_hsm();
    let spec = KeySpec::standardized_curve(9).unwrap();
    let public = hsm
        .generate_key_pair("EC", &spec, "brainpool", None, false, 1)
        .unwrap();

    let der = hsm.get_public_key("brainpool").unwrap().encoded().unwrap();
    let decoded = eidcrypt_hsm::PublicKey::from_spki(&der).unwrap();
    assert_eq!(decoded, public);
    assert_eq!(decoded.as_ec().unwrap().params(), &curve(9));
}
