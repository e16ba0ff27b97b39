use super::*;

fn oid(arcs: &[u64]) -> Oid {
    Oid::from_arcs(arcs).unwrap()
}

#[test]
fn test_ta_ecdsa_needs_raw_conversion() {
    for arcs in [
        oids::TA_ECDSA_SHA_1,
        oids::TA_ECDSA_SHA_224,
        oids::TA_ECDSA_SHA_256,
        oids::TA_ECDSA_SHA_384,
        oids::TA_ECDSA_SHA_512,
    ] {
        let alg = SignatureAlgorithm::from_oid(&oid(arcs)).unwrap();
        assert!(alg.needs_raw_conversion);
        assert!(alg.kind.is_ec());
    }
}

#[test]
fn test_rsa_passes_through() {
    let alg = SignatureAlgorithm::from_oid(&oid(oids::TA_RSA_PSS_SHA_256)).unwrap();
    assert_eq!(alg.jca_name, "SHA256withRSA/PSS");
    assert_eq!(alg.kind, SignatureKind::RsaPss);
    assert!(!alg.needs_raw_conversion);

    let alg = SignatureAlgorithm::from_oid(&oid(oids::TA_RSA_V1_5_SHA_512)).unwrap();
    assert_eq!(alg.digest, DigestAlgorithm::Sha512);
    assert_eq!(alg.kind, SignatureKind::RsaPkcs1);
}

#[test]
fn test_unknown_oid_rejected() {
    let unknown = oid(&[1, 2, 3, 4]);
    assert!(matches!(
        SignatureAlgorithm::from_oid(&unknown),
        Err(Error::Parameter { .. })
    ));
    assert!(SignatureAlgorithm::from_oid(&oid(oids::ECDSA_WITH_SHA1)).is_err());
}

#[test]
fn test_oid_round_trip() {
    let alg = SignatureAlgorithm::from_oid(&oid(oids::TA_ECDSA_SHA_256)).unwrap();
    assert_eq!(alg.oid().unwrap().to_string(), "0.4.0.127.0.7.2.2.2.2.3");
}

#[test]
fn test_x509_algorithm_by_field_size() {
    assert_eq!(x509_ecdsa_for_field_size(192).digest, DigestAlgorithm::Sha224);
    assert_eq!(x509_ecdsa_for_field_size(224).digest, DigestAlgorithm::Sha224);
    assert_eq!(x509_ecdsa_for_field_size(256).digest, DigestAlgorithm::Sha256);
    assert_eq!(x509_ecdsa_for_field_size(320).digest, DigestAlgorithm::Sha384);
    assert_eq!(x509_ecdsa_for_field_size(384).digest, DigestAlgorithm::Sha384);
    assert_eq!(x509_ecdsa_for_field_size(512).digest, DigestAlgorithm::Sha512);
    assert_eq!(x509_ecdsa_for_field_size(521).digest, DigestAlgorithm::Sha512);
    assert!(!x509_ecdsa_for_field_size(256).needs_raw_conversion);
}

#[test]
fn test_x509_rsa_certificate_algorithm() {
    let alg = SignatureAlgorithm::from_oid(&oid(oids::SHA256_WITH_RSA_ENCRYPTION)).unwrap();
    assert_eq!(alg.kind, SignatureKind::RsaPkcs1);
    assert_eq!(alg.digest, DigestAlgorithm::Sha256);
}
