use super::*;
use crate::certificate::X509Certificate;
use chrono::Months;
use eidcrypt_algorithms::ec::{der_to_raw, verify_signature};
use eidcrypt_params::traditional::oids;

fn ready() -> LocalHsmService {
    let hsm = LocalHsmService::new();
    hsm.init(&HsmConfiguration::NoHsm).unwrap();
    hsm
}

fn p256() -> KeySpec {
    KeySpec::standardized_curve(12).unwrap()
}

fn oid(arcs: &[u64]) -> Oid {
    Oid::from_arcs(arcs).unwrap()
}

#[test]
fn test_operations_need_init() {
    let hsm = LocalHsmService::new();
    assert!(!hsm.is_initialized());

    let illegal = |r: Result<()>| assert!(matches!(r, Err(Error::IllegalState { .. })));
    illegal(hsm.is_alive(true).map(|_| ()));
    illegal(hsm.get_aliases().map(|_| ()));
    illegal(hsm.contains_key("k").map(|_| ()));
    illegal(hsm.delete_key("k"));
    illegal(hsm.sign("k", &oid(oids::TA_ECDSA_SHA_256), b"x").map(|_| ()));
    illegal(
        hsm.generate_key_pair("EC", &p256(), "k", None, false, 1)
            .map(|_| ()),
    );
    illegal(hsm.distribute_key("k"));
    illegal(hsm.is_key_being_modified("k").map(|_| ()));
    illegal(hsm.logout());
}

#[test]
fn test_init_and_logout() {
    let hsm = LocalHsmService::new();
    let err = hsm
        .init(&HsmConfiguration::pkcs11("/tmp/p11.cfg", "pin"))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
    assert!(!hsm.is_initialized());

    hsm.init(&HsmConfiguration::NoHsm).unwrap();
    assert!(hsm.is_initialized());
    assert!(hsm.is_alive(true).unwrap());
    assert!(matches!(
        hsm.init(&HsmConfiguration::NoHsm),
        Err(Error::IllegalState { .. })
    ));

    hsm.logout().unwrap();
    assert!(!hsm.is_initialized());
    assert!(hsm.get_aliases().is_err());
}

#[test]
fn test_keys_survive_logout() {
    let hsm = ready();
    hsm.generate_key_pair("EC", &p256(), "k", None, false, 1)
        .unwrap();
    hsm.logout().unwrap();
    hsm.init(&HsmConfiguration::NoHsm).unwrap();
    assert!(hsm.contains_key("k").unwrap());
}

#[test]
fn test_generate_and_lookup() {
    let hsm = ready();
    let public = hsm
        .generate_key_pair("ECDSA", &p256(), "terminal", None, false, 6)
        .unwrap();

    assert!(hsm.contains_key("terminal").unwrap());
    assert!(!hsm.contains_key("other").unwrap());
    assert_eq!(hsm.get_aliases().unwrap(), vec!["terminal".to_string()]);
    assert_eq!(hsm.get_public_key("terminal").unwrap(), public);

    let generated = hsm.get_generation_date("terminal").unwrap();
    let expires = hsm.get_expiration_date("terminal").unwrap();
    assert_eq!(generated.checked_add_months(Months::new(6)), Some(expires));
    assert!((Utc::now() - generated).num_seconds() < 60);
}

#[test]
fn test_alias_exists_and_replace() {
    let hsm = ready();
    let first = hsm
        .generate_key_pair("EC", &p256(), "k", None, false, 1)
        .unwrap();
    let err = hsm
        .generate_key_pair("EC", &p256(), "k", None, false, 1)
        .unwrap_err();
    assert_eq!(err, Error::AliasExists { alias: "k".into() });
    assert_eq!(hsm.get_public_key("k").unwrap(), first);

    let second = hsm
        .generate_key_pair("EC", &p256(), "k", None, true, 1)
        .unwrap();
    assert_ne!(first, second);
    assert_eq!(hsm.get_public_key("k").unwrap(), second);
    assert_eq!(hsm.get_aliases().unwrap().len(), 1);
}

#[test]
fn test_rsa_generation_rejected() {
    let hsm = ready();
    let err = hsm
        .generate_key_pair("RSA", &KeySpec::Rsa { modulus_bits: 2048 }, "rsa", None, false, 1)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));

    let mismatch = hsm
        .generate_key_pair("RSA", &p256(), "rsa", None, false, 1)
        .unwrap_err();
    assert!(matches!(mismatch, Error::InvalidArgument { .. }));
    assert!(!hsm.contains_key("rsa").unwrap());
}

#[test]
fn test_sign_ta_ecdsa_is_raw() {
    let hsm = ready();
    let public = hsm
        .generate_key_pair("EC", &p256(), "ta", None, false, 1)
        .unwrap();
    let signature = hsm
        .sign("ta", &oid(oids::TA_ECDSA_SHA_256), b"hello")
        .unwrap();
    assert_eq!(signature.len(), 64);
    let key = public.as_ec().unwrap();
    assert!(verify_signature(&signature, b"hello", key, "SHA-256"));
    assert!(!verify_signature(&signature, b"hellp", key, "SHA-256"));
}

#[test]
fn test_sign_x509_ecdsa_is_der() {
    let hsm = ready();
    let public = hsm
        .generate_key_pair("EC", &KeySpec::standardized_curve(15).unwrap(), "x", None, false, 1)
        .unwrap();
    let der = hsm
        .sign("x", &oid(oids::ECDSA_WITH_SHA384), b"payload")
        .unwrap();
    assert_eq!(der[0], 0x30);
    let raw = der_to_raw(&der, 48).unwrap();
    assert!(verify_signature(&raw, b"payload", public.as_ec().unwrap(), "SHA-384"));
}

#[test]
fn test_sign_errors() {
    let hsm = ready();
    hsm.generate_key_pair("EC", &p256(), "k", None, false, 1)
        .unwrap();

    let unknown = hsm.sign("k", &oid(&[1, 2, 3, 4]), b"x").unwrap_err();
    assert!(matches!(unknown, Error::InvalidArgument { context: "sign", .. }));

    let rsa = hsm
        .sign("k", &oid(oids::TA_RSA_V1_5_SHA_256), b"x")
        .unwrap_err();
    assert!(matches!(rsa, Error::InvalidArgument { .. }));

    let missing = hsm
        .sign("nope", &oid(oids::TA_ECDSA_SHA_256), b"x")
        .unwrap_err();
    assert!(missing.is_key_not_found());
}

#[test]
fn test_delete_key() {
    let hsm = ready();
    hsm.generate_key_pair("EC", &p256(), "k", None, false, 1)
        .unwrap();
    hsm.delete_key("k").unwrap();
    assert!(!hsm.contains_key("k").unwrap());
    assert!(hsm.delete_key("k").unwrap_err().is_key_not_found());
    assert!(hsm.get_public_key("k").unwrap_err().is_key_not_found());
    assert!(hsm.get_generation_date("k").unwrap_err().is_key_not_found());
    assert!(hsm.get_expiration_date("k").unwrap_err().is_key_not_found());
    assert!(hsm.export_key("k").unwrap_err().is_key_not_found());
}

#[test]
fn test_issuer_signed_chain() {
    let hsm = ready();
    let root = hsm
        .generate_key_pair("EC", &KeySpec::standardized_curve(16).unwrap(), "root", None, false, 24)
        .unwrap();
    hsm.generate_key_pair("EC", &p256(), "leaf", Some("root"), false, 12)
        .unwrap();

    let chain = hsm.get_certificate_chain("leaf").unwrap();
    assert_eq!(chain.len(), 2);
    let leaf = X509Certificate::from_der(&chain[0]).unwrap();
    let issuer = X509Certificate::from_der(&chain[1]).unwrap();
    assert_eq!(leaf.subject(), "leaf");
    assert_eq!(leaf.issuer(), "root");
    assert!(leaf.signature_algorithm().is(oids::ECDSA_WITH_SHA384));
    assert!(leaf.verify(root.as_ec().unwrap()));
    assert!(issuer.is_self_issued());
}

#[test]
fn test_missing_issuer_falls_back_to_self_signed() {
    let hsm = ready();
    let public = hsm
        .generate_key_pair("EC", &p256(), "orphan", Some("ghost"), false, 1)
        .unwrap();
    let chain = hsm.get_certificate_chain("orphan").unwrap();
    assert_eq!(chain.len(), 1);
    let cert = X509Certificate::from_der(&chain[0]).unwrap();
    assert!(cert.is_self_issued());
    assert!(cert.verify(public.as_ec().unwrap()));
}

#[test]
fn test_export_import_between_instances() {
    let source = ready();
    let target = ready();
    let public = source
        .generate_key_pair("EC", &p256(), "shared", None, false, 3)
        .unwrap();

    let package = source.export_key("shared").unwrap();
    target.import_key("shared", &package).unwrap();

    assert_eq!(target.get_public_key("shared").unwrap(), public);
    assert_eq!(
        target.get_expiration_date("shared").unwrap(),
        source.get_expiration_date("shared").unwrap()
    );
    let signature = target
        .sign("shared", &oid(oids::TA_ECDSA_SHA_256), b"from peer")
        .unwrap();
    assert!(verify_signature(&signature, b"from peer", public.as_ec().unwrap(), "SHA-256"));
}

#[test]
fn test_single_instance_cluster_semantics() {
    let hsm = ready();
    hsm.generate_key_pair("EC", &p256(), "k", None, false, 1)
        .unwrap();
    assert!(!hsm.is_key_being_modified("k").unwrap());
    hsm.distribute_key("k").unwrap();
    assert!(hsm.contains_key("k").unwrap());
}

#[test]
fn test_empty_alias_rejected() {
    let hsm = ready();
    let err = hsm
        .generate_key_pair("EC", &p256(), "", None, false, 1)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
}
