//! Key lifecycle through the factory-built service

use eidcrypt_algorithms::asn1::Oid;
use eidcrypt_api::Error;
use eidcrypt_hsm::{create_hsm_service, HsmConfiguration, HsmService, KeySpec};
use eidcrypt_params::traditional::oids;

fn ready_service() -> Box<dyn HsmService> {
    let config = HsmConfiguration::from_toml_str(r#"type = "no-hsm""#).unwrap();
    let hsm = create_hsm_service(&config).unwrap();
    hsm.init(&config).unwrap();
    hsm
}

fn p256() -> KeySpec {
    KeySpec::standardized_curve(12).unwrap()
}

#[test]
fn test_everything_but_init_needs_ready_state() {
    let hsm = create_hsm_service(&HsmConfiguration::NoHsm).unwrap();
    let ta = Oid::from_arcs(oids::TA_ECDSA_SHA_256).unwrap();

    assert!(!hsm.is_initialized());
    let failures = [
        hsm.get_aliases().err(),
        hsm.contains_key("k").err(),
        hsm.sign("k", &ta, b"data").err(),
        hsm.delete_key("k").err(),
        hsm.is_alive(false).err(),
        hsm.generate_key_pair("EC", &p256(), "k", None, false, 1).err(),
    ];
    for failure in failures {
        assert!(matches!(failure, Some(Error::IllegalState { .. })));
    }
}

#[test]
fn test_generate_replace_delete() {
    let hsm = ready_service();
    let first = hsm
        .generate_key_pair("ECDSA", &p256(), "terminal", None, false, 12)
        .unwrap();

    let err = hsm
        .generate_key_pair("ECDSA", &p256(), "terminal", None, false, 12)
        .unwrap_err();
    assert!(matches!(err, Error::AliasExists { ref alias } if alias == "terminal"));
    assert_eq!(hsm.get_public_key("terminal").unwrap(), first);

    let second = hsm
        .generate_key_pair("ECDSA", &p256(), "terminal", None, true, 12)
        .unwrap();
    assert_ne!(second, first);
    assert_eq!(hsm.get_public_key("terminal").unwrap(), second);
    assert_eq!(hsm.get_aliases().unwrap(), vec!["terminal".to_string()]);

    hsm.delete_key("terminal").unwrap();
    assert!(!hsm.contains_key("terminal").unwrap());
    assert!(hsm.get_public_key("terminal").unwrap_err().is_key_not_found());
}

#[test]
fn test_validity_window_follows_lifespan() {
    let hsm = ready_service();
    hsm.generate_key_pair("EC", &p256(), "short", None, false, 1)
        .unwrap();
    hsm.generate_key_pair("EC", &p256(), "long", None, false, 36)
        .unwrap();

    let start = hsm.get_generation_date("short").unwrap();
    let short = hsm.get_expiration_date("short").unwrap();
    let long = hsm.get_expiration_date("long").unwrap();
    assert!(start < short);
    assert!(short < long);
    assert!((long - hsm.get_generation_date("long").unwrap()).num_days() >= 3 * 365);
}

#[test]
fn test_signature_format_follows_oid() {
    let hsm = ready_service();
    let spec = KeySpec::standardized_curve(18).unwrap();
    hsm.generate_key_pair("EC", &spec, "p521", None, false, 1)
        .unwrap();

    let ta = Oid::from_arcs(oids::TA_ECDSA_SHA_512).unwrap();
    assert_eq!(hsm.sign("p521", &ta, b"data").unwrap().len(), 132);

    let x509 = Oid::from_arcs(oids::ECDSA_WITH_SHA512).unwrap();
    let der = hsm.sign("p521", &x509, b"data").unwrap();
    assert_eq!(der[0], 0x30);

    let unknown: Oid = "1.2.3.4".parse().unwrap();
    assert!(matches!(
        hsm.sign("p521", &unknown, b"data"),
        Err(Error::InvalidArgument { .. })
    ));
}

#[test]
fn test_relogin_keeps_software_keys() {
    let hsm = ready_service();
    hsm.generate_key_pair("EC", &p256(), "kept", None, false, 1)
        .unwrap();
    hsm.logout().unwrap();
    assert!(matches!(hsm.logout(), Err(Error::IllegalState { .. })));

    hsm.init(&HsmConfiguration::NoHsm).unwrap();
    assert!(hsm.contains_key("kept").unwrap());
}

#[test]
fn test_pkcs11_config_rejected_by_software_backend() {
    let hsm = create_hsm_service(&HsmConfiguration::NoHsm).unwrap();
    let config = HsmConfiguration::from_toml_str(
        r#"
        type = "pkcs11"
        config_file_path = "/etc/eidcrypt/p11.cfg"
        password = "123456"
        "#,
    )
    .unwrap();
    assert!(matches!(
        hsm.init(&config),
        Err(Error::InvalidArgument { .. })
    ));
    assert!(!hsm.is_initialized());
}
