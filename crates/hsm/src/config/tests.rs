use super::*;

#[test]
fn test_no_hsm_from_toml() {
    let config = HsmConfiguration::from_toml_str(r#"type = "no-hsm""#).unwrap();
    assert_eq!(config, HsmConfiguration::NoHsm);
    assert_eq!(config.kind(), "no-hsm");
}

#[test]
fn test_pkcs11_from_toml() {
    let config = HsmConfiguration::from_toml_str(
        r#"
        type = "pkcs11"
        config_file_path = "/etc/eidcrypt/pkcs11.cfg"
        password = "123456"
        "#,
    )
    .unwrap();
    assert_eq!(
        config,
        HsmConfiguration::pkcs11("/etc/eidcrypt/pkcs11.cfg", "123456")
    );
    assert_eq!(config.kind(), "pkcs11");
}

#[test]
fn test_unknown_backend_rejected() {
    let err = HsmConfiguration::from_toml_str(r#"type = "tpm""#).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
}

#[test]
fn test_pkcs11_missing_password_rejected() {
    let err = HsmConfiguration::from_toml_str(
        r#"
        type = "pkcs11"
        config_file_path = "/tmp/p11.cfg"
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
}

#[test]
fn test_toml_round_trip() {
    let config = HsmConfiguration::pkcs11("/opt/hsm/provider.cfg", "pin");
    let text = toml::to_string(&config).unwrap();
    assert!(text.contains("type = \"pkcs11\""));
    assert_eq!(HsmConfiguration::from_toml_str(&text).unwrap(), config);
}

#[test]
fn test_debug_redacts_password() {
    let config = HsmConfiguration::pkcs11("/opt/hsm/provider.cfg", "top-secret-pin");
    let shown = format!("{:?}", config);
    assert!(!shown.contains("top-secret-pin"));
    assert!(shown.contains("provider.cfg"));
}

#[test]
fn test_provider_config_parse() {
    let config = Pkcs11ProviderConfig::parse(
        "# SoftHSM test token\n\
         name = SoftHSM\n\
         library = /usr/lib/softhsm/libsofthsm2.so\n\
         \n\
         slotListIndex = 1\n\
         attributes = compatibility\n",
    )
    .unwrap();
    assert_eq!(
        config.library,
        PathBuf::from("/usr/lib/softhsm/libsofthsm2.so")
    );
    assert_eq!(config.slot_list_index, Some(1));
    assert_eq!(config.slot, None);
    assert_eq!(config.name.as_deref(), Some("SoftHSM"));
    assert!(!config.extractable_keys);
}

#[test]
fn test_provider_config_slot() {
    let config =
        Pkcs11ProviderConfig::parse("library=/lib/p11.so\nslot = 42\nextractableKeys = true")
            .unwrap();
    assert_eq!(config.slot, Some(42));
    assert!(config.extractable_keys);
}

#[test]
fn test_provider_config_errors() {
    let missing = Pkcs11ProviderConfig::parse("name = x\n").unwrap_err();
    assert!(matches!(missing, Error::InvalidArgument { .. }));

    let both = Pkcs11ProviderConfig::parse("library = /a.so\nslot = 1\nslotListIndex = 0")
        .unwrap_err();
    assert!(matches!(both, Error::InvalidArgument { .. }));

    let not_a_number = Pkcs11ProviderConfig::parse("library = /a.so\nslot = first").unwrap_err();
    assert!(not_a_number.to_string().contains("slot"));

    let garbage = Pkcs11ProviderConfig::parse("library /a.so").unwrap_err();
    assert!(garbage.to_string().contains("line 1"));
}

#[test]
fn test_provider_config_missing_file() {
    let err = Pkcs11ProviderConfig::load("/nonexistent/eidcrypt/p11.cfg").unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
}

#[test]
fn test_retry_policy_default() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.max_attempts, 3);
    assert_eq!(policy.backoff, Duration::from_millis(200));
    assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts, 1);
    assert_eq!(RetryPolicy::no_retry().max_attempts, 1);
}
