//! Two cluster nodes coordinating through a shared lock table

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use eidcrypt_algorithms::asn1::Oid;
use eidcrypt_algorithms::ec::verify_signature;
use eidcrypt_api::{Error, KeyLockOracle, SingleInstance};
use eidcrypt_hsm::{ClusteredHsm, HsmConfiguration, HsmService, KeySpec, LocalHsmService, RetryPolicy};
use eidcrypt_params::traditional::oids;

/// Lock rows keyed by alias, holding the owning node's name
#[derive(Default)]
struct LockTable {
    rows: Mutex<HashMap<String, &'static str>>,
}

impl LockTable {
    fn take(&self, alias: &str, node: &'static str) {
        self.rows.lock().unwrap().insert(alias.to_string(), node);
    }

    fn release(&self, alias: &str) {
        self.rows.lock().unwrap().remove(alias);
    }
}

/// One node's view of the shared table
struct NodeLock {
    table: Arc<LockTable>,
    node: &'static str,
}

impl KeyLockOracle for NodeLock {
    fn lock_exists(&self, alias: &str) -> bool {
        self.table.rows.lock().unwrap().contains_key(alias)
    }

    fn i_have_lock(&self, alias: &str) -> bool {
        self.table.rows.lock().unwrap().get(alias) == Some(&self.node)
    }
}

struct Deployment {
    table: Arc<LockTable>,
    a: ClusteredHsm,
    b: ClusteredHsm,
}

fn deployment() -> Deployment {
    let table = Arc::new(LockTable::default());
    let a_local: Arc<dyn HsmService> = Arc::new(LocalHsmService::new());
    let b_local: Arc<dyn HsmService> = Arc::new(LocalHsmService::new());
    let retry = RetryPolicy::new(2, Duration::from_millis(1));

    let a = ClusteredHsm::new(
        a_local.clone(),
        Arc::new(NodeLock { table: table.clone(), node: "a" }),
    )
    .with_peer(b_local.clone())
    .with_retry_policy(retry);
    let b = ClusteredHsm::new(
        b_local,
        Arc::new(NodeLock { table: table.clone(), node: "b" }),
    )
    .with_peer(a_local)
    .with_retry_policy(retry);

    // initializing one node brings up its peer, the other node's local member
    a.init(&HsmConfiguration::NoHsm).unwrap();
    assert!(b.is_initialized());
    Deployment { table, a, b }
}

#[test]
fn test_key_rollout_between_nodes() {
    let Deployment { table, a, b } = deployment();
    let spec = KeySpec::standardized_curve(12).unwrap();

    table.take("signer", "a");
    assert!(!a.is_key_being_modified("signer").unwrap());
    assert!(b.is_key_being_modified("signer").unwrap());
    assert!(matches!(
        b.generate_key_pair("EC", &spec, "signer", None, false, 12),
        Err(Error::IllegalState { .. })
    ));

    let public = a
        .generate_key_pair("EC", &spec, "signer", None, false, 12)
        .unwrap();
    assert!(!b.contains_key("signer").unwrap());
    a.distribute_key("signer").unwrap();
    table.release("signer");

    assert!(!b.is_key_being_modified("signer").unwrap());
    assert_eq!(b.get_public_key("signer").unwrap(), public);
    assert_eq!(
        b.get_generation_date("signer").unwrap(),
        a.get_generation_date("signer").unwrap()
    );

    let ta = Oid::from_arcs(oids::TA_ECDSA_SHA_256).unwrap();
    let signature = b.sign("signer", &ta, b"from b").unwrap();
    assert!(verify_signature(&signature, b"from b", public.as_ec().unwrap(), "SHA-256"));
}

#[test]
fn test_lock_handover_and_delete() {
    let Deployment { table, a, b } = deployment();
    let spec = KeySpec::standardized_curve(13).unwrap();

    table.take("k", "a");
    a.generate_key_pair("EC", &spec, "k", None, false, 1)
        .unwrap();
    a.distribute_key("k").unwrap();

    // b takes over and removes the key everywhere
    table.take("k", "b");
    assert!(a.is_key_being_modified("k").unwrap());
    assert!(matches!(a.delete_key("k"), Err(Error::IllegalState { .. })));
    b.delete_key("k").unwrap();
    assert!(!a.contains_key("k").unwrap());
    assert!(!b.contains_key("k").unwrap());
}

#[test]
fn test_single_instance_cluster() {
    let cluster = ClusteredHsm::new(Arc::new(LocalHsmService::new()), Arc::new(SingleInstance));
    cluster.init(&HsmConfiguration::NoHsm).unwrap();
    let spec = KeySpec::standardized_curve(8).unwrap();

    cluster
        .generate_key_pair("EC", &spec, "solo", None, false, 1)
        .unwrap();
    assert!(!cluster.is_key_being_modified("solo").unwrap());
    cluster.distribute_key("solo").unwrap();
    assert!(cluster.is_alive(true).unwrap());
}
