//! Several service instances sharing one logical HSM identity
//!
//! [`ClusteredHsm`] fronts the local member and knows the peer members.
//! Key changes are coordinated through a [`KeyLockOracle`]: only the holder
//! of an alias's change lock may generate, delete or distribute that key,
//! and other instances report the key as being modified while someone else
//! holds the lock.
//!
//! Distribution copies the local key to every peer. A peer that keeps
//! failing after the retry policy is exhausted causes the key to be
//! removed from every member, so a key is never left on only some of them.
//! Deletion retries each peer under the same policy and removes the local
//! copy last; a failed deletion can simply be repeated.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use eidcrypt_algorithms::Oid;
use eidcrypt_api::{Error, KeyLockOracle, Result};
use tracing::{debug, error, info, warn};

use crate::config::{HsmConfiguration, RetryPolicy};
use crate::keys::{KeyPackage, KeySpec, PublicKey};
use crate::service::{ensure_ready, HsmService};

/// Cluster of HSM service instances
pub struct ClusteredHsm {
    local: Arc<dyn HsmService>,
    peers: Vec<Arc<dyn HsmService>>,
    oracle: Arc<dyn KeyLockOracle>,
    retry: RetryPolicy,
}

impl ClusteredHsm {
    /// Cluster around `local` with no peers yet
    pub fn new(local: Arc<dyn HsmService>, oracle: Arc<dyn KeyLockOracle>) -> Self {
        Self {
            local,
            peers: Vec::new(),
            oracle,
            retry: RetryPolicy::default(),
        }
    }

    /// Add a peer member
    pub fn with_peer(mut self, peer: Arc<dyn HsmService>) -> Self {
        self.peers.push(peer);
        self
    }

    /// Replace the retry policy used for distribution
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// The local member
    pub fn local(&self) -> &Arc<dyn HsmService> {
        &self.local
    }

    /// The peer members
    pub fn peers(&self) -> &[Arc<dyn HsmService>] {
        &self.peers
    }

    fn require_lock(&self, alias: &str, operation: &'static str) -> Result<()> {
        ensure_ready(self.local.is_initialized(), operation)?;
        if !self.oracle.i_have_lock(alias) {
            return Err(Error::illegal_state(
                operation,
                format!("this instance does not hold the change lock for {}", alias),
            ));
        }
        Ok(())
    }

    /// Run `operation` against one peer until it succeeds or the retry
    /// policy is exhausted
    fn with_retry<F>(
        &self,
        peer_index: usize,
        action: &'static str,
        alias: &str,
        mut operation: F,
    ) -> Result<()>
    where
        F: FnMut() -> Result<()>,
    {
        let mut attempt = 1;
        loop {
            match operation() {
                Ok(()) => return Ok(()),
                Err(err) if attempt < self.retry.max_attempts => {
                    warn!(
                        alias,
                        peer = peer_index,
                        attempt,
                        action,
                        error = %err,
                        "peer operation failed, retrying"
                    );
                    std::thread::sleep(self.retry.backoff);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Delete on one peer; a peer without the key counts as done
    fn delete_on_peer(&self, peer_index: usize, peer: &dyn HsmService, alias: &str) -> Result<()> {
        self.with_retry(peer_index, "delete_key", alias, || match peer.delete_key(alias) {
            Err(err) if err.is_key_not_found() => Ok(()),
            other => other,
        })
    }

    /// Log out the members a failed `init` brought up
    fn undo_init(&self, local_started: bool, started_peers: &[usize]) {
        for &index in started_peers {
            if let Err(err) = self.peers[index].logout() {
                warn!(peer = index, error = %err, "could not log out peer after failed init");
            }
        }
        if local_started {
            if let Err(err) = self.local.logout() {
                warn!(error = %err, "could not log out local member after failed init");
            }
        }
    }

    /// Remove `alias` from every member after a failed distribution
    fn rollback(&self, alias: &str) {
        let members = std::iter::once(&self.local).chain(self.peers.iter());
        for (index, member) in members.enumerate() {
            match member.delete_key(alias) {
                Ok(()) => {}
                Err(err) if err.is_key_not_found() => {}
                Err(err) => {
                    error!(alias, member = index, error = %err, "rollback could not delete key")
                }
            }
        }
    }
}

impl HsmService for ClusteredHsm {
    fn init(&self, config: &HsmConfiguration) -> Result<()> {
        let local_started = !self.local.is_initialized();
        if local_started {
            self.local.init(config)?;
        }
        let mut started_peers = Vec::new();
        for (index, peer) in self.peers.iter().enumerate() {
            if peer.is_initialized() {
                continue;
            }
            if let Err(err) = peer.init(config) {
                self.undo_init(local_started, &started_peers);
                error!(peer = index, error = %err, "peer init failed, cluster left uninitialized");
                return Err(err);
            }
            debug!(peer = index, "initialized peer");
            started_peers.push(index);
        }
        info!(peers = self.peers.len(), "HSM cluster initialized");
        Ok(())
    }

    fn logout(&self) -> Result<()> {
        self.local.logout()?;
        for (index, peer) in self.peers.iter().enumerate() {
            if peer.is_initialized() {
                if let Err(err) = peer.logout() {
                    warn!(peer = index, error = %err, "peer logout failed");
                }
            }
        }
        info!("HSM cluster logged out");
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.local.is_initialized()
    }

    fn is_alive(&self, all: bool) -> Result<bool> {
        if !self.local.is_alive(all)? {
            return Ok(false);
        }
        if !all {
            return Ok(true);
        }
        Ok(self
            .peers
            .iter()
            .all(|peer| peer.is_alive(true).unwrap_or(false)))
    }

    fn generate_key_pair(
        &self,
        algorithm: &str,
        spec: &KeySpec,
        alias: &str,
        issuer_alias: Option<&str>,
        replace: bool,
        lifespan_months: u32,
    ) -> Result<PublicKey> {
        self.require_lock(alias, "generate_key_pair")?;
        self.local.generate_key_pair(
            algorithm,
            spec,
            alias,
            issuer_alias,
            replace,
            lifespan_months,
        )
    }

    fn sign(&self, alias: &str, algorithm: &Oid, data: &[u8]) -> Result<Vec<u8>> {
        self.local.sign(alias, algorithm, data)
    }

    fn get_aliases(&self) -> Result<Vec<String>> {
        self.local.get_aliases()
    }

    fn contains_key(&self, alias: &str) -> Result<bool> {
        self.local.contains_key(alias)
    }

    fn delete_key(&self, alias: &str) -> Result<()> {
        self.require_lock(alias, "delete_key")?;
        if !self.local.contains_key(alias)? {
            return Err(Error::KeyNotFound {
                alias: alias.to_string(),
            });
        }
        let mut failed = Vec::new();
        for (index, peer) in self.peers.iter().enumerate() {
            if let Err(err) = self.delete_on_peer(index, peer.as_ref(), alias) {
                warn!(alias, peer = index, error = %err, "peer could not delete key");
                failed.push(index);
            }
        }
        // the local copy stays until every peer is clean so the call can be repeated
        if !failed.is_empty() {
            return Err(Error::hsm(
                "delete_key",
                format!("key {} still present locally and on peers {:?}", alias, failed),
            ));
        }
        self.local.delete_key(alias)?;
        info!(alias, "deleted key on all members");
        Ok(())
    }

    fn get_public_key(&self, alias: &str) -> Result<PublicKey> {
        self.local.get_public_key(alias)
    }

    fn get_certificate_chain(&self, alias: &str) -> Result<Vec<Vec<u8>>> {
        self.local.get_certificate_chain(alias)
    }

    fn get_generation_date(&self, alias: &str) -> Result<DateTime<Utc>> {
        self.local.get_generation_date(alias)
    }

    fn get_expiration_date(&self, alias: &str) -> Result<DateTime<Utc>> {
        self.local.get_expiration_date(alias)
    }

    fn export_key(&self, alias: &str) -> Result<KeyPackage> {
        self.local.export_key(alias)
    }

    fn import_key(&self, alias: &str, package: &KeyPackage) -> Result<()> {
        self.local.import_key(alias, package)
    }

    fn is_key_being_modified(&self, alias: &str) -> Result<bool> {
        ensure_ready(self.local.is_initialized(), "is_key_being_modified")?;
        Ok(self.oracle.lock_exists(alias) && !self.oracle.i_have_lock(alias))
    }

    fn distribute_key(&self, alias: &str) -> Result<()> {
        self.require_lock(alias, "distribute_key")?;
        let package = self.local.export_key(alias)?;
        for (index, peer) in self.peers.iter().enumerate() {
            let imported =
                self.with_retry(index, "import_key", alias, || peer.import_key(alias, &package));
            if let Err(err) = imported {
                self.rollback(alias);
                error!(
                    alias,
                    peer = index,
                    error = %err,
                    "key distribution failed, key removed from all members"
                );
                return Err(Error::hsm(
                    "distribute_key",
                    format!("peer {} did not accept key {}: {}", index, alias, err),
                ));
            }
        }
        info!(alias, peers = self.peers.len(), "distributed key");
        Ok(())
    }
}
