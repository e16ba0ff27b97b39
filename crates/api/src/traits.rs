//! Contracts supplied by the embedding application

/// Read access to the cluster-wide key modification lock
///
/// Instances sharing one logical HSM identity coordinate key changes
/// through an external, database-backed lock. The core never takes or
/// releases the lock itself; it only asks who holds it.
pub trait KeyLockOracle: Send + Sync {
    /// Whether any instance currently holds the change lock for `alias`
    fn lock_exists(&self, alias: &str) -> bool;

    /// Whether this instance is the holder of the change lock for `alias`
    fn i_have_lock(&self, alias: &str) -> bool;
}

/// Oracle for a single-instance deployment: nobody else can hold a lock
#[derive(Debug, Default, Clone, Copy)]
pub struct SingleInstance;

impl KeyLockOracle for SingleInstance {
    fn lock_exists(&self, _alias: &str) -> bool {
        false
    }

    fn i_have_lock(&self, _alias: &str) -> bool {
        true
    }
}
