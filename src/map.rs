//! The operation contract both map implementations satisfy.

use crate::key::Key;
use crate::series::Series;

/// Shared map contract.
///
/// `get`/`remove` report an absent key as `Ok(None)`; errors are reserved
/// for keys the implementation cannot identify at all. Each
/// implementation names its failure mode in `Error`, so the fallible
/// surface stays visible in the signature.
pub trait Map<V> {
    type Error: std::error::Error;

    /// Value stored under `key`, if any.
    fn get(&self, key: &Key) -> Result<Option<&V>, Self::Error>;

    /// Insert or overwrite; returns the previous value on overwrite.
    fn put(&mut self, key: Key, value: V) -> Result<Option<V>, Self::Error>;

    /// Detach and return the value stored under `key`, if any.
    fn remove(&mut self, key: &Key) -> Result<Option<V>, Self::Error>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All values, in the implementation's iteration order.
    fn values(&self) -> Series<&V>;
}
