//! Failure taxonomy. One small type per failure mode so each map's
//! fallible surface names exactly what can go wrong.

use crate::key::Key;
use core::fmt;

/// The hash map cannot derive a stable hash token for this key.
///
/// Raised for resource handles and composite (array-like) keys. This is a
/// permanent rejection of the key type, not a transient condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedKey {
    key_type: &'static str,
}

impl UnsupportedKey {
    pub(crate) fn new(key: &Key) -> Self {
        UnsupportedKey {
            key_type: key.type_name(),
        }
    }

    /// Type descriptor of the rejected key.
    pub fn key_type(&self) -> &'static str {
        self.key_type
    }
}

impl fmt::Display for UnsupportedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no stable hash token for {} keys", self.key_type)
    }
}

impl std::error::Error for UnsupportedKey {}

/// No ordering could be established between two keys.
///
/// Carries both operands' type descriptors for diagnosis. Non-retryable
/// unless the map is rebuilt with an explicit comparator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomparableKeys {
    first_type: &'static str,
    second_type: &'static str,
}

impl IncomparableKeys {
    pub(crate) fn new(first: &Key, second: &Key) -> Self {
        IncomparableKeys {
            first_type: first.type_name(),
            second_type: second.type_name(),
        }
    }

    pub fn first_type(&self) -> &'static str {
        self.first_type
    }

    pub fn second_type(&self) -> &'static str {
        self.second_type
    }
}

impl fmt::Display for IncomparableKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "could not compare {} to {}",
            self.first_type, self.second_type
        )
    }
}

impl std::error::Error for IncomparableKeys {}

/// `first()`/`last()` was invoked on an empty sequenced map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoSuchElement;

impl fmt::Display for NoSuchElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("map contains no entries")
    }
}

impl std::error::Error for NoSuchElement {}
