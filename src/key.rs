//! Dynamic key model: the `Key` union, the hash-token resolution ladder,
//! two-tier equality, and the capability traits the maps dispatch on.

use crate::error::UnsupportedKey;
use core::cmp::Ordering;
use core::fmt;
use std::any::Any;
use std::rc::Rc;

/// Stable hash token a key resolves to; bucket identity in `HashMap`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum HashToken {
    Int(i64),
    Str(String),
}

/// Key type carrying a custom hash token and equality rule.
///
/// `equals` receives the other key as a trait object; implementations
/// downcast through `as_any` to reach the concrete payload. A `Hashable`
/// key may declare two distinct instances equal (they then act as the
/// same map key) or unequal (they then coexist in one bucket).
pub trait Hashable {
    fn hash_code(&self) -> HashToken;
    fn equals(&self, other: &dyn Hashable) -> bool;
    fn as_any(&self) -> &dyn Any;
}

/// Key type carrying its own three-way ordering.
pub trait Comparable {
    fn compare_to(&self, other: &dyn Comparable) -> Ordering;
    fn as_any(&self) -> &dyn Any;
}

/// Externally supplied ordering for a `TreeMap`. Takes precedence over
/// `Comparable` when present. The tree invokes
/// `compare(stored_key, probe_key)` and descends left on `Less`.
pub trait Comparator {
    fn compare(&self, first: &Key, second: &Key) -> Ordering;
}

impl<F> Comparator for F
where
    F: Fn(&Key, &Key) -> Ordering,
{
    fn compare(&self, first: &Key, second: &Key) -> Ordering {
        self(first, second)
    }
}

/// Object-like key identified by its allocation, not its contents.
///
/// Clones share the identity; two separately constructed payloads never
/// compare equal even when their contents match.
#[derive(Clone)]
pub struct ObjectKey(Rc<dyn Any>);

impl ObjectKey {
    pub fn new(payload: Rc<dyn Any>) -> Self {
        ObjectKey(payload)
    }

    /// Per-instance identity token, stable while any clone is alive.
    pub fn identity(&self) -> usize {
        Rc::as_ptr(&self.0).cast::<u8>() as usize
    }

    pub fn same_instance(&self, other: &ObjectKey) -> bool {
        self.identity() == other.identity()
    }

    pub fn payload(&self) -> &dyn Any {
        self.0.as_ref()
    }
}

fn rc_identity<T: ?Sized>(rc: &Rc<T>) -> usize {
    Rc::as_ptr(rc).cast::<u8>() as usize
}

/// The key union both maps accept. Scalars carry their value; object-like
/// variants carry shared capability objects; `Resource` and `Composite`
/// exist to be rejected by the hash map's token ladder.
#[derive(Clone)]
pub enum Key {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Object(ObjectKey),
    Hashable(Rc<dyn Hashable>),
    Comparable(Rc<dyn Comparable>),
    Resource(u64),
    Composite(Vec<Key>),
}

impl Key {
    pub fn object(payload: Rc<dyn Any>) -> Self {
        Key::Object(ObjectKey::new(payload))
    }

    pub fn hashable<H: Hashable + 'static>(key: H) -> Self {
        Key::Hashable(Rc::new(key))
    }

    pub fn comparable<C: Comparable + 'static>(key: C) -> Self {
        Key::Comparable(Rc::new(key))
    }

    /// Resolve the stable hash token for this key.
    ///
    /// Priority ladder: `Hashable` token, object instance identity,
    /// int/string verbatim, float truncated toward zero (lossy, mirrors
    /// native array key coercion), bool as 0/1, null as the empty-string
    /// sentinel. Resource handles and composite values have no stable
    /// token and are rejected.
    pub fn hash_token(&self) -> Result<HashToken, UnsupportedKey> {
        match self {
            Key::Hashable(key) => Ok(key.hash_code()),
            Key::Object(key) => Ok(HashToken::Int(key.identity() as i64)),
            Key::Comparable(key) => Ok(HashToken::Int(rc_identity(key) as i64)),
            Key::Int(value) => Ok(HashToken::Int(*value)),
            Key::Str(value) => Ok(HashToken::Str(value.clone())),
            Key::Float(value) => Ok(HashToken::Int(value.trunc() as i64)),
            Key::Bool(value) => Ok(HashToken::Int(i64::from(*value))),
            Key::Null => Ok(HashToken::Str(String::new())),
            Key::Resource(_) | Key::Composite(_) => Err(UnsupportedKey::new(self)),
        }
    }

    /// Two-tier key equality: when both keys are `Hashable` the first
    /// key's `equals` decides; everything else is strict same-variant
    /// value (or instance) equality.
    pub fn equals(&self, other: &Key) -> bool {
        if let (Key::Hashable(first), Key::Hashable(second)) = (self, other) {
            return first.equals(second.as_ref());
        }
        self.strict_eq(other)
    }

    fn strict_eq(&self, other: &Key) -> bool {
        match (self, other) {
            (Key::Null, Key::Null) => true,
            (Key::Bool(a), Key::Bool(b)) => a == b,
            (Key::Int(a), Key::Int(b)) => a == b,
            // IEEE equality: a NaN key is unequal to itself.
            (Key::Float(a), Key::Float(b)) => a == b,
            (Key::Str(a), Key::Str(b)) => a == b,
            (Key::Object(a), Key::Object(b)) => a.same_instance(b),
            (Key::Comparable(a), Key::Comparable(b)) => rc_identity(a) == rc_identity(b),
            (Key::Resource(a), Key::Resource(b)) => a == b,
            (Key::Composite(a), Key::Composite(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.equals(y))
            }
            _ => false,
        }
    }

    /// Scalars participate in the tree map's default ordering.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Key::Bool(_) | Key::Int(_) | Key::Float(_) | Key::Str(_)
        )
    }

    /// Type descriptor used in error diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Key::Null => "null",
            Key::Bool(_) => "bool",
            Key::Int(_) => "int",
            Key::Float(_) => "float",
            Key::Str(_) => "string",
            Key::Object(_) => "object",
            Key::Hashable(_) => "hashable object",
            Key::Comparable(_) => "comparable object",
            Key::Resource(_) => "resource",
            Key::Composite(_) => "array",
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Str(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Null => f.write_str("null"),
            Key::Bool(value) => write!(f, "{value}"),
            Key::Int(value) => write!(f, "{value}"),
            Key::Float(value) => write!(f, "{value}"),
            Key::Str(value) => write!(f, "{value:?}"),
            Key::Object(key) => write!(f, "object@{:x}", key.identity()),
            Key::Hashable(key) => write!(f, "hashable({:?})", key.hash_code()),
            Key::Comparable(key) => write!(f, "comparable@{:x}", rc_identity(key)),
            Key::Resource(handle) => write!(f, "resource#{handle}"),
            Key::Composite(items) => f.debug_list().entries(items.iter()).finish(),
        }
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key::Int(i64::from(value))
    }
}

impl From<f64> for Key {
    fn from(value: f64) -> Self {
        Key::Float(value)
    }
}

impl From<bool> for Key {
    fn from(value: bool) -> Self {
        Key::Bool(value)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Str(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Str(value)
    }
}
