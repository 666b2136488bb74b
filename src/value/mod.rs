//! Dynamic value model traversed by lens paths.
//!
//! A [`Value`] is an arbitrarily nested, heterogeneous document: scalars,
//! ordered sequences, sorted key-value mappings, and [`Record`] property
//! bags. Containers hold their payload behind a reference-counted pointer,
//! so cloning a `Value` is O(1) and rebuilding a container along a traversal
//! path copies only the nodes on that path. Untouched substructure is shared
//! with the original document, which is what makes the no-op and
//! structural-sharing guarantees of [`Path`](crate::Path) observable via
//! [`Value::shares_identity`].
//!
//! # Examples
//!
//! ```
//! use lenspath::Value;
//!
//! let document = Value::map_from([
//!     ("name", Value::from("alice")),
//!     ("scores", Value::seq([1, 2, 3])),
//! ]);
//!
//! let cheap_copy = document.clone();
//! assert!(document.shares_identity(&cheap_copy));
//! ```

mod record;

#[cfg(feature = "serde")]
mod serde_impls;

pub use record::Record;

use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

// =============================================================================
// Key
// =============================================================================

/// A key into a [`Value::Map`], or an index into a [`Value::Seq`].
///
/// String keys address mapping entries; integer keys address mapping entries
/// *or* sequence offsets, depending on the container they are applied to.
/// Negative integers index a sequence from its end.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    /// An integer key (or sequence index).
    Int(i64),
    /// A string key.
    Str(ReferenceCounter<str>),
}

impl Key {
    /// Returns the string form of this key, if it is a string key.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(name) => Some(name),
            Self::Int(_) => None,
        }
    }

    /// Returns the integer form of this key, if it is an integer key.
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(index) => Some(*index),
            Self::Str(_) => None,
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Self::Str(ReferenceCounter::from(name))
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Self::Str(ReferenceCounter::from(name.as_str()))
    }
}

impl From<i64> for Key {
    fn from(index: i64) -> Self {
        Self::Int(index)
    }
}

impl From<i32> for Key {
    fn from(index: i32) -> Self {
        Self::Int(i64::from(index))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(index) => write!(formatter, "{index}"),
            Self::Str(name) => write!(formatter, "\"{name}\""),
        }
    }
}

// =============================================================================
// ValueKind
// =============================================================================

/// The discriminant of a [`Value`], used in diagnostics and error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// The null scalar.
    Null,
    /// A boolean scalar.
    Bool,
    /// An integer scalar.
    Int,
    /// A floating-point scalar.
    Float,
    /// A string.
    String,
    /// An ordered sequence.
    Seq,
    /// A sorted key-value mapping.
    Map,
    /// A [`Record`] property bag.
    Record,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Seq => "sequence",
            Self::Map => "mapping",
            Self::Record => "record",
        };
        formatter.write_str(name)
    }
}

// =============================================================================
// Value
// =============================================================================

/// A heterogeneous, persistently-shared document value.
///
/// `Value` is the subject type every [`Path`](crate::Path) operation works
/// on. Scalars are stored inline; containers are stored behind
/// reference-counted pointers so that clones and partial rebuilds share
/// structure.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The null scalar.
    Null,
    /// A boolean scalar.
    Bool(bool),
    /// An integer scalar.
    Int(i64),
    /// A floating-point scalar.
    Float(f64),
    /// A shared string.
    String(ReferenceCounter<str>),
    /// An ordered sequence of values.
    Seq(ReferenceCounter<Vec<Value>>),
    /// A sorted mapping from [`Key`]s to values.
    Map(ReferenceCounter<BTreeMap<Key, Value>>),
    /// A [`Record`] property bag.
    Record(ReferenceCounter<Record>),
}

impl Value {
    /// Builds a sequence value from an iterator of elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use lenspath::Value;
    ///
    /// let scores = Value::seq([10, 20, 30]);
    /// assert_eq!(scores.as_seq().map(<[Value]>::len), Some(3));
    /// ```
    pub fn seq<I, T>(elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Self>,
    {
        Self::Seq(ReferenceCounter::new(
            elements.into_iter().map(Into::into).collect(),
        ))
    }

    /// Builds a mapping value from an iterator of key-value pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use lenspath::Value;
    ///
    /// let point = Value::map_from([("x", 1), ("y", 2)]);
    /// assert_eq!(point.kind(), lenspath::ValueKind::Map);
    /// ```
    pub fn map_from<I, K, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<Key>,
        T: Into<Self>,
    {
        Self::Map(ReferenceCounter::new(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        ))
    }

    /// Returns the [`ValueKind`] discriminant of this value.
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::String(_) => ValueKind::String,
            Self::Seq(_) => ValueKind::Seq,
            Self::Map(_) => ValueKind::Map,
            Self::Record(_) => ValueKind::Record,
        }
    }

    /// Returns `true` if this value is [`Value::Null`].
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the boolean payload, if this value is a boolean.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Returns the integer payload, if this value is an integer.
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the floating-point payload, if this value is a float.
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the string payload, if this value is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the elements of this value, if it is a sequence.
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Self::Seq(elements) => Some(elements),
            _ => None,
        }
    }

    /// Returns the entries of this value, if it is a mapping.
    pub fn as_map(&self) -> Option<&BTreeMap<Key, Value>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Returns the record payload, if this value is a record.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Returns `true` when `self` and `other` are the same value *instance*.
    ///
    /// Scalars compare by value; containers compare by pointer identity.
    /// Two containers that are merely equal but separately allocated are
    /// *not* identical. This is the observation used to verify that updates
    /// share untouched structure with the original document.
    ///
    /// # Examples
    ///
    /// ```
    /// use lenspath::Value;
    ///
    /// let original = Value::seq([1, 2, 3]);
    /// let copy = original.clone();
    /// let rebuilt = Value::seq([1, 2, 3]);
    ///
    /// assert!(original.shares_identity(&copy));
    /// assert!(!original.shares_identity(&rebuilt));
    /// ```
    pub fn shares_identity(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Int(left), Self::Int(right)) => left == right,
            (Self::Float(left), Self::Float(right)) => left.to_bits() == right.to_bits(),
            (Self::String(left), Self::String(right)) => ReferenceCounter::ptr_eq(left, right),
            (Self::Seq(left), Self::Seq(right)) => ReferenceCounter::ptr_eq(left, right),
            (Self::Map(left), Self::Map(right)) => ReferenceCounter::ptr_eq(left, right),
            (Self::Record(left), Self::Record(right)) => ReferenceCounter::ptr_eq(left, right),
            _ => false,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<i64> for Value {
    fn from(number: i64) -> Self {
        Self::Int(number)
    }
}

impl From<i32> for Value {
    fn from(number: i32) -> Self {
        Self::Int(i64::from(number))
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Self::Float(number)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::String(ReferenceCounter::from(text))
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::String(ReferenceCounter::from(text.as_str()))
    }
}

impl From<Vec<Value>> for Value {
    fn from(elements: Vec<Value>) -> Self {
        Self::Seq(ReferenceCounter::new(elements))
    }
}

impl From<BTreeMap<Key, Value>> for Value {
    fn from(entries: BTreeMap<Key, Value>) -> Self {
        Self::Map(ReferenceCounter::new(entries))
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::Record(ReferenceCounter::new(record))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => formatter.write_str("null"),
            Self::Bool(flag) => write!(formatter, "{flag}"),
            Self::Int(number) => write!(formatter, "{number}"),
            Self::Float(number) => write!(formatter, "{number}"),
            Self::String(text) => write!(formatter, "\"{text}\""),
            Self::Seq(elements) => {
                formatter.write_str("[")?;
                for (position, element) in elements.iter().enumerate() {
                    if position > 0 {
                        formatter.write_str(", ")?;
                    }
                    write!(formatter, "{element}")?;
                }
                formatter.write_str("]")
            }
            Self::Map(entries) => {
                formatter.write_str("{")?;
                for (position, (key, value)) in entries.iter().enumerate() {
                    if position > 0 {
                        formatter.write_str(", ")?;
                    }
                    write!(formatter, "{key}: {value}")?;
                }
                formatter.write_str("}")
            }
            Self::Record(record) => write!(formatter, "{record}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Construction and Conversion Tests
    // =========================================================================

    #[test]
    fn test_seq_builder_converts_elements() {
        let sequence = Value::seq([1, 2, 3]);
        assert_eq!(
            sequence.as_seq(),
            Some(&[Value::Int(1), Value::Int(2), Value::Int(3)][..])
        );
    }

    #[test]
    fn test_map_builder_accepts_mixed_key_forms() {
        let mapping = Value::map_from([(Key::from("a"), 1), (Key::from(3), 2)]);
        let entries = mapping.as_map().unwrap();
        assert_eq!(entries.get(&Key::from("a")), Some(&Value::Int(1)));
        assert_eq!(entries.get(&Key::from(3)), Some(&Value::Int(2)));
    }

    #[test]
    fn test_kind_reports_discriminant() {
        assert_eq!(Value::Null.kind(), ValueKind::Null);
        assert_eq!(Value::from(true).kind(), ValueKind::Bool);
        assert_eq!(Value::from(1.5).kind(), ValueKind::Float);
        assert_eq!(Value::from("x").kind(), ValueKind::String);
        assert_eq!(Value::seq([1]).kind(), ValueKind::Seq);
    }

    #[test]
    fn test_scalar_accessors() {
        assert_eq!(Value::from(7).as_int(), Some(7));
        assert_eq!(Value::from("hello").as_str(), Some("hello"));
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert_eq!(Value::from(7).as_str(), None);
    }

    // =========================================================================
    // Identity Tests
    // =========================================================================

    #[test]
    fn test_clone_shares_identity() {
        let original = Value::map_from([("a", Value::seq([1, 2]))]);
        let copy = original.clone();
        assert!(original.shares_identity(&copy));
    }

    #[test]
    fn test_equal_but_separate_containers_are_not_identical() {
        let left = Value::seq([1, 2]);
        let right = Value::seq([1, 2]);
        assert_eq!(left, right);
        assert!(!left.shares_identity(&right));
    }

    #[test]
    fn test_scalars_share_identity_by_value() {
        assert!(Value::Int(3).shares_identity(&Value::Int(3)));
        assert!(!Value::Int(3).shares_identity(&Value::Int(4)));
        assert!(Value::Null.shares_identity(&Value::Null));
    }

    // =========================================================================
    // Display Tests
    // =========================================================================

    #[test]
    fn test_display_renders_nested_document() {
        let document = Value::map_from([("a", Value::seq([1, 2]))]);
        assert_eq!(format!("{document}"), "{\"a\": [1, 2]}");
    }

    #[test]
    fn test_display_renders_scalars() {
        assert_eq!(format!("{}", Value::Null), "null");
        assert_eq!(format!("{}", Value::from("hi")), "\"hi\"");
        assert_eq!(format!("{}", Value::from(true)), "true");
    }
}
