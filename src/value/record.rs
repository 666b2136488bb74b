//! Record property bags: the "generic object" variant of [`Value`].
//!
//! A [`Record`] carries two planes of named members:
//!
//! - **Fields** form a closed set declared at construction, modeling a
//!   domain object whose member names are known up front. Reading or
//!   writing a field the record never declared is a caller error surfaced
//!   by the field accessor.
//! - **Slots** form an open plane the caller opts into, modeling dynamic
//!   annotations. Missing slots read as absent; writing a slot creates it;
//!   removing a slot deletes it.
//!
//! [`Value`]: crate::Value

use std::collections::BTreeMap;
use std::fmt;

use super::{ReferenceCounter, Value};

/// A property bag with a closed field plane and an open slot plane.
///
/// # Examples
///
/// ```
/// use lenspath::{Record, Value};
///
/// let mut address = Record::with_fields([
///     ("street", Value::from("Main St")),
///     ("city", Value::from("Tokyo")),
/// ]);
///
/// assert_eq!(address.field("street"), Some(&Value::from("Main St")));
/// assert_eq!(address.field("country"), None);
///
/// address.set_slot("geocoded", Value::from(true));
/// assert_eq!(address.slot("geocoded"), Some(&Value::from(true)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<ReferenceCounter<str>, Value>,
    slots: BTreeMap<ReferenceCounter<str>, Value>,
}

impl Record {
    /// Creates an empty record with no declared fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a record declaring the given fields with their initial values.
    pub fn with_fields<I, N, T>(fields: I) -> Self
    where
        I: IntoIterator<Item = (N, T)>,
        N: AsRef<str>,
        T: Into<Value>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(name, value)| (ReferenceCounter::from(name.as_ref()), value.into()))
                .collect(),
            slots: BTreeMap::new(),
        }
    }

    /// Declares an additional field, builder-style.
    pub fn declare_field(mut self, name: impl AsRef<str>, value: impl Into<Value>) -> Self {
        self.fields
            .insert(ReferenceCounter::from(name.as_ref()), value.into());
        self
    }

    /// Returns the value of a declared field, or `None` if the field was
    /// never declared.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns `true` if this record declares the given field.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Replaces the value of a declared field.
    ///
    /// Returns `false` without modifying the record when the field was
    /// never declared; the field plane is closed after construction.
    pub fn set_field(&mut self, name: &str, value: Value) -> bool {
        match self.fields.get_mut(name) {
            Some(stored) => {
                *stored = value;
                true
            }
            None => false,
        }
    }

    /// Returns the value of a slot, or `None` if the slot is not set.
    pub fn slot(&self, name: &str) -> Option<&Value> {
        self.slots.get(name)
    }

    /// Sets a slot, creating it if it does not exist.
    pub fn set_slot(&mut self, name: impl AsRef<str>, value: Value) {
        self.slots
            .insert(ReferenceCounter::from(name.as_ref()), value);
    }

    /// Removes a slot, returning its value if it was set.
    pub fn remove_slot(&mut self, name: &str) -> Option<Value> {
        self.slots.remove(name)
    }

    /// Iterates over the declared fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (&**name, value))
    }

    /// Iterates over the set slots in name order.
    pub fn slots(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.slots.iter().map(|(name, value)| (&**name, value))
    }
}

impl fmt::Display for Record {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("record{")?;
        let mut wrote_member = false;
        for (name, value) in self.fields() {
            if wrote_member {
                formatter.write_str(", ")?;
            }
            write!(formatter, "{name}: {value}")?;
            wrote_member = true;
        }
        for (name, value) in self.slots() {
            if wrote_member {
                formatter.write_str(", ")?;
            }
            write!(formatter, "@{name}: {value}")?;
            wrote_member = true;
        }
        formatter.write_str("}")
    }
}
