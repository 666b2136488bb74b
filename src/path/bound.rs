//! Paths bound to a fixed subject.

use std::fmt;

use crate::accessor::{Accessor, Command, Found, Predicate};
use crate::error::TraversalError;
use crate::value::{Key, Value};

use super::Path;

/// A [`Path`] paired with the subject it traverses.
///
/// A bound path carries its subject along, so traversal methods take no
/// subject argument and fluent extension reads like a sentence about one
/// document:
///
/// ```
/// use lenspath::{BoundPath, Value};
///
/// let subject = Value::map_from([("user", Value::map_from([("name", "ada")]))]);
/// let name = BoundPath::on(subject, lenspath::Path::empty())
///     .key("user")
///     .key("name");
///
/// assert_eq!(name.get_in().unwrap().into_value(), Some(Value::from("ada")));
/// ```
///
/// The subject is immutable: modifying operations return a rebuilt value
/// and leave the bound subject as it was.
#[derive(Debug, Clone)]
pub struct BoundPath {
    subject: Value,
    path: Path,
}

impl BoundPath {
    /// Binds `path` to `subject`.
    pub fn on(subject: impl Into<Value>, path: Path) -> Self {
        Self {
            subject: subject.into(),
            path,
        }
    }

    /// The bound subject.
    pub const fn subject(&self) -> &Value {
        &self.subject
    }

    /// The traversal this binding applies.
    pub const fn path(&self) -> &Path {
        &self.path
    }

    /// Returns a new binding over the same subject with `accessor`
    /// appended to the path.
    pub fn then(&self, accessor: impl Into<Accessor>) -> Self {
        Self {
            subject: self.subject.clone(),
            path: self.path.then(accessor),
        }
    }

    // =========================================================================
    // Fluent extension
    // =========================================================================

    /// Extends with a keyed lookup. See [`Accessor::key`].
    pub fn key(&self, key: impl Into<Key>) -> Self {
        self.then(Accessor::key(key))
    }

    /// Extends with a declared-field step. See [`Accessor::field`].
    pub fn field(&self, name: impl AsRef<str>) -> Self {
        self.then(Accessor::field(name))
    }

    /// Extends with an open-slot step. See [`Accessor::slot`].
    pub fn slot(&self, name: impl AsRef<str>) -> Self {
        self.then(Accessor::slot(name))
    }

    /// Extends with a predicate filter. See [`Accessor::filter`].
    pub fn filter<P: Predicate>(&self, predicate: P) -> Self {
        self.then(Accessor::filter(predicate))
    }

    /// Extends with an every-element step. See [`Accessor::all`].
    pub fn all(&self) -> Self {
        self.then(Accessor::all())
    }

    /// Extends with a first-element step. See [`Accessor::first`].
    pub fn first(&self) -> Self {
        self.then(Accessor::first())
    }

    /// Extends with a last-element step. See [`Accessor::last`].
    pub fn last(&self) -> Self {
        self.then(Accessor::last())
    }

    /// Extends with a single-gap cursor step. See [`Accessor::before`].
    pub fn before(&self, offset: usize) -> Self {
        self.then(Accessor::before(offset))
    }

    /// Extends with the gap before the first element.
    pub fn before_first(&self) -> Self {
        self.then(Accessor::before_first())
    }

    /// Extends with the gap after the last element.
    pub fn after_last(&self) -> Self {
        self.then(Accessor::after_last())
    }

    /// Extends with an every-gap cursor step. See
    /// [`Accessor::between_each`].
    pub fn between_each(&self) -> Self {
        self.then(Accessor::between_each())
    }

    // =========================================================================
    // Traversal
    // =========================================================================

    /// Traverses the bound subject. See [`Path::get_in`].
    ///
    /// # Errors
    ///
    /// Returns a [`TraversalError`] when a field or slot step reaches a
    /// value without that member.
    pub fn get_in(&self) -> Result<Found, TraversalError> {
        self.path.get_in(&self.subject)
    }

    /// Traverses and mutates the bound subject, returning the
    /// pre-modification get-result and the rebuilt value. See
    /// [`Path::get_and_update_in`].
    ///
    /// # Errors
    ///
    /// Returns a [`TraversalError`] when a field or slot step reaches a
    /// value without that member.
    pub fn get_and_update_in<F>(&self, mutator: F) -> Result<(Found, Value), TraversalError>
    where
        F: FnMut(Found) -> Command,
    {
        self.path.get_and_update_in(self.subject.clone(), mutator)
    }

    /// Transforms the value(s) at the end of the path, returning the
    /// rebuilt subject. See [`Path::update_in`].
    ///
    /// # Errors
    ///
    /// Returns a [`TraversalError`] when a field or slot step reaches a
    /// value without that member.
    pub fn update_in<F>(&self, transform: F) -> Result<Value, TraversalError>
    where
        F: FnMut(Found) -> Value,
    {
        self.path.update_in(self.subject.clone(), transform)
    }

    /// Replaces the value(s) at the end of the path, returning the
    /// rebuilt subject. See [`Path::put_in`].
    ///
    /// # Errors
    ///
    /// Returns a [`TraversalError`] when a field or slot step reaches a
    /// value without that member.
    pub fn put_in(&self, new_value: impl Into<Value>) -> Result<Value, TraversalError> {
        self.path.put_in(self.subject.clone(), new_value)
    }

    /// Removes the value(s) at the end of the path, returning what was
    /// removed and the rebuilt subject. See [`Path::pop_in`].
    ///
    /// # Errors
    ///
    /// Returns a [`TraversalError`] when a field or slot step reaches a
    /// value without that member.
    pub fn pop_in(&self) -> Result<(Found, Value), TraversalError> {
        self.path.pop_in(self.subject.clone())
    }
}

impl fmt::Display for BoundPath {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{} on {}", self.path, self.subject)
    }
}
