//! Paths: immutable chains of accessors and the traversal drivers.
//!
//! A [`Path`] is a "free-floating" traversal description: it is not bound
//! to any subject. It serves as a container for [`Accessor`] steps and
//! represents the route one would take from a hypothetical subject
//! document to a value nested somewhere within it. Because a path owns no
//! subject it is reusable: build it once, apply it to any number of
//! documents.
//!
//! Paths are immutable. Methods that "extend" a path build and return a
//! new one, rewiring the successor-default constructor of the previous
//! last step so that auto-vivification always produces the container the
//! *next* step expects.
//!
//! The two traversal drivers, [`Path::get_in`] and
//! [`Path::get_and_update_in`], recurse structurally over the accessor
//! chain, threading a continuation into each step; every other operation
//! ([`Path::update_in`], [`Path::put_in`], [`Path::pop_in`]) derives from
//! them by fixing the transform.
//!
//! # Examples
//!
//! ```
//! use lenspath::{path, Value};
//!
//! let scores_head = path!["scores", 0];
//! let subject = Value::map_from([("scores", Value::seq([10, 20]))]);
//!
//! assert_eq!(
//!     scores_head.get_in(&subject).unwrap().into_value(),
//!     Some(Value::Int(10))
//! );
//!
//! let bumped = scores_head.put_in(subject, 11).unwrap();
//! assert_eq!(
//!     scores_head.get_in(&bumped).unwrap().into_value(),
//!     Some(Value::Int(11))
//! );
//! ```

mod bound;

pub use bound::BoundPath;

use std::fmt;

use smallvec::SmallVec;

use crate::accessor::{Accessor, Command, ContainerDefault, Focus, Found, Predicate, Step};
use crate::error::TraversalError;
use crate::value::{Key, Value};

type Parts = SmallVec<[Accessor; 4]>;

/// An immutable, ordered chain of accessors describing how to reach a
/// nested location from a root subject.
///
/// The empty path is the identity traversal: it returns or replaces the
/// subject itself.
#[derive(Debug, Clone, Default)]
pub struct Path {
    parts: Parts,
}

impl Path {
    /// The empty (identity) path.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a path from accessors or raw locators.
    ///
    /// Raw keys and indexes are sugar for keyed lookups, so
    /// `Path::from_accessors(["a", "b"])` traverses two mapping levels.
    pub fn from_accessors<I, A>(accessors: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Accessor>,
    {
        let mut parts = Parts::new();
        for accessor in accessors {
            Self::push_accessor(&mut parts, accessor.into());
        }
        Self { parts }
    }

    /// The number of steps in this path.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// `true` for the identity path.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// The accessor steps, in traversal order.
    pub fn accessors(&self) -> &[Accessor] {
        &self.parts
    }

    /// Returns a new path with `accessor` appended.
    ///
    /// Appending rewires the previous last step's successor default to
    /// the new step's declared container, which is fixed for the new
    /// path's lifetime.
    pub fn then(&self, accessor: impl Into<Accessor>) -> Self {
        let mut parts = self.parts.clone();
        Self::push_accessor(&mut parts, accessor.into());
        Self { parts }
    }

    /// Returns a new path traversing `self` and then every step of
    /// `other`, with the same pairwise rewiring as [`Path::then`].
    pub fn concat(&self, other: &Self) -> Self {
        let mut parts = self.parts.clone();
        for accessor in &other.parts {
            Self::push_accessor(&mut parts, accessor.clone());
        }
        Self { parts }
    }

    fn push_accessor(parts: &mut Parts, mut accessor: Accessor) {
        accessor.set_successor_default(ContainerDefault::Absent);
        if let Some(previous_last) = parts.last_mut() {
            previous_last.set_successor_default(accessor.declared_default());
        }
        parts.push(accessor);
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
    // Traversal drivers
    // =========================================================================

    /// Traverses `subject` along this path and returns what was found.
    ///
    /// Missing intermediate data is never an error: traversing into
    /// absent or wrong-shaped containers yields [`Found::Absent`] (or an
    /// empty aggregate for multi-valued steps).
    ///
    /// # Errors
    ///
    /// Returns a [`TraversalError`] when a field or slot step reaches a
    /// value without that member.
    pub fn get_in(&self, subject: &Value) -> Result<Found, TraversalError> {
        Self::get_step(&self.parts, Focus::Value(subject.clone()))
    }

    /// Traverses `subject` along this path, applies `mutator` to the
    /// value(s) at the end, and returns the pre-modification get-result
    /// together with the (possibly rebuilt) subject.
    ///
    /// The mutator answers with a [`Command`]: [`Command::Clean`] to
    /// leave the value alone, [`Command::Dirty`] to replace it, or
    /// [`Command::Pop`] to remove it from its parent container. When
    /// every visited value reports clean, the returned subject is the
    /// original one (not a copy), so unrelated structure stays shared.
    ///
    /// # Errors
    ///
    /// Returns a [`TraversalError`] when a field or slot step reaches a
    /// value without that member.
    pub fn get_and_update_in<F>(
        &self,
        subject: Value,
        mut mutator: F,
    ) -> Result<(Found, Value), TraversalError>
    where
        F: FnMut(Found) -> Command,
    {
        let step = Self::update_step(&self.parts, Focus::Value(subject.clone()), &mut mutator)?;
        let new_subject = match step.command {
            Command::Clean => subject,
            Command::Dirty(rebuilt) => rebuilt,
            // Popping the subject itself leaves nothing behind.
            Command::Pop => Value::Null,
        };
        Ok((step.found, new_subject))
    }

    /// Replaces the value(s) at the end of this path with
    /// `transform(old)`, returning the rebuilt subject.
    ///
    /// A transform that hands back the value it was given (sharing its
    /// identity) reports clean, leaving the subject untouched.
    ///
    /// # Errors
    ///
    /// Returns a [`TraversalError`] when a field or slot step reaches a
    /// value without that member.
    pub fn update_in<F>(&self, subject: Value, mut transform: F) -> Result<Value, TraversalError>
    where
        F: FnMut(Found) -> Value,
    {
        let (_, new_subject) = self.get_and_update_in(subject, |found| {
            let previous = found.clone();
            let new_value = transform(found);
            if let Found::Value(old_value) = &previous
                && new_value.shares_identity(old_value)
            {
                Command::Clean
            } else {
                Command::Dirty(new_value)
            }
        })?;
        Ok(new_subject)
    }

    /// Replaces the value(s) at the end of this path with `new_value`,
    /// returning the rebuilt subject. Missing intermediate containers are
    /// created on the way down (auto-vivification).
    ///
    /// # Errors
    ///
    /// Returns a [`TraversalError`] when a field or slot step reaches a
    /// value without that member.
    pub fn put_in(
        &self,
        subject: Value,
        new_value: impl Into<Value>,
    ) -> Result<Value, TraversalError> {
        let new_value = new_value.into();
        let (_, new_subject) =
            self.get_and_update_in(subject, |_| Command::Dirty(new_value.clone()))?;
        Ok(new_subject)
    }

    /// Removes the value(s) at the end of this path, returning what was
    /// removed together with the rebuilt subject. Removing the only
    /// element of a container leaves the container empty, not absent.
    ///
    /// # Errors
    ///
    /// Returns a [`TraversalError`] when a field or slot step reaches a
    /// value without that member.
    pub fn pop_in(&self, subject: Value) -> Result<(Found, Value), TraversalError> {
        self.get_and_update_in(subject, |_| Command::Pop)
    }

    /// Binds this path to a fixed subject. See [`BoundPath`].
    pub fn bind(&self, subject: impl Into<Value>) -> BoundPath {
        BoundPath::on(subject, self.clone())
    }

    fn get_step(parts: &[Accessor], data: Focus) -> Result<Found, TraversalError> {
        match parts.split_first() {
            None => Ok(data.into_found()),
            Some((head, rest)) => head.get(&data, &mut |child| Self::get_step(rest, child)),
        }
    }

    fn update_step(
        parts: &[Accessor],
        data: Focus,
        mutator: &mut dyn FnMut(Found) -> Command,
    ) -> Result<Step, TraversalError> {
        match parts.split_first() {
            None => {
                let found = data.into_found();
                let command = mutator(found.clone());
                Ok(Step { found, command })
            }
            Some((head, rest)) => {
                head.get_and_update(data, &mut |child| Self::update_step(rest, child, mutator))
            }
        }
    }
}

impl<A: Into<Accessor>> FromIterator<A> for Path {
    fn from_iter<I: IntoIterator<Item = A>>(accessors: I) -> Self {
        Self::from_accessors(accessors)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Path[")?;
        for (position, accessor) in self.parts.iter().enumerate() {
            if position > 0 {
                formatter.write_str(", ")?;
            }
            write!(formatter, "{accessor}")?;
        }
        formatter.write_str("]")
    }
}

/// Builds a [`Path`] from a literal sequence of accessors or raw
/// locators.
///
/// Raw strings and integers are sugar for keyed lookups; anything
/// convertible to an [`Accessor`](crate::Accessor) works.
///
/// # Examples
///
/// ```
/// use lenspath::{access, path, Value};
///
/// let every_score = path!["scores", access::all()];
/// let subject = Value::map_from([("scores", Value::seq([1, 2]))]);
/// assert_eq!(
///     every_score.get_in(&subject).unwrap().into_values(),
///     vec![Value::Int(1), Value::Int(2)]
/// );
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::Path::empty()
    };
    ($($part:expr),+ $(,)?) => {
        $crate::Path::from_accessors([$($crate::Accessor::from($part)),+])
    };
}
