//! Accessors: single composable traversal steps.
//!
//! An [`Accessor`] describes one step of a traversal ("look up this key",
//! "visit every element", "stand in the gap before offset 2") together
//! with the defaulting behavior that makes whole chains of them tolerant
//! of missing data. A [`Path`](crate::Path) strings accessors together and
//! drives them with continuations; each accessor decides how to fold the
//! results its continuation produced into its own contribution, and whether
//! the container it traversed needs to be rebuilt at all.
//!
//! The shared contract every kind implements:
//!
//! - *traverse*: locate the target value(s) inside a container of the
//!   expected shape.
//! - *validate or repair*: given whatever the predecessor produced, return
//!   something legal to traverse, repairing a wrong-shaped value to an
//!   empty container of the required shape. This hook is what makes
//!   auto-vivification work.
//! - *traverse or default*: absent data short-circuits to absent without
//!   traversing; a traversal miss falls back to the accessor's explicit
//!   default, then to the successor's declared empty container.
//! - *get* / *get and update*: run the step, feeding results to the
//!   continuation, and for updates apply the returned [`Command`] while
//!   reporting `Clean` (no rebuild, original container preserved) or
//!   `Dirty` (rebuilt container) upward.
//!
//! Concrete kinds are a closed set; adding one means extending
//! [`AccessorKind`] and its exhaustive dispatch, not open-ended
//! subclassing.

pub(crate) mod cursor;
mod keyed;
mod record;
mod sequence;

pub use cursor::CursorPosition;

use std::fmt;

use crate::error::TraversalError;
use crate::value::{Key, ReferenceCounter, Value};

use cursor::GapLocator;

// =============================================================================
// Predicate Type Alias
// =============================================================================

/// The bound required of filter predicates.
///
/// With the `arc` feature enabled, predicates must additionally be
/// `Send + Sync` so that paths can cross threads.
#[cfg(feature = "arc")]
pub trait Predicate: Fn(&Value) -> bool + Send + Sync + 'static {}

#[cfg(feature = "arc")]
impl<P: Fn(&Value) -> bool + Send + Sync + 'static> Predicate for P {}

/// The bound required of filter predicates.
#[cfg(not(feature = "arc"))]
pub trait Predicate: Fn(&Value) -> bool + 'static {}

#[cfg(not(feature = "arc"))]
impl<P: Fn(&Value) -> bool + 'static> Predicate for P {}

#[cfg(feature = "arc")]
pub(crate) type SharedPredicate = ReferenceCounter<dyn Fn(&Value) -> bool + Send + Sync>;

#[cfg(not(feature = "arc"))]
pub(crate) type SharedPredicate = ReferenceCounter<dyn Fn(&Value) -> bool>;

// =============================================================================
// Command
// =============================================================================

/// The mutation command a transform function returns for a traversed value.
///
/// This is the three-case protocol the whole engine is built around: the
/// command travels up the accessor chain, and each accessor translates it
/// into either "keep my original container" or "here is my rebuilt one".
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// The value was observed but not changed; no rebuild is needed.
    Clean,
    /// Replace the traversed value with the payload.
    Dirty(Value),
    /// Remove the traversed value from its parent container.
    Pop,
}

// =============================================================================
// Found
// =============================================================================

/// The get-result of a traversal: what was found at the end of a path.
#[derive(Debug, Clone, PartialEq)]
pub enum Found {
    /// Nothing exists at the traversed position.
    Absent,
    /// A single value.
    Value(Value),
    /// An interstitial cursor position produced by a cursor accessor.
    Cursor(CursorPosition),
    /// The aggregated results of a multi-valued accessor, in original
    /// element order.
    Many(Vec<Found>),
}

impl Found {
    /// Returns `true` if nothing was found.
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns the single found value, if there is one.
    pub const fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Consumes the result, returning the single found value if there is one.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Flattens the result into the plain values it contains, preserving
    /// order. Absent results and cursor positions contribute nothing.
    pub fn into_values(self) -> Vec<Value> {
        match self {
            Self::Absent | Self::Cursor(_) => Vec::new(),
            Self::Value(value) => vec![value],
            Self::Many(children) => children
                .into_iter()
                .flat_map(Found::into_values)
                .collect(),
        }
    }
}

impl From<Value> for Found {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

// =============================================================================
// Focus (engine-internal traversal currency)
// =============================================================================

/// What a predecessor hands to the next step: nothing, a value, or a gap.
#[derive(Debug, Clone)]
pub(crate) enum Focus {
    Absent,
    Value(Value),
    Cursor(CursorPosition),
}

impl Focus {
    /// Null data is indistinguishable from absent data for traversal
    /// purposes: it short-circuits before defaulting.
    pub(crate) const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent | Self::Value(Value::Null))
    }

    pub(crate) fn into_found(self) -> Found {
        match self {
            Self::Absent => Found::Absent,
            Self::Value(value) => Found::Value(value),
            Self::Cursor(position) => Found::Cursor(position),
        }
    }
}

/// One step's report to its predecessor: the get-result it produced, and
/// the command the predecessor must apply to its own container.
///
/// Accessors only ever report `Clean` or `Dirty` upward; `Pop` enters the
/// chain from the caller's transform and is consumed by the immediate
/// parent of the popped value.
pub(crate) struct Step {
    pub(crate) found: Found,
    pub(crate) command: Command,
}

pub(crate) type GetContinuation<'a> =
    &'a mut dyn FnMut(Focus) -> Result<Found, TraversalError>;

pub(crate) type UpdateContinuation<'a> =
    &'a mut dyn FnMut(Focus) -> Result<Step, TraversalError>;

// =============================================================================
// ContainerDefault
// =============================================================================

/// The zero-argument constructor for the empty container an accessor
/// expects to traverse. Consumed only by the *predecessor* accessor in a
/// path; the terminal accessor's successor default produces absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContainerDefault {
    Absent,
    Seq,
    Map,
    Record,
}

impl ContainerDefault {
    pub(crate) fn construct(self) -> Focus {
        match self {
            Self::Absent => Focus::Absent,
            Self::Seq => Focus::Value(Value::Seq(ReferenceCounter::new(Vec::new()))),
            Self::Map => Focus::Value(Value::Map(ReferenceCounter::new(
                std::collections::BTreeMap::new(),
            ))),
            Self::Record => Focus::Value(Value::from(crate::value::Record::new())),
        }
    }
}

// =============================================================================
// AccessorKind
// =============================================================================

/// The closed set of traversal strategies.
#[derive(Clone)]
pub(crate) enum AccessorKind {
    /// Mapping-key or sequence-index lookup.
    Key(Key),
    /// A declared field of a record.
    Field(ReferenceCounter<str>),
    /// An open slot of a record.
    Slot(ReferenceCounter<str>),
    /// The elements of a sequence matching a predicate.
    Filter(SharedPredicate),
    /// Every element of a sequence.
    All,
    /// The first element of a sequence.
    First,
    /// The last element of a sequence.
    Last,
    /// The gap before a sequence offset.
    Before(GapLocator),
    /// Every gap between (and around) the elements of a sequence.
    BetweenEach,
}

impl fmt::Debug for AccessorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => formatter.debug_tuple("Key").field(key).finish(),
            Self::Field(name) => formatter.debug_tuple("Field").field(name).finish(),
            Self::Slot(name) => formatter.debug_tuple("Slot").field(name).finish(),
            Self::Filter(_) => formatter.write_str("Filter(<predicate>)"),
            Self::All => formatter.write_str("All"),
            Self::First => formatter.write_str("First"),
            Self::Last => formatter.write_str("Last"),
            Self::Before(gap) => formatter.debug_tuple("Before").field(gap).finish(),
            Self::BetweenEach => formatter.write_str("BetweenEach"),
        }
    }
}

// =============================================================================
// Accessor
// =============================================================================

/// One composable traversal step.
///
/// Accessors are immutable once placed in a [`Path`](crate::Path); the
/// path rewires each accessor's successor default when composing, which is
/// why appending to a path yields a new path rather than mutating in
/// place.
///
/// Construct accessors through the associated functions here or the free
/// functions in [`access`](crate::access); raw keys and indexes convert
/// directly via `From`.
///
/// # Examples
///
/// ```
/// use lenspath::{Accessor, Path, Value};
///
/// let path = Path::from_accessors([Accessor::key("scores"), Accessor::all()]);
/// let subject = Value::map_from([("scores", Value::seq([1, 2, 3]))]);
///
/// let found = path.get_in(&subject).unwrap();
/// assert_eq!(found.into_values(), vec![1.into(), 2.into(), 3.into()]);
/// ```
#[derive(Debug, Clone)]
pub struct Accessor {
    kind: AccessorKind,
    default_value: Option<Value>,
    successor_default: ContainerDefault,
}

impl Accessor {
    fn new(kind: AccessorKind) -> Self {
        Self {
            kind,
            default_value: None,
            successor_default: ContainerDefault::Absent,
        }
    }

    /// A mapping-key (or sequence-index) lookup step.
    pub fn key(key: impl Into<Key>) -> Self {
        Self::new(AccessorKind::Key(key.into()))
    }

    /// A step through a declared field of a record.
    pub fn field(name: impl AsRef<str>) -> Self {
        Self::new(AccessorKind::Field(ReferenceCounter::from(name.as_ref())))
    }

    /// A step through an open slot of a record.
    pub fn slot(name: impl AsRef<str>) -> Self {
        Self::new(AccessorKind::Slot(ReferenceCounter::from(name.as_ref())))
    }

    /// A step visiting the elements of a sequence that match `predicate`.
    pub fn filter<P: Predicate>(predicate: P) -> Self {
        let shared: SharedPredicate = ReferenceCounter::new(predicate);
        Self::new(AccessorKind::Filter(shared))
    }

    /// A step visiting every element of a sequence.
    pub fn all() -> Self {
        Self::new(AccessorKind::All)
    }

    /// A step into the first element of a sequence.
    pub fn first() -> Self {
        Self::new(AccessorKind::First)
    }

    /// A step into the last element of a sequence.
    pub fn last() -> Self {
        Self::new(AccessorKind::Last)
    }

    /// A step into the gap before the element at `offset`.
    ///
    /// Writing through this step inserts at `offset`; an offset past the
    /// end denotes the gap after the last element.
    pub fn before(offset: usize) -> Self {
        Self::new(AccessorKind::Before(GapLocator::Offset(offset)))
    }

    /// A step into the gap before the first element. Writing prepends.
    pub fn before_first() -> Self {
        Self::before(0)
    }

    /// A step into the gap after the last element. Writing appends.
    pub fn after_last() -> Self {
        Self::new(AccessorKind::Before(GapLocator::End))
    }

    /// A step visiting every gap between (and around) the elements of a
    /// sequence.
    pub fn between_each() -> Self {
        Self::new(AccessorKind::BetweenEach)
    }

    /// Configures the explicit default substituted when traversal of
    /// *existing* data misses (e.g. the key is not present). Absent data
    /// still propagates as absent.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// The empty container this accessor expects to traverse; consumed by
    /// the predecessor accessor when a path wires the chain together.
    pub(crate) const fn declared_default(&self) -> ContainerDefault {
        match self.kind {
            AccessorKind::Key(_) => ContainerDefault::Map,
            AccessorKind::Field(_) | AccessorKind::Slot(_) => ContainerDefault::Record,
            AccessorKind::Filter(_)
            | AccessorKind::All
            | AccessorKind::First
            | AccessorKind::Last
            | AccessorKind::Before(_)
            | AccessorKind::BetweenEach => ContainerDefault::Seq,
        }
    }

    pub(crate) const fn set_successor_default(&mut self, default: ContainerDefault) {
        self.successor_default = default;
    }

    /// The fallback focus for a traversal miss: the configured explicit
    /// default if any, otherwise the successor's declared empty container.
    pub(crate) fn fallback(&self) -> Focus {
        self.default_value
            .clone()
            .map_or_else(|| self.successor_default.construct(), Focus::Value)
    }

    /// Runs this step for a read, feeding the located value(s) to `next`.
    pub(crate) fn get(
        &self,
        data: &Focus,
        next: GetContinuation<'_>,
    ) -> Result<Found, TraversalError> {
        match &self.kind {
            AccessorKind::Key(key) => keyed::get(self, key, data, next),
            AccessorKind::Field(name) => record::get_field(self, name, data, next),
            AccessorKind::Slot(name) => record::get_slot(self, name, data, next),
            AccessorKind::Filter(predicate) => sequence::get_filter(predicate, data, next),
            AccessorKind::All => sequence::get_all(data, next),
            AccessorKind::First => sequence::get_first(self, data, next),
            AccessorKind::Last => sequence::get_last(self, data, next),
            AccessorKind::Before(gap) => cursor::get_before(*gap, data, next),
            AccessorKind::BetweenEach => cursor::get_between_each(data, next),
        }
    }

    /// Runs this step for an update: locates the value(s), feeds them to
    /// `next`, applies the command(s) it returns, and reports this step's
    /// own command upward.
    pub(crate) fn get_and_update(
        &self,
        data: Focus,
        next: UpdateContinuation<'_>,
    ) -> Result<Step, TraversalError> {
        match &self.kind {
            AccessorKind::Key(key) => keyed::get_and_update(self, key, data, next),
            AccessorKind::Field(name) => record::get_and_update_field(self, name, data, next),
            AccessorKind::Slot(name) => record::get_and_update_slot(self, name, data, next),
            AccessorKind::Filter(predicate) => {
                sequence::get_and_update_filter(predicate, &data, next)
            }
            AccessorKind::All => sequence::get_and_update_all(&data, next),
            AccessorKind::First => sequence::get_and_update_first(self, data, next),
            AccessorKind::Last => sequence::get_and_update_last(self, data, next),
            AccessorKind::Before(gap) => cursor::get_and_update_before(*gap, &data, next),
            AccessorKind::BetweenEach => cursor::get_and_update_between_each(&data, next),
        }
    }
}

impl From<&str> for Accessor {
    fn from(key: &str) -> Self {
        Self::key(key)
    }
}

impl From<String> for Accessor {
    fn from(key: String) -> Self {
        Self::key(key)
    }
}

impl From<i64> for Accessor {
    fn from(index: i64) -> Self {
        Self::key(index)
    }
}

impl From<i32> for Accessor {
    fn from(index: i32) -> Self {
        Self::key(index)
    }
}

impl From<Key> for Accessor {
    fn from(key: Key) -> Self {
        Self::key(key)
    }
}

impl fmt::Display for Accessor {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            AccessorKind::Key(key) => write!(formatter, "key({key})"),
            AccessorKind::Field(name) => write!(formatter, "field({name})"),
            AccessorKind::Slot(name) => write!(formatter, "slot({name})"),
            AccessorKind::Filter(_) => formatter.write_str("filter(<predicate>)"),
            AccessorKind::All => formatter.write_str("all"),
            AccessorKind::First => formatter.write_str("first"),
            AccessorKind::Last => formatter.write_str("last"),
            AccessorKind::Before(GapLocator::Offset(offset)) => {
                write!(formatter, "before({offset})")
            }
            AccessorKind::Before(GapLocator::End) => formatter.write_str("after_last"),
            AccessorKind::BetweenEach => formatter.write_str("between_each"),
        }
    }
}
