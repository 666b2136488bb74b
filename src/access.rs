//! Free constructor functions for every accessor kind.
//!
//! These are the spelling most path literals use:
//!
//! ```
//! use lenspath::{access, path, Value};
//!
//! let adults = path![
//!     "users",
//!     access::filter(|user| {
//!         user.as_map()
//!             .and_then(|fields| fields.get(&"age".into()))
//!             .and_then(Value::as_int)
//!             .is_some_and(|age| age >= 18)
//!     }),
//!     "name",
//! ];
//! # let _ = adults;
//! ```

use crate::accessor::{Accessor, Predicate};
use crate::value::Key;

/// A mapping-key (or sequence-index) lookup step. See [`Accessor::key`].
pub fn key(key: impl Into<Key>) -> Accessor {
    Accessor::key(key)
}

/// A step through a declared field of a record. See [`Accessor::field`].
pub fn field(name: impl AsRef<str>) -> Accessor {
    Accessor::field(name)
}

/// A step through an open slot of a record. See [`Accessor::slot`].
pub fn slot(name: impl AsRef<str>) -> Accessor {
    Accessor::slot(name)
}

/// A step visiting the sequence elements matching `predicate`. See
/// [`Accessor::filter`].
pub fn filter<P: Predicate>(predicate: P) -> Accessor {
    Accessor::filter(predicate)
}

/// A step visiting every element of a sequence. See [`Accessor::all`].
pub fn all() -> Accessor {
    Accessor::all()
}

/// A step into the first element of a sequence. See [`Accessor::first`].
pub fn first() -> Accessor {
    Accessor::first()
}

/// A step into the last element of a sequence. See [`Accessor::last`].
pub fn last() -> Accessor {
    Accessor::last()
}

/// A step into the gap before the element at `offset`. See
/// [`Accessor::before`].
pub fn before(offset: usize) -> Accessor {
    Accessor::before(offset)
}

/// A step into the gap before the first element. Writing prepends.
pub fn before_first() -> Accessor {
    Accessor::before_first()
}

/// A step into the gap after the last element. Writing appends.
pub fn after_last() -> Accessor {
    Accessor::after_last()
}

/// A step visiting every gap between (and around) the elements of a
/// sequence. See [`Accessor::between_each`].
pub fn between_each() -> Accessor {
    Accessor::between_each()
}
