//! # lenspath
//!
//! Composable paths for reading, updating, and removing values nested
//! anywhere inside heterogeneous data.
//!
//! ## Overview
//!
//! This library brings Elixir-style `Access` paths to Rust: a [`Path`] is
//! an immutable chain of [`Accessor`] steps that describes how to reach a
//! location inside a [`Value`] document, independent of any particular
//! document. It includes:
//!
//! - **Values**: a dynamic [`Value`] model (null, booleans, numbers,
//!   strings, sequences, mappings, records) with cheap structural sharing
//! - **Accessors**: keyed lookup, record fields and slots, filters,
//!   whole-sequence and edge steps, and interstitial cursors
//! - **Paths**: composition with automatic default-container wiring,
//!   the traversal drivers `get_in` / `get_and_update_in`, and the
//!   derived operations `update_in` / `put_in` / `pop_in`
//! - **Bound paths**: a path paired with a fixed subject, for fluent
//!   repeated traversal of one document
//!
//! Reads through missing data yield [`Found::Absent`] instead of failing;
//! writes through missing data create the intermediate containers the
//! rest of the path expects (auto-vivification). Updates rebuild only the
//! containers along the traversed route, so untouched siblings keep
//! sharing structure with the original subject.
//!
//! ## Feature Flags
//!
//! - `arc`: share values and paths across threads (`Arc` instead of `Rc`)
//! - `serde`: `Serialize`/`Deserialize` for [`Value`], [`Key`], and
//!   [`Record`]
//!
//! ## Example
//!
//! ```rust
//! use lenspath::{path, Value};
//!
//! let subject = Value::map_from([("users", Value::seq([
//!     Value::map_from([("name", "ada"), ("role", "admin")]),
//!     Value::map_from([("name", "grace"), ("role", "member")]),
//! ]))]);
//!
//! let first_name = path!["users", 0, "name"];
//! assert_eq!(
//!     first_name.get_in(&subject).unwrap().into_value(),
//!     Some(Value::from("ada"))
//! );
//!
//! let promoted = path!["users", 1, "role"].put_in(subject, "admin").unwrap();
//! assert_eq!(
//!     path!["users", 1, "role"].get_in(&promoted).unwrap().into_value(),
//!     Some(Value::from("admin"))
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and the accessor constructors.
///
/// # Usage
///
/// ```rust
/// use lenspath::prelude::*;
/// ```
pub mod prelude {
    pub use crate::access::{
        after_last, all, before, before_first, between_each, field, filter, first, key, last,
        slot,
    };
    pub use crate::accessor::{Accessor, Command, CursorPosition, Found};
    pub use crate::error::{MissingCapabilityError, TraversalError};
    pub use crate::path::{BoundPath, Path};
    pub use crate::value::{Key, Record, Value, ValueKind};
}

pub mod access;
mod accessor;
mod error;
mod path;
mod value;

pub use accessor::{Accessor, Command, CursorPosition, Found, Predicate};
pub use error::{MissingCapabilityError, TraversalError};
pub use path::{BoundPath, Path};
pub use value::{Key, Record, Value, ValueKind};
