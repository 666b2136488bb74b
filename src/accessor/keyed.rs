//! Keyed lookup: mapping keys and sequence indexes.
//!
//! The keyed step is the workhorse accessor and the one raw locators
//! desugar to. It traverses `data[key]` for mappings, and `data[index]`
//! for sequences when the key is an integer (negative indexes count from
//! the end). Writing through a missing or wrong-shaped container repairs
//! it to an empty mapping first, so deep writes vivify their own spine.

use std::collections::BTreeMap;

use crate::error::TraversalError;
use crate::value::{Key, ReferenceCounter, Value};

use super::{Accessor, Command, Focus, Found, GetContinuation, Step, UpdateContinuation};

pub(super) fn get(
    accessor: &Accessor,
    key: &Key,
    data: &Focus,
    next: GetContinuation<'_>,
) -> Result<Found, TraversalError> {
    next(traverse_or_default(accessor, key, data))
}

pub(super) fn get_and_update(
    accessor: &Accessor,
    key: &Key,
    data: Focus,
    next: UpdateContinuation<'_>,
) -> Result<Step, TraversalError> {
    let child = traverse_or_default(accessor, key, &data);
    let Step { found, command } = next(child)?;

    match command {
        Command::Clean => Ok(Step {
            found,
            command: Command::Clean,
        }),
        Command::Dirty(new_child) => {
            let mut container = repair_owned(data, key);
            write_key(&mut container, key, new_child);
            Ok(Step {
                found,
                command: Command::Dirty(container),
            })
        }
        Command::Pop => {
            let mut container = repair_owned(data, key);
            let command = if remove_key(&mut container, key) {
                Command::Dirty(container)
            } else {
                Command::Clean
            };
            Ok(Step { found, command })
        }
    }
}

fn traverse_or_default(accessor: &Accessor, key: &Key, data: &Focus) -> Focus {
    if data.is_absent() {
        return Focus::Absent;
    }
    let Focus::Value(container) = data else {
        // A gap is not a keyed container; repair yields an empty
        // mapping, so traversal misses and falls back.
        return accessor.fallback();
    };

    // An entry holding null reads as a miss, like a missing entry.
    match (container, key) {
        (Value::Map(entries), _) => entries
            .get(key)
            .filter(|child| !child.is_null())
            .cloned()
            .map_or_else(|| accessor.fallback(), Focus::Value),
        (Value::Seq(elements), Key::Int(index)) => resolve_index(*index, elements.len())
            .and_then(|position| elements.get(position))
            .filter(|child| !child.is_null())
            .cloned()
            .map_or_else(|| accessor.fallback(), Focus::Value),
        _ => accessor.fallback(),
    }
}

/// Returns an owned container this key can legally be written into,
/// substituting an empty mapping when the incoming data has the wrong
/// shape. Sequences are kept only for integer keys.
fn repair_owned(data: Focus, key: &Key) -> Value {
    match data {
        Focus::Value(value @ Value::Map(_)) => value,
        Focus::Value(value @ Value::Seq(_)) if matches!(key, Key::Int(_)) => value,
        _ => Value::Map(ReferenceCounter::new(BTreeMap::new())),
    }
}

fn write_key(container: &mut Value, key: &Key, new_child: Value) {
    match (container, key) {
        (Value::Map(entries), _) => {
            ReferenceCounter::make_mut(entries).insert(key.clone(), new_child);
        }
        (Value::Seq(elements), Key::Int(index)) => {
            let elements = ReferenceCounter::make_mut(elements);
            let position = resolve_index(*index, elements.len()).unwrap_or(0);
            if position < elements.len() {
                elements[position] = new_child;
            } else {
                // Writing past the end pads with nulls, then appends.
                elements.resize(position, Value::Null);
                elements.push(new_child);
            }
        }
        _ => {}
    }
}

// An entry holding null reads as missing, so popping it is also a no-op.
fn remove_key(container: &mut Value, key: &Key) -> bool {
    match (container, key) {
        (Value::Map(entries), _) => {
            if entries.get(key).is_some_and(|child| !child.is_null()) {
                ReferenceCounter::make_mut(entries).remove(key);
                true
            } else {
                false
            }
        }
        (Value::Seq(elements), Key::Int(index)) => {
            match resolve_index(*index, elements.len()) {
                Some(position)
                    if elements.get(position).is_some_and(|child| !child.is_null()) =>
                {
                    ReferenceCounter::make_mut(elements).remove(position);
                    true
                }
                _ => false,
            }
        }
        _ => false,
    }
}

/// Resolves a possibly-negative index against a sequence length. Negative
/// indexes count from the end; one that resolves before the start yields
/// `None`.
fn resolve_index(index: i64, length: usize) -> Option<usize> {
    if index >= 0 {
        usize::try_from(index).ok()
    } else {
        let from_end = i64::try_from(length).ok()? + index;
        usize::try_from(from_end).ok()
    }
}
