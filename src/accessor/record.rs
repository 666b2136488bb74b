//! Field and slot steps through [`Record`] property bags.
//!
//! Fields are the closed plane: traversing a field a record never declared,
//! or any field of a non-record value, is the one unrecovered traversal
//! error. Popping a field resets it to null; the declaration survives.
//!
//! Slots are the open plane: a missing slot reads as absent, writing
//! creates it, and popping removes it entirely.

use crate::error::{MissingCapabilityError, TraversalError};
use crate::value::{Record, ReferenceCounter, Value, ValueKind};

use super::{Accessor, Command, Focus, Found, GetContinuation, Step, UpdateContinuation};

// =============================================================================
// Field
// =============================================================================

pub(super) fn get_field(
    accessor: &Accessor,
    name: &str,
    data: &Focus,
    next: GetContinuation<'_>,
) -> Result<Found, TraversalError> {
    next(traverse_field(accessor, name, data)?)
}

pub(super) fn get_and_update_field(
    accessor: &Accessor,
    name: &str,
    data: Focus,
    next: UpdateContinuation<'_>,
) -> Result<Step, TraversalError> {
    let child = traverse_field(accessor, name, &data)?;
    let Step { found, command } = next(child)?;

    match command {
        Command::Clean => Ok(Step {
            found,
            command: Command::Clean,
        }),
        Command::Dirty(new_child) => {
            let mut container = repair_record(data);
            set_field_in(&mut container, name, new_child)?;
            Ok(Step {
                found,
                command: Command::Dirty(container),
            })
        }
        Command::Pop => {
            // The field stays declared; popping clears its value.
            let mut container = repair_record(data);
            set_field_in(&mut container, name, Value::Null)?;
            Ok(Step {
                found,
                command: Command::Dirty(container),
            })
        }
    }
}

fn traverse_field(accessor: &Accessor, name: &str, data: &Focus) -> Result<Focus, TraversalError> {
    if data.is_absent() {
        return Ok(Focus::Absent);
    }
    match data {
        Focus::Absent | Focus::Cursor(_) => Ok(Focus::Absent),
        Focus::Value(Value::Record(record)) => match record.field(name) {
            // A declared field holding null reads as a miss.
            Some(value) if !value.is_null() => Ok(Focus::Value(value.clone())),
            Some(_) => Ok(accessor.fallback()),
            None => Err(MissingCapabilityError::field(name, ValueKind::Record).into()),
        },
        Focus::Value(other) => Err(MissingCapabilityError::field(name, other.kind()).into()),
    }
}

fn set_field_in(container: &mut Value, name: &str, value: Value) -> Result<(), TraversalError> {
    if let Value::Record(record) = container
        && ReferenceCounter::make_mut(record).set_field(name, value)
    {
        return Ok(());
    }
    Err(MissingCapabilityError::field(name, container.kind()).into())
}

// =============================================================================
// Slot
// =============================================================================

pub(super) fn get_slot(
    accessor: &Accessor,
    name: &str,
    data: &Focus,
    next: GetContinuation<'_>,
) -> Result<Found, TraversalError> {
    next(traverse_slot(accessor, name, data)?)
}

pub(super) fn get_and_update_slot(
    accessor: &Accessor,
    name: &str,
    data: Focus,
    next: UpdateContinuation<'_>,
) -> Result<Step, TraversalError> {
    let child = traverse_slot(accessor, name, &data)?;
    let Step { found, command } = next(child)?;

    match command {
        Command::Clean => Ok(Step {
            found,
            command: Command::Clean,
        }),
        Command::Dirty(new_child) => {
            let mut container = repair_record(data);
            if let Value::Record(record) = &mut container {
                ReferenceCounter::make_mut(record).set_slot(name, new_child);
            }
            Ok(Step {
                found,
                command: Command::Dirty(container),
            })
        }
        Command::Pop => {
            let mut container = repair_record(data);
            let removed = match &mut container {
                Value::Record(record) => {
                    ReferenceCounter::make_mut(record).remove_slot(name).is_some()
                }
                _ => false,
            };
            let command = if removed {
                Command::Dirty(container)
            } else {
                Command::Clean
            };
            Ok(Step { found, command })
        }
    }
}

fn traverse_slot(accessor: &Accessor, name: &str, data: &Focus) -> Result<Focus, TraversalError> {
    if data.is_absent() {
        return Ok(Focus::Absent);
    }
    match data {
        Focus::Absent | Focus::Cursor(_) => Ok(Focus::Absent),
        Focus::Value(Value::Record(record)) => Ok(record
            .slot(name)
            .filter(|child| !child.is_null())
            .cloned()
            .map_or_else(|| accessor.fallback(), Focus::Value)),
        Focus::Value(other) => Err(MissingCapabilityError::slot(name, other.kind()).into()),
    }
}

/// Returns an owned record to write into, vivifying an empty one when the
/// predecessor produced nothing. Wrong-shaped values never reach here;
/// traversal has already rejected them.
fn repair_record(data: Focus) -> Value {
    match data {
        Focus::Value(value @ Value::Record(_)) => value,
        _ => Value::from(Record::new()),
    }
}
