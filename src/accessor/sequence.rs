//! Element-oriented steps over sequences: all, filter, first, last.
//!
//! The multi-valued steps (all, filter) visit elements in original order
//! and report `Dirty` only when at least one child changed or was popped;
//! otherwise the original sequence is kept, preserving sharing. Popping an
//! element drops it from the rebuilt sequence; popping the only element
//! leaves a well-formed empty sequence.

use crate::error::TraversalError;
use crate::value::{ReferenceCounter, Value};

use super::{
    Accessor, Command, Focus, Found, GetContinuation, SharedPredicate, Step, UpdateContinuation,
};

const NO_ELEMENTS: &[Value] = &[];

/// A borrowed view of the elements the incoming data offers: sequences
/// yield their elements, anything else yields none. This is the
/// validate-or-repair step for element-oriented accessors, done without
/// allocating.
pub(super) fn element_view(data: &Focus) -> &[Value] {
    match data {
        Focus::Value(Value::Seq(elements)) => elements,
        _ => NO_ELEMENTS,
    }
}

/// Drives the rest of the chain with absent data, reporting the same
/// get-result a read would and leaving the container untouched. Whatever
/// the chain wanted to write has no elements to land in.
fn absent_step(next: UpdateContinuation<'_>) -> Result<Step, TraversalError> {
    let Step { found, command: _ } = next(Focus::Absent)?;
    Ok(Step {
        found,
        command: Command::Clean,
    })
}

// =============================================================================
// All
// =============================================================================

pub(super) fn get_all(data: &Focus, next: GetContinuation<'_>) -> Result<Found, TraversalError> {
    if data.is_absent() {
        return next(Focus::Absent);
    }

    let elements = element_view(data);
    let mut results = Vec::with_capacity(elements.len());
    for element in elements {
        results.push(next(Focus::Value(element.clone()))?);
    }
    Ok(Found::Many(results))
}

pub(super) fn get_and_update_all(
    data: &Focus,
    next: UpdateContinuation<'_>,
) -> Result<Step, TraversalError> {
    if data.is_absent() {
        return absent_step(next);
    }

    let elements = element_view(data);
    let mut results = Vec::with_capacity(elements.len());
    let mut new_elements = Vec::with_capacity(elements.len());
    let mut dirty = false;

    for element in elements {
        let Step { found, command } = next(Focus::Value(element.clone()))?;
        results.push(found);
        match command {
            Command::Clean => new_elements.push(element.clone()),
            Command::Dirty(new_element) => {
                new_elements.push(new_element);
                dirty = true;
            }
            Command::Pop => dirty = true,
        }
    }

    let command = if dirty {
        Command::Dirty(Value::from(new_elements))
    } else {
        Command::Clean
    };
    Ok(Step {
        found: Found::Many(results),
        command,
    })
}

// =============================================================================
// Filter
// =============================================================================

pub(super) fn get_filter(
    predicate: &SharedPredicate,
    data: &Focus,
    next: GetContinuation<'_>,
) -> Result<Found, TraversalError> {
    if data.is_absent() {
        return next(Focus::Absent);
    }

    let mut results = Vec::new();
    for element in element_view(data) {
        if predicate(element) {
            results.push(next(Focus::Value(element.clone()))?);
        }
    }
    Ok(Found::Many(results))
}

pub(super) fn get_and_update_filter(
    predicate: &SharedPredicate,
    data: &Focus,
    next: UpdateContinuation<'_>,
) -> Result<Step, TraversalError> {
    if data.is_absent() {
        return absent_step(next);
    }

    let elements = element_view(data);
    let mut results = Vec::new();
    let mut new_elements = Vec::with_capacity(elements.len());
    let mut dirty = false;

    for element in elements {
        if !predicate(element) {
            new_elements.push(element.clone());
            continue;
        }

        let Step { found, command } = next(Focus::Value(element.clone()))?;
        results.push(found);
        match command {
            Command::Clean => new_elements.push(element.clone()),
            Command::Dirty(new_element) => {
                // A replacement stays even if it no longer matches.
                new_elements.push(new_element);
                dirty = true;
            }
            Command::Pop => dirty = true,
        }
    }

    let command = if dirty {
        Command::Dirty(Value::from(new_elements))
    } else {
        Command::Clean
    };
    Ok(Step {
        found: Found::Many(results),
        command,
    })
}

// =============================================================================
// First / Last
// =============================================================================

pub(super) fn get_first(
    accessor: &Accessor,
    data: &Focus,
    next: GetContinuation<'_>,
) -> Result<Found, TraversalError> {
    next(traverse_edge(accessor, data, Edge::Front))
}

pub(super) fn get_last(
    accessor: &Accessor,
    data: &Focus,
    next: GetContinuation<'_>,
) -> Result<Found, TraversalError> {
    next(traverse_edge(accessor, data, Edge::Back))
}

pub(super) fn get_and_update_first(
    accessor: &Accessor,
    data: Focus,
    next: UpdateContinuation<'_>,
) -> Result<Step, TraversalError> {
    get_and_update_edge(accessor, data, next, Edge::Front)
}

pub(super) fn get_and_update_last(
    accessor: &Accessor,
    data: Focus,
    next: UpdateContinuation<'_>,
) -> Result<Step, TraversalError> {
    get_and_update_edge(accessor, data, next, Edge::Back)
}

#[derive(Clone, Copy)]
enum Edge {
    Front,
    Back,
}

fn traverse_edge(accessor: &Accessor, data: &Focus, edge: Edge) -> Focus {
    if data.is_absent() {
        return Focus::Absent;
    }

    let elements = element_view(data);
    let element = match edge {
        Edge::Front => elements.first(),
        Edge::Back => elements.last(),
    };
    element
        .filter(|element| !element.is_null())
        .cloned()
        .map_or_else(|| accessor.fallback(), Focus::Value)
}

fn get_and_update_edge(
    accessor: &Accessor,
    data: Focus,
    next: UpdateContinuation<'_>,
    edge: Edge,
) -> Result<Step, TraversalError> {
    let child = traverse_edge(accessor, &data, edge);
    let Step { found, command } = next(child)?;

    match command {
        Command::Clean => Ok(Step {
            found,
            command: Command::Clean,
        }),
        Command::Dirty(new_element) => {
            let mut elements = owned_elements(data);
            if elements.is_empty() {
                elements.push(new_element);
            } else {
                match edge {
                    Edge::Front => elements[0] = new_element,
                    Edge::Back => {
                        let end = elements.len() - 1;
                        elements[end] = new_element;
                    }
                }
            }
            Ok(Step {
                found,
                command: Command::Dirty(Value::from(elements)),
            })
        }
        Command::Pop => {
            let mut elements = owned_elements(data);
            if elements.is_empty() {
                return Ok(Step {
                    found,
                    command: Command::Clean,
                });
            }
            match edge {
                Edge::Front => {
                    elements.remove(0);
                }
                Edge::Back => {
                    elements.pop();
                }
            }
            Ok(Step {
                found,
                command: Command::Dirty(Value::from(elements)),
            })
        }
    }
}

fn owned_elements(data: Focus) -> Vec<Value> {
    match data {
        Focus::Value(Value::Seq(elements)) => match ReferenceCounter::try_unwrap(elements) {
            Ok(owned) => owned,
            Err(shared) => shared.as_ref().clone(),
        },
        _ => Vec::new(),
    }
}
