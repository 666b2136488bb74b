//! Interstitial cursor steps: the gaps between sequence elements.
//!
//! A cursor step does not address an element; it addresses the *empty
//! interval* before an offset. The gap before offset 0 is "the beginning"
//! (writing prepends), the gap at offset `len` is "the end" (writing
//! appends), and in general writing at the gap before offset `n` inserts
//! between elements `n - 1` and `n`. Because a gap holds nothing, popping
//! through a cursor step removes nothing and reports the position record
//! itself as what was found.
//!
//! `between_each` visits every gap of a sequence in order, all `len + 1`
//! of them, which makes it the interleaving counterpart of `all`.

use crate::error::TraversalError;
use crate::value::Value;

use super::sequence::element_view;
use super::{Command, Focus, Found, GetContinuation, Step, UpdateContinuation};

// =============================================================================
// CursorPosition
// =============================================================================

/// A description of one gap in a sequence, handed to transform functions
/// by cursor accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorPosition {
    offset: usize,
    element_before: Option<Value>,
    element_after: Option<Value>,
    first: bool,
    last: bool,
}

impl CursorPosition {
    pub(crate) fn at_gap(offset: usize, elements: &[Value]) -> Self {
        Self {
            offset,
            element_before: offset
                .checked_sub(1)
                .and_then(|position| elements.get(position))
                .cloned(),
            element_after: elements.get(offset).cloned(),
            first: offset == 0,
            last: offset == elements.len(),
        }
    }

    /// The offset an element written at this gap would occupy.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// The element to the left of the gap, if any.
    pub const fn element_before(&self) -> Option<&Value> {
        self.element_before.as_ref()
    }

    /// The element to the right of the gap, if any.
    pub const fn element_after(&self) -> Option<&Value> {
        self.element_after.as_ref()
    }

    /// `true` when this gap precedes the first element.
    pub const fn is_first(&self) -> bool {
        self.first
    }

    /// `true` when this gap follows the last element.
    pub const fn is_last(&self) -> bool {
        self.last
    }
}

/// Where a single-gap cursor step stands: before a fixed offset, or after
/// the last element regardless of length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GapLocator {
    Offset(usize),
    End,
}

const fn resolve_gap(gap: GapLocator, length: usize) -> usize {
    match gap {
        GapLocator::Offset(offset) => {
            if offset < length {
                offset
            } else {
                length
            }
        }
        GapLocator::End => length,
    }
}

// =============================================================================
// Before (single gap)
// =============================================================================

pub(super) fn get_before(
    gap: GapLocator,
    data: &Focus,
    next: GetContinuation<'_>,
) -> Result<Found, TraversalError> {
    let elements = element_view(data);
    let offset = resolve_gap(gap, elements.len());
    next(Focus::Cursor(CursorPosition::at_gap(offset, elements)))
}

pub(super) fn get_and_update_before(
    gap: GapLocator,
    data: &Focus,
    next: UpdateContinuation<'_>,
) -> Result<Step, TraversalError> {
    let elements = element_view(data);
    let offset = resolve_gap(gap, elements.len());
    let Step { found, command } = next(Focus::Cursor(CursorPosition::at_gap(offset, elements)))?;

    match command {
        // Nothing exists in a gap, so popping it removes nothing.
        Command::Clean | Command::Pop => Ok(Step {
            found,
            command: Command::Clean,
        }),
        Command::Dirty(new_element) => {
            let mut new_elements = elements.to_vec();
            new_elements.insert(offset, new_element);
            Ok(Step {
                found,
                command: Command::Dirty(Value::from(new_elements)),
            })
        }
    }
}

// =============================================================================
// BetweenEach (every gap)
// =============================================================================

pub(super) fn get_between_each(
    data: &Focus,
    next: GetContinuation<'_>,
) -> Result<Found, TraversalError> {
    let elements = element_view(data);
    let mut results = Vec::with_capacity(elements.len() + 1);
    for offset in 0..=elements.len() {
        results.push(next(Focus::Cursor(CursorPosition::at_gap(
            offset, elements,
        )))?);
    }
    Ok(Found::Many(results))
}

pub(super) fn get_and_update_between_each(
    data: &Focus,
    next: UpdateContinuation<'_>,
) -> Result<Step, TraversalError> {
    let elements = element_view(data);
    let mut results = Vec::with_capacity(elements.len() + 1);
    let mut new_elements = Vec::with_capacity(elements.len());
    let mut dirty = false;

    for offset in 0..=elements.len() {
        let Step { found, command } =
            next(Focus::Cursor(CursorPosition::at_gap(offset, elements)))?;
        results.push(found);
        match command {
            Command::Dirty(new_element) => {
                new_elements.push(new_element);
                dirty = true;
            }
            Command::Clean | Command::Pop => {}
        }
        if offset < elements.len() {
            new_elements.push(elements[offset].clone());
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
