// --- File: crates/tablebook_grid/src/selection.rs ---
//! Turns pointer input into a single-table slot interval.
//!
//! Drag mode:      Idle -> Dragging -> PendingConfirm -> Idle
//! Two-click mode: Idle -> AwaitingSecond -> PendingConfirm -> Idle
//!
//! PendingConfirm lasts while the create form is open; [`SelectionEngine::reset`]
//! is called on save or cancel.

use serde::{Deserialize, Serialize};

use crate::table::TableId;

/// Slot interval on one table, `end` exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub table: TableId,
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn contains(&self, table: &TableId, slot: usize) -> bool {
        self.table == *table && slot >= self.start && slot < self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Orders the two ends of a gesture; the result never depends on drag direction.
pub fn normalize(table: &TableId, anchor: usize, cursor: usize) -> Selection {
    Selection {
        table: table.clone(),
        start: anchor.min(cursor),
        end: anchor.max(cursor) + 1,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SelectionState {
    #[default]
    Idle,
    Dragging {
        table: TableId,
        anchor: usize,
        cursor: usize,
    },
    AwaitingSecond {
        table: TableId,
        anchor: usize,
    },
    PendingConfirm {
        selection: Selection,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionEngine {
    state: SelectionState,
}

impl SelectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == SelectionState::Idle
    }

    /// Pointer pressed on a free cell. Ignored while a selection awaits confirmation.
    pub fn begin_selection(&mut self, table: &TableId, slot: usize) {
        if matches!(self.state, SelectionState::PendingConfirm { .. }) {
            return;
        }
        self.state = SelectionState::Dragging {
            table: table.clone(),
            anchor: slot,
            cursor: slot,
        };
    }

    /// Pointer moved over a cell. Only cells on the anchor's table move the cursor.
    pub fn extend_selection(&mut self, table: &TableId, slot: usize) {
        if let SelectionState::Dragging {
            table: anchor_table,
            cursor,
            ..
        } = &mut self.state
        {
            if anchor_table == table {
                *cursor = slot;
            }
        }
    }

    /// Pointer released. Returns the interval now awaiting confirmation.
    pub fn finish_drag(&mut self) -> Option<Selection> {
        let selection = match &self.state {
            SelectionState::Dragging {
                table,
                anchor,
                cursor,
            } => normalize(table, *anchor, *cursor),
            _ => return None,
        };
        self.state = SelectionState::PendingConfirm {
            selection: selection.clone(),
        };
        Some(selection)
    }

    /// Two-click input. The second click on the anchor's table completes the interval;
    /// a click on another table restarts from that cell.
    pub fn click(&mut self, table: &TableId, slot: usize) -> Option<Selection> {
        let completed = match &self.state {
            SelectionState::PendingConfirm { .. } => return None,
            SelectionState::AwaitingSecond {
                table: anchor_table,
                anchor,
            } if anchor_table == table => Some(normalize(table, *anchor, slot)),
            _ => None,
        };

        match completed {
            Some(selection) => {
                self.state = SelectionState::PendingConfirm {
                    selection: selection.clone(),
                };
                Some(selection)
            }
            None => {
                self.state = SelectionState::AwaitingSecond {
                    table: table.clone(),
                    anchor: slot,
                };
                None
            }
        }
    }

    /// The interval described by the current state, if any.
    pub fn normalize(&self) -> Option<Selection> {
        match &self.state {
            SelectionState::Idle => None,
            SelectionState::Dragging {
                table,
                anchor,
                cursor,
            } => Some(normalize(table, *anchor, *cursor)),
            SelectionState::AwaitingSecond { table, anchor } => {
                Some(normalize(table, *anchor, *anchor))
            }
            SelectionState::PendingConfirm { selection } => Some(selection.clone()),
        }
    }

    pub fn pending(&self) -> Option<&Selection> {
        match &self.state {
            SelectionState::PendingConfirm { selection } => Some(selection),
            _ => None,
        }
    }

    /// First cell of a two-click selection.
    pub fn anchor(&self) -> Option<(&TableId, usize)> {
        match &self.state {
            SelectionState::AwaitingSecond { table, anchor } => Some((table, *anchor)),
            _ => None,
        }
    }

    /// Back to Idle, on save or cancel.
    pub fn reset(&mut self) {
        self.state = SelectionState::Idle;
    }
}
