// Copyright 2025-2026 Neil Henderson
//
//! The `label_maker` module defines the [LabelMaker] type.

use super::TackyLabel;

/// The Label Maker generates unique label names for use in the IR.
///
/// One counter is shared by every prefix and every function of a compilation, so labels are unique across the
/// whole program.
#[derive(Debug, Default)]
pub struct LabelMaker {
    next_label_index: usize,
}

impl LabelMaker {
    /// Creates a new label maker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a unique label `<prefix>.<n>`.
    ///
    /// Multiple calls to this function with the same `prefix` return different, unique labels.
    pub fn make_label(&mut self, prefix: &str) -> TackyLabel {
        let idx = self.next_label_index;
        self.next_label_index += 1;
        TackyLabel(format!("{prefix}.{idx}"))
    }

    /// The `continue` label of the loop with the given id.
    pub fn continue_label(loop_id: &str) -> TackyLabel {
        TackyLabel(format!("continue.{loop_id}"))
    }

    /// The `break` label of the loop with the given id.
    pub fn break_label(loop_id: &str) -> TackyLabel {
        TackyLabel(format!("break.{loop_id}"))
    }
}
