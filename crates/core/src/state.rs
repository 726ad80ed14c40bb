// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use shift_desk_domain::{IdentityToken, ShiftPeriod};

/// The complete in-memory shift state of one employee session.
///
/// Canonical periods come from the last reconciliation and are replaced
/// wholesale by the next one. Drafts are held separately and shadow the
/// canonical period with the same id until that period is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShiftState {
    /// Committed periods produced by reconciliation.
    pub periods: Vec<ShiftPeriod>,
    /// In-progress local edits, keyed by period id.
    pub drafts: Vec<ShiftPeriod>,
    /// The period currently being edited.
    pub selected: Option<ShiftPeriod>,
}

impl ShiftState {
    /// Creates an empty state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            periods: Vec::new(),
            drafts: Vec::new(),
            selected: None,
        }
    }

    /// Creates a state holding only previously persisted drafts.
    #[must_use]
    pub const fn with_drafts(drafts: Vec<ShiftPeriod>) -> Self {
        Self {
            periods: Vec::new(),
            drafts,
            selected: None,
        }
    }

    /// Finds a canonical period by id.
    #[must_use]
    pub fn find_period(&self, period_id: &IdentityToken) -> Option<&ShiftPeriod> {
        self.periods.iter().find(|p| &p.id == period_id)
    }

    /// Finds a draft by id.
    #[must_use]
    pub fn find_draft(&self, period_id: &IdentityToken) -> Option<&ShiftPeriod> {
        self.drafts.iter().find(|p| &p.id == period_id)
    }

    /// Returns whether a draft exists for the period.
    #[must_use]
    pub fn has_draft(&self, period_id: &IdentityToken) -> bool {
        self.find_draft(period_id).is_some()
    }

    /// Returns every known period once, drafts shadowing canonical periods.
    ///
    /// Canonical order is kept, drafts without a canonical counterpart follow.
    #[must_use]
    pub fn known_periods(&self) -> Vec<&ShiftPeriod> {
        let mut known: Vec<&ShiftPeriod> = self
            .periods
            .iter()
            .map(|p| self.find_draft(&p.id).unwrap_or(p))
            .collect();
        known.extend(
            self.drafts
                .iter()
                .filter(|d| self.find_period(&d.id).is_none()),
        );
        known
    }

    /// Inserts a draft, replacing any existing draft with the same id.
    pub(crate) fn upsert_draft(&mut self, draft: ShiftPeriod) {
        if let Some(existing) = self.drafts.iter_mut().find(|d| d.id == draft.id) {
            *existing = draft;
        } else {
            self.drafts.push(draft);
        }
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: ShiftState,
    /// Whether the drafts collection changed and must be persisted.
    pub drafts_changed: bool,
}
