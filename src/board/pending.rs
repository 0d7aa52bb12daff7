//! Pending Operation Log
//!
//! Optimistic mutations awaiting remote confirmation, each stored as the
//! compensation that undoes it.

use std::collections::{BTreeMap, HashMap};

use super::{Board, RemovedCard, RemovedList};
use crate::error::BoardError;
use crate::models::CardId;

pub type OpId = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum Compensation {
    /// Undo a card deletion
    RestoreCard(RemovedCard),
    /// Undo a list deletion, cards included
    RestoreList(RemovedList),
}

impl Compensation {
    /// Apply the undo. Fails instead of resurrecting anything that changed
    /// after the original mutation.
    pub fn apply(self, board: &mut Board) -> Result<(), BoardError> {
        match self {
            Compensation::RestoreCard(removed) => {
                board.insert_card(&removed.list_id, removed.card, Some(removed.index))?;
                Ok(())
            }
            Compensation::RestoreList(removed) => board.restore_list(removed),
        }
    }
}

#[derive(Debug, Default)]
pub struct PendingLog {
    next_id: OpId,
    ops: BTreeMap<OpId, Compensation>,
}

impl PendingLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an op id without recording an undo. Ids increase in the
    /// order operations are issued.
    pub fn next_op(&mut self) -> OpId {
        self.next_id += 1;
        self.next_id
    }

    pub fn record(&mut self, compensation: Compensation) -> OpId {
        let id = self.next_op();
        self.ops.insert(id, compensation);
        id
    }

    /// Remote side confirmed; forget the undo
    pub fn confirm(&mut self, id: OpId) -> bool {
        self.ops.remove(&id).is_some()
    }

    /// Remote side failed; hand back the undo to apply
    pub fn take(&mut self, id: OpId) -> Option<Compensation> {
        self.ops.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Renames in flight, per card.
///
/// Renames of one card are ordered by op id. The title a card should show is
/// the one from its newest rename that is still in flight or has succeeded;
/// failed renames drop out. Titles are never compared, so a title that comes
/// back (X, Y, X) cannot confuse a late failure.
#[derive(Debug, Default)]
pub struct TitleLedger {
    cards: HashMap<CardId, TitleTrack>,
}

#[derive(Debug)]
struct TitleTrack {
    /// Newest succeeded rename, or op 0 with the title the burst started from
    confirmed: (OpId, String),
    in_flight: BTreeMap<OpId, String>,
}

impl TitleTrack {
    fn shown(&self) -> &str {
        match self.in_flight.last_key_value() {
            Some((op, title)) if *op > self.confirmed.0 => title,
            _ => &self.confirmed.1,
        }
    }
}

impl TitleLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// `current` is the title shown before this rename was applied
    pub fn begin(&mut self, card_id: &str, op: OpId, current: &str, applied: &str) {
        self.cards
            .entry(card_id.to_string())
            .or_insert_with(|| TitleTrack { confirmed: (0, current.to_string()), in_flight: BTreeMap::new() })
            .in_flight
            .insert(op, applied.to_string());
    }

    /// Record the title the service stored. Returns the title the card
    /// should show now.
    pub fn succeed(&mut self, card_id: &str, op: OpId, stored: String) -> Option<String> {
        self.settle(card_id, op, Some(stored))
    }

    /// Drop a failed rename. Returns the title the card should show now.
    pub fn fail(&mut self, card_id: &str, op: OpId) -> Option<String> {
        self.settle(card_id, op, None)
    }

    fn settle(&mut self, card_id: &str, op: OpId, stored: Option<String>) -> Option<String> {
        let track = self.cards.get_mut(card_id)?;
        track.in_flight.remove(&op)?;
        if let Some(title) = stored {
            if op > track.confirmed.0 {
                track.confirmed = (op, title);
            }
        }
        let shown = track.shown().to_string();
        if track.in_flight.is_empty() {
            self.cards.remove(card_id);
        }
        Some(shown)
    }

    /// Renames still waiting for the service
    pub fn len(&self) -> usize {
        self.cards.values().map(|t| t.in_flight.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
