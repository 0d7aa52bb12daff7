//! Board Store
//!
//! The in-memory lists and their ordered card sequences. Every mutation
//! either applies fully or returns an error with the board untouched.

mod pending;
mod reorder;

pub use pending::{Compensation, OpId, PendingLog, TitleLedger};
pub use reorder::{reorder, DragLocation, DropResult};

use std::collections::{HashMap, HashSet};

use crate::error::BoardError;
use crate::models::{Attachment, BoardList, Card, ListId};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    lists: Vec<BoardList>,
    cards: HashMap<ListId, Vec<Card>>,
}

/// What `remove_list` took out, enough to put it back
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedList {
    pub index: usize,
    pub list: BoardList,
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemovedCard {
    pub list_id: ListId,
    pub index: usize,
    pub card: Card,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole board with freshly fetched state.
    ///
    /// Card sequences for unknown lists are dropped. A card id seen in more
    /// than one list is kept only in the first list (column order).
    pub fn load_board(&mut self, lists: Vec<BoardList>, mut cards_by_list: HashMap<ListId, Vec<Card>>) {
        let mut seen_lists = HashSet::new();
        let mut seen_cards = HashSet::new();
        let mut next = Board::default();

        for list in lists {
            if !seen_lists.insert(list.id.clone()) {
                log::warn!("[BOARD] duplicate list {} in fetched board, skipped", list.id);
                continue;
            }
            let mut cards = cards_by_list.remove(&list.id).unwrap_or_default();
            cards.retain(|card| {
                let fresh = seen_cards.insert(card.id.clone());
                if !fresh {
                    log::warn!("[BOARD] card {} listed twice, keeping first", card.id);
                }
                fresh
            });
            next.cards.insert(list.id.clone(), cards);
            next.lists.push(list);
        }
        for list_id in cards_by_list.keys() {
            log::warn!("[BOARD] cards for unknown list {} dropped", list_id);
        }

        *self = next;
    }

    pub fn lists(&self) -> &[BoardList] {
        &self.lists
    }

    pub fn list(&self, list_id: &str) -> Option<&BoardList> {
        self.lists.iter().find(|l| l.id == list_id)
    }

    pub fn contains_list(&self, list_id: &str) -> bool {
        self.cards.contains_key(list_id)
    }

    /// Cards of a list in display order; empty for unknown lists
    pub fn cards(&self, list_id: &str) -> &[Card] {
        self.cards.get(list_id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn card(&self, card_id: &str) -> Option<&Card> {
        self.cards.values().flatten().find(|c| c.id == card_id)
    }

    pub fn contains_card(&self, card_id: &str) -> bool {
        self.card(card_id).is_some()
    }

    /// The list holding a card and its index there
    pub fn locate_card(&self, card_id: &str) -> Option<(&str, usize)> {
        self.lists.iter().find_map(|list| {
            self.cards(&list.id)
                .iter()
                .position(|c| c.id == card_id)
                .map(|index| (list.id.as_str(), index))
        })
    }

    pub fn card_count(&self) -> usize {
        self.cards.values().map(Vec::len).sum()
    }

    pub fn insert_list(&mut self, list: BoardList) -> Result<(), BoardError> {
        if self.contains_list(&list.id) {
            return Err(BoardError::DuplicateId(list.id));
        }
        self.cards.insert(list.id.clone(), Vec::new());
        self.lists.push(list);
        Ok(())
    }

    /// Remove a list together with its whole card sequence
    pub fn remove_list(&mut self, list_id: &str) -> Result<RemovedList, BoardError> {
        let index = self
            .lists
            .iter()
            .position(|l| l.id == list_id)
            .ok_or_else(|| BoardError::NotFound(list_id.to_string()))?;
        let list = self.lists.remove(index);
        let cards = self.cards.remove(list_id).unwrap_or_default();
        Ok(RemovedList { index, list, cards })
    }

    /// Append, or insert at `at_index` (clamped to the sequence length).
    /// Returns the index the card landed at.
    pub fn insert_card(&mut self, list_id: &str, card: Card, at_index: Option<usize>) -> Result<usize, BoardError> {
        if !self.contains_list(list_id) {
            return Err(BoardError::UnknownList(list_id.to_string()));
        }
        if self.contains_card(&card.id) {
            return Err(BoardError::DuplicateId(card.id));
        }
        let cards = self.cards.entry(list_id.to_string()).or_default();
        let index = at_index.map_or(cards.len(), |i| i.min(cards.len()));
        cards.insert(index, card);
        Ok(index)
    }

    pub fn remove_card(&mut self, list_id: &str, card_id: &str) -> Result<RemovedCard, BoardError> {
        let cards = self
            .cards
            .get_mut(list_id)
            .ok_or_else(|| BoardError::NotFound(card_id.to_string()))?;
        let index = cards
            .iter()
            .position(|c| c.id == card_id)
            .ok_or_else(|| BoardError::NotFound(card_id.to_string()))?;
        let card = cards.remove(index);
        Ok(RemovedCard { list_id: list_id.to_string(), index, card })
    }

    /// Move `card_id`, which must currently sit at `from`, to `to`
    pub fn move_card(&mut self, card_id: &str, from: &DragLocation, to: &DragLocation) -> Result<(), BoardError> {
        let at_source = self
            .cards
            .get(&from.list_id)
            .ok_or_else(|| BoardError::UnknownList(from.list_id.clone()))?
            .get(from.index)
            .map(|c| c.id.as_str());
        if at_source != Some(card_id) {
            return Err(BoardError::NotFound(card_id.to_string()));
        }
        *self = reorder(self, from, Some(to))?;
        Ok(())
    }

    /// Apply a drop event. Returns false for a cancelled drop.
    pub fn apply_drop(&mut self, drop: &DropResult) -> Result<bool, BoardError> {
        match &drop.destination {
            Some(destination) => {
                self.move_card(&drop.card_id, &drop.source, destination)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn update_card_title(&mut self, card_id: &str, title: impl Into<String>) -> Result<(), BoardError> {
        self.card_mut(card_id)?.title = title.into();
        Ok(())
    }

    pub fn update_card_attachments(&mut self, card_id: &str, attachments: Vec<Attachment>) -> Result<(), BoardError> {
        self.card_mut(card_id)?.attachments = attachments;
        Ok(())
    }

    fn card_mut(&mut self, card_id: &str) -> Result<&mut Card, BoardError> {
        self.cards
            .values_mut()
            .flatten()
            .find(|c| c.id == card_id)
            .ok_or_else(|| BoardError::NotFound(card_id.to_string()))
    }

    /// Put a removed list back at its old column position
    pub(crate) fn restore_list(&mut self, removed: RemovedList) -> Result<(), BoardError> {
        if self.contains_list(&removed.list.id) {
            return Err(BoardError::DuplicateId(removed.list.id));
        }
        let mut cards = removed.cards;
        cards.retain(|c| !self.contains_card(&c.id));
        let index = removed.index.min(self.lists.len());
        self.cards.insert(removed.list.id.clone(), cards);
        self.lists.insert(index, removed.list);
        Ok(())
    }
}
