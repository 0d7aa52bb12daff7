//! Drag Reorder Engine
//!
//! Pure computation of the board that results from a drop. The input board
//! is never touched; only the sequences involved in the move are rebuilt.

use super::Board;
use crate::error::BoardError;
use crate::models::{CardId, ListId};

/// A (list, index) position on the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragLocation {
    pub list_id: ListId,
    pub index: usize,
}

impl DragLocation {
    pub fn new(list_id: impl Into<ListId>, index: usize) -> Self {
        Self { list_id: list_id.into(), index }
    }
}

/// Outcome of a drag gesture. No destination means the drop was cancelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropResult {
    pub card_id: CardId,
    pub source: DragLocation,
    pub destination: Option<DragLocation>,
}

/// Compute the board after moving the card at `source` to `destination`.
///
/// Within one list the destination index refers to the sequence after the
/// card has been taken out. Across lists the destination sequence is read as
/// is. Destination indices past the end append.
pub fn reorder(board: &Board, source: &DragLocation, destination: Option<&DragLocation>) -> Result<Board, BoardError> {
    let Some(destination) = destination else {
        return Ok(board.clone());
    };

    let mut source_cards = board
        .cards
        .get(&source.list_id)
        .ok_or_else(|| BoardError::UnknownList(source.list_id.clone()))?
        .clone();
    if source.index >= source_cards.len() {
        return Err(BoardError::NotFound(format!("{}[{}]", source.list_id, source.index)));
    }

    let mut next = board.clone();
    if source.list_id == destination.list_id {
        let moved = source_cards.remove(source.index);
        let at = destination.index.min(source_cards.len());
        source_cards.insert(at, moved);
        next.cards.insert(source.list_id.clone(), source_cards);
    } else {
        let mut dest_cards = board
            .cards
            .get(&destination.list_id)
            .ok_or_else(|| BoardError::UnknownList(destination.list_id.clone()))?
            .clone();
        let moved = source_cards.remove(source.index);
        let at = destination.index.min(dest_cards.len());
        dest_cards.insert(at, moved);
        next.cards.insert(source.list_id.clone(), source_cards);
        next.cards.insert(destination.list_id.clone(), dest_cards);
    }
    Ok(next)
}
