//! Session and field state
//!
//! Everything the controller mutates between events lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable identity of a spawned item; doubles as the handle the
/// rendering adapter uses to find its visual node
pub type ItemId = u32;

/// Item kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Trash: click it to score
    Target,
    /// Fish: clicking it loses the game
    Hazard,
}

impl ItemKind {
    /// CSS class used by the web surface
    pub fn class_name(&self) -> &'static str {
        match self {
            ItemKind::Target => "trash",
            ItemKind::Hazard => "fish",
        }
    }

    pub fn from_class_name(s: &str) -> Option<Self> {
        match s {
            "trash" => Some(ItemKind::Target),
            "fish" => Some(ItemKind::Hazard),
            _ => None,
        }
    }
}

/// A clickable item on the field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub kind: ItemKind,
    /// Top-left corner (x = left, y = top), in field pixels
    pub pos: Vec2,
    /// Image path rendered for this item
    pub asset: String,
}

/// The rectangular play area and the items on it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
    /// Items in spawn order
    pub items: Vec<Item>,
    next_id: ItemId,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            items: Vec::new(),
            next_id: 1,
        }
    }

    /// Field dimensions as a vector
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Track a new rendering surface size (takes effect for the next spawn)
    pub fn resize(&mut self, size: Vec2) {
        self.width = size.x;
        self.height = size.y;
    }

    /// Allocate a new item ID
    ///
    /// IDs keep increasing across clears so a late event can never hit a
    /// fresh item that happens to reuse an old id.
    pub fn next_item_id(&mut self) -> ItemId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Remove an item, returning it if it was present
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn count(&self, kind: ItemKind) -> usize {
        self.items.iter().filter(|item| item.kind == kind).count()
    }

    /// IDs of all items of a kind, in spawn order
    pub fn ids_of(&self, kind: ItemKind) -> Vec<ItemId> {
        self.items
            .iter()
            .filter(|item| item.kind == kind)
            .map(|item| item.id)
            .collect()
    }
}

/// How a finished session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Lose,
}

impl Outcome {
    pub fn from_win(win: bool) -> Self {
        if win { Outcome::Win } else { Outcome::Lose }
    }
}

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameStatus {
    /// Nothing running (initial state, or after a manual stop)
    #[default]
    Idle,
    /// Countdown running, clicks count
    Running,
    /// Session ended
    Finished(Outcome),
}

/// One play-through
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSession {
    /// Session number, bumped on every start
    pub id: u64,
    pub status: GameStatus,
    /// Targets swept so far
    pub score: u32,
    /// Seconds left on the clock
    pub remaining_secs: u32,
}

impl GameSession {
    /// Fresh running session following `previous`
    pub fn next(previous: &GameSession, duration_sec: u32) -> Self {
        Self {
            id: previous.id + 1,
            status: GameStatus::Running,
            score: 0,
            remaining_secs: duration_sec,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.status {
            GameStatus::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(field: &mut Field, kind: ItemKind) -> ItemId {
        let id = field.next_item_id();
        field.items.push(Item {
            id,
            kind,
            pos: Vec2::ZERO,
            asset: String::new(),
        });
        id
    }

    #[test]
    fn test_ids_survive_clear() {
        let mut field = Field::new(300.0, 200.0);
        let a = item(&mut field, ItemKind::Target);
        field.clear();
        let b = item(&mut field, ItemKind::Target);
        assert_ne!(a, b);
        assert!(field.get(a).is_none());
    }

    #[test]
    fn test_remove_and_count() {
        let mut field = Field::new(300.0, 200.0);
        let t = item(&mut field, ItemKind::Target);
        item(&mut field, ItemKind::Hazard);
        item(&mut field, ItemKind::Target);
        assert_eq!(field.count(ItemKind::Target), 2);

        assert_eq!(field.remove(t).map(|i| i.kind), Some(ItemKind::Target));
        assert!(field.remove(t).is_none());
        assert_eq!(field.count(ItemKind::Target), 1);
        assert_eq!(field.count(ItemKind::Hazard), 1);
    }

    #[test]
    fn test_class_names_round_trip() {
        for kind in [ItemKind::Target, ItemKind::Hazard] {
            assert_eq!(ItemKind::from_class_name(kind.class_name()), Some(kind));
        }
        assert_eq!(ItemKind::from_class_name("game__field"), None);
    }

    #[test]
    fn test_next_session_resets() {
        let mut session = GameSession::default();
        session.score = 4;
        session.status = GameStatus::Finished(Outcome::Lose);
        let next = GameSession::next(&session, 5);
        assert_eq!(next.id, 1);
        assert_eq!(next.score, 0);
        assert_eq!(next.remaining_secs, 5);
        assert!(next.is_running());
        assert_eq!(session.outcome(), Some(Outcome::Lose));
    }
}
