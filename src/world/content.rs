use std::collections::HashMap;

use super::model::{Friend, Item, Position, Weapon};

/// Everything needed to build a world, as read from a content file.
#[derive(Debug, Clone)]
pub struct WorldContent {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub player_name: String,
    /// Picking up an item with this name wins the game.
    pub win_item: String,
    pub start: Position,
    /// Cells that pool rooms are shuffled into.
    pub pool_slots: Vec<Position>,
    pub weapons: Vec<Weapon>,
    /// Rooms with a fixed cell.
    pub anchors: Vec<RoomSpec>,
    /// Rooms whose cell is chosen once at construction.
    pub pool: Vec<RoomSpec>,
    pub end_room: EndRoomSpec,
    pub lore: Lore,
}

#[derive(Debug, Clone)]
pub struct RoomSpec {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub at: Option<Position>,
    pub item: Option<String>,
    /// The item starts in the player's inventory instead of on the floor.
    pub carried: bool,
    pub enemy: Option<EnemySpec>,
    pub friend: Option<Friend>,
}

#[derive(Debug, Clone)]
pub struct EnemySpec {
    pub name: String,
    pub weapon: String,
}

#[derive(Debug, Clone)]
pub struct EndRoomSpec {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub at: Position,
    pub item: Option<String>,
    pub rooms_required_to_clear: usize,
}

/// Flavour text for fight results, keyed by weapon names.
#[derive(Debug, Clone, Default)]
pub struct Lore {
    /// Shown when an enemy wielding the keyed weapon is beaten.
    pub kill_texts: HashMap<String, String>,
    /// Shown when the player's weapon (first) loses against the enemy's (second).
    pub death_texts: HashMap<(String, String), String>,
}

impl Lore {
    pub fn kill_text(&self, enemy_weapon: &str) -> Option<&str> {
        self.kill_texts.get(enemy_weapon).map(String::as_str)
    }

    pub fn death_text(&self, player_weapon: &str, enemy_weapon: &str) -> Option<&str> {
        self.death_texts
            .get(&(player_weapon.to_string(), enemy_weapon.to_string()))
            .map(String::as_str)
    }
}

impl WorldContent {
    pub fn weapon(&self, name: &str) -> Option<&Weapon> {
        self.weapons.iter().find(|w| w.name == name)
    }

    /// Turn an item name into an item: known weapon names become weapons.
    pub fn make_item(&self, name: &str) -> Item {
        match self.weapon(name) {
            Some(w) => Item::weapon(w.clone()),
            None => Item::plain(name),
        }
    }

    /// Rooms that count towards the end-room quota (everything but the end room).
    pub fn clearable_rooms(&self) -> usize {
        self.anchors.len() + self.pool.len()
    }
}
