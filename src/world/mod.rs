use std::collections::HashSet;

mod builder;
mod content;
mod loader;
mod model;
mod validator;

pub use builder::BuildError;
pub use content::{EndRoomSpec, EnemySpec, Lore, RoomSpec, WorldContent};
pub use loader::{ContentError, load_content_from_file, load_content_from_str, load_default_content};
pub use model::{
    Character, Direction, Enemy, Friend, GRID_SIZE, Item, ItemKind, Player, Position, Room,
    RoomId, RoomKind, SessionStats, Weapon,
};
pub use validator::{ValidationError, validate_content};

/// Runtime world: the 3x3 room grid and the player walking it.
///
/// The grid's structure is fixed once built; only occupants, items and the
/// player change afterwards, and only through the engine.
#[derive(Debug, Clone)]
pub struct World {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub(crate) rooms: Vec<Room>,
    pub(crate) player: Player,
    pub(crate) stats: SessionStats,
    pub(crate) win_item: String,
    pub(crate) start: Position,
    pub(crate) lore: Lore,
}

impl World {
    /// All rooms in row-major order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    pub fn room_at(&self, pos: Position) -> Option<&Room> {
        pos.room_id().and_then(|id| self.rooms.get(id))
    }

    /// Grid rows, top to bottom, each left to right.
    pub fn grid(&self) -> impl Iterator<Item = &[Room]> {
        self.rooms.chunks(GRID_SIZE as usize)
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn position(&self) -> Position {
        self.player.position
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn inventory(&self) -> &[Weapon] {
        &self.player.weapons
    }

    pub fn cleared_rooms(&self) -> &HashSet<RoomId> {
        &self.player.cleared_rooms
    }

    pub fn cleared_count(&self) -> usize {
        self.player.cleared_rooms.len()
    }

    pub fn is_cleared(&self, id: RoomId) -> bool {
        self.player.has_cleared(id)
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn lore(&self) -> &Lore {
        &self.lore
    }

    pub fn win_item(&self) -> &str {
        &self.win_item
    }

    pub fn current_room(&self) -> Option<&Room> {
        self.room_at(self.player.position)
    }

    pub fn available_directions(&self) -> Vec<Direction> {
        self.current_room()
            .map(|r| r.directions().collect())
            .unwrap_or_default()
    }

    pub fn current_description(&self) -> &str {
        self.current_room().map(|r| r.desc.as_str()).unwrap_or_default()
    }

    /// What the player sees of whoever is in the current room, if anyone.
    pub fn occupant_text(&self) -> Option<String> {
        let room = self.current_room()?;
        if let Some(f) = room.friend() {
            return Some(format!("{}: \"{}\"", f.name, f.dialogue));
        }
        room.enemy().map(|e| {
            if e.defeated {
                format!("{} lies defeated.", e.name)
            } else {
                format!("There is {} in the room.", e.name)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock_world() -> World {
        let content = load_default_content().expect("stock world loads");
        World::with_placement(Player::new("Tester"), &content, &[0, 1, 2, 3, 4])
            .expect("world builds")
    }

    #[test]
    fn occupant_text_follows_the_occupant() {
        let mut world = stock_world();
        assert_eq!(world.occupant_text(), None);

        world.player.position = Position::new(0, 2);
        assert!(
            world
                .occupant_text()
                .is_some_and(|t| t.starts_with("A friendly looking mouse. Not suspicious at all: \"Hello"))
        );

        world.player.position = Position::new(2, 1);
        assert_eq!(
            world.occupant_text().as_deref(),
            Some("There is An old babusia with a cat in the room.")
        );

        if let Some(Character::Enemy(e)) = world.rooms[5].occupant.as_mut() {
            e.defeated = true;
        }
        assert_eq!(
            world.occupant_text().as_deref(),
            Some("An old babusia with a cat lies defeated.")
        );
    }
}
