use std::collections::{BTreeMap, HashSet};

use strum::{Display, EnumIter, EnumString};

//////////////////////////////
/// GAME STRUCTS AND ENUMS ///
//////////////////////////////

/// Side length of the square room grid.
pub const GRID_SIZE: i32 = 3;

/// Index of a room in the world's row-major grid.
pub type RoomId = usize;

/// A grid coordinate. `x` is the column, `y` the row; `(0, 0)` is the top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    pub fn in_bounds(self) -> bool {
        (0..GRID_SIZE).contains(&self.x) && (0..GRID_SIZE).contains(&self.y)
    }

    /// Row-major room index, or `None` outside the grid.
    pub fn room_id(self) -> Option<RoomId> {
        if self.in_bounds() {
            Some((self.y * GRID_SIZE + self.x) as RoomId)
        } else {
            None
        }
    }

    pub fn from_room_id(id: RoomId) -> Self {
        let id = id as i32;
        Position::new(id % GRID_SIZE, id / GRID_SIZE)
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Position::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Direction {
    #[strum(to_string = "north", serialize = "n")]
    North,
    #[strum(to_string = "south", serialize = "s")]
    South,
    #[strum(to_string = "east", serialize = "e")]
    East,
    #[strum(to_string = "west", serialize = "w")]
    West,
}

impl Direction {
    /// Grid delta as `(dx, dy)`; north is towards row 0.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Weapon {
    pub name: String,
    /// Name of the weapon this one defeats.
    pub beats: String,
}

impl Weapon {
    pub fn new(name: impl Into<String>, beats: impl Into<String>) -> Self {
        Weapon {
            name: name.into(),
            beats: beats.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    Plain,
    Weapon(Weapon),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub kind: ItemKind,
    pub picked_up: bool,
}

impl Item {
    pub fn plain(name: impl Into<String>) -> Self {
        Item {
            name: name.into(),
            kind: ItemKind::Plain,
            picked_up: false,
        }
    }

    pub fn weapon(weapon: Weapon) -> Self {
        Item {
            name: weapon.name.clone(),
            kind: ItemKind::Weapon(weapon),
            picked_up: false,
        }
    }

    pub fn as_weapon(&self) -> Option<&Weapon> {
        match &self.kind {
            ItemKind::Weapon(w) => Some(w),
            ItemKind::Plain => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enemy {
    pub name: String,
    /// The weapon this enemy fights with; a player weapon that beats it wins.
    pub weapon: Weapon,
    pub defeated: bool,
}

impl Enemy {
    pub fn new(name: impl Into<String>, weapon: Weapon) -> Self {
        Enemy {
            name: name.into(),
            weapon,
            defeated: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Friend {
    pub name: String,
    pub dialogue: String,
}

/// Anyone who can occupy a room besides the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Character {
    Enemy(Enemy),
    Friend(Friend),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomKind {
    Normal,
    /// Entry is refused until the player has cleared `rooms_required_to_clear` rooms.
    End { rooms_required_to_clear: usize },
}

#[derive(Debug, Clone)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub kind: RoomKind,
    pub occupant: Option<Character>,
    pub item: Option<Item>,
    pub neighbours: BTreeMap<Direction, RoomId>,
}

impl Room {
    pub fn new(id: impl Into<String>, name: impl Into<String>, desc: impl Into<String>) -> Self {
        Room {
            id: id.into(),
            name: name.into(),
            desc: desc.into(),
            kind: RoomKind::Normal,
            occupant: None,
            item: None,
            neighbours: BTreeMap::new(),
        }
    }

    pub fn enemy(&self) -> Option<&Enemy> {
        match &self.occupant {
            Some(Character::Enemy(e)) => Some(e),
            _ => None,
        }
    }

    pub fn friend(&self) -> Option<&Friend> {
        match &self.occupant {
            Some(Character::Friend(f)) => Some(f),
            _ => None,
        }
    }

    /// Directions with a linked neighbour, in a stable order.
    pub fn directions(&self) -> impl Iterator<Item = Direction> + '_ {
        self.neighbours.keys().copied()
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    /// Owned weapons in acquisition order; menu indices refer to this order.
    pub weapons: Vec<Weapon>,
    pub cleared_rooms: HashSet<RoomId>,
    pub position: Position,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Player {
            name: name.into(),
            weapons: Vec::new(),
            cleared_rooms: HashSet::new(),
            position: Position::default(),
        }
    }

    pub fn has_cleared(&self, room: RoomId) -> bool {
        self.cleared_rooms.contains(&room)
    }
}

/// Per-session counters owned by the world.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub enemies_defeated: u32,
    pub moves: u32,
    pub refused_moves: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_map_to_row_major_ids() {
        assert_eq!(Position::new(0, 0).room_id(), Some(0));
        assert_eq!(Position::new(2, 0).room_id(), Some(2));
        assert_eq!(Position::new(0, 1).room_id(), Some(3));
        assert_eq!(Position::new(2, 2).room_id(), Some(8));
        assert_eq!(Position::new(3, 0).room_id(), None);
        assert_eq!(Position::new(0, -1).room_id(), None);
        assert_eq!(Position::from_room_id(5), Position::new(2, 1));
    }

    #[test]
    fn direction_labels_parse_case_insensitively() {
        assert_eq!("north".parse::<Direction>().ok(), Some(Direction::North));
        assert_eq!("W".parse::<Direction>().ok(), Some(Direction::West));
        assert_eq!("East".parse::<Direction>().ok(), Some(Direction::East));
        assert!("up".parse::<Direction>().is_err());
        assert_eq!(Direction::South.to_string(), "south");
    }

    #[test]
    fn opposite_undoes_delta() {
        use strum::IntoEnumIterator;
        for dir in Direction::iter() {
            let p = Position::new(1, 1);
            assert_eq!(p.step(dir).step(dir.opposite()), p);
        }
    }
}
