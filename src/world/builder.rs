use log::{debug, warn};
use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

use super::World;
use super::content::{RoomSpec, WorldContent};
use super::model::{
    Character, Direction, Enemy, GRID_SIZE, Player, Position, Room, RoomKind, SessionStats,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("room '{id}' placed outside the grid at ({x}, {y})")]
    OutOfBounds { id: String, x: i32, y: i32 },

    #[error("rooms '{first}' and '{second}' both placed at ({x}, {y})")]
    CellTaken {
        first: String,
        second: String,
        x: i32,
        y: i32,
    },

    #[error("no room placed at ({x}, {y})")]
    EmptyCell { x: i32, y: i32 },

    #[error("enemy in room '{room}' wields unknown weapon '{weapon}'")]
    UnknownWeapon { room: String, weapon: String },

    #[error("pool placement must be a permutation of 0..{expected}")]
    BadPlacement { expected: usize },
}

impl World {
    /// Build the world, shuffling pool rooms into their slots with `rng`.
    pub fn construct<R: Rng + ?Sized>(
        player: Player,
        content: &WorldContent,
        rng: &mut R,
    ) -> Result<World, BuildError> {
        let mut order: Vec<usize> = (0..content.pool.len()).collect();
        order.shuffle(rng);
        Self::with_placement(player, content, &order)
    }

    /// Build the world with an explicit pool placement: pool room `order[i]`
    /// goes into `content.pool_slots[i]`.
    pub fn with_placement(
        mut player: Player,
        content: &WorldContent,
        order: &[usize],
    ) -> Result<World, BuildError> {
        if !is_permutation(order, content.pool.len()) || order.len() != content.pool_slots.len() {
            return Err(BuildError::BadPlacement {
                expected: content.pool.len(),
            });
        }

        let mut cells: Vec<Option<Room>> = vec![None; (GRID_SIZE * GRID_SIZE) as usize];

        for spec in &content.anchors {
            let Some(at) = spec.at else { continue };
            let mut room = make_room(spec, content)?;
            if spec.carried {
                if let Some(item) = room.item.as_mut() {
                    if let Some(weapon) = item.as_weapon() {
                        player.weapons.push(weapon.clone());
                        item.picked_up = true;
                    }
                }
            }
            place(&mut cells, at, room)?;
        }

        for (slot, &pool_idx) in content.pool_slots.iter().zip(order) {
            let spec = &content.pool[pool_idx];
            debug!("pool room '{}' placed at ({}, {})", spec.id, slot.x, slot.y);
            place(&mut cells, *slot, make_room(spec, content)?)?;
        }

        let end = &content.end_room;
        let mut end_room = Room::new(&end.id, &end.name, &end.desc);
        end_room.kind = RoomKind::End {
            rooms_required_to_clear: end.rooms_required_to_clear,
        };
        end_room.item = end.item.as_deref().map(|name| content.make_item(name));
        place(&mut cells, end.at, end_room)?;

        if end.rooms_required_to_clear > content.clearable_rooms() {
            warn!(
                "end room '{}' needs {} cleared rooms but only {} can be cleared; it is unreachable",
                end.id,
                end.rooms_required_to_clear,
                content.clearable_rooms()
            );
        }

        let mut rooms = Vec::with_capacity(cells.len());
        for (id, cell) in cells.into_iter().enumerate() {
            match cell {
                Some(room) => rooms.push(room),
                None => {
                    let pos = Position::from_room_id(id);
                    return Err(BuildError::EmptyCell { x: pos.x, y: pos.y });
                }
            }
        }

        link_grid(&mut rooms);
        player.position = content.start;

        Ok(World {
            id: content.id.clone(),
            name: content.name.clone(),
            desc: content.desc.clone(),
            rooms,
            player,
            stats: SessionStats::default(),
            win_item: content.win_item.clone(),
            start: content.start,
            lore: content.lore.clone(),
        })
    }
}

fn is_permutation(order: &[usize], len: usize) -> bool {
    let mut seen = vec![false; len];
    order.len() == len
        && order.iter().all(|&i| {
            i < len && !std::mem::replace(&mut seen[i], true)
        })
}

fn make_room(spec: &RoomSpec, content: &WorldContent) -> Result<Room, BuildError> {
    let mut room = Room::new(&spec.id, &spec.name, &spec.desc);
    room.item = spec.item.as_deref().map(|name| content.make_item(name));
    room.occupant = if let Some(enemy) = &spec.enemy {
        let Some(weapon) = content.weapon(&enemy.weapon) else {
            return Err(BuildError::UnknownWeapon {
                room: spec.id.clone(),
                weapon: enemy.weapon.clone(),
            });
        };
        Some(Character::Enemy(Enemy::new(&enemy.name, weapon.clone())))
    } else {
        spec.friend.clone().map(Character::Friend)
    };
    Ok(room)
}

fn place(cells: &mut [Option<Room>], at: Position, room: Room) -> Result<(), BuildError> {
    let Some(id) = at.room_id() else {
        return Err(BuildError::OutOfBounds {
            id: room.id,
            x: at.x,
            y: at.y,
        });
    };
    if let Some(existing) = &cells[id] {
        return Err(BuildError::CellTaken {
            first: existing.id.clone(),
            second: room.id,
            x: at.x,
            y: at.y,
        });
    }
    cells[id] = Some(room);
    Ok(())
}

/// Link every pair of grid-adjacent rooms in both directions.
fn link_grid(rooms: &mut [Room]) {
    for id in 0..rooms.len() {
        let pos = Position::from_room_id(id);
        for dir in [Direction::East, Direction::South] {
            if let Some(other) = pos.step(dir).room_id() {
                rooms[id].neighbours.insert(dir, other);
                rooms[other].neighbours.insert(dir.opposite(), id);
            }
        }
    }
}
