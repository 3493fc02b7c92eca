use std::collections::{HashMap, HashSet};

use thiserror::Error;

use super::content::{RoomSpec, WorldContent};
use super::model::{GRID_SIZE, Position};

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    fn new(msg: impl Into<String>) -> Self {
        ValidationError {
            message: msg.into(),
        }
    }
}

pub fn validate_content(content: &WorldContent) -> Vec<ValidationError> {
    let mut errors: Vec<ValidationError> = Vec::new();

    // Weapons: unique names, and every `beats` must name a known weapon
    let weapon_names: HashSet<&str> = content.weapons.iter().map(|w| w.name.as_str()).collect();
    if weapon_names.len() != content.weapons.len() {
        errors.push(ValidationError::new("weapon names must be unique"));
    }
    for weapon in &content.weapons {
        if !weapon_names.contains(weapon.beats.as_str()) {
            errors.push(ValidationError::new(format!(
                "weapon '{}' beats unknown weapon '{}'",
                weapon.name, weapon.beats
            )));
        }
    }

    // Room ids must be unique across anchors, pool and the end room
    let mut seen_ids: HashSet<&str> = HashSet::new();
    let all_rooms = content.anchors.iter().chain(content.pool.iter());
    for id in all_rooms
        .clone()
        .map(|r| r.id.as_str())
        .chain(std::iter::once(content.end_room.id.as_str()))
    {
        if !seen_ids.insert(id) {
            errors.push(ValidationError::new(format!("duplicate room id '{}'", id)));
        }
    }

    for room in all_rooms {
        validate_room(content, room, &mut errors);
    }

    // Cells: anchors, end room and pool slots must tile the grid exactly once
    let mut owners: HashMap<Position, Vec<String>> = HashMap::new();
    let mut claim = |pos: Position, what: String, errors: &mut Vec<ValidationError>| {
        if !pos.in_bounds() {
            errors.push(ValidationError::new(format!(
                "{} at ({}, {}) lies outside the {}x{} grid",
                what, pos.x, pos.y, GRID_SIZE, GRID_SIZE
            )));
            return;
        }
        owners.entry(pos).or_default().push(what);
    };

    for room in &content.anchors {
        if let Some(at) = room.at {
            claim(at, format!("room '{}'", room.id), &mut errors);
        }
    }
    claim(
        content.end_room.at,
        format!("end room '{}'", content.end_room.id),
        &mut errors,
    );
    for (i, slot) in content.pool_slots.iter().enumerate() {
        claim(*slot, format!("pool slot {}", i), &mut errors);
    }

    for y in 0..GRID_SIZE {
        for x in 0..GRID_SIZE {
            match owners.get(&Position::new(x, y)) {
                None => errors.push(ValidationError::new(format!(
                    "cell ({}, {}) has no room",
                    x, y
                ))),
                Some(claims) if claims.len() > 1 => errors.push(ValidationError::new(format!(
                    "cell ({}, {}) is claimed more than once: {}",
                    x,
                    y,
                    claims.join(", ")
                ))),
                Some(_) => {}
            }
        }
    }

    if content.pool.len() != content.pool_slots.len() {
        errors.push(ValidationError::new(format!(
            "{} pool rooms but {} pool slots",
            content.pool.len(),
            content.pool_slots.len()
        )));
    }

    // The player must start on a fixed room
    if !content.anchors.iter().any(|r| r.at == Some(content.start)) {
        errors.push(ValidationError::new(format!(
            "start ({}, {}) is not an anchor room",
            content.start.x, content.start.y
        )));
    }

    if content.win_item.trim().is_empty() {
        errors.push(ValidationError::new("world.win_item may not be empty"));
    }

    errors
}

fn validate_room(content: &WorldContent, room: &RoomSpec, errors: &mut Vec<ValidationError>) {
    if room.enemy.is_some() && room.friend.is_some() {
        errors.push(ValidationError::new(format!(
            "room '{}' has both an enemy and a friend",
            room.id
        )));
    }

    if let Some(enemy) = &room.enemy {
        if content.weapon(&enemy.weapon).is_none() {
            errors.push(ValidationError::new(format!(
                "room '{}' enemy '{}' wields unknown weapon '{}'",
                room.id, enemy.name, enemy.weapon
            )));
        }
    }

    if room.carried {
        let carries_weapon = room
            .item
            .as_deref()
            .is_some_and(|name| content.weapon(name).is_some());
        if !carries_weapon {
            errors.push(ValidationError::new(format!(
                "room '{}' is marked carried but its item is not a weapon",
                room.id
            )));
        }
    }
}
