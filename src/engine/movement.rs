use log::debug;

use crate::engine::entry::{EncounterInput, EntryOutcome};
use crate::world::{Direction, Enemy, Position, RoomKind, World};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The current room has no exit that way, or the label is not a direction.
    NoExit,
    /// An entry was attempted; the player moved iff it was entered.
    Attempted(EntryOutcome),
}

impl MoveOutcome {
    pub fn moved(&self) -> bool {
        matches!(self, MoveOutcome::Attempted(o) if o.entered())
    }
}

/// What a move would run into, without running it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovePreview<'a> {
    NoExit,
    Gated { cleared: usize, required: usize },
    Encounter(&'a Enemy),
    Open,
}

fn linked_target(world: &World, label: &str) -> Option<Position> {
    let direction: Direction = label.trim().parse().ok()?;
    let from = world.position();
    world
        .current_room()?
        .neighbours
        .contains_key(&direction)
        .then(|| from.step(direction))
}

impl World {
    /// Walk one room in the direction named by `label`. The position only
    /// changes when the target room was entered.
    pub fn move_player<I: EncounterInput + ?Sized>(
        &mut self,
        label: &str,
        input: &mut I,
    ) -> MoveOutcome {
        let Some(target) = linked_target(self, label) else {
            debug!("no exit '{}' from ({}, {})", label, self.player.position.x, self.player.position.y);
            self.stats.refused_moves += 1;
            return MoveOutcome::NoExit;
        };

        let outcome = self.enter_room(target, input);
        if outcome.entered() {
            self.player.position = target;
            self.stats.moves += 1;
        } else if outcome.is_refusal() {
            self.stats.refused_moves += 1;
        }
        MoveOutcome::Attempted(outcome)
    }

    /// Look through the exit named by `label`: tells the caller whether it
    /// must ask the fight questions before calling [`World::move_player`].
    pub fn preview_move(&self, label: &str) -> MovePreview<'_> {
        let Some(room) = linked_target(self, label).and_then(|pos| self.room_at(pos)) else {
            return MovePreview::NoExit;
        };

        if let RoomKind::End {
            rooms_required_to_clear,
        } = room.kind
        {
            let cleared = self.cleared_count();
            if cleared < rooms_required_to_clear {
                return MovePreview::Gated {
                    cleared,
                    required: rooms_required_to_clear,
                };
            }
        }

        match room.enemy() {
            Some(enemy) if !enemy.defeated => MovePreview::Encounter(enemy),
            _ => MovePreview::Open,
        }
    }
}
