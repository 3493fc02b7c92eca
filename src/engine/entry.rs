use log::{debug, info};

use crate::engine::combat::{Fight, FightRecord, resolve_fight};
use crate::world::{Character, Enemy, Friend, ItemKind, Position, RoomId, RoomKind, Weapon, World};

/// Answers to the two questions an undefeated enemy raises.
pub trait EncounterInput {
    /// Fight `enemy`, or back off and stay where you are?
    fn wants_to_fight(&mut self, enemy: &Enemy) -> bool;

    /// Index into `weapons`; `None` when the answer could not be understood.
    fn choose_weapon(&mut self, enemy: &Enemy, weapons: &[Weapon]) -> Option<usize>;
}

/// Encounter answers collected ahead of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FightPlan {
    pub fight: bool,
    pub weapon: Option<usize>,
}

impl FightPlan {
    /// Refuse any fight. Also the plan to use when no enemy is expected.
    pub fn decline() -> Self {
        FightPlan::default()
    }

    pub fn with_weapon(index: usize) -> Self {
        FightPlan {
            fight: true,
            weapon: Some(index),
        }
    }

    /// Agreed to fight but gave no usable weapon choice.
    pub fn unarmed() -> Self {
        FightPlan {
            fight: true,
            weapon: None,
        }
    }
}

impl EncounterInput for FightPlan {
    fn wants_to_fight(&mut self, _enemy: &Enemy) -> bool {
        self.fight
    }

    fn choose_weapon(&mut self, _enemy: &Enemy, _weapons: &[Weapon]) -> Option<usize> {
        self.weapon
    }
}

/// What happened on a successful entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntryReport {
    pub room: RoomId,
    pub first_visit: bool,
    pub friend: Option<Friend>,
    pub won_fight: Option<FightRecord>,
    pub picked_up: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    Success(EntryReport),
    RefusedBounds,
    RefusedGate { cleared: usize, required: usize },
    RefusedDeclinedFight { enemy: String },
    RefusedInvalidWeapon { enemy: String },
    /// The player lost a fight; the session is over.
    FatalLoss(FightRecord),
    /// The player picked up the win item; the session is over.
    FatalWinPickup { item: String },
}

impl EntryOutcome {
    pub fn is_refusal(&self) -> bool {
        matches!(
            self,
            EntryOutcome::RefusedBounds
                | EntryOutcome::RefusedGate { .. }
                | EntryOutcome::RefusedDeclinedFight { .. }
                | EntryOutcome::RefusedInvalidWeapon { .. }
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            EntryOutcome::FatalLoss(_) | EntryOutcome::FatalWinPickup { .. }
        )
    }

    /// The player ended up inside the room.
    pub fn entered(&self) -> bool {
        matches!(
            self,
            EntryOutcome::Success(_) | EntryOutcome::FatalWinPickup { .. }
        )
    }
}

impl World {
    /// Try to occupy the room at `pos`. Gates run in order and nothing is
    /// written before the last one passes, so a refusal leaves no trace.
    /// Does not move the player; see [`World::move_player`].
    pub fn enter_room<I: EncounterInput + ?Sized>(
        &mut self,
        pos: Position,
        input: &mut I,
    ) -> EntryOutcome {
        let outcome = self.resolve_entry(pos, input);
        debug!("enter ({}, {}) -> {:?}", pos.x, pos.y, outcome);
        outcome
    }

    fn resolve_entry<I: EncounterInput + ?Sized>(
        &mut self,
        pos: Position,
        input: &mut I,
    ) -> EntryOutcome {
        let Some(id) = pos.room_id() else {
            return EntryOutcome::RefusedBounds;
        };
        let Some(room) = self.rooms.get_mut(id) else {
            return EntryOutcome::RefusedBounds;
        };

        if let RoomKind::End {
            rooms_required_to_clear,
        } = room.kind
        {
            let cleared = self.player.cleared_rooms.len();
            if cleared < rooms_required_to_clear {
                return EntryOutcome::RefusedGate {
                    cleared,
                    required: rooms_required_to_clear,
                };
            }
        }

        let mut report = EntryReport {
            room: id,
            first_visit: !self.player.has_cleared(id),
            ..EntryReport::default()
        };

        match room.occupant.as_mut() {
            Some(Character::Friend(friend)) => report.friend = Some(friend.clone()),
            Some(Character::Enemy(enemy)) if !enemy.defeated => {
                if !input.wants_to_fight(enemy) {
                    return EntryOutcome::RefusedDeclinedFight {
                        enemy: enemy.name.clone(),
                    };
                }

                let weapons = &self.player.weapons;
                let Some(weapon) = input
                    .choose_weapon(enemy, weapons)
                    .and_then(|i| weapons.get(i))
                else {
                    return EntryOutcome::RefusedInvalidWeapon {
                        enemy: enemy.name.clone(),
                    };
                };

                match resolve_fight(weapon, enemy) {
                    Fight::Won(record) => {
                        self.stats.enemies_defeated += 1;
                        report.won_fight = Some(record);
                    }
                    Fight::Lost(record) => {
                        info!(
                            "{} lost to {} ({} vs {})",
                            self.player.name, record.enemy, record.player_weapon, record.enemy_weapon
                        );
                        return EntryOutcome::FatalLoss(record);
                    }
                }
            }
            _ => {}
        }

        self.player.cleared_rooms.insert(id);

        if let Some(item) = room.item.as_mut().filter(|i| !i.picked_up) {
            item.picked_up = true;
            if item.name == self.win_item {
                info!("{} picked up the {}", self.player.name, item.name);
                return EntryOutcome::FatalWinPickup {
                    item: item.name.clone(),
                };
            }
            if let ItemKind::Weapon(weapon) = &item.kind {
                self.player.weapons.push(weapon.clone());
            }
            report.picked_up = Some(item.name.clone());
        }

        EntryOutcome::Success(report)
    }
}
