use crate::world::{Enemy, Weapon};

/// Who fought whom with what; enough to pick a kill or death message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FightRecord {
    pub enemy: String,
    pub player_weapon: String,
    pub enemy_weapon: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fight {
    Won(FightRecord),
    Lost(FightRecord),
}

/// A weapon wins iff it beats the opponent's weapon by name.
pub fn weapon_wins(weapon: &Weapon, against: &Weapon) -> bool {
    weapon.beats == against.name
}

/// Fight `enemy` with `weapon`. A win marks the enemy defeated for good;
/// a loss leaves everything untouched.
pub(crate) fn resolve_fight(weapon: &Weapon, enemy: &mut Enemy) -> Fight {
    let record = FightRecord {
        enemy: enemy.name.clone(),
        player_weapon: weapon.name.clone(),
        enemy_weapon: enemy.weapon.name.clone(),
    };

    if weapon_wins(weapon, &enemy.weapon) {
        enemy.defeated = true;
        Fight::Won(record)
    } else {
        Fight::Lost(record)
    }
}
