use crate::engine::combat::FightRecord;
use crate::engine::entry::{EntryOutcome, EntryReport};
use crate::engine::movement::MoveOutcome;
use crate::engine::output::Output;
use crate::world::{Position, World};

const PLAYER_MARK: &str = "♙";
const CLEARED_MARK: &str = "X";
const UNCLEARED_MARK: &str = "O";

pub fn render_room(out: &mut Output, world: &World) {
    let Some(room) = world.current_room() else {
        return;
    };

    out.title(room.name.clone());
    out.say(room.desc.trim());
    if let Some(text) = world.occupant_text() {
        out.say(text);
    }
}

pub fn render_map(out: &mut Output, world: &World) {
    let here = world.position();
    let rows = world
        .grid()
        .enumerate()
        .map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(|(x, _)| {
                    let pos = Position::new(x as i32, y as i32);
                    if pos == here {
                        PLAYER_MARK
                    } else if pos.room_id().is_some_and(|id| world.is_cleared(id)) {
                        CLEARED_MARK
                    } else {
                        UNCLEARED_MARK
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n");
    out.map(rows);
}

pub fn render_exits(out: &mut Output, world: &World) {
    let dirs = world
        .available_directions()
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>();

    if dirs.is_empty() {
        out.set_exits("Exits: (none)");
    } else {
        out.set_exits(format!("Exits: {}", dirs.join(", ")));
    }
}

pub fn render_inventory(out: &mut Output, world: &World) {
    let weapons = world.inventory();
    if weapons.is_empty() {
        out.say("You are carrying nothing.");
        return;
    }

    out.say("You are carrying:");
    for weapon in weapons {
        out.say(format!("  {} (beats {})", weapon.name, weapon.beats));
    }
}

/// Numbered weapon list; the numbers are what the weapon prompt expects.
pub fn render_weapon_menu(out: &mut Output, world: &World) {
    out.say("You can use the following weapons:");
    for (i, weapon) in world.inventory().iter().enumerate() {
        out.say(format!("{}. {}", i, weapon.name));
    }
}

pub fn render_move(out: &mut Output, world: &World, outcome: &MoveOutcome) {
    match outcome {
        MoveOutcome::NoExit => out.say("You can't go there."),
        MoveOutcome::Attempted(entry) => render_entry(out, world, entry),
    }
}

pub fn render_entry(out: &mut Output, world: &World, outcome: &EntryOutcome) {
    match outcome {
        EntryOutcome::Success(report) => render_report(out, world, report),
        EntryOutcome::RefusedBounds => out.say("You can't go there."),
        EntryOutcome::RefusedGate { cleared, required } => out.say(format!(
            "You can't go there. You need to clear {} rooms first ({} cleared so far).",
            required, cleared
        )),
        EntryOutcome::RefusedDeclinedFight { enemy } => {
            out.say(format!("You back away from {}.", enemy))
        }
        EntryOutcome::RefusedInvalidWeapon { .. } => out.say("Invalid weapon."),
        EntryOutcome::FatalLoss(record) => {
            render_fight_start(out, record);
            let text = world
                .lore()
                .death_text(&record.player_weapon, &record.enemy_weapon)
                .map(str::to_string)
                .unwrap_or_else(|| {
                    format!("Your {} is no match for the {}.", record.player_weapon, record.enemy_weapon)
                });
            out.event(text);
            out.event("You lose!");
        }
        EntryOutcome::FatalWinPickup { item } => {
            let line = format!("The {} is a lie.", item);
            let rule = "=".repeat(line.chars().count());
            out.event(format!("{rule}\n{line}\n{rule}"));
        }
    }
}

fn render_report(out: &mut Output, world: &World, report: &EntryReport) {
    if let Some(room) = world.room(report.room) {
        out.title(format!("You are entering {}", room.name));
        out.say(room.desc.trim());
    }

    if let Some(friend) = &report.friend {
        out.event(format!("{}: \"{}\"", friend.name, friend.dialogue));
    }

    if let Some(record) = &report.won_fight {
        render_fight_start(out, record);
        let text = world
            .lore()
            .kill_text(&record.enemy_weapon)
            .map(str::to_string)
            .unwrap_or_else(|| format!("You defeated {}.", record.enemy));
        out.event(text);
    }

    if let Some(item) = &report.picked_up {
        out.event(format!("You picked up {}.", item));
    }
}

fn render_fight_start(out: &mut Output, record: &FightRecord) {
    out.event(format!("You are fighting against {}", record.enemy));
    out.event(format!("You are using the {}", record.player_weapon));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::entry::FightPlan;
    use crate::world::{Player, load_default_content};

    fn fixture() -> World {
        let content = load_default_content().expect("stock world loads");
        World::with_placement(Player::new("Tester"), &content, &[0, 1, 2, 3, 4])
            .expect("world builds")
    }

    #[test]
    fn map_marks_player_and_cleared_rooms() {
        let mut world = fixture();
        world.move_player("east", &mut FightPlan::decline());
        let mut out = Output::new();
        render_map(&mut out, &world);
        assert_eq!(out.plain_text(), "O ♙ O\nO O O\nO O O");

        world.move_player("west", &mut FightPlan::decline());
        let mut out = Output::new();
        render_map(&mut out, &world);
        assert_eq!(out.plain_text(), "♙ X O\nO O O\nO O O");
    }

    #[test]
    fn loss_uses_death_text_for_the_pairing() {
        let mut world = fixture();
        let outcome = world.enter_room(Position::new(1, 2), &mut FightPlan::with_weapon(0));
        let mut out = Output::new();
        render_entry(&mut out, &world, &outcome);
        let text = out.plain_text();
        assert!(text.contains("The mosquitto drowned in the milk"));
        assert!(text.ends_with("You lose!"));
    }

    #[test]
    fn win_banner_frames_the_message() {
        let world = fixture();
        let mut out = Output::new();
        render_entry(
            &mut out,
            &world,
            &EntryOutcome::FatalWinPickup {
                item: "cake".into(),
            },
        );
        assert_eq!(
            out.plain_text(),
            "==================\nThe cake is a lie.\n=================="
        );
    }

    #[test]
    fn exits_list_linked_directions() {
        let world = fixture();
        let mut out = Output::new();
        render_exits(&mut out, &world);
        assert_eq!(out.plain_text(), "Exits: south, east");
    }
}
