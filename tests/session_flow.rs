//! Full playthroughs of the stock dungeon through the session interface.

use cake_dungeon::engine::OutputBlock;
use cake_dungeon::world::{Player, Position, World};
use cake_dungeon::{GameSession, load_default_content, new_session};

// Pool rooms in file order give this layout:
// (0,0) start          (1,0) mykola [cat]        (2,0) bloody [enemy: mosquitto]
// (0,1) milk_room [milk] (1,1) empty             (2,1) cave [enemy: cat]
// (0,2) smelly [friend]  (1,2) white [enemy: milk] (2,2) end [cake, needs 8]
fn fixed_session() -> GameSession {
    let content = load_default_content().expect("stock world loads");
    let world = World::with_placement(Player::new("Tester"), &content, &[0, 1, 2, 3, 4])
        .expect("world builds");
    GameSession::new(world)
}

fn play(session: &mut GameSession, inputs: &[&str]) -> (String, bool) {
    let mut text = String::new();
    let mut quit = false;
    for input in inputs {
        let (out, q) = session.step(input);
        text.push_str(&out.plain_text());
        text.push('\n');
        quit = q;
    }
    (text, quit)
}

#[test]
fn clearing_every_room_then_taking_the_cake_wins() {
    let mut s = fixed_session();
    s.initialize();

    let (_, quit) = play(
        &mut s,
        &[
            "east", "west", "south", "south", // pick up cat and milk, meet the mouse
            "east", "y", "1", // cat beats milk
            "north", "east", "y", "0", // mosquitto beats cat
            "north", "y", "2", // milk beats mosquitto
        ],
    );
    assert!(!quit);
    assert_eq!(s.world.cleared_count(), 8);
    assert_eq!(s.world.stats().enemies_defeated, 3);
    assert_eq!(s.world.position(), Position::new(2, 0));
    let names: Vec<&str> = s.world.inventory().iter().map(|w| w.name.as_str()).collect();
    assert_eq!(names, ["mosquitto", "cat", "milk"]);

    // the cave's enemy is already beaten, so no question is asked
    let (text, quit) = play(&mut s, &["south"]);
    assert!(!quit);
    assert!(!text.contains("Do you want to fight"));

    let (text, quit) = play(&mut s, &["south"]);
    assert!(quit);
    assert!(s.is_finished());
    assert!(text.contains("The cake is a lie."));
    assert_eq!(s.world.inventory().len(), 3);
}

#[test]
fn end_room_stays_shut_until_quota_is_met() {
    let mut s = fixed_session();
    s.initialize();

    let (text, quit) = play(&mut s, &["e", "w", "s", "s", "e", "y", "1", "e"]);
    assert!(!quit);
    assert!(text.contains("You need to clear 8 rooms first (5 cleared so far)"));
    assert_eq!(s.world.position(), Position::new(1, 2));
}

#[test]
fn walking_off_the_map_is_refused() {
    let mut s = fixed_session();
    s.initialize();

    let (text, quit) = play(&mut s, &["north", "west", "jump"]);
    assert!(!quit);
    assert_eq!(text.matches("You can't go there.").count(), 3);
    assert_eq!(s.world.position(), Position::new(0, 0));
    assert_eq!(s.world.stats().refused_moves, 3);
}

#[test]
fn friend_dialogue_is_shown_on_entry() {
    let mut s = fixed_session();
    s.initialize();

    let (text, _) = play(&mut s, &["south", "south"]);
    assert!(text.contains("A friendly looking mouse"));
    assert!(text.contains("I'm totally not suspicious"));
}

#[test]
fn seeded_sessions_render_a_full_map() {
    let content = load_default_content().expect("stock world loads");
    let mut s = new_session(&content, Some("Seeded"), 42).expect("session starts");
    let out = s.initialize();

    let map = out
        .blocks
        .iter()
        .find_map(|b| match b {
            OutputBlock::Map(m) => Some(m.clone()),
            _ => None,
        })
        .expect("map rendered");
    assert_eq!(map, "♙ O O\nO O O\nO O O");
    assert_eq!(s.world.player().name, "Seeded");
    assert_eq!(s.world.inventory().len(), 1);
}
