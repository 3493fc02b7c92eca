use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use super::content::{EndRoomSpec, EnemySpec, Lore, RoomSpec, WorldContent};
use super::model::{Friend, Position, Weapon};
use super::validator::{ValidationError, validate_content};

/// The stock game, compiled into the binary.
const DEFAULT_WORLD: &str = include_str!("../../content/default.toml");

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("could not read world file: {0}")]
    Io(#[from] io::Error),

    #[error("could not parse world file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("world file is invalid: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

////////////////////
/// TOML STRUCTS ///
////////////////////

#[derive(Deserialize)]
struct WorldFile {
    world: WorldHeader,
    #[serde(default)]
    weapon: Vec<WeaponConfig>, // [[weapon]] blocks
    #[serde(default)]
    room: Vec<RoomConfig>, // [[room]] blocks
    end_room: EndRoomConfig,
    #[serde(default)]
    death: Vec<DeathConfig>, // [[death]] blocks
}

#[derive(Deserialize)]
struct WorldHeader {
    id: String,
    name: String,
    #[serde(default)]
    desc: String,
    #[serde(default = "default_player_name")]
    player_name: String,
    #[serde(default = "default_win_item")]
    win_item: String,
    #[serde(default)]
    start: [i32; 2],
    #[serde(default)]
    pool_slots: Vec<[i32; 2]>,
}

#[derive(Deserialize)]
struct WeaponConfig {
    name: String,
    beats: String,
    #[serde(default)]
    kill_text: Option<String>,
}

#[derive(Deserialize)]
struct RoomConfig {
    id: String,
    name: String,
    #[serde(default)]
    desc: String,

    /// Fixed cell; pool rooms leave this out.
    #[serde(default)]
    at: Option<[i32; 2]>,

    #[serde(default)]
    item: Option<String>,

    #[serde(default)]
    carried: bool,

    #[serde(default)]
    enemy: Option<EnemyConfig>,

    #[serde(default)]
    friend: Option<FriendConfig>,
}

#[derive(Deserialize)]
struct EnemyConfig {
    name: String,
    weapon: String,
}

#[derive(Deserialize)]
struct FriendConfig {
    name: String,
    dialogue: String,
}

#[derive(Deserialize)]
struct EndRoomConfig {
    id: String,
    name: String,
    #[serde(default)]
    desc: String,
    at: [i32; 2],
    #[serde(default)]
    item: Option<String>,
    rooms_required_to_clear: usize,
}

#[derive(Deserialize)]
struct DeathConfig {
    player: String,
    enemy: String,
    text: String,
}

fn default_player_name() -> String {
    "Adventurer".to_string()
}

fn default_win_item() -> String {
    "cake".to_string()
}

/////////////////////////////
/// TOML PARSER FUNCTIONS ///
/////////////////////////////

/// Load world content from a .toml file on disk.
pub fn load_content_from_file(path: &Path) -> Result<WorldContent, ContentError> {
    let contents = fs::read_to_string(path)?;
    load_content_from_str(&contents)
}

/// Load the stock game that ships with the binary.
pub fn load_default_content() -> Result<WorldContent, ContentError> {
    load_content_from_str(DEFAULT_WORLD)
}

pub fn load_content_from_str(contents: &str) -> Result<WorldContent, ContentError> {
    let file: WorldFile = toml::from_str(contents)?;

    let mut lore = Lore::default();
    let mut weapons = Vec::with_capacity(file.weapon.len());
    for wc in file.weapon {
        if let Some(text) = wc.kill_text {
            lore.kill_texts
                .insert(wc.name.clone(), normalize_multiline_desc(&text));
        }
        weapons.push(Weapon::new(wc.name, wc.beats));
    }

    let mut death_texts = HashMap::new();
    for dc in file.death {
        death_texts.insert((dc.player, dc.enemy), normalize_multiline_desc(&dc.text));
    }
    lore.death_texts = death_texts;

    let (anchors, pool): (Vec<RoomSpec>, Vec<RoomSpec>) = file
        .room
        .into_iter()
        .map(room_spec)
        .partition(|r| r.at.is_some());

    let er = file.end_room;
    let content = WorldContent {
        id: file.world.id,
        name: file.world.name,
        desc: normalize_multiline_desc(&file.world.desc),
        player_name: file.world.player_name,
        win_item: file.world.win_item,
        start: to_position(file.world.start),
        pool_slots: file.world.pool_slots.into_iter().map(to_position).collect(),
        weapons,
        anchors,
        pool,
        end_room: EndRoomSpec {
            id: er.id,
            name: er.name,
            desc: normalize_multiline_desc(&er.desc),
            at: to_position(er.at),
            item: er.item,
            rooms_required_to_clear: er.rooms_required_to_clear,
        },
        lore,
    };

    let errors = validate_content(&content);
    if !errors.is_empty() {
        return Err(ContentError::Invalid(errors));
    }

    Ok(content)
}

fn room_spec(rc: RoomConfig) -> RoomSpec {
    RoomSpec {
        id: rc.id,
        name: rc.name,
        desc: normalize_multiline_desc(&rc.desc),
        at: rc.at.map(to_position),
        item: rc.item,
        carried: rc.carried,
        enemy: rc.enemy.map(|e| EnemySpec {
            name: e.name,
            weapon: e.weapon,
        }),
        friend: rc.friend.map(|f| Friend {
            name: f.name,
            dialogue: normalize_multiline_desc(&f.dialogue),
        }),
    }
}

fn to_position([x, y]: [i32; 2]) -> Position {
    Position::new(x, y)
}

/// Collapse TOML multi-line strings: a wrapped line joins with a space,
/// one blank line becomes a newline, two or more become a paragraph break.
fn normalize_multiline_desc(raw: &str) -> String {
    let mut result = String::new();
    let mut pending_blank_lines = 0usize;

    for line in raw.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            pending_blank_lines += 1;
            continue;
        }

        if !result.is_empty() {
            match pending_blank_lines {
                0 => result.push(' '),
                1 => result.push('\n'),
                _ => result.push_str("\n\n"),
            }
        }
        result.push_str(trimmed);
        pending_blank_lines = 0;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const TINY_WORLD: &str = r#"
        [world]
        id = "tiny"
        name = "Tiny"
        start = [0, 0]
        pool_slots = [[1, 1], [2, 1]]

        [[weapon]]
        name = "rock"
        beats = "scissors"
        kill_text = "Blunt."

        [[weapon]]
        name = "scissors"
        beats = "paper"

        [[weapon]]
        name = "paper"
        beats = "rock"

        [[room]]
        id = "a"
        name = "A"
        at = [0, 0]
        item = "rock"
        carried = true

        [[room]]
        id = "b"
        name = "B"
        at = [1, 0]

        [[room]]
        id = "c"
        name = "C"
        at = [2, 0]
        item = "paper"

        [[room]]
        id = "d"
        name = "D"
        at = [0, 1]

        [[room]]
        id = "e"
        name = "E"
        at = [0, 2]

        [[room]]
        id = "f"
        name = "F"
        at = [1, 2]

        [[room]]
        id = "pool1"
        name = "Pool one"
        enemy = { name = "Snipper", weapon = "scissors" }

        [[room]]
        id = "pool2"
        name = "Pool two"
        friend = { name = "Owl", dialogue = "Hoo." }

        [end_room]
        id = "end"
        name = "End"
        at = [2, 2]
        item = "cake"
        rooms_required_to_clear = 3

        [[death]]
        player = "paper"
        enemy = "scissors"
        text = "Shredded."
    "#;

    #[test]
    fn loads_anchors_pool_and_lore() {
        let content = load_content_from_str(TINY_WORLD).expect("tiny world loads");
        assert_eq!(content.anchors.len(), 6);
        assert_eq!(content.pool.len(), 2);
        assert_eq!(content.win_item, "cake");
        assert_eq!(content.player_name, "Adventurer");
        assert_eq!(content.end_room.rooms_required_to_clear, 3);
        assert_eq!(content.lore.kill_text("rock"), Some("Blunt."));
        assert_eq!(content.lore.death_text("paper", "scissors"), Some("Shredded."));
        assert!(content.weapon("scissors").is_some());
        assert!(content.anchors[0].carried);
    }

    #[test]
    fn rejects_unknown_enemy_weapon() {
        let broken = TINY_WORLD.replace(
            r#"weapon = "scissors" }"#,
            r#"weapon = "laser" }"#,
        );
        match load_content_from_str(&broken) {
            Err(ContentError::Invalid(errors)) => {
                assert!(errors.iter().any(|e| e.message.contains("laser")));
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn reports_toml_syntax_errors() {
        assert!(matches!(
            load_content_from_str("[world"),
            Err(ContentError::Parse(_))
        ));
    }

    #[test]
    fn stock_world_is_valid() {
        let content = load_default_content().expect("stock world loads");
        assert_eq!(content.clearable_rooms(), 8);
        assert_eq!(content.pool.len(), content.pool_slots.len());
    }

    #[test]
    fn normalizes_wrapped_and_blank_lines() {
        let raw = "  first line\n  continues\n\n  new line\n\n\n  paragraph  ";
        assert_eq!(
            normalize_multiline_desc(raw),
            "first line continues\nnew line\n\nparagraph"
        );
    }
}
