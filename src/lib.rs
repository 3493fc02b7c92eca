pub mod engine;
pub mod world;

use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use engine::{
    FightPlan, MovePreview, Output, render_entry, render_exits, render_inventory, render_map,
    render_move, render_room, render_weapon_menu,
};
use world::{BuildError, ContentError, Player, World, WorldContent};

pub use world::{load_content_from_file, load_content_from_str, load_default_content};

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("could not build the world: {0}")]
    Build(#[from] BuildError),
}

/// Build a session from content, seeding the one-off pool shuffle.
pub fn new_session(
    content: &WorldContent,
    player_name: Option<&str>,
    seed: u64,
) -> Result<GameSession, GameError> {
    let name = player_name.unwrap_or(&content.player_name);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let world = World::construct(Player::new(name), content, &mut rng)?;
    info!("new session for {} in '{}' (seed {})", name, world.id, seed);
    Ok(GameSession::new(world))
}

/// A question the session asked and is waiting on.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Pending {
    FightDecision { direction: String },
    WeaponChoice { direction: String },
}

/// Line-driven game: turns player input into engine calls and engine
/// outcomes into output. Fight answers are gathered over several inputs
/// and handed to the engine in one go.
pub struct GameSession {
    pub world: World,
    pending: Option<Pending>,
    finished: bool,
}

#[cfg(feature = "wasm")]
mod wasm_bindings {
    use super::*;
    use serde::Serialize;
    use serde_wasm_bindgen::to_value;
    use wasm_bindgen::prelude::*;

    #[derive(Serialize)]
    struct WasmStepResult {
        blocks: Vec<engine::OutputBlock>,
        quit: bool,
    }

    #[wasm_bindgen]
    pub struct WasmGame {
        session: GameSession,
        initialized: bool,
    }

    #[wasm_bindgen]
    impl WasmGame {
        /// Create a game from a TOML world string (empty for the stock game). Call `init()` to get the intro.
        #[wasm_bindgen(constructor)]
        pub fn new(world_toml: &str, seed: u64) -> Result<WasmGame, JsValue> {
            let content = if world_toml.trim().is_empty() {
                load_default_content()
            } else {
                load_content_from_str(world_toml)
            }
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
            let session =
                new_session(&content, None, seed).map_err(|e| JsValue::from_str(&e.to_string()))?;
            Ok(WasmGame {
                session,
                initialized: false,
            })
        }

        /// Start the game and return the intro output.
        #[wasm_bindgen]
        pub fn init(&mut self) -> JsValue {
            if self.initialized {
                return JsValue::NULL;
            }
            self.initialized = true;
            let out = self.session.initialize();
            to_value(&WasmStepResult {
                blocks: out.blocks,
                quit: self.session.is_finished(),
            })
            .unwrap_or(JsValue::NULL)
        }

        /// Process a player command and return the resulting output blocks and quit flag.
        #[wasm_bindgen]
        pub fn step(&mut self, input: &str) -> JsValue {
            if !self.initialized {
                let _ = self.init();
            }
            let (out, quit) = self.session.step(input);
            to_value(&WasmStepResult {
                blocks: out.blocks,
                quit,
            })
            .unwrap_or(JsValue::NULL)
        }
    }
}

impl GameSession {
    pub fn new(world: World) -> Self {
        GameSession {
            world,
            pending: None,
            finished: false,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// True while the session waits for a fight answer rather than a command.
    pub fn is_prompting(&self) -> bool {
        self.pending.is_some()
    }

    /// Intro text. Also enters the starting room so it counts as cleared.
    pub fn initialize(&mut self) -> Output {
        let mut out = Output::new();
        out.say(format!("You are {}.", self.world.player().name));
        out.say(format!("Welcome to {}!", self.world.name));
        out.say(self.world.desc.trim());
        out.say("Type 'help' for commands, 'quit' to exit.");

        let outcome = self
            .world
            .enter_room(self.world.start(), &mut FightPlan::decline());
        if outcome.is_terminal() {
            render_entry(&mut out, &self.world, &outcome);
            self.finished = true;
            return out;
        }

        render_room(&mut out, &self.world);
        render_map(&mut out, &self.world);
        render_exits(&mut out, &self.world);
        out
    }

    /// Process a single player input; returns (output, quit?)
    pub fn step(&mut self, input: &str) -> (Output, bool) {
        let mut out = Output::new();
        let input = input.trim();
        let lower = input.to_lowercase();

        if self.finished {
            out.say("The game is over.");
            return (out, true);
        }

        if lower == "quit" || lower == "exit" {
            out.say("Goodbye.");
            self.finished = true;
            return (out, true);
        }

        match self.pending.take() {
            Some(Pending::FightDecision { direction }) => {
                if lower == "n" || lower == "no" {
                    self.finish_move(&mut out, &direction, FightPlan::decline());
                } else {
                    render_weapon_menu(&mut out, &self.world);
                    out.prompt("What weapon do you want to use?");
                    self.pending = Some(Pending::WeaponChoice { direction });
                }
            }
            Some(Pending::WeaponChoice { direction }) => {
                let plan = match lower.parse::<usize>() {
                    Ok(index) => FightPlan::with_weapon(index),
                    Err(_) => FightPlan::unarmed(),
                };
                self.finish_move(&mut out, &direction, plan);
            }
            None => self.command(&mut out, &lower),
        }

        if self.pending.is_none() && !self.finished {
            render_exits(&mut out, &self.world);
        }
        (out, self.finished)
    }

    fn command(&mut self, out: &mut Output, lower: &str) {
        match lower {
            "" => {}
            "look" | "l" => render_room(out, &self.world),
            "map" => render_map(out, &self.world),
            "inventory" | "i" => render_inventory(out, &self.world),
            "stats" => {
                let stats = self.world.stats();
                out.say(format!(
                    "Rooms cleared: {}. Enemies defeated: {}. Moves: {} ({} refused).",
                    self.world.cleared_count(),
                    stats.enemies_defeated,
                    stats.moves,
                    stats.refused_moves
                ));
            }
            "help" | "?" => {
                out.say("Move with north, south, east, west (or n, s, e, w).");
                out.say("Other commands: look, map, inventory, stats, quit.");
            }
            direction => match self.world.preview_move(direction) {
                MovePreview::Encounter(enemy) => {
                    out.say(format!("There is {} in the next room.", enemy.name));
                    out.prompt("Do you want to fight? (y/n)");
                    self.pending = Some(Pending::FightDecision {
                        direction: direction.to_string(),
                    });
                }
                MovePreview::NoExit | MovePreview::Gated { .. } | MovePreview::Open => {
                    self.finish_move(out, direction, FightPlan::decline());
                }
            },
        }
    }

    fn finish_move(&mut self, out: &mut Output, direction: &str, mut plan: FightPlan) {
        let outcome = self.world.move_player(direction, &mut plan);
        render_move(out, &self.world, &outcome);

        if let engine::MoveOutcome::Attempted(entry) = &outcome {
            if entry.is_terminal() {
                self.finished = true;
                return;
            }
        }

        render_map(out, &self.world);
    }
}
