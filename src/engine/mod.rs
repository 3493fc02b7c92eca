mod combat;
mod entry;
mod movement;
mod output;
mod render;

pub use combat::{Fight, FightRecord, weapon_wins};
pub use entry::{EncounterInput, EntryOutcome, EntryReport, FightPlan};
pub use movement::{MoveOutcome, MovePreview};
pub use output::{Output, OutputBlock};
pub use render::{
    render_entry, render_exits, render_inventory, render_map, render_move, render_room,
    render_weapon_menu,
};
