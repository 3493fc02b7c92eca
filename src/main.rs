use std::io::{self, Write};
use std::path::PathBuf;

use cake_dungeon::engine::{Output, OutputBlock};
use cake_dungeon::{load_content_from_file, load_default_content, new_session};
use clap::Parser;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "cake-dungeon", about = "Clear the dungeon, find the cake")]
struct Args {
    /// World file to play instead of the built-in dungeon
    #[arg(short, long)]
    world: Option<PathBuf>,

    /// Seed for the room layout; random when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Player name, overriding the world file
    #[arg(short, long)]
    name: Option<String>,

    /// More log output on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn flush_output(out: Output) {
    let mut printed_anything = false;
    let mut started_events = false;

    for block in out.blocks {
        match block {
            OutputBlock::Title(t) => {
                println!("\n{}", t);
                printed_anything = true;
            }
            OutputBlock::Text(line) => {
                println!("{}", line);
                printed_anything = true;
            }
            OutputBlock::Event(ev) => {
                if !started_events {
                    if printed_anything {
                        println!();
                    }
                    started_events = true;
                }
                println!("{}", ev);
                printed_anything = true;
            }
            OutputBlock::Map(map) => {
                println!("\n{}", map);
                printed_anything = true;
            }
            OutputBlock::Exits(exits) => {
                println!("\n{}", exits);
                printed_anything = true;
            }
            OutputBlock::Prompt(question) => {
                println!("{}", question);
                printed_anything = true;
            }
        }
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let content = match &args.world {
        Some(path) => load_content_from_file(path).map(|c| {
            println!("Using world file: {}", path.display());
            c
        }),
        None => load_default_content(),
    };
    let content = match content {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load world: {e}");
            std::process::exit(1);
        }
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut session = match new_session(&content, args.name.as_deref(), seed) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to start game: {e}");
            std::process::exit(1);
        }
    };

    flush_output(session.initialize());
    if session.is_finished() {
        return Ok(());
    }

    let stdin = io::stdin();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        let bytes_read = stdin.read_line(&mut input)?;
        if bytes_read == 0 {
            println!("\nGoodbye.");
            break;
        }

        let (out, quit) = session.step(&input);
        flush_output(out);

        if quit {
            break;
        }
    }

    Ok(())
}
