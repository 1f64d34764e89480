use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "smb3ed")]
#[command(about = "SMB3 ROM level inspector")]
struct Args {
    /// Path to the ROM image
    #[arg(short, long, default_value = "smb3.nes")]
    rom: PathBuf,

    /// Directory holding levels.dat and the romobjs design files
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every level in the offset table, grouped by world
    List,
    /// Print the decoded header of one level
    Info {
        world: usize,
        level: usize,
        /// Override the header's object set
        #[arg(short, long)]
        object_set: Option<u8>,
    },
    /// Dump the decoded object list of one level
    Objects {
        world: usize,
        level: usize,
        /// Override the header's object set
        #[arg(short, long)]
        object_set: Option<u8>,
    },
    /// Print one palette group as hex
    Palette {
        object_set: u8,
        group: u8,
        /// Read the enemy groups instead of the level groups
        #[arg(short, long)]
        enemy: bool,
    },
    /// Render one level to a text grid
    Render { world: usize, level: usize },
    /// Export one decoded level as JSON
    Export { world: usize, level: usize },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("smb3ed=info".parse()?))
        .init();

    let args = Args::parse();

    match args.command {
        Command::List => commands::list::run(&args.data_dir),
        Command::Info {
            world,
            level,
            object_set,
        } => commands::info::run(&args.rom, &args.data_dir, world, level, object_set),
        Command::Objects {
            world,
            level,
            object_set,
        } => commands::objects::run(&args.rom, &args.data_dir, world, level, object_set),
        Command::Palette {
            object_set,
            group,
            enemy,
        } => commands::palette::run(&args.rom, object_set, group, enemy),
        Command::Render { world, level } => {
            commands::render::run(&args.rom, &args.data_dir, world, level)
        }
        Command::Export { world, level } => {
            commands::export::run(&args.rom, &args.data_dir, world, level)
        }
    }
}
