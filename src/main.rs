use clap::{Parser, Subcommand};
use env_logger::Env;
use kspack::pack::{pack_all, DEFAULT_CAGE_FOLDERS};
use kspack::reader::ContainerReader;
use kspack::source::DirArchive;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kspack", about = "Pack killer sudoku sources into KSF1 containers; inspect them")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack cage folders from a source archive into .ks container files
    Pack {
        /// Source archive: a directory holding the cage-size folders
        archive: PathBuf,
        /// Output directory for the cage-le-<n>.ks files
        out_dir: PathBuf,
        /// Only pack this cage folder (repeatable; default 2 through 9)
        #[arg(short, long)]
        cage: Vec<u32>,
    },
    /// Inspect an existing .ks container
    Inspect {
        file: PathBuf,
        /// Print the record count
        #[arg(long)]
        count: bool,
        /// Print the record at this 0-based index as puzzle text
        #[arg(long, value_name = "INDEX")]
        show: Option<u32>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        // ── Pack ─────────────────────────────────────────────────────────────
        Commands::Pack { archive, out_dir, cage } => {
            let source = DirArchive::open(&archive)?;
            let folders: Vec<u32> = if cage.is_empty() {
                DEFAULT_CAGE_FOLDERS.collect()
            } else {
                cage
            };
            let total = pack_all(&source, &out_dir, &folders);
            println!("Packed {total} puzzles into {}", out_dir.display());
        }

        // ── Inspect ──────────────────────────────────────────────────────────
        Commands::Inspect { file, count, show } => {
            let mut reader = ContainerReader::open(&file)?;
            if count {
                println!("{}", reader.record_count());
            }
            if let Some(index) = show {
                println!("{}", reader.fetch(index)?.to_text());
            }
            reader.close();
        }
    }

    Ok(())
}
