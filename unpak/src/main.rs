use std::fs::File;
use std::io::{self, BufReader, Read, Seek, Write};
use std::path::{Path, PathBuf};

use anyhow::*;
use log::*;
use structopt::*;

use pak::PakArchive;

#[derive(Debug, StructOpt)]
#[structopt(name = "unpak", about = "Lists or extracts the files in a .PAK archive")]
struct Opt {
    /// Pass multiple times for additional verbosity (info, debug, trace)
    #[structopt(short, long, parse(from_occurrences))]
    verbosity: usize,

    /// Change to the given directory before perfoming any operations.
    #[structopt(short = "C", long)]
    directory: Option<PathBuf>,

    #[structopt(subcommand)]
    command: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Prints the offset and name of each file in the archive
    #[structopt(alias = "l")]
    List {
        #[structopt(name("PAK file"))]
        pak_path: PathBuf,
    },

    /// Dumps every file in the archive into the current directory
    #[structopt(alias = "x")]
    Extract {
        #[structopt(name("PAK file"))]
        pak_path: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Opt::from_args();

    let mut errlog = stderrlog::new();
    errlog.verbosity(args.verbosity + 1);
    errlog.init()?;

    if let Some(chto) = args.directory {
        std::env::set_current_dir(&chto)
            .with_context(|| format!("Couldn't set working directory to {}", chto.display()))?;
    }

    match args.command {
        Command::List { pak_path } => list_files(&pak_path),
        Command::Extract { pak_path } => extract_files(&pak_path),
    }
}

fn open(pak_path: &Path) -> Result<PakArchive<BufReader<File>>> {
    info!("Opening {}", pak_path.display());
    let pak_file = File::open(pak_path)
        .with_context(|| format!("Couldn't open {}", pak_path.display()))?;
    Ok(PakArchive::new(BufReader::new(pak_file)))
}

fn list_files(pak_path: &Path) -> Result<()> {
    let mut archive = open(pak_path)?;
    print_entries(&mut archive, &mut io::stdout().lock())
}

/// Writes `offset: name` for each entry, one per line, in directory order.
fn print_entries<R: Read + Seek, W: Write>(archive: &mut PakArchive<R>, out: &mut W) -> Result<()> {
    for entry in archive.entries()? {
        writeln!(out, "{:08x}: {}", entry.offset, entry.name())?;
    }
    Ok(())
}

fn extract_files(pak_path: &Path) -> Result<()> {
    let mut archive = open(pak_path)?;
    archive.extract_all(".")?;
    Ok(())
}
