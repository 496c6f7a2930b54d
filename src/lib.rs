//! pak reads the flat PAK archives used by some old DOS games:
//!
//! ```no_run
//! # use std::fs::File;
//! # use std::io::BufReader;
//! # use pak::*;
//! let file = BufReader::new(File::open("SOUNDS.PAK")?);
//! let mut archive = PakArchive::new(file);
//!
//! for entry in archive.entries()? {
//!     println!("{:08x}: {}", entry.offset, entry.name());
//! }
//!
//! // Dump everything into the current directory.
//! archive.extract_all(".")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! PAK is about as simple as an archive gets. There's a table at the front
//! listing where each file starts and what it's called, ended by a zero offset,
//! and then the files, back to back. No sizes, no directories, no compression.
//! A file ends where the next one starts, so the table has to be in order,
//! and we refuse to go on if it isn't.
//!
//! Names are DOS 8.3 names and get joined onto the output directory as-is.
//! An archive with `/` or `..` in a name can write outside of it,
//! so only extract archives you trust. (We log a warning when we see one.)

pub mod read;
pub mod result;

pub use read::PakArchive;
pub use read::Record;
pub use result::{PakError, PakResult};

mod spec;
