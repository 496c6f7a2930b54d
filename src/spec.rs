//! Code specific to the PAK format itself.
//!
//! We try to keep the nitty gritty here,
//! and higher-level stuff in the [`read`] module.
//!
//! An archive is a directory table followed directly by file contents:
//!
//! ```text
//! repeat:
//!   offset   : u32, little-endian   (0 ends the table)
//!   filename : bytes until 0x00     (at most 12 of them)
//! <file contents, in table order; the last file runs to EOF>
//! ```
//!
//! Files don't store their sizes. Each one ends where the next begins.
//!
//! [`read`]: ../read/index.html

use std::borrow::Cow;
use std::ffi::OsStr;
use std::io::Read;

use codepage_437::*;

use crate::result::*;

/// The offset value that terminates the directory table
pub const SENTINEL: u32 = 0;

/// Longest name we accept, in bytes.
///
/// Names are DOS 8.3 names: eight characters, a dot, and a three-character
/// extension.
pub const MAX_FILENAME_LEN: usize = 12;

/// Reads the little-endian offset that starts each directory record.
pub fn read_offset<R: Read>(reader: &mut R) -> PakResult<u32> {
    let mut int_bytes = [0u8; std::mem::size_of::<u32>()];
    reader
        .read_exact(&mut int_bytes)
        .map_err(|source| PakError::Read {
            kind: ReadKind::Offset,
            source,
        })?;
    Ok(u32::from_le_bytes(int_bytes))
}

/// Reads a null-terminated filename one byte at a time,
/// consuming the terminator but nothing past it.
///
/// `offset` is the record's offset, used to say which record was bad.
pub fn read_filename<R: Read>(reader: &mut R, offset: u32) -> PakResult<Vec<u8>> {
    let mut name = Vec::with_capacity(MAX_FILENAME_LEN);
    let mut byte = [0u8; 1];
    loop {
        reader.read_exact(&mut byte).map_err(|source| PakError::Read {
            kind: ReadKind::Filename,
            source,
        })?;
        match byte[0] {
            0 => return Ok(name),
            _ if name.len() >= MAX_FILENAME_LEN => {
                return Err(PakError::NameTooLong { offset });
            }
            b => name.push(b),
        }
    }
}

/// Turns raw name bytes into something printable.
///
/// Names predate Unicode, so we assume they're CP437 like the rest of DOS.
/// This is only for showing names to people; files are written
/// with the bytes the archive actually holds.
pub fn display_filename(raw: &[u8]) -> Cow<'_, str> {
    Cow::borrow_from_cp437(raw, &CP437_CONTROL)
}

/// Turns raw name bytes into a name the OS can create, byte for byte.
#[cfg(unix)]
pub fn os_filename(raw: &[u8]) -> Cow<'_, OsStr> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(OsStr::from_bytes(raw))
}

/// Turns raw name bytes into a name the OS can create.
///
/// Non-Unix file names aren't arbitrary bytes, so go through CP437.
#[cfg(not(unix))]
pub fn os_filename(raw: &[u8]) -> Cow<'_, OsStr> {
    Cow::Owned(display_filename(raw).into_owned().into())
}
