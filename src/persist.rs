//! Saved-game serialization.
//!
//! The on-disk layout is fixed: a little-endian `i32` magic ("MPSG" when read
//! as bytes) and version, the board dimensions, a length-prefixed UTF-8 image
//! path (the length is a 7-bit variable-width integer), the move counter and
//! elapsed ticks, and finally the board's permutation rank as signed
//! little-endian bytes filling the remainder of the stream.

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use num_bigint::BigInt;

use crate::board::Board;
use crate::codec;

pub const SAVE_MAGIC: i32 = 0x4753_504D;
pub const SAVE_VERSION: i32 = 1;

#[derive(Debug)]
pub enum PersistError {
    Io(io::Error),
    Format(String),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::Io(e) => write!(f, "io error: {e}"),
            PersistError::Format(msg) => write!(f, "format error: {msg}"),
        }
    }
}

impl std::error::Error for PersistError {}

impl From<io::Error> for PersistError {
    fn from(e: io::Error) -> Self {
        PersistError::Io(e)
    }
}

/// One saved game: board identity plus play metadata.
///
/// The board itself is stored as its permutation rank; `rank` is signed only
/// because the wire format is, a valid save always holds a non-negative value
/// below `width * height` factorial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedGame {
    pub width: i32,
    pub height: i32,
    pub image_path: String,
    pub moves: i32,
    pub elapsed_ticks: i64,
    pub rank: BigInt,
}

impl SavedGame {
    #[must_use]
    pub fn from_board(board: &Board, image_path: String, moves: i32, elapsed_ticks: i64) -> Self {
        Self {
            width: board.width(),
            height: board.height(),
            image_path,
            moves,
            elapsed_ticks,
            rank: BigInt::from(board.rank()),
        }
    }

    /// Reconstruct the saved board.
    ///
    /// # Errors
    /// Returns [`PersistError::Format`] when the stored dimensions or rank
    /// are out of range.
    pub fn board(&self) -> Result<Board, PersistError> {
        if self.width < 2 || self.height < 2 {
            return Err(PersistError::Format(format!(
                "invalid board dimensions {}x{}",
                self.width, self.height
            )));
        }
        let rank = self
            .rank
            .to_biguint()
            .ok_or_else(|| PersistError::Format("negative board rank".to_string()))?;
        let size = (self.width * self.height) as usize;
        if rank >= codec::factorial(size) {
            return Err(PersistError::Format("board rank out of range".to_string()));
        }
        Ok(Board::from_rank(self.width, self.height, &rank))
    }

    /// # Errors
    /// Returns [`PersistError::Io`] when the writer fails.
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<(), PersistError> {
        w.write_all(&SAVE_MAGIC.to_le_bytes())?;
        w.write_all(&SAVE_VERSION.to_le_bytes())?;
        w.write_all(&self.width.to_le_bytes())?;
        w.write_all(&self.height.to_le_bytes())?;
        write_string(w, &self.image_path)?;
        w.write_all(&self.moves.to_le_bytes())?;
        w.write_all(&self.elapsed_ticks.to_le_bytes())?;
        w.write_all(&self.rank.to_signed_bytes_le())?;
        Ok(())
    }

    /// # Errors
    /// Returns [`PersistError::Format`] on a bad magic, an unsupported
    /// version, or a truncated stream, and [`PersistError::Io`] on reader
    /// failures.
    pub fn read_from<R: Read>(r: &mut R) -> Result<Self, PersistError> {
        let magic = read_i32(r)?;
        if magic != SAVE_MAGIC {
            return Err(PersistError::Format(format!(
                "bad magic 0x{magic:08X}, expected 0x{SAVE_MAGIC:08X}"
            )));
        }
        let version = read_i32(r)?;
        if version != SAVE_VERSION {
            return Err(PersistError::Format(format!(
                "unsupported save version {version}"
            )));
        }
        let width = read_i32(r)?;
        let height = read_i32(r)?;
        let image_path = read_string(r)?;
        let moves = read_i32(r)?;
        let elapsed_ticks = read_i64(r)?;
        let mut rank_bytes = Vec::new();
        r.read_to_end(&mut rank_bytes)?;
        let rank = if rank_bytes.is_empty() {
            BigInt::from(0)
        } else {
            BigInt::from_signed_bytes_le(&rank_bytes)
        };
        Ok(Self {
            width,
            height,
            image_path,
            moves,
            elapsed_ticks,
            rank,
        })
    }

    /// # Errors
    /// Propagates [`write_to`](Self::write_to) failures and file creation
    /// errors.
    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        let mut w = BufWriter::new(File::create(path)?);
        self.write_to(&mut w)?;
        w.flush()?;
        Ok(())
    }

    /// # Errors
    /// Propagates [`read_from`](Self::read_from) failures and file open
    /// errors.
    pub fn load(path: &Path) -> Result<Self, PersistError> {
        let mut r = BufReader::new(File::open(path)?);
        Self::read_from(&mut r)
    }
}

fn fill<R: Read>(r: &mut R, buf: &mut [u8]) -> Result<(), PersistError> {
    r.read_exact(buf).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            PersistError::Format("unexpected end of stream".to_string())
        } else {
            PersistError::Io(e)
        }
    })
}

fn read_i32<R: Read>(r: &mut R) -> Result<i32, PersistError> {
    let mut buf = [0u8; 4];
    fill(r, &mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

fn read_i64<R: Read>(r: &mut R) -> Result<i64, PersistError> {
    let mut buf = [0u8; 8];
    fill(r, &mut buf)?;
    Ok(i64::from_le_bytes(buf))
}

// String length travels as a 7-bit variable-width integer, low group first,
// high bit set on every byte but the last.
fn write_string<W: Write>(w: &mut W, s: &str) -> Result<(), PersistError> {
    let mut len = s.len() as u32;
    loop {
        let byte = (len & 0x7F) as u8;
        len >>= 7;
        if len == 0 {
            w.write_all(&[byte])?;
            break;
        }
        w.write_all(&[byte | 0x80])?;
    }
    w.write_all(s.as_bytes())?;
    Ok(())
}

fn read_string<R: Read>(r: &mut R) -> Result<String, PersistError> {
    let mut len: u32 = 0;
    let mut shift = 0;
    loop {
        let mut byte = [0u8; 1];
        fill(r, &mut byte)?;
        if shift > 28 {
            return Err(PersistError::Format(
                "string length prefix too long".to_string(),
            ));
        }
        len |= u32::from(byte[0] & 0x7F) << shift;
        if byte[0] & 0x80 == 0 {
            break;
        }
        shift += 7;
    }
    let mut buf = vec![0u8; len as usize];
    fill(r, &mut buf)?;
    String::from_utf8(buf).map_err(|_| PersistError::Format("invalid UTF-8 string".to_string()))
}
