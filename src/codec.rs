//! Payload codec: one puzzle record to and from its fixed byte schema.
//!
//! Layout (no padding, no internal length prefix; the container records
//! the payload length externally):
//!
//! ```text
//! [ 81 B  solution digits, row-major            ]
//! [  1 B  cage count                            ]
//! per cage:
//! [  1 B  sum | 1 B cell count | cell count × 1 B packed (row<<4 | col) ]
//! ```
//!
//! Encoding validates the byte-range limits; decoding only checks
//! structural bounds. Out-of-range digits or sums in a decoded payload are
//! passed through untouched; they can only come from a corrupted
//! container, never from a successful encode.

use crate::puzzle::{Cage, Puzzle, GRID_CELLS};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EncodeError {
    #[error("puzzle has {0} cages (maximum 255)")]
    TooManyCages(usize),
    #[error("cage sum {0} does not fit in one byte")]
    SumOutOfRange(u32),
    #[error("cage has {0} cells (maximum 255)")]
    CageTooLarge(usize),
    #[error("cell ({0},{1}) does not fit in packed nibbles")]
    CoordOutOfRange(u8, u8),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DecodeError {
    #[error("payload truncated at byte {at} (need {needed} more)")]
    TruncatedPayload { at: usize, needed: usize },
}

/// Pack a cell coordinate into one byte: row in the high nibble, column in
/// the low nibble.
fn pack_cell(row: u8, col: u8) -> Result<u8, EncodeError> {
    if row > 0xF || col > 0xF {
        return Err(EncodeError::CoordOutOfRange(row, col));
    }
    Ok((row << 4) | col)
}

/// Serialize one puzzle into its canonical payload bytes.
pub fn encode_puzzle(puzzle: &Puzzle) -> Result<Vec<u8>, EncodeError> {
    if puzzle.cages.len() > 255 {
        return Err(EncodeError::TooManyCages(puzzle.cages.len()));
    }

    let cell_total: usize = puzzle.cages.iter().map(|c| c.cells.len()).sum();
    let mut payload = Vec::with_capacity(GRID_CELLS + 1 + puzzle.cages.len() * 2 + cell_total);

    payload.extend_from_slice(&puzzle.solution);
    payload.push(puzzle.cages.len() as u8);
    for cage in &puzzle.cages {
        let sum: u8 = cage
            .sum
            .try_into()
            .map_err(|_| EncodeError::SumOutOfRange(cage.sum))?;
        if cage.cells.len() > 255 {
            return Err(EncodeError::CageTooLarge(cage.cells.len()));
        }
        payload.push(sum);
        payload.push(cage.cells.len() as u8);
        for &(row, col) in &cage.cells {
            payload.push(pack_cell(row, col)?);
        }
    }
    Ok(payload)
}

/// Cursor over a payload slice; every advance is bounds-checked.
struct PayloadCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> PayloadCursor<'a> {
    fn take(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let end = self.pos.checked_add(len).filter(|&e| e <= self.bytes.len());
        match end {
            Some(end) => {
                let slice = &self.bytes[self.pos..end];
                self.pos = end;
                Ok(slice)
            }
            None => Err(DecodeError::TruncatedPayload {
                at: self.pos,
                needed: len - (self.bytes.len() - self.pos),
            }),
        }
    }

    fn take_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }
}

/// Deserialize payload bytes back into a puzzle. Exact inverse of
/// [`encode_puzzle`]: cage order and cell order are preserved.
pub fn decode_puzzle(bytes: &[u8]) -> Result<Puzzle, DecodeError> {
    let mut cursor = PayloadCursor { bytes, pos: 0 };

    let mut solution = [0u8; GRID_CELLS];
    solution.copy_from_slice(cursor.take(GRID_CELLS)?);

    let cage_count = cursor.take_u8()?;
    let mut cages = Vec::with_capacity(cage_count as usize);
    for _ in 0..cage_count {
        let sum = cursor.take_u8()? as u32;
        let cell_count = cursor.take_u8()?;
        let cells = cursor
            .take(cell_count as usize)?
            .iter()
            .map(|&b| (b >> 4, b & 0xF))
            .collect();
        cages.push(Cage { sum, cells });
    }
    Ok(Puzzle { solution, cages })
}
