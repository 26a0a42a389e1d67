//! Container writer.
//!
//! Records are encoded as they are added; the file itself is emitted in one
//! [`finalize`](ContainerWriter::finalize) call once the set of surviving
//! records, and with it the header count and index size, is known.
//! On disk the write is two-phase: header, then a zeroed placeholder index,
//! then each length-prefixed payload with its start offset noted, then a
//! seek back to patch the index with the real offsets. A file is only valid
//! once that patch lands; until then the index region is all zeroes.
//!
//! Re-running the writer over the same records in the same order produces
//! byte-identical output.

use byteorder::{LittleEndian, WriteBytesExt};
use std::io::{self, Seek, SeekFrom, Write};

use crate::codec::{encode_puzzle, EncodeError};
use crate::header::{Header, HEADER_SIZE, INDEX_ENTRY_SIZE};
use crate::puzzle::Puzzle;

#[derive(Debug, Default)]
pub struct ContainerWriter {
    payloads: Vec<Vec<u8>>,
}

impl ContainerWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode one puzzle and queue its payload. A failed encode leaves the
    /// writer unchanged, so the caller can skip the record and keep going.
    pub fn add(&mut self, puzzle: &Puzzle) -> Result<(), EncodeError> {
        let payload = encode_puzzle(puzzle)?;
        self.payloads.push(payload);
        Ok(())
    }

    pub fn record_count(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    /// Write the complete container: header, placeholder index, payloads,
    /// then patch the index in place and restore the position past the last
    /// payload.
    pub fn finalize<W: Write + Seek>(&self, mut writer: W) -> io::Result<()> {
        let count = u32::try_from(self.payloads.len())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "too many records"))?;
        Header::new(count).write(&mut writer)?;

        // Reserve the index region; offsets are only known once each payload
        // has actually been written.
        let index_base = HEADER_SIZE as u64;
        writer.write_all(&vec![0u8; self.payloads.len() * INDEX_ENTRY_SIZE])?;

        let mut offsets = Vec::with_capacity(self.payloads.len());
        for payload in &self.payloads {
            offsets.push(writer.stream_position()?);
            writer.write_u32::<LittleEndian>(payload.len() as u32)?;
            writer.write_all(payload)?;
        }

        let end_of_payloads = writer.stream_position()?;
        writer.seek(SeekFrom::Start(index_base))?;
        for offset in &offsets {
            writer.write_u64::<LittleEndian>(*offset)?;
        }
        writer.seek(SeekFrom::Start(end_of_payloads))?;
        Ok(())
    }
}
