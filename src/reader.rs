//! Container reader.
//!
//! Opening validates the header and loads the whole offset table for the
//! session; after that every [`fetch`](ContainerReader::fetch) is one seek
//! plus one payload read, independent of fetch order. The reader never
//! writes, so any number of independent sessions may open the same file
//! concurrently.

use byteorder::{LittleEndian, ReadBytesExt};
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use thiserror::Error;

use crate::codec::{decode_puzzle, DecodeError};
use crate::header::{Header, HeaderError};
use crate::puzzle::Puzzle;

#[derive(Error, Debug)]
pub enum ContainerError {
    #[error(transparent)]
    Header(#[from] HeaderError),
    #[error("record index {index} out of range (container holds {count})")]
    IndexOutOfRange { index: u32, count: u32 },
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug)]
pub struct ContainerReader<R: Read + Seek> {
    reader: R,
    header: Header,
    offsets: Vec<u64>,
}

impl ContainerReader<File> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ContainerError> {
        Self::new(File::open(path)?)
    }
}

impl<R: Read + Seek> ContainerReader<R> {
    /// Validate the header and load the offset index.
    pub fn new(mut reader: R) -> Result<Self, ContainerError> {
        let header = Header::read(&mut reader)?;
        let mut offsets = Vec::with_capacity(header.record_count as usize);
        for _ in 0..header.record_count {
            offsets.push(reader.read_u64::<LittleEndian>()?);
        }
        Ok(Self {
            reader,
            header,
            offsets,
        })
    }

    pub fn record_count(&self) -> u32 {
        self.header.record_count
    }

    /// Fetch the record at `index`: seek to its offset, read the 4-byte
    /// length prefix and exactly that many payload bytes, then decode.
    pub fn fetch(&mut self, index: u32) -> Result<Puzzle, ContainerError> {
        let offset = *self
            .offsets
            .get(index as usize)
            .ok_or(ContainerError::IndexOutOfRange {
                index,
                count: self.header.record_count,
            })?;

        self.reader.seek(SeekFrom::Start(offset))?;
        let payload_len = self.reader.read_u32::<LittleEndian>()?;
        let mut payload = vec![0u8; payload_len as usize];
        self.reader.read_exact(&mut payload)?;
        Ok(decode_puzzle(&payload)?)
    }

    /// Release the underlying handle. Consuming the reader means a fetch
    /// after close cannot be expressed, rather than failing at runtime.
    pub fn close(self) {}
}
