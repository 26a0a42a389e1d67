use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};
use thiserror::Error;

pub const MAGIC: &[u8; 4] = b"KSF1";
pub const VERSION: u8 = 1;
/// magic(4) + version(1) + reserved(3) + count(4)
pub const HEADER_SIZE: usize = 12;
/// One absolute LE u64 file offset per record.
pub const INDEX_ENTRY_SIZE: usize = 8;

#[derive(Error, Debug)]
pub enum HeaderError {
    #[error("Not a KSF1 container (bad magic)")]
    BadMagic,
    #[error("Unsupported container version: {0}")]
    UnsupportedVersion(u8),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone)]
pub struct Header {
    pub magic: [u8; 4],
    pub version: u8,
    pub record_count: u32,
}

impl Header {
    pub fn new(record_count: u32) -> Self {
        Self {
            magic: *MAGIC,
            version: VERSION,
            record_count,
        }
    }

    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(&self.magic)?;
        writer.write_u8(self.version)?;
        writer.write_all(&[0u8; 3])?;
        writer.write_u32::<LittleEndian>(self.record_count)?;
        Ok(())
    }

    /// The magic is checked before anything past it is read; reserved bytes
    /// are consumed but ignored.
    pub fn read<R: Read>(mut reader: R) -> Result<Self, HeaderError> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if &magic != MAGIC {
            return Err(HeaderError::BadMagic);
        }
        let version = reader.read_u8()?;
        if version != VERSION {
            return Err(HeaderError::UnsupportedVersion(version));
        }
        let mut reserved = [0u8; 3];
        reader.read_exact(&mut reserved)?;
        let record_count = reader.read_u32::<LittleEndian>()?;
        Ok(Self {
            magic,
            version,
            record_count,
        })
    }
}
