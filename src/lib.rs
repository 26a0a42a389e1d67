pub mod codec;
pub mod header;
pub mod pack;
pub mod parse;
pub mod puzzle;
pub mod reader;
pub mod source;
pub mod writer;

pub use codec::{decode_puzzle, encode_puzzle};
pub use header::Header;
pub use puzzle::{Cage, Puzzle};
pub use reader::ContainerReader;
pub use writer::ContainerWriter;
