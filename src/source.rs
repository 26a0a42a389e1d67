//! Source archive collaborator: where the raw puzzle text comes from.
//!
//! The packer only needs two operations from its source: list the
//! `.killer`/`.ans` entry pairs under a folder, and read one named entry as
//! text. The storage mechanism stays behind [`SourceArchive`].
//! [`DirArchive`] is the shipped implementation, reading an extracted
//! corpus from a directory tree.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Entry names of one matched `.killer`/`.ans` pair, as accepted by
/// [`SourceArchive::read_text`].
#[derive(Debug, Clone)]
pub struct EntryPair {
    pub killer: String,
    pub ans: String,
}

pub trait SourceArchive {
    /// List every base name under `folder` that has both a `.killer` and an
    /// `.ans` entry, in a deterministic order. Entries without a matching
    /// partner are silently excluded.
    fn entry_pairs(&self, folder: &str) -> io::Result<Vec<EntryPair>>;

    /// Read a named entry as UTF-8 text.
    fn read_text(&self, name: &str) -> io::Result<String>;
}

/// A directory tree treated as an archive: entry names are paths relative
/// to the root, folders are subdirectories.
#[derive(Debug, Clone)]
pub struct DirArchive {
    root: PathBuf,
}

impl DirArchive {
    pub fn open<P: AsRef<Path>>(root: P) -> io::Result<Self> {
        let root = root.as_ref().to_owned();
        if !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("source archive is not a directory: {}", root.display()),
            ));
        }
        Ok(Self { root })
    }
}

impl SourceArchive for DirArchive {
    fn entry_pairs(&self, folder: &str) -> io::Result<Vec<EntryPair>> {
        // base name → (killer entry, ans entry); BTreeMap keeps the pair
        // list sorted so repeated packs produce identical containers.
        let mut by_base: BTreeMap<String, (Option<String>, Option<String>)> = BTreeMap::new();

        for entry in fs::read_dir(self.root.join(folder))? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            let (Some(stem), Some(ext)) = (
                path.file_stem().and_then(|s| s.to_str()),
                path.extension().and_then(|e| e.to_str()),
            ) else {
                continue;
            };
            let name = format!("{folder}/{stem}.{ext}");
            let slot = by_base.entry(stem.to_owned()).or_default();
            match ext.to_ascii_lowercase().as_str() {
                "killer" => slot.0 = Some(name),
                "ans" => slot.1 = Some(name),
                _ => {}
            }
        }

        Ok(by_base
            .into_values()
            .filter_map(|pair| match pair {
                (Some(killer), Some(ans)) => Some(EntryPair { killer, ans }),
                _ => None,
            })
            .collect())
    }

    fn read_text(&self, name: &str) -> io::Result<String> {
        fs::read_to_string(self.root.join(name))
    }
}
