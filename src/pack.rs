//! Packing workflow: source archive folders → one container file each.
//!
//! Per-record failures (unreadable entry, parse error, encode error) are
//! logged with the entry name and skipped; the batch continues. Header
//! count and index only ever cover the records that survived.

use log::{error, info, warn};
use std::fs::{self, File};
use std::io;
use std::ops::RangeInclusive;
use std::path::Path;

use crate::parse::{parse_cages, parse_solution};
use crate::puzzle::Puzzle;
use crate::source::SourceArchive;
use crate::writer::ContainerWriter;

/// Cage-size folders packed when no explicit selection is given.
pub const DEFAULT_CAGE_FOLDERS: RangeInclusive<u32> = 2..=9;

/// Container file name for one cage-size folder.
pub fn container_file_name(cage: u32) -> String {
    format!("cage-le-{cage}.ks")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PackReport {
    pub written: usize,
    pub attempted: usize,
}

/// Pack every entry pair under `folder` into `out_file`.
///
/// Returns how many records were written out of how many pairs were found.
/// When zero records survive, no file is produced at all; the report still
/// carries the attempted count.
pub fn pack_folder<A: SourceArchive>(
    source: &A,
    folder: &str,
    out_file: &Path,
) -> io::Result<PackReport> {
    let pairs = source.entry_pairs(folder)?;
    if pairs.is_empty() {
        warn!("no puzzle pairs found under folder {folder}/");
        return Ok(PackReport::default());
    }

    let mut writer = ContainerWriter::new();
    for pair in &pairs {
        let (killer_text, ans_text) =
            match (source.read_text(&pair.killer), source.read_text(&pair.ans)) {
                (Ok(k), Ok(a)) => (k, a),
                (Err(e), _) | (_, Err(e)) => {
                    warn!("failed to read {} / {}: {e}", pair.killer, pair.ans);
                    continue;
                }
            };

        let solution = match parse_solution(&ans_text) {
            Ok(s) => s,
            Err(e) => {
                warn!("parse failed for {}: {e}", pair.ans);
                continue;
            }
        };
        let cages = parse_cages(&killer_text);

        if let Err(e) = writer.add(&Puzzle { solution, cages }) {
            warn!("encode failed for {}: {e}", pair.killer);
            continue;
        }
        if writer.record_count() % 200 == 0 {
            info!("written {} puzzles...", writer.record_count());
        }
    }

    let report = PackReport {
        written: writer.record_count(),
        attempted: pairs.len(),
    };
    if writer.is_empty() {
        warn!(
            "no records survived for folder {folder}/ ({} attempted); not writing {}",
            report.attempted,
            out_file.display()
        );
        return Ok(report);
    }

    if let Some(parent) = out_file.parent() {
        fs::create_dir_all(parent)?;
    }
    writer.finalize(File::create(out_file)?)?;
    info!(
        "wrote {}/{} puzzles to {}",
        report.written,
        report.attempted,
        out_file.display()
    );
    Ok(report)
}

/// Pack each selected cage folder into `<out_dir>/cage-le-<n>.ks`.
///
/// A folder that fails outright is reported and does not stop the rest.
/// Returns the total number of records written across all folders.
pub fn pack_all<A: SourceArchive>(source: &A, out_dir: &Path, folders: &[u32]) -> usize {
    let mut total = 0;
    for &cage in folders {
        let out_file = out_dir.join(container_file_name(cage));
        match pack_folder(source, &cage.to_string(), &out_file) {
            Ok(report) => total += report.written,
            Err(e) => error!("packing folder {cage}/: {e}"),
        }
    }
    info!("total puzzles written across files: {total}");
    total
}
