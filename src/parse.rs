//! Tolerant parsers for the hand-authored puzzle source files.
//!
//! The source corpus is noisy: cage lines carry stray tokens, solution
//! files mix bracketed rows with decoration. Both parsers extract what
//! matches the expected shape and discard the rest; a cage line that
//! yields no coordinates or no sum is dropped, not reported. Only the
//! solution grid has hard failure modes, since a wrong cell count or
//! digit cannot be encoded.

use crate::puzzle::{Cage, GRID_CELLS};
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

static COORD_PATTERN: OnceLock<Regex> = OnceLock::new();
static GRID_ROW_PATTERN: OnceLock<Regex> = OnceLock::new();
static LEADING_INT_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Matches one `(row,col)` pair, whitespace-tolerant.
fn coord_regex() -> &'static Regex {
    COORD_PATTERN.get_or_init(|| {
        Regex::new(r"\(\s*(\d+)\s*,\s*(\d+)\s*\)").expect("invalid coordinate regex")
    })
}

/// Matches a bracketed comma-separated digit list.
fn grid_row_regex() -> &'static Regex {
    GRID_ROW_PATTERN.get_or_init(|| Regex::new(r"\[([0-9,\s]+)\]").expect("invalid row regex"))
}

fn leading_int_regex() -> &'static Regex {
    LEADING_INT_PATTERN.get_or_init(|| Regex::new(r"^\s*(\d+)").expect("invalid sum regex"))
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("solution grid has {0} values (expected 81)")]
    LengthMismatch(usize),
    #[error("solution grid contains invalid digit: {0}")]
    DigitOutOfRange(u32),
}

/// Parse the cage lines of a `.killer` entry.
///
/// Per non-blank line: the sum is the integer before the first `=`, or the
/// leading integer token when no `=` is present; every `(r,c)` pair
/// anywhere on the line contributes a cell, any other token is ignored.
/// Lines with an unparsable sum or zero coordinate pairs are skipped
/// silently, so this never fails; a file with no usable lines parses to
/// an empty cage list.
pub fn parse_cages(text: &str) -> Vec<Cage> {
    let mut cages = Vec::new();
    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let sum: u32 = if let Some((sum_part, _)) = line.split_once('=') {
            match sum_part.trim().parse() {
                Ok(s) => s,
                Err(_) => continue,
            }
        } else {
            match leading_int_regex()
                .captures(line)
                .and_then(|m| m[1].parse().ok())
            {
                Some(s) => s,
                None => continue,
            }
        };

        let cells: Vec<(u8, u8)> = coord_regex()
            .captures_iter(line)
            .filter_map(|m| Some((m[1].parse().ok()?, m[2].parse().ok()?)))
            .collect();
        if !cells.is_empty() {
            cages.push(Cage { sum, cells });
        }
    }
    cages
}

/// Parse a `.ans` entry into the flat 81-digit solution, row-major.
///
/// Every line's first bracketed list contributes its integers in order;
/// other lines are ignored. The total must come to exactly 81 values,
/// each in 1–9.
pub fn parse_solution(text: &str) -> Result<[u8; GRID_CELLS], ParseError> {
    let mut values: Vec<u32> = Vec::with_capacity(GRID_CELLS);
    for line in text.lines() {
        let Some(m) = grid_row_regex().captures(line) else {
            continue;
        };
        values.extend(
            m[1].split(',')
                .filter_map(|tok| tok.trim().parse::<u32>().ok()),
        );
    }

    if values.len() != GRID_CELLS {
        return Err(ParseError::LengthMismatch(values.len()));
    }
    let mut solution = [0u8; GRID_CELLS];
    for (cell, &v) in solution.iter_mut().zip(&values) {
        if !(1..=9).contains(&v) {
            return Err(ParseError::DigitOutOfRange(v));
        }
        *cell = v as u8;
    }
    Ok(solution)
}
