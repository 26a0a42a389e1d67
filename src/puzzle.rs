//! Puzzle data model: one solved 9×9 grid plus its killer cages.

/// Cell count of the solution grid.
pub const GRID_CELLS: usize = 81;
/// Cells per grid row.
pub const GRID_SIDE: usize = 9;

/// A killer cage: a target sum and the cells it covers.
///
/// Cell order is not semantically meaningful but is preserved exactly
/// through encode/decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cage {
    pub sum: u32,
    /// (row, col) pairs; each coordinate must fit a nibble to encode.
    pub cells: Vec<(u8, u8)>,
}

/// One puzzle record: the solved grid (row-major, digits 1–9) and its cages
/// in source order. Constructed by the parsers or by `decode_puzzle`; never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    pub solution: [u8; GRID_CELLS],
    pub cages: Vec<Cage>,
}

impl Puzzle {
    /// Render the record back into the original two-part text form:
    /// nine bracketed grid rows, a blank separator line, then one
    /// `sum = (r,c),(r,c)` line per cage. No trailing newline.
    pub fn to_text(&self) -> String {
        let mut lines: Vec<String> = Vec::with_capacity(GRID_SIDE + 1 + self.cages.len());
        for row in self.solution.chunks(GRID_SIDE) {
            let digits: Vec<String> = row.iter().map(u8::to_string).collect();
            lines.push(format!("[{}]", digits.join(", ")));
        }
        lines.push(String::new());
        for cage in &self.cages {
            let cells: Vec<String> = cage
                .cells
                .iter()
                .map(|(r, c)| format!("({r},{c})"))
                .collect();
            lines.push(format!("{} = {}", cage.sum, cells.join(",")));
        }
        lines.join("\n")
    }
}
