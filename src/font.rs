//! Hell font and glyph assembly.
//!
//! Glyphs are 7 columns of 7 keyable rows. Bit `0x40` of a column is the top
//! row, bit `0x01` the bottom one. The outer columns are always blank so that
//! consecutive characters never touch.

use hell_macros::glyph;
use thiserror::Error;

/// Columns per glyph, including the two blank spacing columns.
pub const FONT_WIDTH: usize = 7;
/// Keyable rows per column.
pub const FONT_HEIGHT: usize = 7;

const TOP_ROW: u8 = 0x40;

/// Interior columns for every code from `' '` up to `'_'`.
pub static FONT: [[u8; FONT_WIDTH - 2]; 64] = [
    // ' '
    glyph![
        ".....",
        ".....",
        ".....",
        ".....",
        ".....",
        ".....",
        ".....",
    ],
    // '!'
    glyph![
        "..#..",
        "..#..",
        "..#..",
        "..#..",
        "..#..",
        ".....",
        "..#..",
    ],
    // '"'
    glyph![
        ".#.#.",
        ".#.#.",
        ".#.#.",
        ".....",
        ".....",
        ".....",
        ".....",
    ],
    // '#'
    glyph![
        ".#.#.",
        ".#.#.",
        "#####",
        ".#.#.",
        "#####",
        ".#.#.",
        ".#.#.",
    ],
    // '$'
    glyph![
        "..#..",
        ".####",
        "#.#..",
        ".###.",
        "..#.#",
        "####.",
        "..#..",
    ],
    // '%'
    glyph![
        "##...",
        "##..#",
        "...#.",
        "..#..",
        ".#...",
        "#..##",
        "...##",
    ],
    // '&'
    glyph![
        ".##..",
        "#..#.",
        "#.#..",
        ".#...",
        "#.#.#",
        "#..#.",
        ".##.#",
    ],
    // '\''
    glyph![
        "..#..",
        "..#..",
        ".#...",
        ".....",
        ".....",
        ".....",
        ".....",
    ],
    // '('
    glyph![
        "...#.",
        "..#..",
        ".#...",
        ".#...",
        ".#...",
        "..#..",
        "...#.",
    ],
    // ')'
    glyph![
        ".#...",
        "..#..",
        "...#.",
        "...#.",
        "...#.",
        "..#..",
        ".#...",
    ],
    // '*'
    glyph![
        ".....",
        "..#..",
        "#.#.#",
        ".###.",
        "#.#.#",
        "..#..",
        ".....",
    ],
    // '+'
    glyph![
        ".....",
        "..#..",
        "..#..",
        "#####",
        "..#..",
        "..#..",
        ".....",
    ],
    // ','
    glyph![
        ".....",
        ".....",
        ".....",
        ".....",
        ".##..",
        "..#..",
        ".#...",
    ],
    // '-'
    glyph![
        ".....",
        ".....",
        ".....",
        "#####",
        ".....",
        ".....",
        ".....",
    ],
    // '.'
    glyph![
        ".....",
        ".....",
        ".....",
        ".....",
        ".....",
        ".##..",
        ".##..",
    ],
    // '/'
    glyph![
        ".....",
        "....#",
        "...#.",
        "..#..",
        ".#...",
        "#....",
        ".....",
    ],
    // '0'
    glyph![
        ".###.",
        "#...#",
        "#..##",
        "#.#.#",
        "##..#",
        "#...#",
        ".###.",
    ],
    // '1'
    glyph![
        "..#..",
        ".##..",
        "..#..",
        "..#..",
        "..#..",
        "..#..",
        ".###.",
    ],
    // '2'
    glyph![
        ".###.",
        "#...#",
        "....#",
        "...#.",
        "..#..",
        ".#...",
        "#####",
    ],
    // '3'
    glyph![
        "#####",
        "...#.",
        "..#..",
        "...#.",
        "....#",
        "#...#",
        ".###.",
    ],
    // '4'
    glyph![
        "...#.",
        "..##.",
        ".#.#.",
        "#..#.",
        "#####",
        "...#.",
        "...#.",
    ],
    // '5'
    glyph![
        "#####",
        "#....",
        "####.",
        "....#",
        "....#",
        "#...#",
        ".###.",
    ],
    // '6'
    glyph![
        "..##.",
        ".#...",
        "#....",
        "####.",
        "#...#",
        "#...#",
        ".###.",
    ],
    // '7'
    glyph![
        "#####",
        "....#",
        "...#.",
        "..#..",
        ".#...",
        ".#...",
        ".#...",
    ],
    // '8'
    glyph![
        ".###.",
        "#...#",
        "#...#",
        ".###.",
        "#...#",
        "#...#",
        ".###.",
    ],
    // '9'
    glyph![
        ".###.",
        "#...#",
        "#...#",
        ".####",
        "....#",
        "...#.",
        ".##..",
    ],
    // ':'
    glyph![
        ".....",
        ".##..",
        ".##..",
        ".....",
        ".##..",
        ".##..",
        ".....",
    ],
    // ';'
    glyph![
        ".....",
        ".##..",
        ".##..",
        ".....",
        ".##..",
        "..#..",
        ".#...",
    ],
    // '<'
    glyph![
        "...#.",
        "..#..",
        ".#...",
        "#....",
        ".#...",
        "..#..",
        "...#.",
    ],
    // '='
    glyph![
        ".....",
        ".....",
        "#####",
        ".....",
        "#####",
        ".....",
        ".....",
    ],
    // '>'
    glyph![
        ".#...",
        "..#..",
        "...#.",
        "....#",
        "...#.",
        "..#..",
        ".#...",
    ],
    // '?'
    glyph![
        ".###.",
        "#...#",
        "....#",
        "...#.",
        "..#..",
        ".....",
        "..#..",
    ],
    // '@'
    glyph![
        ".###.",
        "#...#",
        "....#",
        ".##.#",
        "#.#.#",
        "#.#.#",
        ".###.",
    ],
    // 'A'
    glyph![
        ".###.",
        "#...#",
        "#...#",
        "#####",
        "#...#",
        "#...#",
        "#...#",
    ],
    // 'B'
    glyph![
        "####.",
        "#...#",
        "#...#",
        "####.",
        "#...#",
        "#...#",
        "####.",
    ],
    // 'C'
    glyph![
        ".###.",
        "#...#",
        "#....",
        "#....",
        "#....",
        "#...#",
        ".###.",
    ],
    // 'D'
    glyph![
        "###..",
        "#..#.",
        "#...#",
        "#...#",
        "#...#",
        "#..#.",
        "###..",
    ],
    // 'E'
    glyph![
        "#####",
        "#....",
        "#....",
        "####.",
        "#....",
        "#....",
        "#####",
    ],
    // 'F'
    glyph![
        "#####",
        "#....",
        "#....",
        "####.",
        "#....",
        "#....",
        "#....",
    ],
    // 'G'
    glyph![
        ".###.",
        "#...#",
        "#....",
        "#.###",
        "#...#",
        "#...#",
        ".####",
    ],
    // 'H'
    glyph![
        "#...#",
        "#...#",
        "#...#",
        "#####",
        "#...#",
        "#...#",
        "#...#",
    ],
    // 'I'
    glyph![
        ".###.",
        "..#..",
        "..#..",
        "..#..",
        "..#..",
        "..#..",
        ".###.",
    ],
    // 'J'
    glyph![
        "..###",
        "...#.",
        "...#.",
        "...#.",
        "...#.",
        "#..#.",
        ".##..",
    ],
    // 'K'
    glyph![
        "#...#",
        "#..#.",
        "#.#..",
        "##...",
        "#.#..",
        "#..#.",
        "#...#",
    ],
    // 'L'
    glyph![
        "#....",
        "#....",
        "#....",
        "#....",
        "#....",
        "#....",
        "#####",
    ],
    // 'M'
    glyph![
        "#...#",
        "##.##",
        "#.#.#",
        "#.#.#",
        "#...#",
        "#...#",
        "#...#",
    ],
    // 'N'
    glyph![
        "#...#",
        "#...#",
        "##..#",
        "#.#.#",
        "#..##",
        "#...#",
        "#...#",
    ],
    // 'O'
    glyph![
        ".###.",
        "#...#",
        "#...#",
        "#...#",
        "#...#",
        "#...#",
        ".###.",
    ],
    // 'P'
    glyph![
        "####.",
        "#...#",
        "#...#",
        "####.",
        "#....",
        "#....",
        "#....",
    ],
    // 'Q'
    glyph![
        ".###.",
        "#...#",
        "#...#",
        "#...#",
        "#.#.#",
        "#..#.",
        ".##.#",
    ],
    // 'R'
    glyph![
        "####.",
        "#...#",
        "#...#",
        "####.",
        "#.#..",
        "#..#.",
        "#...#",
    ],
    // 'S'
    glyph![
        ".####",
        "#....",
        "#....",
        ".###.",
        "....#",
        "....#",
        "####.",
    ],
    // 'T'
    glyph![
        "#####",
        "..#..",
        "..#..",
        "..#..",
        "..#..",
        "..#..",
        "..#..",
    ],
    // 'U'
    glyph![
        "#...#",
        "#...#",
        "#...#",
        "#...#",
        "#...#",
        "#...#",
        ".###.",
    ],
    // 'V'
    glyph![
        "#...#",
        "#...#",
        "#...#",
        "#...#",
        "#...#",
        ".#.#.",
        "..#..",
    ],
    // 'W'
    glyph![
        "#...#",
        "#...#",
        "#...#",
        "#.#.#",
        "#.#.#",
        "#.#.#",
        ".#.#.",
    ],
    // 'X'
    glyph![
        "#...#",
        "#...#",
        ".#.#.",
        "..#..",
        ".#.#.",
        "#...#",
        "#...#",
    ],
    // 'Y'
    glyph![
        "#...#",
        "#...#",
        "#...#",
        ".#.#.",
        "..#..",
        "..#..",
        "..#..",
    ],
    // 'Z'
    glyph![
        "#####",
        "....#",
        "...#.",
        "..#..",
        ".#...",
        "#....",
        "#####",
    ],
    // '['
    glyph![
        ".###.",
        ".#...",
        ".#...",
        ".#...",
        ".#...",
        ".#...",
        ".###.",
    ],
    // '\'
    glyph![
        ".....",
        "#....",
        ".#...",
        "..#..",
        "...#.",
        "....#",
        ".....",
    ],
    // ']'
    glyph![
        ".###.",
        "...#.",
        "...#.",
        "...#.",
        "...#.",
        "...#.",
        ".###.",
    ],
    // '^'
    glyph![
        "..#..",
        ".#.#.",
        "#...#",
        ".....",
        ".....",
        ".....",
        ".....",
    ],
    // '_'
    glyph![
        ".....",
        ".....",
        ".....",
        ".....",
        ".....",
        ".....",
        "#####",
    ],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("character code {0:#04x} has no glyph")]
pub struct UnsupportedChar(pub u8);

/// Position of `code` in [`FONT`], folding lowercase onto uppercase.
pub fn font_index(code: u8) -> Option<usize> {
    match code {
        b' '..=b'_' => Some((code - b' ') as usize),
        // 'a' - 2 * ' ' lands on the 'A' entry
        b'a'..=b'z' => Some((code - 2 * b' ') as usize),
        _ => None,
    }
}

/// Looks up `code` and builds its full glyph.
pub fn encode(code: u8) -> Result<Glyph, UnsupportedChar> {
    let index = font_index(code).ok_or(UnsupportedChar(code))?;

    let mut columns = [0u8; FONT_WIDTH];
    columns[1..FONT_WIDTH - 1].copy_from_slice(&FONT[index]);

    Ok(Glyph { columns })
}

/// A single pixel event of the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pixel {
    Key,
    Mute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Glyph {
    columns: [u8; FONT_WIDTH],
}

impl Glyph {
    /// Number of pixels in one glyph.
    pub const CELLS: usize = FONT_WIDTH * FONT_HEIGHT;

    /// Builds a glyph from raw columns. The spacing columns are cleared.
    pub fn from_columns(mut columns: [u8; FONT_WIDTH]) -> Self {
        columns[0] = 0;
        columns[FONT_WIDTH - 1] = 0;

        Self { columns }
    }

    pub fn columns(&self) -> &[u8; FONT_WIDTH] {
        &self.columns
    }

    pub fn is_set(&self, column: usize, row: usize) -> bool {
        self.columns[column] & (TOP_ROW >> row) != 0
    }

    /// Pixels in transmission order.
    ///
    /// Rows go top to bottom; within a row, columns go from the last to the
    /// first.
    pub fn pixels(&self) -> Pixels<'_> {
        Pixels { glyph: self, cell: 0 }
    }
}

pub struct Pixels<'a> {
    glyph: &'a Glyph,
    cell: usize,
}

impl Iterator for Pixels<'_> {
    type Item = Pixel;

    fn next(&mut self) -> Option<Pixel> {
        if self.cell >= Glyph::CELLS {
            return None;
        }

        let row = self.cell / FONT_WIDTH;
        let column = FONT_WIDTH - 1 - self.cell % FONT_WIDTH;
        self.cell += 1;

        if self.glyph.is_set(column, row) {
            Some(Pixel::Key)
        } else {
            Some(Pixel::Mute)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = Glyph::CELLS - self.cell;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Pixels<'_> {}
