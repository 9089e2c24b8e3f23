use std::fmt;

/// Maximum permitted row/column index (both zero-based), matching the
/// classic spreadsheet limit of 16384 rows/columns (`XFD` columns, but this
/// engine only needs three-letter columns — see [`MAX_COLUMN_LETTERS`]).
pub const MAX_ROW: i32 = 16383;
pub const MAX_COL: i32 = 16383;

/// A position's textual form (`"AA123"`) may never exceed this many
/// characters: up to three column letters plus up to fourteen row digits.
const MAX_TEXT_LEN: usize = 17;

/// Column letters decode as a bijective base-26 numeral with no zero digit
/// (`A`, ..., `Z`, `AA`, ..., `ZZ`, `AAA`, ...). Columns this engine supports
/// never need more than three letters to reach [`MAX_COL`].
const MAX_COLUMN_LETTERS: usize = 3;

/// A zero-based `(row, col)` coordinate into the sheet's grid.
///
/// [`Position::NONE`] is a sentinel for "no such position" (e.g. the result
/// of parsing malformed text); it never satisfies [`Position::is_valid`].
/// Ordering is lexicographic on `(row, col)`, so a `Vec<Position>` sorts into
/// reading order (top-to-bottom, then left-to-right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const NONE: Position = Position { row: -1, col: -1 };

    pub const fn new(row: i32, col: i32) -> Self {
        Position { row, col }
    }

    /// Bounds check: rejects [`Position::NONE`] and any coordinate outside
    /// `0..=MAX_ROW` / `0..=MAX_COL`.
    pub fn is_valid(&self) -> bool {
        self.row >= 0 && self.row <= MAX_ROW && self.col >= 0 && self.col <= MAX_COL
    }

    /// Parses an A1-style address (`"A1"`, `"AA123"`). Any malformed input —
    /// lowercase letters, a missing row or column segment, a too-long
    /// string, or coordinates out of range — yields [`Position::NONE`]
    /// rather than an error: callers that care must check [`is_valid`].
    ///
    /// [`is_valid`]: Position::is_valid
    pub fn parse(text: &str) -> Position {
        if text.len() > MAX_TEXT_LEN {
            return Position::NONE;
        }
        let bytes = text.as_bytes();
        let mut i = 0;
        while i < bytes.len() && bytes[i].is_ascii_uppercase() {
            i += 1;
        }
        let (letters, digits) = text.split_at(i);
        if letters.is_empty() || letters.len() > MAX_COLUMN_LETTERS || digits.is_empty() {
            return Position::NONE;
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Position::NONE;
        }
        let Some(col) = column_letters_to_index(letters) else {
            return Position::NONE;
        };
        let Ok(row_number) = digits.parse::<i64>() else {
            return Position::NONE;
        };
        if row_number < 1 {
            return Position::NONE;
        }
        let row = row_number - 1;
        if row > i64::from(MAX_ROW) {
            return Position::NONE;
        }
        let pos = Position::new(row as i32, col);
        if pos.is_valid() {
            pos
        } else {
            Position::NONE
        }
    }

    /// Inverse of [`Position::parse`]: `""` for an invalid position.
    pub fn to_a1(&self) -> String {
        if !self.is_valid() {
            return String::new();
        }
        format!("{}{}", column_index_to_letters(self.col), self.row + 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1())
    }
}

/// Decodes bijective base-26 column letters (`A=0`, `Z=25`, `AA=26`, ...).
/// `Σ (cᵢ+1)·26^(n-1-i) - 1`. Returns `None` on non-uppercase input.
fn column_letters_to_index(letters: &str) -> Option<i32> {
    let mut value: i64 = 0;
    for b in letters.bytes() {
        if !b.is_ascii_uppercase() {
            return None;
        }
        let digit = i64::from(b - b'A' + 1);
        value = value * 26 + digit;
    }
    Some((value - 1) as i32)
}

/// Inverse of [`column_letters_to_index`].
fn column_index_to_letters(index: i32) -> String {
    let mut value = i64::from(index) + 1;
    let mut letters = Vec::new();
    while value > 0 {
        let rem = (value - 1) % 26;
        letters.push(b'A' + rem as u8);
        value = (value - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).expect("ASCII uppercase letters are valid UTF-8")
}
