//! Character-cell layout
//!
//! Text is laid out on a grid of 6x8 pixel cells (5x8 glyph plus one column
//! of spacing), giving 21 columns by 8 rows on a 128x64 panel.

use heapless::String;

use crate::backend::PanelGeometry;

/// Cell width in pixels
pub const CELL_WIDTH: u16 = 6;

/// Cell height in pixels
pub const CELL_HEIGHT: u16 = 8;

/// Largest grid a `TextGrid` can hold (256 pixels wide)
pub const MAX_COLS: usize = 42;

/// Largest grid a `TextGrid` can hold (128 pixels tall)
pub const MAX_ROWS: usize = 16;

/// Bytes needed for one row of text in UTF-8
pub const LINE_CAPACITY: usize = MAX_COLS * 4;

/// Cursor and wrapping rules for a character grid
///
/// - `\n` moves to column 0 of the next row
/// - `\r` is ignored
/// - a glyph that would start past the last column wraps to the next row
/// - glyphs below the last row are clipped, but the cursor keeps advancing
///
/// There is no scrolling: once the cursor leaves the grid, further text is
/// discarded until the cursor is moved back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextCursor {
    col: u8,
    row: u8,
    cols: u8,
    rows: u8,
}

impl TextCursor {
    /// Create a cursor at (0,0) on a `cols` x `rows` grid
    pub const fn new(cols: u8, rows: u8) -> Self {
        Self {
            col: 0,
            row: 0,
            cols,
            rows,
        }
    }

    /// Create a cursor sized for a panel
    pub fn for_geometry(geometry: &PanelGeometry) -> Self {
        Self::new(geometry.cols(), geometry.rows())
    }

    /// Current (column, row)
    pub const fn position(&self) -> (u8, u8) {
        (self.col, self.row)
    }

    /// Move the cursor. Positions outside the grid are allowed.
    pub fn set_position(&mut self, col: u8, row: u8) {
        self.col = col;
        self.row = row;
    }

    /// Whether the cursor sits at the top-left cell
    pub const fn is_home(&self) -> bool {
        self.col == 0 && self.row == 0
    }

    /// Grid width in cells
    pub const fn cols(&self) -> u8 {
        self.cols
    }

    /// Grid height in cells
    pub const fn rows(&self) -> u8 {
        self.rows
    }

    /// Advance past `ch`, returning the cell it occupies if it is visible
    pub fn place(&mut self, ch: char) -> Option<(u8, u8)> {
        match ch {
            '\n' => {
                self.col = 0;
                self.row = self.row.saturating_add(1);
                None
            }
            '\r' => None,
            _ => {
                if self.col >= self.cols {
                    self.col = 0;
                    self.row = self.row.saturating_add(1);
                }
                let visible = self.row < self.rows && self.col < self.cols;
                let cell = visible.then_some((self.col, self.row));
                self.col = self.col.saturating_add(1);
                cell
            }
        }
    }
}

/// Headless text content of a panel
///
/// Holds one character per cell plus the cursor. Drivers without pixels
/// (tests, host tools) render into this instead of a frame buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct TextGrid {
    cells: [[char; MAX_COLS]; MAX_ROWS],
    cursor: TextCursor,
}

impl TextGrid {
    /// Create a blank grid. Dimensions are clamped to `MAX_COLS` x `MAX_ROWS`.
    pub fn new(cols: u8, rows: u8) -> Self {
        let cols = cols.min(MAX_COLS as u8);
        let rows = rows.min(MAX_ROWS as u8);
        Self {
            cells: [[' '; MAX_COLS]; MAX_ROWS],
            cursor: TextCursor::new(cols, rows),
        }
    }

    /// Create a blank grid sized for a panel
    pub fn for_geometry(geometry: &PanelGeometry) -> Self {
        Self::new(geometry.cols(), geometry.rows())
    }

    /// Blank every cell. The cursor is left where it is.
    pub fn blank(&mut self) {
        for row in &mut self.cells {
            row.fill(' ');
        }
    }

    /// Current cursor
    pub const fn cursor(&self) -> TextCursor {
        self.cursor
    }

    /// Move the cursor
    pub fn set_cursor(&mut self, col: u8, row: u8) {
        self.cursor.set_position(col, row);
    }

    /// Write text at the cursor, following the `TextCursor` wrap rules
    pub fn write_str(&mut self, text: &str) {
        for ch in text.chars() {
            if let Some((col, row)) = self.cursor.place(ch) {
                self.cells[row as usize][col as usize] = ch;
            }
        }
    }

    /// Character at a cell, or `None` outside the grid
    pub fn cell(&self, col: u8, row: u8) -> Option<char> {
        if col < self.cursor.cols() && row < self.cursor.rows() {
            Some(self.cells[row as usize][col as usize])
        } else {
            None
        }
    }

    /// Text of one row with trailing blanks removed
    ///
    /// Rows outside the grid read as empty.
    pub fn line(&self, row: u8) -> String<LINE_CAPACITY> {
        let mut line = String::new();
        if row >= self.cursor.rows() {
            return line;
        }
        let cells = &self.cells[row as usize][..self.cursor.cols() as usize];
        let used = cells.iter().rposition(|&c| c != ' ').map_or(0, |i| i + 1);
        for &ch in &cells[..used] {
            // Capacity covers MAX_COLS four-byte characters
            let _ = line.push(ch);
        }
        line
    }

    /// All rows, top to bottom
    pub fn lines(&self) -> impl Iterator<Item = String<LINE_CAPACITY>> + '_ {
        (0..self.cursor.rows()).map(|row| self.line(row))
    }

    /// Whether every cell is blank
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|row| row.iter().all(|&c| c == ' '))
    }

    /// Grid width in cells
    pub const fn cols(&self) -> u8 {
        self.cursor.cols()
    }

    /// Grid height in cells
    pub const fn rows(&self) -> u8 {
        self.cursor.rows()
    }
}

impl core::fmt::Debug for TextGrid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TextGrid")
            .field("cursor", &self.cursor.position())
            .field("lines", &LinesDebug(self))
            .finish()
    }
}

struct LinesDebug<'a>(&'a TextGrid);

impl core::fmt::Debug for LinesDebug<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.0.lines()).finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TextGrid {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "TextGrid[");
        for (i, line) in self.lines().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_starts_home() {
        let cursor = TextCursor::new(21, 8);
        assert!(cursor.is_home());
        assert_eq!(cursor.position(), (0, 0));
    }

    #[test]
    fn test_newline_moves_to_next_row() {
        let mut cursor = TextCursor::new(21, 8);
        assert_eq!(cursor.place('a'), Some((0, 0)));
        assert_eq!(cursor.place('\n'), None);
        assert_eq!(cursor.position(), (0, 1));
        assert_eq!(cursor.place('b'), Some((0, 1)));
    }

    #[test]
    fn test_carriage_return_ignored() {
        let mut cursor = TextCursor::new(21, 8);
        cursor.place('a');
        assert_eq!(cursor.place('\r'), None);
        assert_eq!(cursor.position(), (1, 0));
    }

    #[test]
    fn test_wrap_after_last_column() {
        let mut grid = TextGrid::new(21, 8);
        grid.write_str("ABCDEFGHIJKLMNOPQRSTUVWXYZ");

        assert_eq!(grid.line(0).as_str(), "ABCDEFGHIJKLMNOPQRSTU");
        assert_eq!(grid.line(1).as_str(), "VWXYZ");
        assert_eq!(grid.cursor().position(), (5, 1));
    }

    #[test]
    fn test_full_row_leaves_cursor_past_edge() {
        let mut grid = TextGrid::new(21, 8);
        grid.write_str("123456789012345678901");

        // Wrap happens lazily, on the next glyph
        assert_eq!(grid.cursor().position(), (21, 0));
        grid.write_str("x");
        assert_eq!(grid.line(1).as_str(), "x");
    }

    #[test]
    fn test_text_below_last_row_is_clipped() {
        let mut grid = TextGrid::new(21, 2);
        grid.write_str("one\ntwo\nthree");

        assert_eq!(grid.line(0).as_str(), "one");
        assert_eq!(grid.line(1).as_str(), "two");
        assert_eq!(grid.line(2).as_str(), "");
        assert_eq!(grid.cursor().position(), (5, 2));
    }

    #[test]
    fn test_blank_keeps_cursor() {
        let mut grid = TextGrid::new(21, 8);
        grid.write_str("Hello\nWorld");
        grid.blank();

        assert!(grid.is_blank());
        assert_eq!(grid.cursor().position(), (5, 1));
    }

    #[test]
    fn test_write_at_cursor_overwrites() {
        let mut grid = TextGrid::new(21, 8);
        grid.write_str("Hello");
        grid.set_cursor(1, 0);
        grid.write_str("ELL");
        assert_eq!(grid.line(0).as_str(), "HELLo");
    }

    #[test]
    fn test_grid_for_default_panel() {
        let grid = TextGrid::for_geometry(&PanelGeometry::SSD1306_128X64);
        assert_eq!(grid.cols(), 21);
        assert_eq!(grid.rows(), 8);
        assert_eq!(grid.lines().count(), 8);
    }

    #[test]
    fn test_cell_outside_grid() {
        let grid = TextGrid::new(21, 8);
        assert_eq!(grid.cell(0, 0), Some(' '));
        assert_eq!(grid.cell(21, 0), None);
        assert_eq!(grid.cell(0, 8), None);
    }

    #[test]
    fn test_latin1_characters() {
        let mut grid = TextGrid::new(21, 8);
        grid.write_str("21.5°C");
        assert_eq!(grid.line(0).as_str(), "21.5°C");
        assert_eq!(grid.cursor().position(), (6, 0));
    }
}
