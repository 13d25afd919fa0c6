//! Color and terminal cell types shared by the canvas and the terminal
//! shell. The pixel canvas resolves `Rgb` pixels into `Cell` grids.

/// A packed 24-bit color used by the pixel canvas and the sprite palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// Parse `#rrggbb` (leading `#` optional). Returns `None` on malformed input.
    pub fn from_hex(hex: &str) -> Option<Rgb> {
        let col = hex.trim_start_matches('#');
        if col.len() != 6 || !col.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&col[i..i + 2], 16).ok();
        Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Brighten (positive) or darken (negative) every channel by `percent`.
    pub fn shade(self, percent: i32) -> Rgb {
        let f = |n: u8| {
            let scaled = (f64::from(n) * f64::from(100 + percent) / 100.0).round();
            scaled.clamp(0.0, 255.0) as u8
        };
        Rgb(f(self.0), f(self.1), f(self.2))
    }
}

/// Colors of one terminal cell. A half-block cell uses `fg` for its top
/// pixel and `bg` for its bottom pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
}

/// One terminal cell: a glyph and its colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            ch: ' ',
            style: Style::default(),
        }
    }
}
