//! 3x5 bitmap glyphs for calibration bar labels.

pub(crate) const GLYPH_WIDTH: usize = 3;
pub(crate) const GLYPH_HEIGHT: usize = 5;

/// Rows of a glyph, most significant of the low three bits leftmost.
fn glyph(c: char) -> Option<[u8; GLYPH_HEIGHT]> {
    let rows = match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        _ => return None,
    };
    Some(rows)
}

/// Width in pixels of `text` drawn at `scale`, one blank column between glyphs.
pub(crate) fn text_width(text: &str, scale: usize) -> usize {
    let n = text.chars().count();
    if n == 0 {
        return 0;
    }
    (n * (GLYPH_WIDTH + 1) - 1) * scale
}

/// Calls `plot(x, y)` for every lit pixel of `text` with its top-left at `(x0, y0)`.
pub(crate) fn draw_text(text: &str, x0: usize, y0: usize, scale: usize, mut plot: impl FnMut(usize, usize)) {
    for (i, c) in text.chars().enumerate() {
        let Some(rows) = glyph(c) else { continue };
        let gx = x0 + i * (GLYPH_WIDTH + 1) * scale;
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                    continue;
                }
                for dy in 0..scale {
                    for dx in 0..scale {
                        plot(gx + col * scale + dx, y0 + row * scale + dy);
                    }
                }
            }
        }
    }
}
