//! 5x5 identicon rendering for conversation threads.
//!
//! Each thread's SHA-1 hex digest deterministically picks a mirrored
//! pixel pattern and a hue, so the same thread always shows the same
//! mark next to its messages.

use eframe::egui::{vec2, Color32, Rect, Response, Sense, Ui};

const GRID: usize = 5;

/// Digest used when a thread has no usable hex (too short, not hex).
pub const DEFAULT_THREAD_HEX: &str = "aaaaaaaaaaaaaaa";

/// Which cells of the 5x5 grid are filled for a digest. The first five
/// nibbles drive the middle column, the next five the inner columns,
/// the last five the outer columns; inner and outer mirror left/right.
/// An even nibble turns its cell on.
fn derive_cells(hex: &str) -> [[bool; GRID]; GRID] {
    let hex = if hex.len() >= 15 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        hex
    } else {
        DEFAULT_THREAD_HEX
    };

    let mut cells = [[false; GRID]; GRID];
    for (i, c) in hex.chars().take(15).enumerate() {
        let on = c.to_digit(16).map(|d| d % 2 == 0).unwrap_or(false);
        if !on {
            continue;
        }
        if i < 5 {
            cells[i][2] = true;
        } else if i < 10 {
            cells[i - 5][1] = true;
            cells[i - 5][3] = true;
        } else {
            cells[i - 10][0] = true;
            cells[i - 10][4] = true;
        }
    }
    cells
}

/// Foreground color for a digest: hue from the last seven hex digits,
/// fixed saturation and lightness.
fn thread_color(hex: &str) -> Color32 {
    let hex = if hex.len() >= 15 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        hex
    } else {
        DEFAULT_THREAD_HEX
    };
    let tail = &hex[hex.len() - 7..];
    let hue = u32::from_str_radix(tail, 16).unwrap_or(0) as f32 / 0xfffffff as f32;
    hsl_to_color(hue, 0.7, 0.5)
}

/// Standard HSL to RGB conversion, h/s/l in [0, 1].
fn hsl_to_color(h: f32, s: f32, l: f32) -> Color32 {
    fn hue_to_channel(p: f32, q: f32, mut t: f32) -> f32 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    if s == 0.0 {
        let v = (l * 255.0).round() as u8;
        return Color32::from_rgb(v, v, v);
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let r = hue_to_channel(p, q, h + 1.0 / 3.0);
    let g = hue_to_channel(p, q, h);
    let b = hue_to_channel(p, q, h - 1.0 / 3.0);
    Color32::from_rgb(
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    )
}

/// Paint the identicon for a thread digest. Background stays transparent;
/// the response senses clicks so it can double as a thread toggle.
pub fn render_thread_identicon(ui: &mut Ui, hex: &str, size: f32) -> Response {
    let (rect, response) = ui.allocate_exact_size(vec2(size, size), Sense::click());
    let cells = derive_cells(hex);
    let color = thread_color(hex);
    let cell = size / GRID as f32;

    let painter = ui.painter();
    for (row, cols) in cells.iter().enumerate() {
        for (col, on) in cols.iter().enumerate() {
            if *on {
                let min = rect.min + vec2(col as f32 * cell, row as f32 * cell);
                painter.rect_filled(Rect::from_min_size(min, vec2(cell, cell)), 0.0, color);
            }
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_are_deterministic() {
        let hex = "0123456789abcdef0123456789abcdef01234567";
        assert_eq!(derive_cells(hex), derive_cells(hex));
    }

    #[test]
    fn test_cells_mirror_left_right() {
        let cells = derive_cells("0123456789abcdef0123456789abcdef01234567");
        for row in cells.iter() {
            assert_eq!(row[1], row[3]);
            assert_eq!(row[0], row[4]);
        }
    }

    #[test]
    fn test_even_nibbles_fill_cells() {
        // First five nibbles drive the middle column top to bottom.
        let cells = derive_cells("02468fffffffffff");
        for row in 0..GRID {
            assert!(cells[row][2], "row {} middle cell should be on", row);
        }
        // 'f' is odd, so inner and outer columns stay empty.
        for row in cells.iter() {
            assert!(!row[0] && !row[1] && !row[3] && !row[4]);
        }
    }

    #[test]
    fn test_default_digest_fills_the_grid() {
        // 'a' is even in every position.
        let cells = derive_cells(DEFAULT_THREAD_HEX);
        assert!(cells.iter().all(|row| row.iter().all(|on| *on)));
    }

    #[test]
    fn test_short_or_invalid_digest_falls_back_to_default() {
        assert_eq!(derive_cells("abc"), derive_cells(DEFAULT_THREAD_HEX));
        assert_eq!(
            derive_cells("zzzzzzzzzzzzzzzz"),
            derive_cells(DEFAULT_THREAD_HEX)
        );
        assert_eq!(thread_color("abc"), thread_color(DEFAULT_THREAD_HEX));
    }

    #[test]
    fn test_thread_color_is_deterministic_and_saturated() {
        let hex = "0123456789abcdef0123456789abcdef01234567";
        assert_eq!(thread_color(hex), thread_color(hex));

        // Hue 0 with fixed s/l lands on a red with equal green/blue.
        let red = hsl_to_color(0.0, 0.7, 0.5);
        let (r, g, b, _) = red.to_tuple();
        assert!(r > g);
        assert_eq!(g, b);

        // Zero saturation collapses to gray.
        let gray = hsl_to_color(0.3, 0.0, 0.5);
        let (r, g, b, _) = gray.to_tuple();
        assert_eq!(r, g);
        assert_eq!(g, b);
    }
}
