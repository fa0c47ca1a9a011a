// src/preview.rs

//! Prints an LED frame to a 24-bit color terminal.
//!
//! Each text line shows two LED rows using the upper half block: the
//! foreground paints the upper row and the background the lower one. Row 0
//! is drawn at the bottom, so fire rises up the screen.

use std::io::{self, Write};

use crate::color::Rgb;
use crate::grid::Grid;

const UPPER_HALF_BLOCK: char = '\u{2580}';
const SGR_PREFIX: &str = "\x1b[";
const SGR_SUFFIX: char = 'm';
const SGR_SEPARATOR: &str = ";";
const SGR_RESET_ALL: &str = "\x1b[0m";

fn sgr(codes: &[u16]) -> String {
    let joined = codes
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(SGR_SEPARATOR);
    format!("{}{}{}", SGR_PREFIX, joined, SGR_SUFFIX)
}

fn fg_codes(codes: &mut Vec<u16>, c: Rgb) {
    codes.extend_from_slice(&[38, 2, c.r as u16, c.g as u16, c.b as u16]);
}

fn bg_codes(codes: &mut Vec<u16>, c: Rgb) {
    codes.extend_from_slice(&[48, 2, c.r as u16, c.g as u16, c.b as u16]);
}

/// Writes `frame` as colored half blocks, one text line per two rows.
pub fn write_frame(out: &mut impl Write, frame: &Grid<Rgb>) -> io::Result<()> {
    let (width, height) = (frame.width(), frame.height());
    if width == 0 || height == 0 {
        return Ok(());
    }

    // Screen rows top to bottom are grid rows height-1 down to 0.
    let mut top = height;
    while top > 0 {
        let upper = top - 1;
        let lower = upper.checked_sub(1);
        let mut line = String::new();
        for x in 0..width {
            let mut codes = Vec::with_capacity(10);
            fg_codes(&mut codes, frame.get(x, upper).unwrap_or_default());
            if let Some(lower) = lower {
                bg_codes(&mut codes, frame.get(x, lower).unwrap_or_default());
            }
            line.push_str(&sgr(&codes));
            line.push(UPPER_HALF_BLOCK);
            if lower.is_none() {
                // Odd height: leave the terminal background under the last row.
                line.push_str(SGR_RESET_ALL);
            }
        }
        line.push_str(SGR_RESET_ALL);
        writeln!(out, "{}", line)?;
        top = top.saturating_sub(2);
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Geometry;
    use test_log::test;

    fn render(frame: &Grid<Rgb>) -> String {
        let mut buf = Vec::new();
        write_frame(&mut buf, frame).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn two_rows_share_one_line_with_row_zero_below() {
        let mut frame = Grid::new(Geometry::packed(1, 2));
        frame.set(0, 0, Rgb::new(1, 2, 3));
        frame.set(0, 1, Rgb::new(4, 5, 6));
        assert_eq!(
            render(&frame),
            "\x1b[38;2;4;5;6;48;2;1;2;3m\u{2580}\x1b[0m\n"
        );
    }

    #[test]
    fn odd_height_ends_with_foreground_only_line() {
        let frame = Grid::filled(Geometry::packed(2, 3), Rgb::WHITE);
        let text = render(&frame);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(!lines[1].contains("48;2"));
        assert_eq!(lines[0].matches('\u{2580}').count(), 2);
    }

    #[test]
    fn empty_frame_prints_nothing() {
        let frame: Grid<Rgb> = Grid::new(Geometry::packed(0, 0));
        assert_eq!(render(&frame), "");
    }
}
