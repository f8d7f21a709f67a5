use std::io::{self, Write};

use crate::LedMatrix;
use crate::color::Rgb;
use crate::frame::FrameBuffer;

/// Stand-in for the LED panel when running off the board.
///
/// Each LED becomes a three-column ANSI true-color cell, laid out by
/// logical `(x, y)` so the grid looks like the panel from the front,
/// whatever the strip wiring.
#[derive(Debug, Default)]
pub struct TerminalDisplay;

impl TerminalDisplay {
    pub fn new() -> Self {
        Self
    }
}

/// Failure to draw the LED grid on stdout or a captured writer.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("could not draw LED grid: {0}")]
    Io(#[from] io::Error),
}

impl LedMatrix for TerminalDisplay {
    type Error = DisplayError;

    fn show(&mut self, frame: &FrameBuffer) -> Result<(), Self::Error> {
        let geometry = frame.mapper().geometry();
        let rows: Vec<Vec<Rgb>> = (0..geometry.height())
            .map(|y| (0..geometry.width()).map(|x| frame.get(x, y)).collect())
            .collect();
        let mut stdout = io::stdout().lock();
        write!(stdout, "\x1B[H")?;
        render_rows(&mut stdout, &rows)
    }
}

/// Render rows of logical pixels to any writer. Shared with the frame viewer.
pub(crate) fn render_rows(w: &mut impl Write, rows: &[Vec<Rgb>]) -> Result<(), DisplayError> {
    for row in rows {
        for color in row {
            write!(w, "{}", format_cell(*color))?;
        }
        writeln!(w)?;
    }
    w.flush()?;
    Ok(())
}

/// A two-column cell with the pixel as background color.
///
/// Channel values are boosted so the dim board palette stays visible.
fn format_cell(color: Rgb) -> String {
    if color == Rgb::default() {
        return " · ".to_string();
    }
    let boost = |c: u8| c.saturating_mul(4);
    format!(
        "\x1b[48;2;{};{};{}m   \x1b[0m",
        boost(color.r),
        boost(color.g),
        boost(color.b)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::palette;
    use crate::mapping::{CoordinateMapper, MatrixGeometry, Orientation, WiringTopology};

    fn render_to_string(rows: &[Vec<Rgb>]) -> String {
        let mut buf = Vec::new();
        render_rows(&mut buf, rows).expect("rendering to buffer should succeed");
        String::from_utf8(buf).expect("output should be valid UTF-8")
    }

    #[test]
    fn display_error_names_the_led_grid() {
        let err = DisplayError::from(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
        assert_eq!(err.to_string(), "could not draw LED grid: pipe closed");
    }

    #[test]
    fn black_pixels_render_as_dots() {
        let output = render_to_string(&[vec![Rgb::default(); 3]]);
        assert_eq!(output, " ·  ·  · \n");
    }

    #[test]
    fn lit_pixel_uses_boosted_background() {
        let output = render_to_string(&[vec![palette::ORANGE]]);
        assert!(
            output.contains("\x1b[48;2;240;120;0m"),
            "orange should render as a boosted true-color background"
        );
    }

    #[test]
    fn boost_saturates() {
        let output = render_to_string(&[vec![Rgb::new(255, 64, 1)]]);
        assert!(output.contains("\x1b[48;2;255;255;4m"));
    }

    #[test]
    fn one_line_per_row() {
        let output = render_to_string(&vec![vec![palette::RED; 8]; 8]);
        assert_eq!(output.lines().count(), 8);
    }

    #[test]
    fn rows_follow_logical_order_on_serpentine_panel() {
        let geometry = MatrixGeometry::new(2, 2).expect("valid geometry");
        let mapper = CoordinateMapper::new(geometry, WiringTopology::Serpentine, Orientation::NONE);
        let mut frame = FrameBuffer::new(mapper);
        frame.set(0, 1, palette::BLUE);

        let rows: Vec<Vec<Rgb>> = (0..2)
            .map(|y| (0..2).map(|x| frame.get(x, y)).collect())
            .collect();
        let output = render_to_string(&rows);
        let second_row = output.lines().nth(1).expect("two rows rendered");
        assert!(second_row.starts_with("\x1b[48;2;0;0;240m"));
    }
}
