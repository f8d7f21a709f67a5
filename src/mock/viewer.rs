use std::io::{self, BufRead, Write};

use super::display::{DisplayError, render_rows};
use crate::color::Rgb;
use crate::frame::{FRAME_PREFIX, parse_frame};
use crate::mapping::MatrixGeometry;

/// Clears the screen and moves cursor to top-left.
#[inline]
fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    write!(w, "\x1B[2J\x1B[H")
}

/// Reads a serial capture and renders every `FRAME:` line it contains.
///
/// Lines without the frame prefix are regular log output from the board
/// and are skipped. Malformed frames are reported and skipped so a glitch
/// on the wire does not stop the viewer. Returns the number of frames shown.
pub fn run_frame_viewer(
    input: impl BufRead,
    output: &mut impl Write,
    geometry: MatrixGeometry,
) -> Result<usize, DisplayError> {
    clear_screen(output)?;
    let mut shown = 0;

    for line in input.lines() {
        let line = line?;
        let Some(start) = line.find(FRAME_PREFIX) else {
            continue;
        };

        match parse_frame(&line[start..], geometry) {
            Ok(pixels) => {
                let rows: Vec<Vec<Rgb>> = pixels
                    .chunks(geometry.width())
                    .map(<[Rgb]>::to_vec)
                    .collect();
                write!(output, "\x1B[H")?;
                render_rows(output, &rows)?;
                shown += 1;
                writeln!(output, "frame {shown}")?;
            }
            Err(e) => log::warn!("skipping malformed frame: {e}"),
        }
    }
    Ok(shown)
}
