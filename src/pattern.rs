use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use thiserror::Error;

use crate::LedMatrix;
use crate::board::BoardConfig;
use crate::color::{Rgb, palette};
use crate::frame::{FrameBuffer, FrameWriter};

/// Background of the calibration sweep, just bright enough to show which
/// LEDs are alive.
const BACKGROUND: Rgb = Rgb::new(2, 2, 2);

/// Diagnostic patterns shown by the board binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// A white dot walks every logical position in row-major order, with
    /// fixed corner markers: top-left red, top-right green, bottom-left blue.
    ///
    /// On a correctly configured panel the dot moves left to right, top to
    /// bottom. A dot that runs backwards on alternate rows means the wiring
    /// is wrong; a misplaced corner means a flip is wrong.
    Calibration,
    /// One static palette color per row.
    TestCard,
}

/// Row colors of the test card, cycled for panels taller than the list.
const TEST_CARD_ROWS: [Rgb; 8] = [
    palette::RED,
    palette::ORANGE,
    palette::YELLOW,
    palette::GREEN,
    palette::CYAN,
    palette::BLUE,
    palette::PURPLE,
    palette::MAGENTA,
];

impl Pattern {
    pub fn for_config(config: &BoardConfig) -> Self {
        if config.calibration {
            Pattern::Calibration
        } else {
            Pattern::TestCard
        }
    }

    /// Number of distinct frames before the pattern repeats.
    pub fn frame_count(&self, frame: &FrameBuffer) -> usize {
        match self {
            Pattern::Calibration => frame.mapper().len(),
            Pattern::TestCard => 1,
        }
    }

    /// Draw step `step` of the pattern into `frame`, wrapping past the end.
    pub fn render(&self, step: usize, frame: &mut FrameBuffer) {
        let geometry = frame.mapper().geometry();
        let (width, height) = (geometry.width(), geometry.height());

        match self {
            Pattern::Calibration => {
                frame.fill(BACKGROUND);
                frame.set(0, 0, palette::RED);
                frame.set(width - 1, 0, palette::GREEN);
                frame.set(0, height - 1, palette::BLUE);

                let step = step % self.frame_count(frame);
                frame.set(step % width, step / width, palette::WHITE);
            }
            Pattern::TestCard => {
                for y in 0..height {
                    let color = TEST_CARD_ROWS[y % TEST_CARD_ROWS.len()];
                    for x in 0..width {
                        frame.set(x, y, color);
                    }
                }
            }
        }
    }
}

/// Error from the frame loop: either the display or the console failed.
#[derive(Debug, Error)]
pub enum PlayError<E> {
    #[error("display update failed: {0}")]
    Display(E),

    #[error("failed to write frame to console: {0}")]
    Console(#[from] io::Error),
}

/// Drive `display` with `pattern`, mirroring every frame to `console`.
///
/// Frames are spaced by `interval`. Runs forever when `limit` is `None`,
/// otherwise stops after `limit` frames and returns how many were shown.
pub fn play<D, W>(
    pattern: Pattern,
    frame: &mut FrameBuffer,
    display: &mut D,
    console: &mut FrameWriter<W>,
    interval: Duration,
    limit: Option<usize>,
) -> Result<usize, PlayError<D::Error>>
where
    D: LedMatrix,
    W: Write,
{
    log::info!("playing {pattern:?} pattern every {interval:?}");

    let mut shown = 0;
    for step in (0..pattern.frame_count(frame)).cycle() {
        if limit.is_some_and(|limit| shown >= limit) {
            break;
        }
        pattern.render(step, frame);
        display.show(frame).map_err(PlayError::Display)?;
        console.write_frame(frame)?;
        shown += 1;

        if !interval.is_zero() {
            thread::sleep(interval);
        }
    }
    Ok(shown)
}
