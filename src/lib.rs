pub mod board;
pub mod color;
pub mod frame;
pub mod mapping;
pub mod pattern;

/// Trait for pushing a finished frame to a display.
///
/// Abstracts over the WS2812 panel (ESP32) and terminal rendering,
/// so the frame loop in `main` is the same on device and host.
pub trait LedMatrix {
    /// Error type for display update failures.
    type Error: std::fmt::Debug + std::fmt::Display;

    /// Show the given frame.
    ///
    /// Implementations read [`frame::FrameBuffer::pixels`] for strip order
    /// or [`frame::FrameBuffer::get`] for logical order, whichever suits
    /// the output.
    fn show(&mut self, frame: &frame::FrameBuffer) -> Result<(), Self::Error>;
}

#[cfg(target_os = "espidf")]
pub mod esp32;

#[cfg(not(target_os = "espidf"))]
pub mod mock;
