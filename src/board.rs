//! Board configuration for the Waveshare ESP32-S3-Matrix.
//!
//! The panel is an 8×8 WS2812B matrix on GPIO 14. Everything the rest of
//! the crate needs to know about the hardware is collected in
//! [`BoardConfig`], with [`BoardConfig::ESP32_S3_MATRIX`] as the preset for
//! this board.

use std::time::Duration;

use thiserror::Error;

use crate::color::Rgb;
use crate::mapping::{CoordinateMapper, MatrixGeometry, Orientation, WiringTopology};

/// GPIO driving the LED data line.
pub const LED_PIN: u8 = 14;

/// Global brightness ceiling. Keeps the panel from overheating.
pub const BRIGHTNESS_LIMIT: u8 = 60;

pub const MATRIX_WIDTH: u16 = 8;
pub const MATRIX_HEIGHT: u16 = 8;
pub const NUM_LEDS: usize = MATRIX_WIDTH as usize * MATRIX_HEIGHT as usize;

/// Cadence of `FRAME:` snapshots on the serial console (10 FPS).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Error returned when a board configuration cannot describe real hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("matrix must have at least one row and one column, got {width}x{height}")]
    EmptyGeometry { width: u16, height: u16 },

    #[error("{width}x{height} matrix has more LEDs than a u16 can index")]
    TooManyLeds { width: u16, height: u16 },

    #[error("unsupported rotation of {0} degrees (expected 0, 90, 180 or 270)")]
    UnsupportedRotation(u16),
}

/// Panel rotation in quarter turns.
///
/// Recorded as part of the board description but not applied by
/// [`CoordinateMapper`]: whether a quarter turn should swap axes, reverse
/// strip order, or both is not settled for this hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }
}

impl TryFrom<u16> for Rotation {
    type Error = ConfigError;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            other => Err(ConfigError::UnsupportedRotation(other)),
        }
    }
}

/// Order in which the LED chip expects the color channels on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorOrder {
    #[default]
    Rgb,
    Grb,
    Bgr,
}

impl ColorOrder {
    /// Channel bytes of `color` in wire order.
    pub const fn arrange(self, color: Rgb) -> [u8; 3] {
        match self {
            ColorOrder::Rgb => [color.r, color.g, color.b],
            ColorOrder::Grb => [color.g, color.r, color.b],
            ColorOrder::Bgr => [color.b, color.g, color.r],
        }
    }
}

/// Everything fixed at startup about the LED panel and its driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    pub led_pin: u8,
    pub brightness_limit: u8,
    pub geometry: MatrixGeometry,
    pub color_order: ColorOrder,
    pub wiring: WiringTopology,
    pub orientation: Orientation,
    pub rotation: Rotation,
    /// Run the calibration sweep instead of the test pattern.
    pub calibration: bool,
    pub frame_interval: Duration,
}

impl BoardConfig {
    /// Waveshare ESP32-S3-Matrix as shipped.
    pub const ESP32_S3_MATRIX: Self = Self {
        led_pin: LED_PIN,
        brightness_limit: BRIGHTNESS_LIMIT,
        geometry: match MatrixGeometry::new(MATRIX_WIDTH, MATRIX_HEIGHT) {
            Ok(geometry) => geometry,
            Err(_) => panic!("board geometry must be valid"),
        },
        color_order: ColorOrder::Rgb,
        wiring: WiringTopology::RowMajor,
        orientation: Orientation::NONE,
        rotation: Rotation::Deg0,
        calibration: false,
        frame_interval: FRAME_INTERVAL,
    };

    /// Build the coordinate mapper for this panel.
    pub fn mapper(&self) -> CoordinateMapper {
        if self.rotation != Rotation::Deg0 {
            log::warn!(
                "panel rotation of {} degrees is configured but not applied to the mapping",
                self.rotation.degrees()
            );
        }
        log::info!(
            "LED matrix {}x{} on GPIO {}: {:?} wiring, flip_x={}, flip_y={}",
            self.geometry.width(),
            self.geometry.height(),
            self.led_pin,
            self.wiring,
            self.orientation.flip_x,
            self.orientation.flip_y
        );
        CoordinateMapper::new(self.geometry, self.wiring, self.orientation)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::ESP32_S3_MATRIX
    }
}
