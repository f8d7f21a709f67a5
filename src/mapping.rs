use crate::board::ConfigError;

/// Width and height of the LED panel, in LEDs.
///
/// Both dimensions are non-zero and the total LED count fits in a `u16`,
/// which is what the LED driver indexes with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatrixGeometry {
    width: u16,
    height: u16,
}

impl MatrixGeometry {
    /// Create a geometry, rejecting empty panels and panels too large to index.
    pub const fn new(width: u16, height: u16) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGeometry { width, height });
        }
        if width as u32 * height as u32 > u16::MAX as u32 + 1 {
            return Err(ConfigError::TooManyLeds { width, height });
        }
        Ok(Self { width, height })
    }

    /// Number of columns.
    #[inline]
    pub const fn width(&self) -> usize {
        self.width as usize
    }

    /// Number of rows.
    #[inline]
    pub const fn height(&self) -> usize {
        self.height as usize
    }

    /// Total number of LEDs (`width * height`).
    #[inline]
    pub const fn len(&self) -> usize {
        self.width() * self.height()
    }

    /// Always false: a geometry has at least one LED.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

/// How the LED strip is threaded through the panel rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WiringTopology {
    /// Every row runs left to right.
    #[default]
    RowMajor,
    /// Even rows run left to right, odd rows right to left.
    ///
    /// ```text
    /// Row 0:  0 →  1 →  2 →  3 →  4 →  5 →  6 →  7
    /// Row 1: 15 ← 14 ← 13 ← 12 ← 11 ← 10 ←  9 ←  8
    /// Row 2: 16 → 17 → 18 → 19 → 20 → 21 → 22 → 23
    /// ```
    Serpentine,
}

/// Per-axis reflections applied before the wiring is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Orientation {
    pub flip_x: bool,
    pub flip_y: bool,
}

impl Orientation {
    /// No reflection on either axis.
    pub const NONE: Self = Self {
        flip_x: false,
        flip_y: false,
    };
}

/// Translates logical `(x, y)` positions into physical LED indices.
///
/// The mapper is a pure function of its configuration: it never fails,
/// never allocates and holds no mutable state, so it can be copied freely
/// and shared between threads.
///
/// Out-of-range coordinates are clamped to the nearest edge instead of
/// being rejected. A frame with a bad coordinate still renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordinateMapper {
    geometry: MatrixGeometry,
    wiring: WiringTopology,
    orientation: Orientation,
}

impl CoordinateMapper {
    pub const fn new(
        geometry: MatrixGeometry,
        wiring: WiringTopology,
        orientation: Orientation,
    ) -> Self {
        Self {
            geometry,
            wiring,
            orientation,
        }
    }

    #[inline]
    pub const fn geometry(&self) -> MatrixGeometry {
        self.geometry
    }

    #[inline]
    pub const fn wiring(&self) -> WiringTopology {
        self.wiring
    }

    #[inline]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Number of LEDs in the physical buffer this mapper indexes into.
    #[inline]
    pub const fn len(&self) -> usize {
        self.geometry.len()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.geometry.is_empty()
    }

    /// Map a logical position to a physical LED index.
    ///
    /// The result is always in `0..self.len()`.
    pub const fn map_position(&self, x: usize, y: usize) -> usize {
        let width = self.geometry.width();
        let height = self.geometry.height();

        let mut x = if x >= width { width - 1 } else { x };
        let mut y = if y >= height { height - 1 } else { y };

        if self.orientation.flip_y {
            y = (height - 1) - y;
        }
        if self.orientation.flip_x {
            x = (width - 1) - x;
        }

        match self.wiring {
            WiringTopology::Serpentine if y % 2 == 1 => y * width + (width - 1 - x),
            WiringTopology::Serpentine | WiringTopology::RowMajor => y * width + x,
        }
    }

    /// Map a signed position; negative coordinates clamp to zero.
    pub const fn map_signed(&self, x: i32, y: i32) -> usize {
        self.map_position(clamp_non_negative(x), clamp_non_negative(y))
    }

    /// Find the logical position wired to a physical LED index.
    ///
    /// Indices past the end clamp to the last LED.
    pub const fn logical_position(&self, index: usize) -> (usize, usize) {
        let width = self.geometry.width();
        let height = self.geometry.height();
        let last = self.len() - 1;
        let index = if index > last { last } else { index };

        let y = index / width;
        let mut x = index % width;

        if matches!(self.wiring, WiringTopology::Serpentine) && y % 2 == 1 {
            x = (width - 1) - x;
        }

        // Reflections are their own inverse.
        let x = if self.orientation.flip_x {
            (width - 1) - x
        } else {
            x
        };
        let y = if self.orientation.flip_y {
            (height - 1) - y
        } else {
            y
        };
        (x, y)
    }
}

#[inline]
const fn clamp_non_negative(value: i32) -> usize {
    if value < 0 { 0 } else { value as usize }
}
