use std::fmt;

/// A single pixel value, one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel by `brightness / 256`, rounding so that a
    /// brightness of 255 leaves the color unchanged.
    #[inline]
    pub const fn scale(self, brightness: u8) -> Self {
        Self {
            r: scale8(self.r, brightness),
            g: scale8(self.g, brightness),
            b: scale8(self.b, brightness),
        }
    }
}

/// Uppercase `RRGGBB`, the form used on the serial frame dump.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[inline]
const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Named colors shared by every program on the board.
///
/// Channel values stay at or below 60 to match the brightness budget.
pub mod palette {
    use super::Rgb;

    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const RED: Rgb = Rgb::new(60, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 60, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 60);
    pub const YELLOW: Rgb = Rgb::new(60, 60, 0);
    pub const CYAN: Rgb = Rgb::new(0, 60, 60);
    pub const MAGENTA: Rgb = Rgb::new(60, 0, 60);
    pub const WHITE: Rgb = Rgb::new(60, 60, 60);
    pub const ORANGE: Rgb = Rgb::new(60, 30, 0);
    pub const PURPLE: Rgb = Rgb::new(30, 0, 60);

    pub const NAMED: [(&str, Rgb); 10] = [
        ("black", BLACK),
        ("red", RED),
        ("green", GREEN),
        ("blue", BLUE),
        ("yellow", YELLOW),
        ("cyan", CYAN),
        ("magenta", MAGENTA),
        ("white", WHITE),
        ("orange", ORANGE),
        ("purple", PURPLE),
    ];

    /// Look up a palette color by name, ignoring ASCII case.
    pub fn by_name(name: &str) -> Option<Rgb> {
        NAMED
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, color)| *color)
    }
}
