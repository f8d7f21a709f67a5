mod display;

pub use display::{Esp32LedDisplay, LedDisplayError};
