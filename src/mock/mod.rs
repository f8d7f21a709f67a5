mod display;
mod viewer;

pub use display::{DisplayError, TerminalDisplay};
pub use viewer::run_frame_viewer;
