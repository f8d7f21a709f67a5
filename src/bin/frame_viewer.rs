//! Renders `FRAME:` lines from a serial capture in the terminal.
//!
//! ```text
//! espflash monitor | frame-viewer
//! frame-viewer < capture.log
//! ```

use led_matrix_board::board::BoardConfig;

#[cfg(not(target_os = "espidf"))]
fn main() {
    use std::io;

    let geometry = BoardConfig::ESP32_S3_MATRIX.geometry;
    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();

    match led_matrix_board::mock::run_frame_viewer(stdin, &mut stdout, geometry) {
        Ok(shown) => eprintln!("{shown} frames shown"),
        Err(e) => {
            eprintln!("Frame viewer failed: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(target_os = "espidf")]
fn main() {
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    log::error!(
        "frame-viewer runs on the host; the {}x{} panel streams frames over the console",
        BoardConfig::ESP32_S3_MATRIX.geometry.width(),
        BoardConfig::ESP32_S3_MATRIX.geometry.height()
    );
}
