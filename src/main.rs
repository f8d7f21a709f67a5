use led_matrix_board::board::BoardConfig;
use led_matrix_board::frame::{FrameBuffer, FrameWriter};
use led_matrix_board::pattern::{self, Pattern};

#[cfg(target_os = "espidf")]
fn main() {
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    log::info!("LED Matrix - ESP32-S3");

    if let Err(e) = run() {
        log::error!("LED matrix stopped: {e}");
    }
}

#[cfg(target_os = "espidf")]
fn run() -> Result<(), Box<dyn std::error::Error>> {
    use esp_idf_svc::hal::peripherals::Peripherals;
    use led_matrix_board::esp32::Esp32LedDisplay;

    let config = BoardConfig::ESP32_S3_MATRIX;
    let peripherals = Peripherals::take()?;
    // GPIO 14 is `board::LED_PIN`.
    let mut display =
        Esp32LedDisplay::new(peripherals.rmt.channel0, peripherals.pins.gpio14, &config)?;

    let mut frame = FrameBuffer::new(config.mapper());
    let mut console = FrameWriter::new(std::io::stdout());
    pattern::play(
        Pattern::for_config(&config),
        &mut frame,
        &mut display,
        &mut console,
        config.frame_interval,
        None,
    )?;
    Ok(())
}

/// Host build: same frame loop against the terminal. Frame lines go to
/// stderr so they can be captured and replayed with `frame-viewer`.
#[cfg(not(target_os = "espidf"))]
fn main() {
    use led_matrix_board::mock::TerminalDisplay;

    let config = BoardConfig {
        calibration: std::env::args().any(|arg| arg == "--calibrate"),
        ..BoardConfig::ESP32_S3_MATRIX
    };

    print!("\x1B[2J");
    let mut frame = FrameBuffer::new(config.mapper());
    let mut console = FrameWriter::new(std::io::stderr());
    if let Err(e) = pattern::play(
        Pattern::for_config(&config),
        &mut frame,
        &mut TerminalDisplay::new(),
        &mut console,
        config.frame_interval,
        None,
    ) {
        eprintln!("LED matrix stopped: {e}");
    }
}
