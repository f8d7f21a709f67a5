use core::time::Duration;

use esp_idf_svc::hal::gpio::OutputPin;
use esp_idf_svc::hal::peripheral::Peripheral;
use esp_idf_svc::hal::rmt::config::TransmitConfig;
use esp_idf_svc::hal::rmt::{PinState, Pulse, RmtChannel, TxRmtDriver, VariableLengthSignal};
use esp_idf_svc::sys::EspError;

use crate::LedMatrix;
use crate::board::{BoardConfig, ColorOrder};
use crate::frame::FrameBuffer;

/// Error types for ESP32 LED display operations.
#[derive(Debug, thiserror::Error)]
pub enum LedDisplayError {
    #[error("LED driver initialization failed: {0}")]
    DriverInit(EspError),
    #[error("LED update error: {0}")]
    Update(#[from] EspError),
}

/// High/low pulse pair encoding one bit on the WS2812 data line.
type BitPulses = (Pulse, Pulse);

/// WS2812 LED matrix driven via the ESP32 RMT peripheral.
///
/// Shifts the frame out in physical strip order, with the board's
/// brightness ceiling and channel order applied on the way.
pub struct Esp32LedDisplay<'d> {
    tx: TxRmtDriver<'d>,
    brightness_limit: u8,
    color_order: ColorOrder,
    zero: BitPulses,
    one: BitPulses,
}

impl<'d> Esp32LedDisplay<'d> {
    pub fn new<C: RmtChannel>(
        channel: impl Peripheral<P = C> + 'd,
        pin: impl Peripheral<P = impl OutputPin> + 'd,
        config: &BoardConfig,
    ) -> Result<Self, LedDisplayError> {
        let rmt_config = TransmitConfig::new().clock_divider(1);
        let tx = TxRmtDriver::new(channel, pin, &rmt_config).map_err(LedDisplayError::DriverInit)?;

        let ticks_hz = tx.counter_clock().map_err(LedDisplayError::DriverInit)?;
        let pulse = |state, nanos| {
            Pulse::new_with_duration(ticks_hz, state, &Duration::from_nanos(nanos))
                .map_err(LedDisplayError::DriverInit)
        };

        // WS2812B timings: T0H 350ns, T0L 800ns, T1H 700ns, T1L 600ns.
        let zero = (pulse(PinState::High, 350)?, pulse(PinState::Low, 800)?);
        let one = (pulse(PinState::High, 700)?, pulse(PinState::Low, 600)?);

        log::info!(
            "WS2812 driver ready on GPIO {} (brightness limit {})",
            config.led_pin,
            config.brightness_limit
        );

        Ok(Self {
            tx,
            brightness_limit: config.brightness_limit,
            color_order: config.color_order,
            zero,
            one,
        })
    }
}

impl LedMatrix for Esp32LedDisplay<'_> {
    type Error = LedDisplayError;

    fn show(&mut self, frame: &FrameBuffer) -> Result<(), Self::Error> {
        let mut signal = VariableLengthSignal::new();

        for color in frame.pixels() {
            let [a, b, c] = self
                .color_order
                .arrange(color.scale(self.brightness_limit));
            let bits = u32::from_be_bytes([0, a, b, c]);

            // Most significant bit first.
            for shift in (0..24).rev() {
                let (high, low) = if bits >> shift & 1 == 1 {
                    &self.one
                } else {
                    &self.zero
                };
                signal.push([high, low])?;
            }
        }

        self.tx.start_blocking(&signal)?;
        Ok(())
    }
}
