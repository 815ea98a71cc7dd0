//! SPI panel bus adapter.
//!
//! Implements [`PanelBus`] over the ESP32's SPI2 peripheral plus the three
//! sideband GPIOs (DC select, reset, backlight). The command/data
//! distinction is the DC wire: low for opcodes, high for parameters and
//! pixel data.

#[cfg(not(target_os = "espidf"))]
use crate::drivers::display::PanelBus;
#[cfg(not(target_os = "espidf"))]
use crate::error::DisplayError;

#[cfg(target_os = "espidf")]
mod esp {
    use embedded_hal::spi::MODE_0;
    use esp_idf_hal::gpio::{AnyIOPin, AnyOutputPin, Output, PinDriver};
    use esp_idf_hal::prelude::*;
    use esp_idf_hal::spi::{config::Config, SpiDeviceDriver, SpiDriver, SpiDriverConfig, SPI2};

    use crate::drivers::display::PanelBus;
    use crate::error::{DisplayError, Error};
    use crate::pins;

    pub struct SpiPanelBus {
        spi: SpiDeviceDriver<'static, SpiDriver<'static>>,
        dc: PinDriver<'static, AnyOutputPin, Output>,
        rst: PinDriver<'static, AnyOutputPin, Output>,
        blk: PinDriver<'static, AnyOutputPin, Output>,
    }

    impl SpiPanelBus {
        /// Claim SPI2 and the panel sideband GPIOs.
        ///
        /// Failure here is fatal to startup: the caller logs and abandons
        /// rendering for the life of the process.
        pub fn new(spi: SPI2) -> Result<Self, Error> {
            // SAFETY: the panel GPIO numbers in `pins` are not claimed by
            // any other adapter; this constructor runs once at boot.
            let driver = SpiDriver::new(
                spi,
                unsafe { AnyIOPin::new(pins::LCD_SCLK_GPIO) },
                unsafe { AnyIOPin::new(pins::LCD_MOSI_GPIO) },
                None::<AnyIOPin>,
                &SpiDriverConfig::new(),
            )
            .map_err(|_| Error::Init("SPI2 driver"))?;

            let spi = SpiDeviceDriver::new(
                driver,
                Some(unsafe { AnyIOPin::new(pins::LCD_CS_GPIO) }),
                &Config::new()
                    .baudrate(pins::LCD_SPI_FREQ_HZ.Hz().into())
                    .data_mode(MODE_0),
            )
            .map_err(|_| Error::Init("SPI2 device"))?;

            let out = |gpio: i32, name: &'static str| {
                PinDriver::output(unsafe { AnyOutputPin::new(gpio) })
                    .map_err(|_| Error::Init(name))
            };

            Ok(Self {
                spi,
                dc: out(pins::LCD_DC_GPIO, "LCD DC GPIO")?,
                rst: out(pins::LCD_RST_GPIO, "LCD RST GPIO")?,
                blk: out(pins::LCD_BLK_GPIO, "LCD BLK GPIO")?,
            })
        }
    }

    impl PanelBus for SpiPanelBus {
        fn command(&mut self, op: u8) -> Result<(), DisplayError> {
            self.dc.set_low().map_err(|_| DisplayError::Bus)?;
            self.spi.write(&[op]).map_err(|_| DisplayError::Bus)
        }

        fn data(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
            self.dc.set_high().map_err(|_| DisplayError::Bus)?;
            self.spi.write(bytes).map_err(|_| DisplayError::Bus)
        }

        fn reset(&mut self, asserted: bool) -> Result<(), DisplayError> {
            // Active-low reset line.
            if asserted {
                self.rst.set_low().map_err(|_| DisplayError::Bus)
            } else {
                self.rst.set_high().map_err(|_| DisplayError::Bus)
            }
        }

        fn backlight(&mut self, on: bool) -> Result<(), DisplayError> {
            if on {
                self.blk.set_high().map_err(|_| DisplayError::Bus)
            } else {
                self.blk.set_low().map_err(|_| DisplayError::Bus)
            }
        }
    }
}

#[cfg(target_os = "espidf")]
pub use esp::SpiPanelBus;

// ── Host simulation stub ──────────────────────────────────────

/// Discards everything — lets the full display task run on a dev host.
#[cfg(not(target_os = "espidf"))]
pub struct NullPanelBus;

#[cfg(not(target_os = "espidf"))]
impl PanelBus for NullPanelBus {
    fn command(&mut self, _op: u8) -> Result<(), DisplayError> {
        Ok(())
    }
    fn data(&mut self, _bytes: &[u8]) -> Result<(), DisplayError> {
        Ok(())
    }
    fn reset(&mut self, _asserted: bool) -> Result<(), DisplayError> {
        Ok(())
    }
    fn backlight(&mut self, _on: bool) -> Result<(), DisplayError> {
        Ok(())
    }
}
