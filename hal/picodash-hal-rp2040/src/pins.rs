//! Pico W pin map for the Pimoroni Display Pack
//!
//! The panel, LED and backlight pins are fixed by the pack and handed out
//! as typed peripherals. Button pins come from the config file, so the
//! remaining GPIOs go into a [`PinBank`] and are taken by number.

use embassy_rp::gpio::AnyPin;
use embassy_rp::peripherals::{
    DMA_CH0, DMA_CH1, FLASH, PIN_16, PIN_17, PIN_18, PIN_19, PIN_20, PIN_23, PIN_24, PIN_25,
    PIN_29, PIN_6, PIN_7, PIN_8, PIO0, PWM_SLICE2, PWM_SLICE3, PWM_SLICE4, SPI0,
};
use embassy_rp::{Peri, Peripherals};

/// Number of GPIOs on the RP2040
pub const GPIO_COUNT: usize = 30;

/// Wired to the CYW43 radio on the Pico W
pub const RADIO_PINS: [u8; 4] = [23, 24, 25, 29];

/// Used by the Display Pack panel, LED and backlight
pub const PACK_PINS: [u8; 8] = [6, 7, 8, 16, 17, 18, 19, 20];

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
    /// Pin already taken
    AlreadyTaken,
    /// Pin belongs to the radio or the Display Pack
    Reserved,
}

/// General-purpose GPIOs, taken by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT],
}

impl PinBank {
    fn empty() -> Self {
        Self {
            pins: [const { None }; GPIO_COUNT],
        }
    }

    fn insert(&mut self, pin_num: u8, pin: Peri<'static, AnyPin>) {
        self.pins[pin_num as usize] = Some(pin);
    }

    /// Take a pin by number
    pub fn take(&mut self, pin_num: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        if pin_num as usize >= GPIO_COUNT {
            return Err(PinError::InvalidPin);
        }
        if RADIO_PINS.contains(&pin_num) || PACK_PINS.contains(&pin_num) {
            return Err(PinError::Reserved);
        }
        self.pins[pin_num as usize]
            .take()
            .ok_or(PinError::AlreadyTaken)
    }

    /// Check if a pin is available
    pub fn is_available(&self, pin_num: u8) -> bool {
        self.pins
            .get(pin_num as usize)
            .is_some_and(|pin| pin.is_some())
    }
}

/// Fixed Display Pack peripherals
pub struct DisplayPack {
    pub spi: Peri<'static, SPI0>,
    pub clk: Peri<'static, PIN_18>,
    pub mosi: Peri<'static, PIN_19>,
    pub cs: Peri<'static, PIN_17>,
    pub dc: Peri<'static, PIN_16>,
    pub backlight: Peri<'static, PIN_20>,
    /// Slice 2, output A drives the backlight
    pub backlight_slice: Peri<'static, PWM_SLICE2>,
    pub led_r: Peri<'static, PIN_6>,
    pub led_g: Peri<'static, PIN_7>,
    pub led_b: Peri<'static, PIN_8>,
    /// Slice 3, outputs A/B drive red and green
    pub led_rg_slice: Peri<'static, PWM_SLICE3>,
    /// Slice 4, output A drives blue
    pub led_b_slice: Peri<'static, PWM_SLICE4>,
}

/// CYW43439 radio wiring on the Pico W
///
/// The radio's gSPI bus is bit-banged by PIO0 over a single data line.
pub struct Radio {
    /// WL_ON, drives the radio's power/reset
    pub pwr: Peri<'static, PIN_23>,
    /// Shared data in/out
    pub dio: Peri<'static, PIN_24>,
    pub cs: Peri<'static, PIN_25>,
    pub clk: Peri<'static, PIN_29>,
    pub pio: Peri<'static, PIO0>,
    pub dma: Peri<'static, DMA_CH1>,
}

/// Everything the dashboard uses, split out of the embassy peripherals
pub struct Board {
    pub pack: DisplayPack,
    pub radio: Radio,
    pub pins: PinBank,
    pub flash: Peri<'static, FLASH>,
    pub flash_dma: Peri<'static, DMA_CH0>,
}

impl Board {
    /// Split the peripherals into the Display Pack, the radio and a pin bank
    pub fn split(p: Peripherals) -> Self {
        let pack = DisplayPack {
            spi: p.SPI0,
            clk: p.PIN_18,
            mosi: p.PIN_19,
            cs: p.PIN_17,
            dc: p.PIN_16,
            backlight: p.PIN_20,
            backlight_slice: p.PWM_SLICE2,
            led_r: p.PIN_6,
            led_g: p.PIN_7,
            led_b: p.PIN_8,
            led_rg_slice: p.PWM_SLICE3,
            led_b_slice: p.PWM_SLICE4,
        };

        let radio = Radio {
            pwr: p.PIN_23,
            dio: p.PIN_24,
            cs: p.PIN_25,
            clk: p.PIN_29,
            pio: p.PIO0,
            dma: p.DMA_CH1,
        };

        let mut pins = PinBank::empty();
        pins.insert(0, p.PIN_0.into());
        pins.insert(1, p.PIN_1.into());
        pins.insert(2, p.PIN_2.into());
        pins.insert(3, p.PIN_3.into());
        pins.insert(4, p.PIN_4.into());
        pins.insert(5, p.PIN_5.into());
        pins.insert(9, p.PIN_9.into());
        pins.insert(10, p.PIN_10.into());
        pins.insert(11, p.PIN_11.into());
        pins.insert(12, p.PIN_12.into());
        pins.insert(13, p.PIN_13.into());
        pins.insert(14, p.PIN_14.into());
        pins.insert(15, p.PIN_15.into());
        pins.insert(21, p.PIN_21.into());
        pins.insert(22, p.PIN_22.into());
        pins.insert(26, p.PIN_26.into());
        pins.insert(27, p.PIN_27.into());
        pins.insert(28, p.PIN_28.into());

        Self {
            pack,
            radio,
            pins,
            flash: p.FLASH,
            flash_dma: p.DMA_CH0,
        }
    }
}
