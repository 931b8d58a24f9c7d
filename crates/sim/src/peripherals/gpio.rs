// ledfsm - TM4C123 switch/LED state machine demo and board simulator
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! GPIO Port F model: masked DATA-window addressing, commit protection for
//! PF0, and externally driven input pins with pull-up resolution.

use crate::{Peripheral, SimResult};
use ledfsm_device::regs::{Pins, GPIO_LOCK_KEY};

const DATA_WINDOW_END: u32 = 0x3FC;
const DIR_OFFSET: u32 = 0x400;
const PUR_OFFSET: u32 = 0x510;
const DEN_OFFSET: u32 = 0x51C;
const LOCK_OFFSET: u32 = 0x520;
const CR_OFFSET: u32 = 0x524;

/// Commit register reset value: everything but PF0 is committed. PF0 shares
/// the pin with NMI and stays protected until unlocked and committed.
const CR_RESET: u8 = 0x1E;

/// Digital level on a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    High,
}

/// Port F with the registers the demo uses. Output pins read back their data
/// latch; input pins read the externally driven level, or the pull-up level
/// when nothing drives them.
#[derive(Debug, serde::Serialize)]
pub struct GpioPortF {
    data: u8,
    dir: u8,
    pur: u8,
    den: u8,
    cr: u8,
    locked: bool,
    #[serde(skip)]
    drive: [Option<Level>; 8],
}

impl GpioPortF {
    pub fn new() -> Self {
        Self {
            data: 0,
            dir: 0,
            pur: 0,
            den: 0,
            cr: CR_RESET,
            locked: true,
            drive: [None; 8],
        }
    }

    /// Drive the selected pins from outside the chip (a button, a probe).
    pub fn set_pin_level(&mut self, pins: Pins, level: Level) {
        for (i, slot) in self.drive.iter_mut().enumerate() {
            if pins.bits() & (1 << i) != 0 {
                *slot = Some(level);
            }
        }
    }

    /// Stop driving the selected pins; the pull-up (if enabled) takes over.
    pub fn release_pins(&mut self, pins: Pins) {
        for (i, slot) in self.drive.iter_mut().enumerate() {
            if pins.bits() & (1 << i) != 0 {
                *slot = None;
            }
        }
    }

    pub fn led_lit(&self) -> bool {
        self.data & Pins::LED_RED.bits() as u8 != 0
    }

    pub fn dir(&self) -> u8 {
        self.dir
    }

    pub fn pur(&self) -> u8 {
        self.pur
    }

    pub fn den(&self) -> u8 {
        self.den
    }

    pub fn cr(&self) -> u8 {
        self.cr
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// The byte the DATA window shows: latch bits for outputs, resolved pin
    /// levels for inputs.
    fn read_pins(&self) -> u8 {
        let mut value = 0u8;
        for pin in 0..8 {
            let bit = 1u8 << pin;
            let level = if self.dir & bit != 0 {
                self.data & bit != 0
            } else {
                match self.drive[pin] {
                    Some(Level::High) => true,
                    Some(Level::Low) => false,
                    None => self.pur & bit != 0,
                }
            };
            if level {
                value |= bit;
            }
        }
        value
    }

    /// Writes to the protected-pin config registers only land on committed
    /// bits; the rest keep their old value.
    fn commit_masked(&self, old: u8, new: u8) -> u8 {
        (old & !self.cr) | (new & self.cr)
    }
}

impl Default for GpioPortF {
    fn default() -> Self {
        Self::new()
    }
}

impl Peripheral for GpioPortF {
    fn read(&mut self, offset: u32) -> SimResult<u32> {
        let value = match offset {
            // Address bits 9:2 of the DATA aperture select the visible pins.
            o if o <= DATA_WINDOW_END => {
                let mask = (o >> 2) as u8;
                (self.read_pins() & mask) as u32
            }
            DIR_OFFSET => self.dir as u32,
            PUR_OFFSET => self.pur as u32,
            DEN_OFFSET => self.den as u32,
            LOCK_OFFSET => self.locked as u32,
            CR_OFFSET => self.cr as u32,
            _ => 0,
        };
        Ok(value)
    }

    fn write(&mut self, offset: u32, value: u32) -> SimResult<()> {
        let byte = value as u8;
        match offset {
            o if o <= DATA_WINDOW_END => {
                let mask = (o >> 2) as u8;
                self.data = (self.data & !mask) | (byte & mask);
            }
            DIR_OFFSET => self.dir = self.commit_masked(self.dir, byte),
            PUR_OFFSET => self.pur = self.commit_masked(self.pur, byte),
            DEN_OFFSET => self.den = self.commit_masked(self.den, byte),
            LOCK_OFFSET => {
                // Writing the key unlocks; anything else relocks.
                self.locked = value != GPIO_LOCK_KEY;
            }
            CR_OFFSET => {
                if self.locked {
                    tracing::debug!(value = byte, "CR write dropped while locked");
                } else {
                    self.cr = byte;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn snapshot(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
