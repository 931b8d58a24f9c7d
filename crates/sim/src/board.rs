// ledfsm - TM4C123 switch/LED state machine demo and board simulator
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! The simulated LaunchPad: address decode over the two peripheral models,
//! an access trace, and button/LED helpers for tests and the runner.

use crate::peripherals::{GpioPortF, Level, SysCtl};
use crate::trace::{BusEvent, TraceLog};
use crate::{Peripheral, SimResult, SimulationError};
use ledfsm_device::regs::{Pins, GPIO_PORTF_BASE, SYSCTL_BASE};
use ledfsm_device::RegisterBus;

/// Each peripheral decodes a 4 KB aperture.
const APERTURE: u32 = 0x1000;

#[derive(Debug)]
pub struct Board {
    pub sysctl: SysCtl,
    pub portf: GpioPortF,
    pub trace: TraceLog,
    violations: u32,
}

impl Board {
    pub fn new() -> Self {
        Self::with_sysctl(SysCtl::new())
    }

    /// Build a board around a specific SYSCTL model (delayed lock, broken
    /// PLL, ...).
    pub fn with_sysctl(sysctl: SysCtl) -> Self {
        Self {
            sysctl,
            portf: GpioPortF::new(),
            trace: TraceLog::new(),
            violations: 0,
        }
    }

    /// Accesses that fell outside every peripheral aperture.
    pub fn violations(&self) -> u32 {
        self.violations
    }

    // The switches short their pin to ground: pressed reads low, released
    // floats and the pull-up reads high.

    pub fn press_sw1(&mut self) {
        self.portf.set_pin_level(Pins::SW1, Level::Low);
    }

    pub fn release_sw1(&mut self) {
        self.portf.release_pins(Pins::SW1);
    }

    pub fn press_sw2(&mut self) {
        self.portf.set_pin_level(Pins::SW2, Level::Low);
    }

    pub fn release_sw2(&mut self) {
        self.portf.release_pins(Pins::SW2);
    }

    pub fn led_lit(&self) -> bool {
        self.portf.led_lit()
    }

    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "sysctl": self.sysctl.snapshot(),
            "portf": self.portf.snapshot(),
        })
    }

    fn try_read(&mut self, addr: u32) -> SimResult<u32> {
        if (SYSCTL_BASE..SYSCTL_BASE + APERTURE).contains(&addr) {
            self.sysctl.read(addr - SYSCTL_BASE)
        } else if (GPIO_PORTF_BASE..GPIO_PORTF_BASE + APERTURE).contains(&addr) {
            self.portf.read(addr - GPIO_PORTF_BASE)
        } else {
            Err(SimulationError::AccessViolation(addr))
        }
    }

    fn try_write(&mut self, addr: u32, value: u32) -> SimResult<()> {
        if (SYSCTL_BASE..SYSCTL_BASE + APERTURE).contains(&addr) {
            self.sysctl.write(addr - SYSCTL_BASE, value)
        } else if (GPIO_PORTF_BASE..GPIO_PORTF_BASE + APERTURE).contains(&addr) {
            self.portf.write(addr - GPIO_PORTF_BASE, value)
        } else {
            Err(SimulationError::AccessViolation(addr))
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// The firmware-facing bus is infallible, so violations are logged and
/// counted instead of faulting; unmapped reads return 0. A scenario run
/// with a nonzero violation count fails.
impl RegisterBus for Board {
    fn read(&mut self, addr: u32) -> u32 {
        let value = match self.try_read(addr) {
            Ok(v) => v,
            Err(SimulationError::AccessViolation(_)) => {
                self.violations += 1;
                tracing::warn!(addr = format_args!("{addr:#010x}"), "unmapped read");
                0
            }
        };
        self.trace.record(BusEvent::Read { addr, value });
        value
    }

    fn write(&mut self, addr: u32, value: u32) {
        self.trace.record(BusEvent::Write { addr, value });
        if self.try_write(addr, value).is_err() {
            self.violations += 1;
            tracing::warn!(
                addr = format_args!("{addr:#010x}"),
                value,
                "unmapped write"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledfsm_device::regs::{GPIO_PORTF_DATA, SYSCTL_RCGC2};

    #[test]
    fn decodes_both_apertures() {
        let mut board = Board::new();
        board.write(SYSCTL_RCGC2, 0x20);
        assert_eq!(board.read(SYSCTL_RCGC2), 0x20);
        // Port F DATA reads 0 on a freshly reset port.
        assert_eq!(board.read(GPIO_PORTF_DATA), 0);
        assert_eq!(board.violations(), 0);
    }

    #[test]
    fn unmapped_access_counts_violations_and_reads_zero() {
        let mut board = Board::new();
        assert_eq!(board.read(0x2000_0000), 0);
        board.write(0x2000_0000, 0xDEAD_BEEF);
        assert_eq!(board.violations(), 2);
        // The trace still records the attempts.
        assert_eq!(board.trace.len(), 2);
    }

    #[test]
    fn every_access_is_traced() {
        let mut board = Board::new();
        board.write(SYSCTL_RCGC2, 1);
        let _ = board.read(SYSCTL_RCGC2);
        assert_eq!(
            board.trace.events(),
            &[
                BusEvent::Write { addr: SYSCTL_RCGC2, value: 1 },
                BusEvent::Read { addr: SYSCTL_RCGC2, value: 1 },
            ]
        );
    }
}
