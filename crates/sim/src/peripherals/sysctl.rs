// ledfsm - TM4C123 switch/LED state machine demo and board simulator
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! SYSCTL model: the clock-configuration registers and the PLL lock flag.

use crate::{Peripheral, SimResult};
use ledfsm_device::regs::{
    Rcc2, SYSCTL_BASE, SYSCTL_RCC, SYSCTL_RCC2, SYSCTL_RCGC2, SYSCTL_RIS, SYSCTL_RIS_PLLLRIS,
};

const RIS_OFFSET: u32 = SYSCTL_RIS - SYSCTL_BASE;
const RCC_OFFSET: u32 = SYSCTL_RCC - SYSCTL_BASE;
const RCC2_OFFSET: u32 = SYSCTL_RCC2 - SYSCTL_BASE;
const RCGC2_OFFSET: u32 = SYSCTL_RCGC2 - SYSCTL_BASE;

/// Hardware reset value of RCC (PLL powered down, 1 MHz IOSC-derived clock).
const RCC_RESET: u32 = 0x078E_3AD1;
/// Hardware reset value of RCC2.
const RCC2_RESET: u32 = 0x0780_2810;

/// Reads of RIS a powered-up PLL takes to report lock, unless overridden.
const DEFAULT_LOCK_DELAY: u32 = 3;

/// System control block with a read-count PLL lock model: once the PLL is
/// powered up, the lock flag appears after a configurable number of RIS
/// polls. Powering the PLL back down clears lock and re-arms the delay.
#[derive(Debug, serde::Serialize)]
pub struct SysCtl {
    rcc: u32,
    rcc2: u32,
    rcgc2: u32,
    locked: bool,
    #[serde(skip)]
    lock_delay: u32,
    #[serde(skip)]
    polls_until_lock: u32,
    #[serde(skip)]
    never_locks: bool,
}

impl SysCtl {
    pub fn new() -> Self {
        Self::with_lock_delay(DEFAULT_LOCK_DELAY)
    }

    /// PLL reports lock after `delay` RIS reads following power-up.
    pub fn with_lock_delay(delay: u32) -> Self {
        Self {
            rcc: RCC_RESET,
            rcc2: RCC2_RESET,
            rcgc2: 0,
            locked: false,
            lock_delay: delay,
            polls_until_lock: delay,
            never_locks: false,
        }
    }

    /// A broken oscillator: the PLL never reports lock. Exercises the capped
    /// lock wait.
    pub fn never_locks() -> Self {
        let mut s = Self::new();
        s.never_locks = true;
        s
    }

    pub fn rcc(&self) -> u32 {
        self.rcc
    }

    pub fn rcc2(&self) -> u32 {
        self.rcc2
    }

    pub fn rcgc2(&self) -> u32 {
        self.rcgc2
    }

    pub fn pll_locked(&self) -> bool {
        self.locked
    }

    fn pll_powered(&self) -> bool {
        self.rcc2 & Rcc2::PWRDN2.bits() == 0
    }

    fn read_ris(&mut self) -> u32 {
        if !self.pll_powered() || self.never_locks {
            return 0;
        }
        if !self.locked {
            if self.polls_until_lock > 0 {
                self.polls_until_lock -= 1;
                return 0;
            }
            self.locked = true;
            tracing::debug!("PLL reports lock");
        }
        SYSCTL_RIS_PLLLRIS
    }
}

impl Default for SysCtl {
    fn default() -> Self {
        Self::new()
    }
}

impl Peripheral for SysCtl {
    fn read(&mut self, offset: u32) -> SimResult<u32> {
        let value = match offset {
            RIS_OFFSET => self.read_ris(),
            RCC_OFFSET => self.rcc,
            RCC2_OFFSET => self.rcc2,
            RCGC2_OFFSET => self.rcgc2,
            _ => 0,
        };
        Ok(value)
    }

    fn write(&mut self, offset: u32, value: u32) -> SimResult<()> {
        match offset {
            // RIS is read-only.
            RIS_OFFSET => {}
            RCC_OFFSET => self.rcc = value,
            RCC2_OFFSET => {
                let was_powered = self.pll_powered();
                self.rcc2 = value;
                if !self.pll_powered() {
                    self.locked = false;
                    self.polls_until_lock = self.lock_delay;
                } else if !was_powered {
                    tracing::debug!(delay = self.lock_delay, "PLL powered up");
                }
            }
            RCGC2_OFFSET => self.rcgc2 = value,
            _ => {}
        }
        Ok(())
    }

    fn snapshot(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_values() {
        let mut sysctl = SysCtl::new();
        assert_eq!(sysctl.read(RCC_OFFSET).unwrap(), RCC_RESET);
        assert_eq!(sysctl.read(RCC2_OFFSET).unwrap(), RCC2_RESET);
        // PLL starts powered down: no lock, ever.
        for _ in 0..16 {
            assert_eq!(sysctl.read(RIS_OFFSET).unwrap(), 0);
        }
    }

    #[test]
    fn lock_appears_after_power_up_and_delay() {
        let mut sysctl = SysCtl::with_lock_delay(2);

        let rcc2 = sysctl.rcc2() & !Rcc2::PWRDN2.bits();
        sysctl.write(RCC2_OFFSET, rcc2).unwrap();

        assert_eq!(sysctl.read(RIS_OFFSET).unwrap(), 0);
        assert_eq!(sysctl.read(RIS_OFFSET).unwrap(), 0);
        assert_eq!(sysctl.read(RIS_OFFSET).unwrap(), SYSCTL_RIS_PLLLRIS);
        // Lock is sticky while the PLL stays powered.
        assert_eq!(sysctl.read(RIS_OFFSET).unwrap(), SYSCTL_RIS_PLLLRIS);
    }

    #[test]
    fn power_down_clears_lock_and_rearms_the_delay() {
        let mut sysctl = SysCtl::with_lock_delay(1);

        let powered = sysctl.rcc2() & !Rcc2::PWRDN2.bits();
        sysctl.write(RCC2_OFFSET, powered).unwrap();
        let _ = sysctl.read(RIS_OFFSET).unwrap();
        assert_eq!(sysctl.read(RIS_OFFSET).unwrap(), SYSCTL_RIS_PLLLRIS);

        sysctl
            .write(RCC2_OFFSET, powered | Rcc2::PWRDN2.bits())
            .unwrap();
        assert!(!sysctl.pll_locked());

        sysctl.write(RCC2_OFFSET, powered).unwrap();
        assert_eq!(sysctl.read(RIS_OFFSET).unwrap(), 0);
        assert_eq!(sysctl.read(RIS_OFFSET).unwrap(), SYSCTL_RIS_PLLLRIS);
    }

    #[test]
    fn never_locks_never_reports() {
        let mut sysctl = SysCtl::never_locks();
        let rcc2 = sysctl.rcc2() & !Rcc2::PWRDN2.bits();
        sysctl.write(RCC2_OFFSET, rcc2).unwrap();
        for _ in 0..100 {
            assert_eq!(sysctl.read(RIS_OFFSET).unwrap(), 0);
        }
    }

    #[test]
    fn ris_writes_are_dropped() {
        let mut sysctl = SysCtl::new();
        sysctl.write(RIS_OFFSET, 0xFFFF_FFFF).unwrap();
        assert_eq!(sysctl.read(RIS_OFFSET).unwrap(), 0);
    }
}
