// ledfsm - TM4C123 switch/LED state machine demo and board simulator
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! One-shot PLL bring-up: 16 MHz crystal to an 80 MHz system clock.
//!
//! The sequence must run before any Port F access and follows the TM4C123
//! datasheet ordering: configure everything with the PLL bypassed, wait for
//! lock, then remove the bypass.

use crate::bus::RegisterBus;
use crate::regs::{
    Rcc2, SYSCTL_RCC, SYSCTL_RCC2, SYSCTL_RCC2_SYSDIV2_80MHZ, SYSCTL_RCC2_SYSDIV2_M,
    SYSCTL_RCC_XTAL_16MHZ, SYSCTL_RCC_XTAL_M, SYSCTL_RIS, SYSCTL_RIS_PLLLRIS,
};

/// The PLL never reported lock within the poll budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PllLockTimeout;

impl core::fmt::Display for PllLockTimeout {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("PLL never reported lock")
    }
}

impl core::error::Error for PllLockTimeout {}

/// Raise the system clock to 80 MHz.
///
/// Firmware entry point: blocks until the PLL locks. If the hardware never
/// locks this never returns; with no supervisor and no usable clock there is
/// nothing better to do than hang.
pub fn clock_init_80mhz<B: RegisterBus>(bus: &mut B) {
    configure_pll(bus);
    while bus.read(SYSCTL_RIS) & SYSCTL_RIS_PLLLRIS == 0 {}
    engage_pll(bus);
}

/// Same sequence with a bounded lock wait.
///
/// Host-side entry point: the simulator and the scenario runner use this so
/// a misconfigured board model cannot hang the process.
pub fn try_clock_init_80mhz<B: RegisterBus>(
    bus: &mut B,
    max_polls: u32,
) -> Result<(), PllLockTimeout> {
    configure_pll(bus);
    let mut locked = false;
    for _ in 0..max_polls {
        if bus.read(SYSCTL_RIS) & SYSCTL_RIS_PLLLRIS != 0 {
            locked = true;
            break;
        }
    }
    if !locked {
        return Err(PllLockTimeout);
    }
    engage_pll(bus);
    Ok(())
}

/// Everything up to (but not including) the lock wait. Each step is a
/// separate read-modify-write, mirroring the datasheet sequence.
fn configure_pll<B: RegisterBus>(bus: &mut B) {
    // Use the extended RCC2 fields.
    let rcc2 = bus.read(SYSCTL_RCC2);
    bus.write(SYSCTL_RCC2, rcc2 | Rcc2::USERCC2.bits());

    // Bypass the PLL while it spins up.
    let rcc2 = bus.read(SYSCTL_RCC2);
    bus.write(SYSCTL_RCC2, rcc2 | Rcc2::BYPASS2.bits());

    // The LaunchPad carries a 16 MHz crystal.
    let rcc = bus.read(SYSCTL_RCC);
    bus.write(SYSCTL_RCC, (rcc & !SYSCTL_RCC_XTAL_M) + SYSCTL_RCC_XTAL_16MHZ);

    // Main oscillator as the PLL reference.
    let rcc2 = bus.read(SYSCTL_RCC2);
    bus.write(SYSCTL_RCC2, rcc2 & !Rcc2::OSCSRC2_M.bits());

    // Power the PLL up.
    let rcc2 = bus.read(SYSCTL_RCC2);
    bus.write(SYSCTL_RCC2, rcc2 & !Rcc2::PWRDN2.bits());

    // Divide the 400 MHz VCO output with the 7-bit divisor field.
    let rcc2 = bus.read(SYSCTL_RCC2);
    bus.write(SYSCTL_RCC2, rcc2 | Rcc2::DIV400.bits());

    // 400 / (4 + 1) = 80 MHz.
    let rcc2 = bus.read(SYSCTL_RCC2);
    bus.write(
        SYSCTL_RCC2,
        (rcc2 & !SYSCTL_RCC2_SYSDIV2_M) + SYSCTL_RCC2_SYSDIV2_80MHZ,
    );
}

/// Remove the bypass; the system clock is now the divided PLL output.
fn engage_pll<B: RegisterBus>(bus: &mut B) {
    let rcc2 = bus.read(SYSCTL_RCC2);
    bus.write(SYSCTL_RCC2, rcc2 & !Rcc2::BYPASS2.bits());
}
