// ledfsm - TM4C123 switch/LED state machine demo and board simulator
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! TM4C123GH6PM register addresses and bit fields used by this demo.
//!
//! Only the registers the program actually touches are listed; this is not a
//! general peripheral access layer.

/// System control block.
pub const SYSCTL_BASE: u32 = 0x400F_E000;
/// Raw interrupt status.
pub const SYSCTL_RIS: u32 = SYSCTL_BASE + 0x050;
/// Run-mode clock configuration.
pub const SYSCTL_RCC: u32 = SYSCTL_BASE + 0x060;
/// Run-mode clock configuration 2 (extended fields, overrides RCC).
pub const SYSCTL_RCC2: u32 = SYSCTL_BASE + 0x070;
/// Run-mode clock gating control 2 (legacy GPIO clock enables).
pub const SYSCTL_RCGC2: u32 = SYSCTL_BASE + 0x108;

/// GPIO Port F, APB aperture.
pub const GPIO_PORTF_BASE: u32 = 0x4002_5000;
/// DATA window that exposes all eight pins (address bits 9:2 select the
/// pins affected by an access).
pub const GPIO_PORTF_DATA: u32 = GPIO_PORTF_BASE + 0x3FC;
/// Direction (1 = output).
pub const GPIO_PORTF_DIR: u32 = GPIO_PORTF_BASE + 0x400;
/// Pull-up select.
pub const GPIO_PORTF_PUR: u32 = GPIO_PORTF_BASE + 0x510;
/// Digital enable.
pub const GPIO_PORTF_DEN: u32 = GPIO_PORTF_BASE + 0x51C;
/// Commit lock. Reads 1 while locked, 0 after the key is written.
pub const GPIO_PORTF_LOCK: u32 = GPIO_PORTF_BASE + 0x520;
/// Commit register; gates writes to the protected-pin config bits.
pub const GPIO_PORTF_CR: u32 = GPIO_PORTF_BASE + 0x524;

/// Key that unlocks the GPIO commit register ("LOCK" in ASCII).
pub const GPIO_LOCK_KEY: u32 = 0x4C4F_434B;

/// PLL raw lock status in [`SYSCTL_RIS`].
pub const SYSCTL_RIS_PLLLRIS: u32 = 1 << 6;
/// Port F clock gate in [`SYSCTL_RCGC2`].
pub const SYSCTL_RCGC2_GPIOF: u32 = 1 << 5;

/// Crystal value field in [`SYSCTL_RCC`] (bits 10:6).
pub const SYSCTL_RCC_XTAL_M: u32 = 0x0000_07C0;
/// 16 MHz crystal.
pub const SYSCTL_RCC_XTAL_16MHZ: u32 = 0x0000_0540;

/// System clock divisor field in [`SYSCTL_RCC2`] (bits 28:22, 7-bit form).
pub const SYSCTL_RCC2_SYSDIV2_M: u32 = 0x1FC0_0000;
/// Divisor value 4: 400 MHz PLL / (4 + 1) = 80 MHz.
pub const SYSCTL_RCC2_SYSDIV2_80MHZ: u32 = 0x4 << 22;

bitflags::bitflags! {
    /// Single-bit fields of [`SYSCTL_RCC2`] used by the PLL bring-up.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Rcc2: u32 {
        /// RCC2 fields override their RCC counterparts.
        const USERCC2 = 1 << 31;
        /// Divide the 400 MHz PLL output instead of 200 MHz.
        const DIV400 = 1 << 30;
        /// PLL power-down.
        const PWRDN2 = 1 << 13;
        /// Run the system clock past the PLL instead of from it.
        const BYPASS2 = 1 << 11;
        /// Oscillator source field (bits 6:4); all-zero selects the main
        /// oscillator.
        const OSCSRC2_M = 0x7 << 4;
    }
}

bitflags::bitflags! {
    /// Port F pins wired up on the LaunchPad.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Pins: u32 {
        /// PF0, switch 2. Shares the pin with NMI, hence the commit lock.
        const SW2 = 1 << 0;
        /// PF1, the red LED.
        const LED_RED = 1 << 1;
        /// PF4, switch 1.
        const SW1 = 1 << 4;
    }
}
