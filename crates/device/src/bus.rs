// ledfsm - TM4C123 switch/LED state machine demo and board simulator
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

/// Word-granular register access.
///
/// This is the seam between the state-machine code and whatever provides the
/// registers: volatile MMIO on real hardware, the modeled board on a host.
/// The firmware only ever issues aligned 32-bit accesses, so nothing smaller
/// is exposed.
///
/// Reads take `&mut self` because simulated peripherals may change state on a
/// read (the PLL lock flag is armed by polling); the MMIO implementation
/// simply ignores that.
pub trait RegisterBus {
    fn read(&mut self, addr: u32) -> u32;
    fn write(&mut self, addr: u32, value: u32);
}
