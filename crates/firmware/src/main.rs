// ledfsm - TM4C123 switch/LED state machine demo and board simulator
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use panic_halt as _;

use ledfsm_device::clock::clock_init_80mhz;
use ledfsm_device::fsm::Engine;
use ledfsm_device::portf::portf_init;
use ledfsm_device::RegisterBus;

/// Direct memory-mapped register access on the real chip.
struct Mmio;

impl RegisterBus for Mmio {
    fn read(&mut self, addr: u32) -> u32 {
        // Safety: addr is one of the TM4C123 register addresses the device
        // crate publishes, all of which are valid volatile word accesses.
        unsafe { core::ptr::read_volatile(addr as *const u32) }
    }

    fn write(&mut self, addr: u32, value: u32) {
        // Safety: see read.
        unsafe { core::ptr::write_volatile(addr as *mut u32, value) }
    }
}

#[entry]
fn main() -> ! {
    let mut bus = Mmio;

    clock_init_80mhz(&mut bus);
    portf_init(&mut bus);

    Engine::new().run(&mut bus)
}
