// ledfsm - TM4C123 switch/LED state machine demo and board simulator
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Host-side model of the slice of the TM4C123 LaunchPad the demo firmware
//! touches: SYSCTL clock-configuration registers with a PLL lock model, GPIO
//! Port F with commit protection and external pin drive, and a decoding
//! board bus that records every access.
//!
//! The model executes the real `ledfsm-device` code, it does not emulate a
//! CPU: the init sequences and the polling engine run natively against these
//! registers through the [`ledfsm_device::RegisterBus`] seam.

pub mod board;
pub mod peripherals;
pub mod trace;

pub use board::Board;

#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("register access violation at {0:#010x}")]
    AccessViolation(u32),
}

pub type SimResult<T> = Result<T, SimulationError>;

/// A memory-mapped peripheral model.
///
/// Accesses are word-granular at a byte offset from the peripheral base;
/// the firmware never issues anything smaller. Reads take `&mut self`
/// because some registers have read side effects (the PLL lock countdown).
pub trait Peripheral {
    fn read(&mut self, offset: u32) -> SimResult<u32>;
    fn write(&mut self, offset: u32, value: u32) -> SimResult<()>;
    fn snapshot(&self) -> serde_json::Value;
}
