// ledfsm - TM4C123 switch/LED state machine demo and board simulator
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Hardware-facing half of the demo: the TM4C123GH6PM registers the program
//! touches, the one-shot clock and pin bring-up sequences, and the
//! table-driven two-state machine that drives the red LED from the two
//! LaunchPad switches.
//!
//! Everything here is generic over [`bus::RegisterBus`], so the same code
//! runs against volatile MMIO on the board and against the simulated board
//! in `ledfsm-sim`.

#![cfg_attr(not(test), no_std)]

pub mod bus;
pub mod clock;
pub mod fsm;
pub mod portf;
pub mod regs;

pub use bus::RegisterBus;
