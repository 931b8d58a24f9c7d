// ledfsm - TM4C123 switch/LED state machine demo and board simulator
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

pub mod gpio;
pub mod sysctl;

pub use gpio::{GpioPortF, Level};
pub use sysctl::SysCtl;
