// ledfsm - TM4C123 switch/LED state machine demo and board simulator
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Port F bring-up and the LED output routines.
//!
//! PF0 (SW2) and PF4 (SW1) become pull-up inputs, PF1 (red LED) becomes an
//! output. PF0 doubles as NMI on this part, so its configuration bits sit
//! behind the commit lock and must be explicitly unlocked and committed
//! before the direction/pull-up/digital-enable writes can take effect.

use crate::bus::RegisterBus;
use crate::regs::{
    Pins, GPIO_LOCK_KEY, GPIO_PORTF_CR, GPIO_PORTF_DATA, GPIO_PORTF_DEN, GPIO_PORTF_DIR,
    GPIO_PORTF_LOCK, GPIO_PORTF_PUR, SYSCTL_RCGC2, SYSCTL_RCGC2_GPIOF,
};

/// Configure the three Port F pins. Call once, after the clock is up.
pub fn portf_init<B: RegisterBus>(bus: &mut B) {
    // Clock gate for Port F, then a dummy read to let the gate settle
    // before the first port access.
    bus.write(SYSCTL_RCGC2, SYSCTL_RCGC2_GPIOF);
    let _ = bus.read(SYSCTL_RCGC2);

    // Unlock the commit register and commit PF0.
    bus.write(GPIO_PORTF_LOCK, GPIO_LOCK_KEY);
    let cr = bus.read(GPIO_PORTF_CR);
    bus.write(GPIO_PORTF_CR, cr | Pins::SW2.bits());

    // Switches in, LED out.
    let dir = bus.read(GPIO_PORTF_DIR);
    bus.write(GPIO_PORTF_DIR, dir & !(Pins::SW2 | Pins::SW1).bits());
    let dir = bus.read(GPIO_PORTF_DIR);
    bus.write(GPIO_PORTF_DIR, dir | Pins::LED_RED.bits());

    // Digital function on all three pins.
    let den = bus.read(GPIO_PORTF_DEN);
    bus.write(GPIO_PORTF_DEN, den | (Pins::SW2 | Pins::LED_RED | Pins::SW1).bits());

    // The switches short to ground when pressed; bias them high.
    let pur = bus.read(GPIO_PORTF_PUR);
    bus.write(GPIO_PORTF_PUR, pur | (Pins::SW2 | Pins::SW1).bits());
}

/// Drive the red LED high.
///
/// A whole-window write, exactly like the original firmware: PF1 is the only
/// output pin on the port, so clobbering the rest of the latch is harmless.
pub fn led_on<B: RegisterBus>(bus: &mut B) {
    bus.write(GPIO_PORTF_DATA, Pins::LED_RED.bits());
}

/// Drive the red LED low.
pub fn led_off<B: RegisterBus>(bus: &mut B) {
    let data = bus.read(GPIO_PORTF_DATA);
    bus.write(GPIO_PORTF_DATA, data & !Pins::LED_RED.bits());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testbus::FlatBus;

    #[test]
    fn init_configures_directions_and_pulls() {
        let mut bus = FlatBus::default();
        portf_init(&mut bus);

        assert_eq!(bus.get(SYSCTL_RCGC2), SYSCTL_RCGC2_GPIOF);
        assert_eq!(bus.get(GPIO_PORTF_LOCK), GPIO_LOCK_KEY);
        assert_eq!(bus.get(GPIO_PORTF_CR), Pins::SW2.bits());
        assert_eq!(bus.get(GPIO_PORTF_DIR), Pins::LED_RED.bits());
        assert_eq!(
            bus.get(GPIO_PORTF_DEN),
            (Pins::SW2 | Pins::LED_RED | Pins::SW1).bits()
        );
        assert_eq!(bus.get(GPIO_PORTF_PUR), (Pins::SW2 | Pins::SW1).bits());
    }

    #[test]
    fn led_routines_touch_only_the_data_window() {
        let mut bus = FlatBus::default();

        led_on(&mut bus);
        assert_eq!(bus.get(GPIO_PORTF_DATA), Pins::LED_RED.bits());

        // Off preserves the other bits of the latch.
        bus.set(GPIO_PORTF_DATA, Pins::LED_RED.bits() | Pins::SW1.bits());
        led_off(&mut bus);
        assert_eq!(bus.get(GPIO_PORTF_DATA), Pins::SW1.bits());
    }
}
