// ledfsm - TM4C123 switch/LED state machine demo and board simulator
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! The one-shot bring-up sequences, checked against the simulated board via
//! the register-access trace.

use ledfsm_device::clock::{try_clock_init_80mhz, PllLockTimeout};
use ledfsm_device::fsm::sample_input;
use ledfsm_device::portf::portf_init;
use ledfsm_device::regs::{
    Pins, Rcc2, GPIO_PORTF_DEN, GPIO_PORTF_DIR, GPIO_PORTF_PUR, SYSCTL_RCC2, SYSCTL_RIS,
};
use ledfsm_device::RegisterBus;
use ledfsm_sim::peripherals::SysCtl;
use ledfsm_sim::trace::BusEvent;
use ledfsm_sim::Board;

#[test]
fn pll_bringup_locks_and_removes_the_bypass() {
    let mut board = Board::with_sysctl(SysCtl::with_lock_delay(5));

    try_clock_init_80mhz(&mut board, 16).unwrap();

    assert!(board.sysctl.pll_locked());
    let rcc2 = board.sysctl.rcc2();
    assert_eq!(rcc2 & Rcc2::BYPASS2.bits(), 0);
    assert_eq!(rcc2 & Rcc2::PWRDN2.bits(), 0);
    assert_ne!(rcc2 & Rcc2::USERCC2.bits(), 0);
    assert_ne!(rcc2 & Rcc2::DIV400.bits(), 0);

    // The bypass removal is the very last write of the sequence.
    let (addr, value) = *board.trace.writes().last().unwrap();
    assert_eq!(addr, SYSCTL_RCC2);
    assert_eq!(value & Rcc2::BYPASS2.bits(), 0);

    // The lock wait actually polled: at least the configured delay's worth
    // of RIS reads.
    let ris_reads = board
        .trace
        .events()
        .iter()
        .filter(|e| matches!(e, BusEvent::Read { addr, .. } if *addr == SYSCTL_RIS))
        .count();
    assert!(ris_reads >= 5, "only {ris_reads} RIS polls");
}

#[test]
fn pll_timeout_on_a_broken_oscillator() {
    let mut board = Board::with_sysctl(SysCtl::never_locks());

    let err = try_clock_init_80mhz(&mut board, 32).unwrap_err();
    assert_eq!(err, PllLockTimeout);

    // The sequence stopped before the bypass removal.
    assert_ne!(board.sysctl.rcc2() & Rcc2::BYPASS2.bits(), 0);
}

#[test]
fn clock_init_is_idempotent() {
    let mut board = Board::new();

    try_clock_init_80mhz(&mut board, 64).unwrap();
    let first = (board.sysctl.rcc(), board.sysctl.rcc2(), board.sysctl.rcgc2());

    board.trace.clear();
    try_clock_init_80mhz(&mut board, 64).unwrap();
    let second = (board.sysctl.rcc(), board.sysctl.rcc2(), board.sysctl.rcgc2());

    assert_eq!(first, second);
}

#[test]
fn portf_init_is_idempotent() {
    let mut board = Board::new();

    portf_init(&mut board);
    let first = (
        board.portf.dir(),
        board.portf.pur(),
        board.portf.den(),
        board.portf.cr(),
        board.portf.is_locked(),
    );
    let first_written: Vec<u32> = board.trace.writes().iter().map(|(a, _)| *a).collect();

    board.trace.clear();
    portf_init(&mut board);
    let second = (
        board.portf.dir(),
        board.portf.pur(),
        board.portf.den(),
        board.portf.cr(),
        board.portf.is_locked(),
    );
    let second_written: Vec<u32> = board.trace.writes().iter().map(|(a, _)| *a).collect();

    assert_eq!(first, second);
    // Same registers, same order; the values may differ because the second
    // run read-modifies already-configured registers.
    assert_eq!(first_written, second_written);
}

#[test]
fn pf0_config_needs_the_unlock_sequence() {
    let mut board = Board::new();

    // The init sequence minus the LOCK/CR steps.
    let dir = board.read(GPIO_PORTF_DIR);
    board.write(GPIO_PORTF_DIR, dir & !(Pins::SW2 | Pins::SW1).bits());
    let den = board.read(GPIO_PORTF_DEN);
    board.write(
        GPIO_PORTF_DEN,
        den | (Pins::SW2 | Pins::LED_RED | Pins::SW1).bits(),
    );
    let pur = board.read(GPIO_PORTF_PUR);
    board.write(GPIO_PORTF_PUR, pur | (Pins::SW2 | Pins::SW1).bits());

    // PF4 took the configuration, PF0 silently did not.
    assert_eq!(board.portf.den() as u32 & Pins::SW1.bits(), Pins::SW1.bits());
    assert_eq!(board.portf.pur() as u32 & Pins::SW1.bits(), Pins::SW1.bits());
    assert_eq!(board.portf.den() as u32 & Pins::SW2.bits(), 0);
    assert_eq!(board.portf.pur() as u32 & Pins::SW2.bits(), 0);

    // The full sequence gets PF0 through.
    portf_init(&mut board);
    assert_eq!(board.portf.pur() as u32 & Pins::SW2.bits(), Pins::SW2.bits());
}

#[test]
fn pullups_and_buttons_form_the_documented_inputs() {
    let mut board = Board::new();
    try_clock_init_80mhz(&mut board, 64).unwrap();
    portf_init(&mut board);

    // Released switches float high through the pull-ups.
    assert_eq!(sample_input(&mut board), 3);

    // SW1 grounds PF4, which is input bit 1.
    board.press_sw1();
    assert_eq!(sample_input(&mut board), 1);

    // SW2 grounds PF0, which is input bit 0.
    board.release_sw1();
    board.press_sw2();
    assert_eq!(sample_input(&mut board), 2);

    board.press_sw1();
    assert_eq!(sample_input(&mut board), 0);

    board.release_sw1();
    board.release_sw2();
    assert_eq!(sample_input(&mut board), 3);

    assert_eq!(board.violations(), 0);
}
