// ledfsm - TM4C123 switch/LED state machine demo and board simulator
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Scenario execution over the simulated board: bring-up, the scripted
//! switch sequence, and assertion evaluation.

use anyhow::{Context, Result};
use ledfsm_config::{
    LedLevel, Scenario, ScenarioAssertion, ScenarioStep, StateName, SwitchPosition,
};
use ledfsm_device::clock::try_clock_init_80mhz;
use ledfsm_device::fsm::{Engine, STATE_A};
use ledfsm_device::portf::portf_init;
use ledfsm_sim::Board;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const RESULT_SCHEMA_VERSION: &str = "1.0";

/// Lock polls allowed during bring-up when the scenario does not say.
/// The simulated PLL locks within a handful of polls, so this is generous.
pub const DEFAULT_LOCK_POLLS: u32 = 64;

#[derive(Debug, Serialize, Deserialize)]
pub struct RunReport {
    pub result_schema_version: String,
    pub passed: bool,
    pub steps_executed: u64,
    pub led: LedLevel,
    pub final_state: StateName,
    pub violations: u32,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub failures: Vec<String>,
}

fn apply_positions(board: &mut Board, step: &ScenarioStep) {
    match step.sw1 {
        SwitchPosition::Pressed => board.press_sw1(),
        SwitchPosition::Released => board.release_sw1(),
    }
    match step.sw2 {
        SwitchPosition::Pressed => board.press_sw2(),
        SwitchPosition::Released => board.release_sw2(),
    }
}

/// The failure line a nonzero violation count contributes to a report.
fn violation_failure(violations: u32) -> Option<String> {
    if violations > 0 {
        Some(format!("{} unmapped bus accesses", violations))
    } else {
        None
    }
}

fn led_level(board: &Board) -> LedLevel {
    if board.led_lit() {
        LedLevel::On
    } else {
        LedLevel::Off
    }
}

fn state_name(engine: &Engine) -> StateName {
    if engine.state() == STATE_A {
        StateName::A
    } else {
        StateName::B
    }
}

/// Run a scenario from reset: clock bring-up, port init, then the scripted
/// switch sequence. Returns the report together with the board so callers
/// can dump the trace or a snapshot.
pub fn run_scenario(scenario: &Scenario) -> Result<(RunReport, Board)> {
    let mut board = Board::new();

    let max_polls = scenario.limits.max_lock_polls.unwrap_or(DEFAULT_LOCK_POLLS);
    try_clock_init_80mhz(&mut board, max_polls)
        .context("PLL failed to lock during clock bring-up")?;
    portf_init(&mut board);
    debug!("bring-up complete, PLL locked");

    let mut engine = Engine::new();
    let mut steps_executed: u64 = 0;

    for (index, step) in scenario.steps.iter().enumerate() {
        apply_positions(&mut board, step);
        for _ in 0..step.repeat {
            engine.step(&mut board);
            steps_executed += 1;
        }
        debug!(
            step = index,
            state = ?state_name(&engine),
            led = ?led_level(&board),
            "scenario step done"
        );
    }

    let led = led_level(&board);
    let final_state = state_name(&engine);
    let violations = board.violations();

    let mut failures = Vec::new();
    for assertion in &scenario.assertions {
        match assertion {
            ScenarioAssertion::Led(a) => {
                if led != a.led {
                    failures.push(format!("expected led {:?}, observed {:?}", a.led, led));
                }
            }
            ScenarioAssertion::FinalState(a) => {
                if final_state != a.final_state {
                    failures.push(format!(
                        "expected final state {:?}, observed {:?}",
                        a.final_state, final_state
                    ));
                }
            }
        }
    }
    failures.extend(violation_failure(violations));

    let report = RunReport {
        result_schema_version: RESULT_SCHEMA_VERSION.to_string(),
        passed: failures.is_empty(),
        steps_executed,
        led,
        final_state,
        violations,
        failures,
    };
    Ok((report, board))
}

/// Free-running mode: hold the switches in one position for a number of
/// engine iterations and log every LED transition.
pub fn free_run(
    steps: u64,
    sw1: SwitchPosition,
    sw2: SwitchPosition,
) -> Result<(RunReport, Board)> {
    let mut board = Board::new();
    try_clock_init_80mhz(&mut board, DEFAULT_LOCK_POLLS)
        .context("PLL failed to lock during clock bring-up")?;
    portf_init(&mut board);

    let step = ScenarioStep { sw1, sw2, repeat: 1 };
    apply_positions(&mut board, &step);

    let mut engine = Engine::new();
    let mut led_was_lit = board.led_lit();
    for iteration in 0..steps {
        engine.step(&mut board);
        let lit = board.led_lit();
        if lit != led_was_lit {
            info!(
                iteration,
                led = if lit { "on" } else { "off" },
                "LED transition"
            );
            led_was_lit = lit;
        }
    }

    let violations = board.violations();
    let failures: Vec<String> = violation_failure(violations).into_iter().collect();
    let report = RunReport {
        result_schema_version: RESULT_SCHEMA_VERSION.to_string(),
        passed: failures.is_empty(),
        steps_executed: steps,
        led: led_level(&board),
        final_state: state_name(&engine),
        violations,
        failures,
    };
    Ok((report, board))
}
