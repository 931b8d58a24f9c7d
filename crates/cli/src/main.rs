// ledfsm - TM4C123 switch/LED state machine demo and board simulator
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use clap::{Parser, Subcommand, ValueEnum};
use ledfsm_config::{Scenario, SwitchPosition};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

mod runner;

use runner::RunReport;

const EXIT_PASS: u8 = 0;
const EXIT_ASSERT_FAIL: u8 = 1;
const EXIT_CONFIG_ERROR: u8 = 2;
const EXIT_RUNTIME_ERROR: u8 = 3;

#[derive(Parser, Debug)]
#[command(author, version, about = "ledfsm board simulator", long_about = None)]
struct Cli {
    /// Enable debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Deterministic, CI-friendly runner mode driven by a scenario script (YAML).
    Test(TestArgs),

    /// Free-running mode with the switches held in fixed positions.
    Run(RunArgs),
}

#[derive(Parser, Debug)]
struct TestArgs {
    /// Path to the scenario script (YAML)
    #[arg(short = 'c', long)]
    script: PathBuf,

    /// Directory to write artifacts (result.json, trace.json)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Also write the full register-access trace alongside result.json
    #[arg(long)]
    trace: bool,
}

/// Switch position on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum SwitchArg {
    Pressed,
    Released,
}

impl From<SwitchArg> for SwitchPosition {
    fn from(arg: SwitchArg) -> Self {
        match arg {
            SwitchArg::Pressed => SwitchPosition::Pressed,
            SwitchArg::Released => SwitchPosition::Released,
        }
    }
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Engine iterations to execute
    #[arg(long, default_value = "100")]
    steps: u64,

    /// SW1 (PF4) position for the whole run
    #[arg(long, value_enum, default_value_t = SwitchArg::Released)]
    sw1: SwitchArg,

    /// SW2 (PF0) position for the whole run
    #[arg(long, value_enum, default_value_t = SwitchArg::Released)]
    sw2: SwitchArg,

    /// Write a board state snapshot (JSON) at the end of the run
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .init();
    }

    match cli.command {
        Commands::Test(args) => run_test(args),
        Commands::Run(args) => run_free(args),
    }
}

fn run_test(args: TestArgs) -> ExitCode {
    let scenario = match Scenario::from_file(&args.script) {
        Ok(s) => s,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };
    if let Some(name) = &scenario.name {
        info!("Running scenario: {}", name);
    }

    let (report, board) = match runner::run_scenario(&scenario) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::from(EXIT_RUNTIME_ERROR);
        }
    };

    if let Some(dir) = &args.output_dir {
        if let Err(e) = write_artifacts(dir, &report, &board, args.trace) {
            error!("{:#}", e);
            return ExitCode::from(EXIT_RUNTIME_ERROR);
        }
    }

    if report.passed {
        info!(
            steps = report.steps_executed,
            led = ?report.led,
            state = ?report.final_state,
            "scenario passed"
        );
        ExitCode::from(EXIT_PASS)
    } else {
        for failure in &report.failures {
            error!("assertion failed: {}", failure);
        }
        ExitCode::from(EXIT_ASSERT_FAIL)
    }
}

fn run_free(args: RunArgs) -> ExitCode {
    let (report, board) = match runner::free_run(args.steps, args.sw1.into(), args.sw2.into()) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::from(EXIT_RUNTIME_ERROR);
        }
    };

    info!(
        steps = report.steps_executed,
        led = ?report.led,
        state = ?report.final_state,
        violations = report.violations,
        "run finished"
    );

    if let Some(path) = &args.snapshot {
        if let Err(e) = write_json(path, &board.snapshot()) {
            error!("{:#}", e);
            return ExitCode::from(EXIT_RUNTIME_ERROR);
        }
        info!("Snapshot written to {:?}", path);
    }

    if report.violations > 0 {
        ExitCode::from(EXIT_RUNTIME_ERROR)
    } else {
        ExitCode::from(EXIT_PASS)
    }
}

fn write_artifacts(
    dir: &Path,
    report: &RunReport,
    board: &ledfsm_sim::Board,
    with_trace: bool,
) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .map_err(|e| anyhow::anyhow!("Failed to create output dir {:?}: {}", dir, e))?;

    let result_path = dir.join("result.json");
    let file = std::fs::File::create(&result_path)
        .map_err(|e| anyhow::anyhow!("Failed to create {:?}: {}", result_path, e))?;
    serde_json::to_writer_pretty(file, report)
        .map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", result_path, e))?;
    info!("Result written to {:?}", result_path);

    if with_trace {
        let trace_path = dir.join("trace.json");
        write_json(&trace_path, &board.trace.to_json())?;
        info!("Trace written to {:?}", trace_path);
    }
    Ok(())
}

fn write_json(path: &Path, value: &serde_json::Value) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| anyhow::anyhow!("Failed to create dir {:?}: {}", parent, e))?;
        }
    }
    let file = std::fs::File::create(path)
        .map_err(|e| anyhow::anyhow!("Failed to create {:?}: {}", path, e))?;
    serde_json::to_writer_pretty(file, value)
        .map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", path, e))?;
    Ok(())
}
