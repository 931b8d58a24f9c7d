// ledfsm - TM4C123 switch/LED state machine demo and board simulator
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Scenario scripts: a YAML description of a switch-press sequence to feed
//! the simulated board, with limits and end-of-run assertions.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default schema version for YAML scripts.
fn default_schema_version() -> String {
    "1.0".to_string()
}

fn default_repeat() -> u64 {
    1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchPosition {
    Pressed,
    Released,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedLevel {
    On,
    Off,
}

/// The two FSM states, by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateName {
    A,
    B,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ScenarioLimits {
    /// Upper bound on engine iterations across the whole scenario.
    pub max_steps: u64,
    /// Upper bound on PLL lock polls during bring-up (runner default
    /// applies when absent).
    #[serde(default)]
    pub max_lock_polls: Option<u32>,
}

/// One stretch of the run with the switches held in fixed positions.
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
#[serde(deny_unknown_fields)]
pub struct ScenarioStep {
    pub sw1: SwitchPosition,
    pub sw2: SwitchPosition,
    /// Engine iterations to execute with these positions.
    #[serde(default = "default_repeat")]
    pub repeat: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
#[serde(deny_unknown_fields)]
pub struct LedAssertion {
    pub led: LedLevel,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
#[serde(deny_unknown_fields)]
pub struct FinalStateAssertion {
    pub final_state: StateName,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
#[serde(untagged)]
pub enum ScenarioAssertion {
    Led(LedAssertion),
    FinalState(FinalStateAssertion),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    #[serde(default)]
    pub name: Option<String>,
    pub limits: ScenarioLimits,
    pub steps: Vec<ScenarioStep>,
    #[serde(default)]
    pub assertions: Vec<ScenarioAssertion>,
}

impl Scenario {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario at {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let scenario: Self =
            serde_yaml::from_str(yaml).context("Failed to parse Scenario YAML")?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<()> {
        if self.schema_version != "1.0" {
            anyhow::bail!(
                "Unsupported schema_version '{}'. Supported versions: '1.0'",
                self.schema_version
            );
        }

        if self.limits.max_steps == 0 {
            anyhow::bail!("Limit 'max_steps' must be greater than zero");
        }

        if self.steps.is_empty() {
            anyhow::bail!("A scenario needs at least one step");
        }

        if let Some(step) = self.steps.iter().position(|s| s.repeat == 0) {
            anyhow::bail!("Step {} has 'repeat: 0'; drop the step instead", step);
        }

        if self.total_iterations() > self.limits.max_steps {
            anyhow::bail!(
                "Steps add up to {} iterations but 'max_steps' is {}",
                self.total_iterations(),
                self.limits.max_steps
            );
        }

        Ok(())
    }

    /// Engine iterations the steps add up to. Saturates so that absurd
    /// `repeat` values still trip the `max_steps` check instead of
    /// overflowing.
    pub fn total_iterations(&self) -> u64 {
        self.steps
            .iter()
            .fold(0u64, |total, s| total.saturating_add(s.repeat))
    }
}
