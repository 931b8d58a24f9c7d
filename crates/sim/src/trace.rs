// ledfsm - TM4C123 switch/LED state machine demo and board simulator
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Register-access trace model. The idempotence and sequencing tests work on
//! these events rather than on physical hardware.

/// One bus transaction seen by the simulated board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BusEvent {
    Read { addr: u32, value: u32 },
    Write { addr: u32, value: u32 },
}

/// Append-only log of every access the board has seen.
#[derive(Debug, Default, serde::Serialize)]
pub struct TraceLog {
    events: Vec<BusEvent>,
}

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: BusEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BusEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// All writes, in order.
    pub fn writes(&self) -> Vec<(u32, u32)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                BusEvent::Write { addr, value } => Some((*addr, *value)),
                BusEvent::Read { .. } => None,
            })
            .collect()
    }

    /// Values written to one register, in order.
    pub fn writes_to(&self, addr: u32) -> Vec<u32> {
        self.writes()
            .into_iter()
            .filter(|(a, _)| *a == addr)
            .map(|(_, v)| v)
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.events).unwrap_or(serde_json::Value::Null)
    }
}
