use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::config::VitalityConfig;
use crate::event::Notification;
use crate::presenter::{Button, PressOutcome};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub id: String,
    pub timestamp: String,
    pub config: VitalityConfig,
    pub steps: Vec<StepRecord>,
    pub summary: SessionSummary,
}

impl SessionReport {
    /// `final_value` is read from the state when the session ends, so an
    /// empty session reports the clamped starting value.
    pub fn new(
        id: impl Into<String>,
        config: VitalityConfig,
        final_value: i32,
        steps: Vec<StepRecord>,
    ) -> Self {
        let summary = summarize_steps(final_value, &steps);
        Self {
            id: id.into(),
            timestamp: Utc::now().to_rfc3339(),
            config,
            steps,
            summary,
        }
    }
}

fn summarize_steps(final_value: i32, steps: &[StepRecord]) -> SessionSummary {
    let notifications = steps.iter().flat_map(|s| s.notifications.iter());
    let (mut changes, mut deaths, mut revives) = (0, 0, 0);
    for notification in notifications {
        match notification {
            Notification::ValueChanged { .. } => changes += 1,
            Notification::Death => deaths += 1,
            Notification::Revive => revives += 1,
        }
    }

    SessionSummary {
        final_value,
        alive: final_value > 0,
        changes,
        deaths,
        revives,
    }
}

/// What a step fed into the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "via", rename_all = "snake_case")]
pub enum StepInput {
    Action { action: Action },
    Button { button: Button },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub input: StepInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<PressOutcome>,
    pub value: i32,
    pub alive: bool,
    pub readout: String,
    pub notifications: Vec<Notification>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub final_value: i32,
    pub alive: bool,
    pub changes: usize,
    pub deaths: usize,
    pub revives: usize,
}
