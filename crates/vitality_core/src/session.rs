//! Drives a [`VitalityState`] with a presenter and recorder attached,
//! capturing one [`StepRecord`] per input.

use tracing::debug;

use crate::action::Action;
use crate::config::VitalityConfig;
use crate::error::VitalityError;
use crate::event::TraceRecorder;
use crate::presenter::{Button, Presenter, PressOutcome};
use crate::report::{SessionReport, StepInput, StepRecord};
use crate::state::VitalityState;

#[derive(Debug)]
pub struct Session {
    config: VitalityConfig,
    state: VitalityState,
    presenter: Presenter,
    recorder: TraceRecorder,
    steps: Vec<StepRecord>,
}

impl Session {
    pub fn new(config: VitalityConfig) -> Result<Self, VitalityError> {
        config.validate()?;
        let mut state = VitalityState::from_config(&config)?;
        let presenter = Presenter::attach(&mut state, config.presenter.clone());
        let recorder = TraceRecorder::attach(&mut state);
        Ok(Self {
            config,
            state,
            presenter,
            recorder,
            steps: Vec::new(),
        })
    }

    pub fn state(&self) -> &VitalityState {
        &self.state
    }

    pub fn presenter(&self) -> &Presenter {
        &self.presenter
    }

    /// Calls straight into the core, bypassing the presenter's guards.
    pub fn apply(&mut self, action: Action) -> &StepRecord {
        action.apply(&mut self.state);
        self.record(StepInput::Action { action }, None)
    }

    pub fn press(&mut self, button: Button) -> &StepRecord {
        let outcome = self.presenter.press(button, &mut self.state);
        self.record(StepInput::Button { button }, Some(outcome))
    }

    pub fn finish(mut self, id: impl Into<String>) -> SessionReport {
        self.presenter.detach(&mut self.state);
        self.recorder.detach(&mut self.state);
        SessionReport::new(id, self.config, self.state.value(), self.steps)
    }

    fn record(&mut self, input: StepInput, outcome: Option<PressOutcome>) -> &StepRecord {
        let record = StepRecord {
            input,
            outcome,
            value: self.state.value(),
            alive: self.state.is_alive(),
            readout: self.presenter.text(),
            notifications: self.recorder.take(),
        };
        debug!(
            target: "vitality.session",
            step = self.steps.len(),
            value = record.value,
            notifications = record.notifications.len(),
            "step recorded"
        );
        self.steps.push(record);
        &self.steps[self.steps.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Notification;
    use crate::presenter::IgnoreReason;

    #[test]
    fn steps_capture_notifications_per_input() {
        let mut session = Session::new(VitalityConfig::default()).unwrap();
        session.apply(Action::Damage(100));
        let step = session.apply(Action::Heal(10));
        assert!(step.notifications.is_empty());
        assert_eq!("HP: 0 / 100", step.readout);

        let report = session.finish("s1");
        assert_eq!(
            vec![Notification::ValueChanged { value: 0 }, Notification::Death],
            report.steps[0].notifications
        );
        assert_eq!(1, report.summary.deaths);
        assert!(!report.summary.alive);
    }

    #[test]
    fn button_steps_keep_outcome() {
        let mut session = Session::new(VitalityConfig::default()).unwrap();
        let step = session.press(Button::Heal);
        assert_eq!(
            Some(PressOutcome::Ignored {
                reason: IgnoreReason::AtMax
            }),
            step.outcome
        );
        let step = session.press(Button::Damage);
        assert_eq!(80, step.value);
        assert_eq!("HP: 80 / 100", step.readout);
    }

    #[test]
    fn rejects_invalid_config() {
        let mut config = VitalityConfig::default();
        config.vitality.max_value = -1;
        assert!(Session::new(config).is_err());
    }

    #[test]
    fn rejects_non_positive_button_steps() {
        let mut config = VitalityConfig::default();
        config.presenter.damage_step = 0;
        assert_eq!(
            VitalityError::NonPositiveStep {
                step: "damage_step",
                value: 0
            },
            Session::new(config).unwrap_err()
        );

        let mut config = VitalityConfig::default();
        config.presenter.heal_step = -4;
        assert!(matches!(
            Session::new(config),
            Err(VitalityError::NonPositiveStep {
                step: "heal_step",
                ..
            })
        ));
    }

    #[test]
    fn finished_report_uses_live_value() {
        let mut config = VitalityConfig::default();
        config.vitality.starting_value = Some(250);
        let session = Session::new(config).unwrap();
        let report = session.finish("untouched");
        assert_eq!(100, report.summary.final_value);
        assert!(report.summary.alive);
        assert!(report.steps.is_empty());
    }
}
