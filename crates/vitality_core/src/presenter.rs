//! Headless presenter: keeps a readout and button enablement in sync with a
//! [`VitalityState`] through its notifications, and offers the button
//! handlers a UI would wire up.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::PresenterConfig;
use crate::observer::SubscriptionId;
use crate::state::VitalityState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    Damage,
    Heal,
    Kill,
    Revive,
}

impl Button {
    pub const ALL: [Button; 4] = [Button::Damage, Button::Heal, Button::Kill, Button::Revive];

    pub fn label(&self) -> &'static str {
        match self {
            Button::Damage => "damage",
            Button::Heal => "heal",
            Button::Kill => "kill",
            Button::Revive => "revive",
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Button {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Button::ALL
            .into_iter()
            .find(|button| button.label() == wanted)
            .ok_or_else(|| format!("unknown button `{s}` (expected damage, heal, kill or revive)"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ButtonStates {
    pub damage: bool,
    pub heal: bool,
    pub kill: bool,
    pub revive: bool,
}

impl ButtonStates {
    fn derive(value: i32, max: i32) -> Self {
        let alive = value > 0;
        Self {
            damage: alive,
            heal: alive && value < max,
            kill: alive,
            revive: !alive && value == 0,
        }
    }

    pub fn is_enabled(&self, button: Button) -> bool {
        match button {
            Button::Damage => self.damage,
            Button::Heal => self.heal,
            Button::Kill => self.kill,
            Button::Revive => self.revive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderModel {
    pub value: i32,
    pub max: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Readout {
    pub text: String,
    pub slider: SliderModel,
    pub buttons: ButtonStates,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// Healing the dead must go through revive.
    Dead,
    AtMax,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PressOutcome {
    Applied { before: i32, after: i32 },
    NoChange,
    Ignored { reason: IgnoreReason },
}

#[derive(Debug)]
struct View {
    max: i32,
    last_value: Option<i32>,
    readout: Readout,
}

impl View {
    fn new(max: i32) -> Self {
        Self {
            max,
            last_value: None,
            readout: Readout {
                text: String::new(),
                slider: SliderModel { value: 0, max },
                buttons: ButtonStates::default(),
            },
        }
    }

    fn value_changed(&mut self, value: i32) {
        if self.last_value == Some(value) {
            return;
        }
        self.refresh_all(value);
    }

    fn refresh_all(&mut self, value: i32) {
        self.last_value = Some(value);
        self.readout.text = format!("HP: {value} / {}", self.max);
        self.readout.slider = SliderModel {
            value,
            max: self.max,
        };
        self.refresh_buttons();
    }

    fn refresh_buttons(&mut self) {
        let value = self.last_value.unwrap_or(0);
        self.readout.buttons = ButtonStates::derive(value, self.max);
        debug!(
            target: "vitality.presenter",
            value,
            max = self.max,
            alive = value > 0,
            heal_enabled = self.readout.buttons.heal,
            "buttons refreshed"
        );
    }
}

/// Readout and button handlers bound to one [`VitalityState`].
#[derive(Debug)]
pub struct Presenter {
    view: Rc<RefCell<View>>,
    handles: Option<[SubscriptionId; 3]>,
    steps: PresenterConfig,
}

impl Presenter {
    /// Subscribes to `state` and renders its current value.
    pub fn attach(state: &mut VitalityState, steps: PresenterConfig) -> Self {
        let view = Rc::new(RefCell::new(View::new(state.max_value())));

        let sink = Rc::clone(&view);
        let changed = state.on_value_changed(move |value| sink.borrow_mut().value_changed(*value));
        let sink = Rc::clone(&view);
        let death = state.on_death(move || sink.borrow_mut().refresh_buttons());
        let sink = Rc::clone(&view);
        let revive = state.on_revive(move || sink.borrow_mut().refresh_buttons());

        view.borrow_mut().refresh_all(state.value());

        Self {
            view,
            handles: Some([changed, death, revive]),
            steps,
        }
    }

    pub fn readout(&self) -> Readout {
        self.view.borrow().readout.clone()
    }

    pub fn text(&self) -> String {
        self.view.borrow().readout.text.clone()
    }

    pub fn buttons(&self) -> ButtonStates {
        self.view.borrow().readout.buttons
    }

    pub fn is_attached(&self) -> bool {
        self.handles.is_some()
    }

    /// Unsubscribes from `state`; the readout freezes at its last value.
    pub fn detach(&mut self, state: &mut VitalityState) {
        if let Some([changed, death, revive]) = self.handles.take() {
            state.remove_value_changed(changed);
            state.remove_death(death);
            state.remove_revive(revive);
        }
    }

    /// Button click handler. Heal is checked here so a dead actor is never
    /// healed back to life; the other buttons rely on the core's own guards.
    pub fn press(&self, button: Button, state: &mut VitalityState) -> PressOutcome {
        let before = state.value();
        match button {
            Button::Damage => state.damage(self.steps.damage_step),
            Button::Heal => {
                if !state.is_alive() {
                    info!(target: "vitality.presenter", "heal ignored: actor is dead, use revive");
                    return PressOutcome::Ignored {
                        reason: IgnoreReason::Dead,
                    };
                }
                if before >= state.max_value() {
                    info!(target: "vitality.presenter", value = before, "heal ignored: already at max");
                    return PressOutcome::Ignored {
                        reason: IgnoreReason::AtMax,
                    };
                }
                debug!(target: "vitality.presenter", value = before, amount = self.steps.heal_step, "healing");
                state.heal(self.steps.heal_step);
            }
            Button::Kill => state.kill(),
            Button::Revive => state.revive(),
        }

        let after = state.value();
        if after == before {
            PressOutcome::NoChange
        } else {
            PressOutcome::Applied { before, after }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(max: i32, start: i32) -> (VitalityState, Presenter) {
        let mut hp = VitalityState::new(max, start).unwrap();
        let presenter = Presenter::attach(&mut hp, PresenterConfig::default());
        (hp, presenter)
    }

    #[test]
    fn initial_readout_reflects_state() {
        let (_hp, presenter) = setup(100, 100);
        let readout = presenter.readout();
        assert_eq!("HP: 100 / 100", readout.text);
        assert_eq!(SliderModel { value: 100, max: 100 }, readout.slider);
        assert_eq!(
            ButtonStates {
                damage: true,
                heal: false,
                kill: true,
                revive: false
            },
            readout.buttons
        );
    }

    #[test]
    fn readout_follows_damage() {
        let (mut hp, presenter) = setup(100, 100);
        assert_eq!(
            PressOutcome::Applied {
                before: 100,
                after: 80
            },
            presenter.press(Button::Damage, &mut hp)
        );
        assert_eq!("HP: 80 / 100", presenter.text());
        assert!(presenter.buttons().heal);
    }

    #[test]
    fn death_swaps_buttons() {
        let (mut hp, presenter) = setup(100, 15);
        presenter.press(Button::Damage, &mut hp);
        let buttons = presenter.buttons();
        assert_eq!("HP: 0 / 100", presenter.text());
        assert!(!buttons.damage && !buttons.heal && !buttons.kill);
        assert!(buttons.revive);
    }

    #[test]
    fn heal_button_never_revives() {
        let (mut hp, presenter) = setup(100, 100);
        presenter.press(Button::Kill, &mut hp);
        assert_eq!(
            PressOutcome::Ignored {
                reason: IgnoreReason::Dead
            },
            presenter.press(Button::Heal, &mut hp)
        );
        assert_eq!(0, hp.value());
    }

    #[test]
    fn heal_button_ignored_at_max() {
        let (mut hp, presenter) = setup(100, 100);
        assert_eq!(
            PressOutcome::Ignored {
                reason: IgnoreReason::AtMax
            },
            presenter.press(Button::Heal, &mut hp)
        );
    }

    #[test]
    fn heal_button_uses_configured_step() {
        let mut hp = VitalityState::new(100, 50).unwrap();
        let presenter = Presenter::attach(
            &mut hp,
            PresenterConfig {
                damage_step: 20,
                heal_step: 7,
            },
        );
        presenter.press(Button::Heal, &mut hp);
        assert_eq!(57, hp.value());
        assert_eq!("HP: 57 / 100", presenter.text());
    }

    #[test]
    fn revive_button_restores_controls() {
        let (mut hp, presenter) = setup(100, 100);
        presenter.press(Button::Kill, &mut hp);
        assert_eq!(
            PressOutcome::Applied {
                before: 0,
                after: 50
            },
            presenter.press(Button::Revive, &mut hp)
        );
        let buttons = presenter.buttons();
        assert!(buttons.damage && buttons.heal && buttons.kill);
        assert!(!buttons.revive);
    }

    #[test]
    fn disabled_buttons_report_no_change() {
        let (mut hp, presenter) = setup(100, 100);
        assert!(!presenter.buttons().is_enabled(Button::Revive));
        assert_eq!(PressOutcome::NoChange, presenter.press(Button::Revive, &mut hp));
    }

    #[test]
    fn detached_presenter_stops_updating() {
        let (mut hp, mut presenter) = setup(100, 100);
        presenter.detach(&mut hp);
        presenter.detach(&mut hp);
        hp.damage(30);
        assert!(!presenter.is_attached());
        assert_eq!("HP: 100 / 100", presenter.text());
    }

    #[test]
    fn parses_button_names() {
        assert_eq!(Ok(Button::Revive), "Revive".parse());
        assert!("jump".parse::<Button>().is_err());
    }
}
