use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ActionParseError;
use crate::state::VitalityState;

/// One caller-issued mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "amount", rename_all = "snake_case")]
pub enum Action {
    Damage(i32),
    Heal(i32),
    Kill,
    Revive,
}

impl Action {
    pub fn apply(self, state: &mut VitalityState) {
        match self {
            Action::Damage(amount) => state.damage(amount),
            Action::Heal(amount) => state.heal(amount),
            Action::Kill => state.kill(),
            Action::Revive => state.revive(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Damage(amount) => write!(f, "damage:{amount}"),
            Action::Heal(amount) => write!(f, "heal:{amount}"),
            Action::Kill => f.write_str("kill"),
            Action::Revive => f.write_str("revive"),
        }
    }
}

impl FromStr for Action {
    type Err = ActionParseError;

    /// Accepts `damage:N`, `heal:N`, `kill` and `revive`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ActionParseError::Empty);
        }
        let (name, amount) = match s.split_once(':') {
            Some((name, amount)) => (name.trim().to_ascii_lowercase(), Some(amount.trim())),
            None => (s.to_ascii_lowercase(), None),
        };

        let parse_amount = |amount: Option<&str>| -> Result<i32, ActionParseError> {
            let raw = amount.ok_or_else(|| ActionParseError::MissingAmount(name.clone()))?;
            raw.parse().map_err(|_| ActionParseError::InvalidAmount {
                action: name.clone(),
                amount: raw.to_owned(),
            })
        };

        match name.as_str() {
            "damage" => Ok(Action::Damage(parse_amount(amount)?)),
            "heal" => Ok(Action::Heal(parse_amount(amount)?)),
            "kill" | "revive" if amount.is_some() => Err(ActionParseError::UnexpectedAmount {
                action: name.clone(),
            }),
            "kill" => Ok(Action::Kill),
            "revive" => Ok(Action::Revive),
            _ => Err(ActionParseError::UnknownAction(name.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_actions() {
        assert_eq!(Action::Damage(20), "damage:20".parse().unwrap());
        assert_eq!(Action::Heal(-5), " Heal : -5 ".parse().unwrap());
        assert_eq!(Action::Kill, "KILL".parse().unwrap());
        assert_eq!(Action::Revive, "revive".parse().unwrap());
    }

    #[test]
    fn rejects_malformed_actions() {
        assert_eq!(Err(ActionParseError::Empty), "  ".parse::<Action>());
        assert_eq!(
            Err(ActionParseError::MissingAmount("damage".into())),
            "damage".parse::<Action>()
        );
        assert_eq!(
            Err(ActionParseError::InvalidAmount {
                action: "heal".into(),
                amount: "lots".into()
            }),
            "heal:lots".parse::<Action>()
        );
        assert_eq!(
            Err(ActionParseError::UnexpectedAmount {
                action: "kill".into()
            }),
            "kill:3".parse::<Action>()
        );
        assert_eq!(
            Err(ActionParseError::UnknownAction("poison".into())),
            "poison:3".parse::<Action>()
        );
    }

    #[test]
    fn display_round_trips() {
        for action in [Action::Damage(3), Action::Heal(15), Action::Kill, Action::Revive] {
            assert_eq!(action, action.to_string().parse().unwrap());
        }
    }

    #[test]
    fn apply_routes_to_state() {
        let mut hp = VitalityState::new(100, 100).unwrap();
        Action::Damage(40).apply(&mut hp);
        Action::Heal(15).apply(&mut hp);
        assert_eq!(75, hp.value());
        Action::Kill.apply(&mut hp);
        assert!(!hp.is_alive());
        Action::Revive.apply(&mut hp);
        assert_eq!(50, hp.value());
    }
}
