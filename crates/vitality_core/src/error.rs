use thiserror::Error;

/// Construction-time failures for [`crate::VitalityState`] and its config.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VitalityError {
    #[error("max value must be positive, got {0}")]
    NonPositiveMax(i32),
    #[error("presenter.{step} must be positive, got {value}")]
    NonPositiveStep { step: &'static str, value: i32 },
}

/// Failures when parsing an [`crate::Action`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionParseError {
    #[error("empty action")]
    Empty,
    #[error("unknown action `{0}`")]
    UnknownAction(String),
    #[error("action `{0}` requires an amount, e.g. `{0}:10`")]
    MissingAmount(String),
    #[error("action `{action}` does not take an amount")]
    UnexpectedAmount { action: String },
    #[error("invalid amount `{amount}` for `{action}`")]
    InvalidAmount { action: String, amount: String },
}
