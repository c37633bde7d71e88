//! Bounded actor vitality with observer notifications.
//!
//! [`VitalityState`] owns the value and emits value-changed, death and revive
//! notifications. [`Presenter`] and [`TraceRecorder`] are the stock
//! observers; [`Session`] wires them together for scripted runs.

pub mod action;
pub mod config;
pub mod error;
pub mod event;
pub mod observer;
pub mod presenter;
pub mod report;
pub mod session;
pub mod state;

pub use action::Action;
pub use config::{PresenterConfig, StateConfig, VitalityConfig};
pub use error::{ActionParseError, VitalityError};
pub use event::{Notification, TraceRecorder};
pub use observer::{Observers, SubscriptionId};
pub use presenter::{Button, ButtonStates, IgnoreReason, Presenter, PressOutcome, Readout};
pub use report::{SessionReport, SessionSummary, StepInput, StepRecord};
pub use session::Session;
pub use state::VitalityState;
