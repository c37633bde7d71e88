//! Notification values and a recorder that captures them in delivery order.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::observer::SubscriptionId;
use crate::state::VitalityState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    ValueChanged { value: i32 },
    Death,
    Revive,
}

/// Subscribes to all three channels and keeps what it hears.
#[derive(Debug)]
pub struct TraceRecorder {
    log: Rc<RefCell<Vec<Notification>>>,
    handles: Option<[SubscriptionId; 3]>,
}

impl TraceRecorder {
    pub fn attach(state: &mut VitalityState) -> Self {
        let log = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&log);
        let changed = state.on_value_changed(move |value| {
            sink.borrow_mut()
                .push(Notification::ValueChanged { value: *value })
        });
        let sink = Rc::clone(&log);
        let death = state.on_death(move || sink.borrow_mut().push(Notification::Death));
        let sink = Rc::clone(&log);
        let revive = state.on_revive(move || sink.borrow_mut().push(Notification::Revive));

        Self {
            log,
            handles: Some([changed, death, revive]),
        }
    }

    /// Drains everything recorded so far.
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.log.borrow_mut())
    }

    pub fn snapshot(&self) -> Vec<Notification> {
        self.log.borrow().clone()
    }

    pub fn is_attached(&self) -> bool {
        self.handles.is_some()
    }

    /// Stops recording. Calling it again is harmless.
    pub fn detach(&mut self, state: &mut VitalityState) {
        if let Some([changed, death, revive]) = self.handles.take() {
            state.remove_value_changed(changed);
            state.remove_death(death);
            state.remove_revive(revive);
        }
    }
}
