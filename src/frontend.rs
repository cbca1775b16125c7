//! Output sinks the game core drives
//!
//! Rendering, audio, status text and alerts live outside the core. The
//! game calls into these traits and never reads anything back.

use serde::{Deserialize, Serialize};

use crate::core::types::Signal;

/// Pad highlight and sound
pub trait SignalSink {
    fn activate_signal(&mut self, signal: Signal);

    /// Called when an activation's highlight period ends
    fn deactivate_signal(&mut self, _signal: Signal) {}
}

/// Heading and status line text
pub trait StatusDisplay {
    fn set_status(&mut self, text: &str);
    fn set_heading(&mut self, text: &str);
    fn set_status_visible(&mut self, _visible: bool) {}
}

/// End-of-game notification
pub trait AlertSink {
    fn notify(&mut self, message: &str);
}

/// Whether pad presses are currently accepted
pub trait InputGate {
    fn set_input_enabled(&mut self, _enabled: bool) {}
}

/// Everything the game needs from its surroundings
pub trait Frontend: SignalSink + StatusDisplay + AlertSink + InputGate {}

impl<T: SignalSink + StatusDisplay + AlertSink + InputGate> Frontend for T {}

/// Discards every call
#[derive(Debug, Default, Clone, Copy)]
pub struct NullFrontend;

impl SignalSink for NullFrontend {
    fn activate_signal(&mut self, _signal: Signal) {}
}

impl StatusDisplay for NullFrontend {
    fn set_status(&mut self, _text: &str) {}
    fn set_heading(&mut self, _text: &str) {}
}

impl AlertSink for NullFrontend {
    fn notify(&mut self, _message: &str) {}
}

impl InputGate for NullFrontend {}

/// One recorded frontend call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrontendCall {
    Activate(Signal),
    Deactivate(Signal),
    Status(String),
    Heading(String),
    StatusVisible(bool),
    Alert(String),
    InputEnabled(bool),
}

/// Records every call in order, for tests and headless runs
#[derive(Debug, Default, Clone)]
pub struct RecordingFrontend {
    pub calls: Vec<FrontendCall>,
}

impl RecordingFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals activated so far, in order
    pub fn activations(&self) -> Vec<Signal> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                FrontendCall::Activate(signal) => Some(*signal),
                _ => None,
            })
            .collect()
    }

    pub fn alerts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                FrontendCall::Alert(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn last_status(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|call| match call {
            FrontendCall::Status(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn last_heading(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|call| match call {
            FrontendCall::Heading(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn input_enabled(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|call| match call {
                FrontendCall::InputEnabled(enabled) => Some(*enabled),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl SignalSink for RecordingFrontend {
    fn activate_signal(&mut self, signal: Signal) {
        self.calls.push(FrontendCall::Activate(signal));
    }

    fn deactivate_signal(&mut self, signal: Signal) {
        self.calls.push(FrontendCall::Deactivate(signal));
    }
}

impl StatusDisplay for RecordingFrontend {
    fn set_status(&mut self, text: &str) {
        self.calls.push(FrontendCall::Status(text.to_string()));
    }

    fn set_heading(&mut self, text: &str) {
        self.calls.push(FrontendCall::Heading(text.to_string()));
    }

    fn set_status_visible(&mut self, visible: bool) {
        self.calls.push(FrontendCall::StatusVisible(visible));
    }
}

impl AlertSink for RecordingFrontend {
    fn notify(&mut self, message: &str) {
        self.calls.push(FrontendCall::Alert(message.to_string()));
    }
}

impl InputGate for RecordingFrontend {
    fn set_input_enabled(&mut self, enabled: bool) {
        self.calls.push(FrontendCall::InputEnabled(enabled));
    }
}
