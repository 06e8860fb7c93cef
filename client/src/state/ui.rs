//! Local UI chrome state: the message overlay and theme.
//!
//! DESIGN
//! ======
//! Every failure and every success notice funnels into one transient message
//! shown in a dismissible overlay. A newer message replaces the older one.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    pub dark_mode: bool,
    pub message: Option<String>,
}

impl UiState {
    pub fn show_message(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.message = (!message.trim().is_empty()).then_some(message);
    }

    pub fn dismiss(&mut self) {
        self.message = None;
    }
}
