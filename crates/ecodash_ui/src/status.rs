//! Status message display.

use crate::reactive::{HandlerResult, Model, Session};

/// Read-only alert element showing the session's status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    object: String,
}

impl Alert {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            object: text.into(),
        }
    }

    /// Displayed text.
    pub fn object(&self) -> &str {
        &self.object
    }

    pub fn set_object(&mut self, text: impl Into<String>) {
        self.object = text.into();
    }
}

/// Copy the status message into the alert, verbatim.
pub(crate) fn mirror_status<M: Model>(session: &mut Session<M>) -> HandlerResult {
    let text = session.status().to_string();
    session.alert_mut().set_object(text);
    Ok(())
}
