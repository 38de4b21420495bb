//! UI/backend events and error modeling for the desktop controller.

use roster_core::ValidationToken;

pub enum UiEvent {
    Info(String),
    LocationsLoaded(Vec<String>),
    LocationsFailed {
        detail: String,
    },
    NameChecked {
        token: ValidationToken,
        available: bool,
    },
    NameCheckFailed {
        token: ValidationToken,
        detail: String,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Configuration,
}

impl UiErrorContext {
    pub fn label(self) -> &'static str {
        match self {
            Self::BackendStartup => "Startup",
            Self::Configuration => "Configuration",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn new(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            context,
            message: message.into(),
        }
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
