use crate::models::{ListKind, SettingsGroup};
use crate::validation::ValidationErrors;
use thiserror::Error;

/// Errors surfaced by the settings controller.
///
/// Everything except [`SyncError::Storage`] is recoverable by the admin
/// correcting input. Storage failures are propagated to the host instead of
/// being swallowed. Best-effort side effects (live kick-bans, IRC connects)
/// never produce a `SyncError`; they are logged and the local commit stands.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Please correct the following:\n{0}")]
    Validation(ValidationErrors),

    #[error("{key} is already in the {list}.")]
    DuplicateEntry { list: ListKind, key: String },

    #[error("The {0} is empty.")]
    EmptyCollection(ListKind),

    #[error("{key} is not in the {list}.")]
    NotFound { list: ListKind, key: String },

    #[error("Settings for {0} are still being applied; try again shortly.")]
    ActivationPending(SettingsGroup),

    #[error("Set the owner and account names in the core options before monitoring a server.")]
    OwnerNotConfigured,

    #[error("Configuration storage failure: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl SyncError {
    /// Title for the dialog shown when this error reaches the admin.
    pub fn dialog_title(&self) -> &'static str {
        match self {
            SyncError::Validation(_) => "Invalid Settings",
            SyncError::DuplicateEntry { .. } => "Already Exists",
            SyncError::EmptyCollection(_) => "Nothing To Remove",
            SyncError::NotFound { .. } => "Not Found",
            SyncError::ActivationPending(_) => "Please Wait",
            SyncError::OwnerNotConfigured => "Core Options Incomplete",
            SyncError::Storage(_) => "Configuration Error",
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, SyncError::Storage(_))
    }
}

impl From<ValidationErrors> for SyncError {
    fn from(errors: ValidationErrors) -> Self {
        SyncError::Validation(errors)
    }
}

pub type SyncResult<T> = std::result::Result<T, SyncError>;
