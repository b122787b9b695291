pub type SubmitResult<T> = std::result::Result<T, SubmitError>;

#[derive(thiserror::Error, Debug)]
pub enum SubmitError {
    #[error("Photo upload failed: {0:#}")]
    UploadFailed(#[source] anyhow::Error),
    #[error("Saving the recipe failed: {0:#}")]
    MutationFailed(#[source] anyhow::Error),
    #[error("Removing old photo {url} failed: {source:#}")]
    CleanupFailed {
        url: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("Loading the recipe failed: {0:#}")]
    LoadFailed(#[source] anyhow::Error),
    #[error("A submission is already in progress")]
    AlreadySubmitting,
    #[error("The recipe is not ready to submit")]
    Incomplete,
    #[error("Only available when editing a saved recipe")]
    NotEditing,
}

impl SubmitError {
    /// Whether the user can simply try the same action again.
    pub fn is_retryable(&self) -> bool {
        match self {
            SubmitError::UploadFailed(_)
            | SubmitError::MutationFailed(_)
            | SubmitError::LoadFailed(_) => true,
            // Cleanup failures never fail a submission
            SubmitError::CleanupFailed { .. } => false,
            SubmitError::AlreadySubmitting | SubmitError::Incomplete | SubmitError::NotEditing => {
                false
            }
        }
    }
}
