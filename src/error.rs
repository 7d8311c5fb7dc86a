use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("'{0}' has no Animator component on itself or any child object")]
    MissingAnimator(String),
}
