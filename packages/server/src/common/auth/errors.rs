use thiserror::Error;

/// Authentication failures surfaced by the HTTP gates
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Admin login required")]
    MissingCredential,

    #[error("Session is invalid or has expired, please log in again")]
    InvalidCredential,

    #[error("Admin secret required")]
    MissingAdminSecret,

    #[error("Admin secret is invalid")]
    InvalidAdminSecret,
}
