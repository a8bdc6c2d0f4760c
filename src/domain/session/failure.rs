use thiserror::Error;

/// Why a session operation was refused.
///
/// The variant is kept for logs; callers facing clients collapse every
/// client-attributable kind into one unauthorized outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("no authorization header")]
    MissingAuth,

    #[error("invalid authorization header")]
    MalformedHeader,

    #[error("invalid token signature or structure")]
    BadSignature,

    #[error("token has expired")]
    Expired,

    #[error("invalid issuer")]
    WrongIssuer,

    #[error("invalid audience")]
    WrongAudience,

    #[error("unknown subject")]
    UnknownSubject,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("token signing failed: {0}")]
    SigningFailure(String),

    #[error("identity directory failure: {0}")]
    Directory(String),
}

impl AuthFailure {
    /// Stable label for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingAuth => "missing_auth",
            Self::MalformedHeader => "malformed_header",
            Self::BadSignature => "bad_signature",
            Self::Expired => "expired",
            Self::WrongIssuer => "wrong_issuer",
            Self::WrongAudience => "wrong_audience",
            Self::UnknownSubject => "unknown_subject",
            Self::InvalidCredentials => "invalid_credentials",
            Self::SigningFailure(_) => "signing_failure",
            Self::Directory(_) => "directory",
        }
    }

    /// True when the request itself is at fault and the answer is 401
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::SigningFailure(_) | Self::Directory(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_partition() {
        let client = [
            AuthFailure::MissingAuth,
            AuthFailure::MalformedHeader,
            AuthFailure::BadSignature,
            AuthFailure::Expired,
            AuthFailure::WrongIssuer,
            AuthFailure::WrongAudience,
            AuthFailure::UnknownSubject,
            AuthFailure::InvalidCredentials,
        ];
        assert!(client.iter().all(AuthFailure::is_client_error));

        assert!(!AuthFailure::SigningFailure("bad key".into()).is_client_error());
        assert!(!AuthFailure::Directory("down".into()).is_client_error());
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(AuthFailure::Expired.kind(), "expired");
        assert_eq!(AuthFailure::BadSignature.kind(), "bad_signature");
        assert_eq!(AuthFailure::SigningFailure(String::new()).kind(), "signing_failure");
    }
}
