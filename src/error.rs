/// Which pipeline stage produced the error.
///
/// Each kind maps to its own process exit code so scripted callers can tell
/// a bad config apart from a dead network or an empty dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Config file unreadable, unparseable, or missing a required key.
    Config,
    /// Feed request failed, the body was malformed, or the API reported a
    /// client error in-band.
    Fetch,
    /// An HTTP call exceeded its deadline.
    Timeout,
    /// The statistic could not be computed from the dataset.
    Compute,
    /// Chart rendering or saving failed.
    Plot,
    /// The webhook notification could not be delivered.
    Notify,
}

impl ErrorKind {
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::Config => 2,
            ErrorKind::Fetch => 3,
            ErrorKind::Timeout => 4,
            ErrorKind::Compute => 5,
            ErrorKind::Plot => 6,
            ErrorKind::Notify => 7,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn fetch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Fetch, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    pub fn compute(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Compute, message)
    }

    pub fn plot(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Plot, message)
    }

    pub fn notify(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Notify, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn exit_code(&self) -> u8 {
        self.kind.exit_code()
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_per_kind() {
        let kinds = [
            ErrorKind::Config,
            ErrorKind::Fetch,
            ErrorKind::Timeout,
            ErrorKind::Compute,
            ErrorKind::Plot,
            ErrorKind::Notify,
        ];
        let mut seen = std::collections::HashSet::new();
        for kind in kinds {
            assert!(seen.insert(kind.exit_code()), "duplicate exit code for {kind:?}");
        }
    }

    #[test]
    fn display_shows_message_only() {
        let err = AppError::fetch("feed request failed");
        assert_eq!(err.to_string(), "feed request failed");
        assert_eq!(err.kind(), ErrorKind::Fetch);
        assert_eq!(err.exit_code(), 3);
    }
}
