/// Broad category of a failure, used by callers that need to react to a
/// specific error path (tests, batch ingest) rather than just print it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad flags, unreadable inputs, failed writes.
    Usage,
    /// The model artifact is missing or does not match the encoder's schema.
    Artifact,
    /// A categorical label is not in the fixed lookup table.
    UnrecognizedCategory,
    /// Input rows that cannot be turned into a profile.
    InvalidInput,
    /// The predictor rejected the feature matrix or produced no usable value.
    Predictor,
}

impl ErrorKind {
    fn default_exit_code(self) -> u8 {
        match self {
            ErrorKind::Usage | ErrorKind::Artifact => 2,
            ErrorKind::UnrecognizedCategory | ErrorKind::InvalidInput => 3,
            ErrorKind::Predictor => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            exit_code: kind.default_exit_code(),
            message: message.into(),
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Usage, message)
    }

    pub fn artifact(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Artifact, message)
    }

    pub fn predictor(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Predictor, message)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    /// A label outside the fixed category table for `field`.
    pub fn unrecognized_category(field: &str, label: &str) -> Self {
        Self::new(
            ErrorKind::UnrecognizedCategory,
            format!("Unrecognized {field} category '{label}'."),
        )
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
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
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
