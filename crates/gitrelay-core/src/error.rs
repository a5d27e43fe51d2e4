//! Error types module
//!
//! All request-terminating failures are unified under [`AppError`]. Each variant
//! self-describes its HTTP status, stable machine-readable code and log level through
//! [`ErrorMetadata`], so the HTTP layer renders every failure the same way.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected, user-correctable failures
    Debug,
    /// Abuse or limit related
    Warn,
    /// External dependency or internal failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "FILE_NOT_FOUND")
    fn error_code(&self) -> &'static str;

    /// Whether re-sending the same request may succeed
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No file provided")]
    NoFile,

    #[error("Invalid file type: {0}")]
    InvalidFileType(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Batch too large: {count} files exceeds maximum of {max}")]
    BatchTooLarge { count: usize, max: usize },

    #[error("Not found: {0}")]
    NotFound(String),

    /// The content store could not answer an existence check.
    #[error("Content store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("CAPTCHA token required")]
    CaptchaRequired,

    #[error("CAPTCHA verification failed: {0}")]
    CaptchaFailed(String),

    #[error("Rate limit exceeded, retry in {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidInput(format!("Validation error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, log_level).
fn app_error_static_metadata(
    err: &AppError,
) -> (u16, &'static str, bool, Option<&'static str>, LogLevel) {
    match err {
        AppError::NoFile => (
            400,
            "NO_FILE",
            false,
            Some("Attach a file in the 'file' form field"),
            LogLevel::Debug,
        ),
        AppError::InvalidFileType(_) => (
            400,
            "INVALID_FILE_TYPE",
            false,
            Some("Check the list of allowed content types at /api/info"),
            LogLevel::Debug,
        ),
        AppError::PayloadTooLarge(_) => (
            413,
            "FILE_TOO_LARGE",
            false,
            Some("Reduce file size"),
            LogLevel::Debug,
        ),
        AppError::InvalidInput(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Check request parameters and try again"),
            LogLevel::Debug,
        ),
        AppError::BatchTooLarge { .. } => (
            400,
            "BATCH_SIZE_EXCEEDED",
            false,
            Some("Split the files over several requests"),
            LogLevel::Debug,
        ),
        AppError::NotFound(_) => (
            404,
            "FILE_NOT_FOUND",
            false,
            Some("Verify the file id or path exists"),
            LogLevel::Debug,
        ),
        AppError::StoreUnavailable(_) => (
            502,
            "STORE_UNAVAILABLE",
            true,
            Some("Retry after a short delay"),
            LogLevel::Error,
        ),
        AppError::UploadFailed(_) => (
            500,
            "UPLOAD_FAILED",
            true,
            Some("Retry the upload; resend the same customId to avoid storing a second copy"),
            LogLevel::Error,
        ),
        AppError::DeleteFailed(_) => (
            500,
            "DELETE_FAILED",
            true,
            Some("Retry after a short delay"),
            LogLevel::Error,
        ),
        AppError::CaptchaRequired => (
            400,
            "CAPTCHA_REQUIRED",
            false,
            Some("Complete the CAPTCHA and send its token"),
            LogLevel::Debug,
        ),
        AppError::CaptchaFailed(_) => (
            403,
            "CAPTCHA_FAILED",
            false,
            Some("Complete a new CAPTCHA challenge"),
            LogLevel::Warn,
        ),
        AppError::RateLimited { .. } => (
            429,
            "RATE_LIMITED",
            true,
            Some("Wait for the Retry-After interval"),
            LogLevel::Warn,
        ),
        AppError::Internal(_) | AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for logs
    pub fn error_type(&self) -> &str {
        match self {
            AppError::NoFile => "NoFile",
            AppError::InvalidFileType(_) => "InvalidFileType",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::BatchTooLarge { .. } => "BatchTooLarge",
            AppError::NotFound(_) => "NotFound",
            AppError::StoreUnavailable(_) => "StoreUnavailable",
            AppError::UploadFailed(_) => "UploadFailed",
            AppError::DeleteFailed(_) => "DeleteFailed",
            AppError::CaptchaRequired => "CaptchaRequired",
            AppError::CaptchaFailed(_) => "CaptchaFailed",
            AppError::RateLimited { .. } => "RateLimited",
            AppError::Internal(_) | AppError::InternalWithSource { .. } => "Internal",
        }
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).4
    }

    fn client_message(&self) -> String {
        match self {
            AppError::NoFile => "No file provided".to_string(),
            AppError::InvalidFileType(ref msg) => msg.clone(),
            AppError::PayloadTooLarge(ref msg) => msg.clone(),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::BatchTooLarge { count, max } => {
                format!("Batch of {} files exceeds the maximum of {}", count, max)
            }
            AppError::NotFound(ref msg) => msg.clone(),
            // Store failures pass the underlying message through.
            AppError::StoreUnavailable(ref msg) => msg.clone(),
            AppError::UploadFailed(ref msg) => msg.clone(),
            AppError::DeleteFailed(ref msg) => msg.clone(),
            AppError::CaptchaRequired => "CAPTCHA verification is required".to_string(),
            AppError::CaptchaFailed(_) => "CAPTCHA verification failed".to_string(),
            AppError::RateLimited { .. } => "Too many requests. Please slow down.".to_string(),
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "Internal server error".to_string()
            }
        }
    }
}
