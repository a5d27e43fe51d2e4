//! API constants

/// API base path prefix
pub const API_PREFIX: &str = "/api";

/// Multipart field carrying the single-upload file
pub const FILE_FIELD: &str = "file";

/// Multipart field carrying batch files (`file` is accepted too)
pub const BATCH_FILES_FIELD: &str = "files";

/// Multipart field carrying a caller-chosen identifier
pub const CUSTOM_ID_FIELD: &str = "customId";

/// Multipart field carrying the CAPTCHA response token
pub const CAPTCHA_TOKEN_FIELD: &str = "captchaToken";

/// Header alternative to the CAPTCHA form field
pub const CAPTCHA_TOKEN_HEADER: &str = "x-captcha-token";

/// How often expired rate limit buckets are swept
pub const RATE_LIMIT_CLEANUP_INTERVAL_SECS: u64 = 300;

/// In-flight request ceiling for the whole router
pub const HTTP_CONCURRENCY_LIMIT: usize = 1024;
