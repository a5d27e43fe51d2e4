pub mod batch_upload;
pub mod files;
pub mod health;
pub mod info;
pub mod upload;

use axum::http::HeaderMap;

use crate::constants::CAPTCHA_TOKEN_HEADER;

/// CAPTCHA token from the form, falling back to the `X-Captcha-Token` header.
pub(crate) fn captcha_token<'a>(
    form_token: Option<&'a str>,
    headers: &'a HeaderMap,
) -> Option<&'a str> {
    form_token.or_else(|| {
        headers
            .get(CAPTCHA_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
    })
}
