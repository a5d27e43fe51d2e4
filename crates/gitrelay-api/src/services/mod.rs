pub mod captcha;
pub mod catalog;
pub mod upload;
