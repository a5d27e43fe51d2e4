//! Configuration module
//!
//! Configuration is read once at startup into an immutable [`Config`] and passed to every
//! component that needs it. Service variants (branding, categories, limits, commit
//! messages) are expressed as [`ServiceProfile`] presets; any preset value can be
//! overridden by its own environment variable.

use std::collections::HashMap;
use std::env;
use std::str::FromStr;

use anyhow::Context;

use crate::storage_types::StoreBackend;

// Common constants
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BRANCH: &str = "main";
const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";
const DEFAULT_CDN_BASE: &str = "https://cdn.jsdelivr.net/gh";
const DEFAULT_CAPTCHA_VERIFY_URL: &str = "https://hcaptcha.com/siteverify";
const DEFAULT_ID_MIN_LENGTH: usize = 3;
const DEFAULT_ID_MAX_LENGTH: usize = 6;
const MAX_ID_LENGTH: usize = 32;
const DEFAULT_FALLBACK_CATEGORY: &str = "files";

/// One storage category and the content types routed to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryRule {
    pub name: String,
    pub content_types: Vec<String>,
}

impl CategoryRule {
    pub fn new(name: &str, content_types: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            content_types: content_types.iter().map(|s| s.to_lowercase()).collect(),
        }
    }
}

/// How `find by id` matches stored file names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupMatch {
    /// Name must start with `{id}_`
    Exact,
    /// Name must start with `{id}`
    Prefix,
}

impl FromStr for LookupMatch {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exact" => Ok(LookupMatch::Exact),
            "prefix" => Ok(LookupMatch::Prefix),
            _ => Err(anyhow::anyhow!("Invalid lookup match mode: {}", s)),
        }
    }
}

/// Length bounds for generated identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdPolicy {
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for IdPolicy {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_ID_MIN_LENGTH,
            max_length: DEFAULT_ID_MAX_LENGTH,
        }
    }
}

/// Deployment presets that used to be separate copies of the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServiceProfile {
    /// Every category, 25 MB files, batches of 10
    Standard,
    /// Images, video and audio only, 100 MB files, batches of 5
    Media,
    /// Images and documents, 5 MB files, batches of 3
    Lite,
}

impl ServiceProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceProfile::Standard => "standard",
            ServiceProfile::Media => "media",
            ServiceProfile::Lite => "lite",
        }
    }
}

impl FromStr for ServiceProfile {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(ServiceProfile::Standard),
            "media" => Ok(ServiceProfile::Media),
            "lite" => Ok(ServiceProfile::Lite),
            _ => Err(anyhow::anyhow!("Invalid service profile: {}", s)),
        }
    }
}

fn image_types() -> CategoryRule {
    CategoryRule::new(
        "images",
        &[
            "image/jpeg",
            "image/png",
            "image/gif",
            "image/webp",
            "image/svg+xml",
            "image/bmp",
            "image/x-icon",
            "image/avif",
        ],
    )
}

fn video_types() -> CategoryRule {
    CategoryRule::new(
        "videos",
        &[
            "video/mp4",
            "video/webm",
            "video/ogg",
            "video/quicktime",
            "video/x-msvideo",
            "video/x-matroska",
        ],
    )
}

fn audio_types() -> CategoryRule {
    CategoryRule::new(
        "audio",
        &[
            "audio/mpeg",
            "audio/wav",
            "audio/ogg",
            "audio/webm",
            "audio/aac",
            "audio/flac",
            "audio/mp4",
        ],
    )
}

fn document_types() -> CategoryRule {
    CategoryRule::new(
        "documents",
        &[
            "application/pdf",
            "text/plain",
            "text/markdown",
            "text/csv",
            "application/rtf",
            "application/msword",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            "application/vnd.ms-excel",
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            "application/vnd.ms-powerpoint",
            "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        ],
    )
}

fn archive_types() -> CategoryRule {
    CategoryRule::new(
        "archives",
        &[
            "application/zip",
            "application/x-rar-compressed",
            "application/x-7z-compressed",
            "application/gzip",
            "application/x-tar",
        ],
    )
}

fn code_types() -> CategoryRule {
    CategoryRule::new(
        "code",
        &[
            "text/html",
            "text/css",
            "text/javascript",
            "application/javascript",
            "application/json",
            "application/xml",
            "text/xml",
            "text/x-python",
            "application/typescript",
        ],
    )
}

/// Values a profile fixes before env overrides are applied.
struct ProfileDefaults {
    service_name: &'static str,
    categories: Vec<CategoryRule>,
    default_category: &'static str,
    max_file_size_mb: usize,
    max_batch_files: usize,
    rate_limit_max: u32,
    rate_limit_window_secs: u64,
    commit_message_template: &'static str,
    delete_message_template: &'static str,
}

impl ServiceProfile {
    fn defaults(self) -> ProfileDefaults {
        match self {
            ServiceProfile::Standard => ProfileDefaults {
                service_name: "gitrelay",
                categories: vec![
                    image_types(),
                    video_types(),
                    audio_types(),
                    document_types(),
                    archive_types(),
                    code_types(),
                ],
                default_category: "documents",
                max_file_size_mb: 25,
                max_batch_files: 10,
                rate_limit_max: 100,
                rate_limit_window_secs: 900,
                commit_message_template: "Upload {filename}",
                delete_message_template: "Delete {filename}",
            },
            ServiceProfile::Media => ProfileDefaults {
                service_name: "gitrelay media",
                categories: vec![image_types(), video_types(), audio_types()],
                default_category: "media",
                max_file_size_mb: 100,
                max_batch_files: 5,
                rate_limit_max: 30,
                rate_limit_window_secs: 900,
                commit_message_template: "Add media {filename} ({folder})",
                delete_message_template: "Remove media {filename}",
            },
            ServiceProfile::Lite => ProfileDefaults {
                service_name: "gitrelay lite",
                categories: vec![image_types(), document_types()],
                default_category: "documents",
                max_file_size_mb: 5,
                max_batch_files: 3,
                rate_limit_max: 20,
                rate_limit_window_secs: 600,
                commit_message_template: "Upload {filename}",
                delete_message_template: "Delete {filename}",
            },
        }
    }
}

/// Server-level settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub log_format: String,
    pub rate_limit_max: u32,
    pub rate_limit_window_secs: u64,
    /// Proxies in front of the service whose X-Forwarded-For entries are trusted
    pub trusted_proxy_count: usize,
}

/// Content store location and endpoints
#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub token: Option<String>,
    pub api_base: String,
    pub cdn_base: String,
}

/// Upload routing, limits and naming rules
#[derive(Clone, Debug)]
pub struct UploadConfig {
    pub service_name: String,
    pub max_file_size_bytes: usize,
    pub max_batch_files: usize,
    /// Ordered by classification priority
    pub categories: Vec<CategoryRule>,
    /// Category for a declared type that matches no rule
    pub default_category: String,
    /// Category when no type is declared at all
    pub fallback_category: String,
    /// Accepted on top of the category lists (they land in the default category)
    pub extra_allowed_types: Vec<String>,
    pub commit_message_template: String,
    pub delete_message_template: String,
    pub id_policy: IdPolicy,
    pub lookup_match: LookupMatch,
}

impl UploadConfig {
    /// Allow-list: every category type plus the extras, lowercased and deduplicated.
    pub fn allowed_content_types(&self) -> Vec<String> {
        let mut allowed: Vec<String> = Vec::new();
        for ct in self
            .categories
            .iter()
            .flat_map(|rule| rule.content_types.iter())
            .chain(self.extra_allowed_types.iter())
        {
            if !allowed.contains(ct) {
                allowed.push(ct.clone());
            }
        }
        allowed
    }

    pub fn is_allowed(&self, content_type: &str) -> bool {
        let normalized = content_type.to_lowercase();
        self.categories
            .iter()
            .flat_map(|rule| rule.content_types.iter())
            .chain(self.extra_allowed_types.iter())
            .any(|ct| *ct == normalized)
    }

    /// Every folder an upload can land in, in classification order.
    pub fn known_folders(&self) -> Vec<String> {
        let mut folders: Vec<String> = self.categories.iter().map(|r| r.name.clone()).collect();
        for extra in [&self.default_category, &self.fallback_category] {
            if !folders.contains(extra) {
                folders.push(extra.clone());
            }
        }
        folders
    }

    pub fn commit_message(&self, filename: &str, file_id: &str, folder: &str) -> String {
        render_template(&self.commit_message_template, filename, file_id, folder)
    }

    pub fn delete_message(&self, filename: &str, file_id: &str, folder: &str) -> String {
        render_template(&self.delete_message_template, filename, file_id, folder)
    }
}

fn render_template(template: &str, filename: &str, file_id: &str, folder: &str) -> String {
    template
        .replace("{filename}", filename)
        .replace("{id}", file_id)
        .replace("{folder}", folder)
}

/// CAPTCHA gate settings
#[derive(Clone, Debug)]
pub struct CaptchaConfig {
    pub enabled: bool,
    pub secret: Option<String>,
    pub verify_url: String,
}

/// Full service configuration
#[derive(Clone, Debug)]
pub struct RelayConfig {
    pub profile: ServiceProfile,
    pub base: BaseConfig,
    pub store: StoreConfig,
    pub upload: UploadConfig,
    pub captcha: CaptchaConfig,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config(pub Box<RelayConfig>);

impl Config {
    /// Load from the process environment (seeded from `.env` when present).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Config(Box::new(RelayConfig::from_lookup(lookup)?)))
    }

    /// Load from a map, used by tests and tools.
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, anyhow::Error> {
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.0.validate()
    }

    pub fn is_production(&self) -> bool {
        is_production_name(&self.0.base.environment)
    }

    pub fn profile(&self) -> ServiceProfile {
        self.0.profile
    }

    pub fn base(&self) -> &BaseConfig {
        &self.0.base
    }

    pub fn store(&self) -> &StoreConfig {
        &self.0.store
    }

    pub fn upload(&self) -> &UploadConfig {
        &self.0.upload
    }

    pub fn captcha(&self) -> &CaptchaConfig {
        &self.0.captcha
    }

    pub fn server_port(&self) -> u16 {
        self.0.base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.0.base.environment
    }

    pub fn service_name(&self) -> &str {
        &self.0.upload.service_name
    }

    /// Largest request body the router accepts: a full batch of maximum-size files.
    pub fn max_request_body_bytes(&self) -> usize {
        const MULTIPART_OVERHEAD: usize = 64 * 1024;
        self.0
            .upload
            .max_file_size_bytes
            .saturating_mul(self.0.upload.max_batch_files.max(1))
            .saturating_add(MULTIPART_OVERHEAD)
    }
}

fn is_production_name(environment: &str) -> bool {
    let env = environment.to_lowercase();
    env == "production" || env == "prod"
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, anyhow::Error>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{} has an invalid value '{}': {}", key, raw, e)),
        _ => Ok(default),
    }
}

fn parse_bool(value: Option<String>) -> bool {
    value
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

impl RelayConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let profile = parse_or(&lookup, "RELAY_PROFILE", ServiceProfile::Standard)?;
        let defaults = profile.defaults();

        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins_str = lookup("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        if is_production_name(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base = BaseConfig {
            server_port: parse_or(&lookup, "PORT", DEFAULT_PORT)
                .context("PORT must be a valid number")?,
            cors_origins,
            environment,
            log_format: lookup("LOG_FORMAT").unwrap_or_else(|| "compact".to_string()),
            rate_limit_max: parse_or(&lookup, "RATE_LIMIT_MAX", defaults.rate_limit_max)?,
            rate_limit_window_secs: parse_or(
                &lookup,
                "RATE_LIMIT_WINDOW_SECS",
                defaults.rate_limit_window_secs,
            )?,
            trusted_proxy_count: parse_or(&lookup, "TRUSTED_PROXY_COUNT", 1)?,
        };

        let store = StoreConfig {
            backend: parse_or(&lookup, "STORE_BACKEND", StoreBackend::GitHub)?,
            owner: lookup("GITHUB_OWNER").unwrap_or_default(),
            repo: lookup("GITHUB_REPO").unwrap_or_default(),
            branch: lookup("GITHUB_BRANCH").unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
            token: lookup("GITHUB_TOKEN").filter(|t| !t.trim().is_empty()),
            api_base: lookup("GITHUB_API_BASE")
                .unwrap_or_else(|| DEFAULT_GITHUB_API_BASE.to_string()),
            cdn_base: lookup("CDN_BASE_URL").unwrap_or_else(|| DEFAULT_CDN_BASE.to_string()),
        };

        // Per-category overrides: ALLOWED_TYPES_IMAGES, ALLOWED_TYPES_CODE, ...
        let categories = defaults
            .categories
            .into_iter()
            .map(|rule| {
                let key = format!("ALLOWED_TYPES_{}", rule.name.to_uppercase());
                match lookup(&key) {
                    Some(list) => CategoryRule {
                        content_types: split_list(&list),
                        name: rule.name,
                    },
                    None => rule,
                }
            })
            .collect();

        let max_file_size_mb: usize =
            parse_or(&lookup, "MAX_FILE_SIZE_MB", defaults.max_file_size_mb)?;

        let upload = UploadConfig {
            service_name: lookup("SERVICE_NAME")
                .unwrap_or_else(|| defaults.service_name.to_string()),
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            max_batch_files: parse_or(&lookup, "MAX_BATCH_FILES", defaults.max_batch_files)?,
            categories,
            default_category: lookup("DEFAULT_CATEGORY")
                .unwrap_or_else(|| defaults.default_category.to_string()),
            fallback_category: lookup("FALLBACK_CATEGORY")
                .unwrap_or_else(|| DEFAULT_FALLBACK_CATEGORY.to_string()),
            extra_allowed_types: lookup("EXTRA_ALLOWED_TYPES")
                .map(|v| split_list(&v))
                .unwrap_or_default(),
            commit_message_template: lookup("COMMIT_MESSAGE_TEMPLATE")
                .unwrap_or_else(|| defaults.commit_message_template.to_string()),
            delete_message_template: lookup("DELETE_MESSAGE_TEMPLATE")
                .unwrap_or_else(|| defaults.delete_message_template.to_string()),
            id_policy: IdPolicy {
                min_length: parse_or(&lookup, "ID_MIN_LENGTH", DEFAULT_ID_MIN_LENGTH)?,
                max_length: parse_or(&lookup, "ID_MAX_LENGTH", DEFAULT_ID_MAX_LENGTH)?,
            },
            lookup_match: parse_or(&lookup, "LOOKUP_MATCH", LookupMatch::Exact)?,
        };

        let captcha = CaptchaConfig {
            enabled: parse_bool(lookup("CAPTCHA_ENABLED")),
            secret: lookup("CAPTCHA_SECRET").filter(|s| !s.trim().is_empty()),
            verify_url: lookup("CAPTCHA_VERIFY_URL")
                .unwrap_or_else(|| DEFAULT_CAPTCHA_VERIFY_URL.to_string()),
        };

        Ok(RelayConfig {
            profile,
            base,
            store,
            upload,
            captcha,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.store.backend == StoreBackend::GitHub {
            if self.store.owner.is_empty() || self.store.repo.is_empty() {
                return Err(anyhow::anyhow!(
                    "STORE_BACKEND=github requires GITHUB_OWNER and GITHUB_REPO"
                ));
            }
            if self.store.token.is_none() {
                return Err(anyhow::anyhow!("STORE_BACKEND=github requires GITHUB_TOKEN"));
            }
        }

        if self.store.branch.trim().is_empty() {
            return Err(anyhow::anyhow!("GITHUB_BRANCH must not be empty"));
        }

        let ids = self.upload.id_policy;
        if ids.min_length == 0 || ids.min_length > ids.max_length || ids.max_length > MAX_ID_LENGTH
        {
            return Err(anyhow::anyhow!(
                "ID_MIN_LENGTH/ID_MAX_LENGTH must satisfy 1 <= min <= max <= {}",
                MAX_ID_LENGTH
            ));
        }

        if self.upload.max_batch_files == 0 {
            return Err(anyhow::anyhow!("MAX_BATCH_FILES must be at least 1"));
        }

        if self.upload.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be at least 1"));
        }

        if self.upload.categories.is_empty() {
            return Err(anyhow::anyhow!("At least one upload category is required"));
        }

        if self.upload.default_category == self.upload.fallback_category {
            return Err(anyhow::anyhow!(
                "DEFAULT_CATEGORY and FALLBACK_CATEGORY must differ"
            ));
        }

        if self.captcha.enabled && self.captcha.secret.is_none() {
            return Err(anyhow::anyhow!(
                "CAPTCHA_ENABLED=true requires CAPTCHA_SECRET to be set"
            ));
        }

        if self.base.rate_limit_max == 0 || self.base.rate_limit_window_secs == 0 {
            return Err(anyhow::anyhow!(
                "RATE_LIMIT_MAX and RATE_LIMIT_WINDOW_SECS must be positive"
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn github_vars() -> Vec<(&'static str, &'static str)> {
        vec![
            ("GITHUB_OWNER", "acme"),
            ("GITHUB_REPO", "files"),
            ("GITHUB_TOKEN", "ghp_test"),
        ]
    }

    #[test]
    fn standard_profile_defaults() {
        let config = Config::from_map(&vars(&github_vars())).unwrap();
        config.validate().unwrap();

        assert_eq!(config.profile(), ServiceProfile::Standard);
        assert_eq!(config.store().branch, "main");
        assert_eq!(config.store().cdn_base, "https://cdn.jsdelivr.net/gh");
        assert_eq!(config.upload().max_batch_files, 10);
        assert_eq!(config.upload().default_category, "documents");
        assert_eq!(config.upload().fallback_category, "files");
        assert_eq!(config.upload().id_policy, IdPolicy::default());
        assert_eq!(config.upload().lookup_match, LookupMatch::Exact);
        assert_eq!(config.server_port(), 3000);
    }

    #[test]
    fn profile_values_can_be_overridden() {
        let mut pairs = github_vars();
        pairs.extend([
            ("RELAY_PROFILE", "lite"),
            ("MAX_FILE_SIZE_MB", "2"),
            ("ALLOWED_TYPES_IMAGES", "image/png, IMAGE/JPEG"),
            ("SERVICE_NAME", "pics"),
        ]);
        let config = Config::from_map(&vars(&pairs)).unwrap();

        assert_eq!(config.profile(), ServiceProfile::Lite);
        assert_eq!(config.service_name(), "pics");
        assert_eq!(config.upload().max_file_size_bytes, 2 * 1024 * 1024);
        assert_eq!(config.upload().max_batch_files, 3);
        assert_eq!(
            config.upload().categories[0].content_types,
            vec!["image/png".to_string(), "image/jpeg".to_string()]
        );
    }

    #[test]
    fn allow_list_is_union_of_categories_and_extras() {
        let mut pairs = github_vars();
        pairs.push(("EXTRA_ALLOWED_TYPES", "application/octet-stream"));
        let config = Config::from_map(&vars(&pairs)).unwrap();
        let upload = config.upload();

        assert!(upload.is_allowed("image/png"));
        assert!(upload.is_allowed("IMAGE/PNG"));
        assert!(upload.is_allowed("application/octet-stream"));
        assert!(!upload.is_allowed("application/x-msdownload"));

        let allowed = upload.allowed_content_types();
        let mut deduped = allowed.clone();
        deduped.dedup();
        assert_eq!(allowed.len(), deduped.len());
    }

    #[test]
    fn known_folders_include_default_and_fallback() {
        let config = Config::from_map(&vars(&github_vars())).unwrap();
        let folders = config.upload().known_folders();
        assert_eq!(folders.first().map(String::as_str), Some("images"));
        assert!(folders.contains(&"files".to_string()));
        assert_eq!(
            folders.iter().filter(|f| f.as_str() == "documents").count(),
            1
        );
    }

    #[test]
    fn commit_message_template_placeholders() {
        let mut pairs = github_vars();
        pairs.push(("COMMIT_MESSAGE_TEMPLATE", "[{folder}] {id}: {filename}"));
        let config = Config::from_map(&vars(&pairs)).unwrap();
        assert_eq!(
            config.upload().commit_message("ab1_cat.png", "ab1", "images"),
            "[images] ab1: ab1_cat.png"
        );
    }

    #[test]
    fn validate_requires_github_credentials() {
        let config = Config::from_map(&vars(&[("GITHUB_OWNER", "acme")])).unwrap();
        assert!(config.validate().is_err());

        let config = Config::from_map(&vars(&[("STORE_BACKEND", "memory")])).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_id_bounds_and_captcha_without_secret() {
        let config = Config::from_map(&vars(&[
            ("STORE_BACKEND", "memory"),
            ("ID_MIN_LENGTH", "7"),
            ("ID_MAX_LENGTH", "4"),
        ]))
        .unwrap();
        assert!(config.validate().is_err());

        let config = Config::from_map(&vars(&[
            ("STORE_BACKEND", "memory"),
            ("CAPTCHA_ENABLED", "true"),
        ]))
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn production_rejects_wildcard_cors() {
        let result = Config::from_map(&vars(&[("ENVIRONMENT", "production")]));
        assert!(result.is_err());
    }

    #[test]
    fn invalid_numbers_are_reported() {
        let result = Config::from_map(&vars(&[("MAX_BATCH_FILES", "ten")]));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("MAX_BATCH_FILES"));
    }
}
