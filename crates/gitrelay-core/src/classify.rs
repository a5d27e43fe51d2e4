//! Content-type to storage category routing.

use crate::config::{CategoryRule, UploadConfig};

/// Maps a declared MIME type to the folder it is stored under.
///
/// Two defaults exist on purpose: a missing type goes to the fallback folder, while a
/// declared type that no rule lists goes to the default folder.
#[derive(Clone, Debug)]
pub struct MimeClassifier {
    rules: Vec<CategoryRule>,
    default_category: String,
    fallback_category: String,
}

impl MimeClassifier {
    pub fn new(
        rules: Vec<CategoryRule>,
        default_category: impl Into<String>,
        fallback_category: impl Into<String>,
    ) -> Self {
        Self {
            rules,
            default_category: default_category.into(),
            fallback_category: fallback_category.into(),
        }
    }

    pub fn from_config(config: &UploadConfig) -> Self {
        Self::new(
            config.categories.clone(),
            config.default_category.clone(),
            config.fallback_category.clone(),
        )
    }

    /// First rule (in priority order) listing the type wins; matching is case-insensitive.
    pub fn classify(&self, content_type: Option<&str>) -> &str {
        let content_type = match content_type.map(str::trim) {
            Some(ct) if !ct.is_empty() => ct,
            _ => return &self.fallback_category,
        };

        self.rules
            .iter()
            .find(|rule| {
                rule.content_types
                    .iter()
                    .any(|ct| ct.eq_ignore_ascii_case(content_type))
            })
            .map(|rule| rule.name.as_str())
            .unwrap_or(&self.default_category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> MimeClassifier {
        MimeClassifier::new(
            vec![
                CategoryRule::new("images", &["image/png", "image/jpeg"]),
                CategoryRule::new("videos", &["video/mp4"]),
                CategoryRule::new("code", &["application/json", "text/plain"]),
                CategoryRule::new("documents", &["application/pdf", "text/plain"]),
            ],
            "documents",
            "files",
        )
    }

    #[test]
    fn classifies_known_types() {
        let c = classifier();
        assert_eq!(c.classify(Some("image/png")), "images");
        assert_eq!(c.classify(Some("video/mp4")), "videos");
        assert_eq!(c.classify(Some("application/pdf")), "documents");
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classifier().classify(Some("IMAGE/JPEG")), "images");
    }

    #[test]
    fn first_listed_category_wins() {
        assert_eq!(classifier().classify(Some("text/plain")), "code");
    }

    #[test]
    fn unknown_type_goes_to_default() {
        let c = classifier();
        assert_eq!(c.classify(Some("application/unknown-type")), "documents");
        assert_eq!(c.classify(Some("image/png; charset=binary")), "documents");
    }

    #[test]
    fn missing_type_goes_to_fallback() {
        let c = classifier();
        assert_eq!(c.classify(None), "files");
        assert_eq!(c.classify(Some("")), "files");
        assert_eq!(c.classify(Some("   ")), "files");
        assert_ne!(c.classify(None), c.classify(Some("application/unknown-type")));
    }
}
