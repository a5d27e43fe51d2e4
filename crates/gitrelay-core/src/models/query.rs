use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Query parameters for paginated listing
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct ListFilesQuery {
    /// Restrict the listing to one category folder
    #[serde(default)]
    #[validate(length(min = 1, max = 64, message = "folder must be between 1 and 64 characters"))]
    pub folder: Option<String>,
    /// 1-based page number (default 1)
    #[serde(default)]
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<u32>,
    /// Page size (default 20, max 100)
    #[serde(default)]
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: Option<u32>,
}

impl ListFilesQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }
}

/// Query parameters for deleting by explicit path
#[derive(Debug, Deserialize, ToSchema, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct DeletePathQuery {
    /// `category/filename` as returned by upload or listing
    #[validate(length(min = 3, max = 512, message = "path must be between 3 and 512 characters"))]
    pub path: String,
}

/// Caller-supplied identifiers follow the generated alphabet, plus `-`.
///
/// `_` is excluded because it separates the identifier from the original name.
pub fn is_valid_custom_id(id: &str) -> bool {
    (1..=32).contains(&id.len()) && id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_defaults() {
        let query = ListFilesQuery::default();
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), DEFAULT_PAGE_SIZE);
        assert!(query.validate().is_ok());
    }

    #[test]
    fn list_query_rejects_out_of_range() {
        let zero_page = ListFilesQuery {
            page: Some(0),
            ..Default::default()
        };
        assert!(zero_page.validate().is_err());

        let huge_limit = ListFilesQuery {
            limit: Some(500),
            ..Default::default()
        };
        assert!(huge_limit.validate().is_err());
    }

    #[test]
    fn zero_paging_is_clamped() {
        let query = ListFilesQuery {
            folder: None,
            page: Some(0),
            limit: Some(0),
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 1);

        let huge = ListFilesQuery {
            limit: Some(500),
            ..Default::default()
        };
        assert_eq!(huge.limit(), MAX_PAGE_SIZE);
    }

    #[test]
    fn custom_id_rules() {
        assert!(is_valid_custom_id("aB3"));
        assert!(is_valid_custom_id("invoice-2024"));
        assert!(!is_valid_custom_id(""));
        assert!(!is_valid_custom_id("has_underscore"));
        assert!(!is_valid_custom_id("../x"));
        assert!(!is_valid_custom_id(&"a".repeat(33)));
    }
}
