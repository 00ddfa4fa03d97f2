use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::AppError;

/// Longest accepted value for any asset URL field.
pub const MAX_URL_LEN: usize = 2048;

/// Pagination metadata included in list responses.
#[derive(Serialize, utoipa::ToSchema)]
pub struct Pagination {
    /// Current page number (1-based).
    #[schema(example = 1)]
    pub page: u64,
    /// Number of items per page.
    #[schema(example = 20)]
    pub per_page: u64,
    /// Total number of matching items across all pages.
    #[schema(example = 47)]
    pub total: u64,
    /// Total number of pages.
    #[schema(example = 3)]
    pub total_pages: u64,
}

impl Pagination {
    pub fn new(page: u64, per_page: u64, total: u64) -> Self {
        Self {
            page,
            per_page,
            total,
            total_pages: total.div_ceil(per_page),
        }
    }
}

/// Normalize `page` / `per_page` query values: page >= 1, per_page in 1..=100
/// (default 20).
pub fn page_params(page: Option<u64>, per_page: Option<u64>) -> (u64, u64) {
    let page = Ord::max(page.unwrap_or(1), 1);
    let per_page = per_page.unwrap_or(20).clamp(1, 100);
    (page, per_page)
}

/// Row offset of `page`. Pages far past any real data are rejected rather
/// than wrapped; the bound keeps the offset within a signed 64-bit SQL integer.
pub fn page_offset(page: u64, per_page: u64) -> Result<u64, AppError> {
    page.saturating_sub(1)
        .checked_mul(per_page)
        .filter(|&offset| offset <= i64::MAX as u64)
        .ok_or_else(|| AppError::Validation("page is out of range".into()))
}

/// Escape LIKE wildcard characters in a search string.
pub fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Serde helper for PATCH semantics on nullable fields.
///
/// * JSON field absent  => `None`          (don't update)
/// * JSON field = null  => `Some(None)`    (set to NULL)
/// * JSON field = value => `Some(Some(v))` (set to value)
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

/// Validate a trimmed title (1-256 Unicode characters).
pub fn validate_title(title: &str) -> Result<(), AppError> {
    validate_name(title, "Title")
}

/// Validate a trimmed, required short text field (1-256 Unicode characters).
pub fn validate_name(value: &str, field: &str) -> Result<(), AppError> {
    let value = value.trim();
    if value.is_empty() || value.chars().count() > 256 {
        return Err(AppError::Validation(format!(
            "{field} must be 1-256 characters"
        )));
    }
    Ok(())
}

/// Validate a required asset URL (non-empty, at most 2048 bytes).
pub fn validate_url(url: &str, field: &str) -> Result<(), AppError> {
    if url.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    if url.len() > MAX_URL_LEN {
        return Err(AppError::Validation(format!(
            "{field} must be at most {MAX_URL_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate an optional asset URL; `None` always passes.
pub fn validate_optional_url(url: Option<&str>, field: &str) -> Result<(), AppError> {
    match url {
        Some(url) => validate_url(url, field),
        None => Ok(()),
    }
}

/// Validate an optional position field (must be >= 0 when present).
pub fn validate_optional_position(pos: Option<i32>) -> Result<(), AppError> {
    if let Some(pos) = pos
        && pos < 0
    {
        return Err(AppError::Validation("Display order must be >= 0".into()));
    }
    Ok(())
}

/// Validate an ordered ID list for reorder operations (non-empty, no duplicates).
pub fn validate_reorder_ids<T: Eq + Hash + Display>(ids: &[T], name: &str) -> Result<(), AppError> {
    if ids.is_empty() {
        return Err(AppError::Validation(format!("{name}s must not be empty")));
    }
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(AppError::Validation(format!(
                "Duplicate {name} {id} in reorder list"
            )));
        }
    }
    Ok(())
}

/// Derive a URL slug from free text: lowercase ASCII letters, digits and
/// single hyphens. Returns an empty string when nothing usable remains.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if (c.is_whitespace() || c == '-') && !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// Validate a slug: 1-256 characters of `a-z`, `0-9` and `-`.
pub fn validate_slug(slug: &str) -> Result<(), AppError> {
    let valid = !slug.is_empty()
        && slug.len() <= 256
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');
    if !valid {
        return Err(AppError::Validation(
            "Slug must be lowercase letters, digits and hyphens".into(),
        ));
    }
    Ok(())
}

/// JSON field that must be an array when present.
pub fn validate_json_array(value: Option<&Value>, field: &str) -> Result<(), AppError> {
    match value {
        Some(v) if !(v.is_array() || v.is_null()) => {
            Err(AppError::Validation(format!("{field} must be an array")))
        }
        _ => Ok(()),
    }
}

/// JSON field that must be an object when present.
pub fn validate_json_object(value: Option<&Value>, field: &str) -> Result<(), AppError> {
    match value {
        Some(v) if !(v.is_object() || v.is_null()) => {
            Err(AppError::Validation(format!("{field} must be an object")))
        }
        _ => Ok(()),
    }
}

/// Validate optional free text against a character limit.
pub fn validate_optional_text(value: Option<&str>, field: &str, max: usize) -> Result<(), AppError> {
    if let Some(value) = value
        && value.chars().count() > max
    {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Trim an optional text field, mapping blank input to `None`.
pub fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
