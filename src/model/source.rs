//! Source entities (pure Rust, no FFI).
//!
//! A source is one overlay's identity and placement. The id is stable for
//! the life of the source; the native window bound to it is not.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::constants::*;
use crate::error::AppError;

/// Opaque, process-unique identifier of a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(Uuid);

impl SourceId {
    /// Mint a fresh id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SourceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Window rectangle in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    /// Build a rectangle, raising width and height to [`MIN_EXTENT`].
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
        .sanitized()
    }

    /// Copy with width and height raised to at least [`MIN_EXTENT`].
    pub fn sanitized(self) -> Self {
        Self {
            width: self.width.max(MIN_EXTENT),
            height: self.height.max(MIN_EXTENT),
            ..self
        }
    }

    pub fn default_source() -> Self {
        let (x, y, w, h) = DEFAULT_SOURCE_BOUNDS;
        Self::new(x, y, w, h)
    }

    pub fn default_editor() -> Self {
        let (x, y, w, h) = DEFAULT_EDITOR_BOUNDS;
        Self::new(x, y, w, h)
    }
}

/// One overlay: what it shows and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub id: SourceId,
    pub url: String,
    #[serde(default)]
    pub display_name: String,
    pub bounds: Bounds,
}

impl Source {
    /// Build a source from an add request, normalizing its URL and minting an id.
    pub fn create(request: NewSource) -> Result<Self, AppError> {
        let url = normalize_url(&request.url)?;
        Ok(Self {
            id: SourceId::new(),
            url,
            display_name: request.display_name.trim().to_string(),
            bounds: request.bounds.unwrap_or_else(Bounds::default_source).sanitized(),
        })
    }

    /// Human label: the display name, or the URL when no name is set.
    pub fn label(&self) -> &str {
        if self.display_name.trim().is_empty() {
            &self.url
        } else {
            &self.display_name
        }
    }
}

/// Add request as produced by the editing surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewSource {
    pub url: String,
    pub display_name: String,
    /// Initial placement; the default source rectangle when `None`.
    pub bounds: Option<Bounds>,
}

impl NewSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }
}

/// Trim `input`, prepend `https://` when it has no `scheme://` prefix, and
/// check that the result parses as a URL.
///
/// The returned string is the normalized input itself, not the parser's
/// serialization, so `example.com` becomes `https://example.com` without a
/// trailing slash.
pub fn normalize_url(input: &str) -> Result<String, AppError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AppError::Parse {
            input: input.to_string(),
            reason: "url is empty".to_string(),
        });
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("{}://{}", DEFAULT_URL_SCHEME, trimmed)
    };

    match url::Url::parse(&candidate) {
        Ok(parsed) if parsed.cannot_be_a_base() => Err(AppError::Parse {
            input: input.to_string(),
            reason: "url has no host or path".to_string(),
        }),
        Ok(_) => Ok(candidate),
        Err(e) => Err(AppError::Parse {
            input: input.to_string(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_prepends_https() {
        assert_eq!(normalize_url("example.com").unwrap(), "https://example.com");
    }

    #[test]
    fn normalize_keeps_existing_scheme() {
        assert_eq!(
            normalize_url("  http://localhost:8080/overlay ").unwrap(),
            "http://localhost:8080/overlay"
        );
        assert_eq!(
            normalize_url("file:///C:/overlays/a.html").unwrap(),
            "file:///C:/overlays/a.html"
        );
    }

    #[test]
    fn normalize_rejects_empty_and_garbage() {
        assert!(normalize_url("   ").is_err());
        assert!(normalize_url("http://").is_err());
        assert!(normalize_url("exa mple.com").is_err());
    }

    #[test]
    fn bounds_raise_degenerate_extent() {
        let b = Bounds::new(5, -3, 0, -20);
        assert_eq!(b, Bounds { x: 5, y: -3, width: 1, height: 1 });
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(SourceId::new(), SourceId::new());
    }

    #[test]
    fn label_falls_back_to_url() {
        let mut source = Source::create(NewSource::new("example.com")).unwrap();
        assert_eq!(source.label(), "https://example.com");
        source.display_name = "Chat".into();
        assert_eq!(source.label(), "Chat");
    }
}
