//! # Book Domain Model
//!
//! The `Book` record cached by `book-cache`. The cache layer treats it as an
//! opaque JSON payload; this crate owns its shape.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Numeric book identifier, also the cache field name once stringified
pub type BookId = i64;

// =============================================================================
// ENTITIES
// =============================================================================

/// A book in the catalogue
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_on: Option<NaiveDate>,
}

impl Book {
    pub fn new(id: BookId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            author: None,
            published_on: None,
        }
    }

    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    #[must_use]
    pub fn with_published_on(mut self, date: NaiveDate) -> Self {
        self.published_on = Some(date);
        self
    }
}
