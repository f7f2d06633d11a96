//! Common types used throughout keyset-paginate
//!
//! This module contains shared type definitions, type aliases,
//! and small enums used across multiple modules.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// Query filter fragment (a document-store predicate)
pub type Filter = bson::Document;

/// Default identifier field of a document
pub const ID_FIELD: &str = "_id";

// ============================================================================
// Sort Direction
// ============================================================================

/// Sort order of the paginated field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Smallest first
    #[default]
    Ascending,
    /// Largest first
    Descending,
}

impl SortDirection {
    /// The opposite direction
    pub fn reverse(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Document-store sort value (`1` or `-1`)
    pub fn as_i32(self) -> i32 {
        match self {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        }
    }
}

// ============================================================================
// Page Direction
// ============================================================================

/// Which way a page is fetched relative to the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Records after the cursor, in sort order
    #[default]
    Forward,
    /// Records before the cursor
    Backward,
}

// ============================================================================
// Cursor Kind
// ============================================================================

/// Identifies which cursor of a request a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorKind {
    /// The `next` token, paging forward
    Next,
    /// The `previous` token, paging backward
    Previous,
}

impl CursorKind {
    /// Page direction this cursor selects
    pub fn direction(self) -> Direction {
        match self {
            CursorKind::Next => Direction::Forward,
            CursorKind::Previous => Direction::Backward,
        }
    }
}

impl fmt::Display for CursorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CursorKind::Next => f.write_str("next"),
            CursorKind::Previous => f.write_str("previous"),
        }
    }
}

// ============================================================================
// Collation
// ============================================================================

/// String comparison rules passed through to the fetch collaborator
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collation {
    /// Locale identifier (e.g., "en")
    pub locale: String,

    /// Comparison strength (1 = base letters, 2 = accents, 3 = case)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<u8>,

    /// Whether case is compared at strength 1 or 2
    #[serde(default)]
    pub case_level: bool,

    /// Compare numeric substrings by value
    #[serde(default)]
    pub numeric_ordering: bool,
}

impl Collation {
    /// Create a collation for a locale
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            ..Default::default()
        }
    }

    /// Set the comparison strength
    pub fn with_strength(mut self, strength: u8) -> Self {
        self.strength = Some(strength);
        self
    }

    /// Whether strings differing only by case compare equal
    pub fn is_case_insensitive(&self) -> bool {
        matches!(self.strength, Some(1 | 2)) && !self.case_level
    }
}
