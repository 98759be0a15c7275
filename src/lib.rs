//! Useful Extensions
//!
//! A grab-bag of small, dependency-light helpers for everyday strings, dates
//! and collections. Every helper is a free function taking the value it
//! operates on first, grouped by that value's type.
//!
//! # Features
//!
//! - **Strings**: emptiness checks, positional formatting, masking,
//!   character filtering, email and URL validation, hashing, random strings
//! - **Cultures**: separators, digit grouping and currency placement for
//!   culture-aware formatting
//! - **Dates**: period boundaries, weekday navigation, weekend detection and
//!   month enumeration on a kind-tagged [`Instant`]
//! - **Collections**: membership tests, lazy tree flattening and paged query
//!   exhaustion
//!
//! Helpers follow one of two policies, visible in their return types:
//! best-effort helpers return a plain value with a documented default, strict
//! helpers return [`Result`].
//!
//! # Quick Start
//!
//! ```rust
//! use useful_extensions::utils::{format, is_email, mask, FormatArg};
//! use useful_extensions::utils::dates::{end_of_month, next};
//! use useful_extensions::Instant;
//! use chrono::Weekday;
//!
//! fn main() -> useful_extensions::Result<()> {
//!     let greeting = format("Hello {0}, you owe {1:C}", &[FormatArg::from("Ada"), FormatArg::from(12.5)])?;
//!     assert_eq!(greeting, "Hello Ada, you owe ¤12.50");
//!
//!     assert_eq!(mask("4111111111111111"), "************1111");
//!     assert!(is_email(Some("ada@example.com")));
//!
//!     let date = Instant::from_ymd(2024, 2, 10).unwrap();
//!     assert_eq!(next(date, Weekday::Mon).day(), 12);
//!     assert_eq!(end_of_month(date).day(), 29);
//!
//!     Ok(())
//! }
//! ```

/// Crate version constant
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod culture;
pub mod error;
pub mod types;

// Helper modules
pub mod query;
pub mod utils;

// Re-exports for convenience
pub use culture::{Culture, CurrencyPattern};
pub use error::{Error, Result};
pub use query::{fetch_all_pages, fetch_all_pages_stream, AllPages, AsyncPagedQuery, PagedQuery};
pub use types::{DateKind, Instant};

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::utils::dates;
    use chrono::Weekday;

    #[test]
    fn test_crate_version() {
        assert!(!VERSION.is_empty());
        // Version should follow semantic versioning
        assert!(VERSION.contains('.'));
    }

    #[test]
    fn test_format_uses_culture_conventions() {
        let culture = Culture::get("de-DE").unwrap();
        let text = utils::format_with(&culture, "{0:N2}", &[utils::FormatArg::from(1234.5)]).unwrap();
        assert_eq!(text, "1.234,50");
    }

    #[test]
    fn test_dates_and_collections_together() {
        let date = Instant::from_ymd(2024, 9, 1).unwrap();
        let mondays: Vec<Instant> = dates::month_dates_of(date)
            .into_iter()
            .filter(|d| d.weekday() == Weekday::Mon)
            .collect();
        assert_eq!(mondays.len(), 5);
        assert!(utils::contains(Some(&dates::nth_weekday_of_month(date, 1, Weekday::Mon)), mondays.as_slice()).unwrap());
    }

    #[test]
    fn test_paging_collects_into_result() {
        let source = |offset: usize| -> Result<Vec<usize>> {
            Ok(if offset < 4 { vec![offset, offset + 1] } else { vec![] })
        };
        let all: Result<Vec<usize>> = fetch_all_pages(source).collect();
        assert_eq!(all.unwrap(), vec![0, 1, 2, 3]);
    }
}
