//! Utility modules
//!
//! Free functions grouped by the type they operate on: text, dates and
//! collections.

pub mod collections;
pub mod dates;
pub mod email;
pub mod format;
pub mod strings;

// Re-export commonly used utilities
pub use collections::{contains, flatten, Flatten};
pub use email::{is_email, EmailValidator};
pub use format::{format, format_with, FormatArg};
pub use strings::{
    append_with,
    hash,
    is_empty,
    is_not_empty,
    is_regex_match,
    is_web_url,
    mask,
    mask_with,
    or,
    random_string,
    random_string_into,
    remove_alpha_chars,
    remove_chars,
    remove_special_chars,
    to_currency,
    to_int,
    MaskOptions,
};
