//! String helper functions
//!
//! Emptiness checks, masking, character filtering, best-effort integer
//! conversion, URL and pattern checks, legacy hashing, random strings and
//! currency rendering. Functions that accept `Option<&str>` treat an absent
//! string exactly like an empty one.

use crate::culture::Culture;
use crate::error::Result;
use crate::utils::format::{format, FormatArg};
use rand::Rng;
use regex::Regex;
use sha1::{Digest, Sha1};
use std::fmt::Display;
use url::Url;

/// Symbols used by [`random_string`]
pub const RANDOM_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Check whether a string is absent or has zero length
///
/// # Example
///
/// ```rust
/// use useful_extensions::utils::strings::is_empty;
///
/// assert!(is_empty(None));
/// assert!(is_empty(Some("")));
/// assert!(!is_empty(Some(" ")));
/// ```
pub fn is_empty(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}

/// Complement of [`is_empty`]
pub fn is_not_empty(value: Option<&str>) -> bool {
    !is_empty(value)
}

/// Return `value` when it has content, otherwise `fallback`
///
/// # Example
///
/// ```rust
/// use useful_extensions::utils::strings::or;
///
/// assert_eq!(or(Some("name"), "anonymous"), "name");
/// assert_eq!(or(Some(""), "anonymous"), "anonymous");
/// assert_eq!(or(None, "anonymous"), "anonymous");
/// ```
pub fn or<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    match value {
        Some(text) if !text.is_empty() => text,
        _ => fallback,
    }
}

/// Options for [`mask_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskOptions {
    /// Number of trailing characters left readable
    pub unmasked_count: usize,
    /// Character that replaces the hidden characters
    pub mask_char: char,
}

impl Default for MaskOptions {
    fn default() -> Self {
        Self {
            unmasked_count: 4,
            mask_char: '*',
        }
    }
}

impl MaskOptions {
    /// Create new MaskOptions with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of trailing characters left readable
    #[must_use]
    pub const fn with_unmasked_count(mut self, unmasked_count: usize) -> Self {
        self.unmasked_count = unmasked_count;
        self
    }

    /// Set the mask character
    #[must_use]
    pub const fn with_mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }
}

/// Mask all but the last four characters with `*`
///
/// # Example
///
/// ```rust
/// use useful_extensions::utils::strings::mask;
///
/// assert_eq!(mask("1234567890"), "******7890");
/// assert_eq!(mask("abc"), "abc");
/// ```
pub fn mask(text: &str) -> String {
    mask_with(text, MaskOptions::default())
}

/// Mask all but the last `unmasked_count` characters with `mask_char`
///
/// Text no longer than `unmasked_count` characters is returned unchanged. The
/// result always has as many characters as the input.
///
/// # Example
///
/// ```rust
/// use useful_extensions::utils::strings::{mask_with, MaskOptions};
///
/// let options = MaskOptions::new().with_unmasked_count(2).with_mask_char('#');
/// assert_eq!(mask_with("secret", options), "####et");
/// ```
pub fn mask_with(text: &str, options: MaskOptions) -> String {
    let len = text.chars().count();
    if len <= options.unmasked_count {
        return text.to_string();
    }

    let hidden = len - options.unmasked_count;
    text.chars()
        .enumerate()
        .map(|(i, ch)| if i < hidden { options.mask_char } else { ch })
        .collect()
}

/// Remove every occurrence of the given characters, preserving order
///
/// # Example
///
/// ```rust
/// use useful_extensions::utils::strings::remove_chars;
///
/// assert_eq!(remove_chars("a-b-c", &['-']), "abc");
/// ```
pub fn remove_chars(text: &str, chars: &[char]) -> String {
    text.chars().filter(|ch| !chars.contains(ch)).collect()
}

/// Keep only ASCII letters and digits
///
/// An absent string yields an empty one.
pub fn remove_special_chars(text: Option<&str>) -> String {
    text.unwrap_or_default()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Strip everything but ASCII digits and parse the rest as an `i32`
///
/// Best-effort: absent input, input without digits and values that do not
/// fit in an `i32` all yield `0`.
///
/// # Example
///
/// ```rust
/// use useful_extensions::utils::strings::remove_alpha_chars;
///
/// assert_eq!(remove_alpha_chars(Some("abc123def")), 123);
/// assert_eq!(remove_alpha_chars(Some("abc")), 0);
/// ```
pub fn remove_alpha_chars(text: Option<&str>) -> i32 {
    let digits: String = text
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(0)
}

/// Best-effort integer conversion, same rules as [`remove_alpha_chars`]
///
/// Note that every non-digit is discarded, including a leading minus sign.
pub fn to_int(text: Option<&str>) -> i32 {
    remove_alpha_chars(text)
}

/// Check whether `text` is an absolute `http` or `https` URI
///
/// # Example
///
/// ```rust
/// use useful_extensions::utils::strings::is_web_url;
///
/// assert!(is_web_url("https://example.com/path?q=1"));
/// assert!(!is_web_url("ftp://example.com"));
/// assert!(!is_web_url("/relative/path"));
/// ```
pub fn is_web_url(text: &str) -> bool {
    Url::parse(text)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}

/// Check whether `pattern` matches anywhere in `text`
///
/// # Errors
///
/// Returns [`Error::InvalidPattern`](crate::error::Error::InvalidPattern) when
/// `pattern` does not compile.
pub fn is_regex_match(text: &str, pattern: &str) -> Result<bool> {
    let regex = Regex::new(pattern)?;
    Ok(regex.is_match(text))
}

/// SHA-1 digest of the UTF-8 bytes of `text` as uppercase hex
///
/// Kept for compatibility with stored legacy digests; not suitable for
/// anything security related.
///
/// # Example
///
/// ```rust
/// use useful_extensions::utils::strings::hash;
///
/// assert_eq!(hash("abc"), "A9993E364706816ABA3E25717850C26C9CD0D89D");
/// ```
pub fn hash(text: &str) -> String {
    hex::encode_upper(Sha1::digest(text.as_bytes()))
}

/// Generate a random string of `A-Z` and `0-9`
///
/// Uses the thread-local generator, so concurrent callers never share state.
/// Not suitable for secrets.
///
/// # Example
///
/// ```rust
/// use useful_extensions::utils::strings::random_string;
///
/// let code = random_string(10);
/// assert_eq!(code.len(), 10);
/// assert!(code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
/// ```
pub fn random_string(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| RANDOM_ALPHABET[rng.gen_range(0..RANDOM_ALPHABET.len())] as char)
        .collect()
}

/// Format `template` with a fresh random string as argument `{0}`
///
/// An absent or empty template yields the bare random string.
///
/// # Errors
///
/// Returns [`Error::Format`](crate::error::Error::Format) when the template
/// is malformed or references any argument other than `{0}`.
///
/// # Example
///
/// ```rust
/// use useful_extensions::utils::strings::random_string_into;
///
/// let name = random_string_into(Some("upload-{0}.tmp"), 6).unwrap();
/// assert!(name.starts_with("upload-") && name.ends_with(".tmp"));
/// assert_eq!(name.len(), 17);
/// ```
pub fn random_string_into(template: Option<&str>, length: usize) -> Result<String> {
    format(or(template, "{0}"), &[FormatArg::Text(random_string(length))])
}

/// Join `parts` followed by `value`, separated by `separator`
///
/// # Example
///
/// ```rust
/// use useful_extensions::utils::strings::append_with;
///
/// assert_eq!(append_with("c", "/", &["a", "b"]), "a/b/c");
/// assert_eq!(append_with("only", ", ", &[] as &[&str]), "only");
/// ```
pub fn append_with<D: Display>(value: &str, separator: &str, parts: &[D]) -> String {
    parts
        .iter()
        .map(ToString::to_string)
        .chain(std::iter::once(value.to_string()))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Render `amount` as currency using the conventions of `culture_name`
///
/// # Errors
///
/// Returns [`Error::UnknownCulture`](crate::error::Error::UnknownCulture)
/// when the culture name cannot be resolved.
///
/// # Example
///
/// ```rust
/// use useful_extensions::utils::strings::to_currency;
///
/// assert_eq!(to_currency(1234.5, "en-US").unwrap(), "$1,234.50");
/// assert_eq!(to_currency(-3.0, "en-GB").unwrap(), "-£3.00");
/// ```
pub fn to_currency(amount: f64, culture_name: &str) -> Result<String> {
    Ok(Culture::get(culture_name)?.format_currency(amount, None))
}
