//! Positional composite formatting
//!
//! Templates reference their arguments by position: `{0}`, `{1}`, ...
//! A placeholder may carry an alignment and a format string,
//! `{index[,alignment][:format]}`, and `{{` / `}}` stand for literal braces.
//!
//! Numeric format strings are resolved against a [`Culture`]:
//!
//! | Format | Meaning | `en-US` example |
//! |--------|---------|-----------------|
//! | `C[n]` | currency | `{0:C}` → `$1,234.50` |
//! | `N[n]` | grouped number | `{0:N1}` → `1,234.5` |
//! | `F[n]` | fixed point | `{0:F3}` → `1234.500` |
//! | `D[n]` | zero-padded integer | `{0:D5}` → `00042` |
//! | `P[n]` | percentage | `{0:P0}` → `13%` |
//! | `X[n]` | hexadecimal integer | `{0:X4}` → `00FF` |

use crate::culture::Culture;
use crate::error::{Error, Result};
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;
use std::sync::LazyLock;

static INVARIANT: LazyLock<Culture> = LazyLock::new(Culture::invariant);

const BAD_FORMAT: &str = "Input string was not in a correct format.";

/// A value substituted into a template placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg {
    /// Text, rendered as-is; format strings are ignored
    Text(String),
    /// Any integer; accepts every numeric format string including `D` and `X`
    Int(i128),
    /// Floating-point number; accepts `C`, `F`, `N` and `P`
    Float(f64),
    /// Rendered as `True` or `False`
    Bool(bool),
    /// Single character
    Char(char),
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FormatArg {
                fn from(value: $ty) -> Self {
                    Self::Int(i128::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32, u64);

impl From<usize> for FormatArg {
    fn from(value: usize) -> Self {
        Self::Int(i128::try_from(value).unwrap_or(i128::MAX))
    }
}

impl From<isize> for FormatArg {
    fn from(value: isize) -> Self {
        Self::Int(i128::try_from(value).unwrap_or(i128::MIN))
    }
}

impl From<f32> for FormatArg {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for FormatArg {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for FormatArg {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<char> for FormatArg {
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

impl From<&str> for FormatArg {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FormatArg {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for FormatArg {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl fmt::Display for FormatArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&INVARIANT, "").map_err(|_| fmt::Error)?)
    }
}

impl FormatArg {
    /// Render this argument with a placeholder format string
    #[allow(clippy::cast_precision_loss)]
    pub fn render(&self, culture: &Culture, spec: &str) -> Result<String> {
        match self {
            Self::Text(text) => Ok(text.clone()),
            Self::Char(ch) => Ok(ch.to_string()),
            Self::Bool(true) => Ok("True".to_string()),
            Self::Bool(false) => Ok("False".to_string()),
            Self::Int(value) => {
                if spec.is_empty() {
                    return Ok(culture.format_integer(*value, 0));
                }
                let (kind, precision) = parse_spec(spec)?;
                match kind {
                    'D' => Ok(culture.format_integer(*value, precision.unwrap_or(0))),
                    'X' => Ok(format_hex(*value, precision.unwrap_or(0), spec.starts_with('X'))),
                    _ => render_float(culture, *value as f64, kind, precision, spec),
                }
            }
            Self::Float(value) => {
                if spec.is_empty() {
                    return Ok(culture.format_general(*value));
                }
                let (kind, precision) = parse_spec(spec)?;
                render_float(culture, *value, kind, precision, spec)
            }
        }
    }
}

fn render_float(
    culture: &Culture,
    value: f64,
    kind: char,
    precision: Option<usize>,
    spec: &str,
) -> Result<String> {
    match kind {
        'C' => Ok(culture.format_currency(value, precision)),
        'N' => Ok(culture.format_number(
            value,
            precision.unwrap_or(culture.number_decimal_digits),
            true,
        )),
        'F' => Ok(culture.format_number(
            value,
            precision.unwrap_or(culture.number_decimal_digits),
            false,
        )),
        'P' => Ok(culture.format_percent(value, precision)),
        _ => Err(Error::format(format!("Format specifier '{spec}' is invalid for this argument."))),
    }
}

fn parse_spec(spec: &str) -> Result<(char, Option<usize>)> {
    let mut chars = spec.chars();
    let kind = chars
        .next()
        .map(|c| c.to_ascii_uppercase())
        .ok_or_else(|| Error::format(BAD_FORMAT))?;
    if !matches!(kind, 'C' | 'D' | 'F' | 'N' | 'P' | 'X') {
        return Err(Error::format(format!("Format specifier '{spec}' was invalid.")));
    }

    let rest = chars.as_str();
    if rest.is_empty() {
        return Ok((kind, None));
    }
    rest.parse::<usize>()
        .ok()
        .filter(|precision| *precision <= 99)
        .map(|precision| (kind, Some(precision)))
        .ok_or_else(|| Error::format(format!("Format specifier '{spec}' was invalid.")))
}

fn format_hex(value: i128, min_digits: usize, uppercase: bool) -> String {
    // Negative values render as their two's complement, like a 64-bit register
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let bits = if value < 0 { u128::from(value as i64 as u64) } else { value as u128 };
    if uppercase {
        format!("{bits:0min_digits$X}")
    } else {
        format!("{bits:0min_digits$x}")
    }
}

/// Substitute positional arguments into `template` using the invariant culture
///
/// # Errors
///
/// Returns [`Error::Format`] when the template is malformed or a placeholder
/// references an argument that was not supplied.
///
/// # Example
///
/// ```rust
/// use useful_extensions::utils::format::format;
///
/// let text = format("{0} has {1} items", &["cart".into(), 3.into()]).unwrap();
/// assert_eq!(text, "cart has 3 items");
///
/// assert!(format("{2}", &["only one".into()]).is_err());
/// ```
pub fn format(template: &str, args: &[FormatArg]) -> Result<String> {
    format_with(&INVARIANT, template, args)
}

/// Substitute positional arguments into `template` using `culture`
///
/// # Errors
///
/// Returns [`Error::Format`] when the template is malformed or a placeholder
/// references an argument that was not supplied.
pub fn format_with(culture: &Culture, template: &str, args: &[FormatArg]) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let placeholder = parse_placeholder(&mut chars)?;
                let arg = args.get(placeholder.index).ok_or_else(|| {
                    Error::format(format!(
                        "Index ({}) must be greater than or equal to zero and less than the size of the argument list ({}).",
                        placeholder.index,
                        args.len()
                    ))
                })?;
                let rendered = arg.render(culture, &placeholder.spec)?;
                out.push_str(&align(&rendered, placeholder.alignment));
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '}' => return Err(Error::format(BAD_FORMAT)),
            _ => out.push(ch),
        }
    }

    Ok(out)
}

struct Placeholder {
    index: usize,
    alignment: i64,
    spec: String,
}

fn parse_placeholder(chars: &mut Peekable<Chars<'_>>) -> Result<Placeholder> {
    let index = read_number(chars).ok_or_else(|| Error::format(BAD_FORMAT))?;
    skip_spaces(chars);

    let mut alignment = 0;
    if chars.peek() == Some(&',') {
        chars.next();
        skip_spaces(chars);
        let negative = chars.peek() == Some(&'-');
        if negative {
            chars.next();
        }
        let width = read_number(chars).ok_or_else(|| Error::format(BAD_FORMAT))?;
        let width = i64::try_from(width).map_err(|_| Error::format(BAD_FORMAT))?;
        alignment = if negative { -width } else { width };
        skip_spaces(chars);
    }

    let mut spec = String::new();
    if chars.peek() == Some(&':') {
        chars.next();
        loop {
            match chars.next() {
                Some('}') => return Ok(Placeholder { index, alignment, spec }),
                Some('{') => return Err(Error::format(BAD_FORMAT)),
                Some(c) => spec.push(c),
                None => return Err(Error::format(BAD_FORMAT)),
            }
        }
    }

    match chars.next() {
        Some('}') => Ok(Placeholder { index, alignment, spec }),
        _ => Err(Error::format(BAD_FORMAT)),
    }
}

fn read_number(chars: &mut Peekable<Chars<'_>>) -> Option<usize> {
    let mut digits = String::new();
    while let Some(c) = chars.peek().copied().filter(char::is_ascii_digit) {
        digits.push(c);
        chars.next();
    }
    digits.parse().ok()
}

fn skip_spaces(chars: &mut Peekable<Chars<'_>>) {
    while chars.peek() == Some(&' ') {
        chars.next();
    }
}

fn align(text: &str, alignment: i64) -> String {
    let width = usize::try_from(alignment.unsigned_abs()).unwrap_or(usize::MAX);
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let padding = " ".repeat(width - len);
    if alignment > 0 {
        format!("{padding}{text}")
    } else {
        format!("{text}{padding}")
    }
}
