//! Culture-specific number and currency conventions
//!
//! A [`Culture`] carries everything needed to render numbers the way a locale
//! expects: separators, digit grouping, the currency symbol and where it goes.
//! The built-in table follows the conventions used by ICU for each culture
//! name; custom cultures can be built with a struct literal.

use crate::error::{Error, Result};
use std::sync::LazyLock;
use tracing::debug;

/// No-break space used between amounts and currency or percent symbols
pub const NBSP: char = '\u{a0}';

/// Narrow no-break space, the French group separator
pub const NNBSP: char = '\u{202f}';

/// Placement of the currency symbol relative to the amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencyPattern {
    /// `$n`
    SymbolBefore,
    /// `n$`
    SymbolAfter,
    /// `$ n`
    SymbolBeforeSpace,
    /// `n $`
    SymbolAfterSpace,
}

/// Number formatting conventions of a named culture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Culture {
    /// Culture name such as `en-US`; empty for the invariant culture
    pub name: String,
    pub decimal_separator: String,
    pub group_separator: String,
    /// Digits per group in the integral part
    pub group_size: usize,
    pub negative_sign: String,
    /// Default fractional digits for `N`, `F` and `P` formats
    pub number_decimal_digits: usize,
    pub currency_symbol: String,
    /// Default fractional digits for the `C` format
    pub currency_decimal_digits: usize,
    pub currency_pattern: CurrencyPattern,
    /// Text between a percentage and the `%` sign
    pub percent_spacing: String,
}

static BUILTIN_CULTURES: LazyLock<Vec<Culture>> = LazyLock::new(|| {
    let nbsp = NBSP.to_string();
    vec![
        Culture::invariant(),
        Culture::builtin("en-US", ".", ",", "$", 2, CurrencyPattern::SymbolBefore, ""),
        Culture::builtin("en-GB", ".", ",", "£", 2, CurrencyPattern::SymbolBefore, ""),
        Culture::builtin("en-CA", ".", ",", "$", 2, CurrencyPattern::SymbolBefore, ""),
        Culture::builtin("en-AU", ".", ",", "$", 2, CurrencyPattern::SymbolBefore, ""),
        Culture::builtin("de-DE", ",", ".", "€", 2, CurrencyPattern::SymbolAfterSpace, &nbsp),
        Culture::builtin("fr-FR", ",", &NNBSP.to_string(), "€", 2, CurrencyPattern::SymbolAfterSpace, &NNBSP.to_string()),
        Culture::builtin("it-IT", ",", ".", "€", 2, CurrencyPattern::SymbolAfterSpace, ""),
        Culture::builtin("nl-NL", ",", ".", "€", 2, CurrencyPattern::SymbolBeforeSpace, ""),
        Culture::builtin("pt-BR", ",", ".", "R$", 2, CurrencyPattern::SymbolBeforeSpace, ""),
        Culture::builtin("ja-JP", ".", ",", "￥", 0, CurrencyPattern::SymbolBefore, ""),
        Culture::builtin("zh-CN", ".", ",", "¥", 2, CurrencyPattern::SymbolBefore, ""),
        Culture::builtin("ko-KR", ".", ",", "₩", 0, CurrencyPattern::SymbolBefore, ""),
    ]
});

impl Culture {
    /// The culture-independent conventions used when no culture is given
    pub fn invariant() -> Self {
        Self::builtin("", ".", ",", "¤", 2, CurrencyPattern::SymbolBefore, " ")
    }

    fn builtin(
        name: &str,
        decimal_separator: &str,
        group_separator: &str,
        currency_symbol: &str,
        currency_decimal_digits: usize,
        currency_pattern: CurrencyPattern,
        percent_spacing: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            decimal_separator: decimal_separator.to_string(),
            group_separator: group_separator.to_string(),
            group_size: 3,
            negative_sign: "-".to_string(),
            number_decimal_digits: 2,
            currency_symbol: currency_symbol.to_string(),
            currency_decimal_digits,
            currency_pattern,
            percent_spacing: percent_spacing.to_string(),
        }
    }

    /// Resolve a culture name to its conventions
    ///
    /// Names are matched case-insensitively and `_` is accepted in place of
    /// `-`. A neutral name such as `de` resolves to the first specific culture
    /// of that language. The empty name resolves to [`Culture::invariant`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use useful_extensions::culture::Culture;
    ///
    /// let culture = Culture::get("en-us").unwrap();
    /// assert_eq!(culture.currency_symbol, "$");
    /// assert!(Culture::get("xx-YY").is_err());
    /// ```
    pub fn get(name: &str) -> Result<Self> {
        let wanted = name.trim().replace('_', "-").to_ascii_lowercase();

        let exact = BUILTIN_CULTURES
            .iter()
            .find(|culture| culture.name.to_ascii_lowercase() == wanted);
        let neutral = || {
            let prefix = format!("{wanted}-");
            BUILTIN_CULTURES
                .iter()
                .find(|culture| !wanted.is_empty() && culture.name.to_ascii_lowercase().starts_with(&prefix))
        };

        exact.or_else(neutral).cloned().ok_or_else(|| {
            debug!("Unable to resolve culture '{}'", name);
            Error::UnknownCulture(name.to_string())
        })
    }

    /// Names of all built-in cultures
    pub fn builtin_names() -> Vec<&'static str> {
        BUILTIN_CULTURES.iter().map(|culture| culture.name.as_str()).collect()
    }

    /// Check whether this is the invariant culture
    pub fn is_invariant(&self) -> bool {
        self.name.is_empty()
    }

    /// Render `value` with a fixed number of fractional digits
    ///
    /// Rounds the decimal digits of `value` half away from zero, so `1.005`
    /// becomes `1.01` at two places. Digit groups are inserted when `grouped`
    /// is set. A value that rounds to zero carries no sign.
    pub fn format_number(&self, value: f64, decimals: usize, grouped: bool) -> String {
        self.render_number(value, 0, decimals, grouped)
    }

    /// Render an integer padded with zeros to at least `min_digits` digits
    pub fn format_integer(&self, value: i128, min_digits: usize) -> String {
        let digits = format!("{:0width$}", value.unsigned_abs(), width = min_digits);
        if value < 0 {
            format!("{}{}", self.negative_sign, digits)
        } else {
            digits
        }
    }

    /// Render `value` as a currency amount
    ///
    /// Uses the culture's currency digits unless `decimals` overrides them.
    pub fn format_currency(&self, value: f64, decimals: Option<usize>) -> String {
        let decimals = decimals.unwrap_or(self.currency_decimal_digits);
        let (negative, digits) = self.unsigned_digits(value, 0, decimals, true);
        let symbol = &self.currency_symbol;

        let amount = match self.currency_pattern {
            CurrencyPattern::SymbolBefore => format!("{symbol}{digits}"),
            CurrencyPattern::SymbolAfter => format!("{digits}{symbol}"),
            CurrencyPattern::SymbolBeforeSpace => format!("{symbol}{NBSP}{digits}"),
            CurrencyPattern::SymbolAfterSpace => format!("{digits}{NBSP}{symbol}"),
        };

        if negative {
            format!("{}{}", self.negative_sign, amount)
        } else {
            amount
        }
    }

    /// Render a ratio as a percentage (`0.125` becomes `12.50%`)
    pub fn format_percent(&self, value: f64, decimals: Option<usize>) -> String {
        let decimals = decimals.unwrap_or(self.number_decimal_digits);
        format!(
            "{}{}%",
            self.render_number(value, 2, decimals, true),
            self.percent_spacing
        )
    }

    /// Render a float the way an unformatted placeholder shows it
    pub fn format_general(&self, value: f64) -> String {
        value.to_string().replace('.', &self.decimal_separator)
    }

    fn render_number(&self, value: f64, shift: usize, decimals: usize, grouped: bool) -> String {
        let (negative, digits) = self.unsigned_digits(value, shift, decimals, grouped);
        if negative {
            format!("{}{}", self.negative_sign, digits)
        } else {
            digits
        }
    }

    fn unsigned_digits(&self, value: f64, shift: usize, decimals: usize, grouped: bool) -> (bool, String) {
        let (negative, integral, fraction) = round_half_away(value, shift, decimals);

        let mut digits = if grouped {
            group_digits(&integral, &self.group_separator, self.group_size)
        } else {
            integral
        };
        if !fraction.is_empty() {
            digits.push_str(&self.decimal_separator);
            digits.push_str(&fraction);
        }

        (negative, digits)
    }
}

impl Default for Culture {
    fn default() -> Self {
        Self::invariant()
    }
}

/// Round `value * 10^shift` half away from zero to `decimals` places
///
/// Works on the shortest decimal text of the float rather than on the float
/// itself, so a written midpoint such as `1.005` rounds like a decimal would.
/// Returns the sign and the integral and fractional digits.
fn round_half_away(value: f64, shift: usize, decimals: usize) -> (bool, String, String) {
    if !value.is_finite() {
        return (false, value.to_string(), String::new());
    }

    // f64 Display never uses an exponent
    let text = value.abs().to_string();
    let (integral, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let mut digits: Vec<u8> = integral
        .bytes()
        .chain(fraction.bytes())
        .map(|b| b - b'0')
        .collect();
    let mut point = integral.len() + shift;
    if digits.len() < point {
        digits.resize(point, 0);
    }

    let keep = point + decimals;
    let round_up = digits.get(keep).is_some_and(|d| *d >= 5);
    digits.resize(keep, 0);
    if round_up {
        let mut i = keep;
        loop {
            if i == 0 {
                digits.insert(0, 1);
                point += 1;
                break;
            }
            i -= 1;
            if digits[i] == 9 {
                digits[i] = 0;
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    let negative = value < 0.0 && digits.iter().any(|d| *d != 0);
    let to_text = |ds: &[u8]| ds.iter().map(|d| char::from(b'0' + d)).collect::<String>();
    let mut integral = to_text(&digits[..point]).trim_start_matches('0').to_string();
    if integral.is_empty() {
        integral.push('0');
    }

    (negative, integral, to_text(&digits[point..]))
}

fn group_digits(integral: &str, separator: &str, size: usize) -> String {
    if size == 0 || integral.len() <= size {
        return integral.to_string();
    }

    let bytes = integral.as_bytes();
    let head = bytes.len() % size;
    let mut groups: Vec<&str> = Vec::with_capacity(bytes.len() / size + 1);
    if head > 0 {
        groups.push(&integral[..head]);
    }
    let mut start = head;
    while start < bytes.len() {
        groups.push(&integral[start..start + size]);
        start += size;
    }

    groups.join(separator)
}
