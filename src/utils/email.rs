//! Email address validation
//!
//! Validation is best-effort: every failure, including a blown deadline,
//! is reported as `false` and never as an error.
//!
//! The steps are:
//!
//! 1. reject an absent or empty value
//! 2. split on `@` and require exactly two parts
//! 3. IDNA-normalise the domain to ASCII (bracketed address literals pass through)
//! 4. match `local@ascii-domain` against the address grammar
//!
//! Steps 3 and 4 run on a worker thread, each under its own deadline.

use regex::Regex;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender};
use std::sync::LazyLock;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// Quoted or dot-atom local part, then an address literal or a dotted domain
/// ending in a 2-24 character top-level label.
const EMAIL_PATTERN: &str = r##"(?i)^(?:"(?:.*[^\\])"|[0-9a-z](?:(?:\.?[-!#$%&'*+/=?^`{}|~\w])*\.?[0-9a-z])?)@(?:\[(?:\d{1,3}\.){3}\d{1,3}\]|(?:[0-9a-z][-\w]*[0-9a-z]*\.)+[a-z0-9][-a-z0-9]{0,22}[a-z0-9])$"##;

static EMAIL_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(EMAIL_PATTERN).ok());

/// Email validator with configurable deadlines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmailValidator {
    /// Deadline for IDNA normalisation of the domain
    pub normalize_timeout: Duration,
    /// Deadline for matching the address grammar
    pub match_timeout: Duration,
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self {
            normalize_timeout: Duration::from_millis(200),
            match_timeout: Duration::from_millis(250),
        }
    }
}

impl EmailValidator {
    /// Create a validator with the default deadlines
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the normalisation deadline
    #[must_use]
    pub const fn with_normalize_timeout(mut self, timeout: Duration) -> Self {
        self.normalize_timeout = timeout;
        self
    }

    /// Set the matching deadline
    #[must_use]
    pub const fn with_match_timeout(mut self, timeout: Duration) -> Self {
        self.match_timeout = timeout;
        self
    }

    /// Check whether `value` is shaped like an email address
    ///
    /// Both steps run on one short-lived worker thread per call.
    pub fn is_valid(&self, value: Option<&str>) -> bool {
        let Some(value) = value.filter(|v| !v.is_empty()) else {
            return false;
        };

        let parts: Vec<&str> = value.split('@').collect();
        let [local, domain] = parts.as_slice() else {
            return false;
        };
        let Some(regex) = EMAIL_REGEX.as_ref() else {
            return false;
        };

        let local = local.to_string();
        let domain = domain.to_string();
        let Some(steps) = spawn_worker(move |tx| {
            let ascii_domain = to_ascii_domain(&domain);
            if tx.send(Step::Normalized(ascii_domain.is_some())).is_err() {
                return;
            }
            if let Some(ascii_domain) = ascii_domain {
                let candidate = format!("{local}@{ascii_domain}");
                // The receiver is gone once a deadline passed
                let _ = tx.send(Step::Matched(regex.is_match(&candidate)));
            }
        }) else {
            return false;
        };

        if await_step(&steps, "normalize", self.normalize_timeout) != Some(Step::Normalized(true)) {
            return false;
        }
        await_step(&steps, "match", self.match_timeout) == Some(Step::Matched(true))
    }
}

/// Check whether `value` is shaped like an email address, with the default deadlines
///
/// Each call starts one worker thread; see [`EmailValidator::is_valid`].
///
/// # Example
///
/// ```rust
/// use useful_extensions::utils::email::is_email;
///
/// assert!(is_email(Some("user@example.com")));
/// assert!(is_email(Some("jose@bücher.de")));
/// assert!(!is_email(Some("not-an-email")));
/// assert!(!is_email(Some("")));
/// assert!(!is_email(None));
/// ```
pub fn is_email(value: Option<&str>) -> bool {
    EmailValidator::default().is_valid(value)
}

/// Progress reported by the validation worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Normalized(bool),
    Matched(bool),
}

/// UTS #46 ASCII form of `domain`; bracketed address literals pass through
///
/// No percent-decoding happens here, so `%` reaches the grammar and fails it.
fn to_ascii_domain(domain: &str) -> Option<String> {
    if domain.starts_with('[') && domain.ends_with(']') {
        return Some(domain.to_string());
    }
    match idna::domain_to_ascii(domain) {
        Ok(ascii) => Some(ascii),
        Err(e) => {
            debug!("Domain '{}' failed IDNA normalisation: {:?}", domain, e);
            None
        }
    }
}

/// Start `job` on a worker thread that reports through a bounded channel
///
/// The worker is detached: once the caller stops listening, its remaining
/// sends fail and it finishes on its own.
fn spawn_worker<T, F>(job: F) -> Option<Receiver<T>>
where
    T: Send + 'static,
    F: FnOnce(SyncSender<T>) + Send + 'static,
{
    let (tx, rx) = mpsc::sync_channel(2);
    match thread::Builder::new()
        .name("email-validate".to_string())
        .spawn(move || job(tx))
    {
        Ok(_) => Some(rx),
        Err(e) => {
            warn!("Unable to start email validation worker: {}", e);
            None
        }
    }
}

/// Wait at most `timeout` for the worker's next report
fn await_step<T>(rx: &Receiver<T>, stage: &str, timeout: Duration) -> Option<T> {
    match rx.recv_timeout(timeout) {
        Ok(step) => Some(step),
        Err(RecvTimeoutError::Timeout) => {
            warn!("Email {} step exceeded its {:?} deadline", stage, timeout);
            None
        }
        Err(RecvTimeoutError::Disconnected) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_pattern_compiles() {
        assert!(EMAIL_REGEX.is_some());
    }

    #[test]
    fn test_valid_addresses() {
        for address in [
            "user@example.com",
            "first.last@example.co.uk",
            "x@example.io",
            "user+tag@sub.example.org",
            "o'brien@example.ie",
            "USER@EXAMPLE.COM",
            "user_name@my-domain.com",
            "\"john smith\"@example.com",
            "user@[192.168.0.1]",
            "user@xn--bcher-kva.de",
            "user@bücher.de",
        ] {
            assert!(is_email(Some(address)), "should accept {address}");
        }
    }

    #[test]
    fn test_invalid_addresses() {
        for address in [
            "not-an-email",
            "",
            "@example.com",
            "user@",
            "user@@example.com",
            "a@b@example.com",
            "user@localhost",
            "user@example.c",
            ".user@example.com",
            "user.@example.com",
            "us..er@example.com",
            "user@exa mple.com",
            "user@example.toolongtopleveldomainnameexceeding",
            "-user@example.com",
            "user@ex%61mple.com",
            "user@%65xample.com",
        ] {
            assert!(!is_email(Some(address)), "should reject {address}");
        }
        assert!(!is_email(None));
    }

    #[test]
    fn test_pathological_input_is_rejected_quickly() {
        let local = "a".repeat(5_000);
        let domain = format!("{}!", "a.".repeat(5_000));
        let address = format!("{local}@{domain}");

        let started = Instant::now();
        assert!(!is_email(Some(&address)));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_percent_escapes_are_not_decoded() {
        assert_eq!(to_ascii_domain("ex%61mple.com").as_deref(), Some("ex%61mple.com"));
        assert_eq!(to_ascii_domain("Bücher.DE").as_deref(), Some("xn--bcher-kva.de"));
        assert_eq!(to_ascii_domain("[10.0.0.1]").as_deref(), Some("[10.0.0.1]"));
    }

    #[test]
    fn test_worker_steps_have_separate_deadlines() {
        let steps = spawn_worker(|tx| {
            let _ = tx.send(Step::Normalized(true));
            thread::sleep(Duration::from_millis(500));
            let _ = tx.send(Step::Matched(true));
        })
        .unwrap();

        assert_eq!(
            await_step(&steps, "normalize", Duration::from_secs(5)),
            Some(Step::Normalized(true))
        );
        assert_eq!(await_step(&steps, "match", Duration::from_millis(10)), None);
    }

    #[test]
    fn test_worker_that_stops_early() {
        let steps = spawn_worker(|tx| {
            let _ = tx.send(Step::Normalized(false));
        })
        .unwrap();

        assert_eq!(
            await_step(&steps, "normalize", Duration::from_secs(5)),
            Some(Step::Normalized(false))
        );
        assert_eq!(await_step(&steps, "match", Duration::from_secs(5)), None);
    }

    #[test]
    fn test_zero_deadline_rejects() {
        let validator = EmailValidator::new()
            .with_normalize_timeout(Duration::ZERO)
            .with_match_timeout(Duration::ZERO);
        let address = format!("{}@{}.com", "a".repeat(100), "b".repeat(200_000));
        assert!(!validator.is_valid(Some(&address)));
    }

    #[test]
    fn test_custom_deadlines() {
        let validator = EmailValidator::new()
            .with_normalize_timeout(Duration::from_secs(1))
            .with_match_timeout(Duration::from_secs(1));
        assert_eq!(validator.normalize_timeout, Duration::from_secs(1));
        assert!(validator.is_valid(Some("user@example.com")));
    }
}
