//! Log output with secrets masked.

use regex::Regex;
use std::borrow::Cow;
use std::io::{self, Write};
use std::sync::Arc;
use tracing_subscriber::{prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "sightseer_core=info,sightseer_transport_telegram=info,sightseer_telegram_bot=info,teloxide=info,hyper=warn,h2=error,reqwest=warn,tokio=warn";

/// Regex patterns for redacting sensitive data
pub struct RedactionPatterns {
    rules: Vec<(Regex, &'static str)>,
}

impl RedactionPatterns {
    /// Compile all patterns.
    ///
    /// # Errors
    ///
    /// Returns an error if any regex pattern is invalid
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            rules: vec![
                // Bot API URLs
                (
                    Regex::new(r"(https?://[^/]+/bot)([0-9]+:[A-Za-z0-9_-]+)(/['\s]*)")?,
                    "$1[TELEGRAM_TOKEN]$3",
                ),
                // Bare tokens
                (
                    Regex::new(r"([0-9]{8,10}:[A-Za-z0-9_-]{35})")?,
                    "[TELEGRAM_TOKEN]",
                ),
                (
                    Regex::new(r"(bot[0-9]{8,10}:)[A-Za-z0-9_-]+")?,
                    "$1[TELEGRAM_TOKEN]",
                ),
                // Basic auth embedded in the backend URL
                (
                    Regex::new(r"(https?://)[^/\s:@]+:[^/\s@]+@")?,
                    "$1[CREDENTIALS]@",
                ),
            ],
        })
    }

    /// Apply every rule to `input`.
    pub fn redact<'a>(&self, input: &'a str) -> Cow<'a, str> {
        let mut output = Cow::Borrowed(input);
        for (pattern, replacement) in &self.rules {
            let replaced = match pattern.replace_all(&output, *replacement) {
                Cow::Owned(replaced) => Some(replaced),
                Cow::Borrowed(_) => None,
            };
            if let Some(replaced) = replaced {
                output = Cow::Owned(replaced);
            }
        }
        output
    }
}

struct RedactingWriter<W: Write> {
    inner: W,
    patterns: Arc<RedactionPatterns>,
}

impl<W: Write> RedactingWriter<W> {
    const fn new(inner: W, patterns: Arc<RedactionPatterns>) -> Self {
        Self { inner, patterns }
    }
}

impl<W: Write> Write for RedactingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s = String::from_utf8_lossy(buf);
        let redacted = self.patterns.redact(&s);
        self.inner.write_all(redacted.as_bytes())?;
        // The caller's buffer counts as consumed even when redaction changes the length.
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

struct RedactingMakeWriter<F> {
    make_inner: F,
    patterns: Arc<RedactionPatterns>,
}

impl<'a, F, W> tracing_subscriber::fmt::MakeWriter<'a> for RedactingMakeWriter<F>
where
    F: Fn() -> W + 'static,
    W: Write,
{
    type Writer = RedactingWriter<W>;

    fn make_writer(&'a self) -> Self::Writer {
        RedactingWriter::new((self.make_inner)(), self.patterns.clone())
    }
}

/// Install the global subscriber writing redacted logs to stderr.
///
/// `RUST_LOG` wins when set; otherwise `DEBUG_MODE=true` (or `1`) logs
/// everything at debug level and the default is a per-crate filter.
pub fn init_logging(patterns: Arc<RedactionPatterns>) {
    let make_writer = RedactingMakeWriter {
        make_inner: io::stderr,
        patterns,
    };

    let debug_mode = std::env::var("DEBUG_MODE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);
    let fallback = if debug_mode { "debug" } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(make_writer))
        .init();
}
