//! Inline button payloads.
//!
//! Payloads are plain strings so they fit Telegram's 64-byte callback limit:
//! `page_{P}` switches to page `P`, `attraction_{P}_{I}` opens slot `I` of
//! page `P`.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const PAGE_PREFIX: &str = "page_";
const SELECT_PREFIX: &str = "attraction_";

/// Action encoded in an inline button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    /// Show the given page; out of range values are clamped when applied.
    Page(i64),
    /// Open the attraction at `slot` of `page`.
    Select {
        /// Page the button was rendered on
        page: usize,
        /// Position on that page, starting at 0
        slot: usize,
    },
}

/// Payload that does not describe a known action.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CallbackParseError {
    /// Payload did not start with a known prefix
    #[error("unknown callback payload: {0:?}")]
    UnknownAction(String),
    /// Prefix was known but the numbers were not
    #[error("malformed callback payload: {0:?}")]
    Malformed(String),
}

impl CallbackAction {
    /// Payload string to attach to a button.
    #[must_use]
    pub fn to_payload(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CallbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(page) => write!(f, "{PAGE_PREFIX}{page}"),
            Self::Select { page, slot } => write!(f, "{SELECT_PREFIX}{page}_{slot}"),
        }
    }
}

impl FromStr for CallbackAction {
    type Err = CallbackParseError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let malformed = || CallbackParseError::Malformed(data.to_string());

        if let Some(page) = data.strip_prefix(PAGE_PREFIX) {
            return page.parse().map(Self::Page).map_err(|_| malformed());
        }

        if let Some(rest) = data.strip_prefix(SELECT_PREFIX) {
            let (page, slot) = rest.split_once('_').ok_or_else(malformed)?;
            return Ok(Self::Select {
                page: page.parse().map_err(|_| malformed())?,
                slot: slot.parse().map_err(|_| malformed())?,
            });
        }

        Err(CallbackParseError::UnknownAction(data.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_format() {
        assert_eq!(CallbackAction::Page(3).to_payload(), "page_3");
        assert_eq!(
            CallbackAction::Select { page: 2, slot: 4 }.to_payload(),
            "attraction_2_4"
        );
    }

    #[test]
    fn test_parse_known_actions() {
        assert_eq!("page_0".parse::<CallbackAction>(), Ok(CallbackAction::Page(0)));
        assert_eq!("page_-1".parse::<CallbackAction>(), Ok(CallbackAction::Page(-1)));
        assert_eq!(
            "attraction_1_3".parse::<CallbackAction>(),
            Ok(CallbackAction::Select { page: 1, slot: 3 })
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            "page_x".parse::<CallbackAction>(),
            Err(CallbackParseError::Malformed(_))
        ));
        assert!(matches!(
            "attraction_7".parse::<CallbackAction>(),
            Err(CallbackParseError::Malformed(_))
        ));
        assert!(matches!(
            "attraction_1_-2".parse::<CallbackAction>(),
            Err(CallbackParseError::Malformed(_))
        ));
        assert!(matches!(
            "open_settings".parse::<CallbackAction>(),
            Err(CallbackParseError::UnknownAction(_))
        ));
        assert!(matches!(
            "".parse::<CallbackAction>(),
            Err(CallbackParseError::UnknownAction(_))
        ));
    }

    #[test]
    fn test_longest_payload_fits_telegram_limit() {
        let payload = CallbackAction::Select {
            page: usize::MAX,
            slot: usize::MAX,
        }
        .to_payload();
        assert!(payload.len() <= 64);
    }
}
