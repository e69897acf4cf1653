//! User-facing outcome signals.
//!
//! The presentation layer decides how these become alerts or toasts; core
//! only fixes their meaning and default wording.

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Copied {
        number: String,
    },
    Calling {
        service_name: String,
        phone_number: String,
    },
    InsufficientFunds {
        required: u32,
    },
    /// Prompt shown before a two-phase clear is confirmed.
    ConfirmClear {
        pending: usize,
    },
    Cleared,
    NothingToClear,
}

impl Notification {
    /// Stable machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Copied { .. } => "copied",
            Self::Calling { .. } => "calling",
            Self::InsufficientFunds { .. } => "insufficient_funds",
            Self::ConfirmClear { .. } => "confirm_clear",
            Self::Cleared => "cleared",
            Self::NothingToClear => "nothing_to_clear",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Copied { number } => {
                format!("Number {number} has been copied to clipboard!")
            }
            Self::Calling {
                service_name,
                phone_number,
            } => format!("Calling {service_name} at {phone_number}"),
            Self::InsufficientFunds { required } => format!(
                "Insufficient coins! You need at least {required} coins to make a call."
            ),
            Self::ConfirmClear { .. } => {
                "Are you sure you want to clear all call history?".to_string()
            }
            Self::Cleared => "Call history cleared successfully!".to_string(),
            Self::NothingToClear => "Call history is already empty!".to_string(),
        }
    }
}

impl Display for Notification {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::Notification;

    #[test]
    fn messages_use_outcome_values() {
        assert_eq!(
            Notification::Copied {
                number: "999".into()
            }
            .message(),
            "Number 999 has been copied to clipboard!"
        );
        assert_eq!(
            Notification::Calling {
                service_name: "Police Helpline Number".into(),
                phone_number: "999".into(),
            }
            .to_string(),
            "Calling Police Helpline Number at 999"
        );
        assert_eq!(
            Notification::InsufficientFunds { required: 20 }.message(),
            "Insufficient coins! You need at least 20 coins to make a call."
        );
    }

    #[test]
    fn clear_variants_have_distinct_text_and_kind() {
        assert_ne!(
            Notification::Cleared.message(),
            Notification::NothingToClear.message()
        );
        assert_eq!(Notification::NothingToClear.kind(), "nothing_to_clear");
        assert_eq!(Notification::ConfirmClear { pending: 3 }.kind(), "confirm_clear");
    }
}
