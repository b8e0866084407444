//! Pure mapping from [`LookupState`] to what the user sees.

use crate::domain::model::{BreachRecord, LookupState};
use std::fmt;

/// Data classes shown per breach; the rest are elided.
pub const DATA_CLASS_PREVIEW: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreachView {
    pub title: String,
    pub breached_on: String,
    pub data_classes: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultView {
    Empty,
    Scanning,
    Secure,
    Compromised { breaches: Vec<BreachView> },
    Error { message: String },
}

pub fn view(state: &LookupState) -> ResultView {
    match state {
        LookupState::Idle => ResultView::Empty,
        LookupState::Pending => ResultView::Scanning,
        LookupState::Succeeded(list) if list.is_empty() => ResultView::Secure,
        LookupState::Succeeded(list) => ResultView::Compromised {
            breaches: list.iter().map(breach_view).collect(),
        },
        LookupState::Failed(message) => ResultView::Error {
            message: message.clone(),
        },
    }
}

fn breach_view(record: &BreachRecord) -> BreachView {
    BreachView {
        title: record.title.clone(),
        breached_on: record.breach_date.format("%B %-d, %Y").to_string(),
        data_classes: record
            .data_classes
            .iter()
            .take(DATA_CLASS_PREVIEW)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", "),
    }
}

impl ResultView {
    pub fn headline(&self) -> Option<&'static str> {
        match self {
            ResultView::Empty => None,
            ResultView::Scanning => Some("Scanning..."),
            ResultView::Secure => Some("✅ Your email is secure"),
            ResultView::Compromised { .. } => Some("⚠️ Your email has been compromised"),
            ResultView::Error { .. } => Some("Error"),
        }
    }
}

impl fmt::Display for ResultView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(headline) = self.headline() else {
            return Ok(());
        };
        writeln!(f, "{}", headline)?;

        match self {
            ResultView::Secure => writeln!(
                f,
                "No breaches found for this email address. We recommend continuing to practice good security habits."
            ),
            ResultView::Compromised { breaches } => {
                writeln!(f, "Your email was found in {} data breaches.", breaches.len())?;
                for breach in breaches {
                    writeln!(f)?;
                    writeln!(f, "  {}", breach.title)?;
                    writeln!(
                        f,
                        "  Breached on: {} • Compromised data: {}",
                        breach.breached_on, breach.data_classes
                    )?;
                }
                Ok(())
            }
            ResultView::Error { message } => writeln!(f, "{}", message),
            ResultView::Empty | ResultView::Scanning => Ok(()),
        }
    }
}
