use thiserror::Error;

use crate::lead::draft::LeadField;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeadError {
    #[error("required fields are empty: {}", labels(.missing))]
    Validation { missing: Vec<LeadField> },
    #[error("a submission is already being sent")]
    InFlight,
    #[error("the form was already submitted, reset it to send another")]
    AlreadySubmitted,
    #[error("nothing to reset, the form has not been submitted")]
    NotSubmitted,
}

/// Why the primary intake channel did not take the lead. Never shown to the
/// user; the mail fallback covers every variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("could not encode intake payload: {0}")]
    Encode(String),
    #[error("intake request failed: {0}")]
    Network(String),
    #[error("intake responded with status {0}")]
    Status(u16),
    #[error("intake did not answer within {0} ms")]
    Timeout(u32),
}

fn labels(fields: &[LeadField]) -> String {
    fields
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}
