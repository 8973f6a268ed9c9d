use serde::Serialize;

use crate::lead::draft::{FormDraft, LeadField};

/// Rendered in place of an empty message, both in the mail body and in the
/// intake payload.
pub const MESSAGE_PLACEHOLDER: &str = "—";

pub fn subject_for(draft: &FormDraft) -> String {
    format!("Заявка с сайта: {}", draft.organization.trim())
}

fn field_value(draft: &FormDraft, field: LeadField) -> String {
    match field {
        LeadField::Message => draft.message().unwrap_or(MESSAGE_PLACEHOLDER).to_string(),
        other => draft.get(other).trim().to_string(),
    }
}

/// JSON body accepted by the intake service. Keys match the form labels.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct IntakePayload {
    #[serde(rename = "_subject")]
    pub subject: String,
    #[serde(rename = "Организация")]
    pub organization: String,
    #[serde(rename = "ФИО")]
    pub contact_name: String,
    #[serde(rename = "Телефон")]
    pub phone: String,
    #[serde(rename = "Город")]
    pub city: String,
    #[serde(rename = "Вид деятельности")]
    pub activity: String,
    #[serde(rename = "Сообщение")]
    pub message: String,
}

impl From<&FormDraft> for IntakePayload {
    fn from(draft: &FormDraft) -> Self {
        IntakePayload {
            subject: subject_for(draft),
            organization: field_value(draft, LeadField::Organization),
            contact_name: field_value(draft, LeadField::ContactName),
            phone: field_value(draft, LeadField::Phone),
            city: field_value(draft, LeadField::City),
            activity: field_value(draft, LeadField::Activity),
            message: field_value(draft, LeadField::Message),
        }
    }
}

/// A message handed to the visitor's mail client when the intake service
/// is unreachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailHandoff {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl MailHandoff {
    pub fn compose(recipient: &str, draft: &FormDraft) -> Self {
        let body = LeadField::ALL
            .into_iter()
            .map(|field| format!("{}: {}", field.label(), field_value(draft, field)))
            .collect::<Vec<_>>()
            .join("\r\n");

        MailHandoff {
            recipient: recipient.to_string(),
            subject: subject_for(draft),
            body,
        }
    }

    pub fn to_uri(&self) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.recipient,
            urlencoding::encode(&self.subject),
            urlencoding::encode(&self.body),
        )
    }
}
