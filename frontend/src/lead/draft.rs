use crate::lead::error::LeadError;

/// Form fields in the order they appear on the page, in the mail body
/// and in the intake payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LeadField {
    Organization,
    ContactName,
    Phone,
    City,
    Activity,
    Message,
}

impl LeadField {
    pub const ALL: [LeadField; 6] = [
        LeadField::Organization,
        LeadField::ContactName,
        LeadField::Phone,
        LeadField::City,
        LeadField::Activity,
        LeadField::Message,
    ];

    pub const REQUIRED: [LeadField; 5] = [
        LeadField::Organization,
        LeadField::ContactName,
        LeadField::Phone,
        LeadField::City,
        LeadField::Activity,
    ];

    /// The label shown next to the input. The intake service receives the
    /// same strings as JSON keys.
    pub fn label(self) -> &'static str {
        match self {
            LeadField::Organization => "Организация",
            LeadField::ContactName => "ФИО",
            LeadField::Phone => "Телефон",
            LeadField::City => "Город",
            LeadField::Activity => "Вид деятельности",
            LeadField::Message => "Сообщение",
        }
    }

    pub fn is_required(self) -> bool {
        self != LeadField::Message
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormDraft {
    pub organization: String,
    pub contact_name: String,
    pub phone: String,
    pub city: String,
    pub activity: String,
    pub message: String,
}

impl FormDraft {
    pub fn get(&self, field: LeadField) -> &str {
        match field {
            LeadField::Organization => &self.organization,
            LeadField::ContactName => &self.contact_name,
            LeadField::Phone => &self.phone,
            LeadField::City => &self.city,
            LeadField::Activity => &self.activity,
            LeadField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: LeadField, value: impl Into<String>) {
        let slot = match field {
            LeadField::Organization => &mut self.organization,
            LeadField::ContactName => &mut self.contact_name,
            LeadField::Phone => &mut self.phone,
            LeadField::City => &mut self.city,
            LeadField::Activity => &mut self.activity,
            LeadField::Message => &mut self.message,
        };
        *slot = value.into();
    }

    /// Required fields that are empty or whitespace only.
    pub fn missing_fields(&self) -> Vec<LeadField> {
        LeadField::REQUIRED
            .into_iter()
            .filter(|field| self.get(*field).trim().is_empty())
            .collect()
    }

    pub fn validate(&self) -> Result<(), LeadError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(LeadError::Validation { missing })
        }
    }

    pub fn message(&self) -> Option<&str> {
        let message = self.message.trim();
        (!message.is_empty()).then_some(message)
    }
}

#[cfg(test)]
pub(crate) fn filled() -> FormDraft {
    let mut draft = FormDraft::default();
    draft.set(LeadField::Organization, "ООО Тест");
    draft.set(LeadField::ContactName, "Иванов");
    draft.set(LeadField::Phone, "+7 900 000-00-00");
    draft.set(LeadField::City, "Москва");
    draft.set(LeadField::Activity, "Подрядчик");
    draft
}
