
#[cfg(debug_assertions)]
pub fn get_intake_url() -> &'static str {
    "http://localhost:3001/api/leads"  // Local intake stub while developing
}

#[cfg(not(debug_assertions))]
pub fn get_intake_url() -> &'static str {
    "https://formsubmit.co/ajax/info@stroycontrol.app"
}

pub const LEAD_RECIPIENT: &str = "info@stroycontrol.app";
pub const CONTACT_PHONE: &str = "+7 (921) 957-50-77";
pub const CONTACT_PHONE_HREF: &str = "tel:+79219575077";
pub const TELEGRAM_HANDLE: &str = "@stroycontrol_imaster";

// Primary request is abandoned after this and the mail fallback takes over.
pub const INTAKE_TIMEOUT_MS: u32 = 15_000;

pub const REVEAL_THRESHOLD: f64 = 0.2;
pub const COUNT_UP_DURATION_MS: u32 = 2_000;
pub const COUNT_UP_TICK_MS: u32 = 16;
