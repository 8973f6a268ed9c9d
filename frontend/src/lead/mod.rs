pub mod channel;
pub mod draft;
pub mod error;
pub mod payload;
pub mod pipeline;

pub use draft::{FormDraft, LeadField};
pub use pipeline::{Delivery, SubmissionPipeline, SubmissionState};
