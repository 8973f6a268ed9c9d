pub mod count_up;
pub mod host;
pub mod scheduler;

pub use count_up::CountUp;
pub use host::{use_reveal, RevealHost};
pub use scheduler::RevealEffect;
