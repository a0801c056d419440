// Crisis term detection and delayed supportive messages

mod detector;
pub mod monitor;

pub use detector::{CrisisDetector, CrisisTerms, DEFAULT_CRISIS_TERMS};
pub use monitor::{SafetyMonitor, DEFAULT_SUPPORT_DELAY, SUPPORT_MESSAGE};
