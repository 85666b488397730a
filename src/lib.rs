pub mod acquisition;
pub mod error;
pub mod options;
pub mod output;
pub mod setup;

// Re-export the pieces the binary wires together
pub use acquisition::{RunSummary, run};
pub use error::{AcquisitionError, ValidationError};
pub use options::Options;
