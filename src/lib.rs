pub mod error;
pub mod frame;


// Re-export the core types for easy access
pub use error::FrameError;
pub use frame::{Frame, MessageId, validate_record};
