use thiserror::Error;

/// The primary error type for the `sensor-hub-tools` library.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("invalid frame record: {0}")]
    InvalidFormat(String),

    #[error("length mismatch: declared {declared} payload bytes, got {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    #[error("checksum mismatch: payload sums to {computed:#04x} modulo 256, expected 0x01")]
    ChecksumMismatch { computed: u8 },
}
