//! Decoder limits.

use tally_core::{TallyError, MAX_RECORD_LEN};

/// Limits applied while decoding untrusted input.
///
/// The length prefix is read from the input itself, so it is checked
/// against `max_elements` before any payload is read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodecConfig {
    /// Largest element count a decoded record may declare.
    ///
    /// Default: 268_435_456 (1GB of payload). Must not exceed
    /// [`MAX_RECORD_LEN`].
    pub max_elements: u32,
}

impl CodecConfig {
    /// Default element limit: 2^28 elements.
    pub const DEFAULT_MAX_ELEMENTS: u32 = 1 << 28;

    /// Create a config with the given element limit.
    pub fn new(max_elements: u32) -> Self {
        Self { max_elements }
    }

    /// A config that accepts every length the format can express.
    pub fn unbounded() -> Self {
        Self {
            max_elements: MAX_RECORD_LEN as u32,
        }
    }

    /// Check the limits are representable in the format.
    pub fn validate(&self) -> Result<(), TallyError> {
        if self.max_elements as usize > MAX_RECORD_LEN {
            return Err(TallyError::InvalidArgument {
                detail: format!(
                    "max_elements {} exceeds the format limit of {MAX_RECORD_LEN}",
                    self.max_elements
                )
                .into(),
            });
        }
        Ok(())
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ELEMENTS)
    }
}
