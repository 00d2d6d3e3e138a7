//! Decoder configuration.

use crate::constants::NUMERIC_SHORT_TEXT_LEN;

/// Options for a decode call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// NUMERIC text shorter than this many characters is parsed as i32
    /// (default: 11).
    pub numeric_text_threshold: usize,
    /// Largest LOB, in bytes, that will be materialized (default: unbounded).
    pub max_lob_length: Option<u64>,
}

impl DecodeOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self {
            numeric_text_threshold: NUMERIC_SHORT_TEXT_LEN,
            max_lob_length: None,
        }
    }

    /// Set the NUMERIC short-text threshold.
    ///
    /// # Example
    ///
    /// ```
    /// use row_decoder::DecodeOptions;
    ///
    /// let options = DecodeOptions::new().with_numeric_text_threshold(10);
    /// assert_eq!(options.numeric_text_threshold, 10);
    /// ```
    pub fn with_numeric_text_threshold(mut self, threshold: usize) -> Self {
        self.numeric_text_threshold = threshold;
        self
    }

    /// Cap the size of a materialized LOB.
    ///
    /// A LOB whose declared length is above the cap fails with
    /// [`Error::LobTooLarge`](crate::Error::LobTooLarge) before any buffer
    /// is allocated.
    pub fn with_max_lob_length(mut self, limit: u64) -> Self {
        self.max_lob_length = Some(limit);
        self
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = DecodeOptions::default();
        assert_eq!(options.numeric_text_threshold, 11);
        assert_eq!(options.max_lob_length, None);
    }

    #[test]
    fn test_builder() {
        let options = DecodeOptions::new()
            .with_numeric_text_threshold(19)
            .with_max_lob_length(1 << 20);
        assert_eq!(options.numeric_text_threshold, 19);
        assert_eq!(options.max_lob_length, Some(1 << 20));
    }
}
