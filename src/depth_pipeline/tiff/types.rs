//! TIFF depth configuration types

/// Strip size recommended by the TIFF 6.0 specification.
pub const DEFAULT_STRIP_TARGET_BYTES: usize = 8 * 1024;

/// Configuration for depth TIFF encoding
#[derive(Debug, Clone)]
pub struct TiffConfig {
    /// Target uncompressed size of one strip in bytes.
    /// A strip always holds at least one full row, so rows wider than this
    /// produce one strip per row.
    pub strip_target_bytes: usize,
    /// Upper bound on rows per strip, applied after the byte target
    pub max_rows_per_strip: Option<u32>,
}

impl Default for TiffConfig {
    fn default() -> Self {
        Self {
            strip_target_bytes: DEFAULT_STRIP_TARGET_BYTES,
            max_rows_per_strip: None,
        }
    }
}

impl TiffConfig {
    pub fn builder() -> TiffConfigBuilder {
        TiffConfigBuilder::default()
    }
}

/// Builder for TiffConfig
#[derive(Default)]
pub struct TiffConfigBuilder {
    strip_target_bytes: Option<usize>,
    max_rows_per_strip: Option<Option<u32>>,
}

impl TiffConfigBuilder {
    pub fn strip_target_bytes(mut self, bytes: usize) -> Self {
        self.strip_target_bytes = Some(bytes);
        self
    }

    pub fn max_rows_per_strip(mut self, rows: Option<u32>) -> Self {
        self.max_rows_per_strip = Some(rows);
        self
    }

    pub fn build(self) -> TiffConfig {
        let default = TiffConfig::default();
        TiffConfig {
            strip_target_bytes: self.strip_target_bytes.unwrap_or(default.strip_target_bytes),
            max_rows_per_strip: self.max_rows_per_strip.unwrap_or(default.max_rows_per_strip),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = TiffConfig::builder()
            .strip_target_bytes(1024)
            .max_rows_per_strip(Some(16))
            .build();

        assert_eq!(config.strip_target_bytes, 1024);
        assert_eq!(config.max_rows_per_strip, Some(16));
    }

    #[test]
    fn test_builder_defaults() {
        let config = TiffConfig::builder().build();
        assert_eq!(config.strip_target_bytes, DEFAULT_STRIP_TARGET_BYTES);
        assert_eq!(config.max_rows_per_strip, None);
    }
}
