//! Splitter configuration.

/// Resources larger than this many bytes are split (11 KiB).
pub const DEFAULT_SIZE_LIMIT: u64 = 11 * 1024;

/// Prefix of the rewritten manifest's file name.
pub const DEFAULT_MANIFEST_PREFIX: &str = "split_";

/// Configuration for splitting the resources of a manifest.
#[derive(Debug, Clone)]
pub struct SplitterConfig {
    /// Byte size above which a resource is split.
    pub size_limit: u64,
    /// Delete each split resource once its chunks are written.
    pub delete_originals: bool,
    /// The rewritten manifest is written as `<prefix><manifest file name>`.
    pub manifest_prefix: String,
    /// Split resources on the rayon thread pool (needs the `parallel` feature).
    pub parallel: bool,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            size_limit: DEFAULT_SIZE_LIMIT,
            delete_originals: false,
            manifest_prefix: DEFAULT_MANIFEST_PREFIX.to_string(),
            parallel: true,
        }
    }
}

impl SplitterConfig {
    /// Use a different size threshold. A zero limit is raised to one byte.
    pub fn with_size_limit(mut self, size_limit: u64) -> Self {
        self.size_limit = size_limit.max(1);
        self
    }

    /// Delete the original resources after splitting.
    pub fn with_delete_originals(mut self, delete: bool) -> Self {
        self.delete_originals = delete;
        self
    }

    /// Use a different prefix for the rewritten manifest.
    pub fn with_manifest_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.manifest_prefix = prefix.into();
        self
    }

    /// Enable or disable splitting resources in parallel.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Number of chunks a resource of `size` bytes should be split into.
    pub fn splits_required(&self, size: u64) -> usize {
        size.div_ceil(self.size_limit.max(1)) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SplitterConfig::default();
        assert_eq!(config.size_limit, 11264);
        assert!(!config.delete_originals);
        assert_eq!(config.manifest_prefix, "split_");
    }

    #[test]
    fn test_splits_required() {
        let config = SplitterConfig::default().with_size_limit(100);
        assert_eq!(config.splits_required(101), 2);
        assert_eq!(config.splits_required(200), 2);
        assert_eq!(config.splits_required(201), 3);
    }

    #[test]
    fn test_zero_limit() {
        let config = SplitterConfig::default().with_size_limit(0);
        assert_eq!(config.size_limit, 1);
        assert_eq!(config.splits_required(5), 5);
    }
}
