use serde::{Deserialize, Serialize};

/// Statistics about a compression pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompressionStats {
    /// Number of files compressed
    pub files: usize,

    /// Number of files whose skeleton came out empty
    pub empty_files: usize,

    /// Number of skeletons marked degraded by a partial parse
    pub degraded_files: usize,

    /// Total bytes of the full-detail renderings
    pub detail_bytes: usize,

    /// Total bytes of the skeleton texts
    pub skeleton_bytes: usize,
}

impl CompressionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one compressed file
    pub fn add_file(&mut self, detail_len: usize, skeleton_len: usize, degraded: bool) {
        self.files += 1;
        self.detail_bytes += detail_len;
        self.skeleton_bytes += skeleton_len;
        if skeleton_len == 0 {
            self.empty_files += 1;
        }
        if degraded {
            self.degraded_files += 1;
        }
    }

    /// Achieved size reduction in [0,1]; 0.0 when nothing was rendered
    #[must_use]
    pub fn ratio(&self) -> f64 {
        if self.detail_bytes == 0 {
            return 0.0;
        }
        1.0 - self.skeleton_bytes as f64 / self.detail_bytes as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio() {
        let mut stats = CompressionStats::new();
        stats.add_file(1000, 200, false);
        assert!((stats.ratio() - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_counts() {
        let mut stats = CompressionStats::new();
        stats.add_file(100, 0, false);
        stats.add_file(100, 30, true);
        assert_eq!(stats.files, 2);
        assert_eq!(stats.empty_files, 1);
        assert_eq!(stats.degraded_files, 1);
    }

    #[test]
    fn test_empty_ratio() {
        assert_eq!(CompressionStats::new().ratio(), 0.0);
    }
}
