use serde::{Deserialize, Serialize};

/// Configuration for skeleton rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkeletonConfig {
    /// Maximum characters kept from a component description
    pub max_description_chars: usize,

    /// Maximum method lines rendered per class
    pub max_methods_per_class: usize,

    /// Maximum parameter names rendered per function signature
    pub max_params: usize,
}

impl Default for SkeletonConfig {
    fn default() -> Self {
        Self {
            max_description_chars: 60,
            max_methods_per_class: 10,
            max_params: 5,
        }
    }
}

impl SkeletonConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_description_chars == 0 {
            return Err("max_description_chars must be > 0".to_string());
        }
        if self.max_methods_per_class == 0 {
            return Err("max_methods_per_class must be > 0".to_string());
        }
        if self.max_params == 0 {
            return Err("max_params must be > 0".to_string());
        }
        Ok(())
    }
}
