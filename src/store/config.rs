//! Store configuration

/// Configuration for a pool store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum number of concurrently resident pools
    pub max_pools: usize,
    /// Consecutive zero-byte reads tolerated by the exact-size fill
    /// loop; `None` removes the guard
    pub zero_read_limit: Option<u32>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_pools: crate::defaults::MAX_POOLS,
            zero_read_limit: Some(crate::defaults::ZERO_READ_LIMIT),
        }
    }
}

impl StoreConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pool table capacity
    pub fn with_max_pools(mut self, max_pools: usize) -> Self {
        self.max_pools = max_pools;
        self
    }

    /// Set or remove the zero-read guard
    pub fn with_zero_read_limit(mut self, limit: Option<u32>) -> Self {
        self.zero_read_limit = limit;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::PoolStoreError;
        use crate::pool::Handle;

        if self.max_pools == 0 {
            return Err(PoolStoreError::invalid_parameter(
                "max_pools",
                "Pool table needs at least one slot",
            ));
        }

        if self.max_pools > Handle::MAX as usize {
            return Err(PoolStoreError::invalid_parameter(
                "max_pools",
                "Pool table capacity exceeds the handle range",
            ));
        }

        if self.zero_read_limit == Some(0) {
            return Err(PoolStoreError::invalid_parameter(
                "zero_read_limit",
                "Zero-read limit of 0 would reject every fill",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = StoreConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_pools, crate::defaults::MAX_POOLS);
    }

    #[test]
    fn test_builder_chain() {
        let config = StoreConfig::new()
            .with_max_pools(4)
            .with_zero_read_limit(None);
        assert_eq!(config.max_pools, 4);
        assert_eq!(config.zero_read_limit, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(StoreConfig::new().with_max_pools(0).validate().is_err());
        assert!(StoreConfig::new().with_max_pools(300).validate().is_err());
        assert!(StoreConfig::new()
            .with_zero_read_limit(Some(0))
            .validate()
            .is_err());
    }
}
