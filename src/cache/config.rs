//! Cache configuration types
//!
//! This module defines configuration structures for the response cache:
//! - Whether caching is enabled at all, and which tiers are used
//! - The root directory of the disk tier (no directory, no disk tier)
//! - Per-namespace overrides of the built-in size ceilings

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::constants::{
    CHART_NAMESPACE_DISK_BYTES, CHART_NAMESPACE_MEMORY_ITEMS, LARGE_NAMESPACE_DISK_BYTES,
    LARGE_NAMESPACE_MEMORY_ITEMS, SMALL_NAMESPACE_DISK_BYTES, SMALL_NAMESPACE_MEMORY_ITEMS,
};

/// Size ceilings of one cache namespace
///
/// Each endpoint family declares its own limits so that a hot endpoint
/// cannot evict another endpoint's entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheLimits {
    /// Maximum bytes on disk before LRU eviction kicks in
    pub disk_max_bytes: u64,
    /// Maximum number of entries held in memory
    pub memory_max_items: u64,
}

impl CacheLimits {
    /// Per-item lookups: details, comments, collections, history
    pub const LARGE: CacheLimits = CacheLimits {
        disk_max_bytes: LARGE_NAMESPACE_DISK_BYTES,
        memory_max_items: LARGE_NAMESPACE_MEMORY_ITEMS,
    };

    /// Paged charts: trending, popular, most watched
    pub const CHART: CacheLimits = CacheLimits {
        disk_max_bytes: CHART_NAMESPACE_DISK_BYTES,
        memory_max_items: CHART_NAMESPACE_MEMORY_ITEMS,
    };

    /// Single documents that are replaced wholesale
    pub const SMALL: CacheLimits = CacheLimits {
        disk_max_bytes: SMALL_NAMESPACE_DISK_BYTES,
        memory_max_items: SMALL_NAMESPACE_MEMORY_ITEMS,
    };

    pub fn validate(&self) -> Result<(), String> {
        if self.disk_max_bytes == 0 {
            return Err("disk_max_bytes must be greater than 0".to_string());
        }
        if self.memory_max_items == 0 {
            return Err("memory_max_items must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Main cache configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Root directory of the disk tier; each namespace gets a subdirectory
    #[serde(default)]
    pub root_dir: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub memory_enabled: bool,
    #[serde(default = "default_true")]
    pub disk_enabled: bool,
    /// Overrides keyed by namespace (endpoint name)
    #[serde(default)]
    pub namespaces: HashMap<String, CacheLimits>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            root_dir: None,
            memory_enabled: true,
            disk_enabled: true,
            namespaces: HashMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

impl CacheConfig {
    /// Memory-only configuration rooted nowhere
    pub fn memory_only() -> Self {
        Self::default()
    }

    /// Memory plus disk tiers rooted at `root_dir`
    pub fn with_root_dir(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: Some(root_dir.into()),
            ..Self::default()
        }
    }

    /// Configuration that never stores anything
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Directory of the disk tier, if that tier is active
    pub fn disk_root(&self) -> Option<&PathBuf> {
        if self.enabled && self.disk_enabled {
            self.root_dir.as_ref()
        } else {
            None
        }
    }

    /// Limits for `namespace`: the configured override, else the endpoint's default
    pub fn limits_for(&self, namespace: &str, default: CacheLimits) -> CacheLimits {
        self.namespaces.get(namespace).copied().unwrap_or(default)
    }

    /// Validate cache configuration
    pub fn validate(&self) -> Result<(), String> {
        if let Some(root) = &self.root_dir {
            if root.as_os_str().is_empty() {
                return Err("cache root_dir cannot be empty".to_string());
            }
        }

        for (namespace, limits) in &self.namespaces {
            if namespace.is_empty() {
                return Err("cache namespace override has an empty name".to_string());
            }
            limits
                .validate()
                .map_err(|e| format!("cache namespace '{}': {}", namespace, e))?;
        }

        Ok(())
    }
}
