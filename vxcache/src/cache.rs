use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use vxcache_containers::prelude::InsertOnceMap;

use crate::error::FormatError;
use crate::format::{FormatId, VertexFormat};
use crate::summary::FormatSummary;

/// Sizing of the table backing a [`FormatIndexCache`]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FormatCacheConfig {
    pub initial_capacity: usize,
    /// Rounded up to a power of two, at least 2
    pub shard_amount: usize,
}

impl Default for FormatCacheConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 16,
            shard_amount: 8,
        }
    }
}

impl FormatCacheConfig {
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn with_shard_amount(mut self, shard_amount: usize) -> Self {
        self.shard_amount = shard_amount;
        self
    }
}

/// Memoizes the [`FormatSummary`] of every [`VertexFormat`] it is asked about
///
/// Formats are keyed by identity. Entries are never evicted; a summary keeps its format alive for
/// as long as the cache exists.
#[derive(Debug)]
pub struct FormatIndexCache {
    block: Arc<FormatSummary>,
    formats: InsertOnceMap<FormatId, FormatSummary>,
    scans: AtomicUsize,
}

impl FormatIndexCache {
    pub fn new() -> Result<Self, FormatError> {
        Self::with_config(FormatCacheConfig::default())
    }

    pub fn with_config(config: FormatCacheConfig) -> Result<Self, FormatError> {
        let shard_amount = config.shard_amount.max(2).next_power_of_two();
        Ok(Self {
            block: Arc::new(FormatSummary::build(VertexFormat::block())?),
            formats: InsertOnceMap::with_capacity_and_shard_amount(
                config.initial_capacity,
                shard_amount,
            ),
            scans: AtomicUsize::new(0),
        })
    }

    /// Get the summary of `format`, scanning it on first sight
    ///
    /// A malformed format is never cached; looking it up again scans it again and fails again.
    pub fn lookup(&self, format: &Arc<VertexFormat>) -> Result<Arc<FormatSummary>, FormatError> {
        if Arc::ptr_eq(format, VertexFormat::block()) {
            return Ok(self.block.clone());
        }
        self.formats.get_or_try_insert_with(format.id(), || {
            self.scans.fetch_add(1, Ordering::Relaxed);
            let summary = FormatSummary::build(format)?;
            tracing::trace!(
                "Cached {:?} with {} elements",
                format.id(),
                summary.element_count()
            );
            Ok(summary)
        })
    }

    /// Summary of [`VertexFormat::block`], which bypasses the table
    pub fn block_summary(&self) -> &Arc<FormatSummary> {
        &self.block
    }

    /// Whether the table holds an entry for `format`
    pub fn contains(&self, format: &VertexFormat) -> bool {
        self.formats.contains_key(&format.id())
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    /// # of element list scans done for formats other than the block format, failed ones included
    pub fn scans(&self) -> usize {
        self.scans.load(Ordering::Relaxed)
    }
}
