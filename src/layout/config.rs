use super::columns::ColumnStrategy;
use super::locator::MAX_ROW_INTERVAL;
use super::occupancy::MIN_CAPACITY;
use crate::error::{Result, SpanError};

/// Configuration for a span packer instance.
#[derive(Debug, Clone)]
pub struct SpanConfig {
    /// Whether placements are computed at all (default: false)
    pub enabled: bool,
    /// Grid width in columns, 0 = inactive (default: 0)
    pub columns: u32,
    /// Rows to look back when rediscovering gaps (default: 3)
    pub max_row_interval: u32,
    /// Initial occupancy buffer size in cells (default: 50)
    pub initial_capacity: usize,
    /// Preferred column width for viewport-driven column counts (default: none)
    pub column_size: Option<u32>,
    /// Strategy used with `column_size` (default: MinSize)
    pub strategy: ColumnStrategy,
}

impl Default for SpanConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            columns: 0,
            max_row_interval: MAX_ROW_INTERVAL,
            initial_capacity: MIN_CAPACITY,
            column_size: None,
            strategy: ColumnStrategy::default(),
        }
    }
}

impl SpanConfig {
    /// Enabled config with a fixed column count.
    pub fn with_columns(columns: u32) -> Self {
        Self {
            enabled: true,
            columns,
            ..Self::default()
        }
    }

    /// Enabled config whose column count follows the viewport width.
    pub fn with_column_size(column_size: u32, strategy: ColumnStrategy) -> Self {
        Self {
            enabled: true,
            column_size: Some(column_size),
            strategy,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.column_size == Some(0) {
            return Err(SpanError::ZeroColumnSize);
        }
        if self.initial_capacity == 0 {
            return Err(SpanError::InvalidConfig(
                "initial_capacity must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
