use crate::error::{Result, SpanError};

/// How a column count is derived from the available width and a preferred
/// column size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnStrategy {
    /// As many columns as fit without any going below `single`.
    #[default]
    MinSize,
    /// Whichever of the two nearest column counts keeps columns closest to
    /// `single`.
    SuitableSize,
}

impl ColumnStrategy {
    /// Computes the column count for `total` units of width.
    ///
    /// Always at least 1 when `single` is positive.
    pub fn column_count(self, total: u32, single: u32) -> Result<u32> {
        if single == 0 {
            return Err(SpanError::ZeroColumnSize);
        }
        Ok(match self {
            Self::MinSize => (total / single).max(1),
            Self::SuitableSize => suitable_count(total, single),
        })
    }
}

fn suitable_count(total: u32, single: u32) -> u32 {
    let span = total / single;
    if span == 0 {
        return 1;
    }
    let wider = span + 1;
    let deviation = |count: u32| (1.0 - (total / count) as f32 / single as f32).abs();
    if deviation(span) < deviation(wider) {
        span
    } else {
        wider
    }
}
