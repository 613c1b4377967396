use std::path::PathBuf;

/// Number of grid columns a tile occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanWidth {
    Single,
    Double,
}

impl SpanWidth {
    /// Landscape hints take two columns, everything else takes one.
    pub fn from_hints(width: u32, height: u32) -> Self {
        if width > height {
            Self::Double
        } else {
            Self::Single
        }
    }

    pub fn columns(self) -> u32 {
        match self {
            Self::Single => 1,
            Self::Double => 2,
        }
    }
}

/// Where a tile landed in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub span: SpanWidth,
    pub row: u32,
    pub column: u32,
}

impl Placement {
    pub fn new(span: SpanWidth, row: u32, column: u32) -> Self {
        Self { span, row, column }
    }

    /// Column one past the last column this tile covers.
    pub fn end_column(&self) -> u32 {
        self.column + self.span.columns()
    }
}

/// A tile in an externally owned sequence that the packer can place.
///
/// The packer only reads the aspect hints and writes placements back.
pub trait SpanTile {
    /// `(width, height)` hints; only their ratio matters.
    fn aspect_hints(&self) -> (u32, u32);

    /// Last placement written by the packer, if any.
    fn placement(&self) -> Option<Placement>;

    fn set_placement(&mut self, placement: Placement);
}

/// A thumbnail entry for hosts without a tile model of their own.
#[derive(Debug, Clone)]
pub struct ThumbTile {
    pub path: PathBuf,
    pub thumb_width: u32,
    pub thumb_height: u32,
    pub placement: Option<Placement>,
}

impl ThumbTile {
    /// Create an unplaced tile from its thumbnail dimensions.
    pub fn new(path: PathBuf, thumb_width: u32, thumb_height: u32) -> Self {
        Self {
            path,
            thumb_width,
            thumb_height,
            placement: None,
        }
    }
}

impl SpanTile for ThumbTile {
    fn aspect_hints(&self) -> (u32, u32) {
        (self.thumb_width, self.thumb_height)
    }

    fn placement(&self) -> Option<Placement> {
        self.placement
    }

    fn set_placement(&mut self, placement: Placement) {
        self.placement = Some(placement);
    }
}
