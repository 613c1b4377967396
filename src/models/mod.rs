pub mod row_model;
pub mod tile;

pub use row_model::*;
pub use tile::*;
