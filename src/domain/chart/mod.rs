pub mod entities;
pub mod matrix_engine;
pub mod services;
pub mod value_objects;

pub use entities::{GraphMatrix, MatrixRow};
pub use matrix_engine::MatrixEngine;
pub use value_objects::{
    CellValue, ColumnId, ColumnSpec, DateRange, MarkerShape, MarkerSpec, SeriesStyle,
};
