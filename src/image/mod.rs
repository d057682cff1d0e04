//! In-memory images that templates are fitted to

mod grid;
pub use grid::Grid;

mod intensity_map;
pub use intensity_map::IntensityMap;
