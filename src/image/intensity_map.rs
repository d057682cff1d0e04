use crate::error::ImageError;
use crate::image::grid::Grid;
use crate::templates::TemplateTrait;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Intensities sampled on a pixel grid
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct IntensityMap {
    grid: Grid,
    data: Array2<f64>,
}

impl IntensityMap {
    /// New map, `data` must be indexed as `[[iy, ix]]`
    pub fn new(grid: Grid, data: Array2<f64>) -> Result<Self, ImageError> {
        if data.dim() != grid.shape() {
            return Err(ImageError::ShapeMismatch {
                expected: grid.shape(),
                actual: data.dim(),
            });
        }
        Ok(Self { grid, data })
    }

    /// Evaluate the template at every pixel centre
    pub fn render<T: TemplateTrait>(template: &T, grid: Grid) -> Self {
        let data = {
            let (x, y) = (grid.x(), grid.y());
            Array2::from_shape_fn(grid.shape(), |(iy, ix)| {
                template.intensity_point(x[ix], y[iy])
            })
        };
        Self { grid, data }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn flux(&self) -> f64 {
        self.data.sum()
    }

    /// Map scaled to unit flux
    pub fn normalized(&self) -> Result<Self, ImageError> {
        let flux = self.flux();
        if !(flux.is_finite() && flux > 0.0) {
            return Err(ImageError::NonPositiveFlux(flux));
        }
        Ok(Self {
            grid: self.grid.clone(),
            data: &self.data / flux,
        })
    }

    /// Iterate over `(x, y, value)` of every pixel
    pub fn pixels(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        let (x, y) = (self.grid.x(), self.grid.y());
        self.data
            .indexed_iter()
            .map(move |((iy, ix), &value)| (x[ix], y[iy], value))
    }
}
