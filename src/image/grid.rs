use crate::templates::TemplateTrait;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Pixel-centre coordinates of a rectangular image
///
/// Image data on this grid is indexed as `[[iy, ix]]`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Grid {
    x: Array1<f64>,
    y: Array1<f64>,
}

impl Grid {
    pub fn new(x: Array1<f64>, y: Array1<f64>) -> Self {
        Self { x, y }
    }

    /// `nx` by `ny` pixels covering `[-half_width_x, half_width_x] x [-half_width_y, half_width_y]`
    pub fn centered(nx: usize, ny: usize, half_width_x: f64, half_width_y: f64) -> Self {
        Self::new(
            pixel_centers(nx, half_width_x),
            pixel_centers(ny, half_width_y),
        )
    }

    pub fn square(n: usize, half_width: f64) -> Self {
        Self::centered(n, n, half_width, half_width)
    }

    /// Square grid large enough to hold the template, with a margin of 10% of its extent
    pub fn for_template<T: TemplateTrait>(template: &T, n: usize) -> Self {
        Self::square(n, 1.1 * template.radial_extent())
    }

    pub fn x(&self) -> &Array1<f64> {
        &self.x
    }

    pub fn y(&self) -> &Array1<f64> {
        &self.y
    }

    /// Shape of the image data, `(ny, nx)`
    pub fn shape(&self) -> (usize, usize) {
        (self.y.len(), self.x.len())
    }

    pub fn len(&self) -> usize {
        self.x.len() * self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn pixel_centers(n: usize, half_width: f64) -> Array1<f64> {
    let half_pixel = half_width / n as f64;
    Array1::linspace(-half_width + half_pixel, half_width - half_pixel, n)
}
