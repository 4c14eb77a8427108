use image::RgbImage;

use crate::legend::resolve::{CellKind, ColorLegend};

#[derive(Clone, Debug, PartialEq)]
/// Per-cell physical state of the simulation domain, columnar layout.
///
/// The four arrays are parallel and all hold `width * height` entries, the
/// same struct-of-arrays layout the setup file uses. Grid row 0 is the
/// *bottom* row of the source image (bottom-left physical origin): a pixel
/// at top-down image row `y` lands at index
/// `(height - 1 - y) * width + x`.
pub struct DomainGrid {
    /// Grid width in cells.
    pub width: u32,
    /// Grid height in cells.
    pub height: u32,
    /// Cell kinds, one byte each on the wire.
    pub cell_type: Vec<CellKind>,
    /// Initial densities.
    pub density: Vec<f64>,
    /// Initial x velocities.
    pub velocity_x: Vec<f64>,
    /// Initial y velocities.
    pub velocity_y: Vec<f64>,
}

impl DomainGrid {
    fn new(width: u32, height: u32) -> DomainGrid {
        let n = width as usize * height as usize;
        DomainGrid {
            width,
            height,
            cell_type: vec![CellKind::Fluid; n],
            density: vec![0.0; n],
            velocity_x: vec![0.0; n],
            velocity_y: vec![0.0; n],
        }
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cell_type.len()
    }

    /// `true` for a zero-area grid.
    pub fn is_empty(&self) -> bool {
        self.cell_type.is_empty()
    }

    /// Flattened index for an image-space pixel, after the vertical flip.
    pub fn index_for_pixel(&self, x: u32, y: u32) -> usize {
        let flipped_y = self.height - 1 - y;
        flipped_y as usize * self.width as usize + x as usize
    }
}

#[derive(Clone, Debug, PartialEq)]
/// A rasterized domain: the populated grid plus tracer seed points.
pub struct RasterizedDomain {
    /// Populated per-cell state.
    pub grid: DomainGrid,
    /// Flattened indices of tracer-seeding fluid cells, in image scan
    /// order. The order is visible in the setup file and reproducible for
    /// identical inputs.
    pub tracer_seeds: Vec<u64>,
}

/// Walk every pixel of the domain bitmap and resolve it through the legend.
///
/// Unknown colors are non-fatal: the cell is logged and treated as a solid
/// wall at rest. Solid cells always receive the canonical rest state
/// (density 1, zero velocity) regardless of what their legend entry
/// carries. Outflow cells take the configured density but keep zero
/// velocity.
#[tracing::instrument(skip(img, legend))]
pub fn rasterize_domain(img: &RgbImage, legend: &ColorLegend) -> RasterizedDomain {
    let (width, height) = img.dimensions();
    let mut grid = DomainGrid::new(width, height);
    let mut tracer_seeds = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let rgb = img.get_pixel(x, y).0;
            let idx = grid.index_for_pixel(x, y);

            let Some(spec) = legend.resolve(rgb) else {
                tracing::warn!(
                    "unknown color #{:02X}{:02X}{:02X} at ({x}, {y}); treating cell as SOLID",
                    rgb[0],
                    rgb[1],
                    rgb[2],
                );
                grid.cell_type[idx] = CellKind::Solid;
                grid.density[idx] = 1.0;
                continue;
            };

            grid.cell_type[idx] = spec.kind;
            match spec.kind {
                CellKind::Solid => {
                    grid.density[idx] = 1.0;
                    grid.velocity_x[idx] = 0.0;
                    grid.velocity_y[idx] = 0.0;
                }
                CellKind::Fluid | CellKind::Inflow => {
                    grid.density[idx] = spec.density;
                    grid.velocity_x[idx] = spec.velocity[0];
                    grid.velocity_y[idx] = spec.velocity[1];
                    if spec.kind == CellKind::Fluid && spec.tracer_source {
                        tracer_seeds.push(idx as u64);
                    }
                }
                CellKind::Outflow => {
                    // Outflow velocity is never taken from the legend.
                    grid.density[idx] = spec.density;
                }
            }
        }
    }

    RasterizedDomain { grid, tracer_seeds }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/grid.rs"]
mod tests;
