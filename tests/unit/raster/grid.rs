use image::{Rgb, RgbImage};

use super::*;
use crate::config::model::LegendEntry;

const WHITE: [u8; 3] = [255, 255, 255];
const BLACK: [u8; 3] = [0, 0, 0];
const BLUE: [u8; 3] = [0, 0, 255];
const RED: [u8; 3] = [255, 0, 0];

fn entry(
    color: &str,
    kind: CellKind,
    initial_rho: Option<f64>,
    initial_u: [f64; 2],
    tracer: bool,
) -> LegendEntry {
    LegendEntry {
        color: color.to_string(),
        kind,
        initial_rho,
        initial_u,
        tracer,
    }
}

fn legend(entries: &[LegendEntry]) -> ColorLegend {
    ColorLegend::from_entries(entries).unwrap()
}

/// 2x2 image, all white except the bottom-left pixel.
fn two_by_two_with_black_corner() -> RgbImage {
    let mut img = RgbImage::from_pixel(2, 2, Rgb(WHITE));
    img.put_pixel(0, 1, Rgb(BLACK));
    img
}

#[test]
fn worked_example_flips_rows_into_bottom_left_origin() {
    let img = two_by_two_with_black_corner();
    let legend = legend(&[
        entry("#FFFFFF", CellKind::Fluid, Some(1.0), [0.1, 0.0], false),
        entry("#000000", CellKind::Solid, None, [0.0, 0.0], false),
    ]);

    let domain = rasterize_domain(&img, &legend);
    let grid = &domain.grid;

    // The black pixel sits at image (0, 1), the bottom row, so it lands at
    // grid index 0.
    assert_eq!(
        grid.cell_type,
        vec![
            CellKind::Solid,
            CellKind::Fluid,
            CellKind::Fluid,
            CellKind::Fluid
        ]
    );
    assert_eq!(grid.density, vec![1.0; 4]);
    assert_eq!(grid.velocity_x, vec![0.0, 0.1, 0.1, 0.1]);
    assert_eq!(grid.velocity_y, vec![0.0; 4]);
    assert!(domain.tracer_seeds.is_empty());
}

#[test]
fn vertical_flip_maps_top_image_row_to_last_grid_row() {
    let mut img = RgbImage::from_pixel(1, 3, Rgb(WHITE));
    img.put_pixel(0, 0, Rgb(BLACK)); // topmost image row

    let legend = legend(&[
        entry("#FFFFFF", CellKind::Fluid, Some(1.0), [0.0, 0.0], false),
        entry("#000000", CellKind::Solid, None, [0.0, 0.0], false),
    ]);

    let grid = rasterize_domain(&img, &legend).grid;
    assert_eq!(grid.cell_type[2], CellKind::Solid);
    assert_eq!(grid.cell_type[0], CellKind::Fluid);
    assert_eq!(grid.cell_type[1], CellKind::Fluid);
}

#[test]
fn parallel_arrays_cover_every_cell() {
    let img = RgbImage::from_pixel(5, 3, Rgb(WHITE));
    let legend = legend(&[entry("#FFFFFF", CellKind::Fluid, Some(1.0), [0.0, 0.0], false)]);

    let grid = rasterize_domain(&img, &legend).grid;
    assert_eq!(grid.len(), 15);
    assert_eq!(grid.cell_type.len(), 15);
    assert_eq!(grid.density.len(), 15);
    assert_eq!(grid.velocity_x.len(), 15);
    assert_eq!(grid.velocity_y.len(), 15);
}

#[test]
fn solid_cells_ignore_conflicting_legend_values() {
    let img = RgbImage::from_pixel(2, 1, Rgb(BLACK));
    // A legend entry that (nonsensically) gives solid cells momentum.
    let legend = legend(&[entry("#000000", CellKind::Solid, Some(5.0), [2.0, -3.0], false)]);

    let grid = rasterize_domain(&img, &legend).grid;
    assert_eq!(grid.cell_type, vec![CellKind::Solid; 2]);
    assert_eq!(grid.density, vec![1.0; 2]);
    assert_eq!(grid.velocity_x, vec![0.0; 2]);
    assert_eq!(grid.velocity_y, vec![0.0; 2]);
}

#[test]
fn unknown_color_falls_back_to_solid_at_rest() {
    let img = RgbImage::from_pixel(1, 1, Rgb(RED));
    let legend = legend(&[entry("#FFFFFF", CellKind::Fluid, Some(1.0), [0.1, 0.0], false)]);

    let domain = rasterize_domain(&img, &legend);
    assert_eq!(domain.grid.cell_type, vec![CellKind::Solid]);
    assert_eq!(domain.grid.density, vec![1.0]);
    assert_eq!(domain.grid.velocity_x, vec![0.0]);
    assert_eq!(domain.grid.velocity_y, vec![0.0]);
    assert!(domain.tracer_seeds.is_empty());
}

#[test]
fn outflow_takes_density_but_keeps_zero_velocity() {
    let img = RgbImage::from_pixel(1, 1, Rgb(RED));
    let legend = legend(&[entry("#FF0000", CellKind::Outflow, Some(0.97), [0.5, 0.5], false)]);

    let grid = rasterize_domain(&img, &legend).grid;
    assert_eq!(grid.cell_type, vec![CellKind::Outflow]);
    assert_eq!(grid.density, vec![0.97]);
    assert_eq!(grid.velocity_x, vec![0.0]);
    assert_eq!(grid.velocity_y, vec![0.0]);
}

#[test]
fn tracer_seeds_are_fluid_only_and_in_scan_order() {
    // Top row: two tracer fluid pixels. Bottom row: a tracer-flagged inflow
    // (must not seed) and another tracer fluid pixel.
    let mut img = RgbImage::from_pixel(2, 2, Rgb(WHITE));
    img.put_pixel(0, 1, Rgb(BLUE));

    let legend = legend(&[
        entry("#FFFFFF", CellKind::Fluid, Some(1.0), [0.1, 0.0], true),
        entry("#0000FF", CellKind::Inflow, Some(1.0), [0.2, 0.0], true),
    ]);

    let domain = rasterize_domain(&img, &legend);

    // Scan order walks the image top-down, so the flipped indices arrive as
    // grid row 1 first, then grid row 0.
    assert_eq!(domain.tracer_seeds, vec![2, 3, 1]);
}

#[test]
fn absent_legend_color_never_reaches_the_grid() {
    let img = two_by_two_with_black_corner();
    let legend = legend(&[
        entry("#FFFFFF", CellKind::Fluid, Some(1.0), [0.1, 0.0], false),
        entry("#000000", CellKind::Solid, None, [0.0, 0.0], false),
        entry("#00FF00", CellKind::Inflow, Some(1.2), [0.3, 0.0], false),
    ]);

    let grid = rasterize_domain(&img, &legend).grid;
    assert!(!grid.cell_type.contains(&CellKind::Inflow));
    assert!(!grid.density.contains(&1.2));
}
