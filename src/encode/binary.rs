use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{SetupError, SetupResult};
use crate::raster::grid::DomainGrid;

/// Relaxation time derived from kinematic viscosity.
///
/// `tau = 3 * viscosity + 0.5` is a constant of the BGK collision model
/// used by the solver, baked into the setup step rather than configured
/// directly.
pub fn relaxation_time(viscosity: f64) -> f64 {
    3.0 * viscosity + 0.5
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Grid dimensions, periodicity flags and relaxation time for the solver.
pub struct SimulationHeader {
    /// Grid width in cells.
    pub width: u64,
    /// Grid height in cells.
    pub height: u64,
    /// 1 when the domain wraps along x, else 0.
    pub periodic_x: i8,
    /// 1 when the domain wraps along y, else 0.
    pub periodic_y: i8,
    /// BGK relaxation time.
    pub tau: f64,
}

impl SimulationHeader {
    /// Build a header from grid dimensions, periodicity and viscosity.
    pub fn new(width: u64, height: u64, periodic: [bool; 2], viscosity: f64) -> SimulationHeader {
        SimulationHeader {
            width,
            height,
            periodic_x: periodic[0] as i8,
            periodic_y: periodic[1] as i8,
            tau: relaxation_time(viscosity),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
/// One solver-side observable to render, forwarded verbatim.
pub struct RenderQuantity {
    /// Observable identifier; at most 255 UTF-8 bytes on the wire.
    pub identifier: String,
    /// Additive offset applied by the renderer.
    pub offset: f32,
    /// Multiplicative amplitude applied by the renderer.
    pub amplitude: f32,
}

#[derive(Clone, Debug, PartialEq)]
/// Renderer window size and cadence.
pub struct RenderParams {
    /// Renderer window width in pixels.
    pub window_width: u64,
    /// Renderer window height in pixels.
    pub window_height: u64,
    /// Solver steps advanced per rendered frame.
    pub steps_per_frame: u64,
    /// Observables to render, in configuration order.
    pub quantities: Vec<RenderQuantity>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Tracer visualization parameters.
pub struct TracerVisuals {
    /// Tracer color, normalized RGBA in `[0, 1]`.
    pub color: [f32; 4],
    /// Tracer particle size in pixels.
    pub size: f32,
    /// Tracer emission rate per inflow step.
    pub emission_rate: f32,
    /// Random-initial-placement flag, stored full-width.
    pub random_initial: u64,
}

#[derive(Clone, Debug, PartialEq)]
/// Everything the setup file carries, assembled in memory before the single
/// write.
pub struct SimulationSetup {
    /// Grid dimensions, periodicity and relaxation time.
    pub header: SimulationHeader,
    /// Renderer parameters.
    pub render: RenderParams,
    /// Tracer visualization parameters.
    pub tracers: TracerVisuals,
    /// Populated per-cell state.
    pub grid: DomainGrid,
    /// Tracer seed indices, in rasterization order.
    pub tracer_seeds: Vec<u64>,
}

/// Serialize a full setup into `w` in the solver's fixed field order.
///
/// All multi-byte values are little-endian and fixed-width; strings are
/// length-prefixed (one byte) raw UTF-8 with no terminator; arrays are flat
/// runs with no per-element delimiters. Values are written untransformed
/// beyond the type narrowing the wire format dictates.
pub fn write_setup<W: Write>(w: &mut W, setup: &SimulationSetup) -> SetupResult<()> {
    let n = setup.grid.width as usize * setup.grid.height as usize;
    if setup.grid.cell_type.len() != n
        || setup.grid.density.len() != n
        || setup.grid.velocity_x.len() != n
        || setup.grid.velocity_y.len() != n
    {
        return Err(SetupError::encode(format!(
            "grid arrays must all hold width*height = {n} cells"
        )));
    }

    if setup.render.quantities.len() > u8::MAX as usize {
        return Err(SetupError::encode(format!(
            "at most 255 render quantities fit the wire format, got {}",
            setup.render.quantities.len()
        )));
    }
    for q in &setup.render.quantities {
        if q.identifier.len() > u8::MAX as usize {
            return Err(SetupError::encode(format!(
                "render quantity identifier '{}' exceeds 255 bytes",
                q.identifier
            )));
        }
    }

    write_stream(w, setup)
        .context("write setup stream")
        .map_err(SetupError::from)
}

fn write_stream<W: Write>(w: &mut W, setup: &SimulationSetup) -> std::io::Result<()> {
    let header = &setup.header;
    w.write_all(&header.width.to_le_bytes())?;
    w.write_all(&header.height.to_le_bytes())?;
    w.write_all(&header.periodic_x.to_le_bytes())?;
    w.write_all(&header.periodic_y.to_le_bytes())?;
    w.write_all(&header.tau.to_le_bytes())?;

    let render = &setup.render;
    w.write_all(&render.window_width.to_le_bytes())?;
    w.write_all(&render.window_height.to_le_bytes())?;
    w.write_all(&render.steps_per_frame.to_le_bytes())?;

    w.write_all(&[render.quantities.len() as u8])?;
    for q in &render.quantities {
        w.write_all(&[q.identifier.len() as u8])?;
        w.write_all(q.identifier.as_bytes())?;
        w.write_all(&q.offset.to_le_bytes())?;
        w.write_all(&q.amplitude.to_le_bytes())?;
    }

    let tracers = &setup.tracers;
    for channel in tracers.color {
        w.write_all(&channel.to_le_bytes())?;
    }
    w.write_all(&tracers.size.to_le_bytes())?;
    w.write_all(&tracers.emission_rate.to_le_bytes())?;
    w.write_all(&tracers.random_initial.to_le_bytes())?;

    let grid = &setup.grid;
    let cell_bytes: Vec<u8> = grid.cell_type.iter().map(|k| k.as_u8()).collect();
    w.write_all(&cell_bytes)?;
    for rho in &grid.density {
        w.write_all(&rho.to_le_bytes())?;
    }
    for u in &grid.velocity_x {
        w.write_all(&u.to_le_bytes())?;
    }
    for v in &grid.velocity_y {
        w.write_all(&v.to_le_bytes())?;
    }

    w.write_all(&(setup.tracer_seeds.len() as u64).to_le_bytes())?;
    for idx in &setup.tracer_seeds {
        w.write_all(&idx.to_le_bytes())?;
    }

    Ok(())
}

/// Create (or truncate) `path` and write the full setup through a buffered
/// writer.
///
/// A rerun overwrites the prior file in full. A failure mid-write is fatal
/// and leaves the partial file in place; cleanup is the caller's concern.
pub fn write_setup_file(path: &Path, setup: &SimulationSetup) -> SetupResult<()> {
    let file = File::create(path)
        .with_context(|| format!("create setup file '{}'", path.display()))
        .map_err(SetupError::from)?;

    let mut w = BufWriter::new(file);
    write_setup(&mut w, setup)?;
    w.flush()
        .with_context(|| format!("flush setup file '{}'", path.display()))
        .map_err(SetupError::from)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/binary.rs"]
mod tests;
