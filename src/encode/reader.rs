use std::io::Read;

use anyhow::Context as _;

use crate::encode::binary::{
    RenderParams, RenderQuantity, SimulationHeader, SimulationSetup, TracerVisuals,
};
use crate::foundation::error::{SetupError, SetupResult};
use crate::legend::resolve::CellKind;
use crate::raster::grid::DomainGrid;

/// Decode a setup stream written by [`crate::write_setup`].
///
/// Mirrors the solver's own reader field-for-field. Primarily exercised by
/// the round-trip tests; also usable for inspecting produced `.dat` files.
pub fn read_setup<R: Read>(r: &mut R) -> SetupResult<SimulationSetup> {
    let width = read_u64(r)?;
    let height = read_u64(r)?;
    let periodic_x = read_i8(r)?;
    let periodic_y = read_i8(r)?;
    let tau = read_f64(r)?;

    let window_width = read_u64(r)?;
    let window_height = read_u64(r)?;
    let steps_per_frame = read_u64(r)?;

    let quantity_count = read_u8(r)?;
    let mut quantities = Vec::with_capacity(quantity_count as usize);
    for _ in 0..quantity_count {
        let id_len = read_u8(r)? as usize;
        let mut id_bytes = vec![0u8; id_len];
        r.read_exact(&mut id_bytes)
            .context("read render quantity identifier")
            .map_err(SetupError::from)?;
        let identifier = String::from_utf8(id_bytes).map_err(|_| {
            SetupError::encode("render quantity identifier is not valid UTF-8")
        })?;
        let offset = read_f32(r)?;
        let amplitude = read_f32(r)?;
        quantities.push(RenderQuantity {
            identifier,
            offset,
            amplitude,
        });
    }

    let mut color = [0.0f32; 4];
    for channel in &mut color {
        *channel = read_f32(r)?;
    }
    let size = read_f32(r)?;
    let emission_rate = read_f32(r)?;
    let random_initial = read_u64(r)?;

    let grid_width = u32::try_from(width)
        .map_err(|_| SetupError::encode(format!("grid width {width} exceeds supported range")))?;
    let grid_height = u32::try_from(height).map_err(|_| {
        SetupError::encode(format!("grid height {height} exceeds supported range"))
    })?;
    let n = grid_width as usize * grid_height as usize;

    let mut cell_bytes = vec![0u8; n];
    r.read_exact(&mut cell_bytes)
        .context("read cell type array")
        .map_err(SetupError::from)?;
    let cell_type = cell_bytes
        .into_iter()
        .map(|b| {
            CellKind::from_u8(b)
                .ok_or_else(|| SetupError::encode(format!("unknown cell type byte {b}")))
        })
        .collect::<SetupResult<Vec<_>>>()?;

    let density = read_f64_run(r, n)?;
    let velocity_x = read_f64_run(r, n)?;
    let velocity_y = read_f64_run(r, n)?;

    let tracer_count = read_u64(r)? as usize;
    let mut tracer_seeds = Vec::with_capacity(tracer_count);
    for _ in 0..tracer_count {
        tracer_seeds.push(read_u64(r)?);
    }

    Ok(SimulationSetup {
        header: SimulationHeader {
            width,
            height,
            periodic_x,
            periodic_y,
            tau,
        },
        render: RenderParams {
            window_width,
            window_height,
            steps_per_frame,
            quantities,
        },
        tracers: TracerVisuals {
            color,
            size,
            emission_rate,
            random_initial,
        },
        grid: DomainGrid {
            width: grid_width,
            height: grid_height,
            cell_type,
            density,
            velocity_x,
            velocity_y,
        },
        tracer_seeds,
    })
}

fn read_array<const N: usize, R: Read>(r: &mut R) -> SetupResult<[u8; N]> {
    let mut bytes = [0u8; N];
    r.read_exact(&mut bytes)
        .context("read setup stream")
        .map_err(SetupError::from)?;
    Ok(bytes)
}

fn read_u8<R: Read>(r: &mut R) -> SetupResult<u8> {
    Ok(read_array::<1, _>(r)?[0])
}

fn read_i8<R: Read>(r: &mut R) -> SetupResult<i8> {
    Ok(read_array::<1, _>(r)?[0] as i8)
}

fn read_u64<R: Read>(r: &mut R) -> SetupResult<u64> {
    Ok(u64::from_le_bytes(read_array::<8, _>(r)?))
}

fn read_f32<R: Read>(r: &mut R) -> SetupResult<f32> {
    Ok(f32::from_le_bytes(read_array::<4, _>(r)?))
}

fn read_f64<R: Read>(r: &mut R) -> SetupResult<f64> {
    Ok(f64::from_le_bytes(read_array::<8, _>(r)?))
}

fn read_f64_run<R: Read>(r: &mut R, count: usize) -> SetupResult<Vec<f64>> {
    (0..count).map(|_| read_f64(r)).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/encode/reader.rs"]
mod tests;
