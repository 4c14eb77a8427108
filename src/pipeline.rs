use std::path::{Path, PathBuf};

use crate::config::model::SimulationConfig;
use crate::encode::binary::{
    RenderParams, RenderQuantity, SimulationHeader, SimulationSetup, TracerVisuals,
    write_setup_file,
};
use crate::foundation::error::{SetupError, SetupResult};
use crate::legend::resolve::{ColorLegend, parse_hex_rgb};
use crate::raster::grid::rasterize_domain;

/// Extension of the produced binary setup file.
pub const SETUP_EXTENSION: &str = "dat";

/// Recognized configuration extension replaced by [`SETUP_EXTENSION`].
const CONFIG_EXTENSION: &str = "json";

/// Derive the output path from the configuration path.
///
/// A trailing `.json` extension is replaced with `.dat`; any other name
/// gets `.dat` appended.
pub fn output_path_for(config_path: &Path) -> PathBuf {
    if config_path
        .extension()
        .is_some_and(|ext| ext == CONFIG_EXTENSION)
    {
        config_path.with_extension(SETUP_EXTENSION)
    } else {
        let mut name = config_path.as_os_str().to_os_string();
        name.push(".");
        name.push(SETUP_EXTENSION);
        PathBuf::from(name)
    }
}

/// Run the full setup pipeline for one configuration file.
///
/// Loads the configuration, decodes the domain bitmap (resolved relative to
/// the configuration file's directory), rasterizes it through the color
/// legend and writes the binary setup file next to the configuration.
/// Returns the path of the written file.
///
/// The pipeline is strictly sequential and holds no state across
/// invocations; rerunning on unchanged inputs produces a byte-identical
/// file.
pub fn prepare_simulation(config_path: &Path) -> SetupResult<PathBuf> {
    let config = SimulationConfig::from_path(config_path)?;
    let config_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    let map_path = config_dir.join(&config.color_map.map_filename);
    let img = image::open(&map_path)
        .map_err(|e| {
            SetupError::image(format!(
                "could not process the image file '{}': {e}",
                map_path.display()
            ))
        })?
        .to_rgb8();

    let legend = ColorLegend::from_entries(&config.color_map.colors)?;
    let rasterized = rasterize_domain(&img, &legend);

    let tracer_rgb = parse_hex_rgb(&config.tracers.color)?;
    let setup = SimulationSetup {
        header: SimulationHeader::new(
            u64::from(rasterized.grid.width),
            u64::from(rasterized.grid.height),
            [config.periodicity.x, config.periodicity.y],
            config.simulation_params.viscosity,
        ),
        render: RenderParams {
            window_width: config.render.render_window_size[0],
            window_height: config.render.render_window_size[1],
            steps_per_frame: config.render.steps_per_frame,
            quantities: config
                .render
                .render_quantities
                .iter()
                .map(|q| RenderQuantity {
                    identifier: q.quantity.clone(),
                    offset: q.offset,
                    amplitude: q.amplitude,
                })
                .collect(),
        },
        tracers: TracerVisuals {
            color: normalized_rgba(tracer_rgb),
            size: config.tracers.size,
            emission_rate: config.tracers.emission_rate,
            random_initial: config.tracers.random_initial,
        },
        grid: rasterized.grid,
        tracer_seeds: rasterized.tracer_seeds,
    };

    let out_path = output_path_for(config_path);
    write_setup_file(&out_path, &setup)?;
    Ok(out_path)
}

fn normalized_rgba(rgb: [u8; 3]) -> [f32; 4] {
    [
        f32::from(rgb[0]) / 255.0,
        f32::from(rgb[1]) / 255.0,
        f32::from(rgb[2]) / 255.0,
        1.0,
    ]
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
