use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{SetupError, SetupResult};
use crate::legend::resolve::CellKind;

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A complete simulation description as authored in the configuration file.
///
/// The configuration is a pure data model deserialized from JSON. It names
/// the domain bitmap, assigns physical meaning to its colors, and carries
/// the solver and renderer parameters that are forwarded into the setup
/// file verbatim.
pub struct SimulationConfig {
    /// Physical solver parameters.
    pub simulation_params: SimulationParams,
    /// Domain periodicity along each axis.
    pub periodicity: Periodicity,
    /// Domain bitmap and the color legend that decodes it.
    pub color_map: ColorMap,
    /// Renderer parameters forwarded to the solver's visualization.
    pub render: RenderConfig,
    /// Tracer visualization parameters; the whole section is optional.
    #[serde(default)]
    pub tracers: TracerConfig,
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
/// Physical parameters of the solver run.
pub struct SimulationParams {
    /// Kinematic viscosity; the relaxation time is derived from it.
    pub viscosity: f64,
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
/// Whether the domain wraps around along each axis.
pub struct Periodicity {
    /// Periodic along x.
    pub x: bool,
    /// Periodic along y.
    pub y: bool,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// The domain bitmap and its color legend.
pub struct ColorMap {
    /// Bitmap path, relative to the configuration file's directory.
    pub map_filename: String,
    /// Ordered legend entries; later entries win on duplicate colors.
    pub colors: Vec<LegendEntry>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// One color-to-cell-state assignment in the legend.
pub struct LegendEntry {
    /// Hex color key, `#RRGGBB` (the `#` is optional).
    pub color: String,
    /// Cell kind this color maps to.
    #[serde(rename = "type")]
    pub kind: CellKind,
    /// Initial density; required for non-solid kinds, ignored for solid
    /// cells (they always get the canonical rest state).
    #[serde(default)]
    pub initial_rho: Option<f64>,
    /// Initial velocity (x, y); meaningful for `FLUID` and `INFLOW` kinds.
    #[serde(default)]
    pub initial_u: [f64; 2],
    /// Seed tracer particles from cells of this color (`FLUID` only).
    #[serde(default)]
    pub tracer: bool,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Renderer parameters forwarded into the setup file.
pub struct RenderConfig {
    /// Solver steps advanced per rendered frame.
    pub steps_per_frame: u64,
    /// Renderer window dimensions (width, height).
    pub render_window_size: [u64; 2],
    /// Observables to render, in configuration order.
    pub render_quantities: Vec<RenderQuantityConfig>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// One solver-side observable to render.
pub struct RenderQuantityConfig {
    /// Observable identifier understood by the solver (e.g. `speed`,
    /// `vorticity`).
    pub quantity: String,
    /// Additive offset applied by the renderer.
    pub offset: f32,
    /// Multiplicative amplitude applied by the renderer.
    pub amplitude: f32,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Tracer visualization parameters.
///
/// Defaults: magenta color, size 3.0, no emission, no random initial
/// placement.
pub struct TracerConfig {
    /// Tracer particle color, `#RRGGBB`.
    #[serde(default = "default_tracer_color")]
    pub color: String,
    /// Tracer particle size in pixels.
    #[serde(default = "default_tracer_size")]
    pub size: f32,
    /// Tracer emission rate per inflow step.
    #[serde(default)]
    pub emission_rate: f32,
    /// Place the initial tracers randomly instead of at their seed cells
    /// (0 or 1; stored full-width on the wire).
    #[serde(default)]
    pub random_initial: u64,
}

fn default_tracer_color() -> String {
    "#FF00FF".to_string()
}

fn default_tracer_size() -> f32 {
    3.0
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            color: default_tracer_color(),
            size: default_tracer_size(),
            emission_rate: 0.0,
            random_initial: 0,
        }
    }
}

impl SimulationConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> SetupResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| SetupError::validation(format!("parse simulation config JSON: {e}")))
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> SetupResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SetupError::validation(format!(
                "open simulation config '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
