//! Lbmprep turns a human-authored simulation description into the binary
//! initialization file consumed by the companion lattice-Boltzmann (LBM)
//! solver.
//!
//! A simulation is described by a JSON configuration plus a color-coded
//! raster image of the physical domain. Lbmprep owns the setup data
//! pipeline, not the physics:
//!
//! 1. **Load**: `SimulationConfig` is parsed from JSON; the domain bitmap is
//!    decoded to an RGB raster (resolved relative to the configuration file).
//! 2. **Resolve**: the configured color legend becomes a [`ColorLegend`]
//!    lookup from pixel color to per-cell physical state.
//! 3. **Rasterize**: every pixel is resolved into a [`DomainGrid`] cell plus
//!    tracer seed points, with the vertical-flip indexing the solver expects
//!    (grid row 0 is the image's bottom row).
//! 4. **Encode**: grid, header, render and tracer parameters are serialized
//!    into one fixed-layout little-endian `.dat` file that the solver parses
//!    without schema negotiation.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: identical inputs produce byte-identical
//!   output files; rerunning overwrites the prior file in full.
//! - **Front-loaded IO**: all inputs are read before encoding starts; the
//!   output is built fully in memory and written once.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod encode;
mod foundation;
mod legend;
mod pipeline;
mod raster;

pub use config::model::{
    ColorMap, LegendEntry, Periodicity, RenderConfig, RenderQuantityConfig, SimulationConfig,
    SimulationParams, TracerConfig,
};
pub use encode::binary::{
    RenderParams, RenderQuantity, SimulationHeader, SimulationSetup, TracerVisuals,
    relaxation_time, write_setup, write_setup_file,
};
pub use encode::reader::read_setup;
pub use foundation::error::{SetupError, SetupResult};
pub use legend::resolve::{CellKind, CellSpec, ColorLegend, parse_hex_rgb};
pub use pipeline::{SETUP_EXTENSION, output_path_for, prepare_simulation};
pub use raster::grid::{DomainGrid, RasterizedDomain, rasterize_domain};
