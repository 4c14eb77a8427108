use std::collections::HashMap;

use crate::config::model::LegendEntry;
use crate::foundation::error::{SetupError, SetupResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
/// Cell classification shared with the downstream solver.
///
/// The numeric discriminants are a binary-compatibility contract: the solver
/// casts the `cell_type` bytes of the setup file straight into its own
/// enumeration, so the values here are fixed and must never be
/// auto-assigned or reordered.
pub enum CellKind {
    /// Bulk fluid cell.
    Fluid = 0,
    /// Impermeable wall cell, always at rest.
    Solid = 1,
    /// Velocity inlet cell.
    Inflow = 2,
    /// Open outlet cell.
    Outflow = 3,
}

impl CellKind {
    /// Wire byte for this kind.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decode a wire byte back into a kind.
    pub fn from_u8(b: u8) -> Option<CellKind> {
        match b {
            0 => Some(CellKind::Fluid),
            1 => Some(CellKind::Solid),
            2 => Some(CellKind::Inflow),
            3 => Some(CellKind::Outflow),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Resolved physical state for one legend color.
pub struct CellSpec {
    /// Cell kind.
    pub kind: CellKind,
    /// Initial density.
    pub density: f64,
    /// Initial velocity (x, y); meaningful for fluid and inflow cells.
    pub velocity: [f64; 2],
    /// Whether fluid cells of this color seed tracer particles.
    pub tracer_source: bool,
}

/// Parse a `#RRGGBB` hex color into an RGB byte triple.
///
/// The leading `#` is optional; anything other than exactly six hex digits
/// is rejected.
pub fn parse_hex_rgb(s: &str) -> SetupResult<[u8; 3]> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(SetupError::validation(format!(
            "malformed legend color '{s}': expected 6 hex digits"
        )));
    }

    let mut rgb = [0u8; 3];
    for (i, channel) in rgb.iter_mut().enumerate() {
        *channel = u8::from_str_radix(&hex[2 * i..2 * i + 2], 16)
            .map_err(|_| SetupError::validation(format!("malformed legend color '{s}'")))?;
    }
    Ok(rgb)
}

#[derive(Clone, Debug, Default)]
/// Immutable lookup from normalized pixel color to cell specification.
///
/// Built once per invocation and passed by reference into the rasterizer.
pub struct ColorLegend {
    map: HashMap<[u8; 3], CellSpec>,
}

impl ColorLegend {
    /// Build a legend from the ordered configuration entries.
    ///
    /// Entries later in the list silently overwrite earlier ones that name
    /// the same color. A malformed color string, or a non-solid entry
    /// without `initial_rho`, is fatal.
    pub fn from_entries(entries: &[LegendEntry]) -> SetupResult<ColorLegend> {
        let mut map = HashMap::with_capacity(entries.len());
        for entry in entries {
            let rgb = parse_hex_rgb(&entry.color)?;
            let density = match entry.initial_rho {
                Some(rho) => rho,
                None if entry.kind == CellKind::Solid => 1.0,
                None => {
                    return Err(SetupError::validation(format!(
                        "legend color '{}' ({:?}) is missing initial_rho",
                        entry.color, entry.kind
                    )));
                }
            };

            map.insert(
                rgb,
                CellSpec {
                    kind: entry.kind,
                    density,
                    velocity: entry.initial_u,
                    tracer_source: entry.tracer,
                },
            );
        }
        Ok(ColorLegend { map })
    }

    /// Look up the specification for a pixel color.
    pub fn resolve(&self, rgb: [u8; 3]) -> Option<&CellSpec> {
        self.map.get(&rgb)
    }

    /// Number of distinct colors in the legend.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// `true` when the legend has no colors.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/legend/resolve.rs"]
mod tests;
