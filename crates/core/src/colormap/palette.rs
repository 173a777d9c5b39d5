//! Named palettes backed by `colorgrad` presets.

use crate::colormap::color_mapper::ColormapError;
use crate::colormap::colormap_table::ColormapTable;

/// Palette names accepted by [`resolve`] (matplotlib spelling, case-sensitive).
pub const SUPPORTED_COLORMAPS: &[&str] = &[
    "viridis", "plasma", "inferno", "magma", "cividis", "turbo", "Greys", "Spectral",
];

/// Samples the named palette into a 256-entry table.
pub fn resolve(name: &str) -> Result<ColormapTable, ColormapError> {
    let gradient = match name {
        "viridis" => colorgrad::viridis(),
        "plasma" => colorgrad::plasma(),
        "inferno" => colorgrad::inferno(),
        "magma" => colorgrad::magma(),
        "cividis" => colorgrad::cividis(),
        "turbo" => colorgrad::turbo(),
        "Greys" => colorgrad::greys(),
        "Spectral" => colorgrad::spectral(),
        _ => {
            return Err(ColormapError::UnknownColormap {
                name: name.to_string(),
                supported: SUPPORTED_COLORMAPS.join(", "),
            })
        }
    };

    let table = ColormapTable::from_fn(name, |t| {
        let color = gradient.at(t);
        [
            color.r.clamp(0.0, 1.0) as f32,
            color.g.clamp(0.0, 1.0) as f32,
            color.b.clamp(0.0, 1.0) as f32,
        ]
    });
    log::debug!("Resolved colormap '{name}'");
    Ok(table)
}
