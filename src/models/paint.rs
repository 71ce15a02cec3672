use serde::{Deserialize, Serialize};

/// An RGBA colour used when rasterising the plot.
pub type Rgba = [u8; 4];

pub const BACKGROUND: Rgba = [0xFF, 0xFF, 0xFF, 0xFF];
pub const GRID_LINE: Rgba = [0xDD, 0xDD, 0xDD, 0xFF];
pub const PLOT_BOUNDARY: Rgba = [0x8B, 0x45, 0x13, 0xFF];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilKind {
    Clay,
    #[default]
    Loam,
    Sandy,
    Silt,
}

impl SoilKind {
    pub const ALL: [SoilKind; 4] = [Self::Clay, Self::Loam, Self::Sandy, Self::Silt];

    pub fn color(self) -> Rgba {
        match self {
            Self::Clay => [0xD2, 0x69, 0x1E, 0xFF],
            Self::Loam => [0x8B, 0x45, 0x13, 0xFF],
            Self::Sandy => [0xF4, 0xA4, 0x60, 0xFF],
            Self::Silt => [0xD2, 0xB4, 0x8C, 0xFF],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadeIntensity {
    Light,
    Partial,
    #[default]
    Heavy,
    Full,
}

impl ShadeIntensity {
    pub const ALL: [ShadeIntensity; 4] = [Self::Light, Self::Partial, Self::Heavy, Self::Full];

    /// Grey ramp; `Heavy` is the classic dark-grey shade marker.
    pub fn color(self) -> Rgba {
        match self {
            Self::Light => [0xD3, 0xD3, 0xD3, 0xFF],
            Self::Partial => [0xBE, 0xBE, 0xBE, 0xFF],
            Self::Heavy => [0xA9, 0xA9, 0xA9, 0xFF],
            Self::Full => [0x80, 0x80, 0x80, 0xFF],
        }
    }
}

/// The state of a single grid cell. Painting is last-write-wins: a cell keeps
/// no memory of the layers it held before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "layer", content = "kind")]
pub enum CellPaint {
    #[default]
    Unpainted,
    Plot,
    Shade(ShadeIntensity),
    Soil(SoilKind),
}

impl CellPaint {
    pub fn is_painted(self) -> bool {
        !matches!(self, Self::Unpainted)
    }

    pub fn color(self) -> Rgba {
        match self {
            Self::Unpainted => BACKGROUND,
            Self::Plot => PLOT_BOUNDARY,
            Self::Shade(intensity) => intensity.color(),
            Self::Soil(kind) => kind.color(),
        }
    }
}

/// Which layer new strokes paint into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "mode", content = "kind")]
pub enum DrawingMode {
    #[default]
    Plot,
    Shade(ShadeIntensity),
    Soil(SoilKind),
    Eraser,
}

impl DrawingMode {
    /// The cell state a stroke in this mode writes. Erasing is indistinguishable
    /// from never having painted.
    pub fn paint(self) -> CellPaint {
        match self {
            Self::Plot => CellPaint::Plot,
            Self::Shade(intensity) => CellPaint::Shade(intensity),
            Self::Soil(kind) => CellPaint::Soil(kind),
            Self::Eraser => CellPaint::Unpainted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eraser_paints_unpainted() {
        assert_eq!(DrawingMode::Eraser.paint(), CellPaint::Unpainted);
        assert!(!DrawingMode::Eraser.paint().is_painted());
    }

    #[test]
    fn test_every_non_eraser_mode_paints_something() {
        let mut modes = vec![DrawingMode::Plot];
        modes.extend(ShadeIntensity::ALL.map(DrawingMode::Shade));
        modes.extend(SoilKind::ALL.map(DrawingMode::Soil));
        for mode in modes {
            assert!(mode.paint().is_painted(), "{mode:?} must paint the cell");
        }
    }

    #[test]
    fn test_shade_intensities_have_distinct_colors() {
        let colors: std::collections::HashSet<Rgba> =
            ShadeIntensity::ALL.iter().map(|s| s.color()).collect();
        assert_eq!(colors.len(), 4);
    }

    #[test]
    fn test_unpainted_uses_background() {
        assert_eq!(CellPaint::Unpainted.color(), BACKGROUND);
        assert_ne!(CellPaint::Plot.color(), BACKGROUND);
    }

    #[test]
    fn test_mode_serializes_with_sub_selection() {
        let json = serde_json::to_value(DrawingMode::Soil(SoilKind::Sandy)).unwrap();
        assert_eq!(json, serde_json::json!({ "mode": "soil", "kind": "sandy" }));
        let json = serde_json::to_value(DrawingMode::Eraser).unwrap();
        assert_eq!(json, serde_json::json!({ "mode": "eraser" }));
    }
}
