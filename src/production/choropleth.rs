//! Sequential colour scale, region shading and hover tooltips

use super::aggregate::RegionTotal;
use super::boundaries::FeatureCollection;

/// Pointer offset applied to the tooltip position
pub const TOOLTIP_OFFSET_X: f64 = 10.0;
pub const TOOLTIP_OFFSET_Y: f64 = -28.0;

/// Viridis control points, evenly spaced from 0 to 1
const VIRIDIS: [(u8, u8, u8); 10] = [
    (0x44, 0x01, 0x54),
    (0x48, 0x28, 0x78),
    (0x3e, 0x49, 0x89),
    (0x31, 0x68, 0x8e),
    (0x26, 0x82, 0x8e),
    (0x1f, 0x9e, 0x89),
    (0x35, 0xb7, 0x79),
    (0x6e, 0xce, 0x58),
    (0xb5, 0xde, 0x2b),
    (0xfd, 0xe7, 0x25),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Interpolate the viridis ramp at `t` in [0, 1]
pub fn viridis(t: f64) -> Rgb {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (VIRIDIS.len() - 1) as f64;
    let lo = scaled.floor() as usize;
    let hi = (lo + 1).min(VIRIDIS.len() - 1);
    let frac = scaled - lo as f64;

    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    let (a, b) = (VIRIDIS[lo], VIRIDIS[hi]);
    Rgb {
        r: mix(a.0, b.0),
        g: mix(a.1, b.1),
        b: mix(a.2, b.2),
    }
}

/// Linear domain mapped onto viridis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    pub min: f64,
    pub max: f64,
}

impl Default for ColorScale {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

impl ColorScale {
    /// Domain `[0, max]`; stays `[0, 1]` when nothing was produced
    pub fn for_max(max: f64) -> Self {
        if max.is_finite() && max > 0.0 {
            Self { min: 0.0, max }
        } else {
            Self::default()
        }
    }

    pub fn color(&self, value: f64) -> Rgb {
        viridis((value - self.min) / (self.max - self.min))
    }
}

/// One boundary feature joined with its production total
#[derive(Debug, Clone, PartialEq)]
pub struct RegionShade {
    pub region: String,
    pub production: Option<f64>,
    pub color: Option<Rgb>,
}

/// Join every named boundary feature with the per-region totals
pub fn shade_regions(
    boundaries: &FeatureCollection,
    region_key: &str,
    totals: &[RegionTotal],
    scale: &ColorScale,
) -> Vec<RegionShade> {
    boundaries
        .region_names(region_key)
        .map(|name| {
            let production = totals
                .iter()
                .find(|t| t.region == name)
                .map(|t| t.total);
            RegionShade {
                region: name.to_string(),
                production,
                color: production.map(|p| scale.color(p)),
            }
        })
        .collect()
}

/// Hover tooltip anchored next to the pointer
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub region: String,
    pub production: String,
    pub x: f64,
    pub y: f64,
}

impl Tooltip {
    pub fn new(region: &str, production: Option<f64>, pointer: (f64, f64)) -> Self {
        Self {
            region: region.to_string(),
            production: production
                .map(|p| format!("{:.2}", p))
                .unwrap_or_else(|| "N/A".to_string()),
            x: pointer.0 + TOOLTIP_OFFSET_X,
            y: pointer.1 + TOOLTIP_OFFSET_Y,
        }
    }

    pub fn lines(&self) -> [String; 2] {
        [
            self.region.clone(),
            format!("Production: {} Lakh Tonnes", self.production),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viridis_ends() {
        assert_eq!(viridis(0.0).hex(), "#440154");
        assert_eq!(viridis(1.0).hex(), "#fde725");
        assert_eq!(viridis(7.0), viridis(1.0));
        assert_eq!(viridis(f64::NAN), viridis(0.0));
    }

    #[test]
    fn test_scale_domain() {
        assert_eq!(ColorScale::for_max(0.0), ColorScale { min: 0.0, max: 1.0 });
        let scale = ColorScale::for_max(50.0);
        assert_eq!(scale.color(50.0), viridis(1.0));
        assert_eq!(scale.color(0.0), viridis(0.0));
    }

    #[test]
    fn test_tooltip_offset_and_format() {
        let tip = Tooltip::new("Punjab", Some(6.0), (100.0, 100.0));
        assert_eq!((tip.x, tip.y), (110.0, 72.0));
        assert_eq!(tip.lines()[1], "Production: 6.00 Lakh Tonnes");

        let missing = Tooltip::new("Goa", None, (0.0, 0.0));
        assert_eq!(missing.production, "N/A");
    }
}
