//! Palettes and color ramps
//!
//! Every supported palette is a variant of the closed [`Palette`] enum and
//! maps to a pure sampling function. The perceptual maps come from
//! `colorous`; the rest are built from color stops:
//! - Sequential: viridis, plasma, inferno, magma, cividis, Greys, Blues
//! - Diverging: coolwarm, PiYG, PRGn, BrBG, PuOr, RdGy, RdBu, RdYlBu,
//!   RdYlGn, Spectral, bwr, seismic, berlin, managua, vanimo
//!
//! Whether a palette is diverging is a static property of its variant.

use colorous::Gradient;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of entries in a color ramp
pub const RAMP_SIZE: usize = 256;

/// A color in RGB format (0.0 to 1.0)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    /// Create a color from RGB components
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Create a color from 8-bit channels
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }

    /// Create a color from hex string (e.g., "#FF5733" or "FF5733")
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Self::from_u8(r, g, b))
    }

    /// 8-bit channels, truncating toward zero
    pub fn to_u8(&self) -> [u8; 3] {
        [
            (255.0 * self.r) as u8,
            (255.0 * self.g) as u8,
            (255.0 * self.b) as u8,
        ]
    }

    /// Convert to a lower-case `#rrggbb` string
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_u8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Linear interpolation between two colors
    pub fn lerp(a: &Color, b: &Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: a.r + (b.r - a.r) * t,
            g: a.g + (b.g - a.g) * t,
            b: a.b + (b.b - a.b) * t,
        }
    }
}

/// A continuous colormap built from color stops
#[derive(Clone, Debug)]
pub struct Colormap {
    /// Name of the colormap
    pub name: String,
    /// Color stops (positions from 0.0 to 1.0)
    stops: Vec<(f64, Color)>,
}

impl Colormap {
    /// Create a new colormap from a list of colors (evenly spaced)
    pub fn from_colors(name: impl Into<String>, colors: Vec<Color>) -> Self {
        let n = colors.len();
        let stops = colors
            .into_iter()
            .enumerate()
            .map(|(i, c)| (i as f64 / (n - 1).max(1) as f64, c))
            .collect();

        Self {
            name: name.into(),
            stops,
        }
    }

    /// Create a new colormap from `#rrggbb` strings (evenly spaced)
    fn from_hex_list(name: &str, hexes: &[&str]) -> Self {
        let colors = hexes
            .iter()
            .map(|h| Color::from_hex(h).unwrap_or(Color::rgb(0.5, 0.5, 0.5)))
            .collect();
        Self::from_colors(name, colors)
    }

    /// Create a new colormap from stops (position, color pairs)
    pub fn from_stops(name: impl Into<String>, stops: Vec<(f64, Color)>) -> Self {
        Self {
            name: name.into(),
            stops,
        }
    }

    /// Sample the colormap at a position (0.0 to 1.0)
    pub fn sample(&self, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);

        match self.stops.len() {
            0 => return Color::rgb(0.5, 0.5, 0.5),
            1 => return self.stops[0].1,
            _ => {}
        }

        for pair in self.stops.windows(2) {
            let (t0, c0) = &pair[0];
            let (t1, c1) = &pair[1];

            if t >= *t0 && t <= *t1 {
                let local_t = if t1 > t0 { (t - t0) / (t1 - t0) } else { 0.0 };
                return Color::lerp(c0, c1, local_t);
            }
        }

        if t <= self.stops[0].0 {
            self.stops[0].1
        } else {
            self.stops[self.stops.len() - 1].1
        }
    }

    /// Generate a lookup table of the specified size
    pub fn generate_lut(&self, size: usize) -> Vec<Color> {
        (0..size)
            .map(|i| self.sample(i as f64 / (size - 1).max(1) as f64))
            .collect()
    }
}

/// The closed set of supported palettes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Palette {
    // Sequential
    Viridis,
    Plasma,
    Inferno,
    Magma,
    Cividis,
    Greys,
    Blues,
    // Diverging
    Coolwarm,
    PiYG,
    PRGn,
    BrBG,
    PuOr,
    RdGy,
    RdBu,
    RdYlBu,
    RdYlGn,
    Spectral,
    Bwr,
    Seismic,
    Berlin,
    Managua,
    Vanimo,
}

impl Palette {
    /// Every supported palette, sequential first
    pub const ALL: [Palette; 22] = [
        Palette::Viridis,
        Palette::Plasma,
        Palette::Inferno,
        Palette::Magma,
        Palette::Cividis,
        Palette::Greys,
        Palette::Blues,
        Palette::Coolwarm,
        Palette::PiYG,
        Palette::PRGn,
        Palette::BrBG,
        Palette::PuOr,
        Palette::RdGy,
        Palette::RdBu,
        Palette::RdYlBu,
        Palette::RdYlGn,
        Palette::Spectral,
        Palette::Bwr,
        Palette::Seismic,
        Palette::Berlin,
        Palette::Managua,
        Palette::Vanimo,
    ];

    /// Canonical identifier
    pub fn name(&self) -> &'static str {
        match self {
            Palette::Viridis => "viridis",
            Palette::Plasma => "plasma",
            Palette::Inferno => "inferno",
            Palette::Magma => "magma",
            Palette::Cividis => "cividis",
            Palette::Greys => "Greys",
            Palette::Blues => "Blues",
            Palette::Coolwarm => "coolwarm",
            Palette::PiYG => "PiYG",
            Palette::PRGn => "PRGn",
            Palette::BrBG => "BrBG",
            Palette::PuOr => "PuOr",
            Palette::RdGy => "RdGy",
            Palette::RdBu => "RdBu",
            Palette::RdYlBu => "RdYlBu",
            Palette::RdYlGn => "RdYlGn",
            Palette::Spectral => "Spectral",
            Palette::Bwr => "bwr",
            Palette::Seismic => "seismic",
            Palette::Berlin => "berlin",
            Palette::Managua => "managua",
            Palette::Vanimo => "vanimo",
        }
    }

    /// Whether the palette is diverging (must stay symmetric around zero)
    pub fn is_divergent(&self) -> bool {
        matches!(
            self,
            Palette::Coolwarm
                | Palette::PiYG
                | Palette::PRGn
                | Palette::BrBG
                | Palette::PuOr
                | Palette::RdGy
                | Palette::RdBu
                | Palette::RdYlBu
                | Palette::RdYlGn
                | Palette::Spectral
                | Palette::Bwr
                | Palette::Seismic
                | Palette::Berlin
                | Palette::Managua
                | Palette::Vanimo
        )
    }

    /// Exact gradient for the perceptual maps
    pub fn gradient(&self) -> Option<Gradient> {
        match self {
            Palette::Viridis => Some(colorous::VIRIDIS),
            Palette::Plasma => Some(colorous::PLASMA),
            Palette::Inferno => Some(colorous::INFERNO),
            Palette::Magma => Some(colorous::MAGMA),
            Palette::Cividis => Some(colorous::CIVIDIS),
            _ => None,
        }
    }

    /// The continuous sampling function for this palette
    pub fn colormap(&self) -> Colormap {
        match self {
            Palette::Viridis
            | Palette::Plasma
            | Palette::Inferno
            | Palette::Magma
            | Palette::Cividis => match self.gradient() {
                Some(gradient) => gradient_colormap(self.name(), &gradient),
                None => Colormap::from_stops(self.name(), Vec::new()),
            },
            Palette::Greys => Colormap::from_hex_list(
                "Greys",
                &[
                    "#ffffff", "#f0f0f0", "#d9d9d9", "#bdbdbd", "#969696", "#737373", "#525252",
                    "#252525", "#000000",
                ],
            ),
            Palette::Blues => Colormap::from_hex_list(
                "Blues",
                &[
                    "#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5",
                    "#08519c", "#08306b",
                ],
            ),
            Palette::Coolwarm => coolwarm(),
            Palette::PiYG => brewer_diverging(
                "PiYG",
                [
                    "#8e0152", "#c51b7d", "#de77ae", "#f1b6da", "#fde0ef", "#f7f7f7", "#e6f5d0",
                    "#b8e186", "#7fbc41", "#4d9221", "#276419",
                ],
            ),
            Palette::PRGn => brewer_diverging(
                "PRGn",
                [
                    "#40004b", "#762a83", "#9970ab", "#c2a5cf", "#e7d4e8", "#f7f7f7", "#d9f0d3",
                    "#a6dba0", "#5aae61", "#1b7837", "#00441b",
                ],
            ),
            Palette::BrBG => brewer_diverging(
                "BrBG",
                [
                    "#543005", "#8c510a", "#bf812d", "#dfc27d", "#f6e8c3", "#f5f5f5", "#c7eae5",
                    "#80cdc1", "#35978f", "#01665e", "#003c30",
                ],
            ),
            Palette::PuOr => brewer_diverging(
                "PuOr",
                [
                    "#7f3b08", "#b35806", "#e08214", "#fdb863", "#fee0b6", "#f7f7f7", "#d8daeb",
                    "#b2abd2", "#8073ac", "#542788", "#2d004b",
                ],
            ),
            Palette::RdGy => brewer_diverging(
                "RdGy",
                [
                    "#67001f", "#b2182b", "#d6604d", "#f4a582", "#fddbc7", "#ffffff", "#e0e0e0",
                    "#bababa", "#878787", "#4d4d4d", "#1a1a1a",
                ],
            ),
            Palette::RdBu => brewer_diverging(
                "RdBu",
                [
                    "#67001f", "#b2182b", "#d6604d", "#f4a582", "#fddbc7", "#f7f7f7", "#d1e5f0",
                    "#92c5de", "#4393c3", "#2166ac", "#053061",
                ],
            ),
            Palette::RdYlBu => brewer_diverging(
                "RdYlBu",
                [
                    "#a50026", "#d73027", "#f46d43", "#fdae61", "#fee090", "#ffffbf", "#e0f3f8",
                    "#abd9e9", "#74add1", "#4575b4", "#313695",
                ],
            ),
            Palette::RdYlGn => brewer_diverging(
                "RdYlGn",
                [
                    "#a50026", "#d73027", "#f46d43", "#fdae61", "#fee08b", "#ffffbf", "#d9ef8b",
                    "#a6d96a", "#66bd63", "#1a9850", "#006837",
                ],
            ),
            Palette::Spectral => brewer_diverging(
                "Spectral",
                [
                    "#9e0142", "#d53e4f", "#f46d43", "#fdae61", "#fee08b", "#ffffbf", "#e6f598",
                    "#abdda4", "#66c2a5", "#3288bd", "#5e4fa2",
                ],
            ),
            Palette::Bwr => Colormap::from_hex_list("bwr", &["#0000ff", "#ffffff", "#ff0000"]),
            Palette::Seismic => Colormap::from_stops(
                "seismic",
                vec![
                    (0.0, Color::rgb(0.0, 0.0, 0.3)),
                    (0.25, Color::rgb(0.0, 0.0, 1.0)),
                    (0.5, Color::rgb(1.0, 1.0, 1.0)),
                    (0.75, Color::rgb(1.0, 0.0, 0.0)),
                    (1.0, Color::rgb(0.5, 0.0, 0.0)),
                ],
            ),
            // Dark-centred maps: light ends, near-black midpoint
            Palette::Berlin => Colormap::from_hex_list(
                "berlin",
                &[
                    "#9ebcfe", "#4a8ec6", "#1b3b50", "#110f0e", "#4f1804", "#a0563f", "#ffadad",
                ],
            ),
            Palette::Managua => Colormap::from_hex_list(
                "managua",
                &[
                    "#ffcf67", "#cd7f4a", "#8a3f45", "#2e2240", "#3b4d8a", "#5f9ccd", "#82ffff",
                ],
            ),
            Palette::Vanimo => Colormap::from_hex_list(
                "vanimo",
                &[
                    "#ffcdfd", "#c45aba", "#4a1e47", "#1e1e1c", "#2c4a1c", "#6aa441", "#befdb7",
                ],
            ),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::Plasma
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for palette identifiers outside the supported set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown palette '{0}'")]
pub struct UnknownPalette(pub String);

impl FromStr for Palette {
    type Err = UnknownPalette;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Palette::ALL
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownPalette(s.to_string()))
    }
}

impl TryFrom<String> for Palette {
    type Error = UnknownPalette;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Palette> for String {
    fn from(palette: Palette) -> Self {
        palette.name().to_string()
    }
}

/// Whether the palette is diverging
pub fn classify_palette(palette: Palette) -> bool {
    palette.is_divergent()
}

/// Sample a palette at 256 evenly spaced points into `#rrggbb` strings
///
/// Channels are truncated, not rounded, after scaling by 255.
pub fn make_ramp(palette: Palette) -> Vec<String> {
    if let Some(gradient) = palette.gradient() {
        return (0..RAMP_SIZE)
            .map(|i| {
                let c = gradient_at(&gradient, i, RAMP_SIZE);
                format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
            })
            .collect();
    }
    palette
        .colormap()
        .generate_lut(RAMP_SIZE)
        .iter()
        .map(Color::to_hex)
        .collect()
}

/// Eleven-class ColorBrewer diverging scheme, evenly spaced
fn brewer_diverging(name: &str, hexes: [&str; 11]) -> Colormap {
    Colormap::from_hex_list(name, &hexes)
}

fn gradient_at(gradient: &Gradient, i: usize, n: usize) -> colorous::Color {
    gradient.eval_continuous(i as f64 / (n - 1).max(1) as f64)
}

/// 256 evenly spaced samples of a `colorous` gradient
fn gradient_colormap(name: &str, gradient: &Gradient) -> Colormap {
    let colors = (0..RAMP_SIZE)
        .map(|i| {
            let c = gradient_at(gradient, i, RAMP_SIZE);
            Color::from_u8(c.r, c.g, c.b)
        })
        .collect();
    Colormap::from_colors(name, colors)
}

// MARK: - Built-in Colormaps

fn coolwarm() -> Colormap {
    Colormap::from_colors(
        "coolwarm",
        vec![
            Color::from_u8(59, 76, 192),
            Color::from_u8(98, 130, 234),
            Color::from_u8(141, 176, 254),
            Color::from_u8(184, 208, 249),
            Color::from_u8(221, 221, 221),
            Color::from_u8(245, 196, 173),
            Color::from_u8(244, 154, 123),
            Color::from_u8(222, 96, 77),
            Color::from_u8(180, 4, 38),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        let color = Color::from_hex("#FF5733").unwrap();
        assert!((color.r - 1.0).abs() < 0.01);
        assert!((color.g - 0.341).abs() < 0.01);
        assert!((color.b - 0.2).abs() < 0.01);
        assert!(Color::from_hex("#FF57").is_none());
    }

    #[test]
    fn test_color_to_hex_truncates() {
        // 0.999 * 255 = 254.745 -> 254 (0xfe), not 255
        let color = Color::rgb(0.999, 0.0, 1.0);
        assert_eq!(color.to_hex(), "#fe00ff");
    }

    #[test]
    fn test_color_lerp() {
        let a = Color::rgb(0.0, 0.0, 0.0);
        let b = Color::rgb(1.0, 1.0, 1.0);
        let mid = Color::lerp(&a, &b, 0.5);

        assert!((mid.r - 0.5).abs() < 0.001);
        assert!((mid.g - 0.5).abs() < 0.001);
        assert!((mid.b - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_colormap_sample_endpoints() {
        let cmap = Palette::Bwr.colormap();
        assert_eq!(cmap.sample(0.0).to_hex(), "#0000ff");
        assert_eq!(cmap.sample(0.5).to_hex(), "#ffffff");
        assert_eq!(cmap.sample(1.0).to_hex(), "#ff0000");
        // Out of range positions clamp
        assert_eq!(cmap.sample(-3.0).to_hex(), "#0000ff");
        assert_eq!(cmap.sample(7.0).to_hex(), "#ff0000");
    }

    #[test]
    fn test_divergent_classification() {
        let divergent: Vec<&str> = Palette::ALL
            .iter()
            .filter(|p| classify_palette(**p))
            .map(|p| p.name())
            .collect();
        assert_eq!(
            divergent,
            vec![
                "coolwarm", "PiYG", "PRGn", "BrBG", "PuOr", "RdGy", "RdBu", "RdYlBu", "RdYlGn",
                "Spectral", "bwr", "seismic", "berlin", "managua", "vanimo"
            ]
        );
        assert!(!Palette::Plasma.is_divergent());
        assert!(!Palette::Viridis.is_divergent());
    }

    #[test]
    fn test_palette_from_str() {
        assert_eq!("RdBu".parse::<Palette>().unwrap(), Palette::RdBu);
        assert_eq!("rdbu".parse::<Palette>().unwrap(), Palette::RdBu);
        assert_eq!(" plasma ".parse::<Palette>().unwrap(), Palette::Plasma);
        assert!("jet".parse::<Palette>().is_err());
    }

    #[test]
    fn test_palette_serde_uses_identifier() {
        let json = serde_json::to_string(&Palette::PiYG).unwrap();
        assert_eq!(json, "\"PiYG\"");
        let parsed: Palette = serde_json::from_str("\"seismic\"").unwrap();
        assert_eq!(parsed, Palette::Seismic);
        assert!(serde_json::from_str::<Palette>("\"jet\"").is_err());
    }

    #[test]
    fn test_make_ramp_shape() {
        for palette in Palette::ALL {
            let ramp = make_ramp(palette);
            assert_eq!(ramp.len(), RAMP_SIZE);
            assert!(ramp
                .iter()
                .all(|c| c.len() == 7 && c.starts_with('#') && c == &c.to_lowercase()));
        }
    }

    #[test]
    fn test_make_ramp_is_deterministic() {
        for palette in Palette::ALL {
            assert_eq!(make_ramp(palette), make_ramp(palette));
        }
    }

    #[test]
    fn test_perceptual_ramp_endpoints() {
        let viridis = make_ramp(Palette::Viridis);
        assert_eq!(viridis[0], "#440154");
        assert_eq!(viridis[255], "#fde725");

        let plasma = make_ramp(Palette::Plasma);
        assert_eq!(plasma[0], "#0d0887");
        assert_eq!(plasma[255], "#f0f921");

        let with_gradient: Vec<&str> = Palette::ALL
            .iter()
            .filter(|p| p.gradient().is_some())
            .map(|p| p.name())
            .collect();
        assert_eq!(
            with_gradient,
            vec!["viridis", "plasma", "inferno", "magma", "cividis"]
        );
    }

    #[test]
    fn test_gradient_colormap_matches_ramp_ends() {
        let cmap = Palette::Magma.colormap();
        let ramp = make_ramp(Palette::Magma);
        let first = Color::from_hex(&ramp[0]).unwrap();
        let sampled = cmap.sample(0.0);
        assert!((first.r - sampled.r).abs() < 1e-9);
        assert!((first.b - sampled.b).abs() < 1e-9);
    }

    #[test]
    fn test_bwr_ramp_midpoint() {
        let ramp = make_ramp(Palette::Bwr);
        assert_eq!(ramp[0], "#0000ff");
        assert_eq!(ramp[255], "#ff0000");
        // 127/255 is just below the white stop: a blue-tinted grey
        let mid = &ramp[127];
        assert!(mid.ends_with("ff"));
        assert_eq!(&mid[1..3], &mid[3..5]);
        assert_ne!(mid, "#ffffff");
    }
}
