//! Color conversion primitives for palette generation.
//!
//! Provides the numeric core of the crate:
//! - RGB and HSL representations with integer-rounded conversions
//! - Hex string parsing and rendering
//! - Light/dark classification and contrast color selection
//! - Coarse hue-bucket color naming
//! - Integration with owo-colors and ratatui

use owo_colors::OwoColorize;
use ratatui::style::Color as RatatuiColor;
use std::fmt::{self, Display};

use crate::palette::Swatch;

/// An RGB color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// An HSL color with integer components.
///
/// Hue is held in `[0, 360)` degrees, saturation and lightness in `[0, 100]`
/// percent. The constructor normalizes and clamps, so a value of this type is
/// always safe to convert back to RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsl {
    h: u16,
    s: u8,
    l: u8,
}

impl Rgb {
    /// Create a new RGB color
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` hex string.
    ///
    /// A leading `#` is optional. Returns `None` when the remainder is not
    /// exactly six hex digits; callers treat that as "no color", never as a
    /// fatal error.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            return None;
        }

        let bits = u32::from_str_radix(hex, 16).ok()?;
        Some(Self::new(
            (bits >> 16) as u8,
            (bits >> 8 & 0xff) as u8,
            (bits & 0xff) as u8,
        ))
    }

    /// Render as a lowercase `#rrggbb` string, always six digits
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to HSL via the max/min channel formula.
    ///
    /// Outputs are rounded to the nearest degree/percent; a round-trip back
    /// through [`Hsl::to_rgb`] may therefore drift by one per channel.
    pub fn to_hsl(&self) -> Hsl {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            // Achromatic: hue is meaningless, saturation zero
            return Hsl::new(0, 0, (l * 100.0).round() as i32);
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Hsl::new(
            (h / 6.0 * 360.0).round() as i32,
            (s * 100.0).round() as i32,
            (l * 100.0).round() as i32,
        )
    }

    /// Perceptual brightness via the weighted YIQ formula
    pub fn brightness(&self) -> u32 {
        (299 * u32::from(self.r) + 587 * u32::from(self.g) + 114 * u32::from(self.b)) / 1000
    }

    /// Whether this color reads as light (YIQ brightness >= 128)
    pub fn is_light(&self) -> bool {
        self.brightness() >= 128
    }

    /// Convert to owo-colors RGB type
    pub fn to_owo_rgb(&self) -> owo_colors::Rgb {
        owo_colors::Rgb(self.r, self.g, self.b)
    }

    /// Convert to ratatui Color
    pub fn to_ratatui(&self) -> RatatuiColor {
        RatatuiColor::Rgb(self.r, self.g, self.b)
    }
}

impl Hsl {
    /// Create an HSL color from raw rule arithmetic.
    ///
    /// Hue is wrapped into `[0, 360)` (negative inputs included), saturation
    /// and lightness clamped into `[0, 100]`. Every generation rule funnels
    /// through here, so an out-of-range intermediate can never reach RGB
    /// conversion.
    pub fn new(h: i32, s: i32, l: i32) -> Self {
        Self {
            h: h.rem_euclid(360) as u16,
            s: s.clamp(0, 100) as u8,
            l: l.clamp(0, 100) as u8,
        }
    }

    /// Hue in degrees, `[0, 360)`
    #[inline]
    pub const fn h(&self) -> u16 {
        self.h
    }

    /// Saturation percent, `[0, 100]`
    #[inline]
    pub const fn s(&self) -> u8 {
        self.s
    }

    /// Lightness percent, `[0, 100]`
    #[inline]
    pub const fn l(&self) -> u8 {
        self.l
    }

    /// Convert to RGB, rounding each channel to the nearest integer
    pub fn to_rgb(&self) -> Rgb {
        let h = f64::from(self.h) / 360.0;
        let s = f64::from(self.s) / 100.0;
        let l = f64::from(self.l) / 100.0;

        if s == 0.0 {
            // Achromatic fast path
            let v = (l * 255.0).round() as u8;
            return Rgb::new(v, v, v);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Rgb::new(
            (hue_to_rgb(p, q, h + 1.0 / 3.0) * 255.0).round() as u8,
            (hue_to_rgb(p, q, h) * 255.0).round() as u8,
            (hue_to_rgb(p, q, h - 1.0 / 3.0) * 255.0).round() as u8,
        )
    }
}

/// Standard hue-to-channel helper for HSL -> RGB conversion
fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

impl From<Rgb> for owo_colors::Rgb {
    fn from(color: Rgb) -> Self {
        color.to_owo_rgb()
    }
}

impl From<Rgb> for RatatuiColor {
    fn from(color: Rgb) -> Self {
        color.to_ratatui()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }
}

/// Whether a hex color reads as light.
///
/// Unparsable input counts as light, so the contrast color for a broken
/// swatch is black text rather than invisible white-on-white.
pub fn is_color_light(hex: &str) -> bool {
    Rgb::from_hex(hex).map_or(true, |rgb| rgb.is_light())
}

/// Pick a readable overlay color (pure black or white) for a swatch background
pub fn contrast_color(hex: &str) -> &'static str {
    if is_color_light(hex) {
        "#000000"
    } else {
        "#ffffff"
    }
}

/// Coarse color name from hue/saturation/lightness buckets.
///
/// Near-gray colors (saturation < 10%) bucket into Black/White/Gray by
/// lightness; everything else buckets by hue range, boundaries resolving to
/// the lower-bound-inclusive bucket. This is a classifier for display labels,
/// not a color-naming database.
pub fn color_name(hex: &str) -> &'static str {
    let Some(rgb) = Rgb::from_hex(hex) else {
        return "Unknown";
    };
    let hsl = rgb.to_hsl();

    if hsl.s() < 10 {
        return match hsl.l() {
            0..=19 => "Black",
            81..=100 => "White",
            _ => "Gray",
        };
    }

    match hsl.h() {
        0..=29 => "Red",
        30..=59 => "Orange",
        60..=89 => "Yellow",
        90..=149 => "Green",
        150..=209 => "Cyan",
        210..=269 => "Blue",
        270..=329 => "Purple",
        _ => "Red",
    }
}

/// Uniformly sample a 24-bit color as a zero-padded hex string
pub fn random_color() -> String {
    format!("#{:06x}", rand::random::<u32>() & 0xff_ffff)
}

/// Extension trait for styling strings with palette swatches via owo-colors
pub trait PaletteColorize: OwoColorize {
    /// Render in the swatch's color as foreground
    #[inline]
    fn in_swatch(self, swatch: &Swatch) -> impl fmt::Display
    where
        Self: Sized + Display,
    {
        let rgb = Rgb::from_hex(&swatch.hex).unwrap_or(Rgb::new(255, 255, 255));
        format!("{}", self.truecolor(rgb.r, rgb.g, rgb.b))
    }

    /// Render on the swatch's color as background, with contrast-aware text
    #[inline]
    fn on_swatch(self, swatch: &Swatch) -> impl fmt::Display
    where
        Self: Sized + Display,
    {
        let bg = Rgb::from_hex(&swatch.hex).unwrap_or(Rgb::new(255, 255, 255));
        let fg = if bg.is_light() {
            Rgb::new(0, 0, 0)
        } else {
            Rgb::new(255, 255, 255)
        };
        format!(
            "{}",
            self.truecolor(fg.r, fg.g, fg.b)
                .on_truecolor(bg.r, bg.g, bg.b)
        )
    }
}

impl<T: OwoColorize + Display> PaletteColorize for T {}

/// UI chrome colors for the palette explorer
pub mod theme {
    use super::Rgb;

    pub const BASE: Rgb = Rgb::new(15, 18, 20); // #0F1214
    pub const PANEL: Rgb = Rgb::new(29, 36, 40); // #1D2428
    pub const BORDER: Rgb = Rgb::new(56, 66, 72); // #384248

    pub const TEXT_PRIMARY: Rgb = Rgb::new(230, 237, 243); // #E6EDF3
    pub const TEXT_SECONDARY: Rgb = Rgb::new(139, 148, 158); // #8B949E

    pub const ACCENT: Rgb = Rgb::new(99, 102, 241); // #6366F1
    pub const WARNING: Rgb = Rgb::new(255, 191, 0); // #FFBF00
}
