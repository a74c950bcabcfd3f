//! Harmony rules for deriving palettes from a seed color.
//!
//! A palette is generated from the first base color only: the seed is
//! converted to HSL, one of six rules maps it to an ordered run of HSL
//! points, and each point is rendered back to hex with a coarse name
//! attached. Generation is deterministic and pure; every failure mode
//! degrades to an empty palette rather than an error.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::colors::Hsl;
use crate::palette::Swatch;

/// Hue step between adjacent analogous colors, in degrees
const ANALOGOUS_STEP: i32 = 30;

/// Hue step between variations inside a complementary cluster
const VARIATION_STEP: i32 = 15;

/// Hue step between variations inside a triadic/tetradic cluster
const CLUSTER_VARIATION_STEP: i32 = 10;

/// A color harmony rule.
///
/// The set is closed: rule dispatch is an exhaustive match with no fallback
/// arm. Untrusted strategy tags enter through [`Harmony::parse`], which
/// returns `None` for anything outside the set so callers can degrade to an
/// empty palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Harmony {
    /// Adjacent hues, 30 degrees apart, centered on the seed
    #[default]
    Analogous,
    /// Two clusters: the seed hue and its opposite across the wheel
    Complementary,
    /// Three clusters spaced 120 degrees apart
    Triadic,
    /// Four clusters spaced 90 degrees apart
    Tetradic,
    /// Fixed hue, walking saturation and lightness
    Monochromatic,
    /// Fixed hue and saturation, lightness swept dark to light
    Shades,
}

impl Harmony {
    /// All harmony rules, in UI cycling order
    pub const ALL: [Harmony; 6] = [
        Self::Analogous,
        Self::Complementary,
        Self::Triadic,
        Self::Tetradic,
        Self::Monochromatic,
        Self::Shades,
    ];

    /// Parse a strategy tag from an external source.
    ///
    /// Unknown tags yield `None`, never a panic; a palette generated from an
    /// unrecognized tag is simply empty.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "analogous" => Some(Self::Analogous),
            "complementary" => Some(Self::Complementary),
            "triadic" => Some(Self::Triadic),
            "tetradic" => Some(Self::Tetradic),
            "monochromatic" => Some(Self::Monochromatic),
            "shades" => Some(Self::Shades),
            _ => None,
        }
    }

    /// The wire tag for this rule
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Analogous => "analogous",
            Self::Complementary => "complementary",
            Self::Triadic => "triadic",
            Self::Tetradic => "tetradic",
            Self::Monochromatic => "monochromatic",
            Self::Shades => "shades",
        }
    }

    /// Display label for UI listings
    pub fn label(&self) -> &'static str {
        match self {
            Self::Analogous => "Analogous",
            Self::Complementary => "Complementary",
            Self::Triadic => "Triadic",
            Self::Tetradic => "Tetradic",
            Self::Monochromatic => "Monochromatic",
            Self::Shades => "Shades",
        }
    }

    /// The next rule in cycling order, wrapping at the end
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|h| h == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Harmony {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Wrap a hue into `[0, 360)`, handling arbitrarily negative inputs
pub fn normalize_hue(h: i32) -> u16 {
    h.rem_euclid(360) as u16
}

/// Generate a palette from the first base color.
///
/// Only the first entry of `base_colors` seeds generation; additional base
/// colors are display metadata carried by the caller, not generator input.
/// Returns an empty palette when there is no base color or its hex does not
/// parse.
///
/// The output length equals `count` for every rule once `count > 0`; output
/// order is generation order (cluster by cluster, step by step), which is the
/// palette's visual left-to-right sequence.
pub fn generate_palette(base_colors: &[Swatch], harmony: Harmony, count: usize) -> Vec<Swatch> {
    let Some(seed) = base_colors.first() else {
        return Vec::new();
    };
    let Some(rgb) = crate::colors::Rgb::from_hex(&seed.hex) else {
        return Vec::new();
    };
    let seed = rgb.to_hsl();

    match harmony {
        Harmony::Analogous => analogous(seed, count),
        Harmony::Complementary => complementary(seed, count),
        Harmony::Triadic => clustered(seed, count, 120, 3),
        Harmony::Tetradic => clustered(seed, count, 90, 4),
        Harmony::Monochromatic => monochromatic(seed, count),
        Harmony::Shades => shades(seed, count),
    }
}

/// Render one HSL point as a named swatch.
///
/// All rule arithmetic funnels through here; `Hsl::new` wraps the hue and
/// clamps saturation/lightness, so every emitted hex is parseable.
fn swatch_at(h: i32, s: i32, l: i32) -> Swatch {
    Swatch::named(Hsl::new(h, s, l).to_rgb().to_hex())
}

/// `count` hues 30 degrees apart, centered on the seed hue
fn analogous(seed: Hsl, count: usize) -> Vec<Swatch> {
    let start = i32::from(seed.h()) - ANALOGOUS_STEP * (count as i32 - 1) / 2;
    (0..count as i32)
        .map(|i| {
            swatch_at(
                start + i * ANALOGOUS_STEP,
                i32::from(seed.s()),
                i32::from(seed.l()),
            )
        })
        .collect()
}

/// Half the colors fanned out from the seed hue, half from its complement.
///
/// Odd counts give the seed cluster the extra color.
fn complementary(seed: Hsl, count: usize) -> Vec<Swatch> {
    let h = i32::from(seed.h());
    let s = i32::from(seed.s());
    let l = i32::from(seed.l());

    let base_count = count.div_ceil(2);
    let mut colors = Vec::with_capacity(count);

    for i in 0..base_count as i32 {
        colors.push(swatch_at(h + i * VARIATION_STEP, s, l));
    }
    for i in 0..(count - base_count) as i32 {
        colors.push(swatch_at(h + 180 + i * VARIATION_STEP, s, l));
    }

    colors
}

/// Evenly spaced hue clusters with small fans around each cluster hue.
///
/// Each cluster receives `ceil(count / clusters)` colors, 10 degrees apart
/// and centered on the cluster hue; generation stops the moment `count`
/// colors exist, so the last cluster may be truncated or skipped entirely.
fn clustered(seed: Hsl, count: usize, cluster_step: i32, clusters: usize) -> Vec<Swatch> {
    let s = i32::from(seed.s());
    let l = i32::from(seed.l());

    let per_cluster = count.div_ceil(clusters);
    let mut colors = Vec::with_capacity(count);

    'clusters: for c in 0..clusters as i32 {
        let cluster_hue = i32::from(seed.h()) + c * cluster_step;
        for j in 0..per_cluster as i32 {
            if colors.len() >= count {
                break 'clusters;
            }
            let variation = j * CLUSTER_VARIATION_STEP
                - per_cluster as i32 * CLUSTER_VARIATION_STEP / 2;
            colors.push(swatch_at(cluster_hue + variation, s, l));
        }
    }

    colors
}

/// Fixed hue; saturation and lightness each walk up from `seed - 20` in steps
/// of 10, clamped to `[20, 100]` and `[10, 90]` respectively
fn monochromatic(seed: Hsl, count: usize) -> Vec<Swatch> {
    let h = i32::from(seed.h());

    (0..count as i32)
        .map(|i| {
            let step = i * 10 - 20;
            let s = (i32::from(seed.s()) + step).clamp(20, 100);
            let l = (i32::from(seed.l()) + step).clamp(10, 90);
            swatch_at(h, s, l)
        })
        .collect()
}

/// Fixed hue and saturation; lightness sweeps evenly from 10% to 90%.
///
/// A count of one would divide the sweep by zero, so it yields a single
/// swatch at the seed's own lightness instead.
fn shades(seed: Hsl, count: usize) -> Vec<Swatch> {
    let h = i32::from(seed.h());
    let s = i32::from(seed.s());

    if count == 0 {
        return Vec::new();
    }
    if count == 1 {
        return vec![swatch_at(h, s, i32::from(seed.l()))];
    }

    (0..count)
        .map(|i| {
            let l = 10.0 + (i as f64 * 80.0) / (count as f64 - 1.0);
            swatch_at(h, s, l.round() as i32)
        })
        .collect()
}

/// Produce an opaque, practically-unique palette identifier.
///
/// Base-36 millisecond timestamp plus a random base-36 suffix. Collisions are
/// possible in principle; the id is a local-session join key, not a security
/// token.
pub fn generate_palette_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis());

    let mut id = to_base36(millis);
    for _ in 0..8 {
        let digit = rand::random::<u32>() % 36;
        id.push(BASE36_DIGITS[digit as usize] as char);
    }
    id
}

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn to_base36(mut value: u128) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::Rgb;
    use pretty_assertions::assert_eq;

    fn seed(hex: &str) -> Vec<Swatch> {
        vec![Swatch::new(hex)]
    }

    /// Parse a generated swatch back to HSL for assertions
    fn hsl_of(swatch: &Swatch) -> (u16, u8, u8) {
        let hsl = Rgb::from_hex(&swatch.hex)
            .expect("generated swatch must parse")
            .to_hsl();
        (hsl.h(), hsl.s(), hsl.l())
    }

    fn hues_of(swatches: &[Swatch]) -> Vec<u16> {
        swatches.iter().map(|s| hsl_of(s).0).collect()
    }

    #[test]
    fn test_parse_tags() {
        for harmony in Harmony::ALL {
            assert_eq!(Harmony::parse(harmony.tag()), Some(harmony));
        }
        assert_eq!(Harmony::parse("duotone"), None);
        assert_eq!(Harmony::parse(""), None);
        assert_eq!(Harmony::parse("Analogous"), None, "tags are lowercase");
    }

    #[test]
    fn test_cycling_covers_all_rules() {
        let mut current = Harmony::Analogous;
        let mut seen = vec![current];
        for _ in 0..5 {
            current = current.next();
            seen.push(current);
        }
        assert_eq!(seen, Harmony::ALL.to_vec());
        assert_eq!(current.next(), Harmony::Analogous);
    }

    #[test]
    fn test_normalize_hue() {
        assert_eq!(normalize_hue(0), 0);
        assert_eq!(normalize_hue(360), 0);
        assert_eq!(normalize_hue(365), 5);
        assert_eq!(normalize_hue(-30), 330);
        assert_eq!(normalize_hue(-390), 330);
        assert_eq!(normalize_hue(1080), 0);

        for h in -1000..1000 {
            assert!(normalize_hue(h) < 360);
        }
    }

    #[test]
    fn test_empty_base_colors() {
        for harmony in Harmony::ALL {
            assert_eq!(generate_palette(&[], harmony, 5), Vec::new());
        }
    }

    #[test]
    fn test_unparsable_seed() {
        let base = seed("not-a-color");
        assert_eq!(generate_palette(&base, Harmony::Analogous, 5), Vec::new());
    }

    #[test]
    fn test_only_first_base_color_seeds() {
        let one = seed("#ff0000");
        let two = vec![Swatch::new("#ff0000"), Swatch::new("#0000ff")];
        for harmony in Harmony::ALL {
            assert_eq!(
                generate_palette(&one, harmony, 6),
                generate_palette(&two, harmony, 6)
            );
        }
    }

    #[test]
    fn test_every_rule_emits_parseable_hex_at_requested_length() {
        let base = seed("#6366f1");
        for harmony in Harmony::ALL {
            for count in 1..=10 {
                let palette = generate_palette(&base, harmony, count);
                assert_eq!(palette.len(), count, "{harmony} at count {count}");
                for swatch in &palette {
                    assert!(
                        Rgb::from_hex(&swatch.hex).is_some(),
                        "{harmony} emitted unparsable hex {}",
                        swatch.hex
                    );
                    assert!(swatch.name.is_some());
                }
            }
        }
    }

    #[test]
    fn test_zero_count_is_empty() {
        let base = seed("#6366f1");
        for harmony in Harmony::ALL {
            assert_eq!(generate_palette(&base, harmony, 0), Vec::new());
        }
    }

    #[test]
    fn test_analogous_spacing() {
        // Pure red sits at hue 0; five analogous colors span -60..+60
        let palette = generate_palette(&seed("#ff0000"), Harmony::Analogous, 5);
        assert_eq!(hues_of(&palette), vec![300, 330, 0, 30, 60]);

        // Saturation and lightness stay at the seed's values
        for swatch in &palette {
            let (_, s, l) = hsl_of(swatch);
            assert_eq!((s, l), (100, 50));
        }
    }

    #[test]
    fn test_analogous_even_count_centering() {
        // Even counts shift the span so the seed sits just right of center
        let palette = generate_palette(&seed("#ff0000"), Harmony::Analogous, 4);
        assert_eq!(hues_of(&palette), vec![315, 345, 15, 45]);
    }

    #[test]
    fn test_complementary_red() {
        // Spec scenario: #ff0000, count 4 -> two colors near 0, two near 180
        let palette = generate_palette(&seed("#ff0000"), Harmony::Complementary, 4);
        assert_eq!(hues_of(&palette), vec![0, 15, 180, 195]);
        for swatch in &palette {
            let (_, s, l) = hsl_of(swatch);
            assert_eq!((s, l), (100, 50));
        }
    }

    #[test]
    fn test_complementary_odd_count_favors_base_cluster() {
        let palette = generate_palette(&seed("#ff0000"), Harmony::Complementary, 5);
        assert_eq!(hues_of(&palette), vec![0, 15, 30, 180, 195]);
    }

    #[test]
    fn test_triadic_clusters() {
        // count 5, per-cluster 2, offsets -10/0; third cluster truncated
        let palette = generate_palette(&seed("#ff0000"), Harmony::Triadic, 5);
        assert_eq!(hues_of(&palette), vec![350, 0, 110, 120, 230]);
    }

    #[test]
    fn test_triadic_exact_multiple() {
        let palette = generate_palette(&seed("#ff0000"), Harmony::Triadic, 6);
        assert_eq!(hues_of(&palette), vec![350, 0, 110, 120, 230, 240]);
    }

    #[test]
    fn test_tetradic_clusters() {
        // count 4, one color per cluster, each offset by -5 from cluster hue
        let palette = generate_palette(&seed("#ff0000"), Harmony::Tetradic, 4);
        assert_eq!(hues_of(&palette), vec![355, 85, 175, 265]);
    }

    #[test]
    fn test_monochromatic_walk() {
        let palette = generate_palette(&seed("#ff0000"), Harmony::Monochromatic, 5);
        assert_eq!(palette.len(), 5);

        // Hue fixed at the seed; saturation/lightness walk and clamp
        let expected = [(80, 30), (90, 40), (100, 50), (100, 60), (100, 70)];
        for (swatch, (s, l)) in palette.iter().zip(expected) {
            let (h, got_s, got_l) = hsl_of(swatch);
            assert_eq!(h, 0);
            assert_eq!((i32::from(got_s), i32::from(got_l)), (s, l));
        }
    }

    #[test]
    fn test_monochromatic_clamps_low_lightness() {
        // A very dark seed clamps the first lightness steps to the floor
        let black_ish = Hsl::new(200, 50, 5).to_rgb().to_hex();
        let palette = generate_palette(&seed(&black_ish), Harmony::Monochromatic, 3);
        for swatch in &palette {
            let (_, _, l) = hsl_of(swatch);
            assert!((10..=90).contains(&i32::from(l)));
        }
    }

    #[test]
    fn test_shades_sweep() {
        let palette = generate_palette(&seed("#ff0000"), Harmony::Shades, 5);
        let lightness: Vec<u8> = palette.iter().map(|s| hsl_of(s).2).collect();
        assert_eq!(lightness, vec![10, 30, 50, 70, 90]);

        // Hue and saturation held at the seed
        for swatch in &palette {
            let (h, s, _) = hsl_of(swatch);
            assert_eq!((h, s), (0, 100));
        }
    }

    #[test]
    fn test_shades_single_count_uses_seed_lightness() {
        // The sweep formula divides by count - 1; a single shade short-circuits
        // to the seed's own lightness
        let palette = generate_palette(&seed("#ff0000"), Harmony::Shades, 1);
        assert_eq!(palette.len(), 1);
        assert_eq!(hsl_of(&palette[0]), (0, 100, 50));
        assert_eq!(palette[0].hex, "#ff0000");
    }

    #[test]
    fn test_gray_seed_stays_gray_for_hue_only_rules() {
        // Hue shifts on an achromatic seed are invisible: saturation is zero,
        // so every analogous swatch renders as the same gray
        let palette = generate_palette(&seed("#808080"), Harmony::Analogous, 5);
        for swatch in &palette {
            assert_eq!(swatch.hex, "#808080");
            assert_eq!(swatch.name.as_deref(), Some("Gray"));
        }

        // Monochromatic shifts saturation too, so grayness is not preserved
        let mono = generate_palette(&seed("#808080"), Harmony::Monochromatic, 5);
        assert!(mono.iter().any(|s| hsl_of(s).1 >= 10));
    }

    #[test]
    fn test_palette_ids_unique_and_base36() {
        let a = generate_palette_id();
        let b = generate_palette_id();
        assert_ne!(a, b);

        for id in [&a, &b] {
            assert!(id.len() > 8);
            assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn test_to_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(36 * 36 + 1), "101");
    }
}
