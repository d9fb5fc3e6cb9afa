//! Color schemes and multi-stop interpolation.

/// RGB color as (r, g, b) with values in 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A color stop: position in [0, 1] mapped to an RGB color.
#[derive(Debug, Clone, Copy)]
pub struct ColorStop {
    pub t: f64,
    pub color: Rgb,
}

impl ColorStop {
    pub const fn new(t: f64, r: u8, g: u8, b: u8) -> Self {
        Self {
            t,
            color: Rgb::new(r, g, b),
        }
    }
}

/// Available color schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorScheme {
    /// Blue -> Cyan -> Yellow -> Red; cool = low stress, warm = high.
    Stress,
    /// Brown -> Yellow -> Green, for NDVI maps.
    Ndvi,
    /// Black -> White.
    Grayscale,
}

impl ColorScheme {
    /// All available schemes.
    pub const ALL: &[ColorScheme] = &[Self::Stress, Self::Ndvi, Self::Grayscale];

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stress => "Stress",
            Self::Ndvi => "NDVI",
            Self::Grayscale => "Grayscale",
        }
    }
}

// ─── Color stop definitions ─────────────────────────────────────────────

/// Perceptually ordered cool-to-warm ramp for stress probability.
const STRESS_STOPS: &[ColorStop] = &[
    ColorStop::new(0.00, 0, 0, 131),
    ColorStop::new(0.20, 0, 96, 255),
    ColorStop::new(0.40, 0, 213, 255),
    ColorStop::new(0.60, 255, 229, 0),
    ColorStop::new(0.80, 255, 100, 0),
    ColorStop::new(1.00, 128, 0, 0),
];

const NDVI_STOPS: &[ColorStop] = &[
    ColorStop::new(0.00, 121, 72, 24),
    ColorStop::new(0.30, 201, 168, 62),
    ColorStop::new(0.50, 238, 229, 104),
    ColorStop::new(0.70, 98, 178, 52),
    ColorStop::new(1.00, 12, 98, 22),
];

// ─── Interpolation engine ───────────────────────────────────────────────

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn lerp_color(c1: Rgb, c2: Rgb, t: f64) -> Rgb {
    Rgb::new(
        lerp(c1.r as f64, c2.r as f64, t).round() as u8,
        lerp(c1.g as f64, c2.g as f64, t).round() as u8,
        lerp(c1.b as f64, c2.b as f64, t).round() as u8,
    )
}

fn multi_stop(stops: &[ColorStop], t: f64) -> Rgb {
    if t <= 0.0 {
        return stops[0].color;
    }
    if t >= 1.0 {
        return stops[stops.len() - 1].color;
    }
    for i in 1..stops.len() {
        if t <= stops[i].t {
            let ratio = (t - stops[i - 1].t) / (stops[i].t - stops[i - 1].t);
            return lerp_color(stops[i - 1].color, stops[i].color, ratio);
        }
    }
    stops[stops.len() - 1].color
}

/// Evaluate a color scheme at normalized position `t` ∈ [0, 1].
///
/// Positions outside [0, 1] clamp to the ramp endpoints.
pub fn evaluate(scheme: ColorScheme, t: f64) -> Rgb {
    match scheme {
        ColorScheme::Stress => multi_stop(STRESS_STOPS, t),
        ColorScheme::Ndvi => multi_stop(NDVI_STOPS, t),
        ColorScheme::Grayscale => {
            let v = (t.clamp(0.0, 1.0) * 255.0).round() as u8;
            Rgb::new(v, v, v)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stress_endpoints() {
        assert_eq!(evaluate(ColorScheme::Stress, 0.0), Rgb::new(0, 0, 131));
        assert_eq!(evaluate(ColorScheme::Stress, 1.0), Rgb::new(128, 0, 0));
    }

    #[test]
    fn stress_is_cool_to_warm() {
        // Low stress leans blue, high stress leans red.
        let low = evaluate(ColorScheme::Stress, 0.1);
        let high = evaluate(ColorScheme::Stress, 0.9);
        assert!(low.b > low.r);
        assert!(high.r > high.b);
    }

    #[test]
    fn grayscale_midpoint() {
        assert_eq!(evaluate(ColorScheme::Grayscale, 0.5), Rgb::new(128, 128, 128));
    }

    #[test]
    fn ndvi_endpoints() {
        assert_eq!(evaluate(ColorScheme::Ndvi, 0.0), Rgb::new(121, 72, 24));
        assert_eq!(evaluate(ColorScheme::Ndvi, 1.0), Rgb::new(12, 98, 22));
    }

    #[test]
    fn clamps_outside_range() {
        assert_eq!(
            evaluate(ColorScheme::Stress, -0.5),
            evaluate(ColorScheme::Stress, 0.0)
        );
        assert_eq!(
            evaluate(ColorScheme::Stress, 1.5),
            evaluate(ColorScheme::Stress, 1.0)
        );
    }
}
