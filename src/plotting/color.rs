//! Color parsing and colormaps for plots.

use std::fmt;

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parse `#rrggbb` or a single-letter color code (`r`, `g`, `b`, `c`,
    /// `m`, `y`, `k`, `w`).
    pub fn parse(color: &str) -> Option<Self> {
        let color = color.trim();
        if let Some(hex) = color.strip_prefix('#') {
            if hex.len() != 6 {
                return None;
            }
            let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
            return Some(Rgb(channel(0)?, channel(2)?, channel(4)?));
        }
        match color {
            "r" | "red" => Some(Rgb(255, 0, 0)),
            "g" | "green" => Some(Rgb(0, 128, 0)),
            "b" | "blue" => Some(Rgb(0, 0, 255)),
            "c" | "cyan" => Some(Rgb(0, 191, 191)),
            "m" | "magenta" => Some(Rgb(191, 0, 191)),
            "y" | "yellow" => Some(Rgb(191, 191, 0)),
            "k" | "black" => Some(Rgb(0, 0, 0)),
            "w" | "white" => Some(Rgb(255, 255, 255)),
            _ => None,
        }
    }

    /// Like [`Rgb::parse`], falling back to mid gray.
    pub fn parse_or_gray(color: &str) -> Self {
        Self::parse(color).unwrap_or_else(|| {
            log::warn!("Unknown color '{}', using gray", color);
            Rgb(128, 128, 128)
        })
    }

    fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// A piecewise-linear colormap over `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Colormap {
    name: &'static str,
    stops: &'static [(f64, Rgb)],
}

/// Black through red and orange to white.
pub const FIRE: Colormap = Colormap {
    name: "fire",
    stops: &[
        (0.0, Rgb(0, 0, 0)),
        (0.25, Rgb(140, 12, 2)),
        (0.5, Rgb(230, 62, 0)),
        (0.75, Rgb(255, 166, 24)),
        (1.0, Rgb(255, 255, 255)),
    ],
};

pub const GRAY: Colormap = Colormap {
    name: "gray",
    stops: &[(0.0, Rgb(0, 0, 0)), (1.0, Rgb(255, 255, 255))],
};

impl Colormap {
    /// Look up a colormap by name, falling back to [`FIRE`].
    pub fn by_name(name: &str) -> Self {
        match name {
            "fire" => FIRE,
            "gray" | "grey" => GRAY,
            other => {
                log::warn!("Unknown colormap '{}', using fire", other);
                FIRE
            }
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Color at `t`, clamped to `[0, 1]`.
    pub fn sample(&self, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        for pair in self.stops.windows(2) {
            let ((t0, c0), (t1, c1)) = (pair[0], pair[1]);
            if t <= t1 {
                let span = t1 - t0;
                let local = if span > 0.0 { (t - t0) / span } else { 0.0 };
                return c0.lerp(c1, local);
            }
        }
        self.stops.last().map(|(_, c)| *c).unwrap_or(Rgb(0, 0, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_colors() {
        assert_eq!(Rgb::parse("r"), Some(Rgb(255, 0, 0)));
        assert_eq!(Rgb::parse("#1a2B3c"), Some(Rgb(0x1a, 0x2b, 0x3c)));
        assert_eq!(Rgb::parse("#123"), None);
        assert_eq!(Rgb::parse("chartreuse"), None);
        assert_eq!(Rgb::parse_or_gray("chartreuse"), Rgb(128, 128, 128));
    }

    #[test]
    fn test_display_is_hex() {
        assert_eq!(Rgb(255, 0, 16).to_string(), "#ff0010");
    }

    #[test]
    fn test_fire_endpoints() {
        assert_eq!(FIRE.sample(0.0), Rgb(0, 0, 0));
        assert_eq!(FIRE.sample(1.0), Rgb(255, 255, 255));
        assert_eq!(FIRE.sample(2.0), Rgb(255, 255, 255));
        assert_eq!(FIRE.sample(0.5), Rgb(230, 62, 0));
    }

    #[test]
    fn test_fire_is_monotonic_in_brightness() {
        let brightness = |c: Rgb| u32::from(c.0) + u32::from(c.1) + u32::from(c.2);
        let samples: Vec<u32> = (0..=20)
            .map(|i| brightness(FIRE.sample(f64::from(i) / 20.0)))
            .collect();
        assert!(samples.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_unknown_colormap_falls_back_to_fire() {
        assert_eq!(Colormap::by_name("viridis").name(), "fire");
        assert_eq!(Colormap::by_name("gray").name(), "gray");
    }
}
