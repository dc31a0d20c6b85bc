//! Implements utilities to create color values.

use regex::Regex;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const NEUTRAL: Color = Color {
        r: 158.0 / 255.0,
        g: 158.0 / 255.0,
        b: 158.0 / 255.0,
    };

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Color {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    pub fn rgb(&self) -> (f64, f64, f64) {
        (self.r, self.g, self.b)
    }

    pub fn rgb8(&self) -> (u8, u8, u8) {
        (
            Self::channel8(self.r),
            Self::channel8(self.g),
            Self::channel8(self.b),
        )
    }

    fn channel8(x: f64) -> u8 {
        (x.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    /// Black or white, whichever reads better on top of this color.
    pub fn contrast(&self) -> Color {
        let luma = 0.299 * self.r + 0.587 * self.g + 0.114 * self.b;
        if luma > 0.6 {
            Color::from_rgb8(0, 0, 0)
        } else {
            Color::from_rgb8(0xFF, 0xFF, 0xFF)
        }
    }
}

impl FromStr for Color {
    type Err = &'static str;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let re = Regex::new(r"^#([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})$")
            .map_err(|_| "invalid color pattern")?;
        let captures = re.captures(s).ok_or("string not in form #RRGGBB")?;
        let mut channels = [0u8; 3];
        for (channel, capture) in channels.iter_mut().zip(captures.iter().skip(1)) {
            let hex = capture.ok_or("string not in form #RRGGBB")?.as_str();
            *channel = u8::from_str_radix(hex, 16).map_err(|_| "invalid hex digit")?;
        }
        let [r, g, b] = channels;
        Ok(Color::from_rgb8(r, g, b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.rgb8();
        write!(f, "#{:02X}{:02X}{:02X}", r, g, b)
    }
}

struct ColorVisitor;

impl<'de> Visitor<'de> for ColorVisitor {
    type Value = Color;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string in the form #RRGGBB")
    }

    fn visit_str<E>(self, v: &str) -> std::result::Result<Self::Value, E>
    where
        E: de::Error,
    {
        v.parse::<Color>().map_err(|e| E::custom(e))
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Color, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(ColorVisitor)
    }
}

const DEFAULT_PALETTE: &[(&str, (u8, u8, u8))] = &[
    ("Grass", (0x78, 0xC8, 0x50)),
    ("Fire", (0xF0, 0x80, 0x30)),
    ("Water", (0x68, 0x90, 0xF0)),
    ("Lightning", (0xF8, 0xD0, 0x30)),
    ("Psychic", (0xF8, 0x58, 0x88)),
    ("Fighting", (0xC0, 0x30, 0x28)),
    ("Darkness", (0x70, 0x58, 0x48)),
    ("Metal", (0xB8, 0xB8, 0xD0)),
    ("Dragon", (0x70, 0x38, 0xF8)),
    ("Fairy", (0xEE, 0x99, 0xAC)),
    ("Colorless", (0xA8, 0xA8, 0x78)),
    ("草", (0x78, 0xC8, 0x50)),
    ("炎", (0xF0, 0x80, 0x30)),
    ("水", (0x68, 0x90, 0xF0)),
    ("雷", (0xF8, 0xD0, 0x30)),
    ("超", (0xF8, 0x58, 0x88)),
    ("闘", (0xC0, 0x30, 0x28)),
    ("悪", (0x70, 0x58, 0x48)),
    ("鋼", (0xB8, 0xB8, 0xD0)),
    ("竜", (0x70, 0x38, 0xF8)),
    ("無色", (0xA8, 0xA8, 0x78)),
];

/// Badge colors keyed by attribute.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: HashMap<String, Color>,
    fallback: Color,
}

impl Default for Palette {
    fn default() -> Self {
        let colors = DEFAULT_PALETTE
            .iter()
            .map(|(k, (r, g, b))| (k.to_string(), Color::from_rgb8(*r, *g, *b)))
            .collect();
        Self {
            colors,
            fallback: Color::NEUTRAL,
        }
    }
}

impl Palette {
    /// Overrides or adds colors on top of the built-in ones.
    pub fn extend(&mut self, colors: impl IntoIterator<Item = (String, Color)>) {
        self.colors.extend(colors);
    }

    /// The color for an attribute; unknown or missing attributes get the neutral one.
    pub fn color(&self, attribute: Option<&str>) -> Color {
        attribute
            .and_then(|a| self.colors.get(a))
            .copied()
            .unwrap_or(self.fallback)
    }
}
