//! Theme data model and color math
//!
//! `ThemeResponse` mirrors the JSON the model returns; `validate` upgrades
//! it into a `Theme` with every field present and checked, so everything
//! downstream (preview, renderers, archive) gets infallible access.

use serde::Deserialize;

/// A parsed 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    /// Parse a `#RRGGBB` string (case-insensitive). Returns `None` for
    /// anything that isn't a `#` followed by exactly six hex digits.
    pub fn parse_hex(hex: &str) -> Option<Rgb> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
        let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
        let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
        Some(Rgb { r, g, b })
    }

    /// Parse, treating unparseable input as black. Total function for
    /// callers that must always produce a color.
    pub fn parse_hex_or_black(hex: &str) -> Rgb {
        Rgb::parse_hex(hex).unwrap_or(Rgb::BLACK)
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// True if the string is a valid `#RRGGBB` color.
pub fn is_valid_hex(hex: &str) -> bool {
    Rgb::parse_hex(hex).is_some()
}

/// Blend each channel toward 255 by `amount` percent (0-100).
///
/// Fractional channel values truncate, so lighten("#000000", 50) lands on
/// "#7f7f7f". Output channels never leave [0, 255].
pub fn lighten(hex: &str, amount: u8) -> String {
    let c = Rgb::parse_hex_or_black(hex);
    let amt = amount.min(100) as f32 / 100.0;
    let blend = |ch: u8| -> u8 { ((ch as f32) + (255.0 - ch as f32) * amt).min(255.0) as u8 };
    Rgb {
        r: blend(c.r),
        g: blend(c.g),
        b: blend(c.b),
    }
    .to_hex()
}

/// Decompose a hex color into a decimal "R, G, B" triple.
pub fn rgb_triple(hex: &str) -> String {
    let c = Rgb::parse_hex_or_black(hex);
    format!("{}, {}, {}", c.r, c.g, c.b)
}

/// Strip the `#` so the hex digits can be embedded in formats with their
/// own prefix convention (hyprland `rgb(...)` / `0xAA...`).
pub fn bare_hex(hex: &str) -> String {
    let c = Rgb::parse_hex_or_black(hex);
    format!("{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}

/// The eight ANSI slots of one intensity level.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ColorScheme {
    pub black: String,
    pub red: String,
    pub green: String,
    pub yellow: String,
    pub blue: String,
    pub magenta: String,
    pub cyan: String,
    pub white: String,
}

impl ColorScheme {
    /// Slot name/value pairs in ANSI order.
    pub fn entries(&self) -> [(&'static str, &str); 8] {
        [
            ("black", &self.black),
            ("red", &self.red),
            ("green", &self.green),
            ("yellow", &self.yellow),
            ("blue", &self.blue),
            ("magenta", &self.magenta),
            ("cyan", &self.cyan),
            ("white", &self.white),
        ]
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Primary {
    pub background: String,
    pub foreground: String,
}

/// The wire-format theme exactly as the model returns it. `normal` and
/// `bright` are optional here so a schema violation surfaces as our own
/// message instead of a bare decode error.
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeResponse {
    pub accent: Option<String>,
    pub primary: Primary,
    pub normal: Option<ColorScheme>,
    pub bright: Option<ColorScheme>,
}

impl ThemeResponse {
    /// The gate every theme passes before it is displayed or rendered:
    /// rejects a missing `normal` or `bright` scheme and any color field
    /// that isn't `#RRGGBB`, and yields a `Theme` with nothing optional
    /// left but the accent.
    pub fn validate(self) -> Result<Theme, String> {
        let normal = self
            .normal
            .ok_or_else(|| "theme is missing the `normal` color scheme".to_string())?;
        let bright = self
            .bright
            .ok_or_else(|| "theme is missing the `bright` color scheme".to_string())?;
        let theme = Theme {
            accent: self.accent,
            primary: self.primary,
            normal,
            bright,
        };
        theme.check_colors()?;
        Ok(theme)
    }
}

/// A validated theme: primary pair, 16 ANSI slots, optional accent.
/// Only obtainable through `ThemeResponse::validate`.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub accent: Option<String>,
    pub primary: Primary,
    pub normal: ColorScheme,
    pub bright: ColorScheme,
}

impl Theme {
    fn check_colors(&self) -> Result<(), String> {
        let check = |field: &str, value: &str| -> Result<(), String> {
            if is_valid_hex(value) {
                Ok(())
            } else {
                Err(format!("invalid hex color for `{}`: {:?}", field, value))
            }
        };

        check("primary.background", &self.primary.background)?;
        check("primary.foreground", &self.primary.foreground)?;
        if let Some(accent) = &self.accent {
            check("accent", accent)?;
        }
        for (name, value) in self.normal.entries() {
            check(&format!("normal.{}", name), value)?;
        }
        for (name, value) in self.bright.entries() {
            check(&format!("bright.{}", name), value)?;
        }
        Ok(())
    }

    /// The accent stand-in rule: normal blue substitutes when the model
    /// returned no accent.
    pub fn accent_or_blue(&self) -> &str {
        self.accent.as_deref().unwrap_or(&self.normal.blue)
    }
}
