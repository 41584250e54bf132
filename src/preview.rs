//! Terminal swatch preview
//!
//! Prints the generated palette as truecolor blocks so the user can judge
//! the theme before unpacking any config.

use crate::theme::{ColorScheme, Rgb, Theme};
use crossterm::style::{Color, ResetColor, SetBackgroundColor, SetForegroundColor};

const SWATCH: &str = "  ";

fn color_of(hex: &str) -> Color {
    let c = Rgb::parse_hex_or_black(hex);
    Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

fn swatch(hex: &str) -> String {
    format!("{}{}{}", SetBackgroundColor(color_of(hex)), SWATCH, ResetColor)
}

fn labeled(label: &str, hex: &str) -> String {
    format!("  {:<12} {} {}", label, swatch(hex), hex)
}

fn scheme_row(scheme: &ColorScheme) -> String {
    scheme
        .entries()
        .iter()
        .map(|(_, hex)| swatch(hex))
        .collect::<Vec<_>>()
        .join("")
}

/// Render the full preview as a string (kept separate from printing so it
/// stays testable).
pub fn render_preview(theme: &Theme) -> String {
    let mut out = String::new();
    out.push_str(&labeled("background", &theme.primary.background));
    out.push('\n');
    out.push_str(&labeled("foreground", &theme.primary.foreground));
    out.push('\n');
    out.push_str(&labeled("accent", theme.accent_or_blue()));
    out.push('\n');
    out.push('\n');
    out.push_str(&format!("  {:<12} {}\n", "normal", scheme_row(&theme.normal)));
    out.push_str(&format!("  {:<12} {}\n", "bright", scheme_row(&theme.bright)));
    out
}

/// Print the preview, with a sample line rendered in the theme's own
/// foreground-on-background pair.
pub fn print_preview(theme: &Theme) {
    println!();
    print!("{}", render_preview(theme));
    println!();
    println!(
        "  {}{}  the quick brown fox jumps over the lazy dog  {}",
        SetBackgroundColor(color_of(&theme.primary.background)),
        SetForegroundColor(color_of(&theme.primary.foreground)),
        ResetColor
    );
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Primary;

    fn theme() -> Theme {
        let scheme = ColorScheme {
            black: "#15161e".into(),
            red: "#f7768e".into(),
            green: "#9ece6a".into(),
            yellow: "#e0af68".into(),
            blue: "#7aa2f7".into(),
            magenta: "#bb9af7".into(),
            cyan: "#7dcfff".into(),
            white: "#a9b1d6".into(),
        };
        Theme {
            accent: None,
            primary: Primary {
                background: "#1a1b26".into(),
                foreground: "#c0caf5".into(),
            },
            normal: scheme.clone(),
            bright: scheme,
        }
    }

    #[test]
    fn test_preview_lists_primary_and_accent() {
        let out = render_preview(&theme());
        assert!(out.contains("#1a1b26"));
        assert!(out.contains("#c0caf5"));
        // accent falls back to normal blue
        assert!(out.contains("#7aa2f7"));
    }

    #[test]
    fn test_preview_is_deterministic() {
        assert_eq!(render_preview(&theme()), render_preview(&theme()));
    }
}
