//! Per-target config renderers
//!
//! One pure function per output file. Every renderer takes a validated
//! `Theme` and returns the literal fragment text; none of them mutate the
//! theme and render order never affects content. `render_all` assembles
//! the full ordered file set the archive packages.

use crate::palette::nearest_named;
use crate::theme::{bare_hex, lighten, rgb_triple, Theme};

/// Derive a short slug from the prompt for file and archive names.
/// First three words, lowercased, non-alphanumerics collapsed to dashes.
pub fn theme_slug(prompt: &str) -> String {
    let words: Vec<String> = prompt
        .split_whitespace()
        .take(3)
        .map(|w| {
            w.chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
                .to_ascii_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        "themesmith".to_string()
    } else {
        words.join("-")
    }
}

/// Alacritty color section (TOML).
pub fn alacritty(theme: &Theme) -> String {
    let mut out = String::new();
    out.push_str("# Alacritty colors generated by themesmith\n");
    out.push_str("# Import from alacritty.toml via [general] import\n\n");
    out.push_str("[colors.primary]\n");
    out.push_str(&format!("background = \"{}\"\n", theme.primary.background));
    out.push_str(&format!("foreground = \"{}\"\n", theme.primary.foreground));
    for (section, scheme) in [("normal", &theme.normal), ("bright", &theme.bright)] {
        out.push_str(&format!("\n[colors.{}]\n", section));
        for (name, value) in scheme.entries() {
            out.push_str(&format!("{} = \"{}\"\n", name, value));
        }
    }
    out
}

/// btop theme file (`theme[key]="#hex"` lines).
pub fn btop(theme: &Theme) -> String {
    let normal = &theme.normal;
    let bright = &theme.bright;
    let accent = theme.accent_or_blue();
    let mut out = String::new();
    out.push_str("# btop theme generated by themesmith\n");
    let mut line = |key: &str, value: &str| {
        out.push_str(&format!("theme[{}]=\"{}\"\n", key, value));
    };
    line("main_bg", &theme.primary.background);
    line("main_fg", &theme.primary.foreground);
    line("title", &theme.primary.foreground);
    line("hi_fg", accent);
    line("selected_bg", &normal.black);
    line("selected_fg", accent);
    line("inactive_fg", &bright.black);
    line("proc_misc", accent);
    line("cpu_box", &normal.blue);
    line("mem_box", &normal.green);
    line("net_box", &normal.magenta);
    line("proc_box", &normal.cyan);
    line("div_line", &bright.black);
    line("temp_start", &normal.green);
    line("temp_mid", &normal.yellow);
    line("temp_end", &normal.red);
    line("cpu_start", &normal.cyan);
    line("cpu_mid", &normal.blue);
    line("cpu_end", &normal.magenta);
    line("free_start", &normal.green);
    line("used_start", &normal.red);
    line("available_start", &normal.yellow);
    out
}

/// Zen browser accent: a single decimal R, G, B triple.
pub fn zen_accent(theme: &Theme) -> String {
    format!("{}\n", rgb_triple(theme.accent_or_blue()))
}

/// Hyprland color variables.
pub fn hypr_colors(theme: &Theme) -> String {
    let mut out = String::new();
    out.push_str("# Hyprland colors generated by themesmith\n");
    out.push_str("# source = ~/.config/hypr/colors.conf\n\n");
    out.push_str(&format!(
        "$background = rgb({})\n",
        bare_hex(&theme.primary.background)
    ));
    out.push_str(&format!(
        "$foreground = rgb({})\n",
        bare_hex(&theme.primary.foreground)
    ));
    out.push_str(&format!("$accent = rgb({})\n", bare_hex(theme.accent_or_blue())));
    for (name, value) in theme.normal.entries() {
        out.push_str(&format!("${} = rgb({})\n", name, bare_hex(value)));
    }
    for (name, value) in theme.bright.entries() {
        out.push_str(&format!("$bright_{} = rgb({})\n", name, bare_hex(value)));
    }
    out
}

/// Hyprland border block: 0xAA-prefixed ARGB colors with a fixed `ee`
/// opacity byte, two gradient stops (accent and accent lightened 30%)
/// at 45 degrees.
pub fn hypr_general(theme: &Theme) -> String {
    let accent = theme.accent_or_blue();
    let accent_light = lighten(accent, 30);
    format!(
        "# Hyprland border colors generated by themesmith\n\n\
         general {{\n    \
             col.active_border = 0xee{} 0xee{} 45deg\n    \
             col.inactive_border = 0xaa{}\n\
         }}\n",
        bare_hex(accent),
        bare_hex(&accent_light),
        bare_hex(&theme.bright.black)
    )
}

/// Hyprlock fields use decimal rgba(R, G, B, alpha).
pub fn hyprlock(theme: &Theme) -> String {
    let accent = theme.accent_or_blue();
    let normal = &theme.normal;
    format!(
        "# Hyprlock colors generated by themesmith\n\n\
         background {{\n    \
             color = rgba({bg}, 1.0)\n\
         }}\n\n\
         input-field {{\n    \
             inner_color = rgba({bg}, 0.8)\n    \
             font_color = rgba({fg}, 1.0)\n    \
             outer_color = rgba({accent}, 1.0)\n    \
             check_color = rgba({green}, 1.0)\n    \
             fail_color = rgba({red}, 1.0)\n\
         }}\n",
        bg = rgb_triple(&theme.primary.background),
        fg = rgb_triple(&theme.primary.foreground),
        accent = rgb_triple(accent),
        green = rgb_triple(&normal.green),
        red = rgb_triple(&normal.red),
    )
}

/// Dunst notification colors.
pub fn dunst(theme: &Theme) -> String {
    let accent = theme.accent_or_blue();
    let normal = &theme.normal;
    format!(
        "# Dunst colors generated by themesmith\n\n\
         [global]\n    \
             frame_color = \"{accent}\"\n    \
             separator_color = frame\n\n\
         [urgency_low]\n    \
             background = \"{bg}\"\n    \
             foreground = \"{fg}\"\n\n\
         [urgency_normal]\n    \
             background = \"{bg}\"\n    \
             foreground = \"{fg}\"\n\n\
         [urgency_critical]\n    \
             background = \"{bg}\"\n    \
             foreground = \"{fg}\"\n    \
             frame_color = \"{red}\"\n",
        accent = accent,
        bg = theme.primary.background,
        fg = theme.primary.foreground,
        red = normal.red,
    )
}

/// Neovim colorscheme stub. Carries the derived name and the original
/// prompt so the scheme stays traceable to what produced it.
pub fn nvim(theme: &Theme, name: &str, prompt: &str) -> String {
    let normal = &theme.normal;
    let bright = &theme.bright;
    let mut out = String::new();
    out.push_str(&format!("-- {}.lua\n", name));
    out.push_str(&format!(
        "-- Generated by themesmith from: {:?}\n\n",
        prompt
    ));
    out.push_str("vim.opt.termguicolors = true\n");
    out.push_str(&format!("vim.g.colors_name = \"{}\"\n\n", name));
    for (i, (_, value)) in normal.entries().iter().enumerate() {
        out.push_str(&format!("vim.g.terminal_color_{} = \"{}\"\n", i, value));
    }
    for (i, (_, value)) in bright.entries().iter().enumerate() {
        out.push_str(&format!("vim.g.terminal_color_{} = \"{}\"\n", i + 8, value));
    }
    out.push_str(&format!(
        "\nvim.api.nvim_set_hl(0, \"Normal\", {{ fg = \"{}\", bg = \"{}\" }})\n",
        theme.primary.foreground, theme.primary.background
    ));
    out.push_str(&format!(
        "vim.api.nvim_set_hl(0, \"CursorLine\", {{ bg = \"{}\" }})\n",
        normal.black
    ));
    out.push_str(&format!(
        "vim.api.nvim_set_hl(0, \"Visual\", {{ bg = \"{}\" }})\n",
        bright.black
    ));
    out.push_str(&format!(
        "vim.api.nvim_set_hl(0, \"Search\", {{ fg = \"{}\", bg = \"{}\" }})\n",
        theme.primary.background,
        theme.accent_or_blue()
    ));
    out
}

fn define_colors(pairs: &[(&str, &str)]) -> String {
    let mut out = String::new();
    for (name, value) in pairs {
        out.push_str(&format!("@define-color {} {};\n", name, value));
    }
    out
}

/// GTK3 color variables.
pub fn gtk3_css(theme: &Theme) -> String {
    let mut out = String::from("/* GTK3 colors generated by themesmith */\n");
    out.push_str(&define_colors(&[
        ("theme_bg_color", &theme.primary.background),
        ("theme_fg_color", &theme.primary.foreground),
        ("theme_selected_bg_color", theme.accent_or_blue()),
        ("theme_selected_fg_color", &theme.primary.background),
    ]));
    out
}

/// GTK4/libadwaita color variables.
pub fn gtk4_css(theme: &Theme) -> String {
    let mut out = String::from("/* GTK4 colors generated by themesmith */\n");
    out.push_str(&define_colors(&[
        ("window_bg_color", &theme.primary.background),
        ("window_fg_color", &theme.primary.foreground),
        ("view_bg_color", &theme.primary.background),
        ("view_fg_color", &theme.primary.foreground),
        ("accent_color", theme.accent_or_blue()),
        ("accent_bg_color", theme.accent_or_blue()),
        ("accent_fg_color", &theme.primary.background),
    ]));
    out
}

/// Waybar color variables.
pub fn waybar_css(theme: &Theme) -> String {
    let normal = &theme.normal;
    let mut pairs: Vec<(&str, &str)> = vec![
        ("background", &theme.primary.background),
        ("foreground", &theme.primary.foreground),
        ("accent", theme.accent_or_blue()),
    ];
    let entries = normal.entries();
    pairs.extend(entries.iter().map(|(n, v)| (*n, *v)));
    let mut out = String::from("/* Waybar colors generated by themesmith */\n");
    out.push_str(&define_colors(&pairs));
    out
}

/// Icon-theme marker: the Papirus folder color family nearest the accent.
pub fn icon_marker(theme: &Theme) -> String {
    let name = nearest_named(theme.accent_or_blue());
    format!("{}\n# apply with: papirus-folders -C {} --theme Papirus-Dark\n", name, name)
}

/// The full ordered (archive path, content) file set for a validated theme.
pub fn render_all(theme: &Theme, prompt: &str) -> Vec<(String, String)> {
    let name = theme_slug(prompt);
    vec![
        ("alacritty/colors.toml".to_string(), alacritty(theme)),
        ("btop/themes/themesmith.theme".to_string(), btop(theme)),
        ("zen-browser/accent-color.txt".to_string(), zen_accent(theme)),
        ("hypr/colors.conf".to_string(), hypr_colors(theme)),
        ("hypr/general.conf".to_string(), hypr_general(theme)),
        ("hypr/hyprlock.conf".to_string(), hyprlock(theme)),
        ("dunst/dunstrc".to_string(), dunst(theme)),
        (
            format!("nvim/colors/{}.lua", name),
            nvim(theme, &name, prompt),
        ),
        ("gtk-3.0/gtk.css".to_string(), gtk3_css(theme)),
        ("gtk-4.0/gtk.css".to_string(), gtk4_css(theme)),
        ("waybar/colors.css".to_string(), waybar_css(theme)),
        ("icons/papirus-folder-color.txt".to_string(), icon_marker(theme)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{ColorScheme, Primary};

    fn scheme(blue: &str) -> ColorScheme {
        ColorScheme {
            black: "#15161e".into(),
            red: "#f7768e".into(),
            green: "#9ece6a".into(),
            yellow: "#e0af68".into(),
            blue: blue.into(),
            magenta: "#bb9af7".into(),
            cyan: "#7dcfff".into(),
            white: "#a9b1d6".into(),
        }
    }

    fn theme() -> Theme {
        Theme {
            accent: Some("#7aa2f7".into()),
            primary: Primary {
                background: "#1a1b26".into(),
                foreground: "#c0caf5".into(),
            },
            normal: scheme("#7aa2f7"),
            bright: scheme("#8ab0ff"),
        }
    }

    fn accentless() -> Theme {
        Theme {
            accent: None,
            primary: Primary {
                background: "#202020".into(),
                foreground: "#EEEEEE".into(),
            },
            normal: scheme("#3366FF"),
            bright: scheme("#5588FF"),
        }
    }

    #[test]
    fn test_theme_slug() {
        assert_eq!(theme_slug("Deep ocean sunrise over water"), "deep-ocean-sunrise");
        assert_eq!(theme_slug("  Neon!  City  "), "neon-city");
        assert_eq!(theme_slug(""), "themesmith");
        assert_eq!(theme_slug("!!! ???"), "themesmith");
    }

    #[test]
    fn test_alacritty_is_valid_toml() {
        let out = alacritty(&theme());
        let parsed: toml::Value = out.parse().unwrap();
        assert_eq!(
            parsed["colors"]["primary"]["background"].as_str(),
            Some("#1a1b26")
        );
        assert_eq!(parsed["colors"]["normal"]["blue"].as_str(), Some("#7aa2f7"));
        assert_eq!(parsed["colors"]["bright"]["blue"].as_str(), Some("#8ab0ff"));
    }

    #[test]
    fn test_btop_line_format() {
        let out = btop(&theme());
        assert!(out.contains("theme[main_bg]=\"#1a1b26\""));
        assert!(out.contains("theme[hi_fg]=\"#7aa2f7\""));
    }

    #[test]
    fn test_zen_accent_is_decimal_triple() {
        assert_eq!(zen_accent(&theme()), "122, 162, 247\n");
    }

    #[test]
    fn test_hypr_general_gradient() {
        let out = hypr_general(&theme());
        // fixed ee opacity byte, lightened second stop, 45 degree gradient
        assert!(out.contains("col.active_border = 0xee7aa2f7 0xee"));
        assert!(out.contains("45deg"));
        let light = lighten("#7aa2f7", 30);
        assert!(out.contains(&format!("0xee{}", &light[1..])));
    }

    #[test]
    fn test_hyprlock_uses_decimal_triples() {
        let out = hyprlock(&theme());
        assert!(out.contains("color = rgba(26, 27, 38, 1.0)"));
        assert!(out.contains("font_color = rgba(192, 202, 245, 1.0)"));
    }

    #[test]
    fn test_accent_fallback_flows_through_renderers() {
        let t = accentless();
        assert!(btop(&t).contains("theme[hi_fg]=\"#3366FF\""));
        assert!(gtk4_css(&t).contains("@define-color accent_color #3366FF;"));
        assert_eq!(zen_accent(&t), "51, 102, 255\n");
        assert!(hypr_general(&t).contains("0xee3366ff"));
    }

    #[test]
    fn test_renderers_are_deterministic_and_pure() {
        let t = theme();
        let before = t.clone();
        let first = render_all(&t, "deep ocean");
        let second = render_all(&t, "deep ocean");
        assert_eq!(first, second);
        assert_eq!(t, before);
    }

    #[test]
    fn test_render_all_paths() {
        let files = render_all(&theme(), "deep ocean sunrise");
        let paths: Vec<&str> = files.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(paths.len(), 12);
        assert!(paths.contains(&"alacritty/colors.toml"));
        assert!(paths.contains(&"nvim/colors/deep-ocean-sunrise.lua"));
        assert!(paths.contains(&"icons/papirus-folder-color.txt"));
        // three UI-toolkit CSS fragments
        assert_eq!(paths.iter().filter(|p| p.ends_with(".css")).count(), 3);
    }

    #[test]
    fn test_nvim_carries_name_and_prompt() {
        let out = nvim(&theme(), "deep-ocean", "deep ocean at dusk");
        assert!(out.contains("vim.g.colors_name = \"deep-ocean\""));
        assert!(out.contains("deep ocean at dusk"));
        assert!(out.contains("vim.g.terminal_color_15"));
    }

    #[test]
    fn test_icon_marker_names_a_palette_entry() {
        let out = icon_marker(&theme());
        assert!(out.starts_with("blue\n"));
    }
}
