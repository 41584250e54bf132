use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use themesmith::ai::{GeminiClient, GenerationMode};
use themesmith::config::{self, Config};
use themesmith::image::UploadedImage;
use themesmith::spinner::Spinner;
use themesmith::{archive, palette, preview, render};

/// Longest prompt forwarded to the model.
const MAX_PROMPT_CHARS: usize = 2000;

#[derive(Parser, Debug)]
#[command(
    name = "themesmith",
    about = "Generate a terminal/desktop color theme with AI and package it as config fragments",
    version
)]
struct Args {
    /// Describe the theme you want (e.g. "deep ocean at dusk")
    prompt: Option<String>,

    /// Reference image to derive the palette from (png, jpg, webp, gif)
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// Generation mode (falls back to the config default_mode, then harmonious)
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Output zip path (defaults to <theme-name>.zip)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Write the config fragments into a directory instead of a zip
    #[arg(long, value_name = "DIR")]
    write_dir: Option<PathBuf>,

    /// Skip the terminal swatch preview
    #[arg(long)]
    no_preview: bool,

    /// Configure the Gemini API key and exit
    #[arg(long)]
    setup: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mode {
    Harmonious,
    Vibrant,
}

impl From<Mode> for GenerationMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Harmonious => GenerationMode::Harmonious,
            Mode::Vibrant => GenerationMode::Vibrant,
        }
    }
}

/// Mode precedence: --mode flag, then the config file's default_mode,
/// then harmonious.
fn resolve_mode(cli: Option<Mode>, config: &Config) -> GenerationMode {
    if let Some(mode) = cli {
        return mode.into();
    }
    match config.default_mode.as_deref() {
        Some(name) => GenerationMode::from_name(name).unwrap_or_else(|| {
            eprintln!(
                "  Warning: unknown default_mode {:?} in config, using harmonious",
                name
            );
            GenerationMode::Harmonious
        }),
        None => GenerationMode::Harmonious,
    }
}

/// Local input validation; nothing here touches the network.
fn validate_inputs(prompt: &str, image: Option<&UploadedImage>) -> Result<()> {
    if prompt.trim().is_empty() && image.is_none() {
        bail!("Nothing to generate from: provide a prompt, an image, or both");
    }
    let chars = prompt.chars().count();
    if chars > MAX_PROMPT_CHARS {
        bail!(
            "Prompt is too long ({} characters, limit {})",
            chars,
            MAX_PROMPT_CHARS
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.setup {
        config::setup_api_key_interactive().map_err(|e| anyhow::anyhow!(e))?;
        return Ok(());
    }

    let prompt = args.prompt.clone().unwrap_or_default();

    let image = match &args.image {
        Some(path) => Some(UploadedImage::load(path).map_err(|e| anyhow::anyhow!(e))?),
        None => None,
    };

    validate_inputs(&prompt, image.as_ref())?;

    let config = Config::load();
    let api_key = match config::resolve_api_key() {
        Some(key) => key,
        None => {
            bail!(
                "No Gemini API key configured. Run `themesmith --setup` \
                 or set the GEMINI_API_KEY environment variable."
            );
        }
    };
    if !config::looks_like_api_key(&api_key) {
        eprintln!("  Warning: API key doesn't look like a Gemini key (should start with AIza)");
    }

    let client = GeminiClient::new(api_key);
    let mode = resolve_mode(args.mode, &config);

    let spinner = Spinner::start(&format!("Generating {} theme...", mode.name()));
    let result = client.generate_theme(mode, &prompt, image.as_ref()).await;
    spinner.stop();

    let theme = result.map_err(|e| anyhow::anyhow!(e))?;

    if !args.no_preview {
        preview::print_preview(&theme);
    }

    let files = render::render_all(&theme, &prompt);
    let slug = render::theme_slug(&prompt);

    if let Some(dir) = &args.write_dir {
        archive::write_dir(dir, &files)?;
        println!("  + Wrote {} config fragments to {}", files.len(), dir.display());
        return Ok(());
    }

    let out = args
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{}.zip", slug)));
    archive::write_zip(&out, &files, image.as_ref())?;

    let entries = files.len() + usize::from(image.is_some());
    println!("  + Packaged {} files into {}", entries, out.display());
    println!(
        "  + Icon folder color: {}",
        palette::nearest_named(theme.accent_or_blue())
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_inputs_rejected() {
        let err = validate_inputs("", None).unwrap_err();
        assert!(err.to_string().contains("Nothing to generate"));
        assert!(validate_inputs("   ", None).is_err());
    }

    #[test]
    fn test_overlong_prompt_rejected() {
        let prompt = "x".repeat(MAX_PROMPT_CHARS + 1);
        let err = validate_inputs(&prompt, None).unwrap_err();
        assert!(err.to_string().contains("too long"));
    }

    #[test]
    fn test_prompt_at_limit_accepted() {
        let prompt = "x".repeat(MAX_PROMPT_CHARS);
        assert!(validate_inputs(&prompt, None).is_ok());
    }

    #[test]
    fn test_mode_flag_wins_over_config() {
        let config = Config {
            default_mode: Some("vibrant".to_string()),
        };
        assert_eq!(
            resolve_mode(Some(Mode::Harmonious), &config),
            GenerationMode::Harmonious
        );
    }

    #[test]
    fn test_mode_falls_back_to_config_default() {
        let config = Config {
            default_mode: Some("vibrant".to_string()),
        };
        assert_eq!(resolve_mode(None, &config), GenerationMode::Vibrant);
    }

    #[test]
    fn test_mode_defaults_to_harmonious() {
        assert_eq!(
            resolve_mode(None, &Config::default()),
            GenerationMode::Harmonious
        );
        let junk = Config {
            default_mode: Some("neon".to_string()),
        };
        assert_eq!(resolve_mode(None, &junk), GenerationMode::Harmonious);
    }

    #[test]
    fn test_image_alone_is_enough() {
        let image = UploadedImage {
            data: String::new(),
            mime_type: "image/png".to_string(),
            name: "wall.png".to_string(),
        };
        assert!(validate_inputs("", Some(&image)).is_ok());
    }
}
