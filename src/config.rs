//! Configuration and credential storage
//!
//! Non-secret settings live in ~/.config/themesmith/config.json. The Gemini
//! API key never touches that file: it comes from the GEMINI_API_KEY
//! environment variable or, failing that, the system keychain.

use keyring::Entry;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const KEYRING_SERVICE: &str = "themesmith";
const KEYRING_USERNAME: &str = "gemini_api_key";
const ENV_VAR: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Generation mode used when --mode is not given on the command line.
    #[serde(default)]
    pub default_mode: Option<String>,
}

impl Config {
    pub fn load() -> Self {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    fn load_from(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => return Self::default(),
        };
        serde_json::from_str(&content).unwrap_or_else(|err| {
            // keep the broken file around instead of clobbering it on the
            // next save
            let backup = path.with_extension("json.corrupt");
            if fs::rename(path, &backup).is_err() {
                let _ = fs::write(&backup, &content);
            }
            eprintln!(
                "  Warning: config was corrupted ({}); saved a backup and loaded defaults",
                err
            );
            Self::default()
        })
    }

    pub fn save(&self) -> Result<(), String> {
        let path = config_path()
            .ok_or_else(|| "could not determine the config directory".to_string())?;
        self.save_to(&path)
    }

    fn save_to(&self, path: &Path) -> Result<(), String> {
        let dir = path
            .parent()
            .ok_or_else(|| format!("config path {} has no parent", path.display()))?;
        fs::create_dir_all(dir)
            .map_err(|e| format!("failed to create {}: {}", dir.display(), e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(dir, fs::Permissions::from_mode(0o700));
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("failed to serialize config: {}", e))?;

        // write-then-rename so a crash never leaves a half-written config
        let tmp = path.with_extension("json.tmp");
        write_private(&tmp, json.as_bytes())?;
        fs::rename(&tmp, path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            format!("failed to write {}: {}", path.display(), e)
        })
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("themesmith").join("config.json"))
}

fn write_private(path: &Path, bytes: &[u8]) -> Result<(), String> {
    let mut file = fs::File::create(path)
        .map_err(|e| format!("failed to create {}: {}", path.display(), e))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = file.set_permissions(fs::Permissions::from_mode(0o600));
    }
    file.write_all(bytes)
        .map_err(|e| format!("failed to write {}: {}", path.display(), e))
}

fn keychain_entry() -> Result<Entry, keyring::Error> {
    Entry::new(KEYRING_SERVICE, KEYRING_USERNAME)
}

/// Resolve the Gemini API key: environment variable first, then keychain.
/// Returns `None` when neither holds a key.
pub fn resolve_api_key() -> Option<String> {
    if let Ok(key) = std::env::var(ENV_VAR) {
        if !key.is_empty() {
            return Some(key);
        }
    }
    match keychain_entry().and_then(|entry| entry.get_password()) {
        Ok(key) => Some(key),
        Err(keyring::Error::NoEntry) => None,
        Err(err) => {
            eprintln!("  Warning: couldn't read the system keychain: {}", err);
            eprintln!("  Tip: set {} to bypass the keychain.", ENV_VAR);
            None
        }
    }
}

/// Store the key in the keychain and verify it reads back.
pub fn store_api_key(key: &str) -> Result<(), String> {
    let entry = keychain_entry().map_err(|e| {
        format!(
            "keychain unavailable: {}. Set {} in your environment instead.",
            e, ENV_VAR
        )
    })?;
    entry
        .set_password(key)
        .map_err(|e| format!("failed to store the API key in the keychain: {}", e))?;
    match entry.get_password() {
        Ok(stored) if stored == key => Ok(()),
        Ok(_) => Err("API key verification failed: stored key doesn't match".to_string()),
        Err(err) => Err(format!(
            "API key verification failed: couldn't read it back ({})",
            err
        )),
    }
}

/// Format heuristic: Gemini keys start with AIza.
pub fn looks_like_api_key(key: &str) -> bool {
    key.starts_with("AIza")
}

/// Interactive prompt for `--setup`: ask for a key and persist it.
pub fn setup_api_key_interactive() -> Result<(), String> {
    println!();
    println!("  themesmith needs a Gemini API key to generate themes.");
    println!("  Create one at https://aistudio.google.com/apikey and paste it below.");
    println!("  The key is stored in your system keychain, never in a file.");
    println!();
    print!("  API key: ");
    io::stdout().flush().map_err(|e| e.to_string())?;

    let mut key = String::new();
    io::stdin().read_line(&mut key).map_err(|e| e.to_string())?;
    let key = key.trim();
    if key.is_empty() {
        return Err("no API key provided".to_string());
    }
    if !looks_like_api_key(key) {
        println!();
        println!("  Warning: that doesn't look like a Gemini key (expected an AIza prefix).");
        println!("  Saving anyway...");
    }

    store_api_key(key)?;
    println!();
    println!("  + API key saved to the system keychain");
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        assert!(Config::default().default_mode.is_none());
    }

    #[test]
    fn test_api_key_heuristic() {
        assert!(looks_like_api_key("AIzaSyExample"));
        assert!(!looks_like_api_key("sk-or-v1-abc"));
        assert!(!looks_like_api_key(""));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = Config {
            default_mode: Some("vibrant".to_string()),
        };
        config.save_to(&path).unwrap();
        let reloaded = Config::load_from(&path);
        assert_eq!(reloaded.default_mode.as_deref(), Some("vibrant"));
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json"));
        assert!(config.default_mode.is_none());
    }

    #[test]
    fn test_corrupt_config_is_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ this is not json").unwrap();
        let config = Config::load_from(&path);
        assert!(config.default_mode.is_none());
        assert!(path.with_extension("json.corrupt").exists());
    }

    #[test]
    fn test_config_file_carries_no_secrets() {
        let config = Config {
            default_mode: Some("harmonious".to_string()),
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("api_key"));
        assert!(!json.contains("AIza"));
    }
}
