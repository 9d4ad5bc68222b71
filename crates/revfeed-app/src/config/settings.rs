//! Settings parser for .revfeed/config.toml

use super::types::Settings;
use revfeed_core::prelude::*;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.toml";
const REVFEED_DIR: &str = ".revfeed";

/// Load settings from `<dir>/.revfeed/config.toml`.
///
/// A missing or unreadable file is not an error: defaults are used and the
/// problem is logged.
pub fn load_settings(dir: &Path) -> Settings {
    let config_path = dir.join(REVFEED_DIR).join(CONFIG_FILENAME);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str::<Settings>(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                if settings.feed.page_size == 0 {
                    warn!(
                        "page_size = 0 in {:?}, using {}",
                        config_path,
                        settings.feed.effective_page_size()
                    );
                }
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Create a commented default config in `<dir>/.revfeed/`
pub fn init_config_dir(dir: &Path) -> Result<()> {
    let revfeed_dir = dir.join(REVFEED_DIR);

    if !revfeed_dir.exists() {
        std::fs::create_dir_all(&revfeed_dir)
            .map_err(|e| Error::config(format!("Failed to create .revfeed dir: {}", e)))?;
    }

    let config_path = revfeed_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        let default_content = r#"# revfeed configuration

[feed]
# Reviews requested per page
page_size = 20
# Prefetch the next page when fewer than this many screens remain
load_threshold_screens = 2.5
# Body lines shown before "Show more..." (0 = unlimited)
default_line_limit = 3

[rating]
stars_count = 5
star_size = 16.0
spacing = 1.0

[text]
show_more = "Show more..."
summary_one = "{count} review"
summary_many = "{count} reviews"
"#;
        std::fs::write(&config_path, default_content)
            .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
        info!("Created default config at {:?}", config_path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_settings_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let settings = load_settings(dir.path());
        assert_eq!(settings.feed.page_size, 20);
    }

    #[test]
    fn test_load_settings_reads_config() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".revfeed")).unwrap();
        std::fs::write(
            dir.path().join(".revfeed/config.toml"),
            "[feed]\npage_size = 5\ndefault_line_limit = 0\n",
        )
        .unwrap();

        let settings = load_settings(dir.path());
        assert_eq!(settings.feed.page_size, 5);
        assert_eq!(settings.feed.default_line_limit, 0);
    }

    #[test]
    fn test_load_settings_malformed_file_uses_defaults() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".revfeed")).unwrap();
        std::fs::write(dir.path().join(".revfeed/config.toml"), "[feed\npage_size=").unwrap();

        let settings = load_settings(dir.path());
        assert_eq!(settings.feed.page_size, 20);
    }

    #[test]
    fn test_init_config_dir_writes_loadable_defaults() {
        let dir = tempdir().unwrap();
        init_config_dir(dir.path()).unwrap();

        assert!(dir.path().join(".revfeed/config.toml").exists());
        let settings = load_settings(dir.path());
        assert_eq!(settings.feed.page_size, 20);
        assert_eq!(settings.rating.stars_count, 5);
        assert_eq!(settings.text.summary_many, "{count} reviews");
    }

    #[test]
    fn test_init_config_dir_keeps_existing_file() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".revfeed")).unwrap();
        std::fs::write(dir.path().join(".revfeed/config.toml"), "[feed]\npage_size = 7\n").unwrap();

        init_config_dir(dir.path()).unwrap();
        assert_eq!(load_settings(dir.path()).feed.page_size, 7);
    }
}
