use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub form: FormConfig,
    pub dashboard: DashboardConfig,
    pub reply: ReplyConfig,
    pub layout: LayoutConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Host the site is served from; local hosts talk to the dev backend
    pub hostname: String,
    pub dev_base_url: String,
    pub prod_base_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the message file (default: platform data dir)
    pub data_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Delay before a validated submission is sent
    pub submit_delay_ms: u64,
    /// How long form banners stay up
    pub banner_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// How often the store file is checked for outside writes
    pub refresh_poll_ms: u64,
    /// Add sample messages when the store is empty
    pub seed_demo_data: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReplyConfig {
    /// Closing line of the reply template
    pub signature: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Height of the detail overlay as a percentage of the screen
    pub detail_height: u16,
    /// Width of the detail overlay as a percentage of the screen
    pub detail_width: u16,
    /// Date column width in characters
    pub date_width: usize,
    /// Name column width in characters
    pub name_width: usize,
}

/// Semantic theme configuration using Capstan Cloud colors as defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    // Base colors
    pub bg: String,
    pub bg_panel: String,
    pub bg_element: String,
    pub fg: String,
    pub fg_muted: String,
    pub fg_subtle: String,

    // Border colors
    pub border: String,
    pub border_subtle: String,
    pub border_active: String,

    // Accent colors
    pub primary: String,
    pub secondary: String,

    // Semantic colors
    pub success: String,
    pub warning: String,
    pub error: String,
    pub info: String,

    // Status colors
    pub selected_bg: String,
    pub unread: String,
    pub replied: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            hostname: "localhost".to_string(),
            dev_base_url: "http://localhost:3002/api".to_string(),
            prod_base_url: "https://myportfolio-back-j9ji.onrender.com/api".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ApiConfig {
    pub fn is_local(&self) -> bool {
        matches!(self.hostname.trim(), "localhost" | "127.0.0.1" | "")
    }

    /// Base URL for the configured host
    pub fn base_url(&self) -> &str {
        if self.is_local() {
            &self.dev_base_url
        } else {
            &self.prod_base_url
        }
    }
}

impl StorageConfig {
    pub fn data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => PathBuf::from(shellexpand::tilde(dir).into_owned()),
            None => dirs::data_dir()
                .map(|p| p.join("folio-inbox"))
                .unwrap_or_else(|| PathBuf::from(".folio-inbox")),
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: 2000,
            banner_secs: 5,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_poll_ms: 1000,
            seed_demo_data: false,
        }
    }
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            signature: "Best regards,\nJose Vargas".to_string(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            detail_height: 70,
            detail_width: 70,
            date_width: 22,
            name_width: 18,
        }
    }
}

/// Capstan Cloud theme - warm earth tones with gold accents
impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            // Base colors
            bg: "#1a1917".to_string(),
            bg_panel: "#262422".to_string(),
            bg_element: "#393634".to_string(),
            fg: "#f7f7f5".to_string(),
            fg_muted: "#8c8985".to_string(),
            fg_subtle: "#b8b5b0".to_string(),

            // Border colors
            border: "#524f4c".to_string(),
            border_subtle: "#393634".to_string(),
            border_active: "#d4a366".to_string(), // primary

            // Accent colors
            primary: "#d4a366".to_string(),
            secondary: "#8fa5ae".to_string(), // blue

            // Semantic colors
            success: "#52c41a".to_string(),
            warning: "#faad14".to_string(),
            error: "#ff4d4f".to_string(),
            info: "#88c0d0".to_string(), // cyan

            selected_bg: "#393634".to_string(), // bg_element
            unread: "#d4a366".to_string(),      // primary (gold)
            replied: "#8fa5ae".to_string(),     // secondary (blue)
        }
    }
}

impl Config {
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join("folio-inbox/config.toml"))
            .unwrap_or_else(|| PathBuf::from("~/.config/folio-inbox/config.toml"))
    }

    /// Load from the default location, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    pub fn load_from(config_path: &Path) -> Self {
        if config_path.exists() {
            match std::fs::read_to_string(config_path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => log::error!("Config parse error: {}", e),
                },
                Err(e) => log::error!("Config read error: {}", e),
            }
        }

        Self::default()
    }
}

impl ThemeConfig {
    pub fn bg(&self) -> ratatui::style::Color {
        parse_color(&self.bg)
    }
    pub fn bg_panel(&self) -> ratatui::style::Color {
        parse_color(&self.bg_panel)
    }
    pub fn bg_element(&self) -> ratatui::style::Color {
        parse_color(&self.bg_element)
    }
    pub fn fg(&self) -> ratatui::style::Color {
        parse_color(&self.fg)
    }
    pub fn fg_muted(&self) -> ratatui::style::Color {
        parse_color(&self.fg_muted)
    }
    pub fn fg_subtle(&self) -> ratatui::style::Color {
        parse_color(&self.fg_subtle)
    }
    pub fn border(&self) -> ratatui::style::Color {
        parse_color(&self.border)
    }
    pub fn border_subtle(&self) -> ratatui::style::Color {
        parse_color(&self.border_subtle)
    }
    pub fn border_active(&self) -> ratatui::style::Color {
        parse_color(&self.border_active)
    }
    pub fn primary(&self) -> ratatui::style::Color {
        parse_color(&self.primary)
    }
    pub fn secondary(&self) -> ratatui::style::Color {
        parse_color(&self.secondary)
    }
    pub fn success(&self) -> ratatui::style::Color {
        parse_color(&self.success)
    }
    pub fn warning(&self) -> ratatui::style::Color {
        parse_color(&self.warning)
    }
    pub fn error(&self) -> ratatui::style::Color {
        parse_color(&self.error)
    }
    pub fn info(&self) -> ratatui::style::Color {
        parse_color(&self.info)
    }
    pub fn selected_bg(&self) -> ratatui::style::Color {
        parse_color(&self.selected_bg)
    }
    pub fn unread(&self) -> ratatui::style::Color {
        parse_color(&self.unread)
    }
    pub fn replied(&self) -> ratatui::style::Color {
        parse_color(&self.replied)
    }

    /// Color for a message status label
    pub fn status(&self, status: crate::inbox::MessageStatus) -> ratatui::style::Color {
        use crate::inbox::MessageStatus;
        match status {
            MessageStatus::Unread => self.unread(),
            MessageStatus::Read => self.fg_muted(),
            MessageStatus::Replied => self.replied(),
        }
    }
}

/// Parse color string to ratatui Color
pub fn parse_color(s: &str) -> ratatui::style::Color {
    use ratatui::style::Color;

    // Try hex first (#RRGGBB)
    if s.starts_with('#') && s.len() == 7 {
        if let (Ok(r), Ok(g), Ok(b)) = (
            u8::from_str_radix(&s[1..3], 16),
            u8::from_str_radix(&s[3..5], 16),
            u8::from_str_radix(&s[5..7], 16),
        ) {
            return Color::Rgb(r, g, b);
        }
    }

    // Named colors
    match s.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "white" => Color::White,
        _ => Color::White,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn local_hosts_use_dev_backend() {
        let mut api = ApiConfig::default();
        for host in ["localhost", "127.0.0.1", ""] {
            api.hostname = host.to_string();
            assert_eq!(api.base_url(), "http://localhost:3002/api");
        }
        api.hostname = "jose.dev".to_string();
        assert_eq!(api.base_url(), api.prod_base_url);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[api]\nhostname = \"example.org\"\n\n[form]\nsubmit_delay_ms = 10\n",
        )
        .unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.api.hostname, "example.org");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.form.submit_delay_ms, 10);
        assert_eq!(config.form.banner_secs, 5);
        assert!(!config.dashboard.seed_demo_data);
    }

    #[test]
    fn broken_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api = [").unwrap();
        assert_eq!(Config::load_from(&path).api.hostname, "localhost");
    }

    #[test]
    fn data_dir_uses_configured_path() {
        let storage = StorageConfig {
            data_dir: Some("/tmp/folio".to_string()),
        };
        assert_eq!(storage.data_dir(), PathBuf::from("/tmp/folio"));
    }

    #[test]
    fn colors_parse_hex_and_names() {
        assert_eq!(parse_color("#ff0000"), Color::Rgb(255, 0, 0));
        assert_eq!(parse_color("Cyan"), Color::Cyan);
        assert_eq!(parse_color("nonsense"), Color::White);
    }
}
