//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Render the configuration as a commented TOML file
    pub fn to_toml(&self) -> String {
        format!(
            r#"# canoe-ui configuration

# Gallery colour scheme: dark, light
theme = "{theme}"

# Milliseconds between timer ticks (toast countdowns, log refresh)
tick_rate_ms = {tick}

# Toasts raised from the gallery
[toast]
duration_ms = {toast_ms}    # 0 keeps toasts until dismissed
position = "{toast_pos}"    # top-right, top-left, top-center, bottom-right, bottom-left, bottom-center

# Log view
[log]
auto_scroll = {auto_scroll}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# JSON file logging (in addition to the in-app log view)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            theme = self.theme.as_str(),
            tick = self.tick_rate.as_millis(),
            toast_ms = self.toast.duration.as_millis(),
            toast_pos = self.toast.position.as_str(),
            auto_scroll = self.log.auto_scroll,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display().to_string().replace('\\', "/"),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}
