use rustc_hash::FxHashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Boolean toggles of the interactive front end.
#[derive(Debug, Clone)]
pub struct Settings {
    inner: FxHashMap<Setting, bool>,
}

impl Settings {
    pub fn new() -> Self {
        Self {
            inner: FxHashMap::default(),
        }
    }

    pub fn enable(&mut self, setting: Setting) {
        self.inner.insert(setting, true);
    }

    pub fn disable(&mut self, setting: Setting) {
        self.inner.insert(setting, false);
    }

    pub fn set(&mut self, setting: Setting, enabled: bool) {
        self.inner.insert(setting, enabled);
    }

    pub fn is_enabled(&self, setting: Setting) -> bool {
        self.inner.get(&setting).copied().unwrap_or(false)
    }

    /// All settings with their current value, in a stable order.
    pub fn as_vec(&self) -> Vec<(Setting, bool)> {
        Setting::ALL
            .iter()
            .map(|setting| (*setting, self.is_enabled(*setting)))
            .collect()
    }
}

impl Default for Settings {
    fn default() -> Settings {
        let mut settings = Settings::new();

        for setting in Setting::ALL {
            settings.disable(*setting);
        }

        settings
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Setting {
    /// print the forms as read
    Debug,
    /// print the classified symbols after each input
    Symbols,
    /// print the annotated AST as JSON
    Ast,
    /// print the whole analysis result as JSON
    Json,
}

impl Setting {
    pub const ALL: &'static [Setting] = &[
        Setting::Debug,
        Setting::Symbols,
        Setting::Ast,
        Setting::Json,
    ];
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Unknown setting {0}")]
pub struct UnknownSetting(String);

impl FromStr for Setting {
    type Err = UnknownSetting;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_lowercase().as_str() {
            "debug" => Ok(Setting::Debug),
            "symbols" => Ok(Setting::Symbols),
            "ast" => Ok(Setting::Ast),
            "json" => Ok(Setting::Json),
            other => Err(UnknownSetting(other.to_string())),
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Setting::Debug => "debug",
            Setting::Symbols => "symbols",
            Setting::Ast => "ast",
            Setting::Json => "json",
        };

        fmt.write_str(name)
    }
}
