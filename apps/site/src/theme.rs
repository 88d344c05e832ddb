use std::str::FromStr;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}

/// Site-wide theme preference. Seeded once from config at startup and
/// handed to renderers through `AppState`.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    current: Arc<RwLock<Theme>>,
}

impl ThemeStore {
    pub fn new(initial: Theme) -> Self {
        Self {
            current: Arc::new(RwLock::new(initial)),
        }
    }

    pub fn get(&self) -> Theme {
        // A poisoned lock still holds a valid Copy value.
        *self.current.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set(&self, theme: Theme) {
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = theme;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_theme_case_insensitive() {
        assert_eq!("Dark".parse::<Theme>(), Ok(Theme::Dark));
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn test_store_shared_between_clones() {
        let store = ThemeStore::new(Theme::Light);
        let other = store.clone();
        other.set(Theme::Dark);
        assert_eq!(store.get(), Theme::Dark);
    }
}
