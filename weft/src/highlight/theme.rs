//! Built-in colour themes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::WeftError;

/// Name of a built-in theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ThemeName {
    /// Light theme after GitHub's code view.
    #[default]
    #[serde(alias = "default")]
    #[cfg_attr(feature = "clap", value(alias = "default"))]
    InspiredGithub,
    SolarizedLight,
    SolarizedDark,
    OceanLight,
    OceanDark,
    Eighties,
    Mocha,
}

impl ThemeName {
    pub const ALL: [ThemeName; 7] = [
        ThemeName::InspiredGithub,
        ThemeName::SolarizedLight,
        ThemeName::SolarizedDark,
        ThemeName::OceanLight,
        ThemeName::OceanDark,
        ThemeName::Eighties,
        ThemeName::Mocha,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeName::InspiredGithub => "inspired-github",
            ThemeName::SolarizedLight => "solarized-light",
            ThemeName::SolarizedDark => "solarized-dark",
            ThemeName::OceanLight => "ocean-light",
            ThemeName::OceanDark => "ocean-dark",
            ThemeName::Eighties => "eighties",
            ThemeName::Mocha => "mocha",
        }
    }

    /// Key of the theme in syntect's default theme set.
    pub fn syntect_name(self) -> &'static str {
        match self {
            ThemeName::InspiredGithub => "InspiredGitHub",
            ThemeName::SolarizedLight => "Solarized (light)",
            ThemeName::SolarizedDark => "Solarized (dark)",
            ThemeName::OceanLight => "base16-ocean.light",
            ThemeName::OceanDark => "base16-ocean.dark",
            ThemeName::Eighties => "base16-eighties.dark",
            ThemeName::Mocha => "base16-mocha.dark",
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeName {
    type Err = WeftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_ascii_lowercase();
        if wanted == "default" {
            return Ok(ThemeName::default());
        }
        ThemeName::ALL
            .into_iter()
            .find(|name| name.as_str() == wanted)
            .ok_or_else(|| WeftError::UnknownStyle(s.to_string()))
    }
}
