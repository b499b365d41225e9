//! Documentation content categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which documentation tree a request targets.
///
/// The discriminants are the permission identifiers the administration
/// application grants for each kind of help page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ContentCategory {
    /// End-user help under `Documentation/`.
    #[serde(rename = "general")]
    GeneralHelp = 1,
    /// Per-module help under `Modules/<id>/Docs/`.
    #[serde(rename = "module")]
    ModuleHelp = 2,
    /// Developer guide under `Developer-Guide/`.
    #[serde(rename = "developer")]
    DeveloperHelp = 3,
}

/// Error for category names or permission ids that match no category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown help category: {0}")]
pub struct UnknownCategory(pub String);

impl ContentCategory {
    /// All categories in permission order.
    pub const ALL: [Self; 3] = [Self::GeneralHelp, Self::ModuleHelp, Self::DeveloperHelp];

    /// Permission identifier guarding this category.
    #[must_use]
    pub fn permission_id(self) -> u8 {
        self as u8
    }

    /// Short name used on the command line and in serialized views.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GeneralHelp => "general",
            Self::ModuleHelp => "module",
            Self::DeveloperHelp => "developer",
        }
    }

    /// Documentation root directory, relative to the application root.
    #[must_use]
    pub fn root_dir(self) -> &'static str {
        match self {
            Self::GeneralHelp => "Documentation",
            Self::ModuleHelp => "Modules",
            Self::DeveloperHelp => "Developer-Guide",
        }
    }
}

impl fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}

impl TryFrom<u8> for ContentCategory {
    type Error = UnknownCategory;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|category| category.permission_id() == value)
            .ok_or_else(|| UnknownCategory(value.to_string()))
    }
}
