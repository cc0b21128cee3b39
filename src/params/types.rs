//! Core types for the settings domain
//!
//! Entity categories and the versioned API generations schemas belong to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of settings container an entity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    /// Build configuration feature
    BuildFeature,
    /// Project feature (connections, issue trackers, report tabs)
    ProjectFeature,
    /// Build trigger
    Trigger,
}

impl Category {
    /// All categories, in document order
    pub const ALL: [Self; 3] = [Self::BuildFeature, Self::ProjectFeature, Self::Trigger];

    /// Name of the settings document section holding this category
    #[must_use]
    pub fn section(self) -> &'static str {
        match self {
            Self::BuildFeature => "buildFeatures",
            Self::ProjectFeature => "projectFeatures",
            Self::Trigger => "triggers",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BuildFeature => write!(f, "build feature"),
            Self::ProjectFeature => write!(f, "project feature"),
            Self::Trigger => write!(f, "trigger"),
        }
    }
}

/// Versioned API generation of the settings DSL.
///
/// Ordered oldest first. Schemas of a generation stay valid for every newer
/// generation until a newer schema of the same kind replaces them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum ApiVersion {
    /// 10.0
    V10,
    /// 2017.2
    V2017_2,
    /// 2018.1
    V2018_1,
    /// 2018.2
    V2018_2,
    /// 2019.2
    V2019_2,
    /// Current, unversioned package
    #[default]
    Latest,
}

impl ApiVersion {
    /// All versions, oldest first
    pub const ALL: [Self; 6] = [
        Self::V10,
        Self::V2017_2,
        Self::V2018_1,
        Self::V2018_2,
        Self::V2019_2,
        Self::Latest,
    ];

    /// Whether entities of this generation check mandatory properties.
    /// 10.0 entities had no validation.
    #[must_use]
    pub fn validates_mandatory(self) -> bool {
        self != Self::V10
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::V10 => "10",
            Self::V2017_2 => "2017.2",
            Self::V2018_1 => "2018.1",
            Self::V2018_2 => "2018.2",
            Self::V2019_2 => "2019.2",
            Self::Latest => "latest",
        };
        f.write_str(s)
    }
}

impl FromStr for ApiVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().trim_start_matches(['v', 'V']).replace('_', ".");
        match normalized.as_str() {
            "10" | "10.0" => Ok(Self::V10),
            "2017.2" => Ok(Self::V2017_2),
            "2018.1" => Ok(Self::V2018_1),
            "2018.2" => Ok(Self::V2018_2),
            "2019.2" => Ok(Self::V2019_2),
            "latest" => Ok(Self::Latest),
            _ => Err(format!("unknown API version '{s}'")),
        }
    }
}

impl TryFrom<String> for ApiVersion {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ApiVersion> for String {
    fn from(version: ApiVersion) -> Self {
        version.to_string()
    }
}
