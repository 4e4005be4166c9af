//! Assistant profiles (financial or news analysis).
//!
//! Display text and suggested questions are loaded from `config/profiles.json`
//! (embedded at compile time, validated by build.rs).

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Which assistant the client talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    Financial,
    News,
}

/// Display text for a profile.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileInfo {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub welcome_heading: String,
    pub welcome_text: String,
    pub placeholder: String,
    pub loading_text: String,
    pub questions: Vec<String>,
}

fn load_profiles() -> Vec<ProfileInfo> {
    let json = include_str!("../../config/profiles.json");
    serde_json::from_str(json).expect("profiles.json must be valid")
}

static PROFILES: OnceLock<Vec<ProfileInfo>> = OnceLock::new();

fn profiles() -> &'static [ProfileInfo] {
    PROFILES.get_or_init(load_profiles)
}

impl Profile {
    pub const ALL: [Profile; 2] = [Profile::Financial, Profile::News];

    pub fn as_str(self) -> &'static str {
        match self {
            Profile::Financial => "financial",
            Profile::News => "news",
        }
    }

    /// Display text for this profile. build.rs guarantees both entries exist.
    pub fn info(self) -> &'static ProfileInfo {
        profiles()
            .iter()
            .find(|p| p.id == self.as_str())
            .expect("profiles.json has an entry for every profile")
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Profile::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown profile '{}' (expected financial or news)", s))
    }
}
