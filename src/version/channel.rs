//! Release channels and their ranking

use serde::Serialize;

/// Release-maturity marker of a version
///
/// Channels order versions that share the same numeric fields:
/// `daily < alpha < beta < patch < mandatory = feature < stable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Daily,
    Alpha,
    Beta,
    Patch,
    Mandatory,
    Feature,
    Stable,
}

impl Channel {
    /// Look up a channel from a token by its first ASCII letter.
    ///
    /// Leading digits and dashes are skipped, so `-beta` and `50a` resolve to
    /// beta and alpha. Anything unrecognized (including the empty token) is
    /// stable.
    pub fn from_token(token: &str) -> Self {
        token
            .chars()
            .find(|c| c.is_ascii_alphabetic())
            .map(Self::from_code)
            .unwrap_or(Channel::Stable)
    }

    fn from_code(code: char) -> Self {
        match code.to_ascii_lowercase() {
            'd' => Channel::Daily,
            'a' => Channel::Alpha,
            'b' => Channel::Beta,
            'p' => Channel::Patch,
            'm' => Channel::Mandatory,
            'f' => Channel::Feature,
            _ => Channel::Stable,
        }
    }

    /// Rank used as the last field of the ordering key
    pub fn rank(&self) -> u8 {
        match self {
            Channel::Daily => 0,
            Channel::Alpha => 1,
            Channel::Beta => 2,
            Channel::Patch => 3,
            Channel::Mandatory | Channel::Feature => 4,
            Channel::Stable => 9,
        }
    }

    /// Single-letter suffix used in canonical rendering; empty for stable
    pub fn code(&self) -> &'static str {
        match self {
            Channel::Daily => "d",
            Channel::Alpha => "a",
            Channel::Beta => "b",
            Channel::Patch => "p",
            Channel::Mandatory => "m",
            Channel::Feature => "f",
            Channel::Stable => "",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Channel::Daily => "daily",
            Channel::Alpha => "alpha",
            Channel::Beta => "beta",
            Channel::Patch => "patch",
            Channel::Mandatory => "mandatory",
            Channel::Feature => "feature",
            Channel::Stable => "stable",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
