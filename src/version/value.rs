//! Structured version value, its ordering key and canonical rendering

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::version::channel::Channel;

/// Prerelease revision, optionally carrying a fractional sub-revision
///
/// `50` and `50.2` are both revisions; they compare numerically, so
/// `50 < 50.1 < 50.2 < 51`. Values are always finite and non-negative.
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(transparent)]
pub struct Revision(f64);

impl Revision {
    pub const ZERO: Revision = Revision(0.0);

    pub fn new(whole: u64) -> Self {
        Revision(whole as f64)
    }

    /// Fold a revision and its dotted sub-revision into one number.
    ///
    /// Returns `None` when the digits do not form a finite decimal, e.g. a
    /// sub-revision with more than one dot.
    pub fn from_parts(whole: &str, subrevision: Option<&str>) -> Option<Self> {
        let value = match subrevision {
            Some(sub) => format!("{whole}.{sub}").parse::<f64>().ok()?,
            None => whole.parse::<f64>().ok()?,
        };
        (value.is_finite() && value >= 0.0).then_some(Revision(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl PartialEq for Revision {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Revision {}

impl PartialOrd for Revision {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Revision {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for Revision {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordering key: `(major, minor, patch, revision, channel rank)`
pub type OrderingKey = (u64, u64, u64, Revision, u8);

/// Structured form of a version string
///
/// Equality, ordering and hashing go through [`VersionValue::ordering_key`];
/// `build_id` and `program_name` are metadata and never take part in them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionValue {
    major: u64,
    minor: Option<u64>,
    patch: Option<u64>,
    revision: Revision,
    channel: Channel,
    program_name: Option<String>,
    build_id: Option<String>,
}

impl VersionValue {
    /// Create a stable version from its numeric fields
    pub fn new(major: u64, minor: Option<u64>, patch: Option<u64>) -> Self {
        Self {
            major,
            minor,
            patch,
            revision: Revision::ZERO,
            channel: Channel::Stable,
            program_name: None,
            build_id: None,
        }
    }

    /// The "no version" value: `0.0` on the daily channel
    pub fn zero() -> Self {
        Self::new(0, Some(0), None).with_channel(Channel::Daily)
    }

    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channel = channel;
        self
    }

    pub fn with_revision(mut self, revision: Revision) -> Self {
        self.revision = revision;
        self
    }

    pub fn with_program_name(mut self, program_name: impl Into<String>) -> Self {
        self.program_name = Some(program_name.into());
        self
    }

    pub fn with_build_id(mut self, build_id: impl Into<String>) -> Self {
        self.build_id = Some(build_id.into());
        self
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> Option<u64> {
        self.minor
    }

    /// Patch number, also called the release number
    pub fn patch(&self) -> Option<u64> {
        self.patch
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn channel_rank(&self) -> u8 {
        self.channel.rank()
    }

    pub fn program_name(&self) -> Option<&str> {
        self.program_name.as_deref()
    }

    pub fn build_id(&self) -> Option<&str> {
        self.build_id.as_deref()
    }

    pub fn ordering_key(&self) -> OrderingKey {
        (
            self.major,
            self.minor.unwrap_or(0),
            self.patch.unwrap_or(0),
            self.revision,
            self.channel.rank(),
        )
    }

    /// Three-way comparison against another version or a raw string.
    ///
    /// Raw strings have no ordering key, so they are compared as strings
    /// against this value's canonical rendering.
    pub fn compare<'a>(&self, other: impl Into<Comparand<'a>>) -> Ordering {
        match other.into() {
            Comparand::Version(other) => self.cmp(other),
            Comparand::Raw(raw) => self.to_string().as_str().cmp(raw),
        }
    }

    /// Whether this version is strictly newer than `current`
    pub fn is_upgrade_from(&self, current: &VersionValue) -> bool {
        self > current
    }

    /// Every field spelled out, for diagnostics
    pub fn long_name(&self) -> String {
        format!(
            "Major: {} Minor: {} Release: {} Revision: {} Channel: {} Build: {} Program: {}",
            self.major,
            display_or_none(self.minor),
            display_or_none(self.patch),
            self.revision,
            self.channel,
            self.build_id.as_deref().unwrap_or("none"),
            self.program_name.as_deref().unwrap_or("none"),
        )
    }

    /// Convert into a `semver::Version`.
    ///
    /// A non-stable channel becomes the prerelease (`beta`, or `beta.50.2`
    /// when a revision is set) and the build id becomes build metadata.
    pub fn to_semver(&self) -> Result<semver::Version, semver::Error> {
        let mut version = semver::Version::new(
            self.major,
            self.minor.unwrap_or(0),
            self.patch.unwrap_or(0),
        );
        if self.channel != Channel::Stable {
            let pre = if self.revision.is_zero() {
                self.channel.name().to_string()
            } else {
                format!("{}.{}", self.channel.name(), self.revision)
            };
            version.pre = semver::Prerelease::new(&pre)?;
        }
        if let Some(build_id) = &self.build_id {
            version.build = semver::BuildMetadata::new(build_id)?;
        }
        Ok(version)
    }
}

fn display_or_none(value: Option<u64>) -> String {
    value.map_or_else(|| "none".to_string(), |v| v.to_string())
}

impl Default for VersionValue {
    fn default() -> Self {
        Self::zero()
    }
}

impl PartialEq for VersionValue {
    fn eq(&self, other: &Self) -> bool {
        self.ordering_key() == other.ordering_key()
    }
}

impl Eq for VersionValue {}

impl PartialOrd for VersionValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VersionValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordering_key().cmp(&other.ordering_key())
    }
}

impl Hash for VersionValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ordering_key().hash(state);
    }
}

impl fmt::Display for VersionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.minor, self.patch) {
            (None, None) => write!(f, "{}", self.major)?,
            (Some(minor), None) => write!(f, "{}.{}", self.major, minor)?,
            (minor, Some(patch)) => write!(
                f,
                "{}.{}.{}{}",
                self.major,
                minor.unwrap_or(0),
                patch,
                self.channel.code()
            )?,
        }
        if let Some(build_id) = &self.build_id {
            write!(f, "+{build_id}")?;
        }
        Ok(())
    }
}

impl From<&semver::Version> for VersionValue {
    fn from(version: &semver::Version) -> Self {
        let mut identifiers = version.pre.as_str().split('.');
        let channel = match identifiers.next() {
            Some(token) if !token.is_empty() => Channel::from_token(token),
            _ => Channel::Stable,
        };
        let revision = identifiers
            .next()
            .and_then(|whole| Revision::from_parts(whole, identifiers.next()))
            .unwrap_or(Revision::ZERO);

        let value = VersionValue::new(version.major, Some(version.minor), Some(version.patch))
            .with_channel(channel)
            .with_revision(revision);
        if version.build.is_empty() {
            value
        } else {
            value.with_build_id(version.build.as_str())
        }
    }
}

/// Right-hand side of [`VersionValue::compare`]
#[derive(Debug, Clone, Copy)]
pub enum Comparand<'a> {
    Version(&'a VersionValue),
    Raw(&'a str),
}

impl<'a> From<&'a VersionValue> for Comparand<'a> {
    fn from(version: &'a VersionValue) -> Self {
        Comparand::Version(version)
    }
}

impl<'a> From<&'a str> for Comparand<'a> {
    fn from(raw: &'a str) -> Self {
        Comparand::Raw(raw)
    }
}

impl<'a> From<&'a String> for Comparand<'a> {
    fn from(raw: &'a String) -> Self {
        Comparand::Raw(raw.as_str())
    }
}
