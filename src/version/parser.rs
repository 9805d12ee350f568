//! Version parser for loose artifact names and strict semantic versions
//!
//! - [`VersionParser::parse`]: never fails; malformed input degrades to
//!   [`VersionValue::zero`] with an `error!` diagnostic
//! - [`VersionParser::parse_strict`]: returns [`VersionError`] on malformed input

use regex::{Captures, Regex};
use tracing::{debug, error, warn};

use crate::version::channel::Channel;
use crate::version::error::{GrammarError, VersionError};
use crate::version::grammar::{GrammarOptions, PRERELEASE_PATTERN, STRICT_PATTERN};
use crate::version::value::{Revision, VersionValue};

/// Parser holding the compiled grammars for one set of [`GrammarOptions`]
#[derive(Debug, Clone)]
pub struct VersionParser {
    options: GrammarOptions,
    /// Filename-tolerant grammar built from the options
    loose_re: Regex,
    /// `MAJOR.MINOR[.PATCH][-][PRERELEASE][+BUILD]`
    strict_re: Regex,
    /// Splits a strict prerelease into name, revision and channel
    prerelease_re: Regex,
}

impl VersionParser {
    pub fn new(options: GrammarOptions) -> Result<Self, GrammarError> {
        Ok(Self {
            loose_re: Regex::new(&options.loose_pattern())?,
            strict_re: Regex::new(STRICT_PATTERN)?,
            prerelease_re: Regex::new(PRERELEASE_PATTERN)?,
            options,
        })
    }

    pub fn options(&self) -> &GrammarOptions {
        &self.options
    }

    /// Parse a version string or artifact file name leniently.
    ///
    /// `None`, empty input and input the grammar cannot match all yield the
    /// zero value. Numeric fields that are missing default to `0` (major) or
    /// stay absent (minor, patch).
    pub fn parse(&self, raw: Option<&str>) -> VersionValue {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            debug!("No version given, using zero version");
            return VersionValue::zero();
        };

        let input = self.options.strip_artifact_extensions(raw);
        let Some(caps) = self.loose_re.captures(input) else {
            error!("Cannot parse version '{}', falling back to defaults", raw);
            return VersionValue::zero();
        };

        let major = lenient_number(&caps, "major", raw).unwrap_or(0);
        let minor = lenient_number(&caps, "minor", raw);
        let patch = lenient_number(&caps, "patch", raw);
        let channel = caps
            .name("channel")
            .map_or(Channel::Stable, |m| Channel::from_token(m.as_str()));

        let mut version = VersionValue::new(major, minor, patch).with_channel(channel);
        if let Some(program) = caps.name("program") {
            version = version.with_program_name(program.as_str());
        }
        if let Some(build) = caps.name("build").filter(|m| !m.as_str().is_empty()) {
            version = version.with_build_id(build.as_str());
        }
        version
    }

    /// Parse a semantic version, rejecting anything the strict grammar does
    /// not accept.
    pub fn parse_strict(&self, raw: &str) -> Result<VersionValue, VersionError> {
        let caps = self
            .strict_re
            .captures(raw.trim())
            .ok_or_else(|| VersionError::Unparsable {
                input: raw.to_string(),
            })?;

        let major = strict_number(&caps, "major", raw)?.unwrap_or(0);
        let minor = strict_number(&caps, "minor", raw)?;
        let patch = strict_number(&caps, "patch", raw)?;

        let (revision, channel) = match caps.name("prerelease") {
            None => (Revision::ZERO, Channel::Stable),
            Some(pre) if self.options.decompose_prerelease => {
                self.decompose_prerelease(pre.as_str(), raw)?
            }
            Some(pre) => (Revision::ZERO, Channel::from_token(pre.as_str())),
        };

        let version = VersionValue::new(major, minor, patch)
            .with_revision(revision)
            .with_channel(channel);
        Ok(match caps.name("build") {
            Some(build) => version.with_build_id(build.as_str()),
            None => version,
        })
    }

    /// Split a prerelease such as `beta.4` or `50.2a` into revision and channel.
    ///
    /// The sub-revision folds into the revision as a decimal fraction
    /// (`50` + `2` => `50.2`). The channel comes from the trailing letters, or
    /// from the leading name when there are none.
    fn decompose_prerelease(
        &self,
        prerelease: &str,
        input: &str,
    ) -> Result<(Revision, Channel), VersionError> {
        let caps = self.prerelease_re.captures(prerelease).ok_or_else(|| {
            VersionError::InvalidPrerelease {
                input: input.to_string(),
                prerelease: prerelease.to_string(),
            }
        })?;

        let whole = caps.name("revision").map_or("0", |m| m.as_str());
        let subrevision = caps.name("subrevision").map(|m| m.as_str());
        let revision = Revision::from_parts(whole, subrevision).ok_or_else(|| {
            VersionError::InvalidRevision {
                input: input.to_string(),
                revision: match subrevision {
                    Some(sub) => format!("{whole}.{sub}"),
                    None => whole.to_string(),
                },
            }
        })?;

        let token = caps
            .name("channel")
            .or_else(|| caps.name("name"))
            .map_or("", |m| m.as_str());

        Ok((revision, Channel::from_token(token)))
    }
}

impl Default for VersionParser {
    fn default() -> Self {
        Self::new(GrammarOptions::default()).expect("default grammar should compile")
    }
}

/// Read a numeric capture, treating overflow as an absent field
fn lenient_number(caps: &Captures, name: &str, input: &str) -> Option<u64> {
    let digits = caps.name(name)?.as_str();
    digits
        .parse()
        .inspect_err(|e| {
            warn!(
                "Ignoring {} '{}' in version '{}': {}",
                name, digits, input, e
            )
        })
        .ok()
}

fn strict_number(caps: &Captures, name: &str, input: &str) -> Result<Option<u64>, VersionError> {
    caps.name(name)
        .map(|m| {
            m.as_str().parse().map_err(|_| VersionError::OutOfRange {
                input: input.to_string(),
                component: m.as_str().to_string(),
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parser() -> VersionParser {
        VersionParser::default()
    }

    #[rstest]
    #[case("0.0.1710a", 0, Some(0), Some(1710), Channel::Alpha)]
    #[case("1.2.3", 1, Some(2), Some(3), Channel::Stable)]
    #[case("1.2", 1, Some(2), None, Channel::Stable)]
    #[case("7", 7, None, None, Channel::Stable)]
    #[case("2021-3", 2021, Some(3), None, Channel::Stable)]
    #[case("1.2b", 1, Some(2), None, Channel::Beta)]
    #[case("1.0.0d", 1, Some(0), Some(0), Channel::Daily)]
    #[case("1.0.0-beta", 1, Some(0), Some(0), Channel::Beta)]
    #[case("1.0.0-rc1", 1, Some(0), Some(0), Channel::Stable)]
    #[case("1.0.0m", 1, Some(0), Some(0), Channel::Mandatory)]
    #[case("1.0.0feature", 1, Some(0), Some(0), Channel::Feature)]
    #[case("1.0.0P", 1, Some(0), Some(0), Channel::Patch)]
    // legacy digit groups before the major number are discarded
    #[case("1.2.3.4", 2, Some(3), Some(4), Channel::Stable)]
    #[case("jetRun-win-2021.3.1beta+deadbeef", 2021, Some(3), Some(1), Channel::Beta)]
    #[case("releases/jetPy-win-3.1.4a.zip", 3, Some(1), Some(4), Channel::Alpha)]
    #[case("app-1.2.3.tar.gz", 1, Some(2), Some(3), Channel::Stable)]
    // matches start after a path or word separator
    #[case(r"C:\downloads\tool-4.5.6b.msi", 4, Some(5), Some(6), Channel::Beta)]
    #[case("tool 1.2.3", 1, Some(2), Some(3), Channel::Stable)]
    #[case("tool_x64-1.2.3", 1, Some(2), Some(3), Channel::Stable)]
    // legacy groups make the leading zeros disappear before a dash-minor
    #[case("0.0.1710-50.2a", 1710, Some(50), Some(2), Channel::Alpha)]
    fn parse_returns_expected_fields(
        #[case] input: &str,
        #[case] major: u64,
        #[case] minor: Option<u64>,
        #[case] patch: Option<u64>,
        #[case] channel: Channel,
    ) {
        let version = parser().parse(Some(input));

        assert_eq!(version.major(), major);
        assert_eq!(version.minor(), minor);
        assert_eq!(version.patch(), patch);
        assert_eq!(version.channel(), channel);
        assert!(version.revision().is_zero());
    }

    #[test]
    fn parse_extracts_program_name_and_build_id() {
        let version = parser().parse(Some("app-win-2024.5.2beta+abc123"));

        assert_eq!(version.program_name(), Some("app"));
        assert_eq!(version.major(), 2024);
        assert_eq!(version.minor(), Some(5));
        assert_eq!(version.patch(), Some(2));
        assert_eq!(version.channel(), Channel::Beta);
        assert_eq!(version.build_id(), Some("abc123"));
        assert_eq!(version.to_string(), "2024.5.2b+abc123");
    }

    #[test]
    fn parse_matches_program_names_case_insensitively() {
        let version = parser().parse(Some("JETRUN-WIN-1.0.0"));
        assert_eq!(version.program_name(), Some("JETRUN"));
    }

    #[test]
    fn parse_ignores_unknown_program_names() {
        let version = parser().parse(Some("other-win-1.2.3b"));

        assert_eq!(version.program_name(), None);
        assert_eq!(version.to_string(), "1.2.3b");
    }

    #[rstest]
    #[case("myapp-win-1.2.3", "1.2.3")]
    #[case("webapp-win-1.2.3b", "1.2.3b")]
    #[case("xjetRun-win-2.0.0", "2.0.0")]
    fn parse_ignores_names_that_only_end_in_a_program_name(
        #[case] input: &str,
        #[case] expected: &str,
    ) {
        let version = parser().parse(Some(input));

        assert_eq!(version.program_name(), None);
        assert_eq!(version.to_string(), expected);
    }

    #[test]
    fn parse_accepts_program_name_after_path_separator() {
        let version = parser().parse(Some("builds/jetCore-win-3.0.1"));

        assert_eq!(version.program_name(), Some("jetCore"));
        assert_eq!(version.to_string(), "3.0.1");
    }

    #[test]
    fn parse_ignores_program_prefix_when_disabled() {
        let parser = VersionParser::new(GrammarOptions {
            accept_program_prefix: false,
            ..GrammarOptions::default()
        })
        .unwrap();

        let version = parser.parse(Some("jetPy-win-1.2.3"));

        assert_eq!(version.program_name(), None);
        assert_eq!(version.to_string(), "1.2.3");
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    #[case(Some("not-a-version"))]
    #[case(Some("1.2.3 (copy)"))]
    // trailing junk with digits must not yield a version taken from the tail
    #[case(Some("tool-1.2.3_x64.exe"))]
    #[case(Some("app-1.2.3.tar.bz2"))]
    #[case(Some("1.2.3-rc.1"))]
    #[case(Some("build42"))]
    fn parse_falls_back_to_zero_version(#[case] input: Option<&str>) {
        let version = parser().parse(input);

        assert_eq!(version.major(), 0);
        assert_eq!(version.minor(), Some(0));
        assert_eq!(version.patch(), None);
        assert_eq!(version.channel(), Channel::Daily);
        assert_eq!(version.build_id(), None);
    }

    #[test]
    fn parse_treats_overflowing_fields_as_absent() {
        let version = parser().parse(Some("1.99999999999999999999999"));

        assert_eq!(version.major(), 1);
        assert_eq!(version.minor(), None);
    }

    #[test]
    fn parse_drops_empty_build_id() {
        let version = parser().parse(Some("1.2.3+"));
        assert_eq!(version.build_id(), None);
    }

    #[rstest]
    #[case("1.0.0-50", 50.0, Channel::Stable)]
    #[case("1.0.0-50.1", 50.1, Channel::Stable)]
    #[case("0.0.1710-50a", 50.0, Channel::Alpha)]
    #[case("0.0.1710-50.2a+abcdef", 50.2, Channel::Alpha)]
    #[case("1.2.3-beta.4+build", 4.0, Channel::Beta)]
    #[case("0.0.1710a", 0.0, Channel::Alpha)]
    #[case("1.2.3", 0.0, Channel::Stable)]
    #[case("1.2.3-BETA", 0.0, Channel::Beta)]
    fn parse_strict_decomposes_prerelease(
        #[case] input: &str,
        #[case] revision: f64,
        #[case] channel: Channel,
    ) {
        let version = parser().parse_strict(input).unwrap();

        assert_eq!(version.revision().value(), revision);
        assert_eq!(version.channel(), channel);
    }

    #[test]
    fn parse_strict_keeps_numeric_fields_and_build() {
        let version = parser().parse_strict("0.0.1710-50.2a+abcdef").unwrap();

        assert_eq!(version.major(), 0);
        assert_eq!(version.minor(), Some(0));
        assert_eq!(version.patch(), Some(1710));
        assert_eq!(version.build_id(), Some("abcdef"));
        assert_eq!(version.program_name(), None);
    }

    #[test]
    fn parse_strict_without_decomposition_uses_prerelease_as_channel() {
        let parser = VersionParser::new(GrammarOptions {
            decompose_prerelease: false,
            ..GrammarOptions::default()
        })
        .unwrap();

        let version = parser.parse_strict("1.2.3-beta.4").unwrap();

        assert_eq!(version.channel(), Channel::Beta);
        assert!(version.revision().is_zero());
    }

    #[rstest]
    #[case("not-a-version")]
    #[case("")]
    #[case("1")]
    #[case("01.2.3")]
    #[case("1.2.3 trailing")]
    #[case("jetRun-win-1.2.3")]
    fn parse_strict_rejects_malformed_versions(#[case] input: &str) {
        let err = parser().parse_strict(input).unwrap_err();
        assert_eq!(
            err,
            VersionError::Unparsable {
                input: input.to_string()
            }
        );
    }

    #[test]
    fn parse_strict_rejects_undecomposable_prerelease() {
        let err = parser().parse_strict("1.2.3-rc-1").unwrap_err();

        assert_eq!(
            err,
            VersionError::InvalidPrerelease {
                input: "1.2.3-rc-1".to_string(),
                prerelease: "rc-1".to_string(),
            }
        );
        assert_eq!(err.input(), "1.2.3-rc-1");
    }

    #[test]
    fn parse_strict_rejects_multi_dot_subrevision() {
        let err = parser().parse_strict("1.2.3-50.2.3").unwrap_err();

        assert_eq!(
            err,
            VersionError::InvalidRevision {
                input: "1.2.3-50.2.3".to_string(),
                revision: "50.2.3".to_string(),
            }
        );
    }

    #[test]
    fn parse_strict_rejects_out_of_range_components() {
        let err = parser()
            .parse_strict("99999999999999999999999.0.0")
            .unwrap_err();

        assert!(matches!(err, VersionError::OutOfRange { .. }));
    }
}
