//! Grammar options and the patterns built from them
//!
//! Two grammars share one parser:
//! - loose: filename-tolerant, never fails, e.g. `jetRun-win-2021.3.1beta+deadbeef.zip`
//! - strict: SemVer-shaped, e.g. `1.2.3-beta.4+build`, rejects malformed input

use serde::Deserialize;

/// Program names recognized in the `<name>-win-` filename prefix
pub const DEFAULT_PROGRAM_NAMES: &[&str] = &["jetCore", "jetPy", "jetRun", "app"];

/// Artifact extensions stripped before parsing loose input
pub const DEFAULT_STRIP_EXTENSIONS: &[&str] = &[
    ".exe", ".msi", ".dmg", ".pkg", ".app", ".deb", ".rpm", ".tar", ".tgz", ".whl",
];

/// Compressed-archive suffixes, stripped before any other extension
const ARCHIVE_SUFFIXES: &[&str] = &[".tar.gz", ".gz", ".zip"];

/// Strict grammar: `MAJOR.MINOR[.PATCH][-][PRERELEASE][+BUILD]`
pub(crate) const STRICT_PATTERN: &str = concat!(
    r"(?i)^(?P<major>0|[1-9]\d*)",
    r"\.(?P<minor>0|[1-9]\d*)",
    r"(?:\.(?P<patch>0|[1-9]\d*))?",
    r"(?:-?(?P<prerelease>(?:0|[1-9a-z-][0-9a-z-]*)(?:\.(?:0|[1-9a-z-][0-9a-z-]*))*))?",
    r"(?:\+(?P<build>(?:0|[1-9a-z-][0-9a-z-]*)(?:\.(?:0|[1-9a-z-][0-9a-z-]*))*))?$",
);

/// Prerelease decomposition: `[name][.][revision][.subrevision][.][channel]`
pub(crate) const PRERELEASE_PATTERN: &str = concat!(
    r"(?i)^(?P<name>[a-z]+)?\.?(?P<revision>\d+)?",
    r"(?:\.(?P<subrevision>\d+(?:\.?\d)*))?",
    r"(?:\.?(?P<channel>[a-z]+))?$",
);

/// Options selecting which grammar features a parser accepts
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GrammarOptions {
    /// Names accepted in the `<name>-win-` prefix of loose input
    pub program_names: Vec<String>,
    /// Accept the `<name>-win-` prefix at all
    pub accept_program_prefix: bool,
    /// Split a strict prerelease into name, revision, sub-revision and channel
    pub decompose_prerelease: bool,
    /// Extensions stripped from loose input after archive suffixes
    pub strip_extensions: Vec<String>,
}

impl Default for GrammarOptions {
    fn default() -> Self {
        Self {
            program_names: DEFAULT_PROGRAM_NAMES.iter().map(|s| s.to_string()).collect(),
            accept_program_prefix: true,
            decompose_prerelease: true,
            strip_extensions: DEFAULT_STRIP_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl GrammarOptions {
    /// Build the loose grammar pattern for these options.
    ///
    /// The match runs to the end of the input and starts at a token boundary:
    /// the start of the input or right after `/`, `\`, `-` or whitespace.
    /// Leading path segments and unknown prefixes are skipped, but a match
    /// never starts inside a word or a dotted run, so `tool-1.2.3_x64` does
    /// not parse as `64`. Legacy `<digit>.` groups before the major number are
    /// consumed lazily, i.e. only when the remainder would not parse otherwise
    /// (`1.2.3.4` parses as `2.3.4`).
    pub fn loose_pattern(&self) -> String {
        let mut pattern = String::from(r"(?i)(?:^|[/\\\s-])");

        let mut names: Vec<&str> = self
            .program_names
            .iter()
            .map(String::as_str)
            .filter(|name| !name.is_empty())
            .collect();
        if self.accept_program_prefix && !names.is_empty() {
            // Longest first so a name never shadows a longer one sharing its prefix
            names.sort_by_key(|name| std::cmp::Reverse(name.len()));
            let alternatives: Vec<String> =
                names.iter().map(|name| regex::escape(name)).collect();
            pattern.push_str(&format!(
                r"(?:(?P<program>{})-win-)?",
                alternatives.join("|")
            ));
        }

        pattern.push_str(concat!(
            r"(?:\d\.)*?",
            r"(?P<major>\d+)",
            r"(?:[.-](?P<minor>\d+))?",
            r"(?:\.(?P<patch>\d+))?",
            r"(?P<channel>[a-z0-9-]*)",
            r"(?:\+(?P<build>.*))?$",
        ));
        pattern
    }

    /// Strip an archive suffix, then one configured extension.
    pub fn strip_artifact_extensions<'a>(&self, input: &'a str) -> &'a str {
        let input = strip_suffix_ignore_case(input, ARCHIVE_SUFFIXES.iter().copied());
        strip_suffix_ignore_case(input, self.strip_extensions.iter().map(String::as_str))
    }
}

fn strip_suffix_ignore_case<'a, 'b>(
    input: &'a str,
    suffixes: impl IntoIterator<Item = &'b str>,
) -> &'a str {
    for suffix in suffixes {
        if suffix.is_empty() || input.len() <= suffix.len() {
            continue;
        }
        let split = input.len() - suffix.len();
        if input.is_char_boundary(split) && input[split..].eq_ignore_ascii_case(suffix) {
            return &input[..split];
        }
    }
    input
}
