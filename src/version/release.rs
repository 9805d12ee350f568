//! Release selection over parsed versions
//!
//! Sorting, deduplication and "is this an upgrade" decisions for lists of
//! release artifacts.

use tracing::warn;

use crate::version::parser::VersionParser;
use crate::version::value::VersionValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareResult {
    Latest,
    Outdated,
    Newer,
    Invalid,
}

/// Compare a current semantic version to the latest one using the strict
/// grammar.
///
/// Returns `Invalid` when either side is not a valid version.
pub fn compare_to_latest(parser: &VersionParser, current: &str, latest: &str) -> CompareResult {
    let Ok(current_ver) = parser
        .parse_strict(current)
        .inspect_err(|e| warn!("Invalid current version: {}", e))
    else {
        return CompareResult::Invalid;
    };

    let Ok(latest_ver) = parser
        .parse_strict(latest)
        .inspect_err(|e| warn!("Invalid latest version: {}", e))
    else {
        return CompareResult::Invalid;
    };

    match current_ver.cmp(&latest_ver) {
        std::cmp::Ordering::Less => CompareResult::Outdated,
        std::cmp::Ordering::Equal => CompareResult::Latest,
        std::cmp::Ordering::Greater => CompareResult::Newer,
    }
}

/// Sort versions ascending. Equal versions keep their input order.
pub fn sort_versions(versions: &mut [VersionValue]) {
    versions.sort();
}

/// Sort versions and drop all but the first of each group of equal versions.
///
/// Equality follows the ordering key, so `1.2.3+aaa` and `1.2.3+bbb` collapse
/// into whichever came first.
pub fn dedup_versions(mut versions: Vec<VersionValue>) -> Vec<VersionValue> {
    sort_versions(&mut versions);
    versions.dedup();
    versions
}

/// Newest version in the list; the first one wins among equals
pub fn latest(versions: &[VersionValue]) -> Option<&VersionValue> {
    versions
        .iter()
        .reduce(|best, v| if v > best { v } else { best })
}

/// Calculate the latest patch version within the same major.minor
///
/// Returns the latest candidate if it is newer than `current`,
/// or None if the current version is already the latest patch.
pub fn calculate_latest_patch(
    current: &VersionValue,
    available: &[VersionValue],
) -> Option<VersionValue> {
    newest_upgrade(current, available, |v| {
        v.major() == current.major() && v.minor().unwrap_or(0) == current.minor().unwrap_or(0)
    })
}

/// Calculate the latest minor version within the same major
///
/// Returns the latest candidate if it is newer than `current`,
/// or None if the current version is already the latest minor.
pub fn calculate_latest_minor(
    current: &VersionValue,
    available: &[VersionValue],
) -> Option<VersionValue> {
    newest_upgrade(current, available, |v| v.major() == current.major())
}

/// Calculate the latest version overall
///
/// Returns the latest candidate if it is newer than `current`,
/// or None if the current version is already the latest.
pub fn calculate_latest_major(
    current: &VersionValue,
    available: &[VersionValue],
) -> Option<VersionValue> {
    newest_upgrade(current, available, |_| true)
}

fn newest_upgrade(
    current: &VersionValue,
    available: &[VersionValue],
    filter: impl Fn(&VersionValue) -> bool,
) -> Option<VersionValue> {
    let candidates: Vec<VersionValue> = available.iter().filter(|&v| filter(v)).cloned().collect();

    latest(&candidates)
        .filter(|v| v.is_upgrade_from(current))
        .cloned()
}
