//! Version ordering for packages and Unity editors
//!
//! Package versions are semantic versions. Their ordering follows the semver
//! precedence rules: build metadata is ignored, a prerelease sorts before its
//! release, and prerelease identifiers are compared one by one (numeric
//! identifiers numerically, alphanumeric ones lexically, numeric before
//! alphanumeric, shorter lists first when all shared identifiers are equal).
//!
//! Unity versions only matter down to `major.minor`, so `2022.3.22f1` and
//! `2022.3` are the same editor line as far as compatibility goes.
//!
//! # Examples
//!
//! ```
//! use semver::Version;
//! use std::cmp::Ordering;
//! use vpm_catalog::{compare_version, UnityVersion};
//!
//! let beta = Version::parse("1.0.0-beta.2").unwrap();
//! let release = Version::parse("1.0.0").unwrap();
//! assert_eq!(compare_version(&beta, &release), Ordering::Less);
//!
//! let unity: UnityVersion = "2022.3.22f1".parse().unwrap();
//! assert_eq!((unity.major, unity.minor), (2022, 3));
//! ```

use crate::{Error, Result};
use semver::Version;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Compare two package versions by semver precedence.
///
/// Build metadata does not take part, so `1.0.0+a` and `1.0.0+b` compare equal.
pub fn compare_version(a: &Version, b: &Version) -> Ordering {
    a.major
        .cmp(&b.major)
        .then(a.minor.cmp(&b.minor))
        .then(a.patch.cmp(&b.patch))
        // semver::Prerelease orders an empty tag above any non-empty one and
        // compares identifiers pairwise with numeric < alphanumeric.
        .then_with(|| a.pre.cmp(&b.pre))
}

/// Returns true if the version carries no prerelease tag
pub fn is_stable(version: &Version) -> bool {
    version.pre.is_empty()
}

/// A Unity editor line, reduced to `major.minor`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UnityVersion {
    pub major: u16,
    pub minor: u8,
}

impl UnityVersion {
    pub const fn new(major: u16, minor: u8) -> Self {
        Self { major, minor }
    }
}

impl FromStr for UnityVersion {
    type Err = Error;

    /// Parse `2019`, `2019.4`, `2019.4.31f1` and similar.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidUnityVersion(s.to_string());

        let mut parts = s.trim().split('.');
        let major = parts
            .next()
            .filter(|p| !p.is_empty())
            .and_then(|p| p.parse::<u16>().ok())
            .ok_or_else(invalid)?;

        let minor = match parts.next() {
            None => 0,
            Some(part) => {
                // The minor part may carry a release suffix in short forms like "2019.4f1"
                let digits: String = part.chars().take_while(|c| c.is_ascii_digit()).collect();
                digits.parse::<u8>().map_err(|_| invalid())?
            }
        };

        Ok(Self { major, minor })
    }
}

impl TryFrom<String> for UnityVersion {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<UnityVersion> for String {
    fn from(value: UnityVersion) -> Self {
        value.to_string()
    }
}

impl fmt::Display for UnityVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Compare a package's minimum Unity version against the project's editor.
///
/// `Less` or `Equal` means the package accepts the project editor.
pub fn compare_unity_version(package_unity: UnityVersion, project_unity: UnityVersion) -> Ordering {
    package_unity
        .major
        .cmp(&project_unity.major)
        .then(package_unity.minor.cmp(&project_unity.minor))
}
