//! Unity compatibility checks
//!
//! A package is compatible with a project when its minimum Unity line is not
//! newer than the project's editor. Missing information on either side is
//! treated as compatible.
//!
//! A few historical SDK releases declare a `unity` field that is wrong for
//! them: they only ever worked on Unity 2019. Those are special-cased here.

use crate::package::PackageManifest;
use crate::version::{compare_unity_version, UnityVersion};
use semver::Version;
use std::cmp::Ordering;

/// Core avatar, world, and base SDK package ids
pub const VRCSDK_PACKAGES: [&str; 3] =
    ["com.vrchat.avatars", "com.vrchat.worlds", "com.vrchat.base"];

/// The VPM resolver package shipped with early SDK releases
pub const VPM_RESOLVER_PACKAGE: &str = "com.vrchat.core.vpm-resolver";

const UNITY_2019: u16 = 2019;

/// Returns `Some(compatible)` when a historical exception decides the outcome
fn legacy_unity_exception(
    id: &str,
    version: &Version,
    project_unity: UnityVersion,
) -> Option<bool> {
    let only_2019 = if VRCSDK_PACKAGES.contains(&id) {
        // SDK 3.4.x and earlier
        (version.major, version.minor) <= (3, 4)
    } else if id == VPM_RESOLVER_PACKAGE {
        (version.major, version.minor, version.patch) <= (0, 1, 26)
    } else {
        false
    };

    only_2019.then_some(project_unity.major == UNITY_2019)
}

/// Check whether a package version can be used with the project's editor
pub fn is_unity_compatible(package: &PackageManifest, project_unity: Option<UnityVersion>) -> bool {
    let Some(project_unity) = project_unity else {
        return true;
    };

    if let Some(compatible) = legacy_unity_exception(&package.id, &package.version, project_unity) {
        return compatible;
    }

    match package.unity {
        Some(package_unity) => {
            compare_unity_version(package_unity, project_unity) != Ordering::Greater
        }
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(id: &str, version: &str, unity: Option<&str>) -> PackageManifest {
        let mut manifest = PackageManifest::new(id, Version::parse(version).unwrap());
        manifest.unity = unity.map(|u| u.parse().unwrap());
        manifest
    }

    const U2019: UnityVersion = UnityVersion::new(2019, 4);
    const U2022: UnityVersion = UnityVersion::new(2022, 3);

    #[test]
    fn test_no_project_unity_is_compatible() {
        let pkg = manifest("com.example.tool", "1.0.0", Some("2023.1"));
        assert!(is_unity_compatible(&pkg, None));
    }

    #[test]
    fn test_no_package_unity_is_compatible() {
        let pkg = manifest("com.example.tool", "1.0.0", None);
        assert!(is_unity_compatible(&pkg, Some(U2019)));
    }

    #[test]
    fn test_minimum_unity() {
        let pkg = manifest("com.example.tool", "1.0.0", Some("2020.3"));
        assert!(!is_unity_compatible(&pkg, Some(U2019)));
        assert!(is_unity_compatible(&pkg, Some(U2022)));

        let same = manifest("com.example.tool", "1.0.0", Some("2022.3"));
        assert!(is_unity_compatible(&same, Some(U2022)));
    }

    #[test]
    fn test_old_sdk_is_2019_only() {
        for id in VRCSDK_PACKAGES {
            let pkg = manifest(id, "3.4.2", Some("2019.4"));
            assert!(is_unity_compatible(&pkg, Some(U2019)), "{id} on 2019");
            assert!(!is_unity_compatible(&pkg, Some(U2022)), "{id} on 2022");
        }
    }

    #[test]
    fn test_old_sdk_exception_ignores_stated_range() {
        // Even without a unity field the exception applies
        let pkg = manifest("com.vrchat.avatars", "3.1.0", None);
        assert!(!is_unity_compatible(&pkg, Some(U2022)));
    }

    #[test]
    fn test_new_sdk_uses_stated_range() {
        let pkg = manifest("com.vrchat.worlds", "3.5.0", Some("2022.3"));
        assert!(is_unity_compatible(&pkg, Some(U2022)));
        assert!(!is_unity_compatible(&pkg, Some(U2019)));
    }

    #[test]
    fn test_vpm_resolver_exception() {
        let old = manifest(VPM_RESOLVER_PACKAGE, "0.1.26", Some("2019.4"));
        assert!(is_unity_compatible(&old, Some(U2019)));
        assert!(!is_unity_compatible(&old, Some(U2022)));

        let new = manifest(VPM_RESOLVER_PACKAGE, "0.1.27", Some("2019.4"));
        assert!(is_unity_compatible(&new, Some(U2022)));
    }

    #[test]
    fn test_other_packages_have_no_exception() {
        let pkg = manifest("com.example.avatars", "3.0.0", Some("2019.4"));
        assert!(is_unity_compatible(&pkg, Some(U2022)));
    }
}
