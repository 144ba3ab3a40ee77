//! Package manager profiles

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::template::Template;

/// The operations a package manager contributes, keyed by operation name
pub type ProfileTemplates = BTreeMap<String, Template>;

/// A package manager binary and the templates it contributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManagerProfile {
    /// Short name, e.g. `apt`
    pub name: String,
    /// Location of the binary whose presence selects this profile
    pub path: PathBuf,
    /// install/upgrade/update/remove and any extra operations
    pub templates: ProfileTemplates,
}

impl PackageManagerProfile {
    /// Create a profile from `(operation, template)` pairs
    pub fn new<'a>(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        templates: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            templates: templates
                .into_iter()
                .map(|(op, template)| (op.to_string(), Template::new(template)))
                .collect(),
        }
    }

    /// apt / apt-get (Debian, Ubuntu)
    pub fn apt() -> Self {
        Self::new(
            "apt",
            "/usr/bin/apt",
            [
                ("install", "apt-get install -y $ARGS$ $KWARGS$"),
                ("upgrade", "apt-get upgrade -y"),
                ("update", "apt-get update -y"),
                ("remove", "apt-get remove -y $ARGS$ $KWARGS$"),
            ],
        )
    }

    /// pacman (Arch)
    pub fn pacman() -> Self {
        Self::new(
            "pacman",
            "/usr/bin/pacman",
            [
                ("install", "pacman -Sy --noconfirm $ARGS$ $KWARGS$"),
                ("update", "pacman -Syy"),
                ("upgrade", "pacman -Syu"),
                ("remove", "pacman -R $ARGS$"),
            ],
        )
    }

    /// yum (RHEL, CentOS)
    pub fn yum() -> Self {
        Self::new(
            "yum",
            "/usr/bin/yum",
            [
                ("install", "yum install -y $ARGS$ $KWARGS$"),
                ("update", "yum update -y"),
                ("upgrade", "yum upgrade -y"),
                ("remove", "yum remove -y $ARGS$"),
            ],
        )
    }

    /// dnf (Fedora)
    pub fn dnf() -> Self {
        Self::new(
            "dnf",
            "/usr/bin/dnf",
            [
                ("install", "dnf install -y $ARGS$ $KWARGS$"),
                ("update", "dnf makecache -y"),
                ("upgrade", "dnf upgrade -y"),
                ("remove", "dnf remove -y $ARGS$"),
            ],
        )
    }

    /// zypper (openSUSE, SLES)
    pub fn zypper() -> Self {
        Self::new(
            "zypper",
            "/usr/bin/zypper",
            [
                ("install", "zypper --non-interactive install $ARGS$ $KWARGS$"),
                ("update", "zypper --non-interactive refresh"),
                ("upgrade", "zypper --non-interactive update"),
                ("remove", "zypper --non-interactive remove $ARGS$"),
            ],
        )
    }

    /// apk (Alpine)
    pub fn apk() -> Self {
        Self::new(
            "apk",
            "/sbin/apk",
            [
                ("install", "apk add $ARGS$ $KWARGS$"),
                ("update", "apk update"),
                ("upgrade", "apk upgrade"),
                ("remove", "apk del $ARGS$"),
            ],
        )
    }
}

/// Built-in profiles in detection priority order
///
/// Detection picks the first entry whose binary exists.
pub fn builtin_profiles() -> Vec<PackageManagerProfile> {
    vec![
        PackageManagerProfile::apt(),
        PackageManagerProfile::pacman(),
        PackageManagerProfile::yum(),
        PackageManagerProfile::dnf(),
        PackageManagerProfile::zypper(),
        PackageManagerProfile::apk(),
    ]
}
