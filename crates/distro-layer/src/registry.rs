//! The operation table
//!
//! The table is layered: the distro-independent base entries first, then the
//! detected package manager's templates, then caller overrides. Each layer
//! replaces entries of the same name from the layers below it.

use std::collections::BTreeMap;

use crate::profile::PackageManagerProfile;
use crate::template::Template;

/// Caller supplied operation overrides; `None` disables an operation
pub type Overrides = BTreeMap<String, Option<Template>>;

/// Distro-independent operations and the package operations every profile fills in
fn base_entries() -> [(&'static str, Option<&'static str>); 11] {
    [
        ("install", None),
        ("upgrade", None),
        ("update", None),
        ("remove", None),
        ("set_hostname", Some("hostnamectl set-hostname $ARGS$")),
        ("reboot", Some("reboot")),
        ("enable_service", Some("systemctl enable $ARGS$")),
        ("disable_service", Some("systemctl disable $ARGS$")),
        ("stop_service", Some("systemctl stop $ARGS$")),
        ("start_service", Some("systemctl start $ARGS$")),
        ("restart_service", Some("systemctl restart $ARGS$")),
    ]
}

/// Operation name to template mapping used for every resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationTable {
    entries: BTreeMap<String, Option<Template>>,
}

impl OperationTable {
    /// The base table alone
    pub fn base() -> Self {
        Self {
            entries: base_entries()
                .into_iter()
                .map(|(op, template)| (op.to_string(), template.map(Template::new)))
                .collect(),
        }
    }

    /// Build the final table: base, then profile, then overrides
    pub fn build(profile: Option<&PackageManagerProfile>, overrides: &Overrides) -> Self {
        let mut table = Self::base();
        if let Some(profile) = profile {
            table.overlay_profile(profile);
        }
        table.overlay(overrides);
        table
    }

    /// Overlay a package manager's templates
    pub fn overlay_profile(&mut self, profile: &PackageManagerProfile) {
        for (op, template) in &profile.templates {
            self.entries.insert(op.clone(), Some(template.clone()));
        }
    }

    /// Overlay caller overrides, replacing existing entries unconditionally
    pub fn overlay(&mut self, overrides: &Overrides) {
        for (op, template) in overrides {
            self.entries.insert(op.clone(), template.clone());
        }
    }

    /// Add or replace a single entry
    pub fn insert(&mut self, operation: impl Into<String>, template: Option<Template>) {
        self.entries.insert(operation.into(), template);
    }

    /// The usable template for an operation
    ///
    /// Absent, null and blank entries all read as `None`.
    pub fn get(&self, operation: &str) -> Option<&Template> {
        self.entries
            .get(operation)
            .and_then(Option::as_ref)
            .filter(|template| !template.is_blank())
    }

    /// True when the operation has a usable template
    pub fn is_implemented(&self, operation: &str) -> bool {
        self.get(operation).is_some()
    }

    /// Names of operations with a usable template, sorted
    pub fn valid_commands(&self) -> Vec<&str> {
        self.entries
            .keys()
            .filter(|op| self.is_implemented(op))
            .map(String::as_str)
            .collect()
    }

    /// Every known operation name, including unimplemented ones
    pub fn operations(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl Default for OperationTable {
    fn default() -> Self {
        Self::base()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides(pairs: &[(&str, Option<&str>)]) -> Overrides {
        pairs
            .iter()
            .map(|(op, t)| (op.to_string(), t.map(Template::new)))
            .collect()
    }

    #[test]
    fn test_base_table_without_profile() {
        let table = OperationTable::build(None, &Overrides::new());

        assert_eq!(
            table.valid_commands(),
            vec![
                "disable_service",
                "enable_service",
                "reboot",
                "restart_service",
                "set_hostname",
                "start_service",
                "stop_service",
            ]
        );
        assert!(!table.is_implemented("install"));
        assert_eq!(table.operations().count(), 11);
    }

    #[test]
    fn test_profile_fills_package_operations() {
        let table = OperationTable::build(Some(&PackageManagerProfile::pacman()), &Overrides::new());

        assert_eq!(table.get("install").unwrap().as_str(), "pacman -Sy --noconfirm $ARGS$ $KWARGS$");
        assert_eq!(table.get("remove").unwrap().as_str(), "pacman -R $ARGS$");
        assert!(table.valid_commands().contains(&"reboot"));
    }

    #[test]
    fn test_overrides_win_over_profile_and_base() {
        let table = OperationTable::build(
            Some(&PackageManagerProfile::apt()),
            &overrides(&[
                ("install", Some("apt install --yes $ARGS$")),
                ("reboot", Some("shutdown -r now")),
                ("flush_dns", Some("resolvectl flush-caches")),
            ]),
        );

        assert_eq!(table.get("install").unwrap().as_str(), "apt install --yes $ARGS$");
        assert_eq!(table.get("reboot").unwrap().as_str(), "shutdown -r now");
        assert_eq!(table.get("flush_dns").unwrap().as_str(), "resolvectl flush-caches");
    }

    #[test]
    fn test_null_override_disables_operation() {
        let table = OperationTable::build(
            Some(&PackageManagerProfile::apt()),
            &overrides(&[("upgrade", None), ("reboot", Some(""))]),
        );

        assert!(!table.is_implemented("upgrade"));
        assert!(!table.is_implemented("reboot"));
        assert!(!table.valid_commands().contains(&"upgrade"));
        assert!(table.operations().any(|op| op == "upgrade"));
    }

    #[test]
    fn test_insert_after_build() {
        let mut table = OperationTable::default();
        table.insert("install", Some(Template::new("brew install $ARGS$")));
        assert_eq!(table.get("install").unwrap().as_str(), "brew install $ARGS$");

        table.insert("install", None);
        assert!(table.get("install").is_none());
    }
}
