use crate::launcher_platform::LauncherPlatform;
use crate::models::AppRecord;
use anyhow::{Context, Result};
use std::collections::HashSet;

/// Builds one record per distinct launchable component, in platform order.
pub fn enumerate_apps(platform: &dyn LauncherPlatform) -> Result<Vec<AppRecord>> {
    let components = platform
        .list_launchable_components()
        .context("Failed to query launchable components")?;
    let reported = components.len();

    let mut seen = HashSet::new();
    let records: Vec<AppRecord> = components
        .into_iter()
        .filter(|c| {
            if c.package_id.is_empty() {
                tracing::warn!("Skipping launchable component without package id: {:?}", c.activity_name);
                return false;
            }
            seen.insert((c.package_id.clone(), c.activity_name.clone()))
        })
        .map(AppRecord::from)
        .collect();

    tracing::debug!(
        "Enumerated {} launchable components ({} reported)",
        records.len(),
        reported
    );
    Ok(records)
}

/// Stable ascending sort by lowercased display name.
pub fn sort_by_name(records: &mut [AppRecord]) {
    records.sort_by_cached_key(|r| r.name().to_lowercase());
}

/// Enumerates and sorts in one step, the order the list presenter expects.
pub fn load_sorted_apps(platform: &dyn LauncherPlatform) -> Result<Vec<AppRecord>> {
    let mut records = enumerate_apps(platform)?;
    sort_by_name(&mut records);
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake_platform::{component, FakePlatform};

    #[test]
    fn test_empty_platform_yields_empty_list() {
        let platform = FakePlatform::default();
        assert!(load_sorted_apps(&platform).unwrap().is_empty());
    }

    #[test]
    fn test_sorted_case_insensitively() {
        let platform = FakePlatform::with_components(vec![
            component("org.example.zebra", "zebra"),
            component("org.example.alpha", "Alpha"),
            component("org.example.beta", "beta"),
            component("org.example.camera", "Camera"),
        ]);

        let records = load_sorted_apps(&platform).unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["Alpha", "beta", "Camera", "zebra"]);
    }

    #[test]
    fn test_equal_names_keep_enumeration_order() {
        let platform = FakePlatform::with_components(vec![
            component("org.second.notes", "Notes"),
            component("org.first.notes", "notes"),
            component("org.example.a", "A"),
        ]);

        let records = load_sorted_apps(&platform).unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.package_id()).collect();
        assert_eq!(ids, vec!["org.example.a", "org.second.notes", "org.first.notes"]);
    }

    #[test]
    fn test_one_record_per_distinct_component() {
        let mut settings_alias = component("com.android.settings", "Settings shortcut");
        settings_alias.activity_name = "com.android.settings.Shortcut".to_string();

        let platform = FakePlatform::with_components(vec![
            component("com.android.settings", "Settings"),
            settings_alias,
            component("com.android.settings", "Settings"),
            component("org.example.mail", "Mail"),
        ]);

        let records = enumerate_apps(&platform).unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_components_without_package_are_dropped() {
        let platform = FakePlatform::with_components(vec![
            component("", "Ghost"),
            component("org.example.mail", "Mail"),
        ]);

        let records = enumerate_apps(&platform).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].package_id(), "org.example.mail");
    }
}
