use crate::android_activity;
use crate::android_packagemanager;
use crate::launcher_platform::{LaunchIntent, LauncherPlatform};
use crate::models::LaunchableComponent;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Platform backed by the running activity's PackageManager.
#[derive(Debug, Default)]
pub struct AndroidPlatform;

impl LauncherPlatform for AndroidPlatform {
    fn list_launchable_components(&self) -> Result<Vec<LaunchableComponent>> {
        android_packagemanager::query_launchable_components()
    }

    fn resolve_launch_intent(&self, package_id: &str) -> Result<Option<LaunchIntent>> {
        Ok(android_packagemanager::get_launch_intent(package_id)?
            .map(|(handle, component)| LaunchIntent::with_handle(package_id, component, handle)))
    }

    fn start_intent(&self, intent: &LaunchIntent) -> Result<()> {
        let handle = intent
            .handle()
            .with_context(|| format!("Launch intent for {} was not resolved", intent.package_id()))?;
        android_activity::start_intent(handle)
    }

    fn open_app_details(&self, package_id: &str) -> Result<()> {
        android_activity::open_app_details(package_id)
    }

    fn application_source_path(&self, package_id: &str) -> Result<PathBuf> {
        android_packagemanager::get_application_source_dir(package_id).map(PathBuf::from)
    }

    fn share_file(&self, path: &Path, chooser_title: &str) -> Result<()> {
        android_activity::share_file(path, chooser_title)
    }
}
