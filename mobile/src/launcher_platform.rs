// Capability seam between the launcher logic and the device.
// The Android implementation lives in android_platform.rs and talks to
// PackageManager and the activity over JNI.

use crate::models::LaunchableComponent;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// A resolved entry intent that can be handed back to the platform to start.
#[derive(Clone, Debug)]
pub struct LaunchIntent {
    package_id: String,
    component: Option<String>,
    #[cfg(target_os = "android")]
    handle: Option<jni::objects::GlobalRef>,
}

impl LaunchIntent {
    pub fn new(package_id: impl Into<String>, component: Option<String>) -> Self {
        Self {
            package_id: package_id.into(),
            component,
            #[cfg(target_os = "android")]
            handle: None,
        }
    }

    #[cfg(target_os = "android")]
    pub(crate) fn with_handle(
        package_id: impl Into<String>,
        component: Option<String>,
        handle: jni::objects::GlobalRef,
    ) -> Self {
        Self {
            package_id: package_id.into(),
            component,
            handle: Some(handle),
        }
    }

    pub fn package_id(&self) -> &str {
        &self.package_id
    }

    /// Flattened component name (`package/class`) when the platform reported one.
    pub fn component(&self) -> Option<&str> {
        self.component.as_deref()
    }

    #[cfg(target_os = "android")]
    pub(crate) fn handle(&self) -> Option<&jni::objects::GlobalRef> {
        self.handle.as_ref()
    }
}

pub trait LauncherPlatform {
    /// Every component advertising `MAIN` + `LAUNCHER`, in platform order.
    fn list_launchable_components(&self) -> Result<Vec<LaunchableComponent>>;

    /// `Ok(None)` when the package is gone or has no launcher activity.
    fn resolve_launch_intent(&self, package_id: &str) -> Result<Option<LaunchIntent>>;

    fn start_intent(&self, intent: &LaunchIntent) -> Result<()>;

    /// Opens the system application-details screen for `package_id`.
    fn open_app_details(&self, package_id: &str) -> Result<()>;

    /// Location of the installed base APK of `package_id`.
    fn application_source_path(&self, package_id: &str) -> Result<PathBuf>;

    /// Hands `path` to the system share sheet through a content-provider URI.
    fn share_file(&self, path: &Path, chooser_title: &str) -> Result<()>;
}

/// Platform used by the desktop build. There is no package manager to talk to,
/// so it reports no apps and refuses every action.
#[derive(Debug, Default)]
pub struct DesktopPlatform;

impl LauncherPlatform for DesktopPlatform {
    fn list_launchable_components(&self) -> Result<Vec<LaunchableComponent>> {
        log::debug!("list_launchable_components is only available on Android");
        Ok(Vec::new())
    }

    fn resolve_launch_intent(&self, package_id: &str) -> Result<Option<LaunchIntent>> {
        log::debug!(
            "resolve_launch_intent({}) is only available on Android",
            package_id
        );
        Ok(None)
    }

    fn start_intent(&self, intent: &LaunchIntent) -> Result<()> {
        anyhow::bail!(
            "Starting {} is only available on Android",
            intent.package_id()
        )
    }

    fn open_app_details(&self, package_id: &str) -> Result<()> {
        log::debug!("open_app_details({}) is only available on Android", package_id);
        Ok(())
    }

    fn application_source_path(&self, package_id: &str) -> Result<PathBuf> {
        anyhow::bail!(
            "No installed package source for {} outside Android",
            package_id
        )
    }

    fn share_file(&self, path: &Path, _chooser_title: &str) -> Result<()> {
        anyhow::bail!("Sharing {:?} is only available on Android", path)
    }
}
