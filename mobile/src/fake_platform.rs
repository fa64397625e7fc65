use crate::launcher_platform::{LaunchIntent, LauncherPlatform};
use crate::models::LaunchableComponent;
use anyhow::{Context, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// In-memory platform that records every call made against it.
#[derive(Default)]
pub struct FakePlatform {
    pub components: RefCell<Vec<LaunchableComponent>>,
    /// package id -> component name of its launch intent
    pub launchable: HashMap<String, String>,
    pub sources: HashMap<String, PathBuf>,
    pub fail_list: Cell<bool>,
    pub fail_resolve: bool,
    pub fail_start: bool,
    pub fail_share: bool,
    pub started: RefCell<Vec<String>>,
    pub details_opened: RefCell<Vec<String>>,
    pub shared: RefCell<Vec<PathBuf>>,
}

impl FakePlatform {
    pub fn with_components(components: Vec<LaunchableComponent>) -> Self {
        Self {
            components: RefCell::new(components),
            ..Default::default()
        }
    }
}

pub fn component(package_id: &str, label: &str) -> LaunchableComponent {
    LaunchableComponent {
        package_id: package_id.to_string(),
        activity_name: format!("{}.MainActivity", package_id),
        label: label.to_string(),
        icon_png: Vec::new(),
    }
}

impl LauncherPlatform for FakePlatform {
    fn list_launchable_components(&self) -> Result<Vec<LaunchableComponent>> {
        if self.fail_list.get() {
            anyhow::bail!("queryIntentActivities: DeadObjectException");
        }
        Ok(self.components.borrow().clone())
    }

    fn resolve_launch_intent(&self, package_id: &str) -> Result<Option<LaunchIntent>> {
        if self.fail_resolve {
            anyhow::bail!("getLaunchIntentForPackage failed for {}", package_id);
        }
        Ok(self
            .launchable
            .get(package_id)
            .map(|component| LaunchIntent::new(package_id, Some(component.clone()))))
    }

    fn start_intent(&self, intent: &LaunchIntent) -> Result<()> {
        let component = intent.component().context("intent without component")?;
        if self.fail_start {
            anyhow::bail!("ActivityNotFoundException: {}", component);
        }
        self.started.borrow_mut().push(component.to_string());
        Ok(())
    }

    fn open_app_details(&self, package_id: &str) -> Result<()> {
        self.details_opened.borrow_mut().push(package_id.to_string());
        Ok(())
    }

    fn application_source_path(&self, package_id: &str) -> Result<PathBuf> {
        self.sources
            .get(package_id)
            .cloned()
            .with_context(|| format!("NameNotFoundException: {}", package_id))
    }

    fn share_file(&self, path: &Path, _chooser_title: &str) -> Result<()> {
        if self.fail_share {
            anyhow::bail!("Failed to find configured root that contains {:?}", path);
        }
        self.shared.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}
