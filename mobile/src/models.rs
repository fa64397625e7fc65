/// Raw projection of one launcher entry point as reported by the platform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaunchableComponent {
    pub package_id: String,
    pub activity_name: String,
    pub label: String,
    /// PNG-encoded icon, empty when the platform could not render one.
    pub icon_png: Vec<u8>,
}

/// Encoded icon image of an app.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppIcon {
    png_bytes: Vec<u8>,
}

impl AppIcon {
    pub fn from_png(png_bytes: Vec<u8>) -> Self {
        Self { png_bytes }
    }

    pub fn png_bytes(&self) -> &[u8] {
        &self.png_bytes
    }

    pub fn is_empty(&self) -> bool {
        self.png_bytes.is_empty()
    }
}

/// One row of the launcher list. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppRecord {
    name: String,
    package_id: String,
    icon: AppIcon,
}

impl AppRecord {
    pub fn new(name: impl Into<String>, package_id: impl Into<String>, icon: AppIcon) -> Self {
        Self {
            name: name.into(),
            package_id: package_id.into(),
            icon,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn package_id(&self) -> &str {
        &self.package_id
    }

    pub fn icon(&self) -> &AppIcon {
        &self.icon
    }

    /// Case-insensitive match against name or package id.
    pub fn matches(&self, needle_lowercase: &str) -> bool {
        needle_lowercase.is_empty()
            || self.name.to_lowercase().contains(needle_lowercase)
            || self.package_id.to_lowercase().contains(needle_lowercase)
    }
}

impl From<LaunchableComponent> for AppRecord {
    fn from(component: LaunchableComponent) -> Self {
        // Blank labels fall back to the package id so the row is never empty.
        let name = if component.label.trim().is_empty() {
            component.package_id.clone()
        } else {
            component.label
        };
        AppRecord::new(name, component.package_id, AppIcon::from_png(component.icon_png))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(package_id: &str, label: &str) -> LaunchableComponent {
        LaunchableComponent {
            package_id: package_id.to_string(),
            activity_name: format!("{}.MainActivity", package_id),
            label: label.to_string(),
            icon_png: vec![1, 2, 3],
        }
    }

    #[test]
    fn test_record_from_component() {
        let record = AppRecord::from(component("org.example.mail", "Mail"));
        assert_eq!(record.name(), "Mail");
        assert_eq!(record.package_id(), "org.example.mail");
        assert_eq!(record.icon().png_bytes(), &[1, 2, 3]);
    }

    #[test]
    fn test_blank_label_falls_back_to_package_id() {
        let record = AppRecord::from(component("org.example.nolabel", "  "));
        assert_eq!(record.name(), "org.example.nolabel");
    }

    #[test]
    fn test_matches_name_or_package_case_insensitively() {
        let record = AppRecord::from(component("org.fossify.Gallery", "Photo Viewer"));
        assert!(record.matches("photo"));
        assert!(record.matches("gallery"));
        assert!(record.matches(""));
        assert!(!record.matches("camera"));
    }
}
