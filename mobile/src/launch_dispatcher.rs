use crate::launcher_platform::LauncherPlatform;
use crate::models::AppRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    Started,
    /// No entry intent could be resolved or started.
    NotFound,
}

pub fn launch(platform: &dyn LauncherPlatform, record: &AppRecord) -> LaunchOutcome {
    let intent = match platform.resolve_launch_intent(record.package_id()) {
        Ok(Some(intent)) => intent,
        Ok(None) => {
            tracing::info!("No launch intent for {}", record.package_id());
            return LaunchOutcome::NotFound;
        }
        Err(e) => {
            tracing::error!("Failed to resolve launch intent for {}: {:#}", record.package_id(), e);
            return LaunchOutcome::NotFound;
        }
    };

    match platform.start_intent(&intent) {
        Ok(()) => {
            tracing::info!(
                "Started {}",
                intent.component().unwrap_or(intent.package_id())
            );
            LaunchOutcome::Started
        }
        Err(e) => {
            tracing::error!("Failed to start {}: {:#}", record.package_id(), e);
            LaunchOutcome::NotFound
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake_platform::FakePlatform;
    use crate::models::AppIcon;

    #[test]
    fn test_unresolvable_package_is_not_started() {
        let platform = FakePlatform::default();
        let record = AppRecord::new("Gone", "org.example.gone", AppIcon::default());

        assert_eq!(launch(&platform, &record), LaunchOutcome::NotFound);
        assert!(platform.started.borrow().is_empty());
    }

    #[test]
    fn test_resolved_intent_is_started_once() {
        let mut platform = FakePlatform::default();
        platform.launchable.insert(
            "org.example.mail".to_string(),
            "org.example.mail/.Inbox".to_string(),
        );
        let record = AppRecord::new("Mail", "org.example.mail", AppIcon::default());

        assert_eq!(launch(&platform, &record), LaunchOutcome::Started);
        assert_eq!(*platform.started.borrow(), vec!["org.example.mail/.Inbox".to_string()]);
    }

    fn mail_platform() -> FakePlatform {
        let mut platform = FakePlatform::default();
        platform.launchable.insert(
            "org.example.mail".to_string(),
            "org.example.mail/.Inbox".to_string(),
        );
        platform
    }

    #[test]
    fn test_resolve_error_counts_as_not_found() {
        let mut platform = mail_platform();
        platform.fail_resolve = true;
        let record = AppRecord::new("Mail", "org.example.mail", AppIcon::default());

        assert_eq!(launch(&platform, &record), LaunchOutcome::NotFound);
        assert!(platform.started.borrow().is_empty());
    }

    #[test]
    fn test_start_error_counts_as_not_found() {
        let mut platform = mail_platform();
        platform.fail_start = true;
        let record = AppRecord::new("Mail", "org.example.mail", AppIcon::default());

        assert_eq!(launch(&platform, &record), LaunchOutcome::NotFound);
        assert!(platform.started.borrow().is_empty());
    }
}
