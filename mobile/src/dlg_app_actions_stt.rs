/// Entries of the long-press menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    AppInfo,
    ShareApk,
}

pub const APP_ACTIONS: [AppAction; 2] = [AppAction::AppInfo, AppAction::ShareApk];

/// Record the menu was opened for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTarget {
    pub index: usize,
    pub name: String,
    pub package_id: String,
}

#[derive(Debug, Default)]
pub struct DlgAppActions {
    pub open: bool,
    pub target: Option<ActionTarget>,
}
