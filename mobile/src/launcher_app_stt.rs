use crate::app_list::AppList;
use crate::dlg_app_actions::DlgAppActions;
use crate::dlg_settings::DlgSettings;
use crate::launcher_platform::LauncherPlatform;
use crate::notice::Notices;
use crate::Config;
use crate::Settings;

#[doc(hidden)]
pub struct LauncherApp {
    pub platform: Box<dyn LauncherPlatform>,
    pub config: Option<Config>,
    pub settings: Settings,
    pub app_list: AppList,
    pub action_menu: DlgAppActions,
    pub settings_dialog: DlgSettings,
    pub notices: Notices,
    /// Set when the last enumeration failed, shown instead of the list.
    pub load_error: Option<String>,
    pub first_update_done: bool,
    pub was_focused: bool,
}
