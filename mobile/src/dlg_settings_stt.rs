use crate::Settings;

#[derive(Debug, Default)]
pub struct DlgSettings {
    pub open: bool,
    // Edited copy, applied only on Save
    pub draft: Settings,
}
