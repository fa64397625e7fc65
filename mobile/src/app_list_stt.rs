use crate::models::AppRecord;
use eframe::egui;
use std::collections::HashMap;

pub const ICON_SIZE: f32 = 40.0;
pub const ROW_PADDING: f32 = 12.0;

/// What the user did to a row this frame. Indices refer to `AppList::get`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowEvent {
    Launch(usize),
    OpenMenu(usize),
}

pub struct AppList {
    pub records: Vec<AppRecord>,
    pub text_filter: String,
    pub show_package_id: bool,
    /// package id -> decoded icon, `None` when decoding failed
    pub icon_textures: HashMap<String, Option<egui::TextureHandle>>,
}

impl Default for AppList {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            text_filter: String::new(),
            show_package_id: true,
            icon_textures: HashMap::new(),
        }
    }
}
