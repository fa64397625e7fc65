pub use crate::app_list_stt::*;
use crate::models::AppRecord;
use eframe::egui;
use egui_i18n::tr;
use std::collections::HashMap;

impl AppList {
    pub fn new(records: Vec<AppRecord>) -> Self {
        let mut list = Self::default();
        list.set_records(records);
        list
    }

    /// Replaces the contents. `records` must already be sorted by name.
    pub fn set_records(&mut self, records: Vec<AppRecord>) {
        self.records = records;
        self.icon_textures.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&AppRecord> {
        self.records.get(index)
    }

    pub fn position_of(&self, package_id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.package_id() == package_id)
    }

    /// Indices of records passing the text filter, in list order.
    pub fn visible_indices(&self) -> Vec<usize> {
        let needle = self.text_filter.trim().to_lowercase();
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.matches(&needle))
            .map(|(i, _)| i)
            .collect()
    }

    fn load_texture_from_bytes(
        textures: &mut HashMap<String, Option<egui::TextureHandle>>,
        ctx: &egui::Context,
        record: &AppRecord,
    ) -> Option<egui::TextureId> {
        let package_id = record.package_id();
        if let Some(cached) = textures.get(package_id) {
            return cached.as_ref().map(|t| t.id());
        }

        let texture = if record.icon().is_empty() {
            None
        } else {
            match image::load_from_memory(record.icon().png_bytes()) {
                Ok(image) => {
                    let size = [image.width() as _, image.height() as _];
                    let image_buffer = image.to_rgba8();
                    let pixels = image_buffer.as_flat_samples();
                    let color_image =
                        egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice());
                    Some(ctx.load_texture(
                        format!("icon_{}", package_id),
                        color_image,
                        Default::default(),
                    ))
                }
                Err(e) => {
                    log::warn!("Failed to load icon for {}: {}", package_id, e);
                    None
                }
            }
        };

        let id = texture.as_ref().map(|t| t.id());
        textures.insert(package_id.to_string(), texture);
        id
    }

    fn placeholder_icon(ui: &mut egui::Ui, record: &AppRecord) {
        let (rect, _) = ui.allocate_exact_size(egui::vec2(ICON_SIZE, ICON_SIZE), egui::Sense::hover());
        let visuals = ui.visuals();
        ui.painter()
            .rect_filled(rect, ICON_SIZE / 4.0, visuals.widgets.inactive.bg_fill);
        let initial: String = record
            .name()
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default();
        ui.painter().text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            initial,
            egui::FontId::proportional(ICON_SIZE / 2.0),
            visuals.text_color(),
        );
    }

    /// Renders the visible rows. Only rows inside the viewport are laid out.
    pub fn ui(&mut self, ui: &mut egui::Ui) -> Option<RowEvent> {
        if self.records.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(tr!("no-launchable-apps"));
            });
            return None;
        }

        let visible = self.visible_indices();
        if visible.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(tr!("no-matching-apps"));
            });
            return None;
        }

        let mut event = None;
        let row_height = ICON_SIZE + ROW_PADDING;
        let records = &self.records;
        let textures = &mut self.icon_textures;
        let show_package_id = self.show_package_id;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show_rows(ui, row_height, visible.len(), |ui, row_range| {
                for &index in &visible[row_range] {
                    let record = &records[index];
                    let response = ui
                        .horizontal(|ui| {
                            ui.set_min_height(row_height);
                            match Self::load_texture_from_bytes(textures, ui.ctx(), record) {
                                Some(tex_id) => {
                                    ui.image((tex_id, egui::vec2(ICON_SIZE, ICON_SIZE)));
                                }
                                None => Self::placeholder_icon(ui, record),
                            }
                            ui.vertical(|ui| {
                                ui.label(egui::RichText::new(record.name()).strong());
                                if show_package_id {
                                    ui.label(egui::RichText::new(record.package_id()).small().weak());
                                }
                            });
                            ui.allocate_space(egui::vec2(ui.available_width(), 0.0));
                        })
                        .response
                        .interact(egui::Sense::click());

                    if response.long_touched() || response.secondary_clicked() {
                        event = Some(RowEvent::OpenMenu(index));
                    } else if response.clicked() {
                        event = Some(RowEvent::Launch(index));
                    }
                }
            });

        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppIcon;

    fn record(name: &str, package_id: &str) -> AppRecord {
        AppRecord::new(name, package_id, AppIcon::default())
    }

    fn sample_list() -> AppList {
        AppList::new(vec![
            record("Calculator", "org.example.calc"),
            record("Camera", "org.example.camera"),
            record("Mail", "org.example.mail"),
        ])
    }

    #[test]
    fn test_count_and_indexed_access() {
        let list = sample_list();
        assert_eq!(list.len(), 3);
        assert!(!list.is_empty());
        assert_eq!(list.get(1).map(|r| r.name()), Some("Camera"));
        assert!(list.get(3).is_none());
        assert_eq!(list.position_of("org.example.mail"), Some(2));
    }

    #[test]
    fn test_filter_keeps_list_indices() {
        let mut list = sample_list();
        list.text_filter = "CA".to_string();
        assert_eq!(list.visible_indices(), vec![0, 1]);

        list.text_filter = "mail".to_string();
        assert_eq!(list.visible_indices(), vec![2]);

        list.text_filter = "   ".to_string();
        assert_eq!(list.visible_indices(), vec![0, 1, 2]);
    }

    #[test]
    fn test_set_records_replaces_contents() {
        let mut list = sample_list();
        list.icon_textures.insert("org.example.calc".to_string(), None);

        list.set_records(vec![record("Notes", "org.example.notes")]);
        assert_eq!(list.len(), 1);
        assert!(list.icon_textures.is_empty());
    }
}
