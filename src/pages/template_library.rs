use std::collections::BTreeSet;

use chrono::NaiveTime;
use uuid::Uuid;

use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::models::{ShiftTemplate, ShiftTemplateInput, ShiftType};
use crate::pages::{DialogMode, PageAlerts, TableView, non_blank, require};
use crate::services::TemplateService;

/// Client-side filters over the fetched template list; every active filter must match
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateFilters {
    pub search: String,
    pub shift_type: Option<ShiftType>,
    pub category: Option<String>,
    pub favorites_only: bool,
    pub active_only: bool,
}

impl TemplateFilters {
    pub fn matches(&self, template: &ShiftTemplate) -> bool {
        let needle = self.search.trim().to_lowercase();
        let search_ok = needle.is_empty()
            || template.name.to_lowercase().contains(&needle)
            || template
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
            || template
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle));

        let type_ok = self.shift_type.is_none_or(|t| template.shift_type == t);
        let category_ok = self
            .category
            .as_deref()
            .is_none_or(|c| template.category.as_deref() == Some(c));
        let favorite_ok = !self.favorites_only || template.is_favorite;
        let active_ok = !self.active_only || template.is_active;

        search_ok && type_ok && category_ok && favorite_ok && active_ok
    }

    pub fn is_active(&self) -> bool {
        *self != TemplateFilters::default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateForm {
    pub name: String,
    pub description: String,
    pub shift_type: Option<ShiftType>,
    pub category: String,
    pub duration_minutes: String,
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`
    pub end_time: String,
    /// Comma separated
    pub tags: String,
    pub is_active: bool,
}

impl Default for TemplateForm {
    fn default() -> Self {
        TemplateForm {
            name: String::new(),
            description: String::new(),
            shift_type: None,
            category: String::new(),
            duration_minutes: String::new(),
            start_time: String::new(),
            end_time: String::new(),
            tags: String::new(),
            is_active: true,
        }
    }
}

impl TemplateForm {
    fn from_template(template: &ShiftTemplate) -> Self {
        TemplateForm {
            name: template.name.clone(),
            description: template.description.clone().unwrap_or_default(),
            shift_type: Some(template.shift_type),
            category: template.category.clone().unwrap_or_default(),
            duration_minutes: template.duration_minutes.to_string(),
            start_time: template.default_start_time.format("%H:%M").to_string(),
            end_time: template.default_end_time.format("%H:%M").to_string(),
            tags: template.tags.join(", "),
            is_active: template.is_active,
        }
    }

    pub fn validate(&self) -> ClientResult<ShiftTemplateInput> {
        let name = require(&self.name, "Template name")?;
        let shift_type = self
            .shift_type
            .ok_or_else(|| ClientError::validation("Shift type is required"))?;
        let default_start_time = parse_time(&self.start_time, "Start time")?;
        let default_end_time = parse_time(&self.end_time, "End time")?;
        let duration_minutes = require(&self.duration_minutes, "Duration")?
            .parse::<u32>()
            .ok()
            .filter(|minutes| *minutes > 0)
            .ok_or_else(|| {
                ClientError::validation("Duration must be a positive number of minutes")
            })?;

        Ok(ShiftTemplateInput {
            name,
            description: non_blank(&self.description),
            shift_type,
            category: non_blank(&self.category),
            duration_minutes,
            default_start_time,
            default_end_time,
            tags: parse_tags(&self.tags),
            is_active: self.is_active,
        })
    }
}

fn parse_time(value: &str, field: &str) -> ClientResult<NaiveTime> {
    let value = require(value, field)?;
    NaiveTime::parse_from_str(&value, "%H:%M")
        .map_err(|_| ClientError::validation(format!("{} must be in HH:MM format", field)))
}

fn parse_tags(value: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    value
        .split(',')
        .filter_map(non_blank)
        .filter(|tag| seen.insert(tag.to_lowercase()))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditorDialog {
    pub mode: DialogMode,
    pub form: TemplateForm,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CloneDialog {
    pub source_id: Uuid,
    pub name: String,
}

/// Reusable shift templates with client-side filtering
pub struct ShiftTemplateLibraryPage {
    service: TemplateService,
    pub templates: Vec<ShiftTemplate>,
    pub filters: TemplateFilters,
    pub loading: bool,
    pub submitting: bool,
    pub alerts: PageAlerts,
    pub editor: Option<EditorDialog>,
    pub delete_confirm: Option<Uuid>,
    pub clone_dialog: Option<CloneDialog>,
}

impl ShiftTemplateLibraryPage {
    pub fn new(client: ApiClient) -> Self {
        Self {
            service: TemplateService::new(client),
            templates: Vec::new(),
            filters: TemplateFilters::default(),
            loading: false,
            submitting: false,
            alerts: PageAlerts::default(),
            editor: None,
            delete_confirm: None,
            clone_dialog: None,
        }
    }

    pub async fn load(&mut self) {
        self.loading = true;
        let result = self.service.list().await;
        self.loading = false;

        match result {
            Ok(templates) => {
                self.templates = templates;
                self.alerts.dismiss_error();
            }
            Err(err) => self.alerts.fail("Failed to load shift templates", &err),
        }
    }

    /// Templates passing every active filter, in server order
    pub fn visible(&self) -> Vec<&ShiftTemplate> {
        self.templates
            .iter()
            .filter(|t| self.filters.matches(t))
            .collect()
    }

    pub fn rows(&self) -> TableView<ShiftTemplate> {
        let empty = if self.filters.is_active() {
            "No templates match the current filters"
        } else {
            "No shift templates yet"
        };
        let rows = self.visible().into_iter().cloned().collect();
        TableView::from_rows(self.loading, rows, empty)
    }

    /// Distinct categories present in the fetched list, for the filter menu
    pub fn categories(&self) -> Vec<String> {
        self.templates
            .iter()
            .filter_map(|t| t.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn clear_filters(&mut self) {
        self.filters = TemplateFilters::default();
    }

    // Editor

    pub fn open_create(&mut self) {
        self.editor = Some(EditorDialog {
            mode: DialogMode::Create,
            form: TemplateForm::default(),
        });
    }

    pub fn open_edit(&mut self, template_id: Uuid) {
        self.editor = self
            .templates
            .iter()
            .find(|t| t.id == template_id)
            .map(|template| EditorDialog {
                mode: DialogMode::Edit(template.id),
                form: TemplateForm::from_template(template),
            });
    }

    pub fn form_mut(&mut self) -> Option<&mut TemplateForm> {
        self.editor.as_mut().map(|e| &mut e.form)
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    pub async fn save(&mut self) -> ClientResult<()> {
        let Some(editor) = self.editor.clone() else {
            return Ok(());
        };
        let input = match editor.form.validate() {
            Ok(input) => input,
            Err(err) => {
                self.alerts.fail("Template form invalid", &err);
                return Err(err);
            }
        };

        self.submitting = true;
        let result = match editor.mode {
            DialogMode::Create => self.service.create(&input).await,
            DialogMode::Edit(id) => self.service.update(id, &input).await,
        };
        self.submitting = false;

        match result {
            Ok(template) => {
                self.editor = None;
                self.alerts
                    .succeed(format!("Template {} saved", template.name));
                self.load().await;
                Ok(())
            }
            Err(err) => {
                self.alerts.fail("Failed to save template", &err);
                Err(err)
            }
        }
    }

    // Delete

    pub fn request_delete(&mut self, template_id: Uuid) {
        self.delete_confirm = Some(template_id);
    }

    pub fn cancel_delete(&mut self) {
        self.delete_confirm = None;
    }

    pub async fn confirm_delete(&mut self) -> ClientResult<()> {
        let Some(template_id) = self.delete_confirm else {
            return Ok(());
        };

        match self.service.delete(template_id).await {
            Ok(()) => {
                self.delete_confirm = None;
                self.alerts.succeed("Template deleted");
                self.load().await;
                Ok(())
            }
            Err(err) => {
                self.alerts.fail("Failed to delete template", &err);
                Err(err)
            }
        }
    }

    // Clone

    pub fn open_clone(&mut self, template_id: Uuid) {
        self.clone_dialog = self
            .templates
            .iter()
            .find(|t| t.id == template_id)
            .map(|template| CloneDialog {
                source_id: template.id,
                name: format!("{} (Copy)", template.name),
            });
    }

    pub fn set_clone_name(&mut self, name: impl Into<String>) {
        if let Some(dialog) = self.clone_dialog.as_mut() {
            dialog.name = name.into();
        }
    }

    pub fn close_clone(&mut self) {
        self.clone_dialog = None;
    }

    pub async fn confirm_clone(&mut self) -> ClientResult<()> {
        let Some(dialog) = self.clone_dialog.clone() else {
            return Ok(());
        };
        let name = match require(&dialog.name, "Template name") {
            Ok(name) => name,
            Err(err) => {
                self.alerts.fail("Clone form invalid", &err);
                return Err(err);
            }
        };

        match self.service.clone_template(dialog.source_id, name).await {
            Ok(template) => {
                self.clone_dialog = None;
                self.alerts
                    .succeed(format!("Template {} created", template.name));
                self.load().await;
                Ok(())
            }
            Err(err) => {
                self.alerts.fail("Failed to clone template", &err);
                Err(err)
            }
        }
    }

    /// Favorite state shown afterwards comes from the re-fetch, not a local flip
    pub async fn toggle_favorite(&mut self, template_id: Uuid) -> ClientResult<()> {
        match self.service.toggle_favorite(template_id).await {
            Ok(_) => {
                self.load().await;
                Ok(())
            }
            Err(err) => {
                self.alerts.fail("Failed to update favorite", &err);
                Err(err)
            }
        }
    }
}
