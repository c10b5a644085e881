use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::{
    domain::{Settings, Widget, WidgetId},
    form::{FormSubmission, SettingsForm},
};

use super::{
    dialog::{DialogState, OverlayControl},
    handler::OverlayHandler,
};

/// User interactions the overlay reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayEvent {
    Activate(OverlayControl),
    DismissDialog,
    /// A submission produced outside the dialog's own form.
    Submit(FormSubmission),
    /// Submit the dialog's own form.
    SubmitForm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved,
    Rejected { errors: usize },
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Opened,
    Dismissed,
    Removed,
    Submitted(SubmitOutcome),
    Unchanged,
}

/// Settings/delete overlay for one dashboard widget.
///
/// The only state owned here is whether the settings dialog is open, plus
/// the live form while it is. Widget metadata and settings belong to the
/// parent and flow back out only through the [`OverlayHandler`].
#[derive(Debug)]
pub struct WidgetSettingsOverlay {
    id: WidgetId,
    widget: Widget,
    settings: Option<Settings>,
    dialog: DialogState,
    form: Option<SettingsForm>,
}

impl WidgetSettingsOverlay {
    pub fn new(id: impl Into<WidgetId>, widget: Widget, settings: Option<Settings>) -> Self {
        Self {
            id: id.into(),
            widget,
            settings,
            dialog: DialogState::Closed,
            form: None,
        }
    }

    pub fn id(&self) -> &WidgetId {
        &self.id
    }

    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    pub fn settings(&self) -> Option<&Settings> {
        self.settings.as_ref()
    }

    /// Parent-side update of the current settings; picked up on the next open.
    pub fn set_settings(&mut self, settings: Option<Settings>) {
        self.settings = settings;
    }

    pub fn dialog(&self) -> DialogState {
        self.dialog
    }

    pub fn form(&self) -> Option<&SettingsForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut SettingsForm> {
        self.form.as_mut()
    }

    /// Visible controls in display order. `EditSettings` only appears when
    /// the widget declares a settings schema; `Delete` always does.
    pub fn controls(&self) -> Vec<OverlayControl> {
        let mut controls = Vec::with_capacity(2);
        if self.widget.has_settings() {
            controls.push(OverlayControl::EditSettings);
        }
        controls.push(OverlayControl::Delete);
        controls
    }

    /// Closed -> Open. Builds a fresh form seeded with the current settings.
    ///
    /// Returns `Ok(false)` when there is nothing to open or it is already open.
    pub fn open_settings(&mut self) -> Result<bool> {
        let Some(schema) = self.widget.settings_schema.as_ref() else {
            return Ok(false);
        };
        if self.dialog.is_open() {
            return Ok(false);
        }
        let form = SettingsForm::new(schema, self.settings.as_ref())
            .with_context(|| format!("cannot open settings for widget {}", self.id))?;
        self.form = Some(form);
        self.dialog = DialogState::Open;
        debug!(widget = %self.id, "settings dialog opened");
        Ok(true)
    }

    /// Open -> Closed without saving.
    pub fn close_dialog(&mut self) -> bool {
        if !self.dialog.is_open() {
            return false;
        }
        self.dialog = DialogState::Closed;
        self.form = None;
        debug!(widget = %self.id, "settings dialog dismissed");
        true
    }

    /// Ask the parent to remove this widget. No confirmation, and the
    /// dialog state is left as it is.
    pub fn remove(&self, handler: &mut impl OverlayHandler) {
        info!(widget = %self.id, "remove requested");
        handler.handle_remove(&self.id);
    }

    /// Save `submission` when it carries no errors, closing the dialog.
    /// With errors the dialog stays open and nothing is saved.
    pub fn submit(
        &mut self,
        submission: FormSubmission,
        handler: &mut impl OverlayHandler,
    ) -> SubmitOutcome {
        if !self.dialog.is_open() {
            return SubmitOutcome::Ignored;
        }
        if !submission.is_valid() {
            debug!(
                widget = %self.id,
                errors = submission.errors.len(),
                "settings rejected"
            );
            return SubmitOutcome::Rejected {
                errors: submission.errors.len(),
            };
        }
        info!(widget = %self.id, "settings saved");
        handler.handle_settings_save(&self.id, submission.form_data);
        self.dialog = DialogState::Closed;
        self.form = None;
        SubmitOutcome::Saved
    }

    /// Submit the dialog's own form.
    pub fn submit_form(&mut self, handler: &mut impl OverlayHandler) -> SubmitOutcome {
        let Some(form) = self.form.as_mut() else {
            return SubmitOutcome::Ignored;
        };
        let submission = form.submit();
        self.submit(submission, handler)
    }

    pub fn dispatch(
        &mut self,
        event: OverlayEvent,
        handler: &mut impl OverlayHandler,
    ) -> Result<DispatchOutcome> {
        let outcome = match event {
            OverlayEvent::Activate(OverlayControl::EditSettings) => {
                if self.open_settings()? {
                    DispatchOutcome::Opened
                } else {
                    DispatchOutcome::Unchanged
                }
            }
            OverlayEvent::Activate(OverlayControl::Delete) => {
                self.remove(handler);
                DispatchOutcome::Removed
            }
            OverlayEvent::DismissDialog => {
                if self.close_dialog() {
                    DispatchOutcome::Dismissed
                } else {
                    DispatchOutcome::Unchanged
                }
            }
            OverlayEvent::Submit(submission) => {
                DispatchOutcome::Submitted(self.submit(submission, handler))
            }
            OverlayEvent::SubmitForm => DispatchOutcome::Submitted(self.submit_form(handler)),
        };
        Ok(outcome)
    }
}
