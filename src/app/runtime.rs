use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    domain::{Settings, WidgetId},
    overlay::{
        DispatchOutcome, OverlayControl, OverlayEvent, OverlayHandler, SubmitOutcome,
        WidgetSettingsOverlay,
    },
    presentation::{self, UiContext},
};

use super::{
    input::{InputContext, KeyCommand, classify, help_text},
    options::UiOptions,
    status::StatusLine,
    terminal::OverlayTerminal,
};

/// Result of an interactive session for one widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayOutcome {
    pub id: WidgetId,
    pub removed: bool,
    pub saved: bool,
    /// Settings after the session; the last saved value when `saved` is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
}

/// The runtime's stand-in for the dashboard that owns the widget.
#[derive(Debug, Default)]
struct ParentState {
    settings: Option<Settings>,
    saved: bool,
    removed: bool,
}

impl OverlayHandler for ParentState {
    fn handle_remove(&mut self, id: &WidgetId) {
        info!(widget = %id, "widget removed");
        self.removed = true;
    }

    fn handle_settings_save(&mut self, id: &WidgetId, settings: Settings) {
        info!(widget = %id, keys = settings.len(), "widget settings stored");
        self.settings = Some(settings);
        self.saved = true;
    }
}

pub(crate) struct App {
    overlay: WidgetSettingsOverlay,
    parent: ParentState,
    options: UiOptions,
    status: StatusLine,
    focus: usize,
    should_quit: bool,
}

impl App {
    pub fn new(overlay: WidgetSettingsOverlay, options: UiOptions) -> Self {
        let parent = ParentState {
            settings: overlay.settings().cloned(),
            ..ParentState::default()
        };
        Self {
            overlay,
            parent,
            options,
            status: StatusLine::new(),
            focus: 0,
            should_quit: false,
        }
    }

    pub fn run(mut self) -> Result<OverlayOutcome> {
        let mut terminal = OverlayTerminal::enter()?;
        while !self.should_quit {
            terminal.render(|frame| self.draw(frame))?;
            if !event::poll(self.options.tick_rate)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                Event::Resize(width, height) => {
                    terminal.resize(width, height)?;
                }
                _ => {}
            }
        }
        drop(terminal);
        Ok(self.into_outcome())
    }

    fn into_outcome(self) -> OverlayOutcome {
        OverlayOutcome {
            id: self.overlay.id().clone(),
            settings: self.parent.settings,
            saved: self.parent.saved,
            removed: self.parent.removed,
        }
    }

    fn context(&self) -> InputContext {
        if self.overlay.dialog().is_open() {
            InputContext::Dialog
        } else {
            InputContext::Overlay
        }
    }

    fn focused_control(&self) -> Option<OverlayControl> {
        let controls = self.overlay.controls();
        controls.get(self.focus.min(controls.len() - 1)).copied()
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let help = self
            .options
            .show_help
            .then(|| help_text(self.context(), self.overlay.widget().has_settings()));
        let ctx = UiContext {
            focus: self.focused_control(),
            status_message: self.status.message(),
            help,
            show_error_list: self.options.show_error_list,
        };
        presentation::draw(frame, &mut self.overlay, ctx);
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) {
        match classify(&key, self.context()) {
            KeyCommand::Quit => self.should_quit = true,
            KeyCommand::FocusControl(delta) => {
                let len = self.overlay.controls().len() as i32;
                let next = (self.focus as i32 + delta).rem_euclid(len);
                self.focus = next as usize;
                self.status.ready();
            }
            KeyCommand::Activate => {
                if let Some(control) = self.focused_control() {
                    self.dispatch(OverlayEvent::Activate(control));
                }
            }
            KeyCommand::OpenSettings => {
                self.dispatch(OverlayEvent::Activate(OverlayControl::EditSettings))
            }
            KeyCommand::Delete => self.dispatch(OverlayEvent::Activate(OverlayControl::Delete)),
            KeyCommand::Submit => self.dispatch(OverlayEvent::SubmitForm),
            KeyCommand::Dismiss => self.dispatch(OverlayEvent::DismissDialog),
            KeyCommand::NextField => {
                if let Some(form) = self.overlay.form_mut() {
                    form.state_mut().focus_next_field();
                }
            }
            KeyCommand::PrevField => {
                if let Some(form) = self.overlay.form_mut() {
                    form.state_mut().focus_prev_field();
                }
            }
            KeyCommand::Edit(event) => {
                if let Some(form) = self.overlay.form_mut()
                    && form.handle_key(&event)
                {
                    let label = form
                        .state()
                        .focused_field()
                        .map(|field| field.schema.display_label())
                        .unwrap_or_default();
                    self.status.editing(&label);
                }
            }
            KeyCommand::None => {}
        }
    }

    fn dispatch(&mut self, event: OverlayEvent) {
        match self.overlay.dispatch(event, &mut self.parent) {
            Ok(DispatchOutcome::Opened) => self.status.dialog_opened(),
            Ok(DispatchOutcome::Dismissed) => self.status.dialog_dismissed(),
            Ok(DispatchOutcome::Removed) => self.should_quit = true,
            Ok(DispatchOutcome::Submitted(SubmitOutcome::Saved)) => {
                self.overlay.set_settings(self.parent.settings.clone());
                self.status.settings_saved();
            }
            Ok(DispatchOutcome::Submitted(SubmitOutcome::Rejected { errors })) => {
                self.status.issues_remaining(errors)
            }
            Ok(DispatchOutcome::Submitted(SubmitOutcome::Ignored))
            | Ok(DispatchOutcome::Unchanged) => {}
            Err(err) => {
                warn!(error = %err, "overlay action failed");
                self.status.set_raw(format!("{err:#}"));
            }
        }
    }
}
