use anyhow::Result;

use crate::{
    domain::{Settings, Widget, WidgetId},
    overlay::WidgetSettingsOverlay,
};

use super::{
    options::UiOptions,
    runtime::{App, OverlayOutcome},
};

/// Interactive terminal session around one widget's overlay.
#[derive(Debug)]
pub struct WidgetOverlayUi {
    id: WidgetId,
    widget: Widget,
    settings: Option<Settings>,
    options: UiOptions,
}

impl WidgetOverlayUi {
    pub fn new(id: impl Into<WidgetId>, widget: Widget) -> Self {
        Self {
            id: id.into(),
            widget,
            settings: None,
            options: UiOptions::default(),
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn with_options(mut self, options: UiOptions) -> Self {
        self.options = options;
        self
    }

    pub fn run(self) -> Result<OverlayOutcome> {
        let WidgetOverlayUi {
            id,
            widget,
            settings,
            options,
        } = self;
        let overlay = WidgetSettingsOverlay::new(id, widget, settings);
        App::new(overlay, options).run()
    }
}
