use crate::domain::{Settings, WidgetId};

/// Callbacks supplied by the container that owns the widget.
pub trait OverlayHandler {
    fn handle_remove(&mut self, id: &WidgetId);
    fn handle_settings_save(&mut self, id: &WidgetId, settings: Settings);
}

/// `OverlayHandler` backed by two closures.
pub struct Callbacks<R, S>
where
    R: FnMut(&WidgetId),
    S: FnMut(&WidgetId, Settings),
{
    on_remove: R,
    on_save: S,
}

impl<R, S> Callbacks<R, S>
where
    R: FnMut(&WidgetId),
    S: FnMut(&WidgetId, Settings),
{
    pub fn new(on_remove: R, on_save: S) -> Self {
        Self { on_remove, on_save }
    }
}

impl<R, S> OverlayHandler for Callbacks<R, S>
where
    R: FnMut(&WidgetId),
    S: FnMut(&WidgetId, Settings),
{
    fn handle_remove(&mut self, id: &WidgetId) {
        (self.on_remove)(id)
    }

    fn handle_settings_save(&mut self, id: &WidgetId, settings: Settings) {
        (self.on_save)(id, settings)
    }
}
