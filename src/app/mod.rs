mod input;
mod options;
mod overlay_ui;
mod runtime;
mod status;
mod terminal;

pub use options::UiOptions;
pub use overlay_ui::WidgetOverlayUi;
pub use runtime::OverlayOutcome;
