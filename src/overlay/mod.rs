mod component;
mod dialog;
mod handler;

pub use component::{DispatchOutcome, OverlayEvent, SubmitOutcome, WidgetSettingsOverlay};
pub use dialog::{DialogState, OverlayControl};
pub use handler::{Callbacks, OverlayHandler};
