#![deny(rust_2018_idioms)]

mod app;
mod domain;
mod form;
mod io;
mod overlay;
mod presentation;

pub use app::{OverlayOutcome, UiOptions, WidgetOverlayUi};
pub use domain::{
    FieldKind, FieldSchema, FormSchema, Settings, Widget, WidgetId, parse_form_schema,
};
pub use form::{
    FieldCoercionError, FieldState, FieldValue, FormError, FormState, FormSubmission, SettingsForm,
};
pub use io::{
    DocumentFormat, OutputDestination, OutputOptions, WidgetDocument, emit, load_document,
    load_widget_document, parse_document_str, parse_widget_document, settings_from_value,
};
pub use overlay::{
    Callbacks, DialogState, DispatchOutcome, OverlayControl, OverlayEvent, OverlayHandler,
    SubmitOutcome, WidgetSettingsOverlay,
};

pub mod prelude {
    pub use super::{
        Callbacks, OverlayControl, OverlayEvent, OverlayHandler, Settings, UiOptions, Widget,
        WidgetId, WidgetOverlayUi, WidgetSettingsOverlay,
    };
}
