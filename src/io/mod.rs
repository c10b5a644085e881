mod format;
mod input;
mod output;

pub use format::DocumentFormat;
pub use input::{
    WidgetDocument, load_document, load_widget_document, parse_document_str,
    parse_widget_document, settings_from_value,
};
pub use output::{OutputDestination, OutputOptions, emit};
