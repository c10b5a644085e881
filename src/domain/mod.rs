mod parser;
mod schema;
mod widget;

pub use parser::parse_form_schema;
pub use schema::{FieldKind, FieldSchema, FormSchema};
pub use widget::{Settings, Widget, WidgetId};
