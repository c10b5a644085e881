mod error;
mod field;
mod state;
mod submission;

pub use error::{FieldCoercionError, FormError};
pub use field::{FieldState, FieldValue};
pub use state::FormState;
pub use submission::{FormSubmission, SettingsForm};
