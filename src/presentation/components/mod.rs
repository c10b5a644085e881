mod dialog;
mod footer;
mod layout;
mod overlay;

pub use dialog::render_settings_dialog;
pub use footer::render_footer;
pub use overlay::render_overlay;
