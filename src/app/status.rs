#[derive(Debug, Clone)]
pub struct StatusLine {
    message: String,
}

pub const READY_STATUS: &str = "Ready.";

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            message: READY_STATUS.to_string(),
        }
    }
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_raw(&mut self, msg: impl Into<String>) {
        self.message = msg.into();
    }

    pub fn ready(&mut self) {
        self.message = READY_STATUS.to_string();
    }

    pub fn editing(&mut self, label: &str) {
        self.message = format!("Editing {label}");
    }

    pub fn dialog_opened(&mut self) {
        self.message = "Editing widget settings".to_string();
    }

    pub fn dialog_dismissed(&mut self) {
        self.message = "Settings dialog closed without saving".to_string();
    }

    pub fn settings_saved(&mut self) {
        self.message = "Settings saved".to_string();
    }

    pub fn issues_remaining(&mut self, count: usize) {
        self.message = format!("{count} issue(s) remaining");
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
