use std::time::Duration;

#[derive(Debug, Clone)]
pub struct UiOptions {
    pub tick_rate: Duration,
    pub show_help: bool,
    /// Show the aggregate error list under the settings form. Field errors
    /// are always shown inline.
    pub show_error_list: bool,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(250),
            show_help: true,
            show_error_list: false,
        }
    }
}

impl UiOptions {
    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn with_help(mut self, show: bool) -> Self {
        self.show_help = show;
        self
    }

    pub fn with_error_list(mut self, show: bool) -> Self {
        self.show_error_list = show;
        self
    }
}
