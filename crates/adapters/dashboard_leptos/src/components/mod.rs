mod command_bar;
mod console_log;
mod login_form;
mod map_view;
mod status_panel;

pub use command_bar::CommandBar;
pub use console_log::ConsoleLog;
pub use login_form::LoginForm;
pub use map_view::{MapToggle, MapView};
pub use status_panel::StatusPanel;
