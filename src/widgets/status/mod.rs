pub mod progress_bar;
pub mod status;

pub use progress_bar::ProgressBar;
pub use status::{render_failure, render_loading, StatusBar};
