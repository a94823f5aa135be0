pub mod app;
pub mod cookie_banner;
pub mod dev_popup;
pub mod project_modal;

pub use app::App;
