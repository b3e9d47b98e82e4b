//! Page components for the application.

pub mod login;
pub mod main_app;
pub mod register;

pub use login::Login;
pub use main_app::MainApp;
pub use register::Register;
