pub mod app;
pub mod interactive;
pub mod logging;
pub mod state;
