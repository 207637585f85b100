// Library surface for the binary and for headless/integration tests.
pub mod app_dirs;
pub mod config;
pub mod controller;
pub mod duration;
pub mod hooks;
pub mod input;
pub mod logging;
pub mod mode;
pub mod runtime;
pub mod timer;
