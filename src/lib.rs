// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod judgment;
pub mod lives;
pub mod quiz;
pub mod runtime;
pub mod session;
pub mod starfield;
pub mod ui;
pub mod word_bank;
