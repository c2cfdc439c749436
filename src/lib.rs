pub mod assessment;
pub mod config;
pub mod output;
pub mod prompt;
pub mod stderr_buffer;
pub mod tui;
