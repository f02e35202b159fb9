pub mod commands;
pub mod llm;
pub mod logging;
pub mod palette;
pub mod song;
pub mod utils;
