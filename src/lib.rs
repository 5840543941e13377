pub mod cli;
pub mod error;
pub mod rename_engine;
pub mod title_editor;
