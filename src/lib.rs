pub mod commands;
pub mod domain;
pub mod pyload;
pub mod runtime;
