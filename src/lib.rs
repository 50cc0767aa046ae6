pub mod chat;
pub mod cli;
pub mod config;
pub mod console;
pub mod logging;
pub mod mvi;
pub mod storage;
pub mod store;
