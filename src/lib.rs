// Crate root library declaration and module exports.
pub mod cli;
pub mod config;
pub mod contact;
pub mod context;
pub mod controller;
pub mod filter_state;
pub mod logging;
pub mod model;
pub mod preferences;
pub mod scroll;
pub mod storage;
