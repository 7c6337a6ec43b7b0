//! Telly TUI Library
//!
//! Terminal presentation layer for the Telly session guard: a loading view
//! while the stored lock state is read, a PIN keypad while locked, and the
//! content views once unlocked.

pub mod app;
pub mod ui;

pub use app::App;
