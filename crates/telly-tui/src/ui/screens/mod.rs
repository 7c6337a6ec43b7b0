//! Screen implementations

pub mod favorites;
pub mod home;
pub mod loading;
pub mod pin_entry;
