//! Helper functions shared by views and templates

mod date;

pub use date::*;
