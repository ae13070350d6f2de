//! Configuration module

mod site;

pub use site::MergeStrategy;
pub use site::SiteConfig;
