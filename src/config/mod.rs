//! Configuration module

mod site;

pub use site::ApiConfig;
pub use site::RelatedConfig;
pub use site::SearchConfig;
pub use site::SiteConfig;
