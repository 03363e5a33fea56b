//! Configuration module

mod site;

pub use site::FeedSource;
pub use site::JobFeedConfig;
pub use site::SiteConfig;
pub use site::VideoFeedConfig;
