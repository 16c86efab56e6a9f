// Public modules
pub mod config;
pub mod fallback;
pub mod fetcher;
pub mod io;
pub mod models;
pub mod normalize;
pub mod reddit;
pub mod slang;

// Re-export commonly used types
pub use config::Config;
pub use fetcher::FeedFetcher;
pub use io::{save_feed, save_slang, save_slang_terms, save_summary};
pub use models::{Comment, DataSource, FeedData, FetchResult, Post, PostType, SlangData, SlangEntry};
pub use reddit::{JsonSource, RedditClient};
pub use slang::SlangDownloader;
