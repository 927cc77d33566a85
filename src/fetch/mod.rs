mod error;
mod fetcher;

pub use error::FetchError;
pub use fetcher::SourceFetcher;
