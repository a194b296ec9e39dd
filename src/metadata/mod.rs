pub mod model;
pub mod omdb;
pub mod recommend;
pub mod releases;
pub mod resolver;
pub mod source;
pub mod tmdb;

#[cfg(test)]
pub(crate) mod fake;

pub use model::*;
pub use omdb::OmdbClient;
pub use recommend::RecommendationGatherer;
pub use releases::ReleaseFeed;
pub use resolver::MovieResolver;
pub use source::*;
pub use tmdb::TmdbClient;
