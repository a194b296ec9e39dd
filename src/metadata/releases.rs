use chrono::{Duration, NaiveDate, Utc};
use std::sync::Arc;
use tracing::debug;

use super::model::*;
use super::source::{DiscoverQuery, TmdbApi};

pub const DEFAULT_RELEASE_LIMIT: usize = 5;
pub const RELEASE_WINDOW_DAYS: i64 = 30;

/// Recent horror releases from TMDb's discover listing.
pub struct ReleaseFeed {
    tmdb: Arc<dyn TmdbApi>,
}

impl ReleaseFeed {
    pub fn new(tmdb: Arc<dyn TmdbApi>) -> Self {
        Self { tmdb }
    }

    pub async fn recent(&self, limit: usize) -> MetaResult<Vec<ReleaseEntry>> {
        self.recent_as_of(Utc::now().date_naive(), limit).await
    }

    /// Releases dated within the `RELEASE_WINDOW_DAYS` days up to and
    /// including `today`, newest first.
    pub async fn recent_as_of(&self, today: NaiveDate, limit: usize) -> MetaResult<Vec<ReleaseEntry>> {
        let from = today - Duration::days(RELEASE_WINDOW_DAYS);
        let movies = self
            .tmdb
            .discover(&DiscoverQuery::horror_released_between(from, today))
            .await?;

        let total = movies.len();
        let releases: Vec<ReleaseEntry> = movies
            .into_iter()
            .filter_map(|m| {
                let date = m.release_date.as_deref()?;
                let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
                if parsed < from || parsed > today {
                    return None;
                }
                Some(ReleaseEntry {
                    title: m.title().to_string(),
                    release_date: date.to_string(),
                    poster: self.tmdb.poster_url(m.poster_path.as_deref()),
                })
            })
            .take(limit)
            .collect();

        debug!(
            from = %from,
            to = %today,
            upstream = total,
            returned = releases.len(),
            "Recent horror releases"
        );
        Ok(releases)
    }
}
