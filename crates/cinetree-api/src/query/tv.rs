//! `TvFilter` - paged TV series listings.

use tracing::instrument;

use super::{ResultPage, build_url, fetch_page};
use crate::endpoints::{
    METHOD_TV, OBJECT_AIRING_TODAY, OBJECT_ON_THE_AIR, OBJECT_POPULAR, OBJECT_TOP_RATED,
};
use crate::error::Result;
use crate::session::Session;
use crate::views::TvSummary;

/// TV listing queries bound to one session.
///
/// `language` is sent only when non-empty and `page` only when positive.
#[derive(Debug, Clone, Copy)]
pub struct TvFilter<'a> {
    session: &'a Session,
}

impl<'a> TvFilter<'a> {
    pub(crate) const fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Lists popular series (`tv/popular`).
    ///
    /// # Errors
    ///
    /// Fails if the request fails or the body is not a valid listing.
    pub fn popular(&self, language: &str, page: i32) -> Result<ResultPage<TvSummary>> {
        self.list(OBJECT_POPULAR, language, page)
    }

    /// Lists top rated series (`tv/top_rated`).
    ///
    /// # Errors
    ///
    /// Fails if the request fails or the body is not a valid listing.
    pub fn top_rated(&self, language: &str, page: i32) -> Result<ResultPage<TvSummary>> {
        self.list(OBJECT_TOP_RATED, language, page)
    }

    /// Lists series with an episode airing today (`tv/airing_today`).
    ///
    /// # Errors
    ///
    /// Fails if the request fails or the body is not a valid listing.
    pub fn airing_today(&self, language: &str, page: i32) -> Result<ResultPage<TvSummary>> {
        self.list(OBJECT_AIRING_TODAY, language, page)
    }

    /// Lists series airing within the next seven days (`tv/on_the_air`).
    ///
    /// # Errors
    ///
    /// Fails if the request fails or the body is not a valid listing.
    pub fn on_the_air(&self, language: &str, page: i32) -> Result<ResultPage<TvSummary>> {
        self.list(OBJECT_ON_THE_AIR, language, page)
    }

    #[instrument(skip(self))]
    fn list(&self, object: &str, language: &str, page: i32) -> Result<ResultPage<TvSummary>> {
        let url = build_url(self.session, &[METHOD_TV, object], language, page)?;
        fetch_page(self.session, &url)
    }
}
