//! `Search` - free-text search.

use tracing::instrument;

use super::{ResultPage, append_options, fetch_page};
use crate::endpoints::{ARG_QUERY, METHOD_SEARCH, OBJECT_MOVIE, OBJECT_MULTI, OBJECT_TV};
use crate::error::Result;
use crate::session::Session;
use crate::tree::TreeView;
use crate::views::{MediaSummary, TvSummary};

/// Search queries bound to one session.
#[derive(Debug, Clone, Copy)]
pub struct Search<'a> {
    session: &'a Session,
}

impl<'a> Search<'a> {
    pub(crate) const fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Searches movies by title (`search/movie`).
    ///
    /// # Errors
    ///
    /// Fails if the request fails or the body is not a valid listing.
    pub fn movie(&self, query: &str, language: &str, page: i32) -> Result<ResultPage<MediaSummary>> {
        self.run(OBJECT_MOVIE, query, language, page)
    }

    /// Searches TV series by name (`search/tv`).
    ///
    /// # Errors
    ///
    /// Fails if the request fails or the body is not a valid listing.
    pub fn tv(&self, query: &str, language: &str, page: i32) -> Result<ResultPage<TvSummary>> {
        self.run(OBJECT_TV, query, language, page)
    }

    /// Searches movies, series and people at once (`search/multi`).
    ///
    /// Each item carries its `media_type`.
    ///
    /// # Errors
    ///
    /// Fails if the request fails or the body is not a valid listing.
    pub fn multi(&self, query: &str, language: &str, page: i32) -> Result<ResultPage<MediaSummary>> {
        self.run(OBJECT_MULTI, query, language, page)
    }

    #[instrument(skip(self))]
    fn run<T: From<TreeView>>(
        &self,
        object: &str,
        query: &str,
        language: &str,
        page: i32,
    ) -> Result<ResultPage<T>> {
        let mut url = self.session.endpoint(&[METHOD_SEARCH, object])?;
        url.query_pairs_mut().append_pair(ARG_QUERY, query);
        append_options(&mut url, language, page);
        fetch_page(self.session, &url)
    }
}
