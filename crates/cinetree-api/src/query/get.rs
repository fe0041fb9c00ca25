//! `Get` - single-record lookups and genre lists.

use tracing::instrument;

use super::build_url;
use crate::endpoints::{METHOD_GENRE, METHOD_MOVIE, METHOD_TV, OBJECT_LIST, OBJECT_MOVIE, OBJECT_TV};
use crate::error::Result;
use crate::session::Session;
use crate::views::{Genre, Movie, TvSeries};

/// Lookup queries bound to one session.
#[derive(Debug, Clone, Copy)]
pub struct Get<'a> {
    session: &'a Session,
}

impl<'a> Get<'a> {
    pub(crate) const fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Fetches movie details (`movie/{id}`).
    ///
    /// Returns `None` when the service has no such movie.
    ///
    /// # Errors
    ///
    /// Fails if the request fails or the body is not a valid document.
    #[instrument(skip(self))]
    pub fn movie(&self, id: i64, language: &str) -> Result<Option<Movie>> {
        let id = id.to_string();
        let url = build_url(self.session, &[METHOD_MOVIE, id.as_str()], language, 0)?;
        Ok(self.session.fetch_optional_view(&url)?.map(Movie::from))
    }

    /// Fetches TV series details (`tv/{id}`).
    ///
    /// Returns `None` when the service has no such series.
    ///
    /// # Errors
    ///
    /// Fails if the request fails or the body is not a valid document.
    #[instrument(skip(self))]
    pub fn tv(&self, id: i64, language: &str) -> Result<Option<TvSeries>> {
        let id = id.to_string();
        let url = build_url(self.session, &[METHOD_TV, id.as_str()], language, 0)?;
        Ok(self.session.fetch_optional_view(&url)?.map(TvSeries::from))
    }

    /// Lists movie genres (`genre/movie/list`).
    ///
    /// # Errors
    ///
    /// Fails if the request fails or the body is not a valid document.
    pub fn movie_genres(&self, language: &str) -> Result<Vec<Genre>> {
        self.genres(OBJECT_MOVIE, language)
    }

    /// Lists TV genres (`genre/tv/list`).
    ///
    /// # Errors
    ///
    /// Fails if the request fails or the body is not a valid document.
    pub fn tv_genres(&self, language: &str) -> Result<Vec<Genre>> {
        self.genres(OBJECT_TV, language)
    }

    #[instrument(skip(self))]
    fn genres(&self, object: &str, language: &str) -> Result<Vec<Genre>> {
        let url = build_url(self.session, &[METHOD_GENRE, object, OBJECT_LIST], language, 0)?;
        let Some(mut view) = self.session.fetch_optional_view(&url)? else {
            return Ok(Vec::new());
        };
        Ok(view.take_list("genres")?.into_iter().map(Genre::from).collect())
    }
}
