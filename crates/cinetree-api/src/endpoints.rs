//! TMDB v3 path segments.

/// Default service root.
pub const BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

pub(crate) const METHOD_CONFIG: &str = "configuration";
pub(crate) const METHOD_TIMEZONES: &str = "timezones";
pub(crate) const METHOD_SEARCH: &str = "search";
pub(crate) const METHOD_MOVIE: &str = "movie";
pub(crate) const METHOD_TV: &str = "tv";
pub(crate) const METHOD_GENRE: &str = "genre";

pub(crate) const OBJECT_LIST: &str = "list";
pub(crate) const OBJECT_MOVIE: &str = "movie";
pub(crate) const OBJECT_TV: &str = "tv";
pub(crate) const OBJECT_MULTI: &str = "multi";
pub(crate) const OBJECT_POPULAR: &str = "popular";
pub(crate) const OBJECT_TOP_RATED: &str = "top_rated";
pub(crate) const OBJECT_AIRING_TODAY: &str = "airing_today";
pub(crate) const OBJECT_ON_THE_AIR: &str = "on_the_air";

pub(crate) const ARG_API_KEY: &str = "api_key";
pub(crate) const ARG_LANGUAGE: &str = "language";
pub(crate) const ARG_PAGE: &str = "page";
pub(crate) const ARG_QUERY: &str = "query";
