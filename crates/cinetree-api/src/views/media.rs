//! Views over movie and TV records.

use super::{Country, Genre, HasId, HasName, Language, NameIdHolder, Network, SeasonSummary};
use super::{list_of, tree_view};
use crate::error::Result;

tree_view!(
    /// Search result entry; `media_type` is only sent by multi search.
    MediaSummary
);
impl HasId for MediaSummary {}

impl MediaSummary {
    /// `movie`, `tv` or `person`. Defaults to `movie`.
    ///
    /// # Errors
    ///
    /// Fails if the field has the wrong kind.
    pub fn media_type(&self) -> Result<String> {
        self.0.optional_string("media_type", "movie")
    }

    /// Localized title.
    ///
    /// # Errors
    ///
    /// Fails if the field has the wrong kind.
    pub fn title(&self) -> Result<String> {
        self.0.optional_string("title", "")
    }

    /// Poster image path.
    ///
    /// # Errors
    ///
    /// Fails if the field has the wrong kind.
    pub fn poster_path(&self) -> Result<String> {
        self.0.optional_string("poster_path", "")
    }

    /// Release date (`YYYY-MM-DD`).
    ///
    /// # Errors
    ///
    /// Fails if the field has the wrong kind.
    pub fn release_date(&self) -> Result<String> {
        self.0.optional_string("release_date", "")
    }

    /// Backdrop image path.
    ///
    /// # Errors
    ///
    /// Fails if the field has the wrong kind.
    pub fn backdrop_path(&self) -> Result<String> {
        self.0.optional_string("backdrop_path", "")
    }
}

tree_view!(
    /// TV series entry in a list or search result.
    TvSummary
);
impl HasId for TvSummary {}
impl HasName for TvSummary {}

impl TvSummary {
    /// Original name.
    ///
    /// # Errors
    ///
    /// Fails if the field has the wrong kind.
    pub fn original_name(&self) -> Result<String> {
        self.0.optional_string("original_name", "")
    }

    /// First air date (`YYYY-MM-DD`).
    ///
    /// # Errors
    ///
    /// Fails if the field has the wrong kind.
    pub fn first_air_date(&self) -> Result<String> {
        self.0.optional_string("first_air_date", "")
    }

    /// Overview text.
    ///
    /// # Errors
    ///
    /// Fails if the field has the wrong kind.
    pub fn overview(&self) -> Result<String> {
        self.0.optional_string("overview", "")
    }

    /// Poster image path.
    ///
    /// # Errors
    ///
    /// Fails if the field has the wrong kind.
    pub fn poster_path(&self) -> Result<String> {
        self.0.optional_string("poster_path", "")
    }

    /// Backdrop image path.
    ///
    /// # Errors
    ///
    /// Fails if the field has the wrong kind.
    pub fn backdrop_path(&self) -> Result<String> {
        self.0.optional_string("backdrop_path", "")
    }

    /// Popularity score.
    ///
    /// # Errors
    ///
    /// Fails if the field is not a number.
    pub fn popularity(&self) -> Result<f64> {
        self.0.optional_f64("popularity", 0.0)
    }

    /// Vote average.
    ///
    /// # Errors
    ///
    /// Fails if the field is not a number.
    pub fn vote_average(&self) -> Result<f64> {
        self.0.optional_f64("vote_average", 0.0)
    }

    /// Origin countries (ISO 3166-1).
    ///
    /// # Errors
    ///
    /// Fails if the field is not an array of strings.
    pub fn origin_country(&self) -> Result<Vec<String>> {
        self.0.string_list("origin_country")
    }
}

tree_view!(
    /// Full movie record from `movie/{id}`.
    Movie
);
impl HasId for Movie {}

impl Movie {
    /// Localized title.
    ///
    /// # Errors
    ///
    /// Fails if the field has the wrong kind.
    pub fn title(&self) -> Result<String> {
        self.0.optional_string("title", "")
    }

    /// Original title.
    ///
    /// # Errors
    ///
    /// Fails if the field has the wrong kind.
    pub fn original_title(&self) -> Result<String> {
        self.0.optional_string("original_title", "")
    }

    /// Overview text.
    ///
    /// # Errors
    ///
    /// Fails if the field has the wrong kind.
    pub fn overview(&self) -> Result<String> {
        self.0.optional_string("overview", "")
    }

    /// Tagline.
    ///
    /// # Errors
    ///
    /// Fails if the field has the wrong kind.
    pub fn tagline(&self) -> Result<String> {
        self.0.optional_string("tagline", "")
    }

    /// Release status, e.g. `Released`.
    ///
    /// # Errors
    ///
    /// Fails if the field has the wrong kind.
    pub fn status(&self) -> Result<String> {
        self.0.optional_string("status", "")
    }

    /// Release date (`YYYY-MM-DD`).
    ///
    /// # Errors
    ///
    /// Fails if the field has the wrong kind.
    pub fn release_date(&self) -> Result<String> {
        self.0.optional_string("release_date", "")
    }

    /// Poster image path.
    ///
    /// # Errors
    ///
    /// Fails if the field has the wrong kind.
    pub fn poster_path(&self) -> Result<String> {
        self.0.optional_string("poster_path", "")
    }

    /// Backdrop image path.
    ///
    /// # Errors
    ///
    /// Fails if the field has the wrong kind.
    pub fn backdrop_path(&self) -> Result<String> {
        self.0.optional_string("backdrop_path", "")
    }

    /// Runtime in minutes.
    ///
    /// # Errors
    ///
    /// Fails if the field is not an integer.
    pub fn runtime(&self) -> Result<i64> {
        self.0.optional_i64("runtime", 0)
    }

    /// Adult flag.
    ///
    /// # Errors
    ///
    /// Fails if the field is not a boolean.
    pub fn adult(&self) -> Result<bool> {
        self.0.optional_bool("adult", false)
    }

    /// Genres.
    ///
    /// # Errors
    ///
    /// Fails if the field is not an array.
    pub fn genres(&self) -> Result<Vec<Genre>> {
        list_of(&self.0, "genres")
    }

    /// Production countries.
    ///
    /// # Errors
    ///
    /// Fails if the field is not an array.
    pub fn production_countries(&self) -> Result<Vec<Country>> {
        list_of(&self.0, "production_countries")
    }

    /// Production companies.
    ///
    /// # Errors
    ///
    /// Fails if the field is not an array.
    pub fn production_companies(&self) -> Result<Vec<NameIdHolder>> {
        list_of(&self.0, "production_companies")
    }

    /// Spoken languages.
    ///
    /// # Errors
    ///
    /// Fails if the field is not an array.
    pub fn spoken_languages(&self) -> Result<Vec<Language>> {
        list_of(&self.0, "spoken_languages")
    }
}

tree_view!(
    /// Full TV series record from `tv/{id}`.
    TvSeries
);
impl HasId for TvSeries {}
impl HasName for TvSeries {}

impl TvSeries {
    /// Original name.
    ///
    /// # Errors
    ///
    /// Fails if the field has the wrong kind.
    pub fn original_name(&self) -> Result<String> {
        self.0.optional_string("original_name", "")
    }

    /// Overview text.
    ///
    /// # Errors
    ///
    /// Fails if the field has the wrong kind.
    pub fn overview(&self) -> Result<String> {
        self.0.optional_string("overview", "")
    }

    /// Production status, e.g. `Ended`.
    ///
    /// # Errors
    ///
    /// Fails if the field has the wrong kind.
    pub fn status(&self) -> Result<String> {
        self.0.optional_string("status", "")
    }

    /// First air date.
    ///
    /// # Errors
    ///
    /// Fails if the field has the wrong kind.
    pub fn first_air_date(&self) -> Result<String> {
        self.0.optional_string("first_air_date", "")
    }

    /// Last air date.
    ///
    /// # Errors
    ///
    /// Fails if the field has the wrong kind.
    pub fn last_air_date(&self) -> Result<String> {
        self.0.optional_string("last_air_date", "")
    }

    /// Poster image path.
    ///
    /// # Errors
    ///
    /// Fails if the field has the wrong kind.
    pub fn poster_path(&self) -> Result<String> {
        self.0.optional_string("poster_path", "")
    }

    /// Total number of seasons.
    ///
    /// # Errors
    ///
    /// Fails if the field is not an integer.
    pub fn number_of_seasons(&self) -> Result<i64> {
        self.0.optional_i64("number_of_seasons", 0)
    }

    /// Total number of episodes.
    ///
    /// # Errors
    ///
    /// Fails if the field is not an integer.
    pub fn number_of_episodes(&self) -> Result<i64> {
        self.0.optional_i64("number_of_episodes", 0)
    }

    /// Origin countries (ISO 3166-1).
    ///
    /// # Errors
    ///
    /// Fails if the field is not an array of strings.
    pub fn origin_country(&self) -> Result<Vec<String>> {
        self.0.string_list("origin_country")
    }

    /// Genres.
    ///
    /// # Errors
    ///
    /// Fails if the field is not an array.
    pub fn genres(&self) -> Result<Vec<Genre>> {
        list_of(&self.0, "genres")
    }

    /// Networks airing the series.
    ///
    /// # Errors
    ///
    /// Fails if the field is not an array.
    pub fn networks(&self) -> Result<Vec<Network>> {
        list_of(&self.0, "networks")
    }

    /// Season list.
    ///
    /// # Errors
    ///
    /// Fails if the field is not an array.
    pub fn seasons(&self) -> Result<Vec<SeasonSummary>> {
        list_of(&self.0, "seasons")
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;
    use crate::error::Error;

    #[test]
    fn test_media_summary_defaults() {
        // Arrange
        let summary = MediaSummary::parse(r#"{"id":7}"#).unwrap();

        // Act & Assert
        assert_eq!(summary.id().unwrap(), 7);
        assert_eq!(summary.media_type().unwrap(), "movie");
        assert_eq!(summary.title().unwrap(), "");
        assert_eq!(summary.poster_path().unwrap(), "");
        assert_eq!(summary.release_date().unwrap(), "");
        assert_eq!(summary.backdrop_path().unwrap(), "");
    }

    #[test]
    fn test_media_summary_non_numeric_id() {
        // Arrange
        let summary = MediaSummary::parse(r#"{"id":"tt0111161"}"#).unwrap();

        // Act & Assert
        assert!(matches!(
            summary.id(),
            Err(Error::FieldTypeMismatch { ref field, .. }) if field == "id"
        ));
    }

    #[test]
    fn test_tv_summary() {
        // Arrange
        let tv = TvSummary::parse(
            r#"{"id":120089,"name":"SPY×FAMILY","original_name":"SPY×FAMILY","origin_country":["JP"],"vote_average":8.5,"poster_path":null}"#,
        )
        .unwrap();

        // Act & Assert
        assert_eq!(tv.id().unwrap(), 120_089);
        assert_eq!(tv.name().unwrap(), "SPY×FAMILY");
        assert_eq!(tv.origin_country().unwrap(), vec![String::from("JP")]);
        assert!((tv.vote_average().unwrap() - 8.5).abs() < f64::EPSILON);
        assert_eq!(tv.poster_path().unwrap(), "");
    }

    #[test]
    fn test_movie_nested_views() {
        // Arrange
        let movie = Movie::parse(
            r#"{
                "id": 916224,
                "title": "Suzume",
                "runtime": 122,
                "genres": [{"id": 16, "name": "Animation"}, {"id": 12, "name": "Adventure"}],
                "production_countries": [{"iso_3166_1": "JP", "name": "Japan"}],
                "spoken_languages": [{"iso_639_1": "ja", "name": "日本語"}],
                "production_companies": [{"id": 3021, "name": "CoMix Wave Films"}]
            }"#,
        )
        .unwrap();

        // Act
        let genres = movie.genres().unwrap();
        let countries = movie.production_countries().unwrap();
        let languages = movie.spoken_languages().unwrap();
        let companies = movie.production_companies().unwrap();

        // Assert
        assert_eq!(movie.runtime().unwrap(), 122);
        assert!(!movie.adult().unwrap());
        assert_eq!(genres.len(), 2);
        assert_eq!(genres[1].name().unwrap(), "Adventure");
        assert_eq!(countries[0].iso_3166_1().unwrap(), "JP");
        assert_eq!(languages[0].iso_639_1().unwrap(), "ja");
        assert_eq!(companies[0].id().unwrap(), 3021);
    }

    #[test]
    fn test_nested_view_outlives_parent() {
        // Arrange
        let movie = Movie::parse(r#"{"id":1,"genres":[{"id":18,"name":"Drama"}]}"#).unwrap();

        // Act
        let genres = movie.genres().unwrap();
        drop(movie);

        // Assert
        assert_eq!(genres[0].id().unwrap(), 18);
    }

    #[test]
    fn test_tv_series() {
        // Arrange
        let series = TvSeries::parse(
            r#"{
                "id": 1399,
                "name": "Game of Thrones",
                "number_of_seasons": 8,
                "networks": [{"id": 49, "name": "HBO", "origin_country": "US"}],
                "seasons": [{"id": 3624, "season_number": 1, "episode_count": 10}]
            }"#,
        )
        .unwrap();

        // Act
        let networks = series.networks().unwrap();
        let seasons = series.seasons().unwrap();

        // Assert
        assert_eq!(series.name().unwrap(), "Game of Thrones");
        assert_eq!(series.number_of_seasons().unwrap(), 8);
        assert_eq!(series.number_of_episodes().unwrap(), 0);
        assert_eq!(networks[0].origin_country().unwrap(), "US");
        assert_eq!(seasons[0].episode_count().unwrap(), 10);
        assert!(series.genres().unwrap().is_empty());
    }
}
