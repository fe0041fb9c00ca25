//! Typed read-only views over a [`TreeView`].
//!
//! Each view is a newtype around one tree. Shared fields come from the
//! capability traits [`HasId`] and [`HasName`]; everything else is a plain
//! method reading a fixed field with a fixed default.

mod media;

pub use media::{MediaSummary, Movie, TvSeries, TvSummary};

use crate::error::Result;
use crate::tree::{Tree, TreeView};

/// Access to the tree behind a typed view.
pub trait TreeBacked {
    /// Returns the backing view.
    fn view(&self) -> &TreeView;

    /// Returns `true` if the backing view owns a tree.
    fn is_valid(&self) -> bool {
        self.view().is_valid()
    }
}

impl TreeBacked for TreeView {
    fn view(&self) -> &TreeView {
        self
    }
}

/// Views with a required integer `id`.
pub trait HasId: TreeBacked {
    /// Returns the `id` field.
    ///
    /// # Errors
    ///
    /// Fails if `id` is absent or not an integer.
    fn id(&self) -> Result<i64> {
        self.view().required_i64("id")
    }
}

/// Views with an optional `name` (default `""`).
pub trait HasName: TreeBacked {
    /// Returns the `name` field.
    ///
    /// # Errors
    ///
    /// Fails if `name` is an object or an array.
    fn name(&self) -> Result<String> {
        self.view().optional_string("name", "")
    }
}

/// Declares a newtype view over [`TreeView`].
macro_rules! tree_view {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name($crate::tree::TreeView);

        impl $name {
            /// Parses a JSON document into this view.
            ///
            /// # Errors
            ///
            /// Fails if the text is malformed or violates the top-level rule.
            pub fn parse(text: &str) -> $crate::error::Result<Self> {
                $crate::tree::TreeView::parse(text).map(Self)
            }

            /// Returns the backing view.
            #[must_use]
            pub fn into_view(self) -> $crate::tree::TreeView {
                self.0
            }
        }

        impl From<$crate::tree::TreeView> for $name {
            fn from(view: $crate::tree::TreeView) -> Self {
                Self(view)
            }
        }

        impl $crate::views::TreeBacked for $name {
            fn view(&self) -> &$crate::tree::TreeView {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

pub(crate) use tree_view;

/// Reads a list field as typed views.
pub(crate) fn list_of<T: From<TreeView>>(view: &TreeView, field: &str) -> Result<Vec<T>> {
    Ok(view.list(field)?.into_iter().map(T::from).collect())
}

tree_view!(
    /// Any record with an `id`.
    IdHolder
);
impl HasId for IdHolder {}

tree_view!(
    /// Any record with a `name`.
    NameHolder
);
impl HasName for NameHolder {}

tree_view!(
    /// Any record with an `id` and a `name`, e.g. a production company.
    NameIdHolder
);
impl HasId for NameIdHolder {}
impl HasName for NameIdHolder {}

tree_view!(
    /// A production or origin country.
    Country
);
impl HasName for Country {}

impl Country {
    /// ISO 3166-1 country code.
    ///
    /// # Errors
    ///
    /// Fails if the field has the wrong kind.
    pub fn iso_3166_1(&self) -> Result<String> {
        self.0.optional_string("iso_3166_1", "")
    }
}

tree_view!(
    /// A spoken or original language.
    Language
);
impl HasName for Language {}

impl Language {
    /// ISO 639-1 language code.
    ///
    /// # Errors
    ///
    /// Fails if the field has the wrong kind.
    pub fn iso_639_1(&self) -> Result<String> {
        self.0.optional_string("iso_639_1", "")
    }
}

tree_view!(
    /// A movie or TV genre.
    Genre
);
impl HasId for Genre {}
impl HasName for Genre {}

tree_view!(
    /// A broadcasting network.
    Network
);
impl HasId for Network {}
impl HasName for Network {}

impl Network {
    /// Country the network is based in.
    ///
    /// # Errors
    ///
    /// Fails if the field has the wrong kind.
    pub fn origin_country(&self) -> Result<String> {
        self.0.optional_string("origin_country", "")
    }
}

tree_view!(
    /// Season entry inside a TV series record.
    SeasonSummary
);
impl HasId for SeasonSummary {}
impl HasName for SeasonSummary {}

impl SeasonSummary {
    /// Season number (`0` for specials).
    ///
    /// # Errors
    ///
    /// Fails if the field is not an integer.
    pub fn season_number(&self) -> Result<i64> {
        self.0.optional_i64("season_number", 0)
    }

    /// Number of episodes in the season.
    ///
    /// # Errors
    ///
    /// Fails if the field is not an integer.
    pub fn episode_count(&self) -> Result<i64> {
        self.0.optional_i64("episode_count", 0)
    }

    /// First air date (`YYYY-MM-DD`).
    ///
    /// # Errors
    ///
    /// Fails if the field has the wrong kind.
    pub fn air_date(&self) -> Result<String> {
        self.0.optional_string("air_date", "")
    }

    /// Poster image path.
    ///
    /// # Errors
    ///
    /// Fails if the field has the wrong kind.
    pub fn poster_path(&self) -> Result<String> {
        self.0.optional_string("poster_path", "")
    }
}

tree_view!(
    /// Timezones used in one country.
    Timezone
);

impl Timezone {
    /// ISO 3166-1 country code.
    ///
    /// # Errors
    ///
    /// Fails if the field has the wrong kind.
    pub fn iso_3166_1(&self) -> Result<String> {
        self.0.optional_string("iso_3166_1", "")
    }

    /// IANA zone names, e.g. `Europe/Andorra`.
    ///
    /// # Errors
    ///
    /// Fails if the field is not an array of strings.
    pub fn zones(&self) -> Result<Vec<String>> {
        self.0.string_list("zones")
    }
}

tree_view!(
    /// Error record returned by the service on failure.
    ErrorStatus
);

impl ErrorStatus {
    /// A status carrying no error: code `0`, empty message.
    #[must_use]
    pub fn none() -> Self {
        Self(TreeView::from_tree(Tree::Object(serde_json::Map::new())))
    }

    /// TMDB status code; `0` means no error.
    ///
    /// # Errors
    ///
    /// Fails on an empty view or a non-integer code.
    pub fn status_code(&self) -> Result<i64> {
        self.0.optional_i64("status_code", 0)
    }

    /// Human readable status message.
    ///
    /// # Errors
    ///
    /// Fails on an empty view or a non-string message.
    pub fn status_message(&self) -> Result<String> {
        self.0.optional_string("status_message", "")
    }
}
