//! Fetch-and-parse pipeline behind the session factories.
//!
//! Every query builds a URL from the session, appends the optional
//! arguments, fetches the body and wraps the parsed tree in a typed view.

mod get;
mod search;
mod tv;

pub use get::Get;
pub use search::Search;
pub use tv::TvFilter;

use tracing::instrument;
use url::Url;

use crate::endpoints::{ARG_LANGUAGE, ARG_PAGE};
use crate::error::Result;
use crate::session::Session;
use crate::tree::TreeView;

/// One page of a paged TMDB listing.
///
/// `results` is moved out of the parsed document into `items`; the rest of
/// the document stays available through the page metadata accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPage<T> {
    /// Parsed document without its `results` array.
    meta: TreeView,
    /// Items moved out of `results`, in service order.
    items: Vec<T>,
}

impl<T: From<TreeView>> ResultPage<T> {
    /// Splits a parsed listing into metadata and typed items.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FieldTypeMismatch`] if `results` is not an array.
    pub fn from_view(mut view: TreeView) -> Result<Self> {
        let items = view.take_list("results")?.into_iter().map(T::from).collect();
        Ok(Self { meta: view, items })
    }
}

impl<T> ResultPage<T> {
    /// Page with no metadata and no items ("no data").
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            meta: TreeView::from_tree(serde_json::Value::Null),
            items: Vec::new(),
        }
    }

    /// Page number (0 on an empty page).
    ///
    /// # Errors
    ///
    /// Fails if `page` is present but not an integer.
    pub fn page(&self) -> Result<i64> {
        self.meta_i64("page")
    }

    /// Total number of pages (0 on an empty page).
    ///
    /// # Errors
    ///
    /// Fails if `total_pages` is present but not an integer.
    pub fn total_pages(&self) -> Result<i64> {
        self.meta_i64("total_pages")
    }

    /// Total number of results across all pages (0 on an empty page).
    ///
    /// # Errors
    ///
    /// Fails if `total_results` is present but not an integer.
    pub fn total_results(&self) -> Result<i64> {
        self.meta_i64("total_results")
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the page and returns its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn meta_i64(&self, name: &str) -> Result<i64> {
        match self.meta.tree()? {
            serde_json::Value::Null => Ok(0),
            _ => self.meta.optional_i64(name, 0),
        }
    }
}

/// Appends `language` when non-empty and `page` when positive, in that order.
fn append_options(url: &mut Url, language: &str, page: i32) {
    let mut pairs = url.query_pairs_mut();
    if !language.is_empty() {
        pairs.append_pair(ARG_LANGUAGE, language);
    }
    if page > 0 {
        pairs.append_pair(ARG_PAGE, &page.to_string());
    }
}

/// Builds `segments` under the session root with the optional arguments.
fn build_url(session: &Session, segments: &[&str], language: &str, page: i32) -> Result<Url> {
    let mut url = session.endpoint(segments)?;
    append_options(&mut url, language, page);
    Ok(url)
}

/// Fetches a paged listing, mapping "no data" to an empty page.
#[instrument(skip_all, fields(path = url.path()))]
fn fetch_page<T: From<TreeView>>(session: &Session, url: &Url) -> Result<ResultPage<T>> {
    match session.fetch_optional_view(url)? {
        Some(view) => {
            let page = ResultPage::from_view(view)?;
            tracing::debug!(items = page.len(), "TMDB page fetched");
            Ok(page)
        }
        None => Ok(ResultPage::empty()),
    }
}
