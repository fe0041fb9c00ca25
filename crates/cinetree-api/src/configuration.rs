//! `Configuration` - remote configuration fetched once per session.

use serde_json::Value;

use crate::error::{Error, Result, ValidationError};
use crate::tree::TreeView;
use crate::views::{Timezone, TreeBacked, list_of, tree_view};

/// Key under which the timezone list is merged into the configuration.
const TIMEZONES_KEY: &str = "timezones";

tree_view!(
    /// Merged result of the `configuration` and `timezones/list` endpoints.
    Configuration
);

impl Configuration {
    /// Merges the general configuration document with the timezone list.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidState`] if either view is empty.
    /// - [`Error::FieldTypeMismatch`] if the configuration is not an object.
    /// - [`Error::Validation`] if the configuration already has a `timezones` key.
    pub fn merge(general: TreeView, timezones: TreeView) -> Result<Self> {
        let mut tree = general.into_tree()?;
        let zones = timezones.into_tree()?;
        let Value::Object(map) = &mut tree else {
            return Err(Error::mismatch("configuration", "object"));
        };
        if map.contains_key(TIMEZONES_KEY) {
            return Err(ValidationError::DuplicateKey(String::from(TIMEZONES_KEY)).into());
        }
        map.insert(String::from(TIMEZONES_KEY), zones);
        Ok(Self(TreeView::from_tree(tree)))
    }

    /// Returns the `images` sub-object, or an empty view if absent.
    fn images(&self) -> Result<TreeView> {
        Ok(self
            .0
            .child("images")?
            .unwrap_or_else(|| TreeView::from_tree(Value::Object(serde_json::Map::new()))))
    }

    /// Plain HTTP base URL for images.
    ///
    /// # Errors
    ///
    /// Fails if `images` or `images.base_url` has the wrong kind.
    pub fn image_base_url(&self) -> Result<String> {
        self.images()?.optional_string("base_url", "")
    }

    /// HTTPS base URL for images.
    ///
    /// # Errors
    ///
    /// Fails if `images` or `images.secure_base_url` has the wrong kind.
    pub fn secure_image_base_url(&self) -> Result<String> {
        self.images()?.optional_string("secure_base_url", "")
    }

    /// Available poster sizes, e.g. `w92`, `original`.
    ///
    /// # Errors
    ///
    /// Fails if the field is not an array of strings.
    pub fn poster_sizes(&self) -> Result<Vec<String>> {
        self.images()?.string_list("poster_sizes")
    }

    /// Available backdrop sizes.
    ///
    /// # Errors
    ///
    /// Fails if the field is not an array of strings.
    pub fn backdrop_sizes(&self) -> Result<Vec<String>> {
        self.images()?.string_list("backdrop_sizes")
    }

    /// Keys reported by the change endpoints.
    ///
    /// # Errors
    ///
    /// Fails if the field is not an array of strings.
    pub fn change_keys(&self) -> Result<Vec<String>> {
        self.0.string_list("change_keys")
    }

    /// Countries and their IANA zones.
    ///
    /// # Errors
    ///
    /// Fails if the merged timezone list is not an array.
    pub fn timezones(&self) -> Result<Vec<Timezone>> {
        list_of(self.view(), TIMEZONES_KEY)
    }

    /// Builds a full image URL from a size and a path such as `/abc.jpg`.
    ///
    /// Returns an empty string for an empty path.
    ///
    /// # Errors
    ///
    /// Fails if the image base URL has the wrong kind.
    pub fn image_url(&self, size: &str, path: &str) -> Result<String> {
        if path.is_empty() {
            return Ok(String::new());
        }
        let base = self.secure_image_base_url()?;
        Ok(format!("{base}{size}{path}"))
    }
}
