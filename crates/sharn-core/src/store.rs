//! Description store - the dataset currently in effect
//!
//! The store is replaced wholesale on every successful load and never merged.
//! A failed load leaves the previous dataset untouched.

use crate::error::{Error, Result};
use crate::model::Dataset;
use crate::ward::Ward;
use serde::de::DeserializeOwned;
use std::fmt;
use tracing::{debug, info};

/// Well-known dataset location, relative to the map page
pub const DEFAULT_DATASET: &str = "districtInfo.json";

/// Where a dataset came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    /// The well-known location shipped alongside the map
    Default,
    /// An explicit location, e.g. from `?json=<url>`
    Url(String),
    /// A payload handed over directly, e.g. an uploaded file
    Text { label: String },
}

impl DatasetSource {
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }

    /// Location to fetch from, `None` for direct payloads
    pub fn location<'a>(&'a self, default_location: &'a str) -> Option<&'a str> {
        match self {
            Self::Default => Some(default_location),
            Self::Url(url) => Some(url),
            Self::Text { .. } => None,
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str(DEFAULT_DATASET),
            Self::Url(url) => f.write_str(url),
            Self::Text { label } => f.write_str(label),
        }
    }
}

/// Holds the current hierarchical description dataset
#[derive(Debug, Default)]
pub struct DescriptionStore {
    dataset: Dataset,
    /// Source of the dataset in effect (None = nothing has loaded yet)
    source: Option<DatasetSource>,
    /// Bumped on every successful replacement
    generation: u64,
}

impl DescriptionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a dataset
    pub fn with_dataset(dataset: Dataset, source: DatasetSource) -> Self {
        let mut store = Self::new();
        store.replace(dataset, source);
        store
    }

    /// Parse a JSON payload into a dataset without touching any store
    pub fn parse(json_text: &str) -> Result<Dataset> {
        Ok(serde_json::from_str(json_text)?)
    }

    /// Replace the whole dataset
    pub fn replace(&mut self, dataset: Dataset, source: DatasetSource) {
        info!("Loaded {} entries from {}", dataset.len(), source);
        self.dataset = dataset;
        self.source = Some(source);
        self.generation += 1;
    }

    /// Parse `json_text` and replace the dataset on success.
    ///
    /// On failure the previous dataset stays in effect.
    pub fn load_from_text(&mut self, json_text: &str, source: DatasetSource) -> Result<()> {
        let dataset = Self::parse(json_text)?;
        self.replace(dataset, source);
        Ok(())
    }

    /// Whether any load has ever succeeded
    pub fn has_loaded(&self) -> bool {
        self.source.is_some()
    }

    /// Source of the dataset currently in effect
    pub fn source(&self) -> Option<&DatasetSource> {
        self.source.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.dataset.contains_key(key)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Raw record for a district identifier or ward key
    pub fn raw(&self, key: &str) -> Option<&serde_json::Value> {
        self.dataset.get(key)
    }

    /// Typed record for a key; absent keys and wrong shapes are missing data
    pub fn record<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self
            .raw(key)
            .ok_or_else(|| Error::missing(key, "not present in dataset"))?;
        T::deserialize(value).map_err(|e| {
            debug!("Record {} has unexpected shape: {}", key, e);
            Error::missing(key, e.to_string())
        })
    }

    /// Dataset keys that name districts rather than wards
    pub fn district_ids(&self) -> impl Iterator<Item = &str> {
        self.dataset
            .keys()
            .map(String::as_str)
            .filter(|key| !Ward::is_ward_key(key))
    }
}
