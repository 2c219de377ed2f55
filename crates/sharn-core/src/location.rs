//! Page location handling: the `?json=` override and `#district` permalinks

use crate::error::{Error, Result};
use crate::store::DatasetSource;
use url::Url;

/// Query parameter naming an alternate dataset
pub const DATASET_PARAM: &str = "json";

/// Base used to resolve page-relative locations like `?json=a.json#C3`
const PAGE_BASE: &str = "http://atlas.invalid/";

/// What the page location asks for at startup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLocation {
    /// Dataset named by `?json=<url>`
    pub dataset: Option<String>,
    /// District named by `#<id>`
    pub district: Option<String>,
}

impl PageLocation {
    /// Parse a full URL or a page-relative `?query#fragment` string
    pub fn parse(location: &str) -> Result<Self> {
        let base = Url::parse(PAGE_BASE).map_err(|e| invalid(PAGE_BASE, &e))?;
        let url = Url::options()
            .base_url(Some(&base))
            .parse(location.trim())
            .map_err(|e| invalid(location, &e))?;

        let dataset = url
            .query_pairs()
            .find(|(key, _)| key == DATASET_PARAM)
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let district = url.fragment().and_then(Permalink::parse_hash).map(str::to_string);

        Ok(Self { dataset, district })
    }

    /// Source to try first: the query override, else the default dataset
    pub fn startup_source(&self) -> DatasetSource {
        match &self.dataset {
            Some(url) => DatasetSource::Url(url.clone()),
            None => DatasetSource::Default,
        }
    }

    /// Page-relative link reproducing this location, e.g. `?json=alt.json#C3`
    pub fn href(&self) -> String {
        let mut out = String::new();
        if let Some(dataset) = &self.dataset {
            out.push('?');
            out.push_str(
                &url::form_urlencoded::Serializer::new(String::new())
                    .append_pair(DATASET_PARAM, dataset)
                    .finish(),
            );
        }
        if let Some(district) = &self.district {
            out.push_str(&Permalink::for_district(district).href());
        }
        out
    }
}

fn invalid(location: &str, err: &url::ParseError) -> Error {
    Error::InvalidLocation {
        location: location.to_string(),
        reason: err.to_string(),
    }
}

/// URL fragment pointing at a district
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Permalink(String);

impl Permalink {
    pub fn for_district(district_id: &str) -> Self {
        Self(district_id.to_string())
    }

    /// District identifier this permalink selects
    pub fn district_id(&self) -> &str {
        &self.0
    }

    /// Link target, e.g. `#C12`
    pub fn href(&self) -> String {
        format!("#{}", self.0)
    }

    /// Extract the district id from a hash, with or without the leading `#`.
    /// Empty hashes yield `None`.
    pub fn parse_hash(hash: &str) -> Option<&str> {
        let id = hash.trim();
        let id = id.strip_prefix('#').unwrap_or(id).trim();
        (!id.is_empty()).then_some(id)
    }
}
