use chrono::{DateTime, Utc};
use observe_core::types::TaxonId;
use serde::{Deserialize, Serialize};

/// Locale-specific common name of a taxon, as last fetched
///
/// `common_name` is `None` when the lookup found no name for the locale; the
/// entry is still cached so the lookup is not repeated until it expires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonCommonName {
    /// `"{taxonId}_{locale}"`
    pub id: String,
    pub taxon_id: TaxonId,
    pub locale: String,
    #[serde(default)]
    pub common_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wikipedia_url: Option<String>,
    pub cached_at: DateTime<Utc>,
}

impl TaxonCommonName {
    pub fn new(taxon_id: TaxonId, locale: impl Into<String>, common_name: impl Into<String>) -> Self {
        let locale = locale.into();
        Self {
            id: taxon_id.locale_key(&locale),
            taxon_id,
            locale,
            common_name: Some(common_name.into()),
            wikipedia_url: None,
            cached_at: Utc::now(),
        }
    }

    /// Record that the taxon has no common name in `locale`
    pub fn missing(taxon_id: TaxonId, locale: impl Into<String>) -> Self {
        let locale = locale.into();
        Self {
            id: taxon_id.locale_key(&locale),
            taxon_id,
            locale,
            common_name: None,
            wikipedia_url: None,
            cached_at: Utc::now(),
        }
    }

    pub fn with_wikipedia_url(mut self, url: impl Into<String>) -> Self {
        self.wikipedia_url = Some(url.into());
        self
    }

    pub fn cached_at(mut self, at: DateTime<Utc>) -> Self {
        self.cached_at = at;
        self
    }
}
