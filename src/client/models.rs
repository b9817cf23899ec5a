//! Data scan resource models
//!
//! Only the data quality spec is interpreted. Everything else the service
//! returns is kept as-is, in the order it arrived.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// A single data quality rule, exactly as the service represents it
pub type Rule = Map<String, Value>;

/// Data scan resource
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataScan {
    /// Fully-qualified resource name
    #[serde(default)]
    pub name: Option<String>,

    /// Data quality spec, only present on data quality scans
    #[serde(default)]
    pub data_quality_spec: Option<DataQualitySpec>,

    /// Remaining resource fields
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Data quality spec of a scan
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataQualitySpec {
    /// Ordered rule list; evaluated by the service in this order.
    /// `Some` whenever the key is present, even as `null`.
    #[serde(default, deserialize_with = "present_rules")]
    pub rules: Option<Vec<Rule>>,

    /// Sampling, filters, post-scan actions and so on
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl DataQualitySpec {
    /// True when the service returned the spec without any fields set
    pub fn is_empty(&self) -> bool {
        self.rules.is_none() && self.other.is_empty()
    }

    /// Rules in service order; empty when rules are kept elsewhere
    #[cfg(test)]
    pub fn rules(&self) -> &[Rule] {
        self.rules.as_deref().unwrap_or_default()
    }

    /// Consume the spec and return its rules
    pub fn into_rules(self) -> Vec<Rule> {
        self.rules.unwrap_or_default()
    }
}

impl DataScan {
    /// The data quality spec, if the scan carries a non-empty one
    #[cfg(test)]
    pub fn quality_spec(&self) -> Option<&DataQualitySpec> {
        self.data_quality_spec
            .as_ref()
            .filter(|spec| !spec.is_empty())
    }

    /// Consume the scan and return its data quality spec
    pub fn into_quality_spec(self) -> Option<DataQualitySpec> {
        self.data_quality_spec.filter(|spec| !spec.is_empty())
    }
}

/// A `rules` key that is present counts as set, so `"rules": null` reads as an empty list
fn present_rules<'de, D>(deserializer: D) -> Result<Option<Vec<Rule>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(
        Option::<Vec<Rule>>::deserialize(deserializer)?.unwrap_or_default(),
    ))
}
