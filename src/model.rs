use crate::format::{CsvRecordProducer, FormattingError, Formattable, OutputFormat};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A single piece of feed data about a host, e.g. an open port.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
}

impl FeedRecord {
    /// The body sent when pushing data into a feed.
    pub fn for_push(host: &str, value: &str) -> FeedRecord {
        FeedRecord {
            host: Some(host.to_string()),
            value: Some(value.to_string()),
            ..Default::default()
        }
    }

    pub fn get(&self, column: FeedColumn) -> Option<String> {
        match column {
            FeedColumn::Namespace => self.namespace.clone(),
            FeedColumn::Host => self.host.clone(),
            FeedColumn::Value => self.value.clone(),
            FeedColumn::Updated => self
                .updated
                .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedColumn {
    Namespace,
    Host,
    Value,
    Updated,
}

impl FeedColumn {
    pub const ALL: [FeedColumn; 4] = [
        FeedColumn::Namespace,
        FeedColumn::Host,
        FeedColumn::Value,
        FeedColumn::Updated,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            FeedColumn::Namespace => "NAMESPACE",
            FeedColumn::Host => "HOST",
            FeedColumn::Value => "VALUE",
            FeedColumn::Updated => "UPDATED",
        }
    }
}

/// The result set returned by every API operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub hits: Vec<FeedRecord>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<FeedRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<FeedRecord>>::deserialize(deserializer)?.unwrap_or_default())
}

impl FeedResponse {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Values of one column, one per record; blank where a record lacks it.
    pub fn column(&self, column: FeedColumn) -> Vec<String> {
        self.hits
            .iter()
            .map(|hit| hit.get(column).unwrap_or_default())
            .collect()
    }
}

impl CsvRecordProducer for FeedResponse {
    fn csv_header() -> Vec<String> {
        FeedColumn::ALL.iter().map(|c| c.header().to_string()).collect()
    }

    fn as_csv_records(&self) -> Vec<Vec<String>> {
        self.hits
            .iter()
            .map(|hit| {
                FeedColumn::ALL
                    .iter()
                    .map(|c| hit.get(*c).unwrap_or_default())
                    .collect()
            })
            .collect()
    }
}

impl Formattable for FeedResponse {
    fn format(&self, f: &OutputFormat) -> Result<String, FormattingError> {
        match f {
            OutputFormat::Json(options) => {
                if options.pretty {
                    Ok(serde_json::to_string_pretty(&self.hits)?)
                } else {
                    Ok(serde_json::to_string(&self.hits)?)
                }
            }
            OutputFormat::Csv(options) => self.to_csv(options.with_headers),
            OutputFormat::Text(_) => Err(FormattingError::UnsupportedOutputFormat(f.to_string())),
        }
    }
}
