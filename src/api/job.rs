//! Job submissions.
//!
//! The server has shipped two incompatible job shapes: older deployments take
//! a nullable `jobMode` string, newer ones a boolean `updateData`. The shape
//! is chosen by [`JobSchema`], never guessed.

use serde::{Deserialize, Serialize};

use crate::config::JobSchema;
use crate::record::Record;

/// Which end of a phenotype's interval a date bound applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DateSide {
    #[default]
    Start,
    Finish,
}

impl DateSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateSide::Start => "START",
            DateSide::Finish => "FINISH",
        }
    }
}

/// A job request. Built by the caller, serialized once by [`Jobs::submit`].
///
/// [`Jobs::submit`]: crate::api::Jobs::submit
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Job {
    pub source_config_id: Option<String>,
    pub destination_id: Option<String>,
    pub date_range_phenotype_key: Option<String>,
    pub earliest_date: Option<String>,
    pub earliest_date_side: DateSide,
    pub latest_date: Option<String>,
    pub latest_date_side: DateSide,
    /// Sent only under [`JobSchema::JobMode`].
    pub job_mode: Option<String>,
    /// Sent only under [`JobSchema::UpdateData`].
    pub update_data: bool,
    pub prompts: Option<Record>,
    pub proposition_ids: Vec<String>,
    pub name: Option<String>,
}

impl Job {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wire form for the given schema. Exactly one of `jobMode` and
    /// `updateData` is present.
    pub fn to_record(&self, schema: JobSchema) -> Record {
        let mut fields = vec![
            ("sourceConfigId", Record::from(self.source_config_id.clone())),
            ("destinationId", Record::from(self.destination_id.clone())),
            (
                "dateRangePhenotypeKey",
                Record::from(self.date_range_phenotype_key.clone()),
            ),
            ("earliestDate", Record::from(self.earliest_date.clone())),
            ("earliestDateSide", Record::from(self.earliest_date_side.as_str())),
            ("latestDate", Record::from(self.latest_date.clone())),
            ("latestDateSide", Record::from(self.latest_date_side.as_str())),
            ("prompts", self.prompts.clone().unwrap_or(Record::Null)),
            ("propositionIds", Record::from(self.proposition_ids.clone())),
            ("name", Record::from(self.name.clone())),
        ];

        match schema {
            JobSchema::JobMode => fields.push(("jobMode", Record::from(self.job_mode.clone()))),
            JobSchema::UpdateData => fields.push(("updateData", Record::from(self.update_data))),
        }

        Record::from_entries(fields)
    }
}
