use crate::database::tables::job::{Job, JobStatus, JobType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

/// Result payload of a FILES_STAT job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FilesStatResult {
    pub files_count: i64,
    pub files_size_byte_sum: i64,
}

/// Result payload of an FCS_INFO job.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FcsInfoResult {
    pub file_name: String,
    pub file_size_byte: i64,
    pub file_upload_time: DateTime<Utc>,
    pub fcs_version: String,
    pub fcs_pnn_labels: Vec<String>,
    pub fcs_event_count: u64,
}

/// Job result as a variant keyed by the job's type. The stored JSON is
/// decoded into the concrete record at the read boundary; the job type column
/// is the tag, so the serialized form stays the bare payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum JobResult {
    FilesStat(FilesStatResult),
    FcsInfo(FcsInfoResult),
}

impl JobResult {
    /// Decodes a stored result payload against the job type's schema.
    ///
    /// # Errors
    ///
    /// Returns the serde error when the stored payload does not match the
    /// type-appropriate shape.
    pub fn decode(job_type: JobType, value: Value) -> Result<Self, serde_json::Error> {
        Ok(match job_type {
            JobType::FilesStat => Self::FilesStat(serde_json::from_value(value)?),
            JobType::FcsInfo => Self::FcsInfo(serde_json::from_value(value)?),
        })
    }
}

/// Job record as served to the polling client.
#[derive(Debug, Serialize, ToSchema)]
pub struct JobRead {
    pub queue_job_id: Option<Uuid>,
    pub job_type: JobType,
    #[schema(value_type = Object)]
    pub job_args: Option<Value>,
    pub status: JobStatus,
    pub job_working_duration_second: Option<f64>,
    pub result: Option<JobResult>,
    pub failure_reason: Option<String>,
}

impl TryFrom<Job> for JobRead {
    type Error = serde_json::Error;

    fn try_from(job: Job) -> Result<Self, Self::Error> {
        let result = job
            .result
            .map(|value| JobResult::decode(job.job_type, value))
            .transpose()?;
        Ok(Self {
            queue_job_id: job.queue_job_id,
            job_type: job.job_type,
            job_args: job.job_args,
            status: job.status,
            job_working_duration_second: job.job_working_duration_second,
            result,
            failure_reason: job.failure_reason,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_files_stat_payload() {
        let value = json!({"files_count": 2, "files_size_byte_sum": 123});
        let decoded = JobResult::decode(JobType::FilesStat, value).unwrap();
        assert!(matches!(
            decoded,
            JobResult::FilesStat(FilesStatResult { files_count: 2, files_size_byte_sum: 123 })
        ));
    }

    #[test]
    fn decodes_fcs_info_payload() {
        let value = json!({
            "file_name": "abc.fcs",
            "file_size_byte": 2_585_280,
            "file_upload_time": "2025-10-16T18:00:00Z",
            "fcs_version": "FCS3.1",
            "fcs_pnn_labels": ["FSC-A", "SSC-A"],
            "fcs_event_count": 10_000,
        });
        let decoded = JobResult::decode(JobType::FcsInfo, value).unwrap();
        let JobResult::FcsInfo(info) = decoded else {
            panic!("wrong variant");
        };
        assert_eq!(info.fcs_version, "FCS3.1");
        assert_eq!(info.fcs_pnn_labels, vec!["FSC-A", "SSC-A"]);
        assert_eq!(info.fcs_event_count, 10_000);
    }

    #[test]
    fn mismatched_payload_is_an_error() {
        let value = json!({"files_count": 2});
        assert!(JobResult::decode(JobType::FilesStat, value).is_err());
    }

    #[test]
    fn finished_job_serializes_with_bare_result_payload() {
        let read = JobRead {
            queue_job_id: Some(Uuid::now_v7()),
            job_type: JobType::FilesStat,
            job_args: None,
            status: JobStatus::Finished,
            job_working_duration_second: Some(0.25),
            result: Some(JobResult::FilesStat(FilesStatResult {
                files_count: 0,
                files_size_byte_sum: 0,
            })),
            failure_reason: None,
        };
        let value = serde_json::to_value(&read).unwrap();
        assert_eq!(value["status"], json!("FINISHED"));
        assert_eq!(value["job_type"], json!("FILES_STAT"));
        assert_eq!(value["result"]["files_count"], json!(0));
    }
}
