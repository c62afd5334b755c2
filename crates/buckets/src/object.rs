use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of `GET /buckets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketSummary {
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// One entry of `GET /buckets/{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSummary {
    pub key: String,
    pub size: u64,
    pub last_modified: Option<DateTime<Utc>>,
    pub etag: Option<String>,
}

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredObject {
    pub bucket: String,
    pub key: String,
    pub size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_serialize_as_rfc3339() {
        let created = DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let summary = BucketSummary {
            name: "fotos".to_string(),
            created_at: Some(created),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["name"], "fotos");
        assert_eq!(json["created_at"], "2024-05-01T12:00:00Z");
    }

    #[test]
    fn missing_timestamps_are_null() {
        let object = ObjectSummary {
            key: "a.txt".to_string(),
            size: 3,
            last_modified: None,
            etag: None,
        };
        let json = serde_json::to_value(&object).unwrap();
        assert!(json["last_modified"].is_null());
        assert_eq!(json["size"], 3);
    }
}
