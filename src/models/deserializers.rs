use chrono::{DateTime, Utc};
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Custom deserializer for timestamp that accepts both integers (ms) and RFC3339 strings
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Number(n) => {
            // Unix timestamp in milliseconds
            let ms = n.as_i64().ok_or_else(|| Error::custom("invalid timestamp"))?;
            DateTime::from_timestamp_millis(ms)
                .ok_or_else(|| Error::custom("timestamp out of range"))
        }
        Value::String(s) => s
            .parse::<DateTime<Utc>>()
            .map_err(|e| Error::custom(format!("invalid RFC3339 timestamp: {}", e))),
        _ => Err(Error::custom("timestamp must be a number or string")),
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use crate::models::SearchHistoryEntry;

    #[test]
    fn test_history_entry_timestamp_integer() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "query": "cook pasta",
            "timestamp": 1762076480016
        }"#;

        let entry: SearchHistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.query, "cook pasta");

        let expected_ts = DateTime::from_timestamp_millis(1762076480016).unwrap();
        assert_eq!(entry.timestamp, expected_ts);
    }

    #[test]
    fn test_history_entry_timestamp_rfc3339() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440001",
            "query": "espresso",
            "timestamp": "2025-11-02T09:41:20.016Z"
        }"#;

        let entry: SearchHistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.query, "espresso");
        assert_eq!(entry.timestamp.timestamp_millis(), 1762076480016);
    }

    #[test]
    fn test_history_entry_rejects_boolean_timestamp() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440002",
            "query": "espresso",
            "timestamp": true
        }"#;

        assert!(serde_json::from_str::<SearchHistoryEntry>(json).is_err());
    }

    #[test]
    fn test_history_entry_roundtrip_keeps_timestamp() {
        let entry = SearchHistoryEntry::new("tire");
        let json = serde_json::to_string(&entry).unwrap();
        let back: SearchHistoryEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
