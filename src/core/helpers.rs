use chrono::{DateTime, NaiveDateTime, Utc};

pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Parse a backend timestamp. Accepts RFC 3339 and the naive UTC form
/// (`2024-05-01T10:00:00.123456`) the service emits.
pub fn parse_timestamp(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map_err(|e| anyhow::anyhow!("Invalid timestamp {:?}: {}", raw, e))?;
    Ok(naive.and_utc())
}

/// Serde adapter for [`parse_timestamp`]; writes RFC 3339.
pub mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&ts.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}

/// "5m ago", "3h ago", "2d ago". Future timestamps count as zero minutes.
pub fn format_relative_time(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - ts).num_minutes().max(0);
    let hours = minutes / 60;

    if minutes < 60 {
        format!("{}m ago", minutes)
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else {
        format!("{}d ago", hours / 24)
    }
}

pub fn avatar_initial(username: &str) -> String {
    username
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}

/// Trimmed content, or `None` when nothing would be sent.
pub fn non_blank(content: &str) -> Option<&str> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
