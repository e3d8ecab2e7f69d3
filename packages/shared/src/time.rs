//! Time helpers. All wall-clock values are reported in JST (UTC+9).

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};

/// JST is UTC+9
const JST_OFFSET_SECS: i32 = 9 * 3600;

/// Fixed offset for JST
pub fn jst_offset() -> FixedOffset {
    FixedOffset::east_opt(JST_OFFSET_SECS).expect("UTC+9 is a valid offset")
}

/// Current time in JST
pub fn now_jst() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&jst_offset())
}

/// Get current Unix timestamp in JST (milliseconds)
pub fn get_jst_timestamp() -> i64 {
    now_jst().timestamp_millis()
}

/// Convert a Unix timestamp in milliseconds to an RFC 3339 string in JST.
///
/// Returns an empty string if the timestamp is out of chrono's range.
pub fn timestamp_to_jst_rfc3339(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|utc| {
            utc.with_timezone(&jst_offset())
                .to_rfc3339_opts(SecondsFormat::Millis, false)
        })
        .unwrap_or_default()
}
