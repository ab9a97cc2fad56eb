//! Wire format of the TalkMED search endpoint
//!
//! Only the fields the search front end reads are modelled; everything else in the
//! payload (covers, actions, speaker lists, ...) is ignored during deserialization.

use serde::{Deserialize, Deserializer, Serialize};
use std::result;

/// Top-level envelope returned by `/v1/pc/search`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// `0` on success
    pub code: i64,
    #[serde(default, alias = "msg")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: SearchData,
}

impl SearchResponse {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchData {
    #[serde(default)]
    pub course: Option<CourseCollection>,
    #[serde(default)]
    pub live: Option<LiveCollection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseCollection {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<RawCourse>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_more: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LiveCollection {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<RawLive>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCourse {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub price_type: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub original_price: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub learn_count_show: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub course_count: f64,
    #[serde(default)]
    pub tag_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLive {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub sub_title: Option<String>,
    #[serde(default)]
    pub des: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub start_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub end_at: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub live_status: f64,
    #[serde(default)]
    pub live_status_text: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
}

/// Treat an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept numbers, numeric strings and `null` (as zero)
///
/// The provider is not consistent: prices have been observed as `"99.00"` as well as `99`.
fn lenient_number<'de, D>(deserializer: D) -> result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_json::Value;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| D::Error::custom(format!("number out of range: {n}"))),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(0.0),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("expected a number, got \"{s}\""))),
        Some(Value::Bool(b)) => Ok(if b { 1.0 } else { 0.0 }),
        Some(other) => Err(D::Error::custom(format!("expected a number, got {other}"))),
    }
}
