// Wire types of the timeseries API response
use serde::{Deserialize, Deserializer};

pub const REQUEST_SUCCEEDED: &str = "REQUEST_SUCCEEDED";

#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub status: String,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(rename = "Results", default)]
    pub results: Option<Results>,
}

/// The API sends a list of messages; a bare string is accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Message {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Deserialize)]
pub struct Results {
    #[serde(default)]
    pub series: Vec<RawSeries>,
}

#[derive(Debug, Deserialize)]
pub struct RawSeries {
    #[serde(rename = "seriesID")]
    pub series_id: String,
    #[serde(default)]
    pub data: Vec<RawObservation>,
}

#[derive(Debug, Deserialize)]
pub struct RawObservation {
    #[serde(deserialize_with = "de_value")]
    pub value: f64,
    #[serde(default)]
    pub period: Option<String>,
}

impl Envelope {
    pub fn succeeded(&self) -> bool {
        self.status == REQUEST_SUCCEEDED
    }

    /// Text of the envelope's message, or "Unknown error" when it carries none.
    pub fn diagnostic(&self) -> String {
        let text = match &self.message {
            Some(Message::One(m)) => m.trim().to_string(),
            Some(Message::Many(ms)) => ms
                .iter()
                .map(|m| m.trim())
                .filter(|m| !m.is_empty())
                .collect::<Vec<_>>()
                .join("; "),
            None => String::new(),
        };
        if text.is_empty() {
            "Unknown error".to_string()
        } else {
            text
        }
    }
}

fn de_value<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(n),
        NumberOrText::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("non-numeric observation value {s:?}"))),
    }
}
