//! Blocking HTTP client for the wellness backend.
//!
//! Every call is a single request: no retry, no caching. Failures are
//! returned to the caller, which decides whether to show them or fall back.

use crate::config::{ApiConfig, CheckinFormat};
use crate::{Emotion, Error, MoodLevel, MoodTrend, Quote, Result};
use reqwest::blocking::{Client, Response};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Mood check-in body in one of the two encodings seen in the wild
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum MoodCheckin {
    Label {
        mood: String,
    },
    Scored {
        mood_value: String,
        mood_score: i32,
        notes: Option<String>,
    },
}

impl MoodCheckin {
    pub fn from_emotion(emotion: Emotion) -> Self {
        MoodCheckin::Label {
            mood: emotion.label().to_string(),
        }
    }

    /// Encode a rated mood in the requested format
    ///
    /// The label encoding has nowhere to put notes; they are dropped with a
    /// warning.
    pub fn from_level(format: CheckinFormat, level: MoodLevel, notes: Option<String>) -> Self {
        match format {
            CheckinFormat::Label => {
                if notes.is_some() {
                    tracing::warn!("Label check-ins cannot carry notes; dropping them");
                }
                MoodCheckin::Label {
                    mood: level.label().to_string(),
                }
            }
            CheckinFormat::Scored => MoodCheckin::Scored {
                mood_value: level.label().to_string(),
                mood_score: level.value(),
                notes,
            },
        }
    }
}

/// Thin wrapper over the backend endpoints
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a motivational quote
    pub fn fetch_affirmation(&self) -> Result<Quote> {
        let value = self.get_json("/affirmation-quote")?;
        parse_quote(&value).ok_or_else(|| {
            Error::Other(format!("Unrecognised affirmation response: {}", value))
        })
    }

    /// Fetch journal prompts, whatever shape the backend answers with
    pub fn fetch_journal_prompts(&self) -> Result<Vec<String>> {
        let value = self.get_json("/journal-prompt")?;
        Ok(normalize_prompts(value))
    }

    /// Submit a mood check-in, returning the backend's reply
    pub fn post_mood(&self, checkin: &MoodCheckin) -> Result<Value> {
        self.post_json("/mood-checkin", Some(checkin))
    }

    /// Fetch the per-day averages for the past week
    pub fn fetch_mood_trend(&self) -> Result<MoodTrend> {
        let value = self.get_json("/moods/weekly-trend")?;
        Ok(serde_json::from_value(value)?)
    }

    /// Ask the backend for a cognitive-support insight
    pub fn fetch_cognitive_insight(&self) -> Result<Value> {
        self.post_json::<Value>("/cognitiveSupport", None)
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn get_json(&self, endpoint: &str) -> Result<Value> {
        tracing::debug!("GET {}", endpoint);
        let response = self.client.get(self.url(endpoint)).send()?;
        let value = check_status(response, endpoint)?.json::<Value>()?;
        tracing::debug!("{} responded with {}", endpoint, value);
        Ok(value)
    }

    fn post_json<B: Serialize>(&self, endpoint: &str, body: Option<&B>) -> Result<Value> {
        tracing::debug!("POST {}", endpoint);
        let mut request = self.client.post(self.url(endpoint));
        if let Some(body) = body {
            request = request.json(body);
        } else {
            request = request.header(reqwest::header::CONTENT_TYPE, "application/json");
        }
        let response = request.send()?;
        let value = check_status(response, endpoint)?.json::<Value>()?;
        tracing::debug!("{} responded with {}", endpoint, value);
        Ok(value)
    }
}

fn check_status(response: Response, endpoint: &str) -> Result<Response> {
    let status = response.status();
    if !status.is_success() {
        tracing::warn!("{} returned {}", endpoint, status);
        return Err(Error::Api {
            status: status.as_u16(),
            endpoint: endpoint.to_string(),
        });
    }
    Ok(response)
}

/// Flatten the journal-prompt response into a list
///
/// Accepts an array, `{"prompts": [...]}`, `{"prompt": "..."}` or a bare
/// string. Anything else yields an empty list.
pub fn normalize_prompts(value: Value) -> Vec<String> {
    fn strings(items: Vec<Value>) -> Vec<String> {
        items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect()
    }

    match value {
        Value::Array(items) => strings(items),
        Value::Object(mut map) => {
            if let Some(Value::Array(items)) = map.remove("prompts") {
                return strings(items);
            }
            match map.remove("prompt") {
                Some(Value::String(s)) if !s.is_empty() => vec![s],
                Some(Value::Array(items)) => strings(items),
                _ => Vec::new(),
            }
        }
        Value::String(s) => vec![s],
        _ => Vec::new(),
    }
}

/// Pull a quote out of a bare string, `{text, author}`, `{affirmation}` or `{quote}`
pub fn parse_quote(value: &Value) -> Option<Quote> {
    match value {
        Value::String(s) if !s.is_empty() => Some(Quote {
            text: s.clone(),
            author: None,
        }),
        Value::Object(map) => {
            let text = ["text", "affirmation", "quote"]
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str))?;
            let author = map.get("author").and_then(Value::as_str).map(String::from);
            Some(Quote {
                text: text.to_string(),
                author,
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::JoinHandle;

    /// Serve a single canned response and hand back the raw request
    fn serve_once(status: &str, body: &str) -> (ApiConfig, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );

        let handle = std::thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut request = String::new();
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if let Some(len) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                    content_length = len.trim().parse().unwrap();
                }
                request.push_str(&line);
                if line == "\r\n" || line.is_empty() {
                    break;
                }
            }
            let mut body = vec![0u8; content_length];
            reader.read_exact(&mut body).unwrap();
            request.push_str(&String::from_utf8(body).unwrap());

            let mut stream = reader.into_inner();
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            request
        });

        let config = ApiConfig {
            base_url: format!("http://{}/", addr),
            timeout_secs: 5,
            checkin_format: None,
        };
        (config, handle)
    }

    #[test]
    fn test_normalize_prompt_shapes() {
        assert_eq!(normalize_prompts(json!(["a", "b"])), vec!["a", "b"]);
        assert_eq!(normalize_prompts(json!({"prompts": ["c"]})), vec!["c"]);
        assert_eq!(normalize_prompts(json!({"prompt": "d"})), vec!["d"]);
        assert_eq!(normalize_prompts(json!("e")), vec!["e"]);
        assert!(normalize_prompts(json!({"prompt": ""})).is_empty());
        assert!(normalize_prompts(json!({"other": 1})).is_empty());
        assert!(normalize_prompts(json!(42)).is_empty());
    }

    #[test]
    fn test_parse_quote_shapes() {
        assert_eq!(
            parse_quote(&json!({"text": "Keep going", "author": "Unknown"})),
            Some(Quote {
                text: "Keep going".into(),
                author: Some("Unknown".into())
            })
        );
        assert_eq!(parse_quote(&json!({"affirmation": "I am enough"})).unwrap().text, "I am enough");
        assert_eq!(parse_quote(&json!("Breathe")).unwrap().author, None);
        assert_eq!(parse_quote(&json!({"message": "hi"})), None);
    }

    #[test]
    fn test_checkin_encodings() {
        let label = MoodCheckin::from_emotion(Emotion::Calm);
        assert_eq!(serde_json::to_value(&label).unwrap(), json!({"mood": "Calm"}));

        let scored = MoodCheckin::from_level(
            CheckinFormat::Scored,
            MoodLevel::Good,
            Some("slept well".into()),
        );
        assert_eq!(
            serde_json::to_value(&scored).unwrap(),
            json!({"mood_value": "Good", "mood_score": 4, "notes": "slept well"})
        );

        let label_level = MoodCheckin::from_level(CheckinFormat::Label, MoodLevel::Low, None);
        assert_eq!(serde_json::to_value(&label_level).unwrap(), json!({"mood": "Low"}));
    }

    #[test]
    fn test_fetch_prompts_over_http() {
        let (config, server) = serve_once("200 OK", r#"{"prompt":"What made you smile?"}"#);
        let client = ApiClient::new(&config).unwrap();

        let prompts = client.fetch_journal_prompts().unwrap();
        assert_eq!(prompts, vec!["What made you smile?"]);

        let request = server.join().unwrap();
        assert!(request.starts_with("GET /journal-prompt HTTP/1.1"));
    }

    #[test]
    fn test_post_mood_sends_body() {
        let (config, server) = serve_once("200 OK", r#"{"message":"Mood recorded"}"#);
        let client = ApiClient::new(&config).unwrap();

        let reply = client
            .post_mood(&MoodCheckin::from_emotion(Emotion::Happy))
            .unwrap();
        assert_eq!(reply["message"], "Mood recorded");

        let request = server.join().unwrap();
        assert!(request.starts_with("POST /mood-checkin HTTP/1.1"));
        assert!(request.ends_with(r#"{"mood":"Happy"}"#));
    }

    #[test]
    fn test_non_success_status_is_api_error() {
        let (config, server) = serve_once("500 Internal Server Error", "{}");
        let client = ApiClient::new(&config).unwrap();

        let err = client.fetch_mood_trend().unwrap_err();
        assert!(matches!(
            err,
            Error::Api { status: 500, ref endpoint } if endpoint == "/moods/weekly-trend"
        ));
        server.join().unwrap();
    }

    #[test]
    fn test_fetch_trend_over_http() {
        let (config, server) = serve_once(
            "200 OK",
            r#"{"trend":[{"date":"2024-05-07","average_score":3.67,"count":3}]}"#,
        );
        let client = ApiClient::new(&config).unwrap();

        let trend = client.fetch_mood_trend().unwrap();
        assert_eq!(trend.trend.len(), 1);
        assert_eq!(trend.trend[0].count, 3);
        server.join().unwrap();
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = ApiConfig {
            base_url: "http://localhost:8000/".into(),
            ..ApiConfig::default()
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }
}
