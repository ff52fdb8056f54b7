// SPDX-License-Identifier: MIT OR Apache-2.0

//! The wire shapes of a chat notification.

use crate::log_record::LogRecord;
use crate::sys::UNIX_EPOCH;
use crate::Level;
use serde::Serialize;

/// Values up to this many characters are shown side by side.
const SHORT_FIELD_THRESHOLD: usize = 20;

/// A webhook message: presentation settings plus a single attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_emoji: Option<String>,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretext: Option<String>,
    pub fallback: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
    /// Seconds since the epoch.
    pub ts: u64,
}

/// One context entry, shown as a titled value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub title: String,
    pub value: Option<String>,
    pub short: bool,
}

impl Field {
    pub fn new(title: impl Into<String>, value: Option<String>) -> Self {
        let short = value
            .as_ref()
            .is_none_or(|v| v.chars().count() <= SHORT_FIELD_THRESHOLD);
        Field {
            title: title.into(),
            value,
            short,
        }
    }
}

/// The attachment color for `level`, if it gets one.
pub fn level_color(level: Level) -> Option<&'static str> {
    match level {
        Level::Error => Some("danger"),
        Level::Warn => Some("warning"),
        Level::Info => Some("#439FE0"),
        Level::Debug | Level::Trace => None,
    }
}

/**
Renders `record` as `-- [LEVEL]logger - message`.

Continuation lines are indented with a tab.  An attached error goes on its own line.
*/
pub fn layout(record: &LogRecord) -> String {
    let mut message = record.formatted_message();
    if let Some(error) = record.error() {
        message.push('\n');
        message.push_str(&error.to_string());
    }
    format!(
        "-- [{}]{} - {}",
        record.level(),
        record.logger_name().unwrap_or(""),
        message.replace('\n', "\n\t")
    )
}

/// One field per context entry carried by the record's tags, in key order.
pub fn fields(record: &LogRecord) -> Vec<Field> {
    record
        .context()
        .iter()
        .map(|(key, value)| Field::new(key, value.map(str::to_string)))
        .collect()
}

/**
The attachment for `record`.

A layout spanning several lines shows its first line as the pretext and the rest as the text.
*/
pub fn attachment(record: &LogRecord) -> Attachment {
    let rendered = layout(record);
    let (pretext, text) = match rendered.split_once('\n') {
        Some((first, rest)) if !rest.trim().is_empty() => {
            (Some(first.to_string()), rest.to_string())
        }
        Some((first, _)) => (None, first.to_string()),
        None => (None, rendered.clone()),
    };
    let fallback = match &pretext {
        Some(first) => first.clone(),
        None => text.clone(),
    };
    let ts = record
        .timestamp()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    Attachment {
        pretext,
        fallback,
        color: level_color(record.level()),
        text,
        fields: fields(record),
        ts,
    }
}
