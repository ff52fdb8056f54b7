// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat notifications for log records.
//!
//! [`NotifyLogger`] turns records into chat messages: either a JSON webhook payload or a
//! form-encoded API call.  Context carried by the record's tags becomes a list of titled fields.
//! Sending the bytes is left to a [`Transport`].
//!
//! Which records are delivered is decided by the `SLACK` and `NO_SLACK` markers:
//!
//! * a tag containing `SLACK` is always delivered,
//! * otherwise a record is delivered when its level reaches the configured threshold, unless its
//!   tag contains `NO_SLACK`.
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use std::time::Duration;
//! use tagwise::notify::{NotifyConfig, NotifyLogger, Transport};
//! use tagwise::{ContextMap, DeliveryError, TaggedLogger};
//!
//! #[derive(Debug, Default)]
//! struct Outbox(Mutex<Vec<String>>);
//!
//! impl Transport for Outbox {
//!     fn post(&self, _uri: &str, _content_type: &str, body: &[u8], _timeout: Duration) -> Result<(), DeliveryError> {
//!         self.0.lock().unwrap().push(String::from_utf8_lossy(body).into_owned());
//!         Ok(())
//!     }
//! }
//!
//! let config = NotifyConfig::from_json(r#"{"webhook_uri": "https://hooks.example.com/T000"}"#).unwrap();
//! let sink = Arc::new(NotifyLogger::new(config, Outbox::default()));
//! let logger = TaggedLogger::with_context(sink.clone(), &ContextMap::from([("host", "db-1")]));
//!
//! logger.info("routine", ());
//! logger.error("replica lagging", ());
//!
//! let sent = sink.transport().0.lock().unwrap().clone();
//! assert_eq!(sent.len(), 1);
//! assert!(sent[0].contains(r#""title":"host""#));
//! ```

mod payload;

pub use payload::{Attachment, Field, Payload, attachment, fields, layout, level_color};

use crate::arg::Arg;
use crate::error::DeliveryError;
use crate::log_record::LogRecord;
use crate::logger::{Capabilities, Logger};
use crate::stderror_logger::StdErrorLogger;
use crate::sys::Duration;
use crate::tag::Tag;
use crate::tag::names::{NO_SLACK, SLACK};
use crate::Level;
use serde::Deserialize;
use std::error::Error;
use std::fmt::Debug;
use url::Url;
use url::form_urlencoded;

/// Where token-mode messages are posted.
pub const API_URL: &str = "https://slack.com/api/chat.postMessage";

/**
Sends an encoded notification somewhere.

Implementations should give up after `timeout`.
*/
pub trait Transport: Debug + Send + Sync {
    fn post(
        &self,
        uri: &str,
        content_type: &str,
        body: &[u8],
        timeout: Duration,
    ) -> Result<(), DeliveryError>;
}

/**
Configuration for a [NotifyLogger].

When `webhook_uri` is set it is used; otherwise `token` selects the API mode.  With neither,
records are ignored.
*/
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    pub webhook_uri: Option<String>,
    pub token: Option<String>,
    pub channel: Option<String>,
    pub username: Option<String>,
    /// An emoji name, with or without colons, or an absolute http(s) URL of an image.
    pub icon_emoji: Option<String>,
    pub timeout_ms: u64,
    /// Records below this level need the `SLACK` marker to be delivered.
    pub threshold: Level,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            webhook_uri: None,
            token: None,
            channel: None,
            username: None,
            icon_emoji: None,
            timeout_ms: 30_000,
            threshold: Level::Warn,
        }
    }
}

impl NotifyConfig {
    pub fn from_json(text: &str) -> Result<NotifyConfig, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}

fn is_http_url(text: &str) -> bool {
    match Url::parse(text) {
        Ok(url) => url.scheme().starts_with("http"),
        Err(_) => false,
    }
}

fn wrap_emoji(icon: &str) -> String {
    let mut emoji = String::with_capacity(icon.len() + 2);
    if !icon.starts_with(':') {
        emoji.push(':');
    }
    emoji.push_str(icon);
    if !icon.ends_with(':') {
        emoji.push(':');
    }
    emoji
}

/**
A logger that forwards records to a chat channel through a [Transport].

Delivery problems are reported on stderr and never reach the logging call.
*/
#[derive(Debug)]
pub struct NotifyLogger<T> {
    config: NotifyConfig,
    transport: T,
    diagnostics: StdErrorLogger,
}

impl<T: Transport> NotifyLogger<T> {
    pub fn new(config: NotifyConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            diagnostics: StdErrorLogger::new().named("tagwise::notify"),
        }
    }

    pub fn config(&self) -> &NotifyConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Whether a record at `level` carrying `tag` would be delivered.
    pub fn accepts(&self, level: Level, tag: Option<&Tag>) -> bool {
        let marked = |name: &str| tag.is_some_and(|t| t.contains(name));
        if marked(SLACK) {
            return true;
        }
        level >= self.config.threshold && !marked(NO_SLACK)
    }

    /// The webhook payload for `record`.
    pub fn payload(&self, record: &LogRecord) -> Payload {
        let (icon_url, icon_emoji) = match non_blank(&self.config.icon_emoji) {
            Some(icon) if is_http_url(&icon) => (Some(icon), None),
            Some(icon) => (None, Some(wrap_emoji(&icon))),
            None => (None, None),
        };
        Payload {
            channel: non_blank(&self.config.channel),
            username: non_blank(&self.config.username),
            icon_url,
            icon_emoji,
            attachments: vec![attachment(record)],
        }
    }

    /// The form-encoded API call for `record`.
    pub fn form_body(&self, token: &str, record: &LogRecord) -> Result<String, DeliveryError> {
        let rendered = layout(record);
        let (first, rest) = match rendered.split_once('\n') {
            Some((first, rest)) => (first, Some(rest)),
            None => (rendered.as_str(), None),
        };
        let mut form = form_urlencoded::Serializer::new(String::new());
        form.append_pair("token", token);
        form.append_pair("text", first);
        if let Some(rest) = rest {
            let attachments = serde_json::to_string(&[serde_json::json!({ "text": rest })])?;
            form.append_pair("attachments", &attachments);
        }
        if let Some(channel) = &self.config.channel {
            form.append_pair("channel", channel);
        }
        if let Some(username) = &self.config.username {
            form.append_pair("username", username);
        }
        if let Some(icon) = &self.config.icon_emoji {
            let icon = if icon.starts_with(':') && !icon.ends_with(':') {
                format!("{}:", icon)
            } else {
                icon.clone()
            };
            form.append_pair("icon_emoji", &icon);
        }
        Ok(form.finish())
    }

    /**
    Encodes `record` and hands it to the transport.

    Does nothing when neither a webhook nor a token is configured.
    */
    pub fn deliver(&self, record: &LogRecord) -> Result<(), DeliveryError> {
        let timeout = self.config.timeout();
        if let Some(uri) = &self.config.webhook_uri {
            let body = serde_json::to_vec(&self.payload(record))?;
            self.transport
                .post(uri, "application/json", &body, timeout)
        } else if let Some(token) = &self.config.token {
            let body = self.form_body(token, record)?;
            self.transport.post(
                API_URL,
                "application/x-www-form-urlencoded",
                body.as_bytes(),
                timeout,
            )
        } else {
            Ok(())
        }
    }

    fn deliver_or_report(&self, record: &LogRecord) {
        if !self.accepts(record.level(), record.combined_tag().as_ref()) {
            return;
        }
        if let Err(e) = self.deliver(record) {
            let e: &(dyn Error + 'static) = &e;
            let channel = self.config.channel.as_deref().unwrap_or("");
            self.diagnostics.log(
                Level::Error,
                None,
                "Error posting log to Slack ({}): {}",
                &[Arg::new(channel.to_string()), Arg::new(layout(record))],
                Some(e),
            );
        }
    }
}

impl<T: Transport> Logger for NotifyLogger<T> {
    fn name(&self) -> &str {
        "notify"
    }

    fn is_enabled(&self, level: Level, tag: Option<&Tag>) -> bool {
        self.accepts(level, tag)
    }

    fn log(
        &self,
        level: Level,
        tag: Option<&Tag>,
        message: &str,
        args: &[Arg],
        error: Option<&(dyn Error + 'static)>,
    ) {
        let mut record = LogRecord::new(level, message)
            .with_logger_name(self.name())
            .with_args(args.to_vec());
        if let Some(tag) = tag {
            record = record.with_tag(tag.clone());
        }
        if let Some(error) = error {
            // the borrowed error can't be kept, its text is enough here
            record = record.with_error(std::sync::Arc::new(RenderedError(error.to_string())));
        }
        self.deliver_or_report(&record);
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            records: true,
            location: false,
        }
    }

    fn submit(&self, record: LogRecord) {
        let record = match record.logger_name() {
            Some(_) => record,
            None => record.with_logger_name(self.name()),
        };
        self.deliver_or_report(&record);
    }
}

#[derive(Debug)]
struct RenderedError(String);

impl std::fmt::Display for RenderedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Error for RenderedError {}
