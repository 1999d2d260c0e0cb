//! Disconnect message synthesis.
//!
//! A [`StyledMessage`] is an ordered list of [`Segment`]s with cosmetic
//! emphasis. Hosts render it either as plain text ([`StyledMessage::to_plain`])
//! or as a JSON chat component ([`StyledMessage::to_json`]).

use serde_json::{Map, Value, json};
use std::fmt;

use crate::verification::VerificationOutcome;

/// Emphasis color of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextColor {
    #[default]
    White,
    Gold,
    Green,
    Red,
}

impl TextColor {
    /// Chat component color name.
    pub fn name(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Gold => "gold",
            Self::Green => "green",
            Self::Red => "red",
        }
    }
}

/// A run of text with uniform emphasis.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Segment {
    pub text: String,
    pub color: TextColor,
    pub bold: bool,
    /// URL opened when the segment is clicked.
    pub click_url: Option<String>,
}

/// Ordered styled text shown to the player on disconnect.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledMessage {
    segments: Vec<Segment>,
}

impl StyledMessage {
    /// Empty message; build it up with the appending methods.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append unstyled text.
    pub fn plain(self, text: impl Into<String>) -> Self {
        self.push(Segment {
            text: text.into(),
            ..Segment::default()
        })
    }

    /// Append colored text.
    pub fn colored(self, text: impl Into<String>, color: TextColor) -> Self {
        self.push(Segment {
            text: text.into(),
            color,
            ..Segment::default()
        })
    }

    /// Append bold colored text.
    pub fn bold(self, text: impl Into<String>, color: TextColor) -> Self {
        self.push(Segment {
            text: text.into(),
            color,
            bold: true,
            click_url: None,
        })
    }

    /// Append clickable colored text opening `url`.
    pub fn link(self, text: impl Into<String>, url: impl Into<String>, color: TextColor) -> Self {
        self.push(Segment {
            text: text.into(),
            color,
            bold: false,
            click_url: Some(url.into()),
        })
    }

    fn push(mut self, segment: Segment) -> Self {
        if !segment.text.is_empty() {
            self.segments.push(segment);
        }
        self
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// URLs carried by clickable segments, in order.
    pub fn links(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| s.click_url.as_deref())
    }

    /// Literal text. Link segments show their URL in parentheses unless the
    /// text already is the URL.
    pub fn to_plain(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            out.push_str(&segment.text);
            if let Some(url) = &segment.click_url
                && url != &segment.text
            {
                out.push_str(" (");
                out.push_str(url);
                out.push(')');
            }
        }
        out
    }

    /// Chat component: `{"text":"","extra":[...]}`.
    pub fn to_json(&self) -> Value {
        let extra: Vec<Value> = self.segments.iter().map(segment_json).collect();
        json!({ "text": "", "extra": extra })
    }
}

fn segment_json(segment: &Segment) -> Value {
    let mut obj = Map::new();
    obj.insert("text".into(), Value::String(segment.text.clone()));
    obj.insert("color".into(), Value::String(segment.color.name().into()));
    if segment.bold {
        obj.insert("bold".into(), Value::Bool(true));
    }
    if let Some(url) = &segment.click_url {
        obj.insert(
            "clickEvent".into(),
            json!({ "action": "open_url", "value": url }),
        );
    }
    Value::Object(obj)
}

impl fmt::Display for StyledMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_plain())
    }
}

/// Disconnect message for a verification outcome.
pub fn render(outcome: &VerificationOutcome) -> StyledMessage {
    match outcome {
        VerificationOutcome::Issued { code, signup_url } => StyledMessage::new()
            .plain("Your verification code is ")
            .bold(code, TextColor::Gold)
            .plain(". Go to ")
            .link(signup_url, signup_url, TextColor::Green)
            .plain(" to finish your registration."),
        VerificationOutcome::AlreadyRegistered { login_url } => StyledMessage::new()
            .plain("You have already signed up for an account. You may log in ")
            .link("here", login_url, TextColor::Gold)
            .plain("."),
        VerificationOutcome::RemoteError {
            status,
            error_text,
            message_text,
        } => StyledMessage::new()
            .plain("An error occurred. Status: ")
            .colored(status.to_string(), TextColor::Red)
            .plain(". Message: ")
            .colored(message_text.as_deref().unwrap_or(error_text.as_str()), TextColor::Red)
            .plain("."),
        VerificationOutcome::TransportFailure { cause } => unexpected(cause),
        VerificationOutcome::MalformedResponse { raw_body } => unexpected(raw_body),
    }
}

/// Longest error detail, in characters, shown to the player.
const MAX_DETAIL_CHARS: usize = 256;

fn unexpected(detail: &str) -> StyledMessage {
    StyledMessage::new()
        .plain("An unexpected error occurred: ")
        .colored(truncate_detail(detail), TextColor::Red)
        .plain(".")
}

fn truncate_detail(detail: &str) -> String {
    match detail.char_indices().nth(MAX_DETAIL_CHARS) {
        Some((cut, _)) => format!("{}…", &detail[..cut]),
        None => detail.to_string(),
    }
}
