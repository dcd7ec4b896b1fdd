//! Topic model
//!
//! A `Topic` is a hierarchical routing key split on `/` into ordered,
//! non-empty segments. Empty segments are dropped while parsing, so
//! `"a/b"`, `"/a/b/"` and `"a//b"` all describe the same topic.
//!
//! Queues subscribe with a topic prefix: a subscription matches every
//! published topic that starts with the same segments. Segments are compared
//! as plain, case-sensitive strings. There are no wildcards.

use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Topic {
    segments: Vec<String>,
}

impl Topic {
    /// Parse a raw topic string. Never fails; `""` and `"/"` yield the empty
    /// topic, which as a subscription matches everything.
    pub fn parse(raw: &str) -> Self {
        Self {
            segments: raw
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns true if every segment of `self` equals the segment at the
    /// same position in `published`.
    pub fn is_prefix_of(&self, published: &Topic) -> bool {
        published.segments.starts_with(&self.segments)
    }
}

/// Decide whether a queue subscribed to `subscription` receives a message
/// published to `published`.
pub fn matches(subscription: &Topic, published: &Topic) -> bool {
    subscription.is_prefix_of(published)
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.segments.join("/"))
    }
}
