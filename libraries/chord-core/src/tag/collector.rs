//! Stock handler implementations

use super::{Fact, TagHandler, TagType};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Everything one scan extracted from a source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    /// Real playable location behind the source
    pub target_uri: Option<String>,

    /// Total playable duration (whole seconds on the wire)
    #[serde(with = "duration_secs", default)]
    pub duration: Option<Duration>,

    /// Tag values in the order they were reported
    pub tags: Vec<(TagType, String)>,

    /// Free-form fields in the order they were reported
    pub pairs: Vec<(String, String)>,
}

impl SourceDescriptor {
    /// First value of a tag kind
    pub fn tag(&self, kind: TagType) -> Option<&str> {
        self.tag_values(kind).next()
    }

    /// All values of a tag kind, in report order
    pub fn tag_values(&self, kind: TagType) -> impl Iterator<Item = &str> {
        self.tags
            .iter()
            .filter(move |(k, _)| *k == kind)
            .map(|(_, v)| v.as_str())
    }

    /// Last value reported for a free-form key
    pub fn pair(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// True when the scan produced nothing at all
    pub fn is_empty(&self) -> bool {
        self.target_uri.is_none()
            && self.duration.is_none()
            && self.tags.is_empty()
            && self.pairs.is_empty()
    }
}

/// Handler that accumulates every fact into a [`SourceDescriptor`]
#[derive(Debug, Default)]
pub struct TagCollector {
    descriptor: SourceDescriptor,
}

impl TagCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Facts collected so far
    pub fn descriptor(&self) -> &SourceDescriptor {
        &self.descriptor
    }

    pub fn into_descriptor(self) -> SourceDescriptor {
        self.descriptor
    }
}

impl TagHandler for TagCollector {
    fn wants(&self, _fact: Fact) -> bool {
        true
    }

    fn on_target_uri(&mut self, uri: &str) {
        self.descriptor.target_uri = Some(uri.to_string());
    }

    fn on_tag(&mut self, kind: TagType, value: &str) {
        self.descriptor.tags.push((kind, value.to_string()));
    }

    fn on_duration(&mut self, duration: Duration) {
        self.descriptor.duration = Some(duration);
    }

    fn on_pair(&mut self, key: &str, value: &str) {
        self.descriptor
            .pairs
            .push((key.to_string(), value.to_string()));
    }
}

/// Handler that only cares about duration
///
/// Used by callers that need a quick length probe before deciding whether
/// a full scan is worthwhile.
#[derive(Debug, Default, Clone, Copy)]
pub struct DurationProbe {
    duration: Option<Duration>,
}

impl DurationProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }
}

impl TagHandler for DurationProbe {
    fn wants(&self, fact: Fact) -> bool {
        fact == Fact::Duration
    }

    fn on_duration(&mut self, duration: Duration) {
        self.duration = Some(duration);
    }
}

/// Composite handler forwarding to two inner handlers
///
/// Each callback reaches only the inner handlers that want the fact.
#[derive(Debug, Default)]
pub struct FanOut<A, B> {
    pub first: A,
    pub second: B,
}

impl<A: TagHandler, B: TagHandler> FanOut<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    pub fn into_inner(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A: TagHandler, B: TagHandler> TagHandler for FanOut<A, B> {
    fn wants(&self, fact: Fact) -> bool {
        self.first.wants(fact) || self.second.wants(fact)
    }

    fn on_target_uri(&mut self, uri: &str) {
        if self.first.wants(Fact::TargetUri) {
            self.first.on_target_uri(uri);
        }
        if self.second.wants(Fact::TargetUri) {
            self.second.on_target_uri(uri);
        }
    }

    fn on_tag(&mut self, kind: TagType, value: &str) {
        if self.first.wants(Fact::Tag) {
            self.first.on_tag(kind, value);
        }
        if self.second.wants(Fact::Tag) {
            self.second.on_tag(kind, value);
        }
    }

    fn on_duration(&mut self, duration: Duration) {
        if self.first.wants(Fact::Duration) {
            self.first.on_duration(duration);
        }
        if self.second.wants(Fact::Duration) {
            self.second.on_duration(duration);
        }
    }

    fn on_pair(&mut self, key: &str, value: &str) {
        if self.first.wants(Fact::Pair) {
            self.first.on_pair(key, value);
        }
        if self.second.wants(Fact::Pair) {
            self.second.on_pair(key, value);
        }
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => s.serialize_some(&d.as_secs()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(d)?.map(Duration::from_secs))
    }
}
