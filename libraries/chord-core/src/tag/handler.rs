/// Tag Handler Protocol
use super::TagType;
use std::time::Duration;

/// Facts a handler can declare interest in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fact {
    /// The real playable location behind a metadata source
    TargetUri,
    /// Dedicated tag values
    Tag,
    /// Total playable duration
    Duration,
    /// Free-form key/value pairs
    Pair,
}

/// Sink that receives the facts a scan extracts from one source
///
/// Handlers are owned by the caller of a scan and are never shared between
/// concurrent scans. Scans never branch on handler behavior, so every
/// callback returns nothing.
///
/// All callbacks have no-op defaults and [`wants`](Self::wants) defaults to
/// `true`, so a test double overrides only the callbacks it observes.
///
/// Scanners may consult `wants` to skip expensive derivations, but they are
/// not required to: calls for facts a handler did not ask for must be
/// harmless.
pub trait TagHandler {
    /// Whether this handler wants to receive `fact`
    fn wants(&self, fact: Fact) -> bool {
        let _ = fact;
        true
    }

    /// Record the real playable location behind this source
    fn on_target_uri(&mut self, uri: &str) {
        let _ = uri;
    }

    /// Append one tag value
    ///
    /// A kind may arrive more than once. Handlers that care about ordering
    /// must preserve invocation order.
    fn on_tag(&mut self, kind: TagType, value: &str) {
        let _ = (kind, value);
    }

    /// Record the total playable duration; the last call wins
    fn on_duration(&mut self, duration: Duration) {
        let _ = duration;
    }

    /// Record a field that has no dedicated tag kind
    fn on_pair(&mut self, key: &str, value: &str) {
        let _ = (key, value);
    }
}

impl<H: TagHandler + ?Sized> TagHandler for &mut H {
    fn wants(&self, fact: Fact) -> bool {
        (**self).wants(fact)
    }

    fn on_target_uri(&mut self, uri: &str) {
        (**self).on_target_uri(uri);
    }

    fn on_tag(&mut self, kind: TagType, value: &str) {
        (**self).on_tag(kind, value);
    }

    fn on_duration(&mut self, duration: Duration) {
        (**self).on_duration(duration);
    }

    fn on_pair(&mut self, key: &str, value: &str) {
        (**self).on_pair(key, value);
    }
}

impl<H: TagHandler + ?Sized> TagHandler for Box<H> {
    fn wants(&self, fact: Fact) -> bool {
        (**self).wants(fact)
    }

    fn on_target_uri(&mut self, uri: &str) {
        (**self).on_target_uri(uri);
    }

    fn on_tag(&mut self, kind: TagType, value: &str) {
        (**self).on_tag(kind, value);
    }

    fn on_duration(&mut self, duration: Duration) {
        (**self).on_duration(duration);
    }

    fn on_pair(&mut self, key: &str, value: &str) {
        (**self).on_pair(key, value);
    }
}
