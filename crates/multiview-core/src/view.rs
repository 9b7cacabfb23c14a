//! Icon collection and stream area state.
//!
//! Both collections are ordered and keyed by an explicit `SlotKey` identity
//! (site code + channel id).  Adding an entry whose identity already exists
//! removes the old entry first, so the collections never hold duplicates.

use crate::badge::BadgeColor;
use crate::channel::ChannelDescriptor;
use crate::embed::{EmbedError, EmbedRegistry};

/// Stable identity for icons and streams.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub site: String,
    pub channel: String,
}

impl SlotKey {
    pub fn new(site: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            site: site.into(),
            channel: channel.into(),
        }
    }
}

impl std::fmt::Display for SlotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.site, self.channel)
    }
}

/// A clickable channel badge.
#[derive(Debug, Clone, PartialEq)]
pub struct Icon {
    pub site: String,
    pub channel: String,
    pub name: String,
    pub image: String,
    pub color: BadgeColor,
}

impl Icon {
    pub fn from_descriptor(d: &ChannelDescriptor) -> Self {
        Self {
            site: d.site.clone(),
            channel: d.channel.clone(),
            name: d.name.clone(),
            image: d.icon.clone(),
            color: BadgeColor::from_channel(&d.channel),
        }
    }

    pub fn key(&self) -> SlotKey {
        SlotKey::new(self.site.clone(), self.channel.clone())
    }
}

/// Ordered collection of icons.
#[derive(Debug, Default)]
pub struct IconSet {
    icons: Vec<Icon>,
}

impl IconSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all icons with one per descriptor, preserving input order.
    pub fn load(&mut self, descriptors: &[ChannelDescriptor]) {
        if !self.icons.is_empty() {
            self.clear();
        }
        for d in descriptors {
            self.add(Icon::from_descriptor(d));
        }
    }

    /// Upsert by identity: an existing icon with the same key is removed
    /// before the new one is appended.
    pub fn add(&mut self, icon: Icon) {
        if let Some(pos) = self.find(&icon.key()) {
            self.icons.remove(pos);
        }
        self.icons.push(icon);
    }

    pub fn remove(&mut self, key: &SlotKey) -> Option<Icon> {
        let pos = self.find(key)?;
        Some(self.icons.remove(pos))
    }

    pub fn clear(&mut self) {
        self.icons.clear();
    }

    pub fn find(&self, key: &SlotKey) -> Option<usize> {
        self.icons.iter().position(|i| i.key() == *key)
    }

    pub fn get(&self, idx: usize) -> Option<&Icon> {
        self.icons.get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Icon> {
        self.icons.iter()
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

/// One embedded player slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Stream {
    pub site: String,
    pub channel: String,
    /// Native player aspect ratio, width : height.
    pub ratio: (u16, u16),
}

impl Default for Stream {
    fn default() -> Self {
        Self {
            site: String::new(),
            channel: String::new(),
            ratio: (16, 9),
        }
    }
}

impl Stream {
    pub fn new(site: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            site: site.into(),
            channel: channel.into(),
            ..Self::default()
        }
    }

    pub fn key(&self) -> SlotKey {
        SlotKey::new(self.site.clone(), self.channel.clone())
    }

    /// Iframe markup for this stream, via the injected registry.
    pub fn embed_html(&self, registry: &EmbedRegistry) -> Result<String, EmbedError> {
        registry.stream_html(&self.site, &self.channel)
    }

    /// The bare embed URL for this stream.
    pub fn embed_url(&self, registry: &EmbedRegistry) -> Result<String, EmbedError> {
        Ok(registry.get(&self.site)?.stream_url(&self.channel))
    }
}

/// Ordered collection of streams with a single active slot.
///
/// The active slot is what channel selections retarget; it is `None` only
/// while the area has never held a stream (or after it empties out).
#[derive(Debug, Default)]
pub struct StreamArea {
    streams: Vec<Stream>,
    active: Option<SlotKey>,
}

impl StreamArea {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert by identity; the added stream becomes the active one.
    pub fn add(&mut self, stream: Stream) {
        if let Some(pos) = self.find(&stream.key()) {
            self.streams.remove(pos);
        }
        self.active = Some(stream.key());
        self.streams.push(stream);
    }

    /// Remove by identity.  Removing the active stream promotes the most
    /// recently added remaining stream; an emptied area has no active slot.
    pub fn remove(&mut self, key: &SlotKey) -> Option<Stream> {
        let pos = self.find(key)?;
        let removed = self.streams.remove(pos);
        if self.active.as_ref() == Some(key) {
            self.active = self.streams.last().map(Stream::key);
        }
        Some(removed)
    }

    pub fn find(&self, key: &SlotKey) -> Option<usize> {
        self.streams.iter().position(|s| s.key() == *key)
    }

    pub fn active_key(&self) -> Option<&SlotKey> {
        self.active.as_ref()
    }

    pub fn active(&self) -> Option<&Stream> {
        let key = self.active.as_ref()?;
        let pos = self.find(key)?;
        self.streams.get(pos)
    }

    /// Mark an existing stream as the active slot.
    pub fn set_active(&mut self, key: &SlotKey) -> bool {
        if self.find(key).is_some() {
            self.active = Some(key.clone());
            true
        } else {
            false
        }
    }

    /// Point the active stream at a new provider/channel and re-add it.
    ///
    /// This is the channel-selection contract: the active stream's identity
    /// is overwritten in place (its other settings survive) rather than a new
    /// slot being allocated.  An empty area gets its first stream here.
    pub fn retarget_active(&mut self, site: &str, channel: &str) -> SlotKey {
        let mut stream = self
            .active
            .take()
            .and_then(|k| self.find(&k))
            .map(|pos| self.streams.remove(pos))
            .unwrap_or_default();
        stream.site = site.to_string();
        stream.channel = channel.to_string();
        let key = stream.key();
        self.add(stream);
        key
    }

    pub fn get(&self, idx: usize) -> Option<&Stream> {
        self.streams.get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stream> {
        self.streams.iter()
    }

    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(site: &str, channel: &str, name: &str) -> ChannelDescriptor {
        ChannelDescriptor {
            site: site.to_string(),
            channel: channel.to_string(),
            name: name.to_string(),
            icon: format!("{channel}.png"),
        }
    }

    #[test]
    fn load_with_empty_list_yields_empty_set() {
        let mut icons = IconSet::new();
        icons.load(&[descriptor("ttv", "a", "A")]);
        icons.load(&[]);
        assert!(icons.is_empty());
    }

    #[test]
    fn load_preserves_input_order_and_replaces_wholesale() {
        let mut icons = IconSet::new();
        icons.load(&[
            descriptor("ttv", "a", "A"),
            descriptor("ttv", "b", "B"),
            descriptor("ust", "c", "C"),
        ]);
        assert_eq!(icons.len(), 3);
        let order: Vec<&str> = icons.iter().map(|i| i.channel.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);

        icons.load(&[descriptor("htv", "z", "Z")]);
        assert_eq!(icons.len(), 1);
        assert_eq!(icons.get(0).map(|i| i.channel.as_str()), Some("z"));
    }

    #[test]
    fn icon_add_is_an_idempotent_upsert() {
        let mut icons = IconSet::new();
        let first = Icon::from_descriptor(&descriptor("ttv", "a", "old name"));
        let second = Icon::from_descriptor(&descriptor("ttv", "a", "new name"));
        icons.add(first);
        icons.add(second);
        assert_eq!(icons.len(), 1);
        assert_eq!(icons.get(0).map(|i| i.name.as_str()), Some("new name"));
    }

    #[test]
    fn icon_remove_detaches_by_identity() {
        let mut icons = IconSet::new();
        icons.load(&[descriptor("ttv", "a", "A"), descriptor("ttv", "b", "B")]);
        let removed = icons.remove(&SlotKey::new("ttv", "a"));
        assert_eq!(removed.map(|i| i.channel), Some("a".to_string()));
        assert_eq!(icons.len(), 1);
        assert!(icons.remove(&SlotKey::new("ttv", "a")).is_none());
    }

    #[test]
    fn stream_add_upserts_and_marks_active() {
        let mut area = StreamArea::new();
        assert!(area.active_key().is_none());

        area.add(Stream::new("ttv", "a"));
        area.add(Stream::new("ttv", "b"));
        assert_eq!(area.len(), 2);
        assert_eq!(area.active_key(), Some(&SlotKey::new("ttv", "b")));

        // re-adding an existing identity moves it to the end, still one entry
        area.add(Stream::new("ttv", "a"));
        assert_eq!(area.len(), 2);
        assert_eq!(area.active_key(), Some(&SlotKey::new("ttv", "a")));
        assert_eq!(area.get(1).map(|s| s.channel.as_str()), Some("a"));
    }

    #[test]
    fn selecting_a_channel_retargets_the_active_stream() {
        let mut area = StreamArea::new();
        area.add(Stream::new("ust", "old"));

        let key = area.retarget_active("ttv", "ABC");
        assert_eq!(key, SlotKey::new("ttv", "ABC"));
        assert_eq!(area.active_key(), Some(&SlotKey::new("ttv", "ABC")));
        assert_eq!(area.len(), 1);
        assert_eq!(area.find(&SlotKey::new("ttv", "ABC")), Some(0));
        assert!(area.find(&SlotKey::new("ust", "old")).is_none());
    }

    #[test]
    fn retarget_on_an_empty_area_creates_the_first_stream() {
        let mut area = StreamArea::new();
        let key = area.retarget_active("ttv", "foo");
        assert_eq!(area.len(), 1);
        assert_eq!(area.active_key(), Some(&key));
        assert_eq!(area.active().map(|s| s.ratio), Some((16, 9)));
    }

    #[test]
    fn retarget_keeps_other_streams_untouched() {
        let mut area = StreamArea::new();
        area.add(Stream::new("ttv", "side"));
        area.add(Stream::new("ust", "old"));

        area.retarget_active("yut", "clip");
        assert_eq!(area.len(), 2);
        assert!(area.find(&SlotKey::new("ttv", "side")).is_some());
        assert_eq!(area.active_key(), Some(&SlotKey::new("yut", "clip")));
    }

    #[test]
    fn removing_the_active_stream_promotes_the_newest_remaining() {
        let mut area = StreamArea::new();
        area.add(Stream::new("ttv", "a"));
        area.add(Stream::new("ttv", "b"));

        area.remove(&SlotKey::new("ttv", "b"));
        assert_eq!(area.active_key(), Some(&SlotKey::new("ttv", "a")));

        area.remove(&SlotKey::new("ttv", "a"));
        assert!(area.active_key().is_none());
        assert!(area.is_empty());
    }

    #[test]
    fn removing_an_inactive_stream_keeps_the_active_slot() {
        let mut area = StreamArea::new();
        area.add(Stream::new("ttv", "a"));
        area.add(Stream::new("ttv", "b"));

        area.remove(&SlotKey::new("ttv", "a"));
        assert_eq!(area.active_key(), Some(&SlotKey::new("ttv", "b")));
    }
}
