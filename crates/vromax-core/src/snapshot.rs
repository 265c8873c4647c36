//! Pre-toggle style snapshots.
//!
//! Before the toggle engine mutates an element it records the style values
//! it is about to clobber. Capture is first-write-wins within an expansion
//! cycle: a second expand without an intervening restore must not overwrite
//! the original values with already-mutated ones. That rule is what makes
//! repeated expansion idempotent. The store is cleared when a restore
//! completes so the next cycle captures fresh values (the host restyles
//! panels between cycles).
//!
//! Keys are generic: the web adapter uses DOM `Element`s compared by
//! identity, tests use plain integers. Entries number a handful per page, so
//! a linear vec beats hashing types that aren't `Hash`.

/// Style properties the toggle engine touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleProp {
    Width,
    Height,
    Display,
    Flex,
    Overflow,
}

impl StyleProp {
    #[must_use]
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::Width => "width",
            Self::Height => "height",
            Self::Display => "display",
            Self::Flex => "flex",
            Self::Overflow => "overflow",
        }
    }
}

/// How a property's prior value is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode {
    /// Record the inline declaration only. Restoring the empty string then
    /// removes the override and the host's stylesheet takes back over,
    /// which is right for values the host manages through CSS rules
    /// (panel widths).
    InlineOnly,
    /// Record the inline declaration, falling back to the computed value, so
    /// restoration cannot regress to a wrong default when the original state
    /// came from a CSS rule (chrome display, heights).
    InlineOrComputed,
}

/// Properties captured for the sidebar/first panel.
pub const FIRST_PANEL_PROPS: &[(StyleProp, CaptureMode)] = &[
    (StyleProp::Width, CaptureMode::InlineOnly),
    (StyleProp::Display, CaptureMode::InlineOnly),
    (StyleProp::Height, CaptureMode::InlineOrComputed),
    (StyleProp::Flex, CaptureMode::InlineOrComputed),
];

/// Properties captured for the second panel.
pub const SECOND_PANEL_PROPS: &[(StyleProp, CaptureMode)] = &[
    (StyleProp::Width, CaptureMode::InlineOnly),
    (StyleProp::Display, CaptureMode::InlineOnly),
    (StyleProp::Height, CaptureMode::InlineOrComputed),
];

/// Properties captured for the gutter between panels.
pub const GUTTER_PROPS: &[(StyleProp, CaptureMode)] =
    &[(StyleProp::Display, CaptureMode::InlineOnly)];

/// Properties captured for chrome elements (toolbars, tab strips, …).
pub const CHROME_PROPS: &[(StyleProp, CaptureMode)] = &[
    (StyleProp::Display, CaptureMode::InlineOrComputed),
    (StyleProp::Height, CaptureMode::InlineOrComputed),
    (StyleProp::Overflow, CaptureMode::InlineOrComputed),
];

/// Properties captured for the editor container and the editor itself.
pub const EDITOR_PROPS: &[(StyleProp, CaptureMode)] =
    &[(StyleProp::Height, CaptureMode::InlineOrComputed)];

/// Recorded prior values for one element. `None` means "was not captured",
/// not "was empty"; only captured properties are reapplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleRecord {
    pub width: Option<String>,
    pub height: Option<String>,
    pub display: Option<String>,
    pub flex: Option<String>,
    pub overflow: Option<String>,
}

impl StyleRecord {
    #[must_use]
    pub fn get(&self, prop: StyleProp) -> Option<&str> {
        match prop {
            StyleProp::Width => self.width.as_deref(),
            StyleProp::Height => self.height.as_deref(),
            StyleProp::Display => self.display.as_deref(),
            StyleProp::Flex => self.flex.as_deref(),
            StyleProp::Overflow => self.overflow.as_deref(),
        }
    }

    pub fn set(&mut self, prop: StyleProp, value: String) {
        let slot = match prop {
            StyleProp::Width => &mut self.width,
            StyleProp::Height => &mut self.height,
            StyleProp::Display => &mut self.display,
            StyleProp::Flex => &mut self.flex,
            StyleProp::Overflow => &mut self.overflow,
        };
        *slot = Some(value);
    }

    /// Captured properties, display first: display must be restored before
    /// width so width transitions animate from a visible panel.
    pub fn props(&self) -> impl Iterator<Item = (StyleProp, &str)> {
        [
            StyleProp::Display,
            StyleProp::Width,
            StyleProp::Height,
            StyleProp::Flex,
            StyleProp::Overflow,
        ]
        .into_iter()
        .filter_map(|prop| self.get(prop).map(|value| (prop, value)))
    }
}

/// Map from element to its pre-toggle [`StyleRecord`].
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore<K> {
    entries: Vec<(K, StyleRecord)>,
}

impl<K: PartialEq> SnapshotStore<K> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record `record` for `key` unless a snapshot already exists. Returns
    /// whether the record was stored.
    pub fn capture(&mut self, key: K, record: StyleRecord) -> bool {
        if self.contains(&key) {
            return false;
        }
        self.entries.push((key, record));
        true
    }

    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<&StyleRecord> {
        self.entries
            .iter()
            .find_map(|(k, record)| (k == key).then_some(record))
    }

    pub fn entries(&self) -> impl Iterator<Item = (&K, &StyleRecord)> {
        self.entries.iter().map(|(k, record)| (k, record))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn record(display: &str) -> StyleRecord {
        let mut r = StyleRecord::default();
        r.set(StyleProp::Display, display.to_owned());
        r
    }

    #[test]
    fn first_capture_wins() {
        let mut store = SnapshotStore::new();
        assert!(store.capture(1, record("flex")));
        assert!(!store.capture(1, record("none")));
        assert_eq!(store.get(&1).and_then(|r| r.get(StyleProp::Display)), Some("flex"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn clear_allows_recapture_with_fresh_values() {
        let mut store = SnapshotStore::new();
        store.capture(1, record("flex"));
        store.clear();
        assert!(store.is_empty());
        assert!(store.capture(1, record("grid")));
        assert_eq!(store.get(&1).and_then(|r| r.get(StyleProp::Display)), Some("grid"));
    }

    #[test]
    fn records_keep_uncaptured_properties_absent() {
        let r = record("block");
        assert_eq!(r.get(StyleProp::Width), None);
        assert_eq!(r.get(StyleProp::Display), Some("block"));
    }

    #[test]
    fn props_yields_display_before_width() {
        let mut r = StyleRecord::default();
        r.set(StyleProp::Width, "40%".to_owned());
        r.set(StyleProp::Display, "".to_owned());
        let order: Vec<StyleProp> = r.props().map(|(prop, _)| prop).collect();
        assert_eq!(order, vec![StyleProp::Display, StyleProp::Width]);
    }

    #[test]
    fn distinct_keys_do_not_collide() {
        let mut store = SnapshotStore::new();
        store.capture(1, record("a"));
        store.capture(2, record("b"));
        assert_eq!(store.get(&2).and_then(|r| r.get(StyleProp::Display)), Some("b"));
        assert_eq!(store.len(), 2);
    }
}

#[cfg(test)]
mod prop_tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        // Under any interleaving of captures, the record held for a key is
        // the first one captured for it.
        #[test]
        fn stored_record_is_always_the_first_capture(
            ops in proptest::collection::vec((0u8..8, "[a-z]{0,6}"), 1..40)
        ) {
            let mut store = SnapshotStore::new();
            let mut first: Vec<(u8, String)> = Vec::new();
            for (key, value) in &ops {
                let mut record = StyleRecord::default();
                record.set(StyleProp::Display, value.clone());
                store.capture(*key, record);
                if !first.iter().any(|(k, _)| k == key) {
                    first.push((*key, value.clone()));
                }
            }
            for (key, expected) in &first {
                prop_assert_eq!(
                    store.get(key).and_then(|r| r.get(StyleProp::Display)),
                    Some(expected.as_str())
                );
            }
            prop_assert_eq!(store.len(), first.len());
        }
    }
}
