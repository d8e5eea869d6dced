//! Voice catalog — the loaded engine's voices, flat and grouped by language.
//!
//! The catalog starts empty and is refreshed whenever an engine becomes
//! available. Downstream code must tolerate an empty catalog: preference
//! restoration degrades to "no voice selected" instead of failing.

use std::collections::BTreeMap;

use crate::engine::Voice;

/// Outcome of restoring a saved voice preference against the live catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceRestoration {
    /// The saved voice is available (or no preference was saved and the
    /// first catalog voice was chosen).
    Selected(String),

    /// The saved voice has disappeared; the first available voice was
    /// substituted. Worth a user-visible warning.
    Fallback { requested: String, selected: String },

    /// The catalog is empty — nothing can be selected.
    NoVoices,
}

/// The set of voices currently exposed by the speech engine.
#[derive(Debug, Clone, Default)]
pub struct VoiceCatalog {
    voices: Vec<Voice>,
}

impl VoiceCatalog {
    /// An empty catalog, for before any engine has loaded.
    #[must_use]
    pub const fn empty() -> Self {
        Self { voices: Vec::new() }
    }

    /// Build a catalog from an explicit voice list.
    #[must_use]
    pub fn from_voices(voices: Vec<Voice>) -> Self {
        Self { voices }
    }

    /// Replace the catalog contents with the engine's current voice list.
    pub fn refresh_from(&mut self, voices: Vec<Voice>) {
        self.voices = voices;
        tracing::debug!(count = self.voices.len(), "Voice catalog refreshed");
    }

    /// All voices, in catalog order.
    #[must_use]
    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    /// Voices grouped by language tag, for display.
    #[must_use]
    pub fn grouped(&self) -> BTreeMap<String, Vec<Voice>> {
        let mut groups: BTreeMap<String, Vec<Voice>> = BTreeMap::new();
        for v in &self.voices {
            groups.entry(v.language.clone()).or_default().push(v.clone());
        }
        groups
    }

    /// Whether a voice with this ID exists.
    #[must_use]
    pub fn contains(&self, voice_id: &str) -> bool {
        self.voices.iter().any(|v| v.id == voice_id)
    }

    /// The first voice in catalog order, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Voice> {
        self.voices.first()
    }

    /// Resolve a saved voice preference against this catalog.
    ///
    /// A saved voice that no longer exists falls back to the first available
    /// voice; an empty catalog yields [`VoiceRestoration::NoVoices`]. This
    /// never fails — a stale preference must not block playback.
    #[must_use]
    pub fn restore(&self, saved: Option<&str>) -> VoiceRestoration {
        let Some(first) = self.first() else {
            return VoiceRestoration::NoVoices;
        };

        match saved {
            Some(id) if self.contains(id) => VoiceRestoration::Selected(id.to_string()),
            Some(id) => VoiceRestoration::Fallback {
                requested: id.to_string(),
                selected: first.id.clone(),
            },
            None => VoiceRestoration::Selected(first.id.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::voice;

    fn catalog() -> VoiceCatalog {
        VoiceCatalog::from_voices(vec![
            voice("alex", "Alex", "en-US"),
            voice("victoria", "Victoria", "en-US"),
            voice("emma", "Emma", "en-GB"),
        ])
    }

    #[test]
    fn grouped_partitions_by_language() {
        let groups = catalog().grouped();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups["en-US"].len(), 2);
        assert_eq!(groups["en-GB"].len(), 1);
    }

    #[test]
    fn restore_keeps_saved_voice_when_present() {
        assert_eq!(
            catalog().restore(Some("victoria")),
            VoiceRestoration::Selected("victoria".to_string())
        );
    }

    #[test]
    fn restore_falls_back_to_first_when_saved_voice_gone() {
        assert_eq!(
            catalog().restore(Some("samantha")),
            VoiceRestoration::Fallback {
                requested: "samantha".to_string(),
                selected: "alex".to_string(),
            }
        );
    }

    #[test]
    fn restore_picks_first_voice_when_nothing_saved() {
        assert_eq!(
            catalog().restore(None),
            VoiceRestoration::Selected("alex".to_string())
        );
    }

    #[test]
    fn restore_degrades_on_empty_catalog() {
        let empty = VoiceCatalog::empty();
        assert_eq!(empty.restore(Some("alex")), VoiceRestoration::NoVoices);
        assert_eq!(empty.restore(None), VoiceRestoration::NoVoices);
    }
}
