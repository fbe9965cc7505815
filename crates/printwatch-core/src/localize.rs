//! Localization seam
//!
//! The card never embeds display text; it passes semantic keys such as
//! `dialogs.pause.title` and lets the host resolve them.

/// Pure key-to-display-string lookup implemented by the host.
pub trait Localizer {
    /// Resolve a semantic key to a display string.
    fn translate(&self, key: &str) -> String;
}

/// Echoes keys back unchanged.
///
/// Useful for hosts without a translation table and in tests, where
/// asserting on the key is more robust than asserting on prose.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyLocalizer;

impl Localizer for KeyLocalizer {
    fn translate(&self, key: &str) -> String {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_localizer_echoes() {
        let localizer = KeyLocalizer;
        assert_eq!(localizer.translate("dialogs.stop.title"), "dialogs.stop.title");
    }
}
