//! Thin wrapper over `rust-ini` for the game's configuration documents.
//!
//! Documents are parsed without quote or escape handling and written back
//! without escaping, so values such as archive lists round-trip untouched.
//! Sections and keys keep their original order; replacing a value keeps
//! the key where it was. A leading UTF-8 byte order mark is set aside before
//! parsing and written back on render.

use crate::models::archive_layout::ARCHIVE_SECTION;
use crate::services::error::ModManagerError;
use camino::Utf8Path;
use ini::{EscapePolicy, Ini, ParseOption, WriteOption};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// A parsed INI document.
#[derive(Debug, Clone)]
pub struct ConfigDocument {
    ini: Ini,
    byte_order_mark: bool,
}

fn parse_option() -> ParseOption {
    ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..Default::default()
    }
}

fn write_option() -> WriteOption {
    WriteOption {
        escape_policy: EscapePolicy::Nothing,
        ..Default::default()
    }
}

impl ConfigDocument {
    pub fn new() -> Self {
        Self {
            ini: Ini::new(),
            byte_order_mark: false,
        }
    }

    pub fn parse(text: &str, path: &Utf8Path) -> Result<Self, ModManagerError> {
        let (byte_order_mark, text) = match text.strip_prefix(BYTE_ORDER_MARK) {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let ini = Ini::load_from_str_opt(text, parse_option()).map_err(|e| {
            ModManagerError::MalformedSource {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;
        Ok(Self {
            ini,
            byte_order_mark,
        })
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.ini.get_from(Some(section), key)
    }

    /// Insert or replace `key` in `section`, leaving everything else alone.
    pub fn set(&mut self, section: &str, key: &str, value: String) {
        if let Some(properties) = self.ini.section_mut(Some(section)) {
            if let Some((_, existing)) = properties.iter_mut().find(|(k, _)| *k == key) {
                *existing = value;
                return;
            }
        }
        self.ini.with_section(Some(section)).set(key, value);
    }

    /// Tokens of the comma-separated list stored under `[Archive] key`,
    /// trimmed. A missing key is an empty list.
    pub fn archive_list(&self, key: &str) -> Vec<String> {
        match self.get(ARCHIVE_SECTION, key) {
            Some(value) => value
                .split(',')
                .map(|token| token.trim().to_string())
                .filter(|token| !token.is_empty())
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn set_archive_list(&mut self, key: &str, entries: &[String]) {
        self.set(ARCHIVE_SECTION, key, entries.join(", "));
    }

    /// Serialize the whole document.
    pub fn render(&self) -> String {
        let mut buffer = Vec::new();
        if let Err(e) = self.ini.write_to_opt(&mut buffer, write_option()) {
            tracing::error!("Failed to serialize configuration document: {}", e);
        }
        let body = String::from_utf8_lossy(&buffer);
        if self.byte_order_mark {
            format!("{}{}", BYTE_ORDER_MARK, body)
        } else {
            body.into_owned()
        }
    }
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "[General]\nsLanguage=ENGLISH\n\n[Archive]\nsResourceArchiveList=Skyrim - Misc.bsa, Skyrim - Shaders.bsa,Foo.bsa\nbInvalidateOlderFiles=1\n";

    fn doc() -> ConfigDocument {
        ConfigDocument::parse(SAMPLE, Utf8Path::new("Skyrim.ini")).unwrap()
    }

    #[test]
    fn test_archive_list_trims_tokens() {
        assert_eq!(
            doc().archive_list("sResourceArchiveList"),
            vec!["Skyrim - Misc.bsa", "Skyrim - Shaders.bsa", "Foo.bsa"]
        );
    }

    #[test]
    fn test_missing_key_is_empty_list() {
        assert!(doc().archive_list("sResourceArchiveList2").is_empty());
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut doc = doc();
        doc.set_archive_list("sResourceArchiveList", &["Skyrim - Misc.bsa".to_string()]);

        let rendered = doc.render();
        let list_at = rendered.find("sResourceArchiveList=").unwrap();
        let invalidate_at = rendered.find("bInvalidateOlderFiles").unwrap();
        assert!(list_at < invalidate_at);
        assert!(rendered.contains("sResourceArchiveList=Skyrim - Misc.bsa"));
        assert!(rendered.contains("sLanguage=ENGLISH"));
    }

    #[test]
    fn test_set_creates_missing_section() {
        let mut doc = ConfigDocument::new();
        doc.set_archive_list("sResourceArchiveList2", &["A - Textures.bsa".to_string()]);
        assert_eq!(
            doc.archive_list("sResourceArchiveList2"),
            vec!["A - Textures.bsa"]
        );
        assert!(doc.render().contains("[Archive]"));
    }

    #[test]
    fn test_render_round_trip() {
        let rendered = doc().render();
        let reparsed = ConfigDocument::parse(&rendered, Utf8Path::new("Skyrim.ini")).unwrap();
        assert_eq!(
            reparsed.archive_list("sResourceArchiveList"),
            doc().archive_list("sResourceArchiveList")
        );
    }

    #[test]
    fn test_byte_order_mark_is_set_aside() {
        let text = "\u{feff}[Archive]\nsResourceArchiveList=Skyrim - Misc.bsa, A.bsa\n";
        let mut doc = ConfigDocument::parse(text, Utf8Path::new("Skyrim.ini")).unwrap();
        assert_eq!(
            doc.archive_list("sResourceArchiveList"),
            vec!["Skyrim - Misc.bsa", "A.bsa"]
        );

        doc.set_archive_list("sResourceArchiveList", &["Skyrim - Misc.bsa".to_string()]);
        let rendered = doc.render();
        assert!(rendered.starts_with("\u{feff}[Archive]"));
        assert_eq!(rendered.matches("[Archive]").count(), 1);
        assert!(rendered.contains("sResourceArchiveList=Skyrim - Misc.bsa"));
        assert!(!rendered.contains("A.bsa"));
    }

    #[test]
    fn test_unterminated_section_is_malformed() {
        let err = ConfigDocument::parse("[Archive\n", Utf8Path::new("Skyrim.ini")).unwrap_err();
        assert!(matches!(err, ModManagerError::MalformedSource { .. }));
        assert!(err.is_source_error());
    }
}
