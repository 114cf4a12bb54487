use std::fs;
use std::path::Path;

use morse_core::cache::ConversionCache;
use morse_core::charset::{registry, CharsetDescriptor};
use morse_core::converter;
use morse_core::settings::{parse_settings_toml, Overrides, Settings};
use tracing::{debug, debug_span};

use super::EngineError;

/// A converter instance with its own settings and last-result cache.
///
/// Not internally synchronised: share across threads behind a `Mutex`.
#[derive(Debug, Default)]
pub struct MorseEngine {
    settings: Settings,
    cache: ConversionCache,
}

impl MorseEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            cache: ConversionCache::new(),
        }
    }

    /// Build an engine from a settings TOML file.
    pub fn from_settings_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| EngineError::Io {
            msg: format!("{}: {e}", path.display()),
        })?;
        Ok(Self::with_settings(parse_settings_toml(&content)?))
    }

    /// Supported character sets.
    pub fn character_sets(&self) -> &'static [CharsetDescriptor] {
        registry().descriptors()
    }

    /// Switch character set. Returns `false` and keeps the current one if
    /// `id` is not registered.
    pub fn set_character_set(&mut self, id: &str) -> bool {
        let changed = self.settings.morse_type != id;
        if !self.settings.set_character_set(id) {
            return false;
        }
        if changed {
            self.cache.invalidate();
        }
        true
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Mutable access to the settings. The cache is dropped up front since
    /// any edit may change the output.
    pub fn settings_mut(&mut self) -> &mut Settings {
        self.cache.invalidate();
        &mut self.settings
    }

    pub fn replace_settings(&mut self, settings: Settings) {
        if settings != self.settings {
            self.cache.invalidate();
        }
        self.settings = settings;
    }

    /// Convert `message` after applying `overrides` with the configured
    /// merge policy.
    ///
    /// A missing or empty message yields an empty string and forgets the
    /// cached input; overrides are not applied in that case. Errors only
    /// come from a strict merge.
    pub fn convert(
        &mut self,
        message: Option<&str>,
        overrides: &Overrides,
    ) -> Result<String, EngineError> {
        let _span = debug_span!("engine_convert", overrides = overrides.len()).entered();

        let Some(message) = message.filter(|m| !m.is_empty()) else {
            debug!("empty message");
            self.cache.reset_input();
            return Ok(String::new());
        };

        let policy = self.settings.merge_policy;
        if self.settings.apply_overrides(overrides, policy)? {
            debug!("settings changed, invalidating cache");
            self.cache.invalidate();
        }

        Ok(self.convert_cached(message))
    }

    /// Convert with the current settings.
    pub fn convert_text(&mut self, message: &str) -> String {
        if message.is_empty() {
            self.cache.reset_input();
            return String::new();
        }
        self.convert_cached(message)
    }

    fn convert_cached(&mut self, message: &str) -> String {
        if let Some(cached) = self.cache.get(message) {
            debug!("cache hit");
            return cached.to_string();
        }
        let output = converter::convert(message, &self.settings);
        self.cache.store(message, &output);
        output
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use morse_core::settings::{MergePolicy, SettingsError};

    use super::*;

    #[test]
    fn test_convert_defaults() {
        let mut engine = MorseEngine::new();
        let out = engine.convert(Some("sos"), &Overrides::new()).unwrap();
        assert_eq!(out, "•••|–––|•••");
    }

    #[test]
    fn test_missing_and_empty_message() {
        let mut engine = MorseEngine::new();
        assert_eq!(engine.convert(None, &Overrides::new()).unwrap(), "");
        assert_eq!(engine.convert(Some(""), &Overrides::new()).unwrap(), "");
        assert_eq!(engine.convert_text(""), "");
    }

    #[test]
    fn test_empty_message_resets_cached_input() {
        let mut engine = MorseEngine::new();
        engine.convert_text("e");
        assert_eq!(engine.cache.last_input(), "e");
        engine.convert(None, &Overrides::new()).unwrap();
        assert_eq!(engine.cache.last_input(), "");
        assert_eq!(engine.convert_text("e"), "•");
    }

    #[test]
    fn test_empty_message_skips_overrides() {
        let mut engine = MorseEngine::new();
        let overrides = Overrides::new().set("shortSymbol", ".");
        engine.convert(Some(""), &overrides).unwrap();
        assert_eq!(engine.settings().short_symbol, "•");
    }

    #[test]
    fn test_repeat_is_served_from_cache() {
        let mut engine = MorseEngine::new();
        let first = engine.convert_text("hello world");
        let settings_before = engine.settings().clone();
        let second = engine.convert_text("hello world");
        assert_eq!(first, second);
        assert_eq!(engine.settings(), &settings_before);
        assert_eq!(engine.cache.get("hello world"), Some(first.as_str()));
    }

    #[test]
    fn test_overrides_persist_across_calls() {
        let mut engine = MorseEngine::new();
        let overrides = Overrides::new()
            .set("shortSymbol", ".")
            .set("longSymbol", "-");
        assert_eq!(engine.convert(Some("e"), &overrides).unwrap(), ".");
        assert_eq!(engine.convert_text("t"), "-");
    }

    #[test]
    fn test_override_invalidates_cache_for_same_input() {
        let mut engine = MorseEngine::new();
        assert_eq!(engine.convert_text("e"), "•");
        let overrides = Overrides::new().set("shortSymbol", "*");
        assert_eq!(engine.convert(Some("e"), &overrides).unwrap(), "*");
    }

    #[test]
    fn test_settings_mut_invalidates_cache() {
        let mut engine = MorseEngine::new();
        assert_eq!(engine.convert_text("sos"), "•••|–––|•••");
        engine.settings_mut().char_separator = " ".into();
        assert_eq!(engine.convert_text("sos"), "••• ––– •••");
    }

    #[test]
    fn test_replace_settings_invalidates_cache() {
        let mut engine = MorseEngine::new();
        assert_eq!(engine.convert_text("t"), "–");
        engine.replace_settings(Settings {
            long_symbol: "-".into(),
            ..Settings::default()
        });
        assert_eq!(engine.convert_text("t"), "-");
    }

    #[test]
    fn test_character_sets() {
        let engine = MorseEngine::new();
        let sets = engine.character_sets();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].id, "international");
        assert_eq!(sets[0].description, "International (ITU)");
    }

    #[test]
    fn test_set_unsupported_character_set() {
        let mut engine = MorseEngine::new();
        let before = engine.convert_text("sos");
        assert!(!engine.set_character_set("unsupported-id"));
        assert_eq!(engine.settings().morse_type, "international");
        assert_eq!(engine.convert_text("sos"), before);
        assert_eq!(engine.convert_text("sos!"), "•••|–––|•••|!");
    }

    #[test]
    fn test_set_supported_character_set() {
        let mut engine = MorseEngine::new();
        assert!(engine.set_character_set("international"));
        assert_eq!(engine.convert_text("e"), "•");
    }

    #[test]
    fn test_lenient_unknown_key_is_ignored() {
        let mut engine = MorseEngine::new();
        let overrides = Overrides::new().set("shortSymbl", ".");
        assert_eq!(engine.convert(Some("e"), &overrides).unwrap(), "•");
    }

    #[test]
    fn test_strict_unknown_key_is_reported() {
        let mut engine = MorseEngine::with_settings(Settings {
            merge_policy: MergePolicy::Strict,
            ..Settings::default()
        });
        let overrides = Overrides::new().set("shortSymbl", ".");
        let err = engine.convert(Some("e"), &overrides).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Settings(SettingsError::UnknownOption(_))
        ));
        assert_eq!(engine.convert_text("e"), "•");
    }

    #[test]
    fn test_independent_engines() {
        let mut a = MorseEngine::new();
        let mut b = MorseEngine::new();
        a.convert(Some("e"), &Overrides::new().set("shortSymbol", "."))
            .unwrap();
        assert_eq!(a.convert_text("e"), ".");
        assert_eq!(b.convert_text("e"), "•");
    }

    #[test]
    fn test_from_settings_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
morse_type = "international"
short_symbol = "."
long_symbol = "-"
char_separator = " "
word_separator = " / "
word_before = ""
word_after = ""
"#
        )
        .unwrap();
        let mut engine = MorseEngine::from_settings_file(file.path()).unwrap();
        assert_eq!(engine.convert_text("sos"), "... --- ...");
    }

    #[test]
    fn test_from_missing_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = MorseEngine::from_settings_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, EngineError::Io { .. }));
    }

    #[test]
    fn test_from_invalid_settings_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "short_symbol = 3").unwrap();
        let err = MorseEngine::from_settings_file(file.path()).unwrap_err();
        assert!(matches!(err, EngineError::Settings(SettingsError::Parse(_))));
    }
}
