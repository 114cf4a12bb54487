//! Memo of the most recent conversion.

/// Holds the last `(input, output)` pair.
///
/// `last_output` is the conversion of `last_input` under the settings that
/// were active when it was stored; callers invalidate when settings change.
#[derive(Debug, Default, Clone)]
pub struct ConversionCache {
    last_input: String,
    last_output: String,
}

impl ConversionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached output for an exact repeat of the last input. Empty input
    /// never hits.
    pub fn get(&self, input: &str) -> Option<&str> {
        if !input.is_empty() && input == self.last_input {
            Some(&self.last_output)
        } else {
            None
        }
    }

    pub fn store(&mut self, input: &str, output: &str) {
        input.clone_into(&mut self.last_input);
        output.clone_into(&mut self.last_output);
    }

    /// Forget the last input so the next call recomputes. The previous
    /// output is kept but can no longer be returned.
    pub fn reset_input(&mut self) {
        self.last_input.clear();
    }

    pub fn invalidate(&mut self) {
        self.last_input.clear();
        self.last_output.clear();
    }

    pub fn last_input(&self) -> &str {
        &self.last_input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_after_store() {
        let mut cache = ConversionCache::new();
        assert_eq!(cache.get("sos"), None);
        cache.store("sos", "...|---|...");
        assert_eq!(cache.get("sos"), Some("...|---|..."));
        assert_eq!(cache.get("SOS"), None);
        assert_eq!(cache.get("sos "), None);
    }

    #[test]
    fn test_store_overwrites() {
        let mut cache = ConversionCache::new();
        cache.store("e", ".");
        cache.store("t", "-");
        assert_eq!(cache.get("e"), None);
        assert_eq!(cache.get("t"), Some("-"));
    }

    #[test]
    fn test_empty_input_never_hits() {
        let mut cache = ConversionCache::new();
        assert_eq!(cache.get(""), None);
        cache.store("", "");
        assert_eq!(cache.get(""), None);
    }

    #[test]
    fn test_reset_input() {
        let mut cache = ConversionCache::new();
        cache.store("e", ".");
        cache.reset_input();
        assert_eq!(cache.last_input(), "");
        assert_eq!(cache.get("e"), None);
    }

    #[test]
    fn test_invalidate() {
        let mut cache = ConversionCache::new();
        cache.store("e", ".");
        cache.invalidate();
        assert_eq!(cache.get("e"), None);
        assert_eq!(cache.last_input(), "");
    }
}
