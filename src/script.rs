const KEYWORD: &[u8; 6] = b"script";

/// Incremental, case-insensitive recognizer for the literal tag name
/// `script`. Progress is the matched prefix length; any miss is permanent
/// until the next [`reset`](ScriptMatcher::reset).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct ScriptMatcher {
    progress: i8,
}

impl ScriptMatcher {
    pub fn new() -> Self {
        Self { progress: 0 }
    }

    pub fn reset(&mut self) {
        self.progress = 0;
    }

    pub fn advance(&mut self, byte: u8) {
        match self.progress {
            p @ 0..=5 if KEYWORD[p as usize] == byte.to_ascii_lowercase() => self.progress = p + 1,
            _ => self.progress = -1,
        }
    }

    pub fn is_complete(self) -> bool {
        self.progress == 6
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advanced(bytes: &[u8]) -> ScriptMatcher {
        let mut matcher = ScriptMatcher::new();
        for &byte in bytes {
            matcher.advance(byte);
        }
        matcher
    }

    #[test]
    fn exact() {
        assert!(advanced(b"script").is_complete());
    }

    #[test]
    fn case_insensitive() {
        assert!(advanced(b"ScRiPT").is_complete());
    }

    #[test]
    fn prefix_is_incomplete() {
        assert!(!advanced(b"scrip").is_complete());
    }

    #[test]
    fn miss_is_permanent() {
        // `strict` shares a prefix but diverges; the tail cannot recover it
        let mut matcher = advanced(b"strict");
        assert!(!matcher.is_complete());
        for &byte in b"script" {
            matcher.advance(byte);
        }
        assert!(!matcher.is_complete());
    }

    #[test]
    fn overlong_name_mismatches() {
        // `scriptx` must not count as a match
        assert!(!advanced(b"scriptx").is_complete());
    }

    #[test]
    fn reset_recovers() {
        let mut matcher = advanced(b"div");
        matcher.reset();
        for &byte in b"SCRIPT" {
            matcher.advance(byte);
        }
        assert!(matcher.is_complete());
    }
}
