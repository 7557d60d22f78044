use std::fmt;

/// Display wrapper that keeps session tokens out of logs.
///
/// Only the length and the first few characters of the header segment are
/// shown, which is enough to tell tokens apart while debugging.
pub struct RedactedToken<'a>(pub &'a str);

const VISIBLE_PREFIX: usize = 6;

impl fmt::Display for RedactedToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(VISIBLE_PREFIX).collect();
        if self.0.chars().count() <= VISIBLE_PREFIX {
            write!(f, "[REDACTED_TOKEN len={}]", self.0.len())
        } else {
            write!(f, "{prefix}…[REDACTED_TOKEN len={}]", self.0.len())
        }
    }
}

impl fmt::Debug for RedactedToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
