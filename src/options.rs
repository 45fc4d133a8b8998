/// Configuration for a [`JsonCache`](crate::JsonCache).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheOptions {
    /// Character separating address segments. Segments are matched literally;
    /// there is no way to escape the separator inside a key.
    pub separator: char,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self { separator: '/' }
    }
}

impl CacheOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }
}
