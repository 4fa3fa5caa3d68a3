/// Reader-like wrapper for string slices
///
/// This structure allows structured consumption of string slices by continually
/// matching expected parts of a string.
pub struct MatchableString<'a> {
    source: &'a str,
    index: usize,
}

impl<'a> MatchableString<'a> {
    /// Creates a new reader by wrapping a string reference
    #[inline]
    pub fn new(source: &'a str) -> Self {
        Self { source, index: 0 }
    }

    /// Returns the current unconsumed substring
    #[inline]
    pub fn current(&self) -> &'a str {
        &self.source[self.index..]
    }

    /// Whether everything has been consumed
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.index >= self.source.len()
    }

    /// Consumes a fixed prefix if possible
    #[inline]
    pub fn consume_prefix(&mut self, prefix: &str) -> Option<()> {
        if self.current().starts_with(prefix) {
            self.index += prefix.len();
            Some(())
        } else {
            None
        }
    }

    /// Consumes and returns everything up to (but excluding) the delimiter or the end of the string
    ///
    /// Returns `None` if the consumed part would be empty.
    #[inline]
    pub fn consume_until(&mut self, delimiter: char) -> Option<&'a str> {
        let current = self.current();
        let length = current.find(delimiter).unwrap_or_else(|| current.len());

        if length == 0 {
            return None;
        }

        self.index += length;
        Some(&current[..length])
    }

    /// Consumes a path separator followed by a non-empty path segment
    #[inline]
    pub fn consume_segment(&mut self) -> Option<&'a str> {
        let checkpoint = self.index;
        self.consume_prefix("/")?;

        match self.consume_until('/') {
            Some(segment) => Some(segment),
            None => {
                self.index = checkpoint;
                None
            }
        }
    }

    /// Succeeds if nothing but an optional trailing slash remains
    #[inline]
    pub fn consume_end(&mut self) -> Option<()> {
        match self.current() {
            "" | "/" => {
                self.index = self.source.len();
                Some(())
            }
            _ => None,
        }
    }
}

/// Looks up the first value of a parameter in a raw query string (e.g. `a=1&b=2`)
///
/// Values are returned verbatim without any percent-decoding.
pub fn query_parameter<'a>(query: Option<&'a str>, name: &str) -> Option<&'a str> {
    query?
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

#[cfg(test)]
mod does {
    use super::*;

    #[test]
    fn consume_prefix_repeatedly() {
        let mut string = MatchableString::new("john eats potatoes");

        assert!(string.consume_prefix("john ").is_some());
        assert!(string.consume_prefix("eats ").is_some());
        assert_eq!(string.current(), "potatoes");
    }

    #[test]
    fn consume_path_segments() {
        let mut string = MatchableString::new("/user/abc/wishlist");

        assert_eq!(string.consume_segment(), Some("user"));
        assert_eq!(string.consume_segment(), Some("abc"));
        assert_eq!(string.consume_segment(), Some("wishlist"));
        assert_eq!(string.consume_segment(), None);
        assert!(string.is_exhausted());
    }

    #[test]
    fn keep_position_on_empty_segment() {
        let mut string = MatchableString::new("//book");

        assert_eq!(string.consume_segment(), None);
        assert_eq!(string.current(), "//book");
    }

    #[test]
    fn accept_trailing_slash_as_end() {
        let mut string = MatchableString::new("/book/");

        assert_eq!(string.consume_segment(), Some("book"));
        assert!(string.consume_end().is_some());
        assert!(string.is_exhausted());
    }

    #[test]
    fn reject_remaining_content_as_end() {
        let mut string = MatchableString::new("/book/42");

        assert_eq!(string.consume_segment(), Some("book"));
        assert!(string.consume_end().is_none());
        assert_eq!(string.current(), "/42");
    }

    #[test]
    fn find_query_parameter() {
        let query = Some("foo=bar&bookId=42&bookId=43");

        assert_eq!(query_parameter(query, "bookId"), Some("42"));
        assert_eq!(query_parameter(query, "foo"), Some("bar"));
        assert_eq!(query_parameter(query, "missing"), None);
        assert_eq!(query_parameter(None, "bookId"), None);
    }

    #[test]
    fn not_panic_on_empty_string() {
        let mut string = MatchableString::new("");
        assert!(string.current().is_empty());
        assert!(string.consume_segment().is_none());
        assert!(string.consume_until('/').is_none());
        assert!(string.consume_prefix("42").is_none());
        assert!(string.consume_end().is_some());
    }
}
