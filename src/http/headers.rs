//! Case-insensitive, order-preserving header multimap
//!
//! Names are compared ASCII case-insensitively. The casing stored for a name
//! is the one used by whichever call last *set* it; `append` keeps the
//! existing casing.

use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, Vec<String>)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(key, _)| key.eq_ignore_ascii_case(name))
    }

    /// Whether a header with this name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// All values stored for `name`.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.position(name).map(|idx| self.entries[idx].1.as_slice())
    }

    /// Values for `name` joined with `", "`, the way they go on the wire.
    pub fn get_line(&self, name: &str) -> Option<String> {
        self.get(name).map(|values| values.join(", "))
    }

    /// Replace every value for `name`. The entry moves to the end and takes
    /// the casing given here. An empty value list removes the header.
    pub fn set<N, I, V>(&mut self, name: N, values: I)
    where
        N: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let name = name.into();
        self.remove(&name);
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if !values.is_empty() {
            self.entries.push((name, values));
        }
    }

    /// Set `name` only when it is not already present. Returns whether the
    /// header was written.
    pub fn set_if_absent<N, I, V>(&mut self, name: N, values: I) -> bool
    where
        N: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.set(name, values);
        true
    }

    /// Add a value after any existing ones.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        match self.position(&name) {
            Some(idx) => self.entries[idx].1.push(value.into()),
            None => self.entries.push((name, vec![value.into()])),
        }
    }

    /// Remove `name`, returning its values.
    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        self.position(name).map(|idx| self.entries.remove(idx).1)
    }

    /// Entries of `front` first, followed by the entries of `self` whose
    /// names `front` does not carry.
    pub fn overlay(&self, front: &Headers) -> Headers {
        let mut entries = front.entries.clone();
        entries.extend(
            self.entries
                .iter()
                .filter(|(name, _)| !front.contains(name))
                .cloned(),
        );
        Headers { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N, V> FromIterator<(N, V)> for Headers
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.append(name, value);
        }
        headers
    }
}

impl fmt::Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, values) in self.iter() {
            write!(f, "{}: {}\r\n", name, values.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Headers;

    #[test]
    fn lookup_ignores_case() {
        let mut headers = Headers::new();
        headers.set("Content-Type", ["text/plain"]);
        assert!(headers.contains("content-type"));
        assert_eq!(
            headers.get("CONTENT-TYPE"),
            Some(&["text/plain".to_string()][..])
        );
    }

    #[test]
    fn set_replaces_with_new_casing() {
        let mut headers = Headers::new();
        headers.set("x-foo", ["a"]);
        headers.set("Host", ["example.com"]);
        headers.set("X-Foo", ["b", "c"]);

        let names: Vec<&str> = headers.names().collect();
        assert_eq!(names, vec!["Host", "X-Foo"]);
        assert_eq!(headers.get_line("x-foo").as_deref(), Some("b, c"));
    }

    #[test]
    fn set_with_no_values_removes_the_header() {
        let mut headers = Headers::new();
        headers.set("Content-Type", ["text/plain"]);
        headers.set("content-type", Vec::<String>::new());
        assert!(!headers.contains("Content-Type"));
        assert!(headers.is_empty());
    }

    #[test]
    fn set_if_absent_keeps_existing_value() {
        let mut headers = Headers::new();
        headers.set("content-type", ["text/plain"]);
        assert!(!headers.set_if_absent("Content-Type", ["application/json"]));
        assert!(headers.set_if_absent("Accept", ["*/*"]));
        assert_eq!(headers.get_line("Content-Type").as_deref(), Some("text/plain"));
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn append_keeps_first_seen_casing() {
        let mut headers = Headers::new();
        headers.append("X-Trace", "1");
        headers.append("x-trace", "2");
        let entries: Vec<(&str, &[String])> = headers.iter().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "X-Trace");
        assert_eq!(entries[0].1, ["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn overlay_puts_front_first_and_drops_shadowed_names() {
        let base: Headers = [("User-Agent", "a"), ("content-type", "text/plain")]
            .into_iter()
            .collect();
        let front: Headers = [("Content-Type", "application/json")].into_iter().collect();

        let merged = base.overlay(&front);
        let names: Vec<&str> = merged.names().collect();
        assert_eq!(names, vec!["Content-Type", "User-Agent"]);
        assert_eq!(
            merged.get_line("content-type").as_deref(),
            Some("application/json")
        );
    }

    #[test]
    fn display_renders_wire_lines() {
        let headers: Headers = [("X-Foo", "Bar"), ("X-Foo", "Baz")].into_iter().collect();
        assert_eq!(headers.to_string(), "X-Foo: Bar, Baz\r\n");
    }
}
