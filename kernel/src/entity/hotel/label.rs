use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Free-form search labels. Blank entries and duplicates are dropped.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct Tags(Vec<String>);

impl Tags {
    pub fn new(tags: impl Into<Vec<String>>) -> Self {
        Self(normalize(tags.into()))
    }

    pub fn contains_all(&self, required: &[String]) -> bool {
        required.iter().all(|tag| self.0.contains(tag))
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct Amenities(Vec<String>);

impl Amenities {
    pub fn new(amenities: impl Into<Vec<String>>) -> Self {
        Self(normalize(amenities.into()))
    }
}

fn normalize(values: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let value = value.trim();
        if !value.is_empty() && !normalized.iter().any(|v| v == value) {
            normalized.push(value.to_string());
        }
    }
    normalized
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct Featured(bool);

impl Featured {
    pub fn new(featured: impl Into<bool>) -> Self {
        Self(featured.into())
    }
}

#[cfg(test)]
mod test {
    use super::Tags;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn all_requested_tags_must_be_present() {
        let hotel = Tags::new(tags(&["spa", "pool"]));
        assert!(hotel.contains_all(&tags(&["spa"])));
        assert!(hotel.contains_all(&tags(&["spa", "pool"])));
        assert!(!hotel.contains_all(&tags(&["spa", "gym"])));
        assert!(hotel.contains_all(&[]));
    }

    #[test]
    fn blanks_and_duplicates_are_dropped() {
        let normalized = Tags::new(tags(&[" spa", "", "spa", "pool "]));
        assert_eq!(normalized.as_ref(), &tags(&["spa", "pool"]));
    }
}
