//! Path patterns with `:param` segments

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A route pattern such as `/user/awaiting-driver/:rideId`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Self {
        let raw = normalize(pattern);
        let segments = split(&raw)
            .map(|s| match s.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(s.to_string()),
            })
            .collect();
        Self { raw, segments }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Match a request path, returning captured params
    pub fn matches(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let path = normalize(path);
        let parts: Vec<&str> = split(&path).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(lit) if lit == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), part.to_string());
                }
            }
        }
        Some(params)
    }

    /// Number of literal segments, used to prefer `/driver/login` over `/driver/:id`
    pub fn specificity(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Literal(_)))
            .count()
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for PathPattern {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

/// Strip query and fragment, collapse the trailing slash
fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or("");
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

fn split(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_match() {
        let pattern = PathPattern::parse("/user/rides");
        assert!(pattern.matches("/user/rides").is_some());
        assert!(pattern.matches("/user/rides/").is_some());
        assert!(pattern.matches("/user/rides?page=2").is_some());
        assert!(pattern.matches("/user").is_none());
        assert!(pattern.matches("/user/rides/extra").is_none());
    }

    #[test]
    fn test_param_capture() {
        let pattern = PathPattern::parse("/driver/ride/:rideId");
        let params = pattern.matches("/driver/ride/66a1f").unwrap();
        assert_eq!(params.get("rideId").map(String::as_str), Some("66a1f"));
        assert!(pattern.matches("/driver/ride/").is_none());
    }

    #[test]
    fn test_root() {
        let pattern = PathPattern::parse("/");
        assert!(pattern.matches("").is_some());
        assert!(pattern.matches("/#top").is_some());
        assert!(pattern.matches("/about").is_none());
    }

    #[test]
    fn test_specificity() {
        assert_eq!(PathPattern::parse("/driver/login").specificity(), 2);
        assert_eq!(PathPattern::parse("/driver/:id").specificity(), 1);
    }
}
