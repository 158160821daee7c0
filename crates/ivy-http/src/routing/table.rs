//! Per-method route table
//!
//! A segment tree keyed on path segments. Each node has static children,
//! at most one parameter child and at most one splat. Lookup walks the tree
//! trying static, then parameter, then splat at every level, backtracking
//! when a branch dead-ends, so the most specific pattern always wins
//! regardless of registration order.

use super::params::PathParams;
use super::pattern::{request_path, split_segments, PathSegment, RoutePattern, RoutePatternError};
use std::collections::HashMap;

/// A registered pattern's payload and the names its captures bind to
#[derive(Debug)]
struct Leaf<T> {
    pattern: String,
    param_names: Vec<String>,
    value: T,
}

#[derive(Debug)]
struct Node<T> {
    statics: HashMap<String, Node<T>>,
    param: Option<Box<Node<T>>>,
    splat: Option<Leaf<T>>,
    leaf: Option<Leaf<T>>,
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self {
            statics: HashMap::new(),
            param: None,
            splat: None,
            leaf: None,
        }
    }
}

impl<T> Node<T> {
    fn find<'a>(&'a self, segments: &[&str], captures: &mut Vec<String>) -> Option<&'a Leaf<T>> {
        let Some((first, rest)) = segments.split_first() else {
            return self.leaf.as_ref();
        };

        if let Some(child) = self.statics.get(*first) {
            if let Some(leaf) = child.find(rest, captures) {
                return Some(leaf);
            }
        }

        if let Some(child) = &self.param {
            captures.push((*first).to_string());
            if let Some(leaf) = child.find(rest, captures) {
                return Some(leaf);
            }
            captures.pop();
        }

        if let Some(leaf) = &self.splat {
            captures.push(segments.join("/"));
            return Some(leaf);
        }

        None
    }
}

/// Result of a successful table lookup
#[derive(Debug)]
pub struct TableMatch<'a, T> {
    pub value: &'a T,
    pub params: PathParams,
    /// The pattern as it was registered
    pub pattern: &'a str,
}

/// Route table mapping path patterns to values for a single HTTP method
#[derive(Debug)]
pub struct RouteTable<T> {
    root: Node<T>,
    len: usize,
}

impl<T> Default for RouteTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RouteTable<T> {
    /// Create a new empty route table
    pub fn new() -> Self {
        Self {
            root: Node::default(),
            len: 0,
        }
    }

    /// Insert a value under `pattern`.
    ///
    /// Patterns of the same shape are the same entry: the new value and
    /// parameter names replace the old ones, and the old value is returned.
    pub fn insert(&mut self, pattern: &str, value: T) -> Result<Option<T>, RoutePatternError> {
        let parsed = RoutePattern::parse(pattern)?;
        let leaf = Leaf {
            pattern: pattern.to_string(),
            param_names: parsed.param_names,
            value,
        };

        let mut node = &mut self.root;
        let mut splat = false;
        for segment in parsed.segments {
            match segment {
                PathSegment::Static(text) => {
                    node = node.statics.entry(text).or_default();
                }
                PathSegment::Param(_) => {
                    node = &mut **node.param.get_or_insert_with(Box::default);
                }
                PathSegment::Splat(_) => splat = true,
            }
        }

        let slot = if splat { &mut node.splat } else { &mut node.leaf };
        let previous = slot.replace(leaf).map(|old| old.value);
        if previous.is_none() {
            self.len += 1;
        }
        Ok(previous)
    }

    /// Look up a request URL. The query string and fragment are ignored.
    pub fn lookup(&self, url: &str) -> Option<TableMatch<'_, T>> {
        let segments: Vec<&str> = split_segments(request_path(url)).collect();
        let mut captures = Vec::new();
        let leaf = self.root.find(&segments, &mut captures)?;

        let params = leaf
            .param_names
            .iter()
            .cloned()
            .zip(captures)
            .collect();

        Some(TableMatch {
            value: &leaf.value,
            params,
            pattern: &leaf.pattern,
        })
    }

    /// Number of distinct patterns in the table
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(routes: &[(&str, &'static str)]) -> RouteTable<&'static str> {
        let mut table = RouteTable::new();
        for (pattern, id) in routes {
            table.insert(pattern, *id).unwrap();
        }
        table
    }

    #[test]
    fn test_static_route_matching() {
        let table = table(&[("/", "home"), ("/users", "users")]);

        let home = table.lookup("/").unwrap();
        assert_eq!(*home.value, "home");
        assert!(home.params.is_empty());

        assert_eq!(*table.lookup("/users").unwrap().value, "users");
        assert!(table.lookup("/users/1").is_none());
        assert!(table.lookup("/nonexistent").is_none());
    }

    #[test]
    fn test_parameter_extraction() {
        let table = table(&[("/users/:id/posts/:slug", "post")]);

        let matched = table.lookup("/users/123/posts/hello-world").unwrap();
        assert_eq!(*matched.value, "post");
        assert_eq!(matched.params.get("id"), Some("123"));
        assert_eq!(matched.params.get("slug"), Some("hello-world"));
        assert_eq!(matched.pattern, "/users/:id/posts/:slug");

        assert!(table.lookup("/users/123/posts").is_none());
        assert!(table.lookup("/users/123/posts/hello/world").is_none());
    }

    #[test]
    fn test_static_beats_parameter_regardless_of_order() {
        let param_first = table(&[("/users/:id", "param"), ("/users/me", "static")]);
        let static_first = table(&[("/users/me", "static"), ("/users/:id", "param")]);

        for table in [param_first, static_first] {
            assert_eq!(*table.lookup("/users/me").unwrap().value, "static");
            let other = table.lookup("/users/42").unwrap();
            assert_eq!(*other.value, "param");
            assert_eq!(other.params.get("id"), Some("42"));
        }
    }

    #[test]
    fn test_parameter_beats_splat() {
        let table = table(&[
            ("/files/*path", "splat"),
            ("/files/:name", "param"),
            ("/files/config.json", "static"),
        ]);

        assert_eq!(*table.lookup("/files/config.json").unwrap().value, "static");
        assert_eq!(*table.lookup("/files/other.txt").unwrap().value, "param");

        let deep = table.lookup("/files/docs/readme.md").unwrap();
        assert_eq!(*deep.value, "splat");
        assert_eq!(deep.params.get("path"), Some("docs/readme.md"));
    }

    #[test]
    fn test_backtracks_from_dead_static_branch() {
        let table = table(&[("/users/me/settings", "settings"), ("/users/:id/posts", "posts")]);

        let matched = table.lookup("/users/me/posts").unwrap();
        assert_eq!(*matched.value, "posts");
        assert_eq!(matched.params.get("id"), Some("me"));
    }

    #[test]
    fn test_splat_requires_at_least_one_segment() {
        let table = table(&[("/assets/*", "assets")]);

        assert!(table.lookup("/assets").is_none());
        let matched = table.lookup("/assets/css/site.css").unwrap();
        assert_eq!(matched.params.get("splat"), Some("css/site.css"));
    }

    #[test]
    fn test_same_shape_replaces_previous_value() {
        let mut table = RouteTable::new();
        assert_eq!(table.insert("/users/:id", "first").unwrap(), None);
        assert_eq!(table.insert("/users/:name", "second").unwrap(), Some("first"));
        assert_eq!(table.len(), 1);

        let matched = table.lookup("/users/ada").unwrap();
        assert_eq!(*matched.value, "second");
        assert_eq!(matched.params.get("name"), Some("ada"));
        assert!(!matched.params.contains("id"));
    }

    #[test]
    fn test_trailing_slash_and_query_are_ignored() {
        let table = table(&[("/users/:id", "user")]);

        assert_eq!(table.lookup("/users/7/").unwrap().params.get("id"), Some("7"));
        assert_eq!(
            table.lookup("/users/7?expand=posts").unwrap().params.get("id"),
            Some("7")
        );
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let mut table: RouteTable<()> = RouteTable::new();
        assert_eq!(
            table.insert("/a/*rest/b", ()),
            Err(RoutePatternError::SplatNotLast)
        );
        assert!(table.is_empty());
    }
}
