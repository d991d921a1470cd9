//! Wildcard permission nodes for the senders of the in-memory host.
//!
//! A node is a dot separated path like `mcpets.am_pet_kitsune`. A `*` segment
//! matches everything below it. Nodes prefixed with `-` are negated.

#[derive(Debug, Clone, PartialEq, Eq)]
enum PathSegment {
    WildCard,
    Named(String),
}

#[derive(Debug, Clone)]
struct PermissionNode {
    path: Vec<PathSegment>,
    value: bool,
}

impl PermissionNode {
    fn matches(&self, name: &str) -> bool {
        let mut segments = name.split('.');
        for expected in &self.path {
            match expected {
                PathSegment::WildCard => return true,
                PathSegment::Named(expected) => match segments.next() {
                    Some(segment) if segment.eq_ignore_ascii_case(expected) => {}
                    _ => return false,
                },
            }
        }
        segments.next().is_none()
    }
}

#[derive(Debug, Default, Clone)]
pub struct PermissionsCache {
    nodes: Vec<PermissionNode>,
}

impl PermissionsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cache from node strings; `-node` denies.
    pub fn from_nodes<I, S>(nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cache = Self::new();
        for node in nodes {
            let node = node.as_ref().trim();
            match node.strip_prefix('-') {
                Some(denied) => cache.insert(denied, false),
                None => cache.insert(node, true),
            }
        }
        cache
    }

    /// The value of the first node matching `name`, in insertion order.
    pub fn get_node_val(&self, name: &str) -> Option<bool> {
        self.nodes
            .iter()
            .find(|node| node.matches(name))
            .map(|node| node.value)
    }

    pub fn has(&self, name: &str) -> bool {
        self.get_node_val(name).unwrap_or(false)
    }

    pub fn insert(&mut self, name: &str, value: bool) {
        if name.is_empty() {
            return;
        }
        let path = name
            .split('.')
            .map(|s| match s {
                "*" => PathSegment::WildCard,
                s => PathSegment::Named(s.to_owned()),
            })
            .collect();
        self.nodes.push(PermissionNode { path, value });
    }
}
