//! Structured matcher for paths under `/fishes`.
//!
//! Paths are compared verbatim and case-sensitively. Splitting on `/` must
//! give exactly `["", "fishes", <segment>]`; any other shape is rejected.
//! The segment `random` is reserved and never treated as an identifier.

/// Collection root.
pub const FISHES: &str = "/fishes";

/// Reserved segment for random selection.
pub const RANDOM_SEGMENT: &str = "random";

/// A recognised single-item path in the fish namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FishPath {
    /// `/fishes/random`
    Random,
    /// `/fishes/{id}`
    ById(String),
}

impl FishPath {
    /// Match a request path. Returns `None` for anything that is not
    /// `/fishes/random` or `/fishes/{id}` with a non-empty id.
    pub fn parse(path: &str) -> Option<Self> {
        let segments: Vec<&str> = path.split('/').collect();
        match segments.as_slice() {
            ["", "fishes", RANDOM_SEGMENT] => Some(Self::Random),
            ["", "fishes", id] if !id.is_empty() => Some(Self::ById((*id).to_string())),
            _ => None,
        }
    }
}

/// Path of a single record, as used in `Location` headers.
pub fn item_path(id: &str) -> String {
    format!("{FISHES}/{id}")
}
