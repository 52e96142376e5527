//! Distribution requests.
//!
//! A request names the paths to distribute and how: which of them are deep
//! (include descendants) and which filters apply per path.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The kind of distribution action requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DistributionRequestType {
    /// Add content to the target.
    Add,
    /// Delete content from the target.
    Delete,
    /// Pull content from the source.
    Pull,
    /// Invalidate cached content without transferring it.
    Invalidate,
    /// Check connectivity without distributing anything.
    Test,
}

impl DistributionRequestType {
    /// Returns the wire name, e.g. `ADD`.
    pub const fn as_str(self) -> &'static str {
        match self {
            DistributionRequestType::Add => "ADD",
            DistributionRequestType::Delete => "DELETE",
            DistributionRequestType::Pull => "PULL",
            DistributionRequestType::Invalidate => "INVALIDATE",
            DistributionRequestType::Test => "TEST",
        }
    }
}

impl fmt::Display for DistributionRequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown request type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown distribution request type: {0}")]
pub struct UnknownRequestType(pub String);

impl FromStr for DistributionRequestType {
    type Err = UnknownRequestType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_uppercase().as_str() {
            "ADD" => DistributionRequestType::Add,
            "DELETE" => DistributionRequestType::Delete,
            "PULL" => DistributionRequestType::Pull,
            "INVALIDATE" => DistributionRequestType::Invalidate,
            "TEST" => DistributionRequestType::Test,
            _ => return Err(UnknownRequestType(s.to_string())),
        })
    }
}

/// A request to distribute content.
pub trait DistributionRequest: Send + Sync {
    /// Returns the kind of action requested.
    fn request_type(&self) -> DistributionRequestType;

    /// Returns the paths to distribute, in request order.
    fn paths(&self) -> &[String];

    /// Returns `true` if `path` is distributed together with its descendants.
    fn is_deep(&self, path: &str) -> bool;

    /// Returns the filters that apply below `path`.
    fn filters(&self, path: &str) -> &[String];
}

/// Drops empty entries, keeping the order of the rest.
pub fn sanitize_paths<I, S>(paths: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    paths
        .into_iter()
        .map(Into::into)
        .filter(|path| !path.is_empty())
        .collect()
}

/// A plain [`DistributionRequest`].
///
/// Paths and deep paths are sanitized on construction: empty entries are
/// dropped and the order of the remaining paths is kept.
///
/// # Example
///
/// ```rust
/// use distribution_core::{DistributionRequest, DistributionRequestType, SimpleDistributionRequest};
///
/// let req = SimpleDistributionRequest::new(DistributionRequestType::Add, ["test", "", "test2"]);
/// assert_eq!(req.paths(), ["test", "test2"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleDistributionRequest {
    request_type: DistributionRequestType,
    paths: Vec<String>,
    deep_paths: HashSet<String>,
    filters: HashMap<String, Vec<String>>,
}

impl SimpleDistributionRequest {
    /// Creates a shallow request for `paths`.
    pub fn new<I, S>(request_type: DistributionRequestType, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_deep_paths(request_type, paths, Vec::<String>::new())
    }

    /// Creates a request where every path is deep when `is_deep` is set.
    pub fn deep<I, S>(request_type: DistributionRequestType, is_deep: bool, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let paths = sanitize_paths(paths);
        let deep_paths = if is_deep { paths.clone() } else { Vec::new() };
        Self::with_deep_paths(request_type, paths, deep_paths)
    }

    /// Creates a request with an explicit set of deep paths.
    ///
    /// Deep paths need not appear among `paths`.
    pub fn with_deep_paths<I, S, D, T>(
        request_type: DistributionRequestType,
        paths: I,
        deep_paths: D,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        D: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            request_type,
            paths: sanitize_paths(paths),
            deep_paths: sanitize_paths(deep_paths).into_iter().collect(),
            filters: HashMap::new(),
        }
    }

    /// Sets the filters applied below `path` (builder pattern).
    pub fn with_filters<I, S>(mut self, path: impl Into<String>, filters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters
            .insert(path.into(), filters.into_iter().map(Into::into).collect());
        self
    }
}

impl DistributionRequest for SimpleDistributionRequest {
    fn request_type(&self) -> DistributionRequestType {
        self.request_type
    }

    fn paths(&self) -> &[String] {
        &self.paths
    }

    fn is_deep(&self, path: &str) -> bool {
        self.deep_paths.contains(path)
    }

    fn filters(&self, path: &str) -> &[String] {
        self.filters.get(path).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl fmt::Display for SimpleDistributionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SimpleDistributionRequest{{requestType={}, paths=[{}]}}",
            self.request_type,
            self.paths.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADD: DistributionRequestType = DistributionRequestType::Add;

    #[test]
    fn test_sanitise_no_paths() {
        let req = SimpleDistributionRequest::new(ADD, Vec::<String>::new());
        assert!(req.paths().is_empty());
    }

    #[test]
    fn test_sanitise_single_empty_path() {
        let req = SimpleDistributionRequest::new(ADD, [""]);
        assert!(req.paths().is_empty());
    }

    #[test]
    fn test_sanitise_ok_paths() {
        let req = SimpleDistributionRequest::new(ADD, ["test", "test2"]);
        assert_eq!(req.paths().len(), 2);
    }

    #[test]
    fn test_sanitise_some_empty_paths() {
        let req = SimpleDistributionRequest::new(ADD, ["test", "", "test2"]);
        assert_eq!(req.paths(), ["test", "test2"]);
    }

    #[test]
    fn test_sanitise_deep_paths() {
        let req = SimpleDistributionRequest::with_deep_paths(ADD, ["test"], ["test", "", "test2"]);
        assert!(req.is_deep("test"));
        assert!(req.is_deep("test2"));
        assert!(!req.is_deep(""));
    }

    #[test]
    fn test_all_deep() {
        let req = SimpleDistributionRequest::deep(DistributionRequestType::Delete, true, ["/a", "/b"]);
        assert!(req.is_deep("/a") && req.is_deep("/b"));

        let shallow = SimpleDistributionRequest::deep(DistributionRequestType::Delete, false, ["/a"]);
        assert!(!shallow.is_deep("/a"));
    }

    #[test]
    fn test_filters() {
        let req = SimpleDistributionRequest::new(ADD, ["/content"])
            .with_filters("/content", ["+/content/site", "-/content/site/tmp"]);

        assert_eq!(req.filters("/content"), ["+/content/site", "-/content/site/tmp"]);
        assert!(req.filters("/other").is_empty());
    }

    #[test]
    fn test_display() {
        let req = SimpleDistributionRequest::new(ADD, ["/a", "/b"]);
        assert_eq!(
            req.to_string(),
            "SimpleDistributionRequest{requestType=ADD, paths=[/a, /b]}"
        );
    }

    #[test]
    fn test_request_type_wire_names() {
        assert_eq!(
            "invalidate".parse::<DistributionRequestType>(),
            Ok(DistributionRequestType::Invalidate)
        );
        assert!("MOVE".parse::<DistributionRequestType>().is_err());
        assert_eq!(
            serde_json::to_string(&DistributionRequestType::Pull).unwrap(),
            "\"PULL\""
        );
    }
}
