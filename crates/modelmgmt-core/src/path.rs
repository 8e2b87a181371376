//! Model paths
//!
//! A model path addresses a node by the chain of `(type, id)` pairs from
//! its base class or definition down to the node itself, rendered as
//! `type=value('/'type=value)*`, e.g. `definition=PR0001/field=title`.
//! Values are URI-component encoded in the string form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ModelError, Result};
use crate::model::{ModelKind, NodeId};
use crate::ops::ModelGraph;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathSegment {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

impl PathSegment {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }

    pub fn model_kind(&self) -> Option<ModelKind> {
        ModelKind::from_segment(&self.kind)
    }
}

/// Ordered sequence of path segments
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelPath {
    segments: Vec<PathSegment>,
}

impl ModelPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn head(&self) -> Option<&PathSegment> {
        self.segments.first()
    }

    pub fn tail(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Parse a string whose values are URI-component encoded
    ///
    /// # Errors
    ///
    /// See [`build_path_from_encoded_string`].
    pub fn from_encoded_string(path: &str) -> Result<Self> {
        build_path_from_encoded_string(path)
    }

    /// Cursor positioned before the head
    pub fn cursor(&self) -> PathCursor<'_> {
        PathCursor {
            path: self,
            position: None,
        }
    }
}

/// Bidirectional walk over a path's segments
#[derive(Debug, Clone)]
pub struct PathCursor<'a> {
    path: &'a ModelPath,
    position: Option<usize>,
}

impl<'a> PathCursor<'a> {
    pub fn current(&self) -> Option<&'a PathSegment> {
        self.position.and_then(|i| self.path.segments.get(i))
    }

    /// Advance; stays past the end once exhausted
    pub fn next(&mut self) -> Option<&'a PathSegment> {
        let next = self.position.map_or(0, |i| i + 1);
        if next < self.path.segments.len() {
            self.position = Some(next);
            self.current()
        } else {
            self.position = Some(self.path.segments.len());
            None
        }
    }

    pub fn previous(&mut self) -> Option<&'a PathSegment> {
        match self.position {
            Some(i) if i > 0 => {
                self.position = Some(i - 1);
                self.current()
            }
            _ => {
                self.position = None;
                None
            }
        }
    }
}

fn parse(path: &str, decode: bool) -> Result<ModelPath> {
    if path.is_empty() {
        return Ok(ModelPath::new());
    }
    let mut segments = Vec::new();
    for raw in path.split('/') {
        let (kind, value) = raw.split_once('=').ok_or_else(|| ModelError::InvalidPath {
            path: path.to_string(),
            reason: format!("segment '{}' has no '='", raw),
        })?;
        let value = if decode {
            urlencoding::decode(value)
                .map_err(|e| ModelError::InvalidPath {
                    path: path.to_string(),
                    reason: e.to_string(),
                })?
                .into_owned()
        } else {
            value.to_string()
        };
        segments.push(PathSegment::new(kind, value));
    }
    Ok(ModelPath::from_segments(segments))
}

/// Parse a path, taking values verbatim
///
/// Each `/`-separated segment is split on its first `=`. The empty string
/// is the empty path.
///
/// # Errors
///
/// Returns `InvalidPath` if a segment has no `=`.
pub fn build_path_from_string(path: &str) -> Result<ModelPath> {
    parse(path, false)
}

/// Parse a path whose values are URI-component encoded
///
/// # Errors
///
/// Returns `InvalidPath` if a segment has no `=` or does not decode to UTF-8.
pub fn build_path_from_encoded_string(path: &str) -> Result<ModelPath> {
    parse(path, true)
}

/// Path of a node from its base class or definition downwards
///
/// Walks parents until a base-typed node is reached. A detached node that
/// never reaches one yields the path up to its topmost ancestor.
///
/// # Errors
///
/// Returns `NodeNotFound` for a foreign handle, `Internal` if the parent
/// chain loops.
pub fn build_path_from_model(graph: &ModelGraph, node: NodeId) -> Result<ModelPath> {
    let mut segments = Vec::new();
    let mut current = Some(node);
    while let Some(handle) = current {
        if segments.len() > graph.len() {
            return Err(ModelError::Internal {
                message: format!("parent chain of {} loops", node),
            });
        }
        let found = graph.node(handle)?;
        segments.push(PathSegment::new(found.kind().segment(), found.id()));
        if found.kind().is_base_type() {
            break;
        }
        current = found.parent();
    }
    segments.reverse();
    Ok(ModelPath::from_segments(segments))
}

/// Path a node has, or would have, once listed under `context`
///
/// # Errors
///
/// Same as [`build_path_from_model`].
pub fn build_path_in_context(graph: &ModelGraph, context: NodeId, node: NodeId) -> Result<ModelPath> {
    let found = graph.node(node)?;
    if found.kind().is_base_type() {
        return build_path_from_model(graph, node);
    }
    let mut path = build_path_from_model(graph, context)?;
    path.push(PathSegment::new(found.kind().segment(), found.id()));
    Ok(path)
}

/// Render a path with encoded values
pub fn build_string_from_path(path: &ModelPath) -> String {
    path.segments
        .iter()
        .map(|s| format!("{}={}", s.kind, urlencoding::encode(&s.value)))
        .collect::<Vec<_>>()
        .join("/")
}

impl fmt::Display for ModelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&build_string_from_path(self))
    }
}

impl FromStr for ModelPath {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        build_path_from_encoded_string(s)
    }
}

impl ModelGraph {
    /// Locate the node a path addresses
    ///
    /// The head must name a class or definition in the base index; each
    /// further segment is looked up in the matching collection of the node
    /// reached so far.
    pub fn resolve_path(&self, path: &ModelPath) -> Option<NodeId> {
        let mut cursor = path.cursor();
        let head = cursor.next()?;
        let mut current = self.find_base(head.model_kind()?, &head.value)?;
        while let Some(segment) = cursor.next() {
            current = self.child(current, segment.model_kind()?, &segment.value)?;
        }
        Some(current)
    }

    /// Resolve or fail
    ///
    /// # Errors
    ///
    /// Returns `PathNotResolved` when nothing is addressed.
    pub fn require_path(&self, path: &ModelPath) -> Result<NodeId> {
        self.resolve_path(path)
            .ok_or_else(|| ModelError::PathNotResolved {
                selector: path.to_string(),
            })
    }
}
