use std::fmt;

use serde::{Deserialize, Serialize};
use swc_core::common::{SourceMap, Span};

/// The syntactic shape a pruning step was looking at when it gave up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
  VarDeclarator,
  ObjectPat,
  ArrayPat,
  KeyValuePatProp,
  AssignPatProp,
  RestPat,
  AssignPat,
  ExprPat,
  Invalid,
  /// A container was expected but nothing was there (a hole, or a path that no longer resolves)
  Missing,
}

impl fmt::Display for NodeKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      NodeKind::VarDeclarator => "VarDeclarator",
      NodeKind::ObjectPat => "ObjectPat",
      NodeKind::ArrayPat => "ArrayPat",
      NodeKind::KeyValuePatProp => "KeyValuePatProp",
      NodeKind::AssignPatProp => "AssignPatProp",
      NodeKind::RestPat => "RestPat",
      NodeKind::AssignPat => "AssignPat",
      NodeKind::ExprPat => "ExprPat",
      NodeKind::Invalid => "Invalid",
      NodeKind::Missing => "null",
    };
    f.write_str(name)
  }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PruneError {
  /// A binding shape the pass has no case for. The run stops at the first one; edits made
  /// before it stay in the tree.
  #[error("[dead-bindings] Unsupported node type: {kind}")]
  UnsupportedNode { kind: NodeKind, span: Span },
}

impl PruneError {
  pub(crate) fn unsupported(kind: NodeKind, span: Span) -> Self {
    PruneError::UnsupportedNode { kind, span }
  }

  pub fn kind(&self) -> NodeKind {
    match self {
      PruneError::UnsupportedNode { kind, .. } => *kind,
    }
  }

  pub fn span(&self) -> Span {
    match self {
      PruneError::UnsupportedNode { span, .. } => *span,
    }
  }

  /// Line/column position of the offending node in `source_map`. `None` for nodes built
  /// without a source position.
  pub fn location(&self, source_map: &SourceMap) -> Option<SourceLocation> {
    SourceLocation::from_span(source_map, self.span())
  }
}

/// 1-based source range, as reported to users.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
  pub start_line: usize,
  pub start_col: usize,
  pub end_line: usize,
  pub end_col: usize,
}

impl SourceLocation {
  pub fn from_span(source_map: &SourceMap, span: Span) -> Option<Self> {
    if span.lo.is_dummy() || span.hi.is_dummy() {
      return None;
    }

    let start = source_map.lookup_char_pos(span.lo);
    let end = source_map.lookup_char_pos(span.hi);
    Some(SourceLocation {
      start_line: start.line,
      start_col: start.col_display + 1,
      end_line: end.line,
      end_col: end.col_display + 1,
    })
  }
}
