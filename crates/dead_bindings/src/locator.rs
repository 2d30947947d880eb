use swc_core::common::{Span, Spanned};
use swc_core::ecma::ast::{Id, Ident, ObjectPatProp, Pat};

use crate::error::{NodeKind, PruneError};
use crate::path::{BindingPath, Step};

/// A single name bound somewhere inside a declarator's binding target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeafBinding {
  /// Scope aware id of the bound name
  pub id: Id,
  pub span: Span,
  /// Where the name sits inside the binding target
  pub path: BindingPath,
}

impl LeafBinding {
  fn new(ident: &Ident, path: &BindingPath) -> Self {
    LeafBinding {
      id: ident.to_id(),
      span: ident.span,
      path: path.clone(),
    }
  }
}

/// Lists every name a binding target introduces, depth-first in source order.
///
/// Default values and computed keys are skipped, only the binding side of a pattern is walked.
/// Holes yield nothing. Expression and invalid patterns are reported as unsupported.
pub fn locate_bindings(target: &Pat) -> Result<Vec<LeafBinding>, PruneError> {
  let mut leaves = Vec::new();
  collect_leaves(target, &mut BindingPath::new(), &mut leaves)?;
  Ok(leaves)
}

fn collect_leaves(
  pat: &Pat,
  path: &mut BindingPath,
  leaves: &mut Vec<LeafBinding>,
) -> Result<(), PruneError> {
  match pat {
    Pat::Ident(binding) => leaves.push(LeafBinding::new(&binding.id, path)),
    Pat::Object(object) => {
      for (index, prop) in object.props.iter().enumerate() {
        match prop {
          ObjectPatProp::KeyValue(kv) => descend(&kv.value, Step::Prop(index), path, leaves)?,
          ObjectPatProp::Assign(shorthand) => {
            path.push(Step::Prop(index));
            leaves.push(LeafBinding::new(&shorthand.key.id, path));
            path.pop();
          }
          ObjectPatProp::Rest(rest) => descend(&rest.arg, Step::PropRest(index), path, leaves)?,
        }
      }
    }
    Pat::Array(array) => {
      for (index, elem) in array.elems.iter().enumerate() {
        if let Some(elem) = elem {
          descend(elem, Step::Slot(index), path, leaves)?;
        }
      }
    }
    Pat::Rest(rest) => descend(&rest.arg, Step::RestArg, path, leaves)?,
    Pat::Assign(assign) => descend(&assign.left, Step::DefaultLeft, path, leaves)?,
    Pat::Expr(expr) => return Err(PruneError::unsupported(NodeKind::ExprPat, expr.span())),
    Pat::Invalid(invalid) => return Err(PruneError::unsupported(NodeKind::Invalid, invalid.span)),
  }

  Ok(())
}

fn descend(
  pat: &Pat,
  step: Step,
  path: &mut BindingPath,
  leaves: &mut Vec<LeafBinding>,
) -> Result<(), PruneError> {
  path.push(step);
  let result = collect_leaves(pat, path, leaves);
  path.pop();
  result
}
