use std::collections::HashSet;

use swc_core::ecma::ast::{AssignTarget, BindingIdent, Expr, ForHead, Id, Ident};
use swc_core::ecma::visit::{Visit, VisitWith};

use crate::config::PruneConfig;

/// Answers whether a declared name is used anywhere outside its own binding position.
pub trait Liveness {
  fn is_referenced(&self, id: &Id) -> bool;
}

/// Every identifier use found in a tree at the time it was built.
///
/// The index goes stale as soon as the tree is edited. Stale answers can only over-report uses,
/// since edits never add references, so the pruner rebuilds it once per pass.
pub struct ReferenceIndex<'a> {
  references: HashSet<Id>,
  config: &'a PruneConfig,
}

impl<'a> ReferenceIndex<'a> {
  pub fn build<N: VisitWith<ReferenceCollector>>(node: &N, config: &'a PruneConfig) -> Self {
    let mut collector = ReferenceCollector::default();
    node.visit_with(&mut collector);
    tracing::trace!(references = collector.references.len(), "built reference index");
    ReferenceIndex {
      references: collector.references,
      config,
    }
  }
}

impl Liveness for ReferenceIndex<'_> {
  fn is_referenced(&self, id: &Id) -> bool {
    self.references.contains(id) || self.config.retains(&id.0)
  }
}

/// Visitor that collects identifier uses.
///
/// Anything that is an `Ident` is a use: expressions, shorthand properties, JSX element names,
/// export specifiers, type references. `BindingIdent`s are declarations and are skipped, except
/// when they are the target of an assignment (`x = 1`, `[x] = value`, `for (x of value)`).
#[derive(Default)]
pub struct ReferenceCollector {
  references: HashSet<Id>,
  in_assign_target: bool,
}

impl ReferenceCollector {
  fn with_assign_target(&mut self, in_assign_target: bool, visit: impl FnOnce(&mut Self)) {
    let previous = std::mem::replace(&mut self.in_assign_target, in_assign_target);
    visit(self);
    self.in_assign_target = previous;
  }
}

impl Visit for ReferenceCollector {
  fn visit_ident(&mut self, ident: &Ident) {
    self.references.insert(ident.to_id());
  }

  fn visit_binding_ident(&mut self, binding: &BindingIdent) {
    if self.in_assign_target {
      self.references.insert(binding.id.to_id());
    }
    binding.type_ann.visit_with(self);
  }

  fn visit_assign_target(&mut self, target: &AssignTarget) {
    self.with_assign_target(true, |this| target.visit_children_with(this));
  }

  fn visit_for_head(&mut self, head: &ForHead) {
    match head {
      ForHead::Pat(pat) => self.with_assign_target(true, |this| pat.visit_with(this)),
      _ => head.visit_children_with(self),
    }
  }

  // Defaults and computed keys inside an assignment target are ordinary expressions
  fn visit_expr(&mut self, expr: &Expr) {
    self.with_assign_target(false, |this| expr.visit_children_with(this));
  }
}
