use swc_core::ecma::ast::*;
use swc_core::ecma::visit::{VisitMut, VisitMutWith, VisitWith};

use crate::config::PruneConfig;
use crate::editor::{remove_leaf, EditOutcome};
use crate::error::PruneError;
use crate::liveness::{Liveness, ReferenceCollector, ReferenceIndex};
use crate::locator::locate_bindings;
use crate::sweeper::{find_empty_patterns, sweep_pattern};

/// Counters for one [`DeadBindingPruner`] run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PruneStats {
  /// Full walks over the tree, including the final one that changed nothing
  pub passes: usize,
  pub removed_bindings: usize,
  pub swept_patterns: usize,
  pub removed_declarators: usize,
}

impl PruneStats {
  pub fn edits(&self) -> usize {
    self.removed_bindings + self.swept_patterns
  }

  fn add(&mut self, other: &PruneStats) {
    self.removed_bindings += other.removed_bindings;
    self.swept_patterns += other.swept_patterns;
    self.removed_declarators += other.removed_declarators;
  }
}

/// Removes variable bindings that are never referenced.
///
/// Works on `var`, `let` and `const` declarators whose target is an identifier or an
/// object/array destructuring pattern. Removing a binding can make another one unused, either
/// because the removed initializer or default value was its only use or because a nested pattern
/// became empty, so the pruner repeats full passes until one changes nothing.
///
/// The tree must have been run through swc's `resolver` first, names are compared by `Id`.
///
/// # Example
///
/// Input:
/// ```js
/// const a = 1;
/// const { b, c: [d, e, f] } = obj;
/// console.log(b, f);
/// ```
///
/// Output:
/// ```js
/// const { b, c: [, , f] } = obj;
/// console.log(b, f);
/// ```
///
/// Exported declarations are never touched. A `for ... in/of` head keeps its declarator, only
/// unused names inside its destructuring pattern are removed.
#[derive(Debug, Default)]
pub struct DeadBindingPruner {
  config: PruneConfig,
}

impl DeadBindingPruner {
  pub fn new(config: PruneConfig) -> Self {
    Self { config }
  }

  pub fn run_module(&self, module: &mut Module) -> Result<PruneStats, PruneError> {
    self.run_to_fixed_point(module)
  }

  pub fn run_script(&self, script: &mut Script) -> Result<PruneStats, PruneError> {
    self.run_to_fixed_point(script)
  }

  pub fn run_program(&self, program: &mut Program) -> Result<PruneStats, PruneError> {
    match program {
      Program::Module(module) => self.run_module(module),
      Program::Script(script) => self.run_script(script),
    }
  }

  /// Rebuilds the reference index and walks the whole tree until a walk makes no edit.
  ///
  /// An unsupported binding shape stops the run immediately. Edits from earlier passes, and from
  /// the failing pass up to that point, stay in the tree.
  #[tracing::instrument(level = "debug", skip_all)]
  fn run_to_fixed_point<N>(&self, node: &mut N) -> Result<PruneStats, PruneError>
  where
    N: VisitWith<ReferenceCollector> + for<'a> VisitMutWith<PruneWalk<'a>>,
  {
    let mut stats = PruneStats::default();

    loop {
      let index = ReferenceIndex::build(node, &self.config);
      let mut walk = PruneWalk::new(&index, &self.config);
      node.visit_mut_with(&mut walk);
      stats.passes += 1;

      if let Some(error) = walk.error {
        tracing::debug!(pass = stats.passes, %error, "pruning aborted");
        return Err(error);
      }

      stats.add(&walk.stats);
      tracing::debug!(
        pass = stats.passes,
        removed_bindings = walk.stats.removed_bindings,
        swept_patterns = walk.stats.swept_patterns,
        "finished pruning pass"
      );

      if walk.stats.edits() == 0 {
        return Ok(stats);
      }
    }
  }
}

/// Takes the module, removes every transitively unused binding and hands it back.
pub fn remove_unused_bindings(
  mut module: Module,
  config: &PruneConfig,
) -> Result<Module, PruneError> {
  DeadBindingPruner::new(config.clone()).run_module(&mut module)?;
  Ok(module)
}

/// One pass over the tree against a fixed reference index.
pub(crate) struct PruneWalk<'a> {
  liveness: &'a dyn Liveness,
  config: &'a PruneConfig,
  stats: PruneStats,
  error: Option<PruneError>,
}

impl<'a> PruneWalk<'a> {
  fn new(liveness: &'a dyn Liveness, config: &'a PruneConfig) -> Self {
    Self {
      liveness,
      config,
      stats: PruneStats::default(),
      error: None,
    }
  }

  /// Prunes one declarator's target in place. Returns whether the whole declarator must go.
  fn prune_declarator(&mut self, declarator: &mut VarDeclarator) -> Result<bool, PruneError> {
    if let Pat::Ident(binding) = &declarator.name {
      if self.liveness.is_referenced(&binding.id.to_id()) {
        return Ok(false);
      }
      tracing::trace!(binding = %binding.id.sym, "removing unused declarator");
      self.stats.removed_bindings += 1;
      self.stats.removed_declarators += 1;
      return Ok(true);
    }

    self.prune_pattern(&mut declarator.name, true)
  }

  /// Removes dead leaves and empty patterns from an object or array target.
  ///
  /// When `removable` is false the declarator has to stay, as in a loop head, and an emptied
  /// target is left as `{}` or `[]`.
  fn prune_pattern(&mut self, target: &mut Pat, removable: bool) -> Result<bool, PruneError> {
    if !matches!(target, Pat::Object(_) | Pat::Array(_)) {
      return Ok(false);
    }

    let dead: Vec<_> = locate_bindings(target)?
      .into_iter()
      .filter(|leaf| !self.liveness.is_referenced(&leaf.id))
      .collect();

    // Last leaf first, so removing a property never shifts an index that is still to be used
    for leaf in dead.iter().rev() {
      match remove_leaf(target, leaf, self.config)? {
        EditOutcome::Edited => {
          tracing::trace!(binding = %leaf.id.0, "removing unused binding");
          self.stats.removed_bindings += 1;
        }
        EditOutcome::Kept => {}
        EditOutcome::RemoveDeclarator if !removable => {}
        EditOutcome::RemoveDeclarator => {
          self.stats.removed_bindings += 1;
          self.stats.removed_declarators += 1;
          return Ok(true);
        }
      }
    }

    for path in find_empty_patterns(target).iter().rev() {
      match sweep_pattern(target, path, self.config)? {
        EditOutcome::Edited => {
          tracing::trace!(?path, "sweeping empty pattern");
          self.stats.swept_patterns += 1;
        }
        EditOutcome::Kept => {}
        EditOutcome::RemoveDeclarator if !removable => {}
        EditOutcome::RemoveDeclarator => {
          tracing::trace!("sweeping empty declarator");
          self.stats.swept_patterns += 1;
          self.stats.removed_declarators += 1;
          return Ok(true);
        }
      }
    }

    Ok(false)
  }

  // The loop variable itself must stay, only names inside its pattern can go
  fn prune_loop_head(&mut self, head: &mut ForHead) {
    let ForHead::VarDecl(var) = head else {
      return;
    };

    for declarator in var.decls.iter_mut() {
      declarator.name.visit_mut_with(self);
      if self.error.is_some() {
        return;
      }
      if let Err(error) = self.prune_pattern(&mut declarator.name, false) {
        self.error = Some(error);
        return;
      }
    }
  }
}

fn is_emptied_var(stmt: &Stmt) -> bool {
  matches!(stmt, Stmt::Decl(Decl::Var(var)) if var.decls.is_empty())
}

impl VisitMut for PruneWalk<'_> {
  fn visit_mut_var_decl(&mut self, var: &mut VarDecl) {
    let mut keep = Vec::with_capacity(var.decls.len());
    for declarator in var.decls.iter_mut() {
      // Default values and initializers can hold nested declarations
      declarator.name.visit_mut_with(self);
      declarator.init.visit_mut_with(self);
      if self.error.is_some() {
        keep.push(true);
        continue;
      }

      match self.prune_declarator(declarator) {
        Ok(remove) => keep.push(!remove),
        Err(error) => {
          self.error = Some(error);
          keep.push(true);
        }
      }
    }

    let mut keep = keep.into_iter();
    var.decls.retain(|_| keep.next().unwrap_or(true));
  }

  // Statements in a list are dropped once their last declarator is gone
  fn visit_mut_stmts(&mut self, stmts: &mut Vec<Stmt>) {
    for stmt in stmts.iter_mut() {
      stmt.visit_mut_children_with(self);
    }
    stmts.retain(|stmt| !is_emptied_var(stmt));
  }

  fn visit_mut_module_items(&mut self, items: &mut Vec<ModuleItem>) {
    for item in items.iter_mut() {
      match item {
        ModuleItem::Stmt(stmt) => stmt.visit_mut_children_with(self),
        ModuleItem::ModuleDecl(decl) => decl.visit_mut_with(self),
      }
    }
    items.retain(|item| !matches!(item, ModuleItem::Stmt(stmt) if is_emptied_var(stmt)));
  }

  // Single statement positions such as `if (x) var y = 1;` cannot lose the statement
  fn visit_mut_stmt(&mut self, stmt: &mut Stmt) {
    stmt.visit_mut_children_with(self);
    let emptied = match stmt {
      Stmt::Decl(Decl::Var(var)) if var.decls.is_empty() => Some(var.span),
      _ => None,
    };
    if let Some(span) = emptied {
      *stmt = Stmt::Empty(EmptyStmt { span });
    }
  }

  fn visit_mut_for_stmt(&mut self, node: &mut ForStmt) {
    node.visit_mut_children_with(self);
    if matches!(&node.init, Some(VarDeclOrExpr::VarDecl(var)) if var.decls.is_empty()) {
      node.init = None;
    }
  }

  fn visit_mut_for_in_stmt(&mut self, node: &mut ForInStmt) {
    self.prune_loop_head(&mut node.left);
    node.right.visit_mut_with(self);
    node.body.visit_mut_with(self);
  }

  fn visit_mut_for_of_stmt(&mut self, node: &mut ForOfStmt) {
    self.prune_loop_head(&mut node.left);
    node.right.visit_mut_with(self);
    node.body.visit_mut_with(self);
  }

  fn visit_mut_export_decl(&mut self, export: &mut ExportDecl) {
    match &mut export.decl {
      Decl::Var(var) => {
        for declarator in var.decls.iter_mut() {
          declarator.init.visit_mut_with(self);
        }
      }
      decl => decl.visit_mut_with(self),
    }
  }
}
