use swc_core::common::Span;
use swc_core::ecma::ast::{ArrayPat, ObjectPatProp, Pat};

use crate::config::PruneConfig;
use crate::error::{NodeKind, PruneError};
use crate::locator::LeafBinding;
use crate::path::{array_at_mut, object_at_mut, Container, Step};

/// What an edit did to a binding target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditOutcome {
  /// The target was changed in place.
  Edited,
  /// The node is the whole target, the caller must drop the declarator.
  RemoveDeclarator,
  /// The edit was skipped because of [`PruneConfig::preserve_rest_siblings`].
  Kept,
}

/// Removes one dead leaf from `target`, leaving a valid pattern behind.
///
/// * bound directly by the declarator: the declarator goes
/// * object property or rest element: removed
/// * array slot: becomes a hole, later slots keep their index
/// * `leaf = fallback`: the whole wrapper goes, as a property or a hole depending on what holds it
pub fn remove_leaf(
  target: &mut Pat,
  leaf: &LeafBinding,
  config: &PruneConfig,
) -> Result<EditOutcome, PruneError> {
  let container = Container::of(target, &leaf.path)?;
  remove_from_container(target, &container, leaf.span, config)
}

/// Removes whatever sits in `container`. `span` locates the node being removed in errors.
pub(crate) fn remove_from_container(
  target: &mut Pat,
  container: &Container<'_>,
  span: Span,
  config: &PruneConfig,
) -> Result<EditOutcome, PruneError> {
  match container {
    Container::Declarator => Ok(EditOutcome::RemoveDeclarator),
    Container::Property { object, index } | Container::ObjectRest { object, index } => {
      remove_property(target, object, *index, span, config)
    }
    Container::Slot { array, index } => hole_slot(target, array, *index, span),
    Container::ArrayRest { array, index } => remove_array_rest(target, array, *index, span),
    Container::Default { wrapper, span } => match wrapper.as_ref() {
      Container::Property { object, index } => remove_property(target, object, *index, *span, config),
      Container::Slot { array, index } => hole_slot(target, array, *index, *span),
      other => Err(PruneError::unsupported(other.kind(), *span)),
    },
  }
}

fn remove_property(
  target: &mut Pat,
  object: &[Step],
  index: usize,
  span: Span,
  config: &PruneConfig,
) -> Result<EditOutcome, PruneError> {
  let object = object_at_mut(target, object)
    .ok_or_else(|| PruneError::unsupported(NodeKind::Missing, span))?;
  if index >= object.props.len() {
    return Err(PruneError::unsupported(NodeKind::Missing, span));
  }

  let has_rest_sibling = object
    .props
    .iter()
    .enumerate()
    .any(|(i, prop)| i != index && matches!(prop, ObjectPatProp::Rest(_)));
  if config.preserve_rest_siblings && has_rest_sibling {
    return Ok(EditOutcome::Kept);
  }

  object.props.remove(index);
  Ok(EditOutcome::Edited)
}

fn hole_slot(
  target: &mut Pat,
  array: &[Step],
  index: usize,
  span: Span,
) -> Result<EditOutcome, PruneError> {
  let array = array_at_mut(target, array)
    .ok_or_else(|| PruneError::unsupported(NodeKind::Missing, span))?;
  let slot = array
    .elems
    .get_mut(index)
    .filter(|slot| slot.is_some())
    .ok_or_else(|| PruneError::unsupported(NodeKind::Missing, span))?;
  *slot = None;

  trim_trailing_holes(array);
  Ok(EditOutcome::Edited)
}

fn remove_array_rest(
  target: &mut Pat,
  array: &[Step],
  index: usize,
  span: Span,
) -> Result<EditOutcome, PruneError> {
  let array = array_at_mut(target, array)
    .ok_or_else(|| PruneError::unsupported(NodeKind::Missing, span))?;
  if !matches!(array.elems.get(index), Some(Some(Pat::Rest(_)))) {
    return Err(PruneError::unsupported(NodeKind::Missing, span));
  }

  array.elems.remove(index);
  trim_trailing_holes(array);
  Ok(EditOutcome::Edited)
}

// [a, , ,] and [a] bind the same thing
fn trim_trailing_holes(array: &mut ArrayPat) {
  while matches!(array.elems.last(), Some(None)) {
    array.elems.pop();
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::locator::locate_bindings;
  use dead_bindings_swc_runner::test_utils::{run_test_transform, RunTransformResult};
  use pretty_assertions::assert_eq;
  use swc_core::common::DUMMY_SP;
  use swc_core::ecma::ast::{
    AssignPat, Decl, Expr, Invalid, Lit, Module, ModuleItem, Null, Stmt,
  };

  fn first_target_mut(module: &mut Module) -> &mut Pat {
    match &mut module.body[0] {
      ModuleItem::Stmt(Stmt::Decl(Decl::Var(var))) => &mut var.decls[0].name,
      item => panic!("expected a variable declaration, found {item:?}"),
    }
  }

  /// Removes the leaf called `name` from the first declaration
  fn remove_named(code: &str, name: &str, config: &PruneConfig) -> (String, EditOutcome) {
    let RunTransformResult {
      output_code,
      output,
      ..
    } = run_test_transform(code, |_, module| {
      let target = first_target_mut(module);
      let leaf = locate_bindings(target)
        .unwrap()
        .into_iter()
        .find(|leaf| &*leaf.id.0 == name)
        .unwrap();
      remove_leaf(target, &leaf, config).unwrap()
    });
    (output_code, output)
  }

  #[test]
  fn test_identifier_target_removes_declarator() {
    let (_, outcome) = remove_named("let x = 1;", "x", &PruneConfig::default());
    assert_eq!(outcome, EditOutcome::RemoveDeclarator);
  }

  #[test]
  fn test_removes_object_property() {
    let (output_code, outcome) =
      remove_named("let { a, b } = obj;", "a", &PruneConfig::default());
    assert_eq!(outcome, EditOutcome::Edited);
    assert_eq!(output_code, "let { b } = obj;\n");
  }

  #[test]
  fn test_removes_renamed_property() {
    let (output_code, _) =
      remove_named("let { a: renamed, b } = obj;", "renamed", &PruneConfig::default());
    assert_eq!(output_code, "let { b } = obj;\n");
  }

  #[test]
  fn test_interior_slot_becomes_hole() {
    let (output_code, _) = remove_named("let [a, b, c] = arr;", "b", &PruneConfig::default());
    assert_eq!(output_code, "let [a, , c] = arr;\n");
  }

  #[test]
  fn test_trailing_slot_is_trimmed() {
    let (output_code, _) = remove_named("let [a, , c] = arr;", "c", &PruneConfig::default());
    assert_eq!(output_code, "let [a] = arr;\n");
  }

  #[test]
  fn test_default_in_slot_becomes_hole() {
    let (output_code, _) =
      remove_named("let [a = 1, b] = arr;", "a", &PruneConfig::default());
    assert_eq!(output_code, "let [, b] = arr;\n");
  }

  #[test]
  fn test_default_in_property_removes_property() {
    let (output_code, _) = remove_named(
      "let { a: a = 1, b = 2, c } = obj;",
      "a",
      &PruneConfig::default(),
    );
    assert_eq!(output_code, "let { b = 2, c } = obj;\n");
  }

  #[test]
  fn test_shorthand_default_removes_property() {
    let (output_code, _) =
      remove_named("let { a, b = 2 } = obj;", "b", &PruneConfig::default());
    assert_eq!(output_code, "let { a } = obj;\n");
  }

  #[test]
  fn test_removes_object_rest() {
    let (output_code, _) =
      remove_named("let { a, ...rest } = obj;", "rest", &PruneConfig::default());
    assert_eq!(output_code, "let { a } = obj;\n");
  }

  #[test]
  fn test_removes_array_rest() {
    let (output_code, _) =
      remove_named("let [a, , ...rest] = arr;", "rest", &PruneConfig::default());
    assert_eq!(output_code, "let [a] = arr;\n");
  }

  #[test]
  fn test_rest_sibling_is_kept_when_configured() {
    let config = PruneConfig {
      preserve_rest_siblings: true,
      ..Default::default()
    };
    let (output_code, outcome) = remove_named("let { a, ...rest } = obj;", "a", &config);
    assert_eq!(outcome, EditOutcome::Kept);
    assert_eq!(output_code, "let { a, ...rest } = obj;\n");
  }

  #[test]
  fn test_default_inside_rest_is_unsupported() {
    let result = run_test_transform("let [...a] = arr;", |_, module| {
      let target = first_target_mut(module);
      let leaf = locate_bindings(target).unwrap().remove(0);
      // `[...a = null]` cannot be parsed but can be built
      let Pat::Array(array) = &mut *target else {
        panic!("expected an array pattern");
      };
      let Some(Pat::Rest(rest)) = &mut array.elems[0] else {
        panic!("expected a rest element");
      };
      let left = std::mem::replace(
        &mut rest.arg,
        Box::new(Pat::Invalid(Invalid { span: DUMMY_SP })),
      );
      rest.arg = Box::new(Pat::Assign(AssignPat {
        span: DUMMY_SP,
        left,
        right: Box::new(Expr::Lit(Lit::Null(Null { span: DUMMY_SP }))),
      }));

      let mut path = leaf.path.clone();
      path.push(Step::DefaultLeft);
      let leaf = LeafBinding { path, ..leaf };
      remove_leaf(target, &leaf, &PruneConfig::default())
    })
    .output;

    assert_eq!(result.map_err(|err| err.kind()), Err(NodeKind::RestPat));
  }
}
