use swc_core::ecma::ast::{ObjectPatProp, Pat};

use crate::config::PruneConfig;
use crate::editor::{remove_from_container, EditOutcome};
use crate::error::PruneError;
use crate::path::{span_at, BindingPath, Container, Step};

/// `{}` or an array pattern that is only holes. Neither binds anything.
pub fn is_empty_pattern(pat: &Pat) -> bool {
  match pat {
    Pat::Object(object) => object.props.is_empty(),
    Pat::Array(array) => array.elems.iter().all(Option::is_none),
    _ => false,
  }
}

/// Paths of every empty pattern inside `target`, outermost first.
///
/// Empty patterns have no nested patterns, so the returned paths never overlap.
pub fn find_empty_patterns(target: &Pat) -> Vec<BindingPath> {
  let mut found = Vec::new();
  collect_empty(target, &mut BindingPath::new(), &mut found);
  found
}

fn collect_empty(pat: &Pat, path: &mut BindingPath, found: &mut Vec<BindingPath>) {
  if is_empty_pattern(pat) {
    found.push(path.clone());
    return;
  }

  let mut visit = |child: &Pat, step: Step, found: &mut Vec<BindingPath>| {
    path.push(step);
    collect_empty(child, path, found);
    path.pop();
  };

  match pat {
    Pat::Object(object) => {
      for (index, prop) in object.props.iter().enumerate() {
        match prop {
          ObjectPatProp::KeyValue(kv) => visit(&*kv.value, Step::Prop(index), found),
          ObjectPatProp::Rest(rest) => visit(&*rest.arg, Step::PropRest(index), found),
          ObjectPatProp::Assign(_) => {}
        }
      }
    }
    Pat::Array(array) => {
      for (index, elem) in array.elems.iter().enumerate() {
        if let Some(elem) = elem {
          visit(elem, Step::Slot(index), found);
        }
      }
    }
    Pat::Rest(rest) => visit(&*rest.arg, Step::RestArg, found),
    Pat::Assign(assign) => visit(&*assign.left, Step::DefaultLeft, found),
    Pat::Ident(_) | Pat::Expr(_) | Pat::Invalid(_) => {}
  }
}

/// Removes the empty pattern at `path` from whatever holds it, one level up only.
///
/// A parent left empty by this is picked up by the next pass.
pub fn sweep_pattern(
  target: &mut Pat,
  path: &[Step],
  config: &PruneConfig,
) -> Result<EditOutcome, PruneError> {
  let span = span_at(target, path);
  let container = Container::of(target, path)?;
  remove_from_container(target, &container, span, config)
}

#[cfg(test)]
mod tests {
  use super::*;
  use dead_bindings_swc_runner::test_utils::run_test_transform;
  use pretty_assertions::assert_eq;
  use swc_core::common::DUMMY_SP;
  use swc_core::ecma::ast::{ArrayPat, AssignPat, Decl, Expr, Ident, Module, ModuleItem, Stmt};

  use crate::error::NodeKind;

  fn first_target_mut(module: &mut Module) -> &mut Pat {
    match &mut module.body[0] {
      ModuleItem::Stmt(Stmt::Decl(Decl::Var(var))) => &mut var.decls[0].name,
      item => panic!("expected a variable declaration, found {item:?}"),
    }
  }

  /// Sweeps every empty pattern of the first declaration once, last first
  fn sweep(code: &str) -> (String, Vec<EditOutcome>) {
    let result = run_test_transform(code, |_, module| {
      let target = first_target_mut(module);
      let config = PruneConfig::default();
      find_empty_patterns(target)
        .iter()
        .rev()
        .map(|path| sweep_pattern(target, path, &config).unwrap())
        .collect()
    });
    (result.output_code, result.output)
  }

  #[test]
  fn test_empty_patterns() {
    let empty = run_test_transform("let [{}, [, ,], { a }, [b]] = arr;", |_, module| {
      let Pat::Array(array) = first_target_mut(module) else {
        panic!("expected an array pattern");
      };
      array
        .elems
        .iter()
        .map(|elem| elem.as_ref().is_some_and(is_empty_pattern))
        .collect::<Vec<_>>()
    })
    .output;

    assert_eq!(empty, vec![true, true, false, false]);
  }

  #[test]
  fn test_finds_nested_empty_patterns() {
    let paths = run_test_transform("let { a: {}, b: [c, []], d: {} = {} } = obj;", |_, module| {
      find_empty_patterns(first_target_mut(module))
    })
    .output;

    assert_eq!(
      paths,
      vec![
        vec![Step::Prop(0)],
        vec![Step::Prop(1), Step::Slot(1)],
        vec![Step::Prop(2), Step::DefaultLeft],
      ]
    );
  }

  #[test]
  fn test_empty_target_removes_declarator() {
    let (_, outcomes) = sweep("let {} = obj;");
    assert_eq!(outcomes, vec![EditOutcome::RemoveDeclarator]);
  }

  #[test]
  fn test_sweeps_one_level_only() {
    let (output_code, outcomes) = sweep("let { a: { b: {} }, c } = obj;");
    assert_eq!(outcomes, vec![EditOutcome::Edited]);
    assert_eq!(output_code, "let { a: {}, c } = obj;\n");
  }

  #[test]
  fn test_empty_slot_becomes_hole() {
    let (output_code, _) = sweep("let [[], a] = arr;");
    assert_eq!(output_code, "let [, a] = arr;\n");
  }

  #[test]
  fn test_empty_default_in_property() {
    let (output_code, _) = sweep("let { a: {} = {}, b } = obj;");
    assert_eq!(output_code, "let { b } = obj;\n");
  }

  #[test]
  fn test_empty_default_in_slot() {
    let (output_code, _) = sweep("let [a, [] = []] = arr;");
    assert_eq!(output_code, "let [a] = arr;\n");
  }

  #[test]
  fn test_empty_rest_argument() {
    let (output_code, _) = sweep("let [a, ...[]] = arr;");
    assert_eq!(output_code, "let [a] = arr;\n");
  }

  #[test]
  fn test_sibling_sweeps_keep_indices_valid() {
    let (output_code, outcomes) = sweep("let { a: {}, b, c: [] } = obj;");
    assert_eq!(outcomes, vec![EditOutcome::Edited, EditOutcome::Edited]);
    assert_eq!(output_code, "let { b } = obj;\n");
  }

  #[test]
  fn test_empty_default_inside_rest_is_unsupported() {
    let result = run_test_transform("let [...a] = arr;", |_, module| {
      let target = first_target_mut(module);
      // `[...[] = fallback]` cannot be parsed but can be built
      let Pat::Array(array) = &mut *target else {
        panic!("expected an array pattern");
      };
      let Some(Pat::Rest(rest)) = &mut array.elems[0] else {
        panic!("expected a rest element");
      };
      rest.arg = Box::new(Pat::Assign(AssignPat {
        span: DUMMY_SP,
        left: Box::new(Pat::Array(ArrayPat {
          span: DUMMY_SP,
          elems: vec![],
          optional: false,
          type_ann: None,
        })),
        right: Box::new(Expr::Ident(Ident::new_no_ctxt("fallback".into(), DUMMY_SP))),
      }));

      let paths = find_empty_patterns(target);
      assert_eq!(paths, vec![vec![Step::Slot(0), Step::RestArg, Step::DefaultLeft]]);
      sweep_pattern(target, &paths[0], &PruneConfig::default())
    })
    .output;

    assert_eq!(result.map_err(|err| err.kind()), Err(NodeKind::RestPat));
  }
}
