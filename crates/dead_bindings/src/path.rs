use swc_core::common::{Span, Spanned};
use swc_core::ecma::ast::{ArrayPat, ObjectPat, ObjectPatProp, Pat};

use crate::error::{NodeKind, PruneError};

/// One structural hop from a pattern to a pattern nested directly inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
  /// `props[i]` of an object pattern. Lands on the value of `{ key: value }`, or on the key
  /// binding itself for shorthand `{ key }` and `{ key = fallback }`.
  Prop(usize),
  /// The argument of the `...rest` at `props[i]` of an object pattern.
  PropRest(usize),
  /// `elems[i]` of an array pattern.
  Slot(usize),
  /// The argument of a `...rest` element.
  RestArg,
  /// The binding side of `binding = fallback`.
  DefaultLeft,
}

/// Steps from a declarator's binding target down to one node inside it. Empty for the target.
pub type BindingPath = Vec<Step>;

/// What directly holds a node inside a binding target.
///
/// Parent pattern positions are borrowed prefixes of the node's own path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Container<'p> {
  /// The declarator binds the node directly.
  Declarator,
  /// `props[index]` of the object pattern at `object`.
  Property { object: &'p [Step], index: usize },
  /// `elems[index]` of the array pattern at `array`.
  Slot { array: &'p [Step], index: usize },
  /// The `...rest` at `props[index]` of the object pattern at `object`.
  ObjectRest { object: &'p [Step], index: usize },
  /// The `...rest` at `elems[index]` of the array pattern at `array`.
  ArrayRest { array: &'p [Step], index: usize },
  /// A `binding = fallback` wrapper spanning `span`, itself held by `wrapper`.
  Default {
    wrapper: Box<Container<'p>>,
    span: Span,
  },
}

impl<'p> Container<'p> {
  /// Classifies the container of the node at `path` inside `target`.
  pub fn of(target: &Pat, path: &'p [Step]) -> Result<Self, PruneError> {
    let Some((last, parent)) = path.split_last() else {
      return Ok(Container::Declarator);
    };

    let container = match *last {
      Step::Prop(index) => Container::Property {
        object: parent,
        index,
      },
      Step::PropRest(index) => Container::ObjectRest {
        object: parent,
        index,
      },
      Step::Slot(index) => Container::Slot {
        array: parent,
        index,
      },
      Step::RestArg => match parent.split_last() {
        Some((Step::Slot(index), array)) => Container::ArrayRest {
          array,
          index: *index,
        },
        _ => {
          return Err(PruneError::unsupported(
            NodeKind::RestPat,
            span_at(target, parent),
          ))
        }
      },
      Step::DefaultLeft => Container::Default {
        wrapper: Box::new(Container::of(target, parent)?),
        span: span_at(target, parent),
      },
    };

    Ok(container)
  }

  /// The kind of node this container stands for, used when reporting it as unsupported.
  pub fn kind(&self) -> NodeKind {
    match self {
      Container::Declarator => NodeKind::VarDeclarator,
      Container::Property { .. } => NodeKind::KeyValuePatProp,
      Container::Slot { .. } => NodeKind::ArrayPat,
      Container::ObjectRest { .. } | Container::ArrayRest { .. } => NodeKind::RestPat,
      Container::Default { .. } => NodeKind::AssignPat,
    }
  }
}

pub(crate) fn pat_at<'a>(pat: &'a Pat, path: &[Step]) -> Option<&'a Pat> {
  let Some((step, rest)) = path.split_first() else {
    return Some(pat);
  };

  let child: &Pat = match (*step, pat) {
    (Step::Prop(index), Pat::Object(object)) => match object.props.get(index)? {
      ObjectPatProp::KeyValue(kv) => &*kv.value,
      _ => return None,
    },
    (Step::PropRest(index), Pat::Object(object)) => match object.props.get(index)? {
      ObjectPatProp::Rest(rest) => &*rest.arg,
      _ => return None,
    },
    (Step::Slot(index), Pat::Array(array)) => array.elems.get(index)?.as_ref()?,
    (Step::RestArg, Pat::Rest(rest)) => &*rest.arg,
    (Step::DefaultLeft, Pat::Assign(assign)) => &*assign.left,
    _ => return None,
  };

  pat_at(child, rest)
}

pub(crate) fn pat_at_mut<'a>(pat: &'a mut Pat, path: &[Step]) -> Option<&'a mut Pat> {
  let Some((step, rest)) = path.split_first() else {
    return Some(pat);
  };

  let child: &mut Pat = match (*step, pat) {
    (Step::Prop(index), Pat::Object(object)) => match object.props.get_mut(index)? {
      ObjectPatProp::KeyValue(kv) => &mut *kv.value,
      _ => return None,
    },
    (Step::PropRest(index), Pat::Object(object)) => match object.props.get_mut(index)? {
      ObjectPatProp::Rest(rest) => &mut *rest.arg,
      _ => return None,
    },
    (Step::Slot(index), Pat::Array(array)) => array.elems.get_mut(index)?.as_mut()?,
    (Step::RestArg, Pat::Rest(rest)) => &mut *rest.arg,
    (Step::DefaultLeft, Pat::Assign(assign)) => &mut *assign.left,
    _ => return None,
  };

  pat_at_mut(child, rest)
}

pub(crate) fn object_at_mut<'a>(target: &'a mut Pat, path: &[Step]) -> Option<&'a mut ObjectPat> {
  match pat_at_mut(target, path)? {
    Pat::Object(object) => Some(object),
    _ => None,
  }
}

pub(crate) fn array_at_mut<'a>(target: &'a mut Pat, path: &[Step]) -> Option<&'a mut ArrayPat> {
  match pat_at_mut(target, path)? {
    Pat::Array(array) => Some(array),
    _ => None,
  }
}

/// Span of the node at `path`, or of the whole target when the path no longer resolves.
pub(crate) fn span_at(target: &Pat, path: &[Step]) -> Span {
  pat_at(target, path).unwrap_or(target).span()
}
