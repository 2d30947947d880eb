use swc_core::ecma::ast::Module;

use crate::runner::{run_transform, SourceKind};
pub use crate::runner::{RunContext, RunTransformResult};

/// In the future this might be a different type to `RunContext`
pub type RunTestContext = RunContext;

/// Helper to test SWC transforms.
///
/// * Parse JavaScript `code` with SWC
/// * Run the transform over it
/// * Return the result
///
pub fn run_test_transform<R>(
  code: &str,
  transform: impl FnOnce(&RunTestContext, &mut Module) -> R,
) -> RunTransformResult<R> {
  run_transform(code, SourceKind::JavaScript, transform).unwrap()
}

/// Same as `run_test_transform` for TypeScript sources
pub fn run_test_transform_ts<R>(
  code: &str,
  transform: impl FnOnce(&RunTestContext, &mut Module) -> R,
) -> RunTransformResult<R> {
  run_transform(code, SourceKind::TypeScript, transform).unwrap()
}

/// Same as `run_test_transform` for JSX sources
pub fn run_test_transform_jsx<R>(
  code: &str,
  transform: impl FnOnce(&RunTestContext, &mut Module) -> R,
) -> RunTransformResult<R> {
  run_transform(code, SourceKind::Jsx, transform).unwrap()
}
