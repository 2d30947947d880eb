use std::string::FromUtf8Error;

use swc_core::common::input::StringInput;
use swc_core::common::sync::Lrc;
use swc_core::common::{FileName, Globals, Mark, SourceMap, GLOBALS};
use swc_core::ecma::ast::Module;
use swc_core::ecma::codegen::text_writer::JsWriter;
use swc_core::ecma::parser::lexer::Lexer;
use swc_core::ecma::parser::{EsSyntax, Parser, Syntax, TsSyntax};
use swc_core::ecma::transforms::base::resolver;
use swc_core::ecma::visit::VisitMutWith;

/// Which grammar the input is parsed with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SourceKind {
  #[default]
  JavaScript,
  Jsx,
  TypeScript,
  Tsx,
}

impl SourceKind {
  pub fn is_typescript(&self) -> bool {
    matches!(self, SourceKind::TypeScript | SourceKind::Tsx)
  }

  fn syntax(&self) -> Syntax {
    match self {
      SourceKind::JavaScript => Syntax::Es(EsSyntax::default()),
      SourceKind::Jsx => Syntax::Es(EsSyntax {
        jsx: true,
        ..Default::default()
      }),
      SourceKind::TypeScript => Syntax::Typescript(TsSyntax::default()),
      SourceKind::Tsx => Syntax::Typescript(TsSyntax {
        tsx: true,
        ..Default::default()
      }),
    }
  }
}

pub struct RunContext {
  /// Source-map in use
  pub source_map: Lrc<SourceMap>,
  /// Global mark from SWC resolver
  pub global_mark: Mark,
  /// Unresolved mark from SWC resolver
  pub unresolved_mark: Mark,
}

pub struct RunTransformResult<R> {
  pub output_code: String,
  /// Whatever the transform returned. For fallible transforms this is the `Result`, so a failed
  /// run still prints the partially transformed module.
  pub output: R,
  pub source_map: Vec<u8>,
}

/// Runner of SWC transformations
///
/// * Parse `code` with SWC using the grammar for `kind`
/// * Run the hygiene resolver so every binding has a scope-aware `Id`
/// * Hand the module to `transform`
/// * Print the module and its source-map
pub fn run_transform<R>(
  code: &str,
  kind: SourceKind,
  transform: impl FnOnce(&RunContext, &mut Module) -> R,
) -> Result<RunTransformResult<R>, RunWithTransformationError> {
  let source_map = Lrc::new(SourceMap::default());
  let source_file = source_map.new_source_file(Lrc::new(FileName::Anon), code.into());

  let lexer = Lexer::new(
    kind.syntax(),
    Default::default(),
    StringInput::from(&*source_file),
    None,
  );

  let mut parser = Parser::new_from(lexer);
  let mut module = parser
    .parse_module()
    .map_err(RunWithTransformationError::SwcParse)?;

  GLOBALS.set(
    &Globals::new(),
    || -> Result<RunTransformResult<R>, RunWithTransformationError> {
      let global_mark = Mark::new();
      let unresolved_mark = Mark::new();
      module.visit_mut_with(&mut resolver(
        unresolved_mark,
        global_mark,
        kind.is_typescript(),
      ));

      let context = RunContext {
        source_map: source_map.clone(),
        global_mark,
        unresolved_mark,
      };
      let output = transform(&context, &mut module);

      let mut line_pos_buffer = vec![];
      let mut output_buffer = vec![];
      let writer = JsWriter::new(
        source_map.clone(),
        "\n",
        &mut output_buffer,
        Some(&mut line_pos_buffer),
      );
      let mut emitter = swc_core::ecma::codegen::Emitter {
        cfg: Default::default(),
        cm: source_map.clone(),
        comments: None,
        wr: writer,
      };
      emitter.emit_module(&module)?;
      let output_code = String::from_utf8(output_buffer)?;
      let output_map = source_map.build_source_map(&line_pos_buffer);
      let mut output_map_buffer = vec![];
      output_map.to_writer(&mut output_map_buffer)?;

      Ok(RunTransformResult {
        output_code,
        output,
        source_map: output_map_buffer,
      })
    },
  )
}

#[derive(Debug, thiserror::Error)]
pub enum RunWithTransformationError {
  #[error("Failed to parse module")]
  SwcParse(swc_core::ecma::parser::error::Error),
  #[error("IO Error: {0}")]
  IoError(#[from] std::io::Error),
  #[error("Invalid utf-8 output: {0}")]
  InvalidUtf8Output(#[from] FromUtf8Error),
  #[error("Failed to generate source map")]
  SourceMap(#[from] sourcemap::Error),
}
