//! Convenience parsing for callers that hold source text instead of a tree.
//!
//! The core itself only needs a `Program`; hosts that already run oxc can
//! skip this module entirely (build without the `parser` feature).

use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::error::{LintError, Result};

/// Parse `source` as the file at `path`.
///
/// The source type is taken from the path's extension, falling back to
/// TypeScript. Any parse error fails the whole file; the core never works
/// from a partial tree.
pub fn parse_program<'a>(
    allocator: &'a Allocator,
    path: &str,
    source: &'a str,
) -> Result<Program<'a>> {
    let source_type = SourceType::from_path(path).unwrap_or(SourceType::ts());
    let result = Parser::new(allocator, source, source_type).parse();

    if !result.errors.is_empty() {
        let reason = result
            .errors
            .iter()
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(LintError::ParseFailed {
            path: path.to_string(),
            reason,
        });
    }
    if result.panicked {
        return Err(LintError::ParseFailed {
            path: path.to_string(),
            reason: "parser aborted".to_string(),
        });
    }

    Ok(result.program)
}
