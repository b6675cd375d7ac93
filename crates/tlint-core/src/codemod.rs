//! Import codemods.
//!
//! [`ensure_import`] computes the smallest edit that makes a named binding
//! available from a module. It never fails: any import shape it cannot extend
//! in place gets a brand new statement instead.

use oxc_span::Span;
use serde::{Serialize, Serializer, ser::SerializeStruct};
use thiserror::Error;

use crate::import::{ImportClause, ImportStatement, NamedSpecifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EditKind {
    /// A whole `import` statement is inserted
    InsertStatement,
    /// An existing statement gains a specifier
    ExtendStatement,
}

/// Replace the bytes covered by `span` with `replacement`.
///
/// An empty span is a pure insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    #[serde(serialize_with = "serialize_span")]
    pub span: Span,
    pub replacement: String,
    pub kind: EditKind,
}

impl TextEdit {
    pub fn insert(offset: u32, text: impl Into<String>, kind: EditKind) -> Self {
        Self {
            span: Span::new(offset, offset),
            replacement: text.into(),
            kind,
        }
    }

    pub fn replace(span: Span, text: impl Into<String>, kind: EditKind) -> Self {
        Self {
            span,
            replacement: text.into(),
            kind,
        }
    }

    /// Apply to `text`, returning the edited copy.
    ///
    /// Offsets outside `text` or off a char boundary leave it unchanged.
    pub fn apply(&self, text: &str) -> String {
        let (start, end) = (self.span.start as usize, self.span.end as usize);
        if start > end || !text.is_char_boundary(start) || !text.is_char_boundary(end) {
            return text.to_string();
        }
        let mut out = String::with_capacity(text.len() + self.replacement.len());
        out.push_str(&text[..start]);
        out.push_str(&self.replacement);
        out.push_str(&text[end..]);
        out
    }
}

/// Result of [`ensure_import`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "edit", rename_all = "camelCase")]
pub enum PendingEdit {
    /// The binding is already importable
    NoEdit,
    Edit(TextEdit),
}

impl PendingEdit {
    pub fn is_no_edit(&self) -> bool {
        matches!(self, PendingEdit::NoEdit)
    }

    pub fn edit(&self) -> Option<&TextEdit> {
        match self {
            PendingEdit::NoEdit => None,
            PendingEdit::Edit(edit) => Some(edit),
        }
    }

    pub fn into_edit(self) -> Option<TextEdit> {
        match self {
            PendingEdit::NoEdit => None,
            PendingEdit::Edit(edit) => Some(edit),
        }
    }

    /// Apply to `text`; `NoEdit` returns it unchanged.
    pub fn apply(&self, text: &str) -> String {
        match self {
            PendingEdit::NoEdit => text.to_string(),
            PendingEdit::Edit(edit) => edit.apply(text),
        }
    }
}

#[derive(Debug, Error)]
enum InPlaceError {
    #[error("no closing brace after the last specifier")]
    MissingBrace,
    #[error("unexpected text before the closing brace: {0:?}")]
    UnexpectedGap(String),
    #[error("default binding is not followed by `from`")]
    NotDefaultOnly,
    #[error("statement span is outside the source text")]
    OutOfBounds,
    #[error("specifier does not start with a `type` modifier")]
    NoTypeModifier,
}

/// Make `specifier` importable from `source` in `text`.
///
/// `statements` are all top-level imports of `text`, in source order, with
/// spans into `text`.
pub fn ensure_import(
    text: &str,
    statements: &[ImportStatement],
    source: &str,
    specifier: &str,
) -> PendingEdit {
    let value_statements: Vec<&ImportStatement> = statements
        .iter()
        .filter(|s| s.source == source && !s.type_only)
        .collect();

    if value_statements.iter().any(|s| s.binds_value(specifier)) {
        return PendingEdit::NoEdit;
    }

    // `import { type x } from 'M'`: adding `x` again would declare it twice
    let inline_type = value_statements.iter().find_map(|s| match &s.clause {
        ImportClause::Named { specifiers, .. } => specifiers
            .iter()
            .find(|spec| spec.type_only && spec.imported == specifier && spec.local == specifier),
        _ => None,
    });
    if let Some(spec) = inline_type {
        match drop_type_modifier(text, spec) {
            Ok(edit) => return PendingEdit::Edit(edit),
            Err(err) => tracing::debug!(source, specifier, %err, "cannot promote type specifier"),
        }
    }

    // `import { b as x } from 'M'` already owns the local `x`; splicing `x`
    // into any list would declare it twice
    let local_taken = statements.iter().any(|s| s.declares_local(specifier));
    let extendable: &[&ImportStatement] = if local_taken {
        tracing::debug!(source, specifier, "local name already bound by another import");
        &[]
    } else {
        &value_statements
    };

    for statement in extendable {
        let attempt = match &statement.clause {
            ImportClause::Named {
                specifiers,
                default: _,
            } => match specifiers.last() {
                Some(last) => extend_named(text, statement, last, specifier),
                None => continue,
            },
            ImportClause::Default(binding) => extend_default(text, statement, binding.span, specifier),
            ImportClause::Namespace { .. } | ImportClause::SideEffectOnly => continue,
        };

        match attempt {
            Ok(edit) => return PendingEdit::Edit(edit),
            Err(err) => {
                tracing::debug!(source, specifier, %err, "cannot extend import in place");
            }
        }
    }

    tracing::debug!(source, specifier, "inserting new import statement");
    PendingEdit::Edit(insert_statement(text, statements, source, specifier))
}

fn extend_named(
    text: &str,
    statement: &ImportStatement,
    last: &NamedSpecifier,
    specifier: &str,
) -> Result<TextEdit, InPlaceError> {
    let after_last = last.span.end as usize;
    let statement_end = statement.span.end as usize;
    let tail = text
        .get(after_last..statement_end)
        .ok_or(InPlaceError::OutOfBounds)?;
    let brace = tail.find('}').ok_or(InPlaceError::MissingBrace)?;
    let gap = &tail[..brace];

    if gap.is_empty() {
        return Ok(TextEdit::insert(
            last.span.end,
            format!(", {specifier}"),
            EditKind::ExtendStatement,
        ));
    }
    if gap.chars().all(char::is_whitespace) {
        let brace_end = last.span.end + brace as u32 + 1;
        return Ok(TextEdit::replace(
            Span::new(last.span.end, brace_end),
            format!(", {specifier} }}"),
            EditKind::ExtendStatement,
        ));
    }
    // trailing comma: `{ a, }` becomes `{ a, x, }`
    if gap.trim() == "," {
        return Ok(TextEdit::insert(
            last.span.end,
            format!(", {specifier}"),
            EditKind::ExtendStatement,
        ));
    }

    Err(InPlaceError::UnexpectedGap(gap.to_string()))
}

fn drop_type_modifier(text: &str, spec: &NamedSpecifier) -> Result<TextEdit, InPlaceError> {
    let written = text
        .get(spec.span.start as usize..spec.span.end as usize)
        .ok_or(InPlaceError::OutOfBounds)?;
    let rest = written
        .strip_prefix("type")
        .filter(|rest| rest.starts_with(char::is_whitespace))
        .ok_or(InPlaceError::NoTypeModifier)?;
    Ok(TextEdit::replace(
        spec.span,
        rest.trim_start(),
        EditKind::ExtendStatement,
    ))
}

fn extend_default(
    text: &str,
    statement: &ImportStatement,
    default: Span,
    specifier: &str,
) -> Result<TextEdit, InPlaceError> {
    let rest = text
        .get(default.end as usize..statement.span.end as usize)
        .ok_or(InPlaceError::OutOfBounds)?;
    if !rest.trim_start().starts_with("from") {
        return Err(InPlaceError::NotDefaultOnly);
    }
    Ok(TextEdit::insert(
        default.end,
        format!(", {{ {specifier} }}"),
        EditKind::ExtendStatement,
    ))
}

fn insert_statement(
    text: &str,
    statements: &[ImportStatement],
    source: &str,
    specifier: &str,
) -> TextEdit {
    let statement = format!("import {{ {specifier} }} from '{source}';");

    match leading_run_end(text, statements) {
        Some(end) => TextEdit::insert(end, format!("\n{statement}"), EditKind::InsertStatement),
        None => {
            let offset = hashbang_end(text);
            TextEdit::insert(offset, format!("{statement}\n"), EditKind::InsertStatement)
        }
    }
}

/// End offset of the last import in the leading run of imports, where only
/// whitespace and comments may separate consecutive imports.
fn leading_run_end(text: &str, statements: &[ImportStatement]) -> Option<u32> {
    let mut sorted: Vec<&ImportStatement> = statements.iter().collect();
    sorted.sort_by_key(|s| s.span.start);

    let mut iter = sorted.into_iter();
    let mut end = iter.next()?.span.end;
    for next in iter {
        let gap = text.get(end as usize..next.span.start as usize);
        match gap {
            Some(gap) if is_trivia(gap) => end = next.span.end,
            _ => break,
        }
    }
    Some(end)
}

fn hashbang_end(text: &str) -> u32 {
    if !text.starts_with("#!") {
        return 0;
    }
    match text.find('\n') {
        Some(newline) => newline as u32 + 1,
        None => text.len() as u32,
    }
}

/// Whitespace, line comments and block comments only.
fn is_trivia(mut gap: &str) -> bool {
    loop {
        gap = gap.trim_start();
        if gap.is_empty() {
            return true;
        }
        if let Some(rest) = gap.strip_prefix("//") {
            gap = match rest.find('\n') {
                Some(newline) => &rest[newline..],
                None => "",
            };
        } else if let Some(rest) = gap.strip_prefix("/*") {
            match rest.find("*/") {
                Some(close) => gap = &rest[close + 2..],
                None => return false,
            }
        } else {
            return false;
        }
    }
}

pub(crate) fn serialize_span<S: Serializer>(span: &Span, serializer: S) -> Result<S::Ok, S::Error> {
    let mut state = serializer.serialize_struct("Span", 2)?;
    state.serialize_field("start", &span.start)?;
    state.serialize_field("end", &span.end)?;
    state.end()
}
