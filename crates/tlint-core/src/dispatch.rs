//! Context-gated dispatch.
//!
//! A check declares which [`Category`] of file it applies to and hands over
//! its visitor callbacks. [`gate`] wraps them so they only run once the file
//! has been classified into that category. Classification happens on the
//! first callback the check actually registered for, using the import
//! declarations observed up to that point, and is cached for the rest of the
//! file.

use oxc_ast::{AstKind, AstType};

use crate::category::{Category, ClassificationResult};
use crate::context::RuleContext;
use crate::error::Result;
use crate::import::ImportStatement;
use crate::resolver::ContextResolver;
use crate::tracker::ImportTracker;

/// Whether a callback fires on the way into a node or on the way out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Enter,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitorKey {
    pub ty: AstType,
    pub phase: Phase,
}

impl VisitorKey {
    pub fn enter(ty: AstType) -> Self {
        Self {
            ty,
            phase: Phase::Enter,
        }
    }

    pub fn exit(ty: AstType) -> Self {
        Self {
            ty,
            phase: Phase::Exit,
        }
    }
}

/// Callback invoked with the running check's context and the visited node.
pub type Handler<'c> =
    Box<dyn for<'r, 'a> FnMut(&mut RuleContext<'r, 'a>, AstKind<'a>) -> Result<()> + 'c>;

/// A check's callbacks, keyed by node type and phase.
#[derive(Default)]
pub struct VisitorMap<'c> {
    handlers: Vec<(VisitorKey, Handler<'c>)>,
}

impl<'c> VisitorMap<'c> {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Register `handler` for `key`, replacing any earlier one.
    pub fn on<F>(mut self, key: VisitorKey, handler: F) -> Self
    where
        F: for<'r, 'a> FnMut(&mut RuleContext<'r, 'a>, AstKind<'a>) -> Result<()> + 'c,
    {
        self.insert(key, Box::new(handler));
        self
    }

    pub fn on_enter<F>(self, ty: AstType, handler: F) -> Self
    where
        F: for<'r, 'a> FnMut(&mut RuleContext<'r, 'a>, AstKind<'a>) -> Result<()> + 'c,
    {
        self.on(VisitorKey::enter(ty), handler)
    }

    pub fn on_exit<F>(self, ty: AstType, handler: F) -> Self
    where
        F: for<'r, 'a> FnMut(&mut RuleContext<'r, 'a>, AstKind<'a>) -> Result<()> + 'c,
    {
        self.on(VisitorKey::exit(ty), handler)
    }

    pub fn insert(&mut self, key: VisitorKey, handler: Handler<'c>) {
        match self.handlers.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = handler,
            None => self.handlers.push((key, handler)),
        }
    }

    pub fn contains(&self, key: VisitorKey) -> bool {
        self.handlers.iter().any(|(k, _)| *k == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = VisitorKey> + '_ {
        self.handlers.iter().map(|(k, _)| *k)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    fn get_mut(&mut self, key: VisitorKey) -> Option<&mut Handler<'c>> {
        self.handlers
            .iter_mut()
            .find(|(k, _)| *k == key)
            .map(|(_, handler)| handler)
    }
}

/// Which files a check runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applicability {
    pub target: Category,
    /// Let files resolved as test code through a workflow check.
    pub test_matches_workflow: bool,
}

impl Applicability {
    pub fn new(target: Category) -> Self {
        Self {
            target,
            test_matches_workflow: true,
        }
    }

    pub fn excluding_tests(mut self) -> Self {
        self.test_matches_workflow = false;
        self
    }

    pub fn matches(&self, resolved: Category) -> bool {
        resolved == self.target
            || (self.test_matches_workflow
                && self.target == Category::Workflow
                && resolved == Category::Test)
    }
}

/// Per-file, per-check gating decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activation {
    #[default]
    Pending,
    Determined {
        result: ClassificationResult,
        active: bool,
    },
}

impl Activation {
    pub fn is_active(&self) -> bool {
        matches!(self, Activation::Determined { active: true, .. })
    }
}

/// Import evidence and the cached decision for one check on one file.
#[derive(Debug, Clone, Default)]
pub struct ClassificationSession {
    tracker: ImportTracker,
    activation: Activation,
}

impl ClassificationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, statement: &ImportStatement) {
        self.tracker.observe(statement);
    }

    pub fn tracker(&self) -> &ImportTracker {
        &self.tracker
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Resolve on first call, then keep answering from the cache.
    pub fn activate(
        &mut self,
        resolver: &ContextResolver,
        path: &str,
        applicability: Applicability,
    ) -> bool {
        match self.activation {
            Activation::Determined { active, .. } => active,
            Activation::Pending => {
                let result = resolver.resolve(&self.tracker, path);
                let active = applicability.matches(result.category);
                tracing::trace!(
                    path,
                    wanted = %applicability.target,
                    resolved = %result.category,
                    active,
                    "gating decision"
                );
                self.activation = Activation::Determined { result, active };
                active
            }
        }
    }
}

/// Wrap a check's visitors behind its applicability.
pub fn gate<'c>(visitors: VisitorMap<'c>, applicability: Applicability) -> GatedVisitors<'c> {
    GatedVisitors {
        inner: visitors,
        applicability,
        session: ClassificationSession::new(),
    }
}

/// A [`VisitorMap`] that forwards only for files of the right category.
pub struct GatedVisitors<'c> {
    inner: VisitorMap<'c>,
    applicability: Applicability,
    session: ClassificationSession,
}

impl<'c> GatedVisitors<'c> {
    /// Same keys as the wrapped map.
    pub fn keys(&self) -> impl Iterator<Item = VisitorKey> + '_ {
        self.inner.keys()
    }

    pub fn applicability(&self) -> Applicability {
        self.applicability
    }

    pub fn session(&self) -> &ClassificationSession {
        &self.session
    }

    /// Whether the host should call [`GatedVisitors::handle`] for `key`.
    ///
    /// Import declarations are always wanted on entry, since they feed the
    /// classification even when the check does not listen to them.
    pub fn wants(&self, key: VisitorKey) -> bool {
        is_import_entry(key) || self.inner.contains(key)
    }

    pub fn handle<'a>(
        &mut self,
        key: VisitorKey,
        node: AstKind<'a>,
        resolver: &ContextResolver,
        ctx: &mut RuleContext<'_, 'a>,
    ) -> Result<()> {
        if is_import_entry(key) {
            if let AstKind::ImportDeclaration(decl) = node {
                self.session.observe(&ImportStatement::from_declaration(decl));
            }
        }

        let Some(handler) = self.inner.get_mut(key) else {
            return Ok(());
        };
        if !self.session.activate(resolver, ctx.path, self.applicability) {
            return Ok(());
        }
        handler(ctx, node)
    }
}

fn is_import_entry(key: VisitorKey) -> bool {
    key.ty == AstType::ImportDeclaration && key.phase == Phase::Enter
}
