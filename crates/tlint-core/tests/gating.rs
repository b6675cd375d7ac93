use std::cell::RefCell;
use std::rc::Rc;

use tlint_core::oxc::{AstKind, AstType, GetSpan};
use tlint_core::{
    Applicability, Category, Check, LintError, Linter, TlintConfig, VisitorKey, VisitorMap,
};

/// Records every callback it receives as `"<phase>:<node type>"`.
struct Recorder {
    name: &'static str,
    applicability: Applicability,
    keys: Vec<VisitorKey>,
    seen: Rc<RefCell<Vec<String>>>,
}

impl Recorder {
    fn new(target: Category, keys: &[VisitorKey]) -> (Self, Rc<RefCell<Vec<String>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let recorder = Self {
            name: "recorder",
            applicability: Applicability::new(target),
            keys: keys.to_vec(),
            seen: Rc::clone(&seen),
        };
        (recorder, seen)
    }
}

impl Check for Recorder {
    fn name(&self) -> &str {
        self.name
    }

    fn applicability(&self) -> Applicability {
        self.applicability
    }

    fn visitors(&self) -> VisitorMap<'_> {
        let mut map = VisitorMap::new();
        for key in &self.keys {
            let seen = Rc::clone(&self.seen);
            let key = *key;
            map = map.on(key, move |_ctx, node| {
                seen.borrow_mut()
                    .push(format!("{:?}:{:?}", key.phase, node.ty()));
                Ok(())
            });
        }
        map
    }
}

fn linter() -> Linter {
    Linter::new(&TlintConfig::default()).unwrap()
}

const WORKFLOW_FILE: &str = "\
import { proxyActivities, sleep } from '@temporalio/workflow';
export async function order() {
  await sleep(1);
}
";

#[test]
fn matching_file_receives_callbacks() {
    let (check, seen) = Recorder::new(
        Category::Workflow,
        &[VisitorKey::enter(AstType::CallExpression)],
    );
    let mut linter = linter().with_check(check);
    linter.lint_source("/src/misc/order.ts", WORKFLOW_FILE).unwrap();

    assert_eq!(*seen.borrow(), ["Enter:CallExpression"]);
}

#[test]
fn other_categories_receive_nothing() {
    let (check, seen) = Recorder::new(
        Category::Activity,
        &[
            VisitorKey::enter(AstType::Program),
            VisitorKey::enter(AstType::ImportDeclaration),
            VisitorKey::enter(AstType::CallExpression),
            VisitorKey::exit(AstType::CallExpression),
        ],
    );
    let mut linter = linter().with_check(check);
    linter.lint_source("/src/activities/order.ts", WORKFLOW_FILE).unwrap();

    assert!(seen.borrow().is_empty());
}

#[test]
fn test_files_reach_workflow_checks_unless_excluded() {
    let source = "import { TestWorkflowEnvironment } from '@temporalio/testing';\nrun();\n";
    let key = [VisitorKey::enter(AstType::CallExpression)];

    let (check, seen) = Recorder::new(Category::Workflow, &key);
    linter()
        .with_check(check)
        .lint_source("/src/order.test.ts", source)
        .unwrap();
    assert_eq!(seen.borrow().len(), 1);

    let (mut check, seen) = Recorder::new(Category::Workflow, &key);
    check.applicability = check.applicability.excluding_tests();
    linter()
        .with_check(check)
        .lint_source("/src/order.test.ts", source)
        .unwrap();
    assert!(seen.borrow().is_empty());
}

#[test]
fn import_events_are_forwarded_when_registered() {
    let (check, seen) = Recorder::new(
        Category::Workflow,
        &[
            VisitorKey::enter(AstType::ImportDeclaration),
            VisitorKey::exit(AstType::ImportDeclaration),
        ],
    );
    let mut linter = linter().with_check(check);
    linter.lint_source("/src/misc/order.ts", WORKFLOW_FILE).unwrap();

    assert_eq!(
        *seen.borrow(),
        ["Enter:ImportDeclaration", "Exit:ImportDeclaration"]
    );
}

#[test]
fn decision_uses_imports_seen_before_the_first_callback() {
    // The path says workflow; the import seen before the first callback says client.
    let (check, seen) = Recorder::new(
        Category::Client,
        &[VisitorKey::enter(AstType::NewExpression)],
    );
    let source = "\
import { Connection, Client } from '@temporalio/client';
const client = new Client({ connection: await Connection.connect() });
";
    linter()
        .with_check(check)
        .lint_source("/src/workflows/start.ts", source)
        .unwrap();
    assert_eq!(*seen.borrow(), ["Enter:NewExpression"]);
}

#[test]
fn program_entry_fires_before_imports_are_seen() {
    // Only the path is available when the program node is entered.
    let (check, seen) = Recorder::new(Category::Workflow, &[VisitorKey::enter(AstType::Program)]);
    linter()
        .with_check(check)
        .lint_source("/src/misc/order.ts", WORKFLOW_FILE)
        .unwrap();
    assert!(seen.borrow().is_empty());

    let (check, seen) = Recorder::new(Category::Workflow, &[VisitorKey::enter(AstType::Program)]);
    linter()
        .with_check(check)
        .lint_source("/src/workflows/order.ts", WORKFLOW_FILE)
        .unwrap();
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn decisions_do_not_leak_between_files() {
    let (check, seen) = Recorder::new(
        Category::Workflow,
        &[VisitorKey::enter(AstType::CallExpression)],
    );
    let mut linter = linter().with_check(check);

    linter.lint_source("/src/misc/a.ts", WORKFLOW_FILE).unwrap();
    linter.lint_source("/src/misc/b.ts", "run();\n").unwrap();
    linter.lint_source("/src/misc/c.ts", WORKFLOW_FILE).unwrap();

    assert_eq!(seen.borrow().len(), 2);
}

struct Failing;

impl Check for Failing {
    fn name(&self) -> &str {
        "failing"
    }

    fn applicability(&self) -> Applicability {
        Applicability::new(Category::Workflow)
    }

    fn visitors(&self) -> VisitorMap<'_> {
        VisitorMap::new().on_enter(AstType::CallExpression, |ctx, _node| {
            Err(LintError::check_failed(ctx.rule(), "boom"))
        })
    }
}

#[test]
fn check_errors_propagate_unchanged() {
    let (after, seen) = Recorder::new(
        Category::Workflow,
        &[VisitorKey::enter(AstType::CallExpression)],
    );
    let mut linter = linter().with_check(Failing).with_check(after);

    let err = linter
        .lint_source("/src/misc/order.ts", WORKFLOW_FILE)
        .unwrap_err();
    match err {
        LintError::CheckFailed { check, message } => {
            assert_eq!(check, "failing");
            assert_eq!(message, "boom");
        }
        other => panic!("unexpected error {other:?}"),
    }
    // Dispatch stopped at the failure
    assert!(seen.borrow().is_empty());
}

#[test]
fn errors_in_inactive_files_never_surface() {
    let mut linter = linter().with_check(Failing);
    let report = linter
        .lint_source("/src/activities/pay.ts", "charge();\n")
        .unwrap();
    assert!(report.is_clean());
}

/// Reports `Date.now()` once per run, with a fix importing a replacement.
struct NoDateNow;

impl Check for NoDateNow {
    fn name(&self) -> &str {
        "no-date-now"
    }

    fn applicability(&self) -> Applicability {
        Applicability::new(Category::Workflow)
    }

    fn visitors(&self) -> VisitorMap<'_> {
        VisitorMap::new().on_enter(AstType::CallExpression, |ctx, node| {
            let AstKind::CallExpression(call) = node else {
                return Ok(());
            };
            let callee = call.callee.span().source_text(ctx.source_text());
            if callee != "Date.now" {
                return Ok(());
            }
            let fix = ctx.ensure_import("@temporalio/workflow", "workflowInfo");
            let diagnostic = ctx
                .diagnostic("Date.now() is not deterministic", call.span)
                .with_fix(fix.into_edit());
            ctx.report_once("Date.now", diagnostic);
            Ok(())
        })
    }
}

#[test]
fn report_once_is_scoped_to_the_run() {
    let source = "\
import { sleep } from '@temporalio/workflow';
const a = Date.now();
const b = Date.now();
";
    let mut linter = linter().with_check(NoDateNow);

    linter.begin_run();
    let first = linter.lint_source("/src/misc/a.ts", source).unwrap();
    let second = linter.lint_source("/src/misc/b.ts", source).unwrap();
    assert_eq!(first.diagnostics.len(), 1);
    assert!(second.is_clean());

    linter.begin_run();
    let third = linter.lint_source("/src/misc/a.ts", source).unwrap();
    assert_eq!(third.diagnostics.len(), 1);
}

#[test]
fn diagnostics_carry_codemod_fixes() {
    let source = "import { sleep } from '@temporalio/workflow';\nconst a = Date.now();\n";
    let mut linter = linter().with_check(NoDateNow);
    linter.begin_run();
    let report = linter.lint_source("/src/misc/a.ts", source).unwrap();

    let diagnostic = &report.diagnostics[0];
    assert_eq!(diagnostic.rule, "no-date-now");
    assert_eq!(diagnostic.span.source_text(source), "Date.now()");
    let fix = diagnostic.fix.as_ref().unwrap();
    assert_eq!(
        fix.apply(source),
        "import { sleep, workflowInfo } from '@temporalio/workflow';\nconst a = Date.now();\n"
    );

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["diagnostics"][0]["fix"]["kind"], "extendStatement");
}

/// Records, per function, whether it awaits outside nested functions.
struct AwaitOutsideCallbacks {
    hits: Rc<RefCell<Vec<bool>>>,
}

impl Check for AwaitOutsideCallbacks {
    fn name(&self) -> &str {
        "await-outside-callbacks"
    }

    fn applicability(&self) -> Applicability {
        Applicability::new(Category::Workflow)
    }

    fn visitors(&self) -> VisitorMap<'_> {
        let hits = Rc::clone(&self.hits);
        VisitorMap::new().on_enter(AstType::Function, move |ctx, node| {
            let found = ctx.any_within(node, |kind| kind.ty() == AstType::AwaitExpression);
            hits.borrow_mut().push(found);
            Ok(())
        })
    }
}

#[test]
fn subtree_queries_stop_at_nested_functions() {
    let hits = Rc::new(RefCell::new(Vec::new()));
    let mut linter = linter().with_check(AwaitOutsideCallbacks {
        hits: Rc::clone(&hits),
    });
    let source = "\
export async function direct() { await go(); }
export function wrapped() { items.map(async function (x) { await x; }); }
";
    linter.lint_source("/src/workflows/a.ts", source).unwrap();

    // direct, wrapped, and the inner callback itself
    assert_eq!(*hits.borrow(), [true, false, true]);
}

/// Records the node type enclosing every call.
struct CallParents {
    parents: Rc<RefCell<Vec<Option<AstType>>>>,
}

impl Check for CallParents {
    fn name(&self) -> &str {
        "call-parents"
    }

    fn applicability(&self) -> Applicability {
        Applicability::new(Category::Workflow)
    }

    fn visitors(&self) -> VisitorMap<'_> {
        let parents = Rc::clone(&self.parents);
        VisitorMap::new().on_enter(AstType::CallExpression, move |ctx, node| {
            parents.borrow_mut().push(ctx.parent(node).map(|kind| kind.ty()));
            Ok(())
        })
    }
}

#[test]
fn parent_is_the_nearest_enclosing_node() {
    let parents = Rc::new(RefCell::new(Vec::new()));
    let mut linter = linter().with_check(CallParents {
        parents: Rc::clone(&parents),
    });
    let source = "export async function f() { await go(); }\nrun();\n";
    linter.lint_source("/src/workflows/a.ts", source).unwrap();

    assert_eq!(
        *parents.borrow(),
        [
            Some(AstType::AwaitExpression),
            Some(AstType::ExpressionStatement)
        ]
    );
}
