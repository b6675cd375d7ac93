//! Flattened view of a program for subtree queries.
//!
//! oxc nodes do not link to their children generically, so the tree is
//! recorded once with a visitor and then searched with an explicit stack.

use oxc_ast::{AstKind, AstType, ast::Program};
use oxc_ast_visit::Visit;
use oxc_span::GetSpan;
use rustc_hash::FxHashMap;

#[derive(Debug)]
struct FlatNode<'a> {
    kind: AstKind<'a>,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Every node of a program in pre-order, with parent and child links.
#[derive(Debug, Default)]
pub struct FlatTree<'a> {
    nodes: Vec<FlatNode<'a>>,
    by_span: FxHashMap<(u32, u32), Vec<usize>>,
}

impl<'a> FlatTree<'a> {
    pub fn build(program: &Program<'a>) -> Self {
        let mut recorder = Recorder::default();
        recorder.visit_program(program);
        recorder.tree
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn kind(&self, id: usize) -> Option<AstKind<'a>> {
        self.nodes.get(id).map(|n| n.kind)
    }

    pub fn parent(&self, id: usize) -> Option<usize> {
        self.nodes.get(id)?.parent
    }

    /// Id of the outermost recorded node with this type and span.
    pub fn find(&self, node: AstKind<'a>) -> Option<usize> {
        let span = node.span();
        let ty = node.ty();
        self.by_span
            .get(&(span.start, span.end))?
            .iter()
            .copied()
            .find(|&id| self.nodes[id].kind.ty() == ty)
    }

    /// Whether `root` or any node below it satisfies `predicate`, without
    /// looking inside nodes for which `is_boundary` holds.
    ///
    /// The root itself is never treated as a boundary.
    pub fn any_within(
        &self,
        root: usize,
        mut predicate: impl FnMut(AstKind<'a>) -> bool,
        is_boundary: impl Fn(AstKind<'a>) -> bool,
    ) -> bool {
        let Some(first) = self.nodes.get(root) else {
            return false;
        };
        if predicate(first.kind) {
            return true;
        }

        let mut stack: Vec<usize> = first.children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if predicate(node.kind) {
                return true;
            }
            if !is_boundary(node.kind) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        false
    }

    /// [`FlatTree::any_within`] stopping at nested functions.
    pub fn any_within_function(
        &self,
        root: usize,
        predicate: impl FnMut(AstKind<'a>) -> bool,
    ) -> bool {
        self.any_within(root, predicate, is_function_boundary)
    }
}

/// Functions and arrow functions start a new execution scope.
pub fn is_function_boundary(kind: AstKind<'_>) -> bool {
    matches!(kind.ty(), AstType::Function | AstType::ArrowFunctionExpression)
}

#[derive(Default)]
struct Recorder<'a> {
    tree: FlatTree<'a>,
    stack: Vec<usize>,
}

impl<'a> Visit<'a> for Recorder<'a> {
    fn enter_node(&mut self, kind: AstKind<'a>) {
        let id = self.tree.nodes.len();
        let parent = self.stack.last().copied();
        if let Some(parent) = parent {
            self.tree.nodes[parent].children.push(id);
        }
        self.tree.nodes.push(FlatNode {
            kind,
            parent,
            children: Vec::new(),
        });
        let span = kind.span();
        self.tree
            .by_span
            .entry((span.start, span.end))
            .or_default()
            .push(id);
        self.stack.push(id);
    }

    fn leave_node(&mut self, _kind: AstKind<'a>) {
        self.stack.pop();
    }
}

#[cfg(all(test, feature = "parser"))]
mod tests {
    use super::*;
    use crate::parser::parse_program;
    use oxc_allocator::Allocator;
    use oxc_ast::ast::Statement;

    fn is_call(kind: AstKind<'_>) -> bool {
        kind.ty() == AstType::CallExpression
    }

    #[test]
    fn nested_functions_are_not_searched() {
        let allocator = Allocator::default();
        let program = parse_program(
            &allocator,
            "a.ts",
            "function outer() { const f = () => { run(); }; return 1; }",
        )
        .unwrap();
        let tree = FlatTree::build(&program);

        let Statement::FunctionDeclaration(func) = &program.body[0] else {
            panic!("expected a function");
        };
        let root = tree.find(AstKind::Function(func)).unwrap();

        assert!(!tree.any_within_function(root, is_call));
        assert!(tree.any_within(root, is_call, |_| false));
    }

    #[test]
    fn direct_calls_are_found() {
        let allocator = Allocator::default();
        let program =
            parse_program(&allocator, "a.ts", "function outer() { if (x) { run(); } }").unwrap();
        let tree = FlatTree::build(&program);
        let Statement::FunctionDeclaration(func) = &program.body[0] else {
            panic!("expected a function");
        };
        let root = tree.find(AstKind::Function(func)).unwrap();
        assert!(tree.any_within_function(root, is_call));
    }

    #[test]
    fn parents_link_back_to_program() {
        let allocator = Allocator::default();
        let program = parse_program(&allocator, "a.ts", "run();").unwrap();
        let tree = FlatTree::build(&program);

        assert_eq!(tree.kind(0).map(|k| k.ty()), Some(AstType::Program));
        assert_eq!(tree.parent(0), None);
        assert!(tree.len() > 2);
        assert_eq!(tree.parent(1), Some(0));
    }
}
