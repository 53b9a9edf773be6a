#![deny(warnings)]

use crate::error::TreeError;
use crate::grammar::{Rule, Symbol};
use crate::parser::Token;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub enum Tree {
    // terminal and the token it matched
    Leaf(Rc<Symbol>, Token),
    // expanded rule and one child per rhs symbol, none for epsilon
    Node(Rc<Rule>, Vec<Tree>),
}

impl Tree {
    /// Matched tokens, left to right.
    pub fn leaves(&self) -> Vec<&Token> {
        let mut leaves = Vec::new();
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            match node {
                Tree::Leaf(_, token) => leaves.push(token),
                Tree::Node(_, children) => pending.extend(children.iter().rev()),
            }
        }
        leaves
    }

    /// Levels from the root down to the deepest leaf, a lone leaf is 1.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 1)];
        while let Some((node, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            if let Tree::Node(_, children) = node {
                pending.extend(children.iter().map(|child| (child, depth + 1)));
            }
        }
        deepest
    }

    pub fn print(&self) {
        let mut pending = vec![(self, 0)];
        while let Some((node, level)) = pending.pop() {
            let indent = "  ".repeat(level);
            match node {
                Tree::Leaf(sym, token) => println!("{}`-- {} {:?}", indent, sym, token.lexeme),
                Tree::Node(rule, children) => {
                    println!("{}`-- {}", indent, rule);
                    pending.extend(children.iter().rev().map(|child| (child, level + 1)));
                }
            }
        }
    }
}

// Walks below use explicit stacks, input nesting decides how deep trees go.
impl Drop for Tree {
    fn drop(&mut self) {
        let Tree::Node(_, children) = self else { return };
        let mut pending = std::mem::take(children);
        while let Some(mut node) = pending.pop() {
            if let Tree::Node(_, children) = &mut node {
                pending.append(children);
            }
        }
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // None closes the node opened last
        let mut pending = vec![Some(self)];
        let mut sep = "";
        while let Some(step) = pending.pop() {
            let Some(node) = step else {
                write!(f, ")")?;
                continue;
            };
            write!(f, "{}", sep)?;
            sep = " ";
            match node {
                Tree::Leaf(_, token) => write!(f, "{}", token.lexeme)?,
                Tree::Node(rule, children) => {
                    write!(f, "({}", rule.lhs.name)?;
                    pending.push(None);
                    pending.extend(children.iter().rev().map(Some));
                }
            }
        }
        Ok(())
    }
}

// Semantic actions to execute when folding the tree
type SemAction<'a, ASTNode> = Box<dyn Fn(Vec<ASTNode>) -> Result<ASTNode, String> + 'a>;
// Given a terminal name and its token build an ASTNode
type LeafBuilder<'a, ASTNode> = Box<dyn Fn(&str, &Token) -> ASTNode + 'a>;

/// Folds a parse tree bottom-up. Each rule, by its `lhs -> rhs` rendering,
/// maps to an action that combines the already folded children.
pub struct TreeFolder<'a, ASTNode> {
    actions: HashMap<String, SemAction<'a, ASTNode>>,
    leaf_builder: LeafBuilder<'a, ASTNode>,
    depth_limit: Option<usize>,
}

// Pending work while folding: nodes to visit and actions whose children
// are already folded.
enum Step<'t, Action> {
    Visit(&'t Tree),
    // rule name, its action and how many folded children it takes
    Reduce(String, Action, usize),
}

impl<'a, ASTNode> TreeFolder<'a, ASTNode> {
    pub fn new<Builder>(leaf_builder: Builder) -> Self
            where Builder: Fn(&str, &Token) -> ASTNode + 'a {
        TreeFolder{
            actions: HashMap::new(),
            leaf_builder: Box::new(leaf_builder),
            depth_limit: None}
    }

    // Register semantic actions to act when rules are matched
    pub fn action<Action>(&mut self, rule: &str, action: Action)
            where Action: Fn(Vec<ASTNode>) -> Result<ASTNode, String> + 'a {
        self.actions.insert(rule.to_string(), Box::new(action));
    }

    /// Refuse trees deeper than `limit` instead of folding them. Whatever
    /// consumes the folded values may well recurse once per level.
    pub fn depth_limit(&mut self, limit: usize) {
        self.depth_limit = Some(limit);
    }

    pub fn fold(&self, tree: &Tree) -> Result<ASTNode, TreeError> {
        if let Some(limit) = self.depth_limit {
            let depth = tree.depth();
            if depth > limit {
                return Err(TreeError::TooDeep{depth, limit});
            }
        }
        let mut steps = vec![Step::Visit(tree)];
        let mut folded = Vec::new();
        while let Some(step) = steps.pop() {
            match step {
                Step::Visit(Tree::Leaf(sym, token)) => {
                    folded.push((self.leaf_builder)(&sym.name, token));
                }
                Step::Visit(Tree::Node(rule, children)) => {
                    let rulename = rule.to_string();
                    let action = self.actions.get(&rulename)
                        .ok_or_else(|| TreeError::MissingAction(rulename.clone()))?;
                    steps.push(Step::Reduce(rulename, action, children.len()));
                    steps.extend(children.iter().rev().map(Step::Visit));
                }
                Step::Reduce(rulename, action, arity) => {
                    let args = folded.split_off(folded.len() - arity);
                    let node = action(args)
                        .map_err(|reason| TreeError::Action{rule: rulename, reason})?;
                    folded.push(node);
                }
            }
        }
        folded.pop().ok_or_else(|| TreeError::MissingAction(tree.to_string()))
    }
}
