use crate::error::{Error, EvalError};
use crate::expr::Expr;
use crate::grammar::{Tokens, grammar};
use llgrey::{GrammarError, LL1Parser, ParseTable, SyntaxError, Token, Tree, TreeError, TreeFolder};
use log::debug;
use std::rc::Rc;

// Parse tree levels allowed per input, about five per pair of parens.
// Expressions built from deeper trees are refused before anything recurses
// over them.
pub const MAX_DEPTH: usize = 1024;

// Intermediate values while folding. Right recursive tails like E' carry
// their operators up until the rule that owns the left operand.
#[derive(Clone, Debug, PartialEq)]
enum Node {
    Expr(Expr),
    Lexeme(String),
    // (operator, right operand) pairs still to be applied left to right
    Chain(Vec<(String, Expr)>),
    Args(Vec<Expr>),
    Nothing,
}

impl Node {
    fn expr(self) -> Result<Expr, String> {
        match self {
            Node::Expr(e) => Ok(e),
            other => Err(format!("expected an expression, got {:?}", other)),
        }
    }

    fn lexeme(self) -> Result<String, String> {
        match self {
            Node::Lexeme(l) => Ok(l),
            other => Err(format!("expected a lexeme, got {:?}", other)),
        }
    }
}

fn operator_head(op: &str) -> Result<&'static str, String> {
    Ok(match op {
        "+" => "Plus",
        "-" => "Minus",
        "*" => "Times",
        "/" => "Divide",
        "%" => "Mod",
        other => return Err(format!("not a binary operator `{}`", other)),
    })
}

// X' -> op Y X'
fn link(mut args: Vec<Node>) -> Result<Node, String> {
    let rest = args.swap_remove(2);
    let operand = args.swap_remove(1).expr()?;
    let op = args.swap_remove(0).lexeme()?;
    match rest {
        Node::Chain(mut chain) => {
            chain.insert(0, (op, operand));
            Ok(Node::Chain(chain))
        }
        other => Err(format!("expected an operator chain, got {:?}", other)),
    }
}

// X -> Y X', folds the chain onto Y left associatively
fn fold_chain(mut args: Vec<Node>) -> Result<Node, String> {
    let chain = match args.swap_remove(1) {
        Node::Chain(chain) => chain,
        other => return Err(format!("expected an operator chain, got {:?}", other)),
    };
    let mut acc = args.swap_remove(0).expr()?;
    for (op, rhs) in chain {
        acc = Expr::call(operator_head(&op)?, vec![acc, rhs]);
    }
    Ok(Node::Expr(acc))
}

// Args -> E Args' and Args' -> , E Args'
fn prepend_arg(mut args: Vec<Node>) -> Result<Node, String> {
    let rest = args.pop();
    let arg = args.pop().map(Node::expr).transpose()?;
    match (arg, rest) {
        (Some(arg), Some(Node::Args(mut rest))) => {
            rest.insert(0, arg);
            Ok(Node::Args(rest))
        }
        other => Err(format!("bad argument list {:?}", other)),
    }
}

fn folder() -> TreeFolder<'static, Node> {
    let mut folder = TreeFolder::new(|_, token: &Token| Node::Lexeme(token.lexeme.clone()));
    folder.depth_limit(MAX_DEPTH);

    folder.action("S -> E", |mut args| Ok(args.swap_remove(0)));

    folder.action("E -> T E'", fold_chain);
    folder.action("E' -> + T E'", link);
    folder.action("E' -> - T E'", link);
    folder.action("E' -> ", |_| Ok(Node::Chain(Vec::new())));

    folder.action("T -> F T'", fold_chain);
    folder.action("T' -> * F T'", link);
    folder.action("T' -> / F T'", link);
    folder.action("T' -> % F T'", link);
    folder.action("T' -> ", |_| Ok(Node::Chain(Vec::new())));

    folder.action("F -> - F", |mut args| {
        let arg = args.swap_remove(1).expr()?;
        Ok(Node::Expr(Expr::call("Negate", vec![arg])))
    });
    folder.action("F -> P", |mut args| Ok(args.swap_remove(0)));

    folder.action("P -> A P'", |mut args| {
        let exponent = args.swap_remove(1);
        let base = args.swap_remove(0).expr()?;
        match exponent {
            Node::Nothing => Ok(Node::Expr(base)),
            other => Ok(Node::Expr(Expr::call("Power", vec![base, other.expr()?]))),
        }
    });
    // ^ binds to the right since the exponent is a whole F
    folder.action("P' -> ^ F", |mut args| Ok(args.swap_remove(1)));
    folder.action("P' -> ", |_| Ok(Node::Nothing));

    folder.action("A -> num", |mut args| {
        let lexeme = args.swap_remove(0).lexeme()?;
        lexeme
            .parse::<f64>()
            .map(|n| Node::Expr(Expr::Number(n)))
            .map_err(|_| format!("bad number `{}`", lexeme))
    });
    folder.action("A -> ( E )", |mut args| Ok(args.swap_remove(1)));
    folder.action("A -> ident A'", |mut args| {
        let call = args.swap_remove(1);
        let name = args.swap_remove(0).lexeme()?;
        match call {
            Node::Nothing => Ok(Node::Expr(Expr::Symbol(name))),
            Node::Args(args) => Ok(Node::Expr(Expr::Expr(name, args))),
            other => Err(format!("bad call to {}: {:?}", name, other)),
        }
    });
    folder.action("A' -> ( Args )", |mut args| Ok(args.swap_remove(1)));
    folder.action("A' -> ", |_| Ok(Node::Nothing));

    folder.action("Args -> E Args'", prepend_arg);
    folder.action("Args -> ", |_| Ok(Node::Args(Vec::new())));
    folder.action("Args' -> , E Args'", prepend_arg);
    folder.action("Args' -> ", |_| Ok(Node::Args(Vec::new())));

    folder
}

/// Text to `Expr`: tokenize, parse against the notebook grammar and fold
/// the parse tree. Lives on a single thread, one input at a time.
pub struct Translator {
    table: Rc<ParseTable>,
    parser: LL1Parser,
    folder: TreeFolder<'static, Node>,
}

impl Translator {
    pub fn new() -> Result<Self, GrammarError> {
        let table = Rc::new(ParseTable::new(&grammar()?)?);
        debug!("Notebook parse table ready, {} entries", table.len());
        Ok(Translator {
            parser: LL1Parser::new(table.clone()),
            table,
            folder: folder(),
        })
    }

    pub fn table(&self) -> &ParseTable {
        &self.table
    }

    pub fn parse(&mut self, input: &str) -> Result<Tree, SyntaxError> {
        let tokens = Tokens::new(self.table.grammar(), input.chars());
        self.parser.parse(tokens)
    }

    pub fn translate(&mut self, input: &str) -> Result<Expr, Error> {
        let tree = self.parse(input)?;
        let node = self.folder.fold(&tree).map_err(EvalError::from)?;
        node.expr().map_err(|reason| {
            EvalError::from(TreeError::Action{rule: self.table.grammar().start.name.clone(), reason}).into()
        })
    }
}
