use llgrey::{GrammarError, SyntaxError, TreeError};
use rustyline::error::ReadlineError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("{name} expects {expected} argument(s), got {got}")]
    WrongNumberOfArgs {
        name: String,
        expected: &'static str,
        got: usize,
    },

    /// The parse tree couldn't be turned into an expression, eg: malformed numbers.
    #[error(transparent)]
    Translate(#[from] TreeError),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Grammar error: {0}")]
    Grammar(#[from] GrammarError),

    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("Eval error: {0}")]
    Eval(#[from] EvalError),

    #[error("Readline error: {0}")]
    Readline(#[from] ReadlineError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No input numbers left after In[{0}]")]
    SeqExhausted(usize),
}
