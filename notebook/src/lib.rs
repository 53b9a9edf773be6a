#![deny(warnings)]

mod error;
pub use crate::error::{Error, EvalError};

mod expr;
pub use crate::expr::Expr;
mod context;
pub use crate::context::Context;
mod eval;
pub use crate::eval::{BinaryOp, Builtin, Evaluator, evaluate};

mod grammar;
pub use crate::grammar::{Tokens, grammar};
mod translate;
pub use crate::translate::{MAX_DEPTH, Translator};

mod reorder;
pub use crate::reorder::{Reorderer, Sequenced};
mod settings;
pub use crate::settings::Settings;
mod pipeline;
pub use crate::pipeline::{Answer, Notebook, render};

#[cfg(test)]
mod tests;
