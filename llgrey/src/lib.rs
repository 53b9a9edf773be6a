#![deny(warnings)]

mod error;
pub use crate::error::{GrammarError, SyntaxError, TreeError};

mod grammar;
pub use crate::grammar::{Grammar, GrammarBuilder, Rule, Symbol, SymbolId, SymbolKind};

pub mod sets;
pub use crate::sets::SymbolSet;

mod predict;
pub use crate::predict::{Analysis, FollowSets, epsilon, first, follow_sets, predict_set};

mod table;
pub use crate::table::ParseTable;

mod parser;
pub use crate::parser::{LL1Parser, ParseOutcome, Token};

mod trees;
pub use crate::trees::{Tree, TreeFolder};
