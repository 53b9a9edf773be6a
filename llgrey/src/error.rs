#![deny(warnings)]

use thiserror::Error;

/// Problems found while building a grammar or its parse table. These are
/// fatal: a grammar that produces one can't be used to parse anything.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("Missing Symbol: {0}")]
    MissingSymbol(String),

    #[error("Duplicate Symbol: {0}")]
    DuplicateSymbol(String),

    #[error("Duplicate Rule: {0}")]
    DuplicateRule(String),

    #[error("Terminal can't head a rule: {0}")]
    TerminalHead(String),

    #[error("No rules for start symbol: {0}")]
    NoStartRule(String),

    /// Two rules for the same nonterminal are predicted by one lookahead.
    #[error("Grammar is not LL(1): `{first}` and `{second}` both predicted by `{lookahead}` for {nonterm}")]
    Conflict {
        nonterm: String,
        lookahead: String,
        first: String,
        second: String,
    },

    #[error("FOLLOW sets still growing after {passes} passes")]
    FollowDiverged { passes: usize },
}

/// A token the parser couldn't accept. Local to one input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {}, found `{found}` at {position}", alternatives(.expected))]
pub struct SyntaxError {
    pub expected: Vec<String>,
    pub found: String,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("Missing Action: {0}")]
    MissingAction(String),

    #[error("Action failed for {rule}: {reason}")]
    Action { rule: String, reason: String },

    #[error("Tree nests {depth} levels deep, limit is {limit}")]
    TooDeep { depth: usize, limit: usize },
}

// `a`, `b` or `c`
fn alternatives(expected: &[String]) -> String {
    let quoted: Vec<_> = expected.iter().map(|e| format!("`{}`", e)).collect();
    match quoted.split_last() {
        None => "nothing".to_string(),
        Some((last, [])) => last.clone(),
        Some((last, init)) => format!("{} or {}", init.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::SyntaxError;

    #[test]
    fn syntax_error_message() {
        let err = SyntaxError {
            expected: vec!["(".to_string(), "num".to_string()],
            found: "$".to_string(),
            position: 4,
        };
        assert_eq!(err.to_string(), "expected `(` or `num`, found `$` at 4");

        let err = SyntaxError {
            expected: vec!["+".to_string(), "-".to_string(), ")".to_string()],
            found: "num".to_string(),
            position: 0,
        };
        assert_eq!(err.to_string(), "expected `+`, `-` or `)`, found `num` at 0");

        let err = SyntaxError {
            expected: vec![")".to_string()],
            found: "$".to_string(),
            position: 7,
        };
        assert_eq!(err.to_string(), "expected `)`, found `$` at 7");
    }
}
