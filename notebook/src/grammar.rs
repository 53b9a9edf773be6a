use lexers::{Lexeme, MathToken, MathTokenizer};
use llgrey::{Grammar, GrammarBuilder, GrammarError, SymbolId, Token};

// Lexemes the grammar has no terminal for. Never matches a table entry.
const UNKNOWN: SymbolId = SymbolId::MAX;

/// Arithmetic with function calls, written without left recursion.
///
///   S     -> E
///   E     -> T E'
///   E'    -> + T E' | - T E' | <e>
///   T     -> F T'
///   T'    -> * F T' | / F T' | % F T' | <e>
///   F     -> - F | P
///   P     -> A P'
///   P'    -> ^ F | <e>
///   A     -> num | ( E ) | ident A'
///   A'    -> ( Args ) | <e>
///   Args  -> E Args' | <e>
///   Args' -> , E Args' | <e>
pub fn grammar() -> Result<Grammar, GrammarError> {
    let mut gb = GrammarBuilder::default();
    for nt in ["S", "E", "E'", "T", "T'", "F", "P", "P'", "A", "A'", "Args", "Args'"] {
        gb.quiet_nonterm(nt);
    }
    for t in ["+", "-", "*", "/", "%", "^", "(", ")", ",", "num", "ident"] {
        gb.quiet_terminal(t);
    }
    gb.rule("S", &["E"])
      .rule("E", &["T", "E'"])
      .rule("E'", &["+", "T", "E'"])
      .rule("E'", &["-", "T", "E'"])
      .rule::<_, &str>("E'", &[])
      .rule("T", &["F", "T'"])
      .rule("T'", &["*", "F", "T'"])
      .rule("T'", &["/", "F", "T'"])
      .rule("T'", &["%", "F", "T'"])
      .rule::<_, &str>("T'", &[])
      .rule("F", &["-", "F"])
      .rule("F", &["P"])
      .rule("P", &["A", "P'"])
      .rule("P'", &["^", "F"])
      .rule::<_, &str>("P'", &[])
      .rule("A", &["num"])
      .rule("A", &["(", "E", ")"])
      .rule("A", &["ident", "A'"])
      .rule("A'", &["(", "Args", ")"])
      .rule::<_, &str>("A'", &[])
      .rule("Args", &["E", "Args'"])
      .rule::<_, &str>("Args", &[])
      .rule("Args'", &[",", "E", "Args'"])
      .rule::<_, &str>("Args'", &[])
      .into_grammar("S")
}

/// Classifies lexemes from a `MathTokenizer` into terminals of `grammar`.
pub struct Tokens<'g, I: Iterator<Item=char>> {
    grammar: &'g Grammar,
    lexemes: MathTokenizer<I>,
}

impl<'g, I: Iterator<Item=char>> Tokens<'g, I> {
    pub fn new(grammar: &'g Grammar, source: I) -> Self {
        Tokens{grammar, lexemes: MathTokenizer::new(source)}
    }

    fn terminal(&self, name: &str) -> SymbolId {
        match self.grammar.symbol(name) {
            Some(sym) if sym.is_terminal() && *sym != self.grammar.eof => sym.id,
            _ => UNKNOWN,
        }
    }

    fn classify(&self, lexeme: Lexeme) -> Token {
        let terminal = match &lexeme.token {
            MathToken::Number(_) => self.terminal("num"),
            MathToken::Ident(_) => self.terminal("ident"),
            MathToken::Unknown(_) => UNKNOWN,
            other => self.terminal(other.text()),
        };
        Token::new(terminal, lexeme.token.text(), lexeme.offset)
    }
}

impl<'g, I: Iterator<Item=char>> Iterator for Tokens<'g, I> {
    type Item = Token;
    fn next(&mut self) -> Option<Self::Item> {
        let lexeme = self.lexemes.next()?;
        Some(self.classify(lexeme))
    }
}
