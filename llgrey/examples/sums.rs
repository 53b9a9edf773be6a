// Parse sums like `1 + (2 + 3)`, print the parse tree and fold it.
//   cargo run --example sums -- "1 + (2 + 3)"
use lexers::{MathToken, MathTokenizer};
use llgrey::{GrammarBuilder, LL1Parser, ParseTable, Token, TreeFolder};
use std::rc::Rc;

fn main() {
    let grammar = GrammarBuilder::default()
      .nonterm("S")
      .nonterm("E")
      .nonterm("E'")
      .nonterm("T")
      .terminal("+")
      .terminal("(")
      .terminal(")")
      .terminal("num")
      .rule("S", &["E"])
      .rule("E", &["T", "E'"])
      .rule("E'", &["+", "T", "E'"])
      .rule::<_, &str>("E'", &[])
      .rule("T", &["(", "E", ")"])
      .rule("T", &["num"])
      .into_grammar("S")
      .expect("Bad Grammar");
    let table = ParseTable::new(&grammar).expect("Grammar isn't LL(1)");
    println!("{}", table);

    let input = std::env::args().skip(1).collect::<Vec<String>>().join(" ");
    let tokens = MathTokenizer::new(input.chars()).map(|lx| {
        let name = match &lx.token {
            MathToken::Number(_) => "num",
            other => other.text(),
        };
        let terminal = grammar.symbol(name).map(|s| s.id).unwrap_or(usize::MAX);
        Token::new(terminal, lx.token.text(), lx.offset)
    });

    let mut folder = TreeFolder::new(|_, token: &Token| token.lexeme.parse::<f64>().unwrap_or(0.0));
    folder.action("S -> E", |n| Ok(n[0]));
    folder.action("E -> T E'", |n| Ok(n[0] + n[1]));
    folder.action("E' -> + T E'", |n| Ok(n[1] + n[2]));
    folder.action("E' -> ", |_| Ok(0.0));
    folder.action("T -> ( E )", |n| Ok(n[1]));
    folder.action("T -> num", |n| Ok(n[0]));

    let mut parser = LL1Parser::new(Rc::new(table));
    match parser.parse(tokens) {
        Err(e) => println!("Parse err: {}", e),
        Ok(tree) => {
            tree.print();
            match folder.fold(&tree) {
                Ok(sum) => println!("{}", sum),
                Err(e) => println!("Fold err: {}", e),
            }
        }
    }
}
