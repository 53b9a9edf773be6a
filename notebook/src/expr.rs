use core::fmt;

#[derive(PartialEq, Clone, Debug)]
pub enum Expr {
    // head and arguments, operators use names like Plus or Power
    Expr(String, Vec<Expr>),
    Symbol(String),
    Number(f64),
}

impl Expr {
    pub fn call(head: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Expr(head.into(), args)
    }
}

// Operator spelling for heads printed infix
fn infix(head: &str) -> Option<&'static str> {
    match head {
        "Plus" => Some(" + "),
        "Minus" => Some(" - "),
        "Times" => Some(" * "),
        "Divide" => Some(" / "),
        "Mod" => Some(" % "),
        "Power" => Some(" ^ "),
        _ => None,
    }
}

// Lowest number is highest precedence
fn precedence(e: &Expr) -> usize {
    match e {
        Expr::Number(n) if *n < 0.0 => 45,
        Expr::Number(_) | Expr::Symbol(_) => 0,
        Expr::Expr(head, args) => match (head.as_ref(), args.len()) {
            ("Power", 2) => 40,
            ("Negate", 1) => 45,
            ("Times" | "Divide" | "Mod", 2) => 60,
            ("Plus" | "Minus", 2) => 70,
            // function calls print their own parens
            _ => 0,
        },
    }
}

fn wrap(e: &Expr, parens: bool) -> String {
    if parens {
        format!("({})", e)
    } else {
        e.to_string()
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        let parent_p = precedence(self);
        match self {
            Expr::Symbol(s) => write!(f, "{}", s),
            Expr::Number(n) => write!(f, "{}", n),
            Expr::Expr(head, args) => match (head.as_ref(), args.as_slice()) {
                ("Negate", [arg]) => write!(f, "-{}", wrap(arg, precedence(arg) > parent_p)),
                (head, [lhs, rhs]) if infix(head).is_some() => {
                    // ^ groups to the right, everything else to the left
                    let right_assoc = head == "Power";
                    let lp = precedence(lhs);
                    let rp = precedence(rhs);
                    write!(f, "{}{}{}",
                           wrap(lhs, lp > parent_p || lp == parent_p && right_assoc),
                           infix(head).unwrap_or_default(),
                           wrap(rhs, rp > parent_p || rp == parent_p && !right_assoc))
                }
                (head, args) => write!(
                    f,
                    "{}({})",
                    head,
                    args.iter().map(|a| a.to_string()).collect::<Vec<_>>().join(", ")
                ),
            },
        }
    }
}
