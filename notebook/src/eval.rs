use crate::context::Context;
use crate::error::EvalError;
use crate::expr::Expr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Plus,
    Minus,
    Times,
    Divide,
    Mod,
    Power,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Builtin {
    Sin,
    Cos,
    Tan,
    Exp,
    Ln,
    Sqrt,
    Abs,
    Max,
    Min,
    Atan2,
    Rand,
}

/// What to do with the arguments of an `Expr::Expr`, picked by its head.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Evaluator {
    Negate,
    Binary(BinaryOp),
    Builtin(Builtin),
}

impl BinaryOp {
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            BinaryOp::Plus => lhs + rhs,
            BinaryOp::Minus => lhs - rhs,
            BinaryOp::Times => lhs * rhs,
            BinaryOp::Divide => lhs / rhs,
            BinaryOp::Mod => lhs % rhs,
            BinaryOp::Power => lhs.powf(rhs),
        }
    }
}

impl Builtin {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "sin" => Builtin::Sin,
            "cos" => Builtin::Cos,
            "tan" => Builtin::Tan,
            "exp" => Builtin::Exp,
            "ln" => Builtin::Ln,
            "sqrt" => Builtin::Sqrt,
            "abs" => Builtin::Abs,
            "max" => Builtin::Max,
            "min" => Builtin::Min,
            "atan2" => Builtin::Atan2,
            "rand" => Builtin::Rand,
            _ => return None,
        })
    }

    fn arity(self) -> &'static str {
        match self {
            Builtin::Max | Builtin::Min => "at least 1",
            Builtin::Atan2 => "2",
            _ => "1",
        }
    }

    pub fn apply(self, args: &[f64]) -> Result<f64, EvalError> {
        Ok(match (self, args) {
            (Builtin::Sin, [x]) => x.sin(),
            (Builtin::Cos, [x]) => x.cos(),
            (Builtin::Tan, [x]) => x.tan(),
            (Builtin::Exp, [x]) => x.exp(),
            (Builtin::Ln, [x]) => x.ln(),
            (Builtin::Sqrt, [x]) => x.sqrt(),
            (Builtin::Abs, [x]) => x.abs(),
            (Builtin::Max, [first, rest @ ..]) => rest.iter().fold(*first, |a, &b| a.max(b)),
            (Builtin::Min, [first, rest @ ..]) => rest.iter().fold(*first, |a, &b| a.min(b)),
            (Builtin::Atan2, [y, x]) => y.atan2(*x),
            // uniform in [0, x)
            (Builtin::Rand, [x]) => x * rand::random::<f64>(),
            _ => {
                return Err(EvalError::WrongNumberOfArgs {
                    name: format!("{:?}", self).to_lowercase(),
                    expected: self.arity(),
                    got: args.len(),
                });
            }
        })
    }
}

impl Evaluator {
    /// Pick the evaluator for an expression head.
    pub fn for_head(head: &str) -> Result<Self, EvalError> {
        Ok(match head {
            "Negate" => Evaluator::Negate,
            "Plus" => Evaluator::Binary(BinaryOp::Plus),
            "Minus" => Evaluator::Binary(BinaryOp::Minus),
            "Times" => Evaluator::Binary(BinaryOp::Times),
            "Divide" => Evaluator::Binary(BinaryOp::Divide),
            "Mod" => Evaluator::Binary(BinaryOp::Mod),
            "Power" => Evaluator::Binary(BinaryOp::Power),
            other => Builtin::from_name(other)
                .map(Evaluator::Builtin)
                .ok_or_else(|| EvalError::UnknownFunction(other.to_string()))?,
        })
    }

    pub fn eval(self, head: &str, args: &[Expr], ctx: &Context) -> Result<f64, EvalError> {
        let values = args
            .iter()
            .map(|a| evaluate(a, ctx))
            .collect::<Result<Vec<_>, _>>()?;
        match (self, values.as_slice()) {
            (Evaluator::Negate, [x]) => Ok(-x),
            (Evaluator::Binary(op), [lhs, rhs]) => Ok(op.apply(*lhs, *rhs)),
            (Evaluator::Builtin(f), values) => f.apply(values),
            (Evaluator::Negate, _) => Err(EvalError::WrongNumberOfArgs {
                name: head.to_string(),
                expected: "1",
                got: values.len(),
            }),
            (Evaluator::Binary(_), _) => Err(EvalError::WrongNumberOfArgs {
                name: head.to_string(),
                expected: "2",
                got: values.len(),
            }),
        }
    }
}

pub fn evaluate(expr: &Expr, ctx: &Context) -> Result<f64, EvalError> {
    match expr {
        Expr::Number(n) => Ok(*n),
        Expr::Symbol(name) => ctx
            .get(name)
            .ok_or_else(|| EvalError::UnknownSymbol(name.clone())),
        Expr::Expr(head, args) => Evaluator::for_head(head)?.eval(head, args, ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::{BinaryOp, Builtin, Evaluator, evaluate};
    use crate::context::Context;
    use crate::error::EvalError;
    use crate::expr::Expr;

    fn num(n: f64) -> Expr {
        Expr::Number(n)
    }

    #[test]
    fn factory_by_head() {
        assert_eq!(Evaluator::for_head("Plus"), Ok(Evaluator::Binary(BinaryOp::Plus)));
        assert_eq!(Evaluator::for_head("Negate"), Ok(Evaluator::Negate));
        assert_eq!(Evaluator::for_head("atan2"), Ok(Evaluator::Builtin(Builtin::Atan2)));
        assert_eq!(
            Evaluator::for_head("gamma"),
            Err(EvalError::UnknownFunction("gamma".to_string()))
        );
    }

    #[test]
    fn builtins() {
        assert_eq!(Builtin::Max.apply(&[1.0, 7.0, 3.0]), Ok(7.0));
        assert_eq!(Builtin::Min.apply(&[4.0]), Ok(4.0));
        assert_eq!(Builtin::Abs.apply(&[-2.5]), Ok(2.5));
        assert_eq!(Builtin::Sqrt.apply(&[16.0]), Ok(4.0));
        assert_eq!(
            Builtin::Max.apply(&[]),
            Err(EvalError::WrongNumberOfArgs {
                name: "max".to_string(),
                expected: "at least 1",
                got: 0
            })
        );
        assert!(Builtin::Atan2.apply(&[1.0]).is_err());
        for _ in 0..100 {
            let r = Builtin::Rand.apply(&[3.0]).unwrap();
            assert!((0.0..3.0).contains(&r));
        }
    }

    #[test]
    fn nested() {
        let ctx = Context::new();
        let e = Expr::call(
            "Plus",
            vec![
                num(1.0),
                Expr::call("Times", vec![num(2.0), Expr::call("Negate", vec![num(3.0)])]),
            ],
        );
        assert_eq!(evaluate(&e, &ctx), Ok(-5.0));
        let e = Expr::call("cos", vec![Expr::Symbol("pi".to_string())]);
        assert_eq!(evaluate(&e, &ctx), Ok(-1.0));
        let e = Expr::call("Mod", vec![num(7.0), num(4.0)]);
        assert_eq!(evaluate(&e, &ctx), Ok(3.0));
    }

    #[test]
    fn eval_errors() {
        let ctx = Context::new().with("x", 2.0);
        assert_eq!(evaluate(&Expr::Symbol("x".to_string()), &ctx), Ok(2.0));
        assert_eq!(
            evaluate(&Expr::Symbol("y".to_string()), &ctx),
            Err(EvalError::UnknownSymbol("y".to_string()))
        );
        let e = Expr::call("Plus", vec![num(1.0)]);
        assert_eq!(
            evaluate(&e, &ctx),
            Err(EvalError::WrongNumberOfArgs {
                name: "Plus".to_string(),
                expected: "2",
                got: 1
            })
        );
        // arguments are evaluated first
        let e = Expr::call("sin", vec![Expr::Symbol("y".to_string()), num(1.0)]);
        assert_eq!(evaluate(&e, &ctx), Err(EvalError::UnknownSymbol("y".to_string())));
    }
}
