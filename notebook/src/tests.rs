use crate::context::Context;
use crate::error::{Error, EvalError};
use crate::eval::evaluate;
use crate::expr::Expr;
use crate::pipeline::{Answer, Notebook, render};
use crate::reorder::Sequenced;
use crate::settings::Settings;
use crate::translate::{MAX_DEPTH, Translator};
use llgrey::TreeError;
use std::sync::mpsc;

fn translate(input: &str) -> Result<Expr, Error> {
    Translator::new()?.translate(input)
}

fn eval(input: &str) -> Result<f64, Error> {
    let expr = translate(input)?;
    Ok(evaluate(&expr, &Context::new())?)
}

fn run(settings: &Settings, inputs: &[&str]) -> Vec<Sequenced<Answer>> {
    let (tx, rx) = mpsc::channel();
    let mut notebook = Notebook::new(settings, move |out| tx.send(out).unwrap()).unwrap();
    for input in inputs {
        notebook.submit(input).unwrap();
    }
    notebook.finish();
    rx.into_iter().collect()
}

#[test]
fn parse_basic_expr() -> Result<(), Error> {
    let expected = Expr::call(
        "Plus",
        vec![
            Expr::Number(1.0),
            Expr::call(
                "max",
                vec![
                    Expr::Symbol("pi".to_string()),
                    Expr::call("Times", vec![Expr::Number(2.0), Expr::Number(3.5)]),
                ],
            ),
        ],
    );
    assert_eq!(translate("1 + max(pi, 2 * 3.5)")?, expected);
    assert_eq!(translate("rand()")?, Expr::call("rand", vec![]));
    Ok(())
}

#[test]
fn arith_ops() -> Result<(), Error> {
    assert_eq!(eval("1 + 2")?, 3.0);
    assert_eq!(eval("1 + 2 - 3")?, 0.0);
    assert_eq!(eval("1 - 2 + 3")?, 2.0);
    assert_eq!(eval("10 - 4 - 3")?, 3.0);
    assert_eq!(eval("1 + 2 * 3")?, 7.0);
    assert_eq!(eval("(1 + 2) * 3")?, 9.0);
    assert_eq!(eval("2 ^ 3 ^ 2")?, 512.0);
    assert_eq!(eval("1 + 2 ^ 3")?, 9.0);
    assert_eq!(eval("3 / 2 / 4")?, 0.375);
    assert_eq!(eval("7 % 4 * 2")?, 6.0);
    assert_eq!(eval("-3")?, -3.0);
    assert_eq!(eval("--3")?, 3.0);
    assert_eq!(eval("4--3")?, 7.0);
    assert_eq!(eval("-2 ^ 2")?, -4.0);
    assert_eq!(eval("2 ^ -1")?, 0.5);
    assert_eq!(eval("1e3 + .5")?, 1000.5);
    Ok(())
}

#[test]
fn functions() -> Result<(), Error> {
    assert_eq!(eval("sqrt(16) + abs(-2)")?, 6.0);
    assert_eq!(eval("max(1, 5, 3) - min(4, 2)")?, 3.0);
    assert_eq!(eval("atan2(1, 1) * 4")?, std::f64::consts::PI);
    assert_eq!(eval("ln(1) + exp(0)")?, 1.0);
    assert_eq!(eval("cos(0) + sin(0) + tan(0)")?, 1.0);
    let r = eval("rand(10)")?;
    assert!((0.0..10.0).contains(&r));
    Ok(())
}

#[test]
fn readback() -> Result<(), Error> {
    for input in ["(1 + 2) * 3", "10 - (4 - 3)", "2 ^ 3 ^ 2", "(-2) ^ 2", "-(pi + 1)", "max(1, 2 + 3)"] {
        assert_eq!(translate(input)?.to_string(), input);
    }
    assert_eq!(translate("-(2 ^ 2)")?.to_string(), "-2 ^ 2");
    assert_eq!(translate("((1))+2*x")?.to_string(), "1 + 2 * x");
    Ok(())
}

#[test]
fn syntax_errors() {
    match translate("1 +") {
        Err(Error::Syntax(e)) => {
            assert_eq!(e.found, "$");
            assert_eq!(e.position, 3);
            assert_eq!(e.expected, vec!["-", "(", "num", "ident"]);
        }
        other => panic!("expected syntax error, got {:?}", other),
    }
    match translate("x = 2") {
        Err(Error::Syntax(e)) => {
            assert_eq!(e.found, "=");
            assert_eq!(e.position, 2);
        }
        other => panic!("expected syntax error, got {:?}", other),
    }
    assert!(matches!(translate("max(1,)"), Err(Error::Syntax(_))));
    assert!(matches!(translate("2 3"), Err(Error::Syntax(_))));
    assert!(matches!(translate(""), Err(Error::Syntax(_))));
}

#[test]
fn translator_recovers() -> Result<(), Error> {
    let mut translator = Translator::new()?;
    assert!(translator.translate("(1 +").is_err());
    assert_eq!(translator.translate("1 + 1")?, Expr::call("Plus", vec![Expr::Number(1.0), Expr::Number(1.0)]));
    Ok(())
}

#[test]
fn eval_errors() {
    assert!(matches!(eval("x + 1"), Err(Error::Eval(EvalError::UnknownSymbol(s))) if s == "x"));
    assert!(matches!(eval("foo(1)"), Err(Error::Eval(EvalError::UnknownFunction(s))) if s == "foo"));
    assert!(matches!(
        eval("sqrt(1, 2)"),
        Err(Error::Eval(EvalError::WrongNumberOfArgs { got: 2, .. }))
    ));
    // the lexer takes `1.2.3` as `1.2` then `.3`
    assert!(matches!(eval("1.2.3"), Err(Error::Syntax(_))));
    let err = eval("x + 1").unwrap_err();
    assert_eq!(err.to_string(), "Eval error: Unknown symbol: x");
}

#[test]
fn translation_error_message() {
    let err = EvalError::from(TreeError::Action {
        rule: "A -> num".to_string(),
        reason: "bad number `1.2.3`".to_string(),
    });
    assert_eq!(err.to_string(), "Action failed for A -> num: bad number `1.2.3`");
}

#[test]
fn deep_nesting() -> Result<(), Error> {
    let mut translator = Translator::new()?;
    let deep = format!("{}1{}", "(".repeat(2000), ")".repeat(2000));
    match translator.translate(&deep) {
        Err(Error::Eval(EvalError::Translate(TreeError::TooDeep{depth, limit}))) => {
            assert_eq!(limit, MAX_DEPTH);
            assert!(depth > 10000, "{}", depth);
        }
        other => panic!("expected a depth error, got {:?}", other),
    }
    // unbalanced is still a syntax error, however deep
    assert!(matches!(translator.translate(&"(".repeat(5000)), Err(Error::Syntax(_))));
    assert_eq!(translator.translate("(((2)))")?, Expr::Number(2.0));

    let nested = format!("{}1{}", "(".repeat(150), ")".repeat(150));
    let outs = run(&Settings::default(), &[nested.as_str(), deep.as_str(), "2 + 2"]);
    assert_eq!(outs[0].payload.as_ref().ok(), Some(&1.0));
    assert!(render(&outs[1]).starts_with("Out[1]= Eval error: Tree nests"));
    assert_eq!(render(&outs[2]), "Out[2]= 4");
    Ok(())
}

#[test]
fn seq_numbers_run_out() {
    let settings = Settings {
        jobs: 1,
        first_seq: usize::MAX - 1,
        ..Settings::default()
    };
    let (tx, rx) = mpsc::channel();
    let mut notebook = Notebook::new(&settings, move |out| tx.send(out).unwrap()).unwrap();
    assert_eq!(notebook.submit("1 + 1").unwrap(), usize::MAX - 1);
    match notebook.submit("2") {
        Err(Error::SeqExhausted(seq)) => assert_eq!(seq, usize::MAX),
        other => panic!("expected to run out of numbers, got {:?}", other),
    }
    assert_eq!(notebook.next_seq(), usize::MAX);
    notebook.finish();
    let outs: Vec<_> = rx.into_iter().collect();
    assert_eq!(outs.len(), 1);
    assert_eq!(render(&outs[0]), format!("Out[{}]= 2", usize::MAX - 1));
}

#[test]
fn pipeline_in_order() {
    let settings = Settings {
        jobs: 3,
        first_seq: 5,
        ..Settings::default()
    };
    let inputs = ["1 + 1", "2 *", "3 ^ 2", "sqrt(16)", "nope", "max(1, 2, 3)"];
    let outs = run(&settings, &inputs);
    let seqs: Vec<_> = outs.iter().map(|o| o.seq).collect();
    assert_eq!(seqs, vec![5, 6, 7, 8, 9, 10]);
    let rendered: Vec<_> = outs.iter().map(render).collect();
    assert_eq!(rendered[0], "Out[5]= 2");
    assert!(rendered[1].starts_with("Out[6]= Syntax error: expected"));
    assert_eq!(rendered[2], "Out[7]= 9");
    assert_eq!(rendered[3], "Out[8]= 4");
    assert_eq!(rendered[4], "Out[9]= Eval error: Unknown symbol: nope");
    assert_eq!(rendered[5], "Out[10]= 3");
}

#[test]
fn pipeline_many_inputs() {
    let settings = Settings {
        jobs: 8,
        ..Settings::default()
    };
    let inputs: Vec<String> = (0..300)
        .map(|i| if i % 7 == 0 { format!("{} +", i) } else { format!("{} * 2", i) })
        .collect();
    let inputs: Vec<&str> = inputs.iter().map(|s| s.as_str()).collect();
    let outs = run(&settings, &inputs);
    assert_eq!(outs.len(), 300);
    for (i, out) in outs.iter().enumerate() {
        assert_eq!(out.seq, i);
        match &out.payload {
            Ok(v) => assert_eq!(*v, 2.0 * i as f64),
            Err(Error::Syntax(_)) => assert_eq!(i % 7, 0),
            Err(e) => panic!("unexpected error {}", e),
        }
    }
}

#[test]
fn custom_constants() {
    let (tx, rx) = mpsc::channel();
    let ctx = Context::new().with("answer", 42.0);
    let settings = Settings::default();
    let mut notebook = Notebook::with_context(&settings, ctx, move |out| tx.send(out).unwrap()).unwrap();
    assert_eq!(notebook.next_seq(), 0);
    assert_eq!(notebook.submit("answer / 2").unwrap(), 0);
    assert_eq!(notebook.next_seq(), 1);
    notebook.finish();
    let outs: Vec<_> = rx.into_iter().collect();
    assert_eq!(render(&outs[0]), "Out[0]= 21");
}
