use clap::Parser;
use llgrey::Analysis;
use log::{debug, warn};
use notebook::{Answer, Error, Notebook, Sequenced, Settings, Translator, render};
use rustyline::error::ReadlineError;
use std::sync::mpsc::{self, Receiver};

fn print_grammar() -> Result<(), Error> {
    let translator = Translator::new()?;
    let table = translator.table();
    print!("{}", table.grammar());
    println!();
    print!("{}", Analysis::new(table.grammar())?);
    println!();
    print!("{}", table);
    Ok(())
}

// Answer every input, then print them all in order
fn batch<'a>(mut notebook: Notebook, mut inputs: impl Iterator<Item=&'a str>,
             outputs: Receiver<Sequenced<Answer>>) -> Result<(), Error> {
    let submitted = inputs.try_for_each(|input| notebook.submit(input).map(|_| ()));
    notebook.finish();
    for out in outputs {
        println!("{}", render(&out));
    }
    submitted
}

fn repl(mut notebook: Notebook, outputs: Receiver<Sequenced<Answer>>) -> Result<(), Error> {
    let mut rl = rustyline::DefaultEditor::new()?;
    let history = dirs::home_dir().map(|home| home.join(".notebook_history"));
    if let Some(path) = &history {
        if rl.load_history(path).is_err() {
            debug!("No history loaded from {}", path.display());
        }
    }
    loop {
        let prompt = format!("In[{}]:= ", notebook.next_seq());
        match rl.readline(&prompt) {
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                if let Err(e) = notebook.submit(&line) {
                    println!("{}", e);
                    break;
                }
                // one answer per input, wait for it before the next prompt
                match outputs.recv() {
                    Ok(out) => println!("{}\n", render(&out)),
                    Err(_) => break,
                }
            }
        }
    }
    if let Some(path) = &history {
        if let Err(e) = rl.save_history(path) {
            warn!("Couldn't save history to {}: {}", path.display(), e);
        }
    }
    notebook.finish();
    Ok(())
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let settings = Settings::parse();
    if settings.grammar {
        return print_grammar();
    }

    let (tx, outputs) = mpsc::channel();
    let notebook = Notebook::new(&settings, move |out| {
        // receiver only goes away on shutdown
        let _ = tx.send(out);
    })?;

    if !settings.exprs.is_empty() {
        let input = settings.exprs.join(" ");
        return batch(notebook, std::iter::once(input.as_str()), outputs);
    }
    if let Some(path) = &settings.file {
        let text = std::fs::read_to_string(path)?;
        return batch(notebook, text.lines().filter(|l| !l.trim().is_empty()), outputs);
    }
    repl(notebook, outputs)
}
