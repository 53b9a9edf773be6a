use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "notebook", version, about = "Numbered arithmetic notebook over an LL(1) parser")]
pub struct Settings {
    /// Worker threads evaluating inputs
    #[arg(short, long, default_value_t = 4)]
    pub jobs: usize,

    /// Number given to the first input
    #[arg(long, default_value_t = 0)]
    pub first_seq: usize,

    /// Evaluate every non-empty line of a file, in order
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Print the grammar analysis and parse table, then exit
    #[arg(long)]
    pub grammar: bool,

    /// Expression to evaluate once, words are joined with spaces
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub exprs: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            jobs: 4,
            first_seq: 0,
            file: None,
            grammar: false,
            exprs: Vec::new(),
        }
    }
}
