mod scanner;
mod char_scanner;
mod math_tokenizer;

pub use scanner::Scanner;
pub use math_tokenizer::{Lexeme, MathToken, MathTokenizer};

#[cfg(test)]
mod scanner_test;
