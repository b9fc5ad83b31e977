use std::fmt::Display;
use std::fs::File;
use std::io::BufRead;
use std::path::PathBuf;

use log::info;

use crate::error_handling::*;
use crate::grammar::Symbol;
use super::lexer::lex_token;

#[derive(Debug)]
pub enum TokenErrorType {
    // There was an issue with reading a file
    FileError(std::io::Error),
}

impl ErrorType for TokenErrorType {}

impl PartialEq for TokenErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TokenErrorType::FileError(a), TokenErrorType::FileError(b)) => same_io_kind(a, b),
        }
    }
}

impl Display for TokenErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type TokenError = Error<TokenErrorType>;

#[derive(Debug, PartialEq, Clone)]
pub struct Token {
    pub value: String,
    // Always a terminal, or `End` for the synthetic last token
    pub kind: Symbol,
    // 1-based line in the token source, 0 for the synthetic end token
    pub line: usize,
}

impl Token {
    pub fn end() -> Self {
        Token {
            value: Symbol::End.to_string(),
            kind: Symbol::End,
            line: 0
        }
    }
}

/// Tokens read from one source, always closed by an end token.
#[derive(Debug, PartialEq)]
pub struct TokenStream {
    pub path: PathBuf,
    pub tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new(path: PathBuf, mut tokens: Vec<Token>) -> Self {
        tokens.push(Token::end());
        TokenStream { path, tokens }
    }

    // Where a token came from, for error reports
    pub fn location(&self, token: &Token) -> Location {
        Location::line(&self.path, token.line)
    }
}

pub fn read_tokens_from(reader: impl BufRead, path: &PathBuf) -> Result<TokenStream, TokenError> {
    let mut tokens = Vec::new();

    for (num, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| TokenError::at(Location::line(path, num + 1), TokenErrorType::FileError(e)))?;
        if let Some((value, kind)) = lex_token(&line) {
            tokens.push(Token {
                value: value.to_string(),
                kind,
                line: num + 1
            });
        }
    }

    info!("read {} tokens from {}", tokens.len(), path.display());
    Ok(TokenStream::new(path.clone(), tokens))
}

pub fn read_tokens(path: &PathBuf) -> Result<TokenStream, TokenError> {
    let file = File::open(path)
        .map_err(|e| TokenError::at(Location::whole(path), TokenErrorType::FileError(e)))?;
    read_tokens_from(std::io::BufReader::new(file), path)
}
