use std::path::{Path, PathBuf};
use std::fmt::Display;

pub trait ErrorType: Display + PartialEq {}

#[derive(Debug, PartialEq, Clone)]
pub struct Location {
    pub file: PathBuf,
    // 0 when the error concerns the whole source rather than one line
    pub line: usize
}

impl Location {
    pub fn line(file: &Path, line: usize) -> Self {
        Location {
            file: file.to_path_buf(),
            line
        }
    }

    pub fn whole(file: &Path) -> Self {
        Self::line(file, 0)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.file.display())
        } else {
            write!(f, "{}:{}", self.file.display(), self.line)
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Error<T: ErrorType> {
    pub location: Location,
    pub error: T
}

impl<T: ErrorType> Error<T> {
    pub fn at(location: Location, error: T) -> Self {
        Error { location, error }
    }
}

impl<T: ErrorType> Display for Error<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\x1b[31;49;1m[{}]\x1b[39;49;1m  {}\x1b[0m", self.location, self.error)
    }
}

pub type Errors<T> = Vec<Error<T>>;

// io::Error has no PartialEq, so error enums wrapping one compare by kind
pub fn same_io_kind(a: &std::io::Error, b: &std::io::Error) -> bool {
    a.kind() == b.kind()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_display() {
        let file = PathBuf::from("grammars.txt");
        assert_eq!(Location::whole(&file).to_string(), "grammars.txt");
        assert_eq!(Location::line(&file, 12).to_string(), "grammars.txt:12");
    }
}
