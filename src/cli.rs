use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version, about = "Checks a grammar for LL(1) and parses a token file with it")]
pub struct Cli {
    /// File containing the grammar, one `LHS -> RHS` rule per line
    pub grammar: PathBuf,

    /// File containing the tokens, one `value<TAB><category,attribute>` per line
    pub tokens: PathBuf,

    /// Where to write the parse trace
    #[arg(short, long, value_name = "FILE", default_value = "output.txt")]
    pub output: PathBuf,

    /// Start symbol (default: first in the file)
    #[arg(short, long, value_name = "SYMBOL")]
    pub start: Option<String>,

    /// Extra terminal on top of the built-in lexical categories
    #[arg(short, long = "terminal", value_name = "TERMINAL")]
    pub terminals: Vec<String>,

    /// Fail when two productions claim the same table cell
    #[arg(long)]
    pub strict: bool,

    /// Name the production applied by each reduction in the trace
    #[arg(short, long)]
    pub productions: bool,

    /// Print FIRST, FOLLOW and the predictive table
    #[arg(long)]
    pub sets: bool,

    /// More logging (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
