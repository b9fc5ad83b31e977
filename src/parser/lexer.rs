use itertools::Itertools;

use crate::grammar::Symbol;
use crate::grammar::END;

// A production line before its symbols are classified
#[derive(PartialEq, Debug)]
pub struct RawProduction<'a> {
    pub left: &'a str,
    pub right: Vec<&'a str>,
}

// Splits `LHS -> s1 s2 ... sn`. The arrow is taken from the right, so a left
// side may itself contain ` -> `. Lines of any other shape give `None`.
pub fn lex_production(line: &str) -> Option<RawProduction> {
    let (left, right) = line.rsplit_once(" -> ")?;
    let right = right.split_whitespace().collect_vec();

    if left.is_empty() || right.is_empty() {
        return None;
    }

    Some(RawProduction { left, right })
}

// Splits `value\t<category,attribute>`, again taking the last tab and the last
// comma. Returns the value and the terminal it is typed as.
pub fn lex_token(line: &str) -> Option<(&str, Symbol)> {
    let (value, field) = line.rsplit_once('\t')?;
    let inner = field.strip_prefix('<')?.strip_suffix('>')?;
    // The attribute is never empty, so the separating comma is not the last char
    let (last, _) = inner.char_indices().last()?;
    let (category, _) = inner[..last].rsplit_once(',')?;

    if value.is_empty() || category.is_empty() {
        return None;
    }

    let kind = match category {
        "Ident" | "INT" => category,
        _ => value,
    };
    let kind = if kind == END { Symbol::End } else { Symbol::Terminal(kind.to_string()) };

    Some((value, kind))
}
