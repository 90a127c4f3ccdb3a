use crate::src::Src;
use thiserror::Error;
use unicode_width::UnicodeWidthStr;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("malformed descriptor `{descriptor}`: {reason}")]
    MalformedDescriptor {
        descriptor: String,
        src: Src,
        reason: Reason,
    },
    #[error("variant `{0}` is declared more than once")]
    DuplicateVariant(String),
    #[error("variant `{0}` has the same name as the base type")]
    BaseNameCollision(String),
    #[error("`{0}` is not a valid base type name")]
    InvalidBaseName(String),
    #[error("`{0}` is reserved for the generated visitor interface")]
    ReservedName(String),
    #[error("grammar declares no variants")]
    EmptyGrammar,
    #[error("`{0}` is not a valid forward declaration")]
    InvalidForwardDecl(String),
    #[error("line {line}: {inner}")]
    AtLine { line: usize, inner: Box<Error> },
}

/// Why a descriptor was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Reason {
    #[error("expected `:` between the type name and its fields")]
    MissingColon,
    #[error("expected a type name before `:`")]
    EmptyTypeName,
    #[error("type name `{0}` is not an identifier")]
    InvalidTypeName(String),
    #[error("expected at least one field after `:`")]
    NoFields,
    #[error("field `{0}` needs a type and a name separated by a space")]
    MissingFieldName(String),
    #[error("field name `{0}` is not an identifier")]
    InvalidFieldName(String),
    #[error("field `{0}` is declared more than once")]
    DuplicateField(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn malformed<T>(descriptor: &str, src: Src, reason: Reason) -> Result<T> {
        Err(Error::MalformedDescriptor {
            descriptor: descriptor.to_owned(),
            src,
            reason,
        })
    }

    /// Attach a grammar-file line number to this error.
    pub fn at_line(self, line: usize) -> Error {
        Error::AtLine {
            line,
            inner: Box::new(self),
        }
    }

    /// Return a two-line string highlighting the offending part of a malformed descriptor,
    /// preceded by its line number when it came from a grammar file. Other errors have nothing
    /// to highlight.
    pub fn highlight(&self) -> Option<String> {
        self.highlight_with(None)
    }

    fn highlight_with(&self, line: Option<usize>) -> Option<String> {
        match self {
            Error::AtLine { line, inner } => inner.highlight_with(Some(*line)),
            Error::MalformedDescriptor {
                descriptor, src, ..
            } => {
                // Calculate the width (in terminal characters) of the text before the span.
                let terminal_offset = UnicodeWidthStr::width(&descriptor[..src.offset]);
                // Empty spans (e.g. "expected more here") still get a single caret.
                let terminal_span_width = UnicodeWidthStr::width(src.slice(descriptor)).max(1);
                let line_num_str = line.map(|l| l.to_string()).unwrap_or_default();
                let line_num_width = line_num_str.len();
                Some(format!(
                    "{line_num_str} | {descriptor}\n{empty:line_num_width$} | {empty:terminal_offset$}{empty:^<terminal_span_width$}",
                    empty = ""
                ))
            }
            _ => None,
        }
    }
}
