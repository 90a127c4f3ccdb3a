use crate::generate::{define_ast, Style};
use crate::grammar::{Grammar, GrammarFile};
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

/// Load the grammar to generate: the built-in `Expr` grammar, or the grammar file at `path`.
/// A given `base_name` or non-empty `forward_decls` override what the grammar declares.
pub fn load_grammar(
    path: Option<&Path>,
    base_name: Option<String>,
    forward_decls: Vec<String>,
) -> anyhow::Result<Grammar> {
    let file = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("could not read grammar `{}`", path.display()))?;
            GrammarFile::parse(&text)?
        }
        None => GrammarFile::from(Grammar::expr()?),
    };
    Ok(file.into_grammar(base_name, forward_decls)?)
}

/// Render the header text for `grammar`.
pub fn render(grammar: &Grammar, style: Style) -> crate::error::Result<String> {
    Ok(define_ast(grammar, style)?.render())
}

/// The file a grammar's header is written to.
pub fn header_path(dir: impl AsRef<Path>, grammar: &Grammar) -> PathBuf {
    dir.as_ref().join(format!("{}.h", grammar.base_name))
}

/// Generate the header for `grammar` and write it to `<dir>/<base>.h`, replacing any existing
/// file. Nothing is written unless generation succeeds.
pub fn write_header(
    dir: impl AsRef<Path>,
    grammar: &Grammar,
    style: Style,
) -> anyhow::Result<PathBuf> {
    let text = render(grammar, style)?;
    let path = header_path(dir, grammar);
    fs::write(&path, text).with_context(|| format!("could not write `{}`", path.display()))?;
    Ok(path)
}
