//! A grammar is the base type name plus the ordered variants derived from it.
use crate::descriptor::{self, is_identifier, Variant};
use crate::error::{Error, Result};

/// Descriptors for the expression grammar the parser is built around.
pub const EXPR_DESCRIPTORS: &[&str] = &[
    "Binary : Expr* left, Token* op, Expr* right",
    "Grouping : Expr* expression",
    "Literal : string value",
    "Unary : Token* op, Expr* right",
];

pub const DEFAULT_BASE_NAME: &str = "Expr";

/// Forward-declared when nothing else is asked for, since most grammars refer to tokens.
pub const DEFAULT_FORWARD_DECL: &str = "Token";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grammar {
    pub base_name: String,
    /// Types referenced by fields but declared elsewhere.
    pub forward_decls: Vec<String>,
    pub variants: Vec<Variant>,
}

impl Grammar {
    /// Build a grammar, checking that names are valid and unique.
    pub fn new(
        base_name: impl Into<String>,
        forward_decls: Vec<String>,
        variants: Vec<Variant>,
    ) -> Result<Self> {
        let base_name = base_name.into();
        if !is_identifier(&base_name) {
            return Err(Error::InvalidBaseName(base_name));
        }
        if let Some(bad) = forward_decls.iter().find(|f| !is_identifier(f)) {
            return Err(Error::InvalidForwardDecl(bad.clone()));
        }
        if variants.is_empty() {
            return Err(Error::EmptyGrammar);
        }
        for (i, variant) in variants.iter().enumerate() {
            if variant.name == base_name {
                return Err(Error::BaseNameCollision(variant.name.clone()));
            }
            if variants[..i].iter().any(|v| v.name == variant.name) {
                return Err(Error::DuplicateVariant(variant.name.clone()));
            }
        }
        Ok(Grammar {
            base_name,
            forward_decls,
            variants,
        })
    }

    /// Build a grammar from descriptor strings.
    pub fn from_descriptors(
        base_name: impl Into<String>,
        forward_decls: Vec<String>,
        descriptors: &[&str],
    ) -> Result<Self> {
        let variants = descriptors
            .iter()
            .map(|d| descriptor::parse(d))
            .collect::<Result<Vec<_>>>()?;
        Grammar::new(base_name, forward_decls, variants)
    }

    /// The built-in `Expr` grammar.
    pub fn expr() -> Result<Self> {
        Grammar::from_descriptors(
            DEFAULT_BASE_NAME,
            vec![DEFAULT_FORWARD_DECL.into()],
            EXPR_DESCRIPTORS,
        )
    }
}

/// The contents of a grammar file, before command-line overrides are applied.
///
/// A grammar file holds one descriptor per line. Blank lines and lines starting with `#` are
/// ignored. Two directives are recognized on lines without a `:`:
///
/// ```text
/// base Expr
/// forward Token Environment
/// ```
#[derive(Debug, Default, PartialEq, Eq)]
pub struct GrammarFile {
    pub base_name: Option<String>,
    pub forward_decls: Vec<String>,
    pub variants: Vec<Variant>,
}

impl GrammarFile {
    pub fn parse(text: &str) -> Result<Self> {
        let mut file = GrammarFile::default();
        for (i, line) in text.lines().enumerate() {
            file.parse_line(line).map_err(|e| e.at_line(i + 1))?;
        }
        Ok(file)
    }

    fn parse_line(&mut self, line: &str) -> Result<()> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(());
        }

        if !trimmed.contains(':') {
            let mut words = trimmed.split_whitespace();
            match words.next() {
                Some("base") => {
                    let args: Vec<&str> = words.collect();
                    let [name] = args.as_slice() else {
                        return Err(Error::InvalidBaseName(args.join(" ")));
                    };
                    self.base_name = Some((*name).to_owned());
                    return Ok(());
                }
                Some("forward") => {
                    self.forward_decls.extend(words.map(str::to_owned));
                    return Ok(());
                }
                // Anything else is a descriptor missing its colon; let the parser say so.
                _ => {}
            }
        }

        let variant = descriptor::parse(line)?;
        if self.variants.iter().any(|v| v.name == variant.name) {
            return Err(Error::DuplicateVariant(variant.name));
        }
        self.variants.push(variant);
        Ok(())
    }

    /// Resolve this file into a grammar. A `base_name` or non-empty `forward_decls` given here
    /// takes precedence over the file's directives.
    pub fn into_grammar(
        self,
        base_name: Option<String>,
        forward_decls: Vec<String>,
    ) -> Result<Grammar> {
        let base_name = base_name
            .or(self.base_name)
            .unwrap_or_else(|| DEFAULT_BASE_NAME.to_owned());
        let forward_decls = if !forward_decls.is_empty() {
            forward_decls
        } else if !self.forward_decls.is_empty() {
            self.forward_decls
        } else {
            vec![DEFAULT_FORWARD_DECL.to_owned()]
        };
        Grammar::new(base_name, forward_decls, self.variants)
    }
}

impl From<Grammar> for GrammarFile {
    fn from(grammar: Grammar) -> Self {
        GrammarFile {
            base_name: Some(grammar.base_name),
            forward_decls: grammar.forward_decls,
            variants: grammar.variants,
        }
    }
}
