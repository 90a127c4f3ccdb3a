//! Turn a [`Grammar`] into the declarations of a [`Header`].
use crate::descriptor::Variant;
use crate::error::{Error, Result};
use crate::grammar::Grammar;
use crate::header::{
    Class, Constructor, Header, Init, Item, Member, Method, MethodDef, Signature, Var, Virtual,
};

/// Name of the generated visitor interface.
pub const VISITOR: &str = "Visitor";

/// The shape of the generated classes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Style {
    /// Plain data classes: an empty base and constructors that assign in their body.
    Plain,
    /// Classes dispatching through a `Visitor` interface via `accept`, with constructors using
    /// member-initializer lists.
    #[default]
    Visitor,
}

/// Generate the header for `grammar`.
pub fn define_ast(grammar: &Grammar, style: Style) -> Result<Header> {
    let base = grammar.base_name.as_str();
    let mut items = vec![Item::PragmaOnce];
    items.extend(grammar.forward_decls.iter().cloned().map(Item::ForwardDecl));

    match style {
        Style::Plain => {
            items.push(Item::Class(Class {
                name: base.to_owned(),
                base: None,
                members: vec![],
            }));
            items.extend(
                grammar
                    .variants
                    .iter()
                    .map(|v| Item::Class(define_type(base, v, style))),
            );
        }
        Style::Visitor => {
            if let Some(name) = std::iter::once(base)
                .chain(grammar.variants.iter().map(|v| v.name.as_str()))
                .find(|n| *n == VISITOR)
            {
                return Err(Error::ReservedName(name.to_owned()));
            }

            // Everything refers to everything else, so declare all names up front.
            items.push(Item::ForwardDecl(VISITOR.to_owned()));
            items.extend(
                grammar
                    .variants
                    .iter()
                    .map(|v| Item::ForwardDecl(v.name.clone())),
            );
            items.push(Item::Class(Class {
                name: base.to_owned(),
                base: None,
                members: vec![Member::Method(Method {
                    sig: accept_signature(),
                    virt: Virtual::Pure,
                })],
            }));
            items.extend(
                grammar
                    .variants
                    .iter()
                    .map(|v| Item::Class(define_type(base, v, style))),
            );
            items.extend(define_visitor(grammar));
        }
    }

    Ok(Header { items })
}

/// Declare the class for one variant.
fn define_type(base: &str, variant: &Variant, style: Style) -> Class {
    let fields: Vec<Var> = variant
        .fields
        .iter()
        .map(|f| Var::new(&f.ty, &f.name))
        .collect();

    let init = match style {
        Style::Plain => Init::Assign,
        Style::Visitor => Init::InitializerList,
    };
    let mut members = vec![Member::Constructor(Constructor {
        params: fields.clone(),
        init,
    })];
    members.extend(fields.into_iter().map(Member::ConstField));
    if style == Style::Visitor {
        members.push(Member::Method(Method {
            sig: accept_signature(),
            virt: Virtual::Override,
        }));
    }

    Class {
        name: variant.name.clone(),
        base: Some(base.to_owned()),
        members,
    }
}

/// The visitor interface, followed by the `accept` body of each variant.
fn define_visitor(grammar: &Grammar) -> Vec<Item> {
    let visited = std::iter::once(grammar.base_name.as_str())
        .chain(grammar.variants.iter().map(|v| v.name.as_str()));
    let visitor = Class {
        name: VISITOR.to_owned(),
        base: None,
        members: visited
            .map(|name| {
                Member::Method(Method {
                    sig: Signature {
                        ret: "void".into(),
                        name: "visit".into(),
                        params: vec![Var::new(format!("const {name}*"), "node")],
                        is_const: false,
                    },
                    virt: Virtual::Pure,
                })
            })
            .collect(),
    };

    let mut items = vec![Item::Class(visitor)];
    items.extend(grammar.variants.iter().map(|v| {
        Item::MethodDef(MethodDef {
            class: v.name.clone(),
            sig: accept_signature(),
            body: vec!["visitor.visit(this)".into()],
        })
    }));
    items
}

fn accept_signature() -> Signature {
    Signature {
        ret: "void".into(),
        name: "accept".into(),
        params: vec![Var::new(format!("{VISITOR}&"), "visitor")],
        is_const: true,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::grammar::EXPR_DESCRIPTORS;
    use indoc::indoc;
    use std::collections::BTreeSet;

    fn expr(style: Style) -> Header {
        define_ast(&Grammar::expr().unwrap(), style).unwrap()
    }

    /// Pull `(class, base, field names)` for each derived class back out of rendered text.
    fn scrape(text: &str) -> Vec<(String, String, Vec<String>)> {
        let mut result = Vec::new();
        for line in text.lines() {
            let line = line.trim();
            if let Some(head) = line.strip_prefix("class ") {
                if let Some((name, rest)) = head.split_once(" : public ") {
                    let base = rest.trim_end_matches(" {").to_owned();
                    result.push((name.to_owned(), base, vec![]));
                }
            } else if let Some(field) = line.strip_prefix("const ") {
                let (_, name) = field.trim_end_matches(';').rsplit_once(' ').unwrap();
                result.last_mut().unwrap().2.push(name.to_owned());
            }
        }
        result
    }

    #[test]
    fn expr_scenario() {
        for style in [Style::Plain, Style::Visitor] {
            let header = expr(style);
            let names: Vec<&str> = header
                .classes()
                .filter(|c| c.base.as_deref() == Some("Expr"))
                .map(|c| c.name.as_str())
                .collect();
            assert_eq!(names, vec!["Binary", "Grouping", "Literal", "Unary"]);

            let binary = header.class("Binary").unwrap();
            assert_eq!(
                binary.fields().cloned().collect::<Vec<_>>(),
                vec![
                    Var::new("Expr*", "left"),
                    Var::new("Token*", "op"),
                    Var::new("Expr*", "right"),
                ]
            );
        }
    }

    #[test]
    fn constructor_params_match_fields() {
        for style in [Style::Plain, Style::Visitor] {
            for class in expr(style).classes().filter(|c| c.base.is_some()) {
                let Some(Member::Constructor(ctor)) = class.members.first() else {
                    panic!("{} has no constructor", class.name);
                };
                assert_eq!(ctor.params, class.fields().cloned().collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn rendered_fields_round_trip() {
        let grammar = Grammar::expr().unwrap();
        for style in [Style::Plain, Style::Visitor] {
            let scraped = scrape(&expr(style).render());
            assert_eq!(scraped.len(), EXPR_DESCRIPTORS.len());
            for ((name, base, fields), variant) in scraped.iter().zip(&grammar.variants) {
                assert_eq!(name, &variant.name);
                assert_eq!(base, "Expr");
                let expected: Vec<&str> = variant.fields.iter().map(|f| f.name.as_str()).collect();
                assert_eq!(fields, &expected);
            }
        }
    }

    #[test]
    fn idempotent() {
        for style in [Style::Plain, Style::Visitor] {
            assert_eq!(expr(style).render(), expr(style).render());
        }
    }

    #[test]
    fn visitor_is_complete() {
        let header = expr(Style::Visitor);
        let visitor = header.class(VISITOR).unwrap();
        let visited: Vec<String> = visitor
            .members
            .iter()
            .map(|m| match m {
                Member::Method(m) => m.sig.params[0].ty.clone(),
                other => panic!("unexpected member {other:?}"),
            })
            .collect();
        assert_eq!(
            visited,
            vec![
                "const Expr*",
                "const Binary*",
                "const Grouping*",
                "const Literal*",
                "const Unary*"
            ]
        );
        assert_eq!(visited.iter().collect::<BTreeSet<_>>().len(), visited.len());

        let accepted: Vec<&str> = header
            .items
            .iter()
            .filter_map(|i| match i {
                Item::MethodDef(def) => {
                    assert_eq!(def.body, vec!["visitor.visit(this)".to_owned()]);
                    Some(def.class.as_str())
                }
                _ => None,
            })
            .collect();
        assert_eq!(accepted, vec!["Binary", "Grouping", "Literal", "Unary"]);
    }

    #[test]
    fn plain_has_no_visitor() {
        let text = expr(Style::Plain).render();
        assert!(!text.contains(VISITOR));
        assert!(!text.contains("accept"));
    }

    #[test]
    fn reserved_visitor_name() {
        let grammar = Grammar::from_descriptors("Expr", vec![], &["Visitor : Expr* e"]).unwrap();
        assert_eq!(
            define_ast(&grammar, Style::Visitor),
            Err(Error::ReservedName("Visitor".into()))
        );
        assert!(define_ast(&grammar, Style::Plain).is_ok());
    }

    #[test]
    fn plain_output() {
        let grammar = Grammar::from_descriptors(
            "Expr",
            vec!["Token".into()],
            &["Unary : Token* op, Expr* right"],
        )
        .unwrap();
        assert_eq!(
            define_ast(&grammar, Style::Plain).unwrap().render(),
            indoc! {"
                #pragma once

                class Token;

                class Expr {};

                class Unary : public Expr {
                public:
                    Unary(Token* op, Expr* right) {
                        this->op = op;
                        this->right = right;
                    }

                    const Token* op;
                    const Expr* right;
                };
            "}
        );
    }

    #[test]
    fn visitor_output() {
        let grammar = Grammar::from_descriptors(
            "Expr",
            vec!["Token".into()],
            &["Grouping : Expr* expression", "Literal : string value"],
        )
        .unwrap();
        assert_eq!(
            define_ast(&grammar, Style::Visitor).unwrap().render(),
            indoc! {"
                #pragma once

                class Token;
                class Visitor;
                class Grouping;
                class Literal;

                class Expr {
                public:
                    virtual void accept(Visitor& visitor) const = 0;
                };

                class Grouping : public Expr {
                public:
                    Grouping(Expr* expression) : expression(expression) {}

                    const Expr* expression;

                    virtual void accept(Visitor& visitor) const override;
                };

                class Literal : public Expr {
                public:
                    Literal(string value) : value(value) {}

                    const string value;

                    virtual void accept(Visitor& visitor) const override;
                };

                class Visitor {
                public:
                    virtual void visit(const Expr* node) = 0;
                    virtual void visit(const Grouping* node) = 0;
                    virtual void visit(const Literal* node) = 0;
                };

                inline void Grouping::accept(Visitor& visitor) const {
                    visitor.visit(this);
                }

                inline void Literal::accept(Visitor& visitor) const {
                    visitor.visit(this);
                }
            "}
        );
    }
}
