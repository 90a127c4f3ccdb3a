use super::{Class, Constructor, Header, Init, Item, Member, MethodDef, Signature, Var, Virtual};
use std::mem::discriminant;

const INDENT: &str = "    ";

/// Renders a [`Header`] as text.
///
/// Items are separated by a blank line, except runs of forward declarations which are kept
/// together. Within a class, a blank line separates each group of like members.
#[derive(Default)]
pub struct Printer {
    out: String,
    depth: usize,
}

impl Printer {
    pub fn finish(self) -> String {
        self.out
    }

    fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.out.push_str(INDENT);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    pub fn header(&mut self, header: &Header) {
        let mut prev: Option<&Item> = None;
        for item in &header.items {
            if let Some(prev) = prev {
                if !matches!((prev, item), (Item::ForwardDecl(_), Item::ForwardDecl(_))) {
                    self.blank();
                }
            }
            self.item(item);
            prev = Some(item);
        }
    }

    fn item(&mut self, item: &Item) {
        match item {
            Item::PragmaOnce => self.line("#pragma once"),
            Item::ForwardDecl(name) => self.line(format!("class {name};")),
            Item::Class(class) => self.class(class),
            Item::MethodDef(def) => self.method_def(def),
        }
    }

    fn class(&mut self, class: &Class) {
        let head = match &class.base {
            Some(base) => format!("class {} : public {base}", class.name),
            None => format!("class {}", class.name),
        };
        if class.members.is_empty() {
            self.line(format!("{head} {{}};"));
            return;
        }

        self.line(format!("{head} {{"));
        self.line("public:");
        self.depth += 1;
        let mut prev = None;
        for member in &class.members {
            let kind = discriminant(member);
            if prev.is_some_and(|p| p != kind) {
                self.blank();
            }
            self.member(&class.name, member);
            prev = Some(kind);
        }
        self.depth -= 1;
        self.line("};");
    }

    fn member(&mut self, class: &str, member: &Member) {
        match member {
            Member::Constructor(ctor) => self.constructor(class, ctor),
            Member::ConstField(var) => self.line(format!("const {};", var_decl(var))),
            Member::Method(method) => {
                let sig = signature(&method.sig, None);
                self.line(match method.virt {
                    Virtual::Pure => format!("virtual {sig} = 0;"),
                    Virtual::Override => format!("virtual {sig} override;"),
                });
            }
        }
    }

    fn constructor(&mut self, class: &str, ctor: &Constructor) {
        let head = format!("{class}({})", params(&ctor.params));
        if ctor.params.is_empty() {
            self.line(format!("{head} {{}}"));
            return;
        }
        match ctor.init {
            Init::Assign => {
                self.line(format!("{head} {{"));
                self.depth += 1;
                for param in &ctor.params {
                    self.line(format!("this->{0} = {0};", param.name));
                }
                self.depth -= 1;
                self.line("}");
            }
            Init::InitializerList => {
                let inits: Vec<String> = ctor
                    .params
                    .iter()
                    .map(|p| format!("{0}({0})", p.name))
                    .collect();
                self.line(format!("{head} : {} {{}}", inits.join(", ")));
            }
        }
    }

    fn method_def(&mut self, def: &MethodDef) {
        self.line(format!("inline {} {{", signature(&def.sig, Some(&def.class))));
        self.depth += 1;
        for stmt in &def.body {
            self.line(format!("{stmt};"));
        }
        self.depth -= 1;
        self.line("}");
    }
}

fn var_decl(var: &Var) -> String {
    format!("{} {}", var.ty, var.name)
}

fn params(params: &[Var]) -> String {
    params.iter().map(var_decl).collect::<Vec<_>>().join(", ")
}

// `class` qualifies the name, for definitions outside the class body.
fn signature(sig: &Signature, class: Option<&str>) -> String {
    let name = match class {
        Some(class) => format!("{class}::{}", sig.name),
        None => sig.name.clone(),
    };
    let qualifier = if sig.is_const { " const" } else { "" };
    format!("{} {name}({}){qualifier}", sig.ret, params(&sig.params))
}
