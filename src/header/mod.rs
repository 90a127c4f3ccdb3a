//! An in-memory representation of the declarations in a generated header.
//!
//! This covers only the small slice of C++ the generator emits. Layout (indentation, blank lines,
//! separators) is decided entirely by the [`printer`].
mod printer;

pub use printer::Printer;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Header {
    pub items: Vec<Item>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Item {
    /// `#pragma once`
    PragmaOnce,
    /// `class Name;`
    ForwardDecl(String),
    Class(Class),
    /// An inline definition of a method declared in a class, following all classes.
    MethodDef(MethodDef),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Class {
    pub name: String,
    /// Publicly inherited base class, if any.
    pub base: Option<String>,
    /// All members are public.
    pub members: Vec<Member>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Member {
    Constructor(Constructor),
    /// `const <ty> <name>;`
    ConstField(Var),
    Method(Method),
}

/// A typed name, used both for parameters and fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Var {
    pub ty: String,
    pub name: String,
}

/// A constructor storing each parameter in the member of the same name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Constructor {
    pub params: Vec<Var>,
    pub init: Init,
}

/// How a constructor gets its parameters into the members.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Init {
    /// `this->name = name;` in the body.
    Assign,
    /// `: name(name), ...` before an empty body.
    InitializerList,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Virtual {
    /// `virtual ... = 0;`
    Pure,
    /// `virtual ... override;`
    Override,
}

/// A virtual method declaration inside a class body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Method {
    pub sig: Signature,
    pub virt: Virtual,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    pub ret: String,
    pub name: String,
    pub params: Vec<Var>,
    pub is_const: bool,
}

/// `inline <ret> <class>::<name>(<params>) [const] { <body> }`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodDef {
    pub class: String,
    pub sig: Signature,
    /// Statements, one per line, without trailing semicolons.
    pub body: Vec<String>,
}

impl Var {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Var {
            ty: ty.into(),
            name: name.into(),
        }
    }
}

impl Header {
    /// Render the header to text.
    pub fn render(&self) -> String {
        let mut printer = Printer::default();
        printer.header(self);
        printer.finish()
    }
}

#[cfg(test)]
impl Class {
    /// Iterate over the fields of this class, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &Var> {
        self.members.iter().filter_map(|m| match m {
            Member::ConstField(v) => Some(v),
            _ => None,
        })
    }
}

#[cfg(test)]
impl Header {
    /// Iterate over the classes declared in this header, in order.
    pub fn classes(&self) -> impl Iterator<Item = &Class> {
        self.items.iter().filter_map(|i| match i {
            Item::Class(c) => Some(c),
            _ => None,
        })
    }

    /// Find a class by name.
    pub fn class(&self, name: &str) -> Option<&Class> {
        self.classes().find(|c| c.name == name)
    }
}
