//! Type resolution over the declaration index.
//!
//! [`TypeResolver`] is the narrow query surface rules use for type facts.
//! [`UnitResolver`] answers those queries from the syntax of one unit plus any
//! host-supplied resolved types recorded on the [`SourceUnit`].

use crate::index::DeclarationIndex;
use crate::model::{
    ConstGroup, InterfaceBody, Scope, Signature, SourceFile, SourceUnit, TypeBody, TypeExpr,
    ValueExpr, VarSpec,
};
use std::collections::HashSet;

const TEXT_TYPES: &[&str] = &["string"];

const INTEGER_TYPES: &[&str] = &[
    "int", "int8", "int16", "int32", "int64", "uint", "uint8", "uint16", "uint32", "uint64",
    "uintptr", "byte", "rune",
];

const BUILTIN_TYPES: &[&str] = &[
    "bool",
    "string",
    "int",
    "int8",
    "int16",
    "int32",
    "int64",
    "uint",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "uintptr",
    "byte",
    "rune",
    "float32",
    "float64",
    "complex64",
    "complex128",
    "error",
    "any",
    "comparable",
];

/// Bound on defined-type and variable chains followed during resolution.
const MAX_DEPTH: usize = 32;

/// Underlying representation of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Underlying {
    /// `string`
    Text,
    /// Any integer kind.
    Integer,
    /// A struct.
    Struct,
    /// An interface.
    Interface,
    /// Anything else (floats, bools, slices, maps, funcs, ...).
    Other,
}

/// A method with its canonical signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedMethod {
    /// Method name.
    pub name: String,
    /// Canonical signature, e.g. `(context.Context, string) (*example.com/svc.User, error)`.
    pub signature: String,
}

/// Type facts about the declarations in one unit.
pub trait TypeResolver: Send + Sync {
    /// Fully qualified form of `ty` as written in `file`.
    fn qualify(&self, file: &SourceFile, ty: &TypeExpr) -> String;

    /// Resolved type of the `index`-th name of a variable spec.
    fn var_type(&self, file: &SourceFile, spec: &VarSpec, index: usize) -> Option<String>;

    /// Declared type of the `spec`-th constant spec of a group, following
    /// implicit repetition.
    fn const_type<'g>(&self, group: &'g ConstGroup, spec: usize) -> Option<&'g TypeExpr>;

    /// Underlying representation of a unit-local or builtin type.
    fn underlying(&self, name: &str) -> Option<Underlying>;

    /// Method set of the named type, or of a pointer to it when `indirect`.
    fn method_set(&self, name: &str, indirect: bool) -> Vec<ResolvedMethod>;

    /// Required methods of a unit-local interface.
    ///
    /// Returns `None` when the interface cannot be fully resolved.
    fn interface_methods(&self, name: &str) -> Option<Vec<ResolvedMethod>>;

    /// Whether the (possibly indirect) named type structurally satisfies the
    /// interface.
    fn satisfies(&self, name: &str, indirect: bool, interface: &str) -> bool {
        let Some(required) = self.interface_methods(interface) else {
            return false;
        };
        let available = self.method_set(name, indirect);
        required.iter().all(|method| available.contains(method))
    }
}

/// Default resolver built from a unit and its declaration index.
#[derive(Debug)]
pub struct UnitResolver<'a> {
    unit: &'a SourceUnit,
    index: &'a DeclarationIndex<'a>,
}

impl<'a> UnitResolver<'a> {
    /// Creates a resolver over `unit`.
    #[must_use]
    pub fn new(unit: &'a SourceUnit, index: &'a DeclarationIndex<'a>) -> Self {
        Self { unit, index }
    }

    fn qualify_list(&self, file: &SourceFile, types: &[TypeExpr]) -> String {
        types
            .iter()
            .map(|t| self.qualify(file, t))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn canonical_signature(&self, file: &SourceFile, sig: &Signature) -> String {
        let params: Vec<TypeExpr> = sig.param_types().cloned().collect();
        let results: Vec<TypeExpr> = sig.result_types().cloned().collect();
        let params = self.qualify_list(file, &params);
        match results.len() {
            0 => format!("({params})"),
            1 => format!("({params}) {}", self.qualify(file, &results[0])),
            _ => format!("({params}) ({})", self.qualify_list(file, &results)),
        }
    }

    fn value_type(
        &self,
        file: &SourceFile,
        value: &ValueExpr,
        result: usize,
        depth: usize,
    ) -> Option<String> {
        if depth > MAX_DEPTH {
            return None;
        }
        match value {
            ValueExpr::TextLiteral(_) if result == 0 => Some("string".to_string()),
            ValueExpr::IntLiteral(_) if result == 0 => Some("int".to_string()),
            ValueExpr::Composite(ty) | ValueExpr::NilCast(ty) if result == 0 => {
                Some(self.qualify(file, ty))
            }
            ValueExpr::AddressOf(inner) if result == 0 => match inner.as_ref() {
                ValueExpr::Composite(ty) => Some(format!("*{}", self.qualify(file, ty))),
                _ => None,
            },
            ValueExpr::Call(callee) => {
                let func = self.index.function(callee)?;
                let ty = func.decl.signature.result_types().nth(result)?;
                Some(self.qualify(func.file, ty))
            }
            ValueExpr::Ident(name) if result == 0 => self.package_var_type(name, depth + 1),
            _ => None,
        }
    }

    fn package_var_type(&self, name: &str, depth: usize) -> Option<String> {
        if let Some(ty) = self.unit.resolved.get(name) {
            return Some(ty.clone());
        }
        self.unit.files.iter().find_map(|file| {
            file.package_vars().find_map(|spec| {
                let i = spec.names.iter().position(|n| n.name == name)?;
                self.spec_type(file, spec, i, depth)
            })
        })
    }

    fn spec_type(
        &self,
        file: &SourceFile,
        spec: &VarSpec,
        index: usize,
        depth: usize,
    ) -> Option<String> {
        if let Some(ty) = &spec.ty {
            return Some(self.qualify(file, ty));
        }
        if spec.values.len() == spec.names.len() {
            self.value_type(file, spec.values.get(index)?, 0, depth)
        } else if spec.values.len() == 1 {
            self.value_type(file, &spec.values[0], index, depth)
        } else {
            None
        }
    }

    fn underlying_of(&self, name: &str, depth: usize) -> Option<Underlying> {
        if depth > MAX_DEPTH {
            return None;
        }
        if let Some(entry) = self.index.type_decl(name) {
            return match &entry.decl.body {
                TypeBody::Struct(_) => Some(Underlying::Struct),
                TypeBody::Interface(_) => Some(Underlying::Interface),
                TypeBody::Defined(TypeExpr::Named {
                    package: None,
                    name: next,
                    ..
                }) => self.underlying_of(next, depth + 1),
                TypeBody::Defined(TypeExpr::Named { .. }) => None,
                TypeBody::Defined(_) => Some(Underlying::Other),
            };
        }
        if TEXT_TYPES.contains(&name) {
            Some(Underlying::Text)
        } else if INTEGER_TYPES.contains(&name) {
            Some(Underlying::Integer)
        } else if name == "error" || name == "any" {
            Some(Underlying::Interface)
        } else if BUILTIN_TYPES.contains(&name) {
            Some(Underlying::Other)
        } else {
            None
        }
    }

    fn collect_methods<'s>(
        &self,
        name: &'s str,
        indirect: bool,
        visited: &mut HashSet<(&'s str, bool)>,
        out: &mut Vec<ResolvedMethod>,
    ) where
        'a: 's,
    {
        if !visited.insert((name, indirect)) {
            return;
        }

        let Some(entry) = self.index.type_decl(name) else {
            return;
        };

        if let TypeBody::Interface(_) = entry.decl.body {
            if !indirect {
                if let Some(methods) = self.interface_methods(name) {
                    push_unique(out, methods);
                }
            }
            return;
        }

        let declared = self
            .index
            .methods_of(name)
            .iter()
            .filter(|m| indirect || m.decl.receiver.as_ref().is_some_and(|r| !r.pointer))
            .map(|m| ResolvedMethod {
                name: m.decl.name.name.clone(),
                signature: self.canonical_signature(m.file, &m.decl.signature),
            });
        push_unique(out, declared.collect());

        let TypeBody::Struct(fields) = &entry.decl.body else {
            return;
        };
        for field in fields.iter().filter(|f| f.is_embedded()) {
            let (embedded, pointer) = match &field.ty {
                TypeExpr::Pointer(inner) => (inner.local_name(), true),
                other => (other.local_name(), false),
            };
            let Some(embedded) = embedded else {
                continue;
            };
            if !pointer && self.underlying_of(embedded, 0) == Some(Underlying::Interface) {
                // Interface methods promote to both S and *S.
                if let Some(methods) = self.interface_methods(embedded) {
                    push_unique(out, methods);
                }
                continue;
            }
            let mut promoted = Vec::new();
            self.collect_methods(embedded, indirect || pointer, visited, &mut promoted);
            push_unique(out, promoted);
        }
    }

    fn interface_methods_of<'s>(
        &self,
        name: &'s str,
        visited: &mut HashSet<&'s str>,
    ) -> Option<Vec<ResolvedMethod>>
    where
        'a: 's,
    {
        if !visited.insert(name) {
            return Some(Vec::new());
        }
        let entry = self.index.type_decl(name)?;
        let TypeBody::Interface(InterfaceBody { methods, embeds }) = &entry.decl.body else {
            return None;
        };

        let mut out: Vec<ResolvedMethod> = methods
            .iter()
            .map(|m| ResolvedMethod {
                name: m.name.name.clone(),
                signature: self.canonical_signature(entry.file, &m.signature),
            })
            .collect();

        for embed in embeds {
            match embed {
                TypeExpr::Named {
                    package: None,
                    name: embedded,
                    args,
                } if args.is_empty() && embedded == "error" => push_unique(
                    &mut out,
                    vec![ResolvedMethod {
                        name: "Error".to_string(),
                        signature: "() string".to_string(),
                    }],
                ),
                TypeExpr::Named {
                    package: None,
                    name: embedded,
                    args,
                } if args.is_empty() => {
                    let inherited = self.interface_methods_of(embedded, visited)?;
                    push_unique(&mut out, inherited);
                }
                _ => return None,
            }
        }
        Some(out)
    }
}

/// Canonical spelling of a predeclared alias.
fn builtin_alias(name: &str) -> &str {
    match name {
        "byte" => "uint8",
        "rune" => "int32",
        other => other,
    }
}

fn push_unique(out: &mut Vec<ResolvedMethod>, methods: Vec<ResolvedMethod>) {
    for method in methods {
        if !out.iter().any(|m| m.name == method.name) {
            out.push(method);
        }
    }
}

impl TypeResolver for UnitResolver<'_> {
    fn qualify(&self, file: &SourceFile, ty: &TypeExpr) -> String {
        match ty {
            TypeExpr::Named {
                package,
                name,
                args,
            } => {
                let base = match package {
                    Some(qualifier) => {
                        let path = file.import_path(qualifier).unwrap_or(qualifier);
                        format!("{path}.{name}")
                    }
                    None if self.index.type_decl(name).is_some() => {
                        format!("{}.{name}", self.unit.package_path)
                    }
                    None => builtin_alias(name).to_string(),
                };
                if args.is_empty() {
                    base
                } else {
                    format!("{base}[{}]", self.qualify_list(file, args))
                }
            }
            TypeExpr::Pointer(inner) => format!("*{}", self.qualify(file, inner)),
            TypeExpr::Slice(inner) => format!("[]{}", self.qualify(file, inner)),
            TypeExpr::Array(len, inner) => format!("[{len}]{}", self.qualify(file, inner)),
            TypeExpr::Map(key, value) => format!(
                "map[{}]{}",
                self.qualify(file, key),
                self.qualify(file, value)
            ),
            TypeExpr::Chan(dir, inner) => format!("{}{}", dir.keyword(), self.qualify(file, inner)),
            TypeExpr::Func(sig) => format!("func{}", self.canonical_signature(file, sig)),
            TypeExpr::Variadic(inner) => format!("...{}", self.qualify(file, inner)),
            TypeExpr::Literal(text) => {
                if text.split_whitespace().collect::<String>() == "interface{}" {
                    "any".to_string()
                } else {
                    text.clone()
                }
            }
        }
    }

    fn var_type(&self, file: &SourceFile, spec: &VarSpec, index: usize) -> Option<String> {
        if spec.scope == Scope::Package {
            if let Some(ty) = spec
                .names
                .get(index)
                .and_then(|n| self.unit.resolved.get(&n.name))
            {
                return Some(ty.clone());
            }
        }
        self.spec_type(file, spec, index, 0)
    }

    fn const_type<'g>(&self, group: &'g ConstGroup, spec: usize) -> Option<&'g TypeExpr> {
        group
            .specs
            .get(..=spec)?
            .iter()
            .rev()
            .find(|s| s.ty.is_some() || !s.values.is_empty())
            .and_then(|s| s.ty.as_ref())
    }

    fn underlying(&self, name: &str) -> Option<Underlying> {
        self.underlying_of(name, 0)
    }

    fn method_set(&self, name: &str, indirect: bool) -> Vec<ResolvedMethod> {
        let mut visited = HashSet::new();
        let mut out = Vec::new();
        self.collect_methods(name, indirect, &mut visited, &mut out);
        out
    }

    fn interface_methods(&self, name: &str) -> Option<Vec<ResolvedMethod>> {
        let mut visited = HashSet::new();
        self.interface_methods_of(name, &mut visited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        ConstSpec, FuncDecl, Ident, Import, MethodSig, Param, Position, Receiver, StructField,
        TypeDecl,
    };

    fn id(name: &str) -> Ident {
        Ident::new(name, Position::new(1, 1, 0))
    }

    fn type_decl(name: &str, body: TypeBody) -> TypeDecl {
        TypeDecl {
            name: id(name),
            generic: false,
            alias: false,
            body,
        }
    }

    fn sig(params: Vec<TypeExpr>, results: Vec<TypeExpr>) -> Signature {
        Signature {
            params: params.into_iter().map(Param::unnamed).collect(),
            results: results.into_iter().map(Param::unnamed).collect(),
        }
    }

    fn method(recv: &str, pointer: bool, name: &str, signature: Signature) -> FuncDecl {
        FuncDecl {
            name: id(name),
            receiver: Some(Receiver {
                type_name: recv.into(),
                pointer,
            }),
            signature,
        }
    }

    fn field(ty: TypeExpr, ordinal: usize) -> StructField {
        StructField {
            name: None,
            ty,
            ordinal,
            position: Position::default(),
        }
    }

    fn var(names: &[&str], ty: Option<TypeExpr>, values: Vec<ValueExpr>) -> VarSpec {
        VarSpec {
            names: names.iter().map(|n| id(n)).collect(),
            ty,
            values,
            scope: Scope::Package,
            position: Position::default(),
        }
    }

    fn sample_unit() -> SourceUnit {
        let mut file = SourceFile::new("store.go", id("store"));
        file.imports.push(Import {
            alias: None,
            path: "github.com/rs/zerolog".into(),
            position: Position::default(),
        });
        file.imports.push(Import {
            alias: None,
            path: "context".into(),
            position: Position::default(),
        });

        let ctx = TypeExpr::qualified("context", "Context");
        file.types.push(type_decl(
            "Getter",
            TypeBody::Interface(InterfaceBody {
                methods: vec![MethodSig {
                    name: id("Get"),
                    signature: sig(
                        vec![ctx.clone(), TypeExpr::named("string")],
                        vec![TypeExpr::named("Item"), TypeExpr::named("error")],
                    ),
                }],
                embeds: Vec::new(),
            }),
        ));
        file.types.push(type_decl(
            "Store",
            TypeBody::Interface(InterfaceBody {
                methods: vec![MethodSig {
                    name: id("Close"),
                    signature: sig(vec![], vec![TypeExpr::named("error")]),
                }],
                embeds: vec![TypeExpr::named("Getter")],
            }),
        ));
        file.types.push(type_decl("Item", TypeBody::Struct(Vec::new())));
        file.types.push(type_decl("base", TypeBody::Struct(Vec::new())));
        file.types.push(type_decl(
            "memStore",
            TypeBody::Struct(vec![field(TypeExpr::named("base").pointer(), 0)]),
        ));
        file.types.push(type_decl(
            "Kind",
            TypeBody::Defined(TypeExpr::named("string")),
        ));
        file.types.push(type_decl("SubKind", TypeBody::Defined(TypeExpr::named("Kind"))));
        file.types.push(type_decl("Level", TypeBody::Defined(TypeExpr::named("uint64"))));

        file.funcs.push(method(
            "memStore",
            true,
            "Get",
            sig(
                vec![ctx, TypeExpr::named("string")],
                vec![TypeExpr::named("Item"), TypeExpr::named("error")],
            ),
        ));
        file.funcs.push(method(
            "base",
            false,
            "Close",
            sig(vec![], vec![TypeExpr::named("error")]),
        ));
        file.funcs.push(FuncDecl {
            name: id("newLogger"),
            receiver: None,
            signature: sig(vec![], vec![TypeExpr::qualified("zerolog", "Logger").pointer()]),
        });

        SourceUnit::new("example.com/store").with_file(file)
    }

    #[test]
    fn qualifies_through_imports_and_package_path() {
        let unit = sample_unit();
        let index = DeclarationIndex::build(&unit);
        let resolver = UnitResolver::new(&unit, &index);
        let file = &unit.files[0];

        let ty = TypeExpr::qualified("zerolog", "Logger").pointer();
        assert_eq!(resolver.qualify(file, &ty), "*github.com/rs/zerolog.Logger");
        assert_eq!(
            resolver.qualify(file, &TypeExpr::Slice(Box::new(TypeExpr::named("Item")))),
            "[]example.com/store.Item"
        );
        assert_eq!(resolver.qualify(file, &TypeExpr::named("int")), "int");
    }

    #[test]
    fn infers_var_types() {
        let unit = sample_unit();
        let index = DeclarationIndex::build(&unit);
        let resolver = UnitResolver::new(&unit, &index);
        let file = &unit.files[0];

        let call = var(&["log"], None, vec![ValueExpr::Call("newLogger".into())]);
        assert_eq!(
            resolver.var_type(file, &call, 0).as_deref(),
            Some("*github.com/rs/zerolog.Logger")
        );

        let addr = var(
            &["l"],
            None,
            vec![ValueExpr::AddressOf(Box::new(ValueExpr::Composite(
                TypeExpr::qualified("zerolog", "Logger"),
            )))],
        );
        assert_eq!(
            resolver.var_type(file, &addr, 0).as_deref(),
            Some("*github.com/rs/zerolog.Logger")
        );

        let pair = var(
            &["a", "b"],
            None,
            vec![ValueExpr::TextLiteral("\"x\"".into()), ValueExpr::IntLiteral("1".into())],
        );
        assert_eq!(resolver.var_type(file, &pair, 1).as_deref(), Some("int"));

        let unknown = var(&["x"], None, vec![ValueExpr::Other]);
        assert_eq!(resolver.var_type(file, &unknown, 0), None);
    }

    #[test]
    fn host_resolved_type_takes_precedence() {
        let unit = sample_unit().with_resolved("log", "*go.uber.org/zap.Logger");
        let index = DeclarationIndex::build(&unit);
        let resolver = UnitResolver::new(&unit, &index);

        let spec = var(&["log"], None, vec![ValueExpr::Call("zap.Must".into())]);
        assert_eq!(
            resolver.var_type(&unit.files[0], &spec, 0).as_deref(),
            Some("*go.uber.org/zap.Logger")
        );
    }

    #[test]
    fn underlying_follows_defined_chains() {
        let unit = sample_unit();
        let index = DeclarationIndex::build(&unit);
        let resolver = UnitResolver::new(&unit, &index);

        assert_eq!(resolver.underlying("SubKind"), Some(Underlying::Text));
        assert_eq!(resolver.underlying("Level"), Some(Underlying::Integer));
        assert_eq!(resolver.underlying("Item"), Some(Underlying::Struct));
        assert_eq!(resolver.underlying("Store"), Some(Underlying::Interface));
        assert_eq!(resolver.underlying("Unknown"), None);
    }

    #[test]
    fn underlying_survives_cycles() {
        let mut file = SourceFile::new("a.go", id("a"));
        file.types.push(type_decl("A", TypeBody::Defined(TypeExpr::named("B"))));
        file.types.push(type_decl("B", TypeBody::Defined(TypeExpr::named("A"))));
        let unit = SourceUnit::new("a").with_file(file);
        let index = DeclarationIndex::build(&unit);
        let resolver = UnitResolver::new(&unit, &index);

        assert_eq!(resolver.underlying("A"), None);
    }

    #[test]
    fn const_type_follows_implicit_repetition() {
        let spec = |ty: Option<TypeExpr>, values: Vec<ValueExpr>| ConstSpec {
            names: vec![id("c")],
            ty,
            values,
            position: Position::default(),
        };
        let group = ConstGroup {
            position: Position::default(),
            specs: vec![
                spec(Some(TypeExpr::named("Level")), vec![ValueExpr::Iota]),
                spec(None, Vec::new()),
                spec(None, vec![ValueExpr::IntLiteral("7".into())]),
            ],
        };
        let unit = SourceUnit::new("a");
        let index = DeclarationIndex::build(&unit);
        let resolver = UnitResolver::new(&unit, &index);

        assert_eq!(
            resolver.const_type(&group, 1),
            Some(&TypeExpr::named("Level"))
        );
        assert_eq!(resolver.const_type(&group, 2), None);
        assert_eq!(resolver.const_type(&group, 9), None);
    }

    #[test]
    fn method_sets_respect_receivers_and_promotion() {
        let unit = sample_unit();
        let index = DeclarationIndex::build(&unit);
        let resolver = UnitResolver::new(&unit, &index);

        let names = |indirect| {
            let mut names: Vec<_> = resolver
                .method_set("memStore", indirect)
                .into_iter()
                .map(|m| m.name)
                .collect();
            names.sort();
            names
        };
        assert_eq!(names(false), vec!["Close"]);
        assert_eq!(names(true), vec!["Close", "Get"]);
    }

    #[test]
    fn satisfies_embedded_interface() {
        let unit = sample_unit();
        let index = DeclarationIndex::build(&unit);
        let resolver = UnitResolver::new(&unit, &index);

        let required = resolver.interface_methods("Store").map(|m| m.len());
        assert_eq!(required, Some(2));
        assert!(resolver.satisfies("memStore", true, "Store"));
        assert!(!resolver.satisfies("memStore", false, "Store"));
        assert!(!resolver.satisfies("Item", true, "Getter"));
    }

    #[test]
    fn embedded_interface_promotes_to_value_and_pointer() {
        let mut unit = sample_unit();
        let file = &mut unit.files[0];
        file.types.push(type_decl(
            "cached",
            TypeBody::Struct(vec![field(TypeExpr::named("Getter"), 0)]),
        ));
        file.types.push(type_decl(
            "wrapper",
            TypeBody::Struct(vec![field(TypeExpr::named("Getter"), 0)]),
        ));
        file.funcs.push(method(
            "cached",
            true,
            "Close",
            sig(vec![], vec![TypeExpr::named("error")]),
        ));
        let index = DeclarationIndex::build(&unit);
        let resolver = UnitResolver::new(&unit, &index);

        assert!(resolver.satisfies("cached", false, "Getter"));
        assert!(resolver.satisfies("cached", true, "Store"));
        assert!(!resolver.satisfies("cached", false, "Store"));
        assert_eq!(resolver.method_set("wrapper", true).len(), 1);
        assert!(resolver.satisfies("wrapper", true, "Getter"));
    }

    #[test]
    fn predeclared_aliases_compare_equal() {
        let unit = sample_unit();
        let index = DeclarationIndex::build(&unit);
        let resolver = UnitResolver::new(&unit, &index);
        let file = &unit.files[0];

        let q = |ty: TypeExpr| resolver.qualify(file, &ty);
        assert_eq!(
            q(TypeExpr::Slice(Box::new(TypeExpr::named("byte")))),
            q(TypeExpr::Slice(Box::new(TypeExpr::named("uint8"))))
        );
        assert_eq!(q(TypeExpr::named("rune")), "int32");
        assert_eq!(q(TypeExpr::Literal("interface{ }".into())), q(TypeExpr::named("any")));
    }

    #[test]
    fn unresolvable_embed_yields_none() {
        let mut file = SourceFile::new("a.go", id("a"));
        file.types.push(type_decl(
            "ReadCloser",
            TypeBody::Interface(InterfaceBody {
                methods: Vec::new(),
                embeds: vec![TypeExpr::qualified("io", "Reader")],
            }),
        ));
        let unit = SourceUnit::new("a").with_file(file);
        let index = DeclarationIndex::build(&unit);
        let resolver = UnitResolver::new(&unit, &index);

        assert_eq!(resolver.interface_methods("ReadCloser"), None);
    }
}
