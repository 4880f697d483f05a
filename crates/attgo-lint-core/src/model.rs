//! Read-only semantic model of one Go package.
//!
//! The host (normally the tree-sitter front-end in `attgo-lint-go`) lowers
//! parsed source into these types once per analysis pass. Rules only ever see
//! the model through shared references.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// A source position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, in bytes).
    pub column: usize,
    /// Byte offset from the start of the file.
    pub offset: usize,
    /// Length of the node in bytes.
    pub length: usize,
}

impl Position {
    /// Creates a position with zero length.
    #[must_use]
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
            length: 0,
        }
    }

    /// Sets the node length.
    #[must_use]
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }
}

/// A named identifier with its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    /// Identifier text.
    pub name: String,
    /// Where the identifier appears.
    pub position: Position,
}

impl Ident {
    /// Creates an identifier.
    #[must_use]
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }

    /// Returns true for the blank identifier `_`.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.name == "_"
    }
}

/// One compilation unit: all files of a single Go package.
#[derive(Debug, Clone, Default)]
pub struct SourceUnit {
    /// Fully qualified package path (e.g. `github.com/acme/svc/internal/store`).
    pub package_path: String,
    /// Files in the package, in the order the host supplied them.
    pub files: Vec<SourceFile>,
    /// Host-resolved types of package-scope symbols, keyed by symbol name.
    ///
    /// Entries take precedence over syntactic inference in the resolver.
    pub resolved: BTreeMap<String, String>,
}

impl SourceUnit {
    /// Creates a unit for the given package path.
    #[must_use]
    pub fn new(package_path: impl Into<String>) -> Self {
        Self {
            package_path: package_path.into(),
            files: Vec::new(),
            resolved: BTreeMap::new(),
        }
    }

    /// Adds a file to the unit.
    #[must_use]
    pub fn with_file(mut self, file: SourceFile) -> Self {
        self.files.push(file);
        self
    }

    /// Records a host-resolved type for a package-scope symbol.
    #[must_use]
    pub fn with_resolved(mut self, symbol: impl Into<String>, ty: impl Into<String>) -> Self {
        self.resolved.insert(symbol.into(), ty.into());
        self
    }

    /// Name of the package, taken from the first file's package clause.
    #[must_use]
    pub fn package_name(&self) -> Option<&str> {
        self.files.first().map(|f| f.package.name.as_str())
    }
}

/// A single parsed source file.
#[derive(Debug, Clone, Default)]
pub struct SourceFile {
    /// Path as it should appear in diagnostics.
    pub path: PathBuf,
    /// The `package` clause (the file's primary declaration).
    pub package: Ident,
    /// Import specs.
    pub imports: Vec<Import>,
    /// Top-level type declarations.
    pub types: Vec<TypeDecl>,
    /// Top-level `const` declarations.
    pub consts: Vec<ConstGroup>,
    /// Variable specs, both package scope and function scope.
    pub vars: Vec<VarSpec>,
    /// Functions and methods.
    pub funcs: Vec<FuncDecl>,
    /// Comment groups in source order.
    pub comments: Vec<CommentGroup>,
    /// Every string literal in the file, in source order.
    pub strings: Vec<StringLit>,
}

impl Default for Ident {
    fn default() -> Self {
        Self::new("", Position::default())
    }
}

impl SourceFile {
    /// Creates an empty file with the given path and package name.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, package: Ident) -> Self {
        Self {
            path: path.into(),
            package,
            ..Self::default()
        }
    }

    /// Looks up the import path bound to a package qualifier in this file.
    #[must_use]
    pub fn import_path(&self, qualifier: &str) -> Option<&str> {
        self.imports
            .iter()
            .find(|i| i.binding() == qualifier)
            .map(|i| i.path.as_str())
    }

    /// Package-scope variable specs.
    pub fn package_vars(&self) -> impl Iterator<Item = &VarSpec> {
        self.vars.iter().filter(|v| v.scope == Scope::Package)
    }

    /// The first comment group that starts before the package clause.
    #[must_use]
    pub fn header_comment(&self) -> Option<&CommentGroup> {
        self.comments
            .iter()
            .find(|g| g.position.offset < self.package.position.offset)
    }
}

/// An import spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    /// Explicit alias, `.` or `_` when present.
    pub alias: Option<String>,
    /// Unquoted import path.
    pub path: String,
    /// Where the spec appears.
    pub position: Position,
}

impl Import {
    /// The name this import binds in the file scope.
    #[must_use]
    pub fn binding(&self) -> &str {
        match &self.alias {
            Some(alias) => alias,
            None => default_package_name(&self.path),
        }
    }
}

/// Default package name for an import path.
///
/// Uses the last path element, skipping a trailing `vN` major-version element
/// and stripping a `.vN` suffix (`gopkg.in/yaml.v3` → `yaml`).
#[must_use]
pub fn default_package_name(path: &str) -> &str {
    let mut elements = path.rsplit('/');
    let last = elements.next().unwrap_or(path);
    let name = if is_major_version(last) {
        elements.next().unwrap_or(last)
    } else {
        last
    };

    match name.rfind(".v") {
        Some(idx) if is_major_version(&name[idx + 1..]) => &name[..idx],
        _ => name,
    }
}

fn is_major_version(element: &str) -> bool {
    element
        .strip_prefix('v')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// A type expression as written in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// A named type, optionally package-qualified, with type arguments.
    Named {
        /// Package qualifier (`zerolog` in `zerolog.Logger`).
        package: Option<String>,
        /// Type name.
        name: String,
        /// Generic type arguments.
        args: Vec<TypeExpr>,
    },
    /// `*T`
    Pointer(Box<TypeExpr>),
    /// `[]T`
    Slice(Box<TypeExpr>),
    /// `[N]T`
    Array(String, Box<TypeExpr>),
    /// `map[K]V`
    Map(Box<TypeExpr>, Box<TypeExpr>),
    /// `chan T`, `<-chan T`, `chan<- T`
    Chan(ChanDir, Box<TypeExpr>),
    /// `func(...) ...`
    Func(Signature),
    /// `...T` in a parameter list.
    Variadic(Box<TypeExpr>),
    /// Anything else, kept as normalized source text.
    Literal(String),
}

impl TypeExpr {
    /// An unqualified named type.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            package: None,
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// A package-qualified named type.
    #[must_use]
    pub fn qualified(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Named {
            package: Some(package.into()),
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// A pointer to this type.
    #[must_use]
    pub fn pointer(self) -> Self {
        Self::Pointer(Box::new(self))
    }

    /// Returns the type name of a named type, looking through one pointer.
    #[must_use]
    pub fn base_name(&self) -> Option<&str> {
        match self {
            Self::Named { name, .. } => Some(name),
            Self::Pointer(inner) => match inner.as_ref() {
                Self::Named { name, .. } => Some(name),
                _ => None,
            },
            _ => None,
        }
    }

    /// Returns the name when this is an unqualified named type.
    #[must_use]
    pub fn local_name(&self) -> Option<&str> {
        match self {
            Self::Named {
                package: None,
                name,
                ..
            } => Some(name),
            _ => None,
        }
    }

    /// Returns true when this is the named type `package.name`.
    #[must_use]
    pub fn is_qualified(&self, pkg: &str, type_name: &str) -> bool {
        matches!(self, Self::Named { package: Some(p), name, .. } if p == pkg && name == type_name)
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named {
                package,
                name,
                args,
            } => {
                if let Some(package) = package {
                    write!(f, "{package}.")?;
                }
                write!(f, "{name}")?;
                if !args.is_empty() {
                    write!(f, "[{}]", join(args))?;
                }
                Ok(())
            }
            Self::Pointer(inner) => write!(f, "*{inner}"),
            Self::Slice(inner) => write!(f, "[]{inner}"),
            Self::Array(len, inner) => write!(f, "[{len}]{inner}"),
            Self::Map(key, value) => write!(f, "map[{key}]{value}"),
            Self::Chan(dir, inner) => write!(f, "{}{inner}", dir.keyword()),
            Self::Func(sig) => write!(f, "func{sig}"),
            Self::Variadic(inner) => write!(f, "...{inner}"),
            Self::Literal(text) => f.write_str(text),
        }
    }
}

fn join(types: &[TypeExpr]) -> String {
    types
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Channel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    /// `chan T`
    Both,
    /// `chan<- T`
    Send,
    /// `<-chan T`
    Recv,
}

impl ChanDir {
    /// Keyword prefix as written before the element type.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Both => "chan ",
            Self::Send => "chan<- ",
            Self::Recv => "<-chan ",
        }
    }
}

/// A parameter group: `a, b int` or `opts ...Option`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Names in the group; empty for unnamed parameters.
    pub names: Vec<Ident>,
    /// Parameter type. Variadic parameters carry [`TypeExpr::Variadic`].
    pub ty: TypeExpr,
}

impl Param {
    /// An unnamed parameter.
    #[must_use]
    pub fn unnamed(ty: TypeExpr) -> Self {
        Self {
            names: Vec::new(),
            ty,
        }
    }

    /// Number of parameters this group declares (unnamed counts as one).
    #[must_use]
    pub fn arity(&self) -> usize {
        self.names.len().max(1)
    }

    /// Returns true for a `...T` parameter.
    #[must_use]
    pub fn is_variadic(&self) -> bool {
        matches!(self.ty, TypeExpr::Variadic(_))
    }
}

/// Parameters and results of a function type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    /// Parameter groups in order.
    pub params: Vec<Param>,
    /// Result groups in order.
    pub results: Vec<Param>,
}

impl Signature {
    /// Parameter types with groups expanded, one entry per parameter.
    pub fn param_types(&self) -> impl Iterator<Item = &TypeExpr> {
        expand(&self.params)
    }

    /// Result types with groups expanded, one entry per result.
    pub fn result_types(&self) -> impl Iterator<Item = &TypeExpr> {
        expand(&self.results)
    }
}

fn expand(groups: &[Param]) -> impl Iterator<Item = &TypeExpr> {
    groups
        .iter()
        .flat_map(|p| std::iter::repeat(&p.ty).take(p.arity()))
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<TypeExpr> = self.param_types().cloned().collect();
        write!(f, "({})", join(&params))?;
        let results: Vec<TypeExpr> = self.result_types().cloned().collect();
        match results.len() {
            0 => Ok(()),
            1 => write!(f, " {}", results[0]),
            _ => write!(f, " ({})", join(&results)),
        }
    }
}

/// A top-level type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    /// Declared name.
    pub name: Ident,
    /// Whether the declaration has type parameters.
    pub generic: bool,
    /// Whether this is an alias (`type A = B`).
    pub alias: bool,
    /// The right-hand side.
    pub body: TypeBody,
}

/// Right-hand side of a type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeBody {
    /// `struct { ... }`
    Struct(Vec<StructField>),
    /// `interface { ... }`
    Interface(InterfaceBody),
    /// Any other type expression (`string`, `uint64`, `OtherType`, ...).
    Defined(TypeExpr),
}

/// A struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructField {
    /// Field name; `None` for embedded fields.
    pub name: Option<Ident>,
    /// Declared type. Embedded pointers are wrapped in [`TypeExpr::Pointer`].
    pub ty: TypeExpr,
    /// Zero-based position among the struct's fields.
    pub ordinal: usize,
    /// Where the field appears.
    pub position: Position,
}

impl StructField {
    /// Returns true for an embedded field.
    #[must_use]
    pub fn is_embedded(&self) -> bool {
        self.name.is_none()
    }
}

/// Members of an interface type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceBody {
    /// Explicitly declared methods.
    pub methods: Vec<MethodSig>,
    /// Embedded types. Unions and approximation elements are kept as
    /// [`TypeExpr::Literal`].
    pub embeds: Vec<TypeExpr>,
}

/// A method in an interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSig {
    /// Method name.
    pub name: Ident,
    /// Parameters and results.
    pub signature: Signature,
}

/// A function or method declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    /// Function name.
    pub name: Ident,
    /// Receiver, for methods.
    pub receiver: Option<Receiver>,
    /// Parameters and results.
    pub signature: Signature,
}

/// A method receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receiver {
    /// Receiver base type name.
    pub type_name: String,
    /// Whether the receiver is a pointer.
    pub pointer: bool,
}

/// A `const` declaration: one spec or a parenthesized block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstGroup {
    /// Where the declaration starts.
    pub position: Position,
    /// Specs in declaration order.
    pub specs: Vec<ConstSpec>,
}

/// A single constant spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstSpec {
    /// Declared names.
    pub names: Vec<Ident>,
    /// Explicit type, when present.
    pub ty: Option<TypeExpr>,
    /// Assigned values, one per name (empty for implicit repetition).
    pub values: Vec<ValueExpr>,
    /// Where the spec starts.
    pub position: Position,
}

/// Declaration scope of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Declared at package level.
    Package,
    /// Declared inside a function body.
    Function,
}

/// A `var` spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarSpec {
    /// Declared names.
    pub names: Vec<Ident>,
    /// Explicit type, when present.
    pub ty: Option<TypeExpr>,
    /// Initializers.
    pub values: Vec<ValueExpr>,
    /// Package or function scope.
    pub scope: Scope,
    /// Where the spec starts.
    pub position: Position,
}

/// The shape of an initializer expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueExpr {
    /// A string literal (interpreted or raw), as written.
    TextLiteral(String),
    /// An integer literal, as written.
    IntLiteral(String),
    /// `nil`
    Nil,
    /// `iota`
    Iota,
    /// Any other identifier.
    Ident(String),
    /// `T{...}`
    Composite(TypeExpr),
    /// `&x`
    AddressOf(Box<ValueExpr>),
    /// `(*T)(nil)`; holds the pointer type.
    NilCast(TypeExpr),
    /// A call; holds the callee as written.
    Call(String),
    /// Anything else.
    Other,
}

impl ValueExpr {
    /// Returns true for a string literal.
    #[must_use]
    pub fn is_text_literal(&self) -> bool {
        matches!(self, Self::TextLiteral(_))
    }
}

/// A group of adjacent comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentGroup {
    /// Where the group starts.
    pub position: Position,
    /// Comments in the group, each a `//` line or a `/* */` block.
    pub comments: Vec<Comment>,
}

impl CommentGroup {
    /// The first comment of the group.
    #[must_use]
    pub fn first(&self) -> Option<&Comment> {
        self.comments.first()
    }

    /// Comment text with markers removed, one line per comment.
    #[must_use]
    pub fn text(&self) -> String {
        self.comments
            .iter()
            .map(Comment::content)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A single comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Raw text including `//` or `/* */`.
    pub raw: String,
    /// Where the comment starts.
    pub position: Position,
}

impl Comment {
    /// Creates a comment.
    #[must_use]
    pub fn new(raw: impl Into<String>, position: Position) -> Self {
        Self {
            raw: raw.into(),
            position,
        }
    }

    /// Text without comment markers, trimmed.
    #[must_use]
    pub fn content(&self) -> &str {
        let text = self.raw.as_str();
        let text = text.strip_prefix("//").unwrap_or(text);
        let text = text.strip_prefix("/*").unwrap_or(text);
        let text = text.strip_suffix("*/").unwrap_or(text);
        text.trim()
    }
}

/// A string literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLit {
    /// Source text including quotes.
    pub raw: String,
    /// Where the literal appears.
    pub position: Position,
}

impl StringLit {
    /// Returns true for a back-quoted literal.
    #[must_use]
    pub fn is_raw(&self) -> bool {
        self.raw.starts_with('`')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_package_names() {
        assert_eq!(default_package_name("github.com/rs/zerolog"), "zerolog");
        assert_eq!(default_package_name("log/slog"), "slog");
        assert_eq!(default_package_name("github.com/go-chi/chi/v5"), "chi");
        assert_eq!(default_package_name("gopkg.in/yaml.v3"), "yaml");
        assert_eq!(default_package_name("context"), "context");
    }

    #[test]
    fn import_binding_prefers_alias() {
        let import = Import {
            alias: Some("zl".into()),
            path: "github.com/rs/zerolog".into(),
            position: Position::default(),
        };
        assert_eq!(import.binding(), "zl");
    }

    #[test]
    fn type_expr_display() {
        let ty = TypeExpr::Map(
            Box::new(TypeExpr::named("string")),
            Box::new(TypeExpr::Slice(Box::new(
                TypeExpr::qualified("zap", "Logger").pointer(),
            ))),
        );
        assert_eq!(ty.to_string(), "map[string][]*zap.Logger");

        let chan = TypeExpr::Chan(ChanDir::Recv, Box::new(TypeExpr::Literal("struct{}".into())));
        assert_eq!(chan.to_string(), "<-chan struct{}");
    }

    #[test]
    fn signature_display_expands_groups() {
        let sig = Signature {
            params: vec![Param {
                names: vec![
                    Ident::new("a", Position::default()),
                    Ident::new("b", Position::default()),
                ],
                ty: TypeExpr::named("int"),
            }],
            results: vec![
                Param::unnamed(TypeExpr::named("int")),
                Param::unnamed(TypeExpr::named("error")),
            ],
        };
        assert_eq!(sig.to_string(), "(int, int) (int, error)");
    }

    #[test]
    fn comment_content_strips_markers() {
        let line = Comment::new("// hello there", Position::default());
        assert_eq!(line.content(), "hello there");

        let block = Comment::new("/* block */", Position::default());
        assert_eq!(block.content(), "block");
    }

    #[test]
    fn header_comment_precedes_package_clause() {
        let mut file = SourceFile::new("a.go", Ident::new("a", Position::new(3, 9, 40)));
        file.comments.push(CommentGroup {
            position: Position::new(1, 1, 0),
            comments: vec![Comment::new("// Copyright 2024", Position::new(1, 1, 0))],
        });
        file.comments.push(CommentGroup {
            position: Position::new(5, 1, 60),
            comments: vec![Comment::new("// later", Position::new(5, 1, 60))],
        });

        let header = file.header_comment().map(CommentGroup::text);
        assert_eq!(header.as_deref(), Some("Copyright 2024"));
    }
}
