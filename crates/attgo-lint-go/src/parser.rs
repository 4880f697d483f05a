//! Go source lowering using Tree-sitter.
//!
//! Walks the concrete syntax tree of one file and builds the read-only
//! [`SourceFile`] model: declarations at package scope, function-local `var`
//! declarations, comment groups and every string literal.

use std::path::Path;

use attgo_lint_core::model::{
    ChanDir, Comment, CommentGroup, ConstGroup, ConstSpec, FuncDecl, Ident, Import,
    InterfaceBody, MethodSig, Param, Position, Receiver, Scope, Signature, SourceFile,
    StringLit, StructField, TypeBody, TypeDecl, TypeExpr, ValueExpr, VarSpec,
};
use tracing::{debug, warn};
use tree_sitter::{Language, Node, Parser};

use crate::ParseError;

/// Parses Go source files into the core model.
pub struct GoParser {
    language: Language,
}

impl Default for GoParser {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GoParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoParser").finish_non_exhaustive()
    }
}

impl GoParser {
    /// Creates a new Go parser.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_go::LANGUAGE.into(),
        }
    }

    /// Parses one file.
    ///
    /// Syntax errors are tolerated: whatever Tree-sitter recovered is lowered.
    ///
    /// # Errors
    ///
    /// Fails when the grammar cannot be loaded, no tree is produced, or the
    /// file has no package clause.
    pub fn parse_file(&self, path: &Path, source: &str) -> Result<SourceFile, ParseError> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ParseError::NoTree(path.to_path_buf()))?;
        let root = tree.root_node();
        if root.has_error() {
            warn!(file = %path.display(), "syntax errors; analysing recovered tree");
        }

        let lowering = Lowering {
            src: source.as_bytes(),
        };
        let file = lowering.file(path, root)?;
        debug!(
            file = %path.display(),
            types = file.types.len(),
            funcs = file.funcs.len(),
            "parsed"
        );
        Ok(file)
    }
}

struct Lowering<'s> {
    src: &'s [u8],
}

impl<'s> Lowering<'s> {
    fn text(&self, node: Node<'_>) -> &'s str {
        std::str::from_utf8(&self.src[node.start_byte()..node.end_byte()]).unwrap_or("")
    }

    fn position(node: Node<'_>) -> Position {
        let start = node.start_position();
        Position::new(start.row + 1, start.column + 1, node.start_byte())
            .with_length(node.end_byte() - node.start_byte())
    }

    fn ident(&self, node: Node<'_>) -> Ident {
        Ident::new(self.text(node), Self::position(node))
    }

    fn file(&self, path: &Path, root: Node<'_>) -> Result<SourceFile, ParseError> {
        let package = children(root)
            .into_iter()
            .find(|n| n.kind() == "package_clause")
            .and_then(|clause| {
                children(clause)
                    .into_iter()
                    .find(|n| n.kind() == "package_identifier")
            })
            .ok_or_else(|| ParseError::MissingPackage(path.to_path_buf()))?;

        let mut file = SourceFile::new(path, self.ident(package));

        for node in children(root) {
            match node.kind() {
                "import_declaration" => self.imports(node, &mut file.imports),
                "type_declaration" => self.type_decls(node, &mut file.types),
                "const_declaration" => file.consts.push(self.const_group(node)),
                "var_declaration" => self.var_specs(node, Scope::Package, &mut file.vars),
                "function_declaration" | "method_declaration" => {
                    if let Some(func) = self.func_decl(node) {
                        file.funcs.push(func);
                    }
                }
                _ => {}
            }
        }

        let mut comments = Vec::new();
        self.walk(root, &mut file, &mut comments);
        file.comments = self.group_comments(comments);
        Ok(file)
    }

    /// Collects comments, string literals and function-local vars.
    fn walk(&self, root: Node<'_>, file: &mut SourceFile, comments: &mut Vec<Comment>) {
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            match node.kind() {
                "comment" => {
                    comments.push(Comment::new(self.text(node), Self::position(node)));
                    continue;
                }
                "interpreted_string_literal" | "raw_string_literal" => {
                    file.strings.push(StringLit {
                        raw: self.text(node).to_string(),
                        position: Self::position(node),
                    });
                    continue;
                }
                "var_declaration"
                    if node.parent().is_some_and(|p| p.kind() != "source_file") =>
                {
                    self.var_specs(node, Scope::Function, &mut file.vars);
                }
                _ => {}
            }
            let mut cursor = node.walk();
            let kids: Vec<Node<'_>> = node.children(&mut cursor).collect();
            stack.extend(kids.into_iter().rev());
        }
        file.strings.sort_by_key(|s| s.position.offset);
        file.vars.sort_by_key(|v| v.position.offset);
    }

    /// Groups adjacent comments: nothing but whitespace between them and at
    /// most one line break. A group opened by a comment that trails code
    /// ends with that line.
    fn group_comments(&self, mut comments: Vec<Comment>) -> Vec<CommentGroup> {
        comments.sort_by_key(|c| c.position.offset);

        let mut groups: Vec<CommentGroup> = Vec::new();
        for comment in comments {
            if let Some(group) = groups.last_mut() {
                let max_breaks = match group.comments.first() {
                    Some(first) if self.trails_code(first) => 0,
                    _ => 1,
                };
                if let Some(prev) = group.comments.last() {
                    let gap_start = prev.position.offset + prev.position.length;
                    let gap = self
                        .src
                        .get(gap_start..comment.position.offset)
                        .unwrap_or_default();
                    let adjacent = gap.iter().all(u8::is_ascii_whitespace)
                        && gap.iter().filter(|&&b| b == b'\n').count() <= max_breaks;
                    if adjacent {
                        group.comments.push(comment);
                        continue;
                    }
                }
            }
            groups.push(CommentGroup {
                position: comment.position,
                comments: vec![comment],
            });
        }
        groups
    }

    /// Whether code precedes `comment` on its line.
    fn trails_code(&self, comment: &Comment) -> bool {
        let end = comment.position.offset;
        let start = self.src[..end]
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        !self.src[start..end].iter().all(u8::is_ascii_whitespace)
    }

    fn imports(&self, decl: Node<'_>, out: &mut Vec<Import>) {
        for spec in descendants_of_kind(decl, "import_spec") {
            let Some(path) = spec.child_by_field_name("path") else {
                continue;
            };
            let alias = spec
                .child_by_field_name("name")
                .map(|n| self.text(n).to_string());
            out.push(Import {
                alias,
                path: unquote(self.text(path)).to_string(),
                position: Self::position(spec),
            });
        }
    }

    fn type_decls(&self, decl: Node<'_>, out: &mut Vec<TypeDecl>) {
        for spec in children(decl) {
            let alias = match spec.kind() {
                "type_spec" => false,
                "type_alias" => true,
                _ => continue,
            };
            let (Some(name), Some(ty)) = (
                spec.child_by_field_name("name"),
                spec.child_by_field_name("type"),
            ) else {
                continue;
            };

            let body = match ty.kind() {
                "struct_type" if !alias => TypeBody::Struct(self.struct_fields(ty)),
                "interface_type" if !alias => TypeBody::Interface(self.interface_body(ty)),
                _ => TypeBody::Defined(self.type_expr(ty)),
            };
            out.push(TypeDecl {
                name: self.ident(name),
                generic: spec.child_by_field_name("type_parameters").is_some(),
                alias,
                body,
            });
        }
    }

    fn struct_fields(&self, node: Node<'_>) -> Vec<StructField> {
        let mut fields = Vec::new();
        for decl in descendants_of_kind(node, "field_declaration") {
            if enclosing_struct(decl) != Some(node.id()) {
                continue;
            }
            let Some(ty) = decl.child_by_field_name("type") else {
                continue;
            };
            let mut lowered = self.type_expr(ty);
            let names = field_children(decl, "name");

            if names.is_empty() {
                if has_token(decl, "*") {
                    lowered = lowered.pointer();
                }
                fields.push(StructField {
                    name: None,
                    ty: lowered,
                    ordinal: fields.len(),
                    position: Self::position(decl),
                });
                continue;
            }
            for name in names {
                fields.push(StructField {
                    name: Some(self.ident(name)),
                    ty: lowered.clone(),
                    ordinal: fields.len(),
                    position: Self::position(name),
                });
            }
        }
        fields
    }

    fn interface_body(&self, node: Node<'_>) -> InterfaceBody {
        let mut body = InterfaceBody::default();
        for elem in children(node) {
            match elem.kind() {
                "method_elem" | "method_spec" => {
                    let Some(name) = elem.child_by_field_name("name") else {
                        continue;
                    };
                    body.methods.push(MethodSig {
                        name: self.ident(name),
                        signature: self.signature(elem),
                    });
                }
                "type_elem" | "constraint_elem" | "interface_type_name" => {
                    let parts = children(elem);
                    let embed = match parts.as_slice() {
                        [single] if is_named_type(single.kind()) => self.type_expr(*single),
                        _ => TypeExpr::Literal(squash(self.text(elem))),
                    };
                    body.embeds.push(embed);
                }
                kind if is_named_type(kind) => body.embeds.push(self.type_expr(elem)),
                _ => body.embeds.push(TypeExpr::Literal(squash(self.text(elem)))),
            }
        }
        body
    }

    fn const_group(&self, decl: Node<'_>) -> ConstGroup {
        let specs = descendants_of_kind(decl, "const_spec")
            .into_iter()
            .map(|spec| ConstSpec {
                names: field_children(spec, "name")
                    .into_iter()
                    .map(|n| self.ident(n))
                    .collect(),
                ty: spec.child_by_field_name("type").map(|t| self.type_expr(t)),
                values: self.values(spec),
                position: Self::position(spec),
            })
            .collect();
        ConstGroup {
            position: Self::position(decl),
            specs,
        }
    }

    fn var_specs(&self, decl: Node<'_>, scope: Scope, out: &mut Vec<VarSpec>) {
        for spec in descendants_of_kind(decl, "var_spec") {
            if enclosing_var_declaration(spec) != Some(decl.id()) {
                continue;
            }
            out.push(VarSpec {
                names: field_children(spec, "name")
                    .into_iter()
                    .map(|n| self.ident(n))
                    .collect(),
                ty: spec.child_by_field_name("type").map(|t| self.type_expr(t)),
                values: self.values(spec),
                scope,
                position: Self::position(spec),
            });
        }
    }

    fn values(&self, spec: Node<'_>) -> Vec<ValueExpr> {
        spec.child_by_field_name("value")
            .map(|list| children(list).into_iter().map(|v| self.value(v)).collect())
            .unwrap_or_default()
    }

    fn func_decl(&self, node: Node<'_>) -> Option<FuncDecl> {
        let name = node.child_by_field_name("name")?;
        let receiver = node
            .child_by_field_name("receiver")
            .and_then(|list| self.receiver(list));
        Some(FuncDecl {
            name: self.ident(name),
            receiver,
            signature: self.signature(node),
        })
    }

    fn receiver(&self, list: Node<'_>) -> Option<Receiver> {
        let param = children(list)
            .into_iter()
            .find(|n| n.kind() == "parameter_declaration")?;
        let mut ty = param.child_by_field_name("type")?;
        let mut pointer = false;

        loop {
            match ty.kind() {
                "pointer_type" => {
                    pointer = true;
                    ty = *children(ty).first()?;
                }
                "parenthesized_type" => ty = *children(ty).first()?,
                "generic_type" => ty = ty.child_by_field_name("type")?,
                "type_identifier" => break,
                _ => return None,
            }
        }
        Some(Receiver {
            type_name: self.text(ty).to_string(),
            pointer,
        })
    }

    /// Signature from the `parameters` and `result` fields of `node`.
    fn signature(&self, node: Node<'_>) -> Signature {
        let params = node
            .child_by_field_name("parameters")
            .map(|list| self.params(list))
            .unwrap_or_default();
        let results = match node.child_by_field_name("result") {
            Some(list) if list.kind() == "parameter_list" => self.params(list),
            Some(ty) => vec![Param::unnamed(self.type_expr(ty))],
            None => Vec::new(),
        };
        Signature { params, results }
    }

    fn params(&self, list: Node<'_>) -> Vec<Param> {
        children(list)
            .into_iter()
            .filter_map(|decl| {
                let ty = self.type_expr(decl.child_by_field_name("type")?);
                let ty = match decl.kind() {
                    "parameter_declaration" => ty,
                    "variadic_parameter_declaration" => TypeExpr::Variadic(Box::new(ty)),
                    _ => return None,
                };
                Some(Param {
                    names: field_children(decl, "name")
                        .into_iter()
                        .map(|n| self.ident(n))
                        .collect(),
                    ty,
                })
            })
            .collect()
    }

    fn type_expr(&self, node: Node<'_>) -> TypeExpr {
        let inner = |field: &str| {
            node.child_by_field_name(field)
                .or_else(|| children(node).into_iter().next())
                .map_or_else(
                    || TypeExpr::Literal(String::new()),
                    |n| self.type_expr(n),
                )
        };

        match node.kind() {
            "type_identifier" | "identifier" => TypeExpr::named(self.text(node)),
            "qualified_type" => match (
                node.child_by_field_name("package"),
                node.child_by_field_name("name"),
            ) {
                (Some(pkg), Some(name)) => TypeExpr::qualified(self.text(pkg), self.text(name)),
                _ => TypeExpr::Literal(squash(self.text(node))),
            },
            "generic_type" => {
                let mut base = inner("type");
                if let (
                    TypeExpr::Named { args, .. },
                    Some(type_args),
                ) = (&mut base, node.child_by_field_name("type_arguments"))
                {
                    *args = children(type_args)
                        .into_iter()
                        .map(|arg| match arg.kind() {
                            "type_elem" => match children(arg).as_slice() {
                                [single] => self.type_expr(*single),
                                _ => TypeExpr::Literal(squash(self.text(arg))),
                            },
                            _ => self.type_expr(arg),
                        })
                        .collect();
                }
                base
            }
            "pointer_type" => TypeExpr::Pointer(Box::new(inner("type"))),
            "slice_type" => TypeExpr::Slice(Box::new(inner("element"))),
            "array_type" => {
                let length = node
                    .child_by_field_name("length")
                    .map(|n| self.text(n).to_string())
                    .unwrap_or_default();
                TypeExpr::Array(length, Box::new(inner("element")))
            }
            "implicit_length_array_type" => {
                TypeExpr::Array("...".to_string(), Box::new(inner("element")))
            }
            "map_type" => match (
                node.child_by_field_name("key"),
                node.child_by_field_name("value"),
            ) {
                (Some(key), Some(value)) => TypeExpr::Map(
                    Box::new(self.type_expr(key)),
                    Box::new(self.type_expr(value)),
                ),
                _ => TypeExpr::Literal(squash(self.text(node))),
            },
            "channel_type" => {
                let mut cursor = node.walk();
                let tokens: Vec<&str> = node.children(&mut cursor).map(|c| c.kind()).collect();
                let dir = match tokens.as_slice() {
                    ["<-", "chan", ..] => ChanDir::Recv,
                    ["chan", "<-", ..] => ChanDir::Send,
                    _ => ChanDir::Both,
                };
                TypeExpr::Chan(dir, Box::new(inner("value")))
            }
            "function_type" => TypeExpr::Func(self.signature(node)),
            "parenthesized_type" => inner("type"),
            _ => TypeExpr::Literal(squash(self.text(node))),
        }
    }

    fn value(&self, node: Node<'_>) -> ValueExpr {
        match node.kind() {
            "interpreted_string_literal" | "raw_string_literal" => {
                ValueExpr::TextLiteral(self.text(node).to_string())
            }
            "int_literal" => ValueExpr::IntLiteral(self.text(node).to_string()),
            "nil" => ValueExpr::Nil,
            "iota" => ValueExpr::Iota,
            "identifier" => ValueExpr::Ident(self.text(node).to_string()),
            "parenthesized_expression" => children(node)
                .first()
                .map_or(ValueExpr::Other, |inner| self.value(*inner)),
            "composite_literal" => node
                .child_by_field_name("type")
                .map_or(ValueExpr::Other, |ty| ValueExpr::Composite(self.type_expr(ty))),
            "unary_expression" => {
                let is_address = node
                    .child_by_field_name("operator")
                    .is_some_and(|op| self.text(op) == "&");
                match node.child_by_field_name("operand") {
                    Some(operand) if is_address => {
                        ValueExpr::AddressOf(Box::new(self.value(operand)))
                    }
                    _ => ValueExpr::Other,
                }
            }
            "call_expression" => self.call(node),
            "type_conversion_expression" => self.conversion(node),
            _ => ValueExpr::Other,
        }
    }

    fn call(&self, node: Node<'_>) -> ValueExpr {
        let Some(function) = node.child_by_field_name("function") else {
            return ValueExpr::Other;
        };
        let only_nil = node
            .child_by_field_name("arguments")
            .is_some_and(|args| matches!(children(args).as_slice(), [arg] if arg.kind() == "nil"));

        if only_nil {
            if let Some(pointer) = self.pointer_operand(function) {
                return ValueExpr::NilCast(pointer);
            }
        }
        ValueExpr::Call(squash_all(self.text(function)))
    }

    /// `*T` or `*pkg.T` written in expression position, as in `(*T)(nil)`.
    fn pointer_operand(&self, function: Node<'_>) -> Option<TypeExpr> {
        if function.kind() != "parenthesized_expression" {
            return None;
        }
        let parts = children(function);
        let [inner] = parts.as_slice() else {
            return None;
        };
        match inner.kind() {
            "unary_expression" => {
                let op = inner.child_by_field_name("operator")?;
                if self.text(op) != "*" {
                    return None;
                }
                let operand = inner.child_by_field_name("operand")?;
                let target = match operand.kind() {
                    "identifier" => TypeExpr::named(self.text(operand)),
                    "selector_expression" => TypeExpr::qualified(
                        self.text(operand.child_by_field_name("operand")?),
                        self.text(operand.child_by_field_name("field")?),
                    ),
                    _ => return None,
                };
                Some(target.pointer())
            }
            "pointer_type" => Some(self.type_expr(*inner)),
            _ => None,
        }
    }

    fn conversion(&self, node: Node<'_>) -> ValueExpr {
        let (Some(ty), Some(operand)) = (
            node.child_by_field_name("type"),
            node.child_by_field_name("operand"),
        ) else {
            return ValueExpr::Other;
        };
        match (self.type_expr(ty), operand.kind()) {
            (pointer @ TypeExpr::Pointer(_), "nil") => ValueExpr::NilCast(pointer),
            (other, _) => ValueExpr::Call(other.to_string()),
        }
    }
}

/// Named children, skipping comments.
fn children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|n| n.kind() != "comment")
        .collect()
}

fn has_token(node: Node<'_>, token: &str) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|c| c.kind() == token);
    found
}

fn field_children<'t>(node: Node<'t>, field: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children_by_field_name(field, &mut cursor).collect()
}

fn descendants_of_kind<'t>(node: Node<'t>, kind: &str) -> Vec<Node<'t>> {
    let mut found = Vec::new();
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        if current.kind() == kind && current.id() != node.id() {
            found.push(current);
            continue;
        }
        let mut cursor = current.walk();
        let kids: Vec<Node<'t>> = current.named_children(&mut cursor).collect();
        stack.extend(kids.into_iter().rev());
    }
    found
}

fn enclosing_struct(node: Node<'_>) -> Option<usize> {
    let mut current = node.parent();
    while let Some(n) = current {
        if n.kind() == "struct_type" {
            return Some(n.id());
        }
        current = n.parent();
    }
    None
}

fn enclosing_var_declaration(node: Node<'_>) -> Option<usize> {
    let mut current = node.parent();
    while let Some(n) = current {
        if n.kind() == "var_declaration" {
            return Some(n.id());
        }
        current = n.parent();
    }
    None
}

fn is_named_type(kind: &str) -> bool {
    matches!(kind, "type_identifier" | "qualified_type" | "generic_type")
}

fn unquote(literal: &str) -> &str {
    literal
        .strip_prefix(['"', '`'])
        .and_then(|s| s.strip_suffix(['"', '`']))
        .unwrap_or(literal)
}

/// Collapses whitespace runs to one space.
fn squash(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Removes all whitespace, for callee text such as `zap.\n\tNew`.
fn squash_all(text: &str) -> String {
    text.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> SourceFile {
        GoParser::new()
            .parse_file(Path::new("svc.go"), source)
            .expect("source should parse")
    }

    #[test]
    fn package_and_imports() {
        let file = parse(
            r#"package svc

import (
	"context"
	zl "github.com/rs/zerolog"
	_ "embed"
)
"#,
        );
        assert_eq!(file.package.name, "svc");
        let bindings: Vec<_> = file.imports.iter().map(|i| i.binding()).collect();
        assert_eq!(bindings, vec!["context", "zl", "_"]);
        assert_eq!(file.import_path("zl"), Some("github.com/rs/zerolog"));
    }

    #[test]
    fn missing_package_clause_is_an_error() {
        let err = GoParser::new()
            .parse_file(Path::new("bad.go"), "func main() {}\n")
            .unwrap_err();
        assert!(matches!(err, ParseError::MissingPackage(_)));
    }

    #[test]
    fn type_declarations() {
        let file = parse(
            r#"package svc

import "sync"

type (
	ID     string
	Alias  = ID
	Box[T any] struct{ v T }
)

type Service struct {
	*Base
	sync.Mutex
	name, log string
	done      <-chan struct{}
	hooks     map[string][]func(int) error
}

type Store interface {
	Reader
	io.Closer
	Get(key string) ([]byte, error)
}

type Number interface {
	~int | ~int64
}
"#,
        );
        let names: Vec<_> = file.types.iter().map(|t| t.name.name.as_str()).collect();
        assert_eq!(names, vec!["ID", "Alias", "Box", "Service", "Store", "Number"]);
        assert!(file.types[1].alias);
        assert!(file.types[2].generic);

        let TypeBody::Struct(fields) = &file.types[3].body else {
            panic!("expected struct");
        };
        assert_eq!(fields.len(), 6);
        assert_eq!(fields[0].ty.to_string(), "*Base");
        assert!(fields[0].is_embedded());
        assert_eq!(fields[1].ty.to_string(), "sync.Mutex");
        assert_eq!(fields[3].name.as_ref().map(|n| n.name.as_str()), Some("log"));
        assert_eq!(fields[3].ordinal, 3);
        assert_eq!(fields[4].ty.to_string(), "<-chan struct{}");
        assert_eq!(fields[5].ty.to_string(), "map[string][]func(int) error");

        let TypeBody::Interface(body) = &file.types[4].body else {
            panic!("expected interface");
        };
        assert_eq!(body.methods.len(), 1);
        assert_eq!(body.methods[0].signature.to_string(), "(string) ([]byte, error)");
        assert_eq!(
            body.embeds,
            vec![TypeExpr::named("Reader"), TypeExpr::qualified("io", "Closer")]
        );

        let TypeBody::Interface(union) = &file.types[5].body else {
            panic!("expected interface");
        };
        assert!(matches!(union.embeds.as_slice(), [TypeExpr::Literal(_)]));
    }

    #[test]
    fn functions_and_receivers() {
        let file = parse(
            r#"package svc

func New(ctx context.Context, a, b int, opts ...Option) (*Service, error) { return nil, nil }

func (s *Service) Run() {}

func (b Box[T]) Get() T { var zero T; return zero }
"#,
        );
        assert_eq!(file.funcs.len(), 3);
        let new = &file.funcs[0];
        assert!(new.receiver.is_none());
        assert_eq!(
            new.signature.to_string(),
            "(context.Context, int, int, ...Option) (*Service, error)"
        );
        assert_eq!(new.signature.params[1].names.len(), 2);

        let run = file.funcs[1].receiver.as_ref().expect("receiver");
        assert_eq!((run.type_name.as_str(), run.pointer), ("Service", true));
        let get = file.funcs[2].receiver.as_ref().expect("receiver");
        assert_eq!((get.type_name.as_str(), get.pointer), ("Box", false));
    }

    #[test]
    fn values_and_scopes() {
        let file = parse(
            r#"package svc

const (
	KindA Kind = "a"
	KindB
	Max = 10
	First = iota
)

var (
	_      Reader = (*File)(nil)
	_      io.Writer = (*os.File)(nil)
	srv           = &Server{}
	cfg           = Config{}
	log           = zerolog.New(os.Stdout).
			With().Logger()
	a, b = 1, "x"
)

func run() {
	var local Logger
	_ = local
}
"#,
        );
        let specs = &file.consts[0].specs;
        assert_eq!(specs.len(), 4);
        assert_eq!(specs[0].values, vec![ValueExpr::TextLiteral("\"a\"".into())]);
        assert!(specs[1].values.is_empty() && specs[1].ty.is_none());
        assert_eq!(specs[3].values, vec![ValueExpr::Iota]);

        let vars: Vec<_> = file.package_vars().collect();
        assert_eq!(vars.len(), 6);
        assert_eq!(
            vars[0].values,
            vec![ValueExpr::NilCast(TypeExpr::named("File").pointer())]
        );
        assert_eq!(
            vars[1].values,
            vec![ValueExpr::NilCast(TypeExpr::qualified("os", "File").pointer())]
        );
        assert_eq!(
            vars[2].values,
            vec![ValueExpr::AddressOf(Box::new(ValueExpr::Composite(
                TypeExpr::named("Server")
            )))]
        );
        assert_eq!(vars[3].values, vec![ValueExpr::Composite(TypeExpr::named("Config"))]);
        assert_eq!(
            vars[4].values,
            vec![ValueExpr::Call("zerolog.New(os.Stdout).With().Logger".into())]
        );
        assert_eq!(vars[5].names.len(), 2);

        let locals: Vec<_> = file.vars.iter().filter(|v| v.scope == Scope::Function).collect();
        assert_eq!(locals.len(), 1);
        assert_eq!(locals[0].names[0].name, "local");
    }

    #[test]
    fn comment_groups_and_positions() {
        let file = parse(
            "// Copyright 2026 Acme\n// Licensed.\n\npackage svc\n\n// Doc line one\n// Doc line two\nvar x = 1 // trailing\n/* block */ // same line\n",
        );
        let groups: Vec<Vec<&str>> = file
            .comments
            .iter()
            .map(|g| g.comments.iter().map(Comment::content).collect())
            .collect();
        assert_eq!(
            groups,
            vec![
                vec!["Copyright 2026 Acme", "Licensed."],
                vec!["Doc line one", "Doc line two"],
                vec!["trailing"],
                vec!["block", "same line"],
            ]
        );
        let header = file.header_comment().expect("header");
        assert_eq!(header.position.line, 1);
        assert_eq!(file.comments[1].position.line, 6);
        assert_eq!(file.comments[1].position.column, 1);
    }

    #[test]
    fn trailing_comment_closes_its_group() {
        let file = parse(
            "package svc\n\nfunc f() {\n\tx := 1 // Count.\n\t// increment the counter now\n\tx++ /* a */ // b\n}\n",
        );
        let groups: Vec<Vec<&str>> = file
            .comments
            .iter()
            .map(|g| g.comments.iter().map(Comment::content).collect())
            .collect();
        assert_eq!(
            groups,
            vec![vec!["Count."], vec!["increment the counter now"], vec!["a", "b"]]
        );
        assert_eq!(file.comments[1].position.line, 5);
    }

    #[test]
    fn string_literals_everywhere() {
        let file = parse(
            "package svc\n\nimport \"fmt\"\n\nfunc f() {\n\tfmt.Println(\"a\\\\b\", `raw`)\n}\n",
        );
        let raws: Vec<_> = file.strings.iter().map(|s| s.raw.as_str()).collect();
        assert_eq!(raws, vec!["\"fmt\"", "\"a\\\\b\"", "`raw`"]);
        assert!(file.strings[2].is_raw());
        assert_eq!(file.strings[1].position.line, 6);
        assert_eq!(file.strings[1].position.column, 14);
    }
}
