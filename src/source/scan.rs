use std::{
    fs,
    path::{Path, PathBuf},
};

use syn::{Expr, ExprLit, ExprMethodCall, Lit, visit::Visit};
use walkdir::WalkDir;

use crate::error::{AppError, AppResult};
use crate::routes::{Directive, HandlerDeclaration, Method};

/// Scans a source tree for axum-style route registrations
/// (`.route("/path", get(handler))`, including chained method routers like
/// `get(a).post(b)`) and groups them into handler declarations.
///
/// Files are visited in sorted path order and registrations in syntactic
/// order, so the produced declaration sequence is stable across runs. A
/// handler registered under several verbs or paths accumulates directives
/// and path aliases on a single declaration.
pub fn scan_dir(dir: &Path) -> AppResult<Vec<HandlerDeclaration>> {
    let mut registry = DeclarationRegistry::default();
    for file in collect_rust_files(dir)? {
        let content = fs::read_to_string(&file)?;
        let source = file.display().to_string();
        if let Err(error) = scan_source(&content, &source, &mut registry) {
            return Err(AppError::Parse { file, error });
        }
    }
    Ok(registry.into_declarations())
}

fn collect_rust_files(dir: &Path) -> AppResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

fn scan_source(
    content: &str,
    source: &str,
    registry: &mut DeclarationRegistry,
) -> Result<(), syn::Error> {
    let parsed = syn::parse_file(content)?;
    let mut visitor = RouteVisitor { source, registry };
    visitor.visit_file(&parsed);
    Ok(())
}

/// Accumulates registrations grouped by handler name, in first-seen order.
#[derive(Default)]
struct DeclarationRegistry {
    declarations: Vec<HandlerDeclaration>,
}

impl DeclarationRegistry {
    fn record(&mut self, name: String, method: Method, path: String) {
        let index = match self
            .declarations
            .iter()
            .position(|declaration| declaration.name == name)
        {
            Some(index) => index,
            None => {
                self.declarations.push(HandlerDeclaration::new(name));
                self.declarations.len() - 1
            }
        };
        let declaration = &mut self.declarations[index];
        match declaration
            .directives
            .iter_mut()
            .find(|directive| directive.method == method)
        {
            Some(directive) => directive.paths.push(path),
            None => declaration.directives.push(Directive { method, paths: vec![path] }),
        }
    }

    fn into_declarations(self) -> Vec<HandlerDeclaration> {
        self.declarations
    }
}

struct RouteVisitor<'a> {
    source: &'a str,
    registry: &'a mut DeclarationRegistry,
}

impl<'a, 'ast> Visit<'ast> for RouteVisitor<'a> {
    fn visit_expr_method_call(&mut self, node: &'ast ExprMethodCall) {
        // Recurse first: a `.route(..).route(..)` chain parses outside-in,
        // and registrations must land in written order.
        syn::visit::visit_expr_method_call(self, node);

        if node.method == "route" {
            match node.args.first().and_then(extract_string_literal) {
                Some(path) => {
                    let handlers = node
                        .args
                        .iter()
                        .nth(1)
                        .map(extract_route_handlers)
                        .unwrap_or_default();
                    for (method, handler) in handlers {
                        match handler {
                            Some(name) => self.registry.record(name, method, path.clone()),
                            None => tracing::warn!(
                                source = %self.source,
                                path = %path,
                                %method,
                                "skipping route handler without a resolvable identifier"
                            ),
                        }
                    }
                }
                None => {
                    tracing::warn!(source = %self.source, "skipping non-literal route path");
                }
            }
        }
    }
}

fn extract_string_literal(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(value),
            ..
        }) => Some(value.value()),
        Expr::Paren(expr) => extract_string_literal(&expr.expr),
        Expr::Reference(expr) => extract_string_literal(&expr.expr),
        _ => None,
    }
}

fn extract_route_handlers(expr: &Expr) -> Vec<(Method, Option<String>)> {
    let mut handlers = Vec::new();
    collect_route_handlers(expr, &mut handlers);
    // Chained method routers are parsed outside-in; reverse back to the
    // written order.
    handlers.reverse();
    handlers
}

fn collect_route_handlers(expr: &Expr, out: &mut Vec<(Method, Option<String>)>) {
    match expr {
        Expr::Call(call) => {
            if let Some(method) = method_from_expr(&call.func) {
                out.push((method, call.args.first().and_then(extract_handler_ident)));
            }
        }
        Expr::MethodCall(call) => {
            if let Some(method) = normalize_method(&call.method.to_string()) {
                out.push((method, call.args.first().and_then(extract_handler_ident)));
            }
            collect_route_handlers(&call.receiver, out);
        }
        Expr::Paren(expr) => collect_route_handlers(&expr.expr, out),
        Expr::Reference(expr) => collect_route_handlers(&expr.expr, out),
        _ => {}
    }
}

fn method_from_expr(expr: &Expr) -> Option<Method> {
    match expr {
        Expr::Path(path) => path
            .path
            .segments
            .last()
            .and_then(|segment| normalize_method(&segment.ident.to_string())),
        Expr::Paren(expr) => method_from_expr(&expr.expr),
        Expr::Reference(expr) => method_from_expr(&expr.expr),
        _ => None,
    }
}

fn extract_handler_ident(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Path(path) => path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string()),
        Expr::Reference(expr) => extract_handler_ident(&expr.expr),
        Expr::Paren(expr) => extract_handler_ident(&expr.expr),
        _ => None,
    }
}

fn normalize_method(name: &str) -> Option<Method> {
    match name.to_ascii_lowercase().as_str() {
        "get" => Some(Method::Get),
        "post" => Some(Method::Post),
        "put" => Some(Method::Put),
        "delete" => Some(Method::Delete),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(content: &str) -> Vec<HandlerDeclaration> {
        let mut registry = DeclarationRegistry::default();
        scan_source(content, "test.rs", &mut registry).expect("source parses");
        registry.into_declarations()
    }

    #[test]
    fn collects_registrations_in_syntactic_order() {
        let declarations = scan(
            r#"
            pub fn router() -> Router {
                Router::new()
                    .route("/users/{id}", get(get_user))
                    .route("/users", post(create_user))
            }
            "#,
        );

        assert_eq!(declarations.len(), 2);
        assert_eq!(declarations[0].name, "get_user");
        assert_eq!(
            declarations[0].directives,
            vec![Directive::new(Method::Get, "/users/{id}")]
        );
        assert_eq!(declarations[1].name, "create_user");
        assert_eq!(declarations[1].directives[0].method, Method::Post);
    }

    #[test]
    fn chained_method_router_yields_one_declaration_per_handler() {
        let declarations = scan(
            r#"
            fn router() -> Router {
                Router::new().route("/items", get(list_items).delete(drop_items))
            }
            "#,
        );

        assert_eq!(declarations.len(), 2);
        assert_eq!(declarations[0].name, "list_items");
        assert_eq!(declarations[0].directives[0].method, Method::Get);
        assert_eq!(declarations[1].name, "drop_items");
        assert_eq!(declarations[1].directives[0].method, Method::Delete);
    }

    #[test]
    fn same_handler_under_two_verbs_accumulates_directives() {
        let declarations = scan(
            r#"
            fn router() -> Router {
                Router::new().route("/items", get(items).post(items))
            }
            "#,
        );

        assert_eq!(declarations.len(), 1);
        assert_eq!(declarations[0].directives.len(), 2);
        assert_eq!(declarations[0].directives[0].method, Method::Get);
        assert_eq!(declarations[0].directives[1].method, Method::Post);
    }

    #[test]
    fn same_handler_under_two_paths_accumulates_aliases() {
        let declarations = scan(
            r#"
            fn router() -> Router {
                Router::new()
                    .route("/items", get(list_items))
                    .route("/items/all", get(list_items))
            }
            "#,
        );

        assert_eq!(declarations.len(), 1);
        assert_eq!(
            declarations[0].directives[0].paths,
            vec!["/items", "/items/all"]
        );
    }

    #[test]
    fn unsupported_verbs_are_ignored() {
        let declarations = scan(
            r#"
            fn router() -> Router {
                Router::new()
                    .route("/items", patch(update_item))
                    .route("/items", put(replace_item))
            }
            "#,
        );

        assert_eq!(declarations.len(), 1);
        assert_eq!(declarations[0].name, "replace_item");
        assert_eq!(declarations[0].directives[0].method, Method::Put);
    }

    #[test]
    fn non_literal_path_is_skipped() {
        let declarations = scan(
            r#"
            fn router() -> Router {
                Router::new().route(BASE_PATH, get(list_items))
            }
            "#,
        );

        assert!(declarations.is_empty());
    }

    #[test]
    fn qualified_handler_paths_resolve_to_last_segment() {
        let declarations = scan(
            r#"
            fn router() -> Router {
                Router::new().route("/users", get(handlers::users::list))
            }
            "#,
        );

        assert_eq!(declarations[0].name, "list");
    }

    #[test]
    fn invalid_source_is_an_error() {
        let mut registry = DeclarationRegistry::default();
        assert!(scan_source("fn broken(", "test.rs", &mut registry).is_err());
    }
}
