use super::model::{HandlerDeclaration, Method, RouteDescriptor};

/// Resolves each declared handler to at most one route, preserving input
/// order.
///
/// A handler with no recognized directive contributes nothing. A handler
/// carrying several directives resolves by fixed precedence
/// (GET, POST, PUT, DELETE). Only the first declared path of the winning
/// directive is used; extra aliases are ignored.
pub fn extract(handlers: &[HandlerDeclaration]) -> Vec<RouteDescriptor> {
    let mut descriptors = Vec::new();
    for handler in handlers {
        if let Some(descriptor) = resolve(handler) {
            descriptors.push(descriptor);
        }
    }
    descriptors
}

fn resolve(handler: &HandlerDeclaration) -> Option<RouteDescriptor> {
    for method in Method::PRECEDENCE {
        let Some(directive) = handler
            .directives
            .iter()
            .find(|directive| directive.method == method)
        else {
            continue;
        };
        // A directive with no path value is malformed input; the handler is
        // skipped rather than falling through to a lower-precedence verb.
        let path = directive.paths.first()?;
        return Some(RouteDescriptor {
            name: handler.name.clone(),
            method,
            path: path.clone(),
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::Directive;

    fn handler(name: &str, directives: Vec<Directive>) -> HandlerDeclaration {
        HandlerDeclaration {
            name: name.to_string(),
            directives,
        }
    }

    #[test]
    fn handler_without_directives_is_skipped() {
        let handlers = vec![handler("ping", Vec::new())];
        assert!(extract(&handlers).is_empty());
    }

    #[test]
    fn single_directive_maps_verb_and_path() {
        let handlers = vec![handler(
            "getUser",
            vec![Directive::new(Method::Get, "/users/{id}")],
        )];

        let descriptors = extract(&handlers);
        assert_eq!(
            descriptors,
            vec![RouteDescriptor {
                name: "getUser".to_string(),
                method: Method::Get,
                path: "/users/{id}".to_string(),
            }]
        );
    }

    #[test]
    fn get_wins_over_post() {
        let handlers = vec![handler(
            "upsert",
            vec![
                Directive::new(Method::Post, "/items"),
                Directive::new(Method::Get, "/items/{id}"),
            ],
        )];

        let descriptors = extract(&handlers);
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].method, Method::Get);
        assert_eq!(descriptors[0].path, "/items/{id}");
    }

    #[test]
    fn precedence_falls_through_to_delete() {
        let handlers = vec![handler(
            "dropItem",
            vec![Directive::new(Method::Delete, "/items/{id}")],
        )];

        let descriptors = extract(&handlers);
        assert_eq!(descriptors[0].method, Method::Delete);
    }

    #[test]
    fn only_first_path_alias_is_taken() {
        let handlers = vec![handler(
            "listItems",
            vec![Directive {
                method: Method::Get,
                paths: vec!["/items".to_string(), "/items/all".to_string()],
            }],
        )];

        let descriptors = extract(&handlers);
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].path, "/items");
    }

    #[test]
    fn directive_without_path_value_skips_handler() {
        let handlers = vec![handler(
            "broken",
            vec![
                Directive {
                    method: Method::Get,
                    paths: Vec::new(),
                },
                Directive::new(Method::Post, "/fallback"),
            ],
        )];

        // The winning directive is malformed, so the whole handler is
        // skipped; the POST directive does not take over.
        assert!(extract(&handlers).is_empty());
    }

    #[test]
    fn empty_declared_path_is_preserved() {
        let handlers = vec![handler("root", vec![Directive::new(Method::Get, "")])];

        let descriptors = extract(&handlers);
        assert_eq!(descriptors[0].path, "");
    }

    #[test]
    fn input_order_is_preserved() {
        let handlers = vec![
            handler("first", vec![Directive::new(Method::Get, "/a")]),
            handler("ping", Vec::new()),
            handler("second", vec![Directive::new(Method::Delete, "/b")]),
        ];

        let descriptors = extract(&handlers);
        let names: Vec<&str> = descriptors
            .iter()
            .map(|descriptor| descriptor.name.as_str())
            .collect();
        assert_eq!(names, vec!["first", "second"]);
    }
}
