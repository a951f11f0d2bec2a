use serde::{Deserialize, Serialize};

/// The request verbs the exporter understands. Anything else is not a
/// recognized routing directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Selection order when a handler declares more than one verb:
    /// first match wins.
    pub const PRECEDENCE: [Method; 4] =
        [Method::Get, Method::Post, Method::Put, Method::Delete];

    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One routing directive attached to a handler: a verb plus the declared
/// path values. `paths` normally holds a single entry; extra entries are
/// aliases and an empty sequence is malformed input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    pub method: Method,
    pub paths: Vec<String>,
}

impl Directive {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            paths: vec![path.into()],
        }
    }
}

/// A unit of behavior as supplied by a declaration source: a named handler
/// carrying zero or more routing directives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerDeclaration {
    pub name: String,
    #[serde(default)]
    pub directives: Vec<Directive>,
}

impl HandlerDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            directives: Vec::new(),
        }
    }

    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }
}

/// One resolved route: the verb-specific view of a handler. `path` is kept
/// exactly as declared, an empty mapping value stays empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub name: String,
    pub method: Method,
    pub path: String,
}
