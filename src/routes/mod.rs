mod extract;
mod model;

pub use extract::extract;
pub use model::{Directive, HandlerDeclaration, Method, RouteDescriptor};
