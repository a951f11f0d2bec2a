use serde::Serialize;

use crate::error::AppError;
use crate::routes::{Method, RouteDescriptor};

/// Host token substituted by the consuming client at request time.
pub const BASE_URL_PLACEHOLDER: &str = "{{baseUrl}}";

/// Root export document, shaped for Postman v2.1 consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collection {
    pub info: CollectionInfo,
    #[serde(rename = "item")]
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionInfo {
    pub name: String,
    pub schema: String,
}

/// One exported request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub name: String,
    pub request: RequestSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestSpec {
    pub method: Method,
    pub url: UrlSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrlSpec {
    pub raw: String,
    pub host: Vec<String>,
    pub path: Vec<String>,
}

impl Collection {
    pub fn to_pretty_json(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Builds the export document from resolved routes: one item per
/// descriptor, in input order. Pure; the caller owns serialization targets.
pub fn build(descriptors: &[RouteDescriptor], name: &str, schema_url: &str) -> Collection {
    Collection {
        info: CollectionInfo {
            name: name.to_string(),
            schema: schema_url.to_string(),
        },
        items: descriptors.iter().map(build_item).collect(),
    }
}

fn build_item(descriptor: &RouteDescriptor) -> Item {
    Item {
        name: descriptor.name.clone(),
        request: RequestSpec {
            method: descriptor.method,
            url: UrlSpec {
                raw: format!("{}{}", BASE_URL_PLACEHOLDER, descriptor.path),
                host: vec![BASE_URL_PLACEHOLDER.to_string()],
                // Naive split: a leading '/' keeps its empty lead segment
                // and the empty path stays a single empty segment.
                path: descriptor
                    .path
                    .split('/')
                    .map(str::to_string)
                    .collect(),
            },
        },
    }
}
