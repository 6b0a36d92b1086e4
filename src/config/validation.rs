//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the base URL parses
//! - Check every route has an id and a url or children
//! - Detect qualified id collisions across the whole tree
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RoutesConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;
use url::Url;

use crate::config::schema::RoutesConfig;
use crate::routing::RouteSource;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid base_url `{0}`")]
    InvalidBaseUrl(String),

    #[error("route at {location} has an empty id")]
    EmptyId { location: String },

    #[error("route id `{id}` must not contain `.`")]
    DottedId { id: String },

    #[error("route `{id}` has neither a url nor children")]
    MissingUrlAndChildren { id: String },

    #[error("duplicate route id `{id}`")]
    DuplicateId { id: String },
}

pub fn validate_config(config: &RoutesConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if Url::parse(&config.base_url).is_err() {
        errors.push(ValidationError::InvalidBaseUrl(config.base_url.clone()));
    }

    let mut seen = HashSet::new();
    validate_routes(&config.routes, None, &mut seen, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_routes(
    routes: &[RouteSource],
    parent: Option<&str>,
    seen: &mut HashSet<String>,
    errors: &mut Vec<ValidationError>,
) {
    for (i, route) in routes.iter().enumerate() {
        if route.id.is_empty() {
            let location = match parent {
                Some(parent) => format!("`{parent}` child #{i}"),
                None => format!("top-level #{i}"),
            };
            errors.push(ValidationError::EmptyId { location });
        } else if route.id.contains('.') {
            errors.push(ValidationError::DottedId {
                id: route.id.clone(),
            });
        }

        let id = match parent {
            Some(parent) => format!("{parent}.{}", route.id),
            None => route.id.clone(),
        };

        if !route.is_valid() {
            errors.push(ValidationError::MissingUrlAndChildren { id: id.clone() });
        }

        if !seen.insert(id.clone()) {
            errors.push(ValidationError::DuplicateId { id: id.clone() });
        }

        if let Some(children) = &route.children {
            validate_routes(children, Some(&id), seen, errors);
        }
    }
}
