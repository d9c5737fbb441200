//! HTTP request handlers.
//!
//! Every collection shares the same handler set; the collection path
//! segment is resolved against the [registry](crate::registry) and
//! unknown names are a 404.

pub mod bulk;
pub mod create;
pub mod delete;
pub mod health;
pub mod list;
pub mod read;
pub mod update;

pub use bulk::{bulk_create_handler, bulk_delete_handler};
pub use create::create_handler;
pub use delete::delete_handler;
pub use health::{health_handler, welcome_handler};
pub use list::list_handler;
pub use read::read_handler;
pub use update::update_handler;

use kin_persistence::error::StoreError;

use crate::error::{RestError, RestResult};
use crate::registry::{self, Collection};

/// Resolves a collection path segment, or fails with a 404.
pub(crate) fn resolve_collection(name: &str) -> RestResult<&'static Collection> {
    registry::lookup(name).ok_or_else(|| RestError::UnknownCollection {
        name: name.to_string(),
    })
}

/// Uppercases the first letter of a label for message formatting.
pub(crate) fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Maps a store-level miss to the collection's user-facing 404 message.
pub(crate) fn map_missing(err: StoreError, collection: &Collection) -> RestError {
    match err {
        StoreError::NotFound { .. } => {
            RestError::not_found(format!("Couldn't find any {} data!", collection.label))
        }
        other => other.into(),
    }
}
