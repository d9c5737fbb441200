//! Collection registry.
//!
//! Maps the collection names that appear in request paths to their
//! free-text search allowlists and uniqueness rules. Collections not
//! listed here are not part of the API.

/// Static description of one API collection.
#[derive(Debug, Clone, Copy)]
pub struct Collection {
    /// The path segment and store collection name, e.g. `subscribers`.
    pub name: &'static str,

    /// Singular label used in user-facing messages, e.g. `subscriber`.
    pub label: &'static str,

    /// Fields eligible for free-text `search` matching. Empty means the
    /// collection does not support `search`.
    pub searchable_fields: &'static [&'static str],

    /// Field that must be unique across the collection, if any.
    pub unique_field: Option<&'static str>,
}

/// All collections served by the API.
pub const COLLECTIONS: &[Collection] = &[
    Collection {
        name: "users",
        label: "user",
        searchable_fields: &["name", "email", "mobile"],
        unique_field: Some("email"),
    },
    Collection {
        name: "subscribers",
        label: "subscriber",
        searchable_fields: &["email"],
        unique_field: Some("email"),
    },
    Collection {
        name: "advisors",
        label: "advisor",
        searchable_fields: &["name", "cell", "email", "designation"],
        unique_field: None,
    },
    Collection {
        name: "programs",
        label: "program",
        searchable_fields: &[],
        unique_field: None,
    },
    Collection {
        name: "posts",
        label: "post",
        searchable_fields: &[],
        unique_field: None,
    },
    Collection {
        name: "sliders",
        label: "slider",
        searchable_fields: &[],
        unique_field: None,
    },
    Collection {
        name: "ec-members",
        label: "executive committee member",
        searchable_fields: &["name", "designation"],
        unique_field: None,
    },
    Collection {
        name: "org",
        label: "org member",
        searchable_fields: &[],
        unique_field: Some("email"),
    },
];

/// Looks up a collection by its path segment.
pub fn lookup(name: &str) -> Option<&'static Collection> {
    COLLECTIONS.iter().find(|c| c.name == name)
}
