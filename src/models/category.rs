//! Category registry
//!
//! Categories are a fixed, static set with display metadata. Expenses refer to
//! them by id; ids missing from the registry display as [`OTHER`].

use std::fmt;

/// A spending category with display metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    /// Hex display color, e.g. `#F56565`
    pub color: &'static str,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Id of the fallback category
pub const OTHER_ID: &str = "other";

/// Fallback for unknown or missing category ids
pub const OTHER: Category = Category {
    id: OTHER_ID,
    name: "Other",
    color: "#718096",
};

/// All categories in display order
pub const CATEGORIES: &[Category] = &[
    Category {
        id: "food",
        name: "Food & Drinks",
        color: "#F56565",
    },
    Category {
        id: "transport",
        name: "Transport",
        color: "#4299E1",
    },
    Category {
        id: "housing",
        name: "Housing",
        color: "#9F7AEA",
    },
    Category {
        id: "entertainment",
        name: "Entertainment",
        color: "#ED8936",
    },
    Category {
        id: "shopping",
        name: "Shopping",
        color: "#38B2AC",
    },
    Category {
        id: "health",
        name: "Health",
        color: "#48BB78",
    },
    Category {
        id: "education",
        name: "Education",
        color: "#667EEA",
    },
    Category {
        id: "utilities",
        name: "Utilities",
        color: "#A0AEC0",
    },
    OTHER,
];

/// Exact lookup by id (case-insensitive)
pub fn find(id: &str) -> Option<&'static Category> {
    let id = id.trim();
    CATEGORIES.iter().find(|c| c.id.eq_ignore_ascii_case(id))
}

/// Lookup for display; unknown ids degrade to [`OTHER`]
pub fn lookup(id: &str) -> &'static Category {
    find(id).unwrap_or(&OTHER)
}

/// Resolve user input (id or display name) to a registry entry
pub fn resolve(input: &str) -> Option<&'static Category> {
    let input = input.trim();
    find(input).or_else(|| {
        CATEGORIES
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(input))
    })
}
