use std::{fmt, str::FromStr};

/// The pending data-lifecycle action for a record.
///
/// Stored as text in the backing representation. Any text other than the
/// four action keywords reads back as [`CrudFlag::None`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CrudFlag {
    /// No pending action.
    #[default]
    None,
    /// The record should be created.
    Create,
    /// The record should be retrieved.
    Retrieve,
    /// The record should be updated.
    Update,
    /// The record should be deleted.
    Delete,
}

impl CrudFlag {
    /// All flags, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::None,
        Self::Create,
        Self::Retrieve,
        Self::Update,
        Self::Delete,
    ];

    /// The stored text form of the flag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Create => "CREATE",
            Self::Retrieve => "RETRIEVE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }

    /// Maps a stored value to a flag.
    ///
    /// Absent values and anything that is not one of the action keywords map
    /// to [`CrudFlag::None`]. Use [`str::parse`] where unknown text should be
    /// rejected instead.
    #[must_use]
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("CREATE") => Self::Create,
            Some("RETRIEVE") => Self::Retrieve,
            Some("UPDATE") => Self::Update,
            Some("DELETE") => Self::Delete,
            _ => Self::None,
        }
    }
}

impl fmt::Display for CrudFlag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CrudFlag {
    type Err = UnknownCrudFlag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|flag| flag.as_str() == s)
            .ok_or_else(|| UnknownCrudFlag(s.to_string()))
    }
}

/// Error returned when text is not one of the CRUD flag keywords.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown CRUD flag '{0}': expected one of NONE, CREATE, RETRIEVE, UPDATE, DELETE")]
pub struct UnknownCrudFlag(String);
