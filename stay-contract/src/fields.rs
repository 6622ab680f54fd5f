//! Named field sets shared by fixtures and assertions
//!
//! The same set drives both sides: fixtures populate the named fields and
//! leave the rest absent, and assertions check only the named fields.

use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

/// A field of an API entity, addressed by its JSON name
pub trait Field: Copy + Ord + fmt::Debug + 'static {
    /// Every field of the entity, in declaration order
    const ALL: &'static [Self];

    /// JSON field name
    fn name(self) -> &'static str;

    /// Look up a field by JSON name
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.name() == name)
    }
}

/// Property fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PropertyField {
    Id,
    Alias,
    CountryCode,
    CreatedAt,
}

impl Field for PropertyField {
    const ALL: &'static [Self] = &[Self::Id, Self::Alias, Self::CountryCode, Self::CreatedAt];

    fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Alias => "alias",
            Self::CountryCode => "countryCode",
            Self::CreatedAt => "createdAt",
        }
    }
}

/// Booking fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BookingField {
    Id,
    StartDate,
    EndDate,
    Status,
    Guest,
    PropertyId,
}

impl Field for BookingField {
    const ALL: &'static [Self] = &[
        Self::Id,
        Self::StartDate,
        Self::EndDate,
        Self::Status,
        Self::Guest,
        Self::PropertyId,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::StartDate => "startDate",
            Self::EndDate => "endDate",
            Self::Status => "status",
            Self::Guest => "guest",
            Self::PropertyId => "propertyId",
        }
    }
}

/// An ordered set of fields
#[derive(Clone, PartialEq, Eq)]
pub struct FieldSet<F: Field>(BTreeSet<F>);

impl<F: Field> FieldSet<F> {
    /// Every field of the entity
    pub fn all() -> Self {
        F::ALL.iter().copied().collect()
    }

    /// No fields
    pub fn none() -> Self {
        Self(BTreeSet::new())
    }

    /// Fields from JSON names; unrecognized names are skipped
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        names
            .iter()
            .filter_map(|name| {
                let field = F::from_name(name.as_ref());
                if field.is_none() {
                    debug!(name = name.as_ref(), "ignoring unrecognized field name");
                }
                field
            })
            .collect()
    }

    /// Add a field
    pub fn with(mut self, field: F) -> Self {
        self.0.insert(field);
        self
    }

    /// Remove a field
    pub fn without(mut self, field: F) -> Self {
        self.0.remove(&field);
        self
    }

    /// Whether the field is in the set
    pub fn contains(&self, field: F) -> bool {
        self.0.contains(&field)
    }

    /// Iterate in declaration order
    pub fn iter(&self) -> impl Iterator<Item = F> + '_ {
        self.0.iter().copied()
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<F: Field> FromIterator<F> for FieldSet<F> {
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<F: Field> fmt::Debug for FieldSet<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(F::name)).finish()
    }
}
