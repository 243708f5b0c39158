//! Project aggregate root.

use super::{ProjectDomainError, ProjectId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A project grouping tasks and memberships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    description: String,
    start_date: NaiveDate,
}

impl Project {
    /// Creates a new project with a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyProjectName`] when the name is
    /// blank after trimming.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        start_date: NaiveDate,
    ) -> Result<Self, ProjectDomainError> {
        Ok(Self {
            id: ProjectId::new(),
            name: validated_name(name)?,
            description: description.into(),
            start_date,
        })
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the project description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the project start date.
    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Replaces the mutable project details.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyProjectName`] when the new name is
    /// blank after trimming.
    pub fn update_details(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        start_date: NaiveDate,
    ) -> Result<(), ProjectDomainError> {
        self.name = validated_name(name)?;
        self.description = description.into();
        self.start_date = start_date;
        Ok(())
    }
}

fn validated_name(name: impl Into<String>) -> Result<String, ProjectDomainError> {
    let raw = name.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ProjectDomainError::EmptyProjectName);
    }
    Ok(trimmed.to_owned())
}
