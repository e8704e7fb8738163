//! Identity of the person the review is written about.

use serde::Serialize;

use super::enums::Gender;

/// The colleague being reviewed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReviewSubject {
    pub name: String,
    pub gender: Gender,
    pub position: String,
    pub relationship: String,
}

/// Free-text subject fields that can be edited by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectField {
    Name,
    Position,
    Relationship,
}

impl SubjectField {
    pub fn label(&self) -> &'static str {
        match self {
            SubjectField::Name => "Name",
            SubjectField::Position => "Position",
            SubjectField::Relationship => "Working Relationship",
        }
    }
}

impl ReviewSubject {
    pub fn field(&self, field: SubjectField) -> &str {
        match field {
            SubjectField::Name => &self.name,
            SubjectField::Position => &self.position,
            SubjectField::Relationship => &self.relationship,
        }
    }

    pub(crate) fn field_mut(&mut self, field: SubjectField) -> &mut String {
        match field {
            SubjectField::Name => &mut self.name,
            SubjectField::Position => &mut self.position,
            SubjectField::Relationship => &mut self.relationship,
        }
    }
}
