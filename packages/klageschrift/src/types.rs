//! Core data types for the parser.
//!
//! These types model a Swiss civil pleading (Klageschrift): the header with
//! court and parties, the claims and the three-part justification.

use serde::{Deserialize, Serialize};

/// One styled text fragment from the source document, in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Text payload, not trimmed.
    pub text: String,

    /// Whether the fragment was set in a bold font.
    pub emphasized: bool,
}

impl Span {
    /// Create a regular (non-emphasized) span.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: false,
        }
    }

    /// Create an emphasized span.
    #[must_use]
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: true,
        }
    }
}

/// Role of an entity in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Court,
    Plaintiff,
    Defendant,
    Representative,
}

impl Role {
    /// Label used in the text rendering.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Court => "Court",
            Self::Plaintiff => "Plaintiff",
            Self::Defendant => "Defendant",
            Self::Representative => "Representative",
        }
    }
}

/// Postal address of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub po_box: Option<String>,
}

impl Address {
    /// Create an address without PO box.
    #[must_use]
    pub fn new(street: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            po_box: None,
        }
    }

    /// Set the PO box line.
    #[must_use]
    pub fn with_po_box(mut self, po_box: Option<String>) -> Self {
        self.po_box = po_box;
        self
    }
}

/// A court, a party or a legal representative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    pub address: Address,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    /// Firm or profession.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<String>,

    /// Legal representative. Never nested deeper than one level in practice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub representative: Option<Box<Entity>>,
}

impl Entity {
    /// Create an entity without role, descriptor or representative.
    #[must_use]
    pub fn new(name: impl Into<String>, address: Address) -> Self {
        Self {
            name: name.into(),
            address,
            role: None,
            descriptor: None,
            representative: None,
        }
    }

    /// Set the role.
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Set the firm or profession.
    #[must_use]
    pub fn with_descriptor(mut self, descriptor: Option<String>) -> Self {
        self.descriptor = descriptor;
        self
    }

    /// Attach a legal representative.
    #[must_use]
    pub fn with_representative(mut self, representative: Option<Entity>) -> Self {
        self.representative = representative.map(Box::new);
        self
    }
}

/// Court and parties of the pleading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub court: Entity,
    pub plaintiff: Entity,
    pub defendant: Entity,
}

impl Header {
    /// Compose a header, assigning each entity the role of its slot.
    ///
    /// Any role the entities carried before is overwritten.
    #[must_use]
    pub fn new(court: Entity, plaintiff: Entity, defendant: Entity) -> Self {
        Self {
            court: court.with_role(Role::Court),
            plaintiff: plaintiff.with_role(Role::Plaintiff),
            defendant: defendant.with_role(Role::Defendant),
        }
    }
}

/// One statement with its supporting evidence citations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    pub statement: String,
    pub evidence: Vec<String>,
}

impl Argument {
    /// Create an argument.
    #[must_use]
    pub fn new(statement: impl Into<String>, evidence: Vec<String>) -> Self {
        Self {
            statement: statement.into(),
            evidence,
        }
    }
}

/// The three argument sections of the "Begründung".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Justification {
    /// "I. Formelles".
    pub formalities: Vec<Argument>,

    /// "II. Zuständigkeit".
    pub jurisdiction: Vec<Argument>,

    /// "III. Materielles".
    pub facts: Vec<Argument>,
}

/// Fully parsed pleading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub header: Header,
    pub claims: Vec<String>,
    pub justification: Justification,
}

impl Document {
    /// Compose a document.
    #[must_use]
    pub fn new(header: Header, claims: Vec<String>, justification: Justification) -> Self {
        Self {
            header,
            claims,
            justification,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(name: &str) -> Entity {
        Entity::new(name, Address::new("Freie Strasse 45", "4001 Basel"))
    }

    #[test]
    fn test_header_assigns_roles() {
        let header = Header::new(entity("Gericht"), entity("Klägerin"), entity("Beklagter"));
        assert_eq!(header.court.role, Some(Role::Court));
        assert_eq!(header.plaintiff.role, Some(Role::Plaintiff));
        assert_eq!(header.defendant.role, Some(Role::Defendant));
    }

    #[test]
    fn test_header_overwrites_prior_roles() {
        let header = Header::new(
            entity("Gericht").with_role(Role::Defendant),
            entity("Klägerin").with_role(Role::Representative),
            entity("Beklagter").with_role(Role::Court),
        );
        assert_eq!(header.court.role, Some(Role::Court));
        assert_eq!(header.plaintiff.role, Some(Role::Plaintiff));
        assert_eq!(header.defendant.role, Some(Role::Defendant));
    }

    #[test]
    fn test_header_keeps_representative_role() {
        let lawyer = entity("Dr. Mark Sacher").with_role(Role::Representative);
        let header = Header::new(
            entity("Gericht"),
            entity("Klägerin"),
            entity("Peter Meister").with_representative(Some(lawyer)),
        );
        let representative = header.defendant.representative.unwrap();
        assert_eq!(representative.role, Some(Role::Representative));
    }

    #[test]
    fn test_entity_serialization_skips_absent_fields() {
        let json = serde_json::to_string(&entity("Peter Meister")).unwrap();
        assert_eq!(
            json,
            r#"{"name":"Peter Meister","address":{"street":"Freie Strasse 45","city":"4001 Basel"}}"#
        );
    }

    #[test]
    fn test_role_as_str() {
        assert_eq!(Role::Court.as_str(), "Court");
        assert_eq!(Role::Representative.as_str(), "Representative");
    }
}
