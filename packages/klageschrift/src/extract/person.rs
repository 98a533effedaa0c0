//! Decomposition of a flattened party block into an [`Entity`].

use crate::config::COMPONENT_DELIMITER;
use crate::error::{ParseError, Result};
use crate::types::{Address, Entity, Role};

use super::predicates::find_po_box;

/// Build an entity from one flattened party block.
///
/// The block holds the lines of the address field joined by `", "`. The shape
/// is inferred from the number of components and whether one of them is a
/// PO box:
///
/// | components | PO box | layout                                        |
/// |------------|--------|-----------------------------------------------|
/// | 3          | any    | name, street, city                            |
/// | 4          | yes    | name, street, PO box, city                    |
/// | 4          | no     | name, descriptor, street, city                |
/// | 5          | any    | name, descriptor, street, PO box, city        |
///
/// Any other count is rejected with [`ParseError::MalformedPartyBlock`].
///
/// # Examples
/// ```
/// use klageschrift::extract::build_person;
/// use klageschrift::types::Role;
///
/// let entity = build_person(
///     "Peter Meister, Werbegrafiker, Klingentalstrasse 41, 4057 Basel",
///     Role::Defendant,
///     None,
/// )
/// .unwrap();
/// assert_eq!(entity.descriptor.as_deref(), Some("Werbegrafiker"));
/// assert_eq!(entity.address.city, "4057 Basel");
/// ```
pub fn build_person(
    flat_text: &str,
    role: Role,
    representative: Option<Entity>,
) -> Result<Entity> {
    let components: Vec<&str> = flat_text
        .trim()
        .split(COMPONENT_DELIMITER)
        .map(str::trim)
        .collect();
    let po_box = find_po_box(&components).map(String::from);

    let malformed = || ParseError::MalformedPartyBlock {
        raw_text: flat_text.to_string(),
        component_count: components.len(),
    };
    let (name, rest) = components.split_first().ok_or_else(malformed)?;

    let (descriptor, address) = match (rest, po_box) {
        ([street, city], po_box) => (None, Address::new(*street, *city).with_po_box(po_box)),
        ([street, _, city], Some(po_box)) => {
            (None, Address::new(*street, *city).with_po_box(Some(po_box)))
        }
        ([descriptor, street, city], None) => {
            (Some((*descriptor).to_string()), Address::new(*street, *city))
        }
        ([descriptor, street, _, city], po_box) => (
            Some((*descriptor).to_string()),
            Address::new(*street, *city).with_po_box(po_box),
        ),
        _ => return Err(malformed()),
    };

    tracing::debug!(name = %name, role = role.as_str(), "Built party entity");

    Ok(Entity::new(*name, address)
        .with_role(role)
        .with_descriptor(descriptor)
        .with_representative(representative))
}
