//! Extraction of the court and the parties from the span stream.
//!
//! Court, plaintiff and defendant are found by three independent scans over
//! the full stream. None of them depends on the output of another.

use crate::config::{
    RepresentativeTerminator, AGAINST_MARKER, COURT_MARKER, DEFENDANT_ROLE_MARKER,
    MIN_COURT_LINES, PLAINTIFF_ROLE_MARKER, PLAINTIFF_START_MARKER, REPRESENTATIVE_PREFIX,
};
use crate::error::{ParseError, ParseWarning, Result, Section};
use crate::types::{Address, Entity, Header, Role, Span};

use super::person::build_person;
use super::predicates::starts_with_postal_code;
use super::Extraction;

/// Which block of a party the scan is currently collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PartyScan {
    Idle,
    Party,
    Representative,
}

/// Raw text of a party and its representative, before decomposition.
#[derive(Debug, Default)]
struct PartyBlocks {
    party: String,
    representative: String,
}

/// Extract the court from the address field following "An das".
///
/// Lines are collected until one starts with a postal code. The layout is
/// fixed: name, street, PO box, city.
pub fn extract_court(spans: &[Span]) -> Result<Entity> {
    let mut lines: Vec<&str> = Vec::new();
    let mut collecting = false;
    let mut found_marker = false;
    let mut found_postal_code = false;

    for span in spans {
        let text = span.text.trim();

        if text.contains(COURT_MARKER) {
            collecting = true;
            found_marker = true;
            continue;
        }

        if collecting {
            lines.push(text);
            if starts_with_postal_code(text) {
                found_postal_code = true;
                break;
            }
        }
    }

    if !found_marker {
        return Err(ParseError::SectionNotFound(Section::Court));
    }
    if !found_postal_code {
        tracing::warn!(lines = lines.len(), "Court block has no postal code line");
    }

    let [name, street, po_box, city, ..] = lines.as_slice() else {
        return Err(ParseError::MalformedPartyBlock {
            raw_text: lines.join(", "),
            component_count: lines.len(),
        });
    };
    if lines.len() > MIN_COURT_LINES {
        tracing::warn!(lines = lines.len(), "Court block longer than expected, extra lines ignored");
    }

    Ok(Entity::new(
        *name,
        Address::new(*street, *city).with_po_box(Some((*po_box).to_string())),
    ))
}

/// Extract the plaintiff and its representative.
///
/// The party block lies between "in Sachen" and "Klägerin". The
/// representative block follows until the configured terminator.
pub fn extract_plaintiff(
    spans: &[Span],
    terminator: RepresentativeTerminator,
) -> Result<Extraction<Entity>> {
    let mut blocks = PartyBlocks::default();
    let mut scan = PartyScan::Idle;
    let mut found_start = false;
    let mut found_role = false;

    for span in spans {
        let text = span.text.as_str();

        if text.contains(PLAINTIFF_START_MARKER) {
            scan = PartyScan::Party;
            found_start = true;
            continue;
        }
        if text.contains(PLAINTIFF_ROLE_MARKER) {
            scan = PartyScan::Representative;
            found_role = true;
            continue;
        }

        match scan {
            PartyScan::Party => blocks.party.push_str(text),
            PartyScan::Representative => {
                if ends_representative_block(span, terminator) {
                    break;
                }
                blocks.representative.push_str(text);
            }
            PartyScan::Idle => {}
        }
    }

    if !(found_start && found_role) {
        return Err(ParseError::SectionNotFound(Section::Plaintiff));
    }

    build_party(blocks, Role::Plaintiff, Section::Plaintiff)
}

/// Extract the defendant and its representative.
///
/// The party block starts at the first emphasized span after "Klägerin" and
/// runs until "Beklagter". The representative block follows until the next
/// emphasized span.
pub fn extract_defendant(spans: &[Span]) -> Result<Extraction<Entity>> {
    let mut blocks = PartyBlocks::default();
    let mut scan = PartyScan::Idle;
    let mut armed = false;
    let mut found_party = false;
    let mut found_role = false;

    for span in spans {
        let text = span.text.as_str();

        if text.contains(PLAINTIFF_ROLE_MARKER) {
            armed = true;
            continue;
        }
        if armed && span.emphasized {
            armed = false;
            scan = PartyScan::Party;
            found_party = true;
            blocks.party.push_str(text);
            continue;
        }
        if text.contains(DEFENDANT_ROLE_MARKER) {
            scan = PartyScan::Representative;
            found_role = true;
            continue;
        }

        match scan {
            PartyScan::Party => blocks.party.push_str(text),
            PartyScan::Representative => {
                if span.emphasized {
                    break;
                }
                blocks.representative.push_str(text);
            }
            PartyScan::Idle => {}
        }
    }

    if !(found_party && found_role) {
        return Err(ParseError::SectionNotFound(Section::Defendant));
    }

    build_party(blocks, Role::Defendant, Section::Defendant)
}

/// Extract court, plaintiff and defendant and compose the header.
///
/// A missing or malformed entity fails the whole header.
pub fn extract_header(
    spans: &[Span],
    terminator: RepresentativeTerminator,
) -> Result<Extraction<Header>> {
    let court = extract_court(spans)?;
    let plaintiff = extract_plaintiff(spans, terminator)?;
    let defendant = extract_defendant(spans)?;

    let mut warnings = plaintiff.warnings;
    warnings.extend(defendant.warnings);

    Ok(Extraction::new(Header::new(court, plaintiff.value, defendant.value)).with_warnings(warnings))
}

/// Check whether a span ends the plaintiff's representative block.
fn ends_representative_block(span: &Span, terminator: RepresentativeTerminator) -> bool {
    match terminator {
        RepresentativeTerminator::Gegen => span.text.contains(AGAINST_MARKER),
        RepresentativeTerminator::Emphasized => span.emphasized,
    }
}

/// Decompose collected blocks into a party entity with its representative.
fn build_party(blocks: PartyBlocks, role: Role, section: Section) -> Result<Extraction<Entity>> {
    let mut warnings = Vec::new();
    let representative_block = blocks.representative.trim();

    let representative = if representative_block.is_empty() {
        None
    } else if let Some(rest) = representative_block.strip_prefix(REPRESENTATIVE_PREFIX) {
        Some(build_person(rest, Role::Representative, None)?)
    } else {
        tracing::warn!(
            section = %section,
            block = %representative_block,
            "Representative block without expected prefix, ignoring"
        );
        warnings.push(ParseWarning::RepresentativePrefixMissing {
            section,
            raw_text: representative_block.to_string(),
        });
        None
    };

    let entity = build_person(&blocks.party, role, representative)?;
    Ok(Extraction::new(entity).with_warnings(warnings))
}
