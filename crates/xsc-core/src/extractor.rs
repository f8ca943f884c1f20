//! Extraction of active business units from `.xscsys` XML documents

use crate::error::{Error, Result};
use roxmltree::{Document, Node, ParsingOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Element holding one business unit
const UNIT_TAG: &str = "BusinessUnit";
/// Child element holding the unit name
const NAME_TAG: &str = "Name";
/// Child element holding the active flag
const ACTIVE_TAG: &str = "Active";

/// Read an `.xscsys` file and return the names of its active units in document order
pub fn read_active_units<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| Error::from_io(path, e))?;
    extract_active_units_str(&content, path)
}

/// Like [`read_active_units`], but any failure is logged and yields an empty list
///
/// One unreadable or malformed file must not abort a batch, so callers see it
/// as a file with zero active units.
pub fn extract_active_units<P: AsRef<Path>>(path: P) -> Vec<String> {
    let path = path.as_ref();
    match read_active_units(path) {
        Ok(units) => units,
        Err(e) => {
            error!("{}", e);
            Vec::new()
        }
    }
}

/// Extract active unit names from XML text (useful for testing)
pub fn extract_active_units_str<P: AsRef<Path>>(content: &str, source_name: P) -> Result<Vec<String>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(content, options).map_err(|e| Error::XmlParse {
        path: PathBuf::from(source_name.as_ref()),
        source: e,
    })?;

    let path = source_name.as_ref();
    let mut units = Vec::new();
    for unit in doc.descendants().filter(|n| is_plain_element(n, UNIT_TAG)) {
        if let Some(name) = active_name(unit, path)? {
            units.push(name);
        }
    }

    debug!("{} active unit(s) in {}", units.len(), path.display());
    Ok(units)
}

/// Name of a unit if it is active and its name has no underscore
///
/// Units without both children are skipped; a child present without text
/// fails the whole document.
fn active_name(unit: Node<'_, '_>, path: &Path) -> Result<Option<String>> {
    let (Some(name), Some(active)) = (child(unit, NAME_TAG), child(unit, ACTIVE_TAG)) else {
        return Ok(None);
    };

    let name = element_text(name, path)?.trim();
    let active = element_text(active, path)?.trim();

    if !active.eq_ignore_ascii_case("true") || name.contains('_') {
        return Ok(None);
    }

    Ok(Some(name.to_string()))
}

/// Element named `tag` with no namespace
fn is_plain_element(node: &Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && node.tag_name().namespace().is_none() && node.tag_name().name() == tag
}

/// First child element named `tag`
fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|c| is_plain_element(c, tag))
}

/// Leading text of an element
fn element_text<'a>(node: Node<'a, '_>, path: &Path) -> Result<&'a str> {
    node.text().ok_or_else(|| Error::MissingText {
        path: path.to_path_buf(),
        element: node.tag_name().name().to_string(),
    })
}
