use lopdf::{Dictionary, Document, Object, ObjectId};

use super::PostProcessError;

/// A top-level bookmark pointing at the first page of a section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutlineEntry {
    pub title: String,
    pub identifier: Option<String>,
    /// 1-based page number.
    pub page: usize,
}

struct LinkedEntry<'e> {
    object_id: ObjectId,
    page_ref: ObjectId,
    entry: &'e OutlineEntry,
}

/// Adds a flat `/Outlines` tree to the catalog.  Does nothing for an empty
/// entry list.
pub(crate) fn write_outline(
    document: &mut Document,
    entries: &[OutlineEntry],
) -> Result<(), PostProcessError> {
    if entries.is_empty() {
        return Ok(());
    }

    let pages = document.get_pages();
    let mut linked = Vec::with_capacity(entries.len());
    for entry in entries {
        let page_ref = u32::try_from(entry.page)
            .ok()
            .and_then(|page| pages.get(&page).copied())
            .ok_or_else(|| PostProcessError::MissingPage {
                title: entry.title.clone(),
                page: entry.page,
            })?;
        linked.push(LinkedEntry {
            object_id: document.new_object_id(),
            page_ref,
            entry,
        });
    }

    let outlines_id = document.new_object_id();
    for (index, item) in linked.iter().enumerate() {
        let mut dictionary = Dictionary::new();
        dictionary.set("Title", Object::string_literal(item.entry.title.as_str()));
        dictionary.set(
            "Dest",
            Object::Array(vec![
                Object::Reference(item.page_ref),
                Object::Name("Fit".into()),
            ]),
        );
        dictionary.set("Parent", Object::Reference(outlines_id));
        if let Some(name) = &item.entry.identifier {
            dictionary.set("NM", Object::string_literal(name.as_str()));
        }
        if index > 0 {
            dictionary.set("Prev", Object::Reference(linked[index - 1].object_id));
        }
        if let Some(next) = linked.get(index + 1) {
            dictionary.set("Next", Object::Reference(next.object_id));
        }
        document
            .objects
            .insert(item.object_id, Object::Dictionary(dictionary));
    }

    let mut root = Dictionary::new();
    root.set("Type", Object::Name("Outlines".into()));
    root.set("Count", Object::Integer(linked.len() as i64));
    if let (Some(first), Some(last)) = (linked.first(), linked.last()) {
        root.set("First", Object::Reference(first.object_id));
        root.set("Last", Object::Reference(last.object_id));
    }
    document.objects.insert(outlines_id, Object::Dictionary(root));

    let catalog_id = document
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|_| PostProcessError::MissingCatalog)?;
    let catalog = document
        .get_object_mut(catalog_id)
        .map_err(|_| PostProcessError::MissingCatalog)?
        .as_dict_mut()
        .map_err(|_| PostProcessError::InvalidCatalog)?;
    catalog.set("Outlines", Object::Reference(outlines_id));
    catalog.set("PageMode", Object::Name("UseOutlines".into()));

    Ok(())
}
