use lopdf::{Dictionary, Document, Object};

/// Entries written to the document information dictionary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentInfo {
    pub title: String,
    pub author: String,
    pub subject: Option<String>,
    pub creator: Option<String>,
}

impl DocumentInfo {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            subject: None,
            creator: None,
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    fn fill(&self, dictionary: &mut Dictionary) {
        dictionary.set("Title", Object::string_literal(self.title.as_str()));
        dictionary.set("Author", Object::string_literal(self.author.as_str()));
        if let Some(subject) = &self.subject {
            dictionary.set("Subject", Object::string_literal(subject.as_str()));
        }
        if let Some(creator) = &self.creator {
            dictionary.set("Creator", Object::string_literal(creator.as_str()));
        }
    }
}

/// Updates the existing `/Info` dictionary, creating one when the trailer has
/// none.
pub(crate) fn write_info(document: &mut Document, info: &DocumentInfo) {
    let existing = document
        .trailer
        .get(b"Info")
        .and_then(Object::as_reference)
        .ok();

    if let Some(id) = existing {
        if let Ok(dictionary) = document.get_object_mut(id).and_then(Object::as_dict_mut) {
            info.fill(dictionary);
            return;
        }
    }

    let mut dictionary = Dictionary::new();
    info.fill(&mut dictionary);
    let id = document.add_object(dictionary);
    document.trailer.set("Info", Object::Reference(id));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info_dictionary(document: &Document) -> &Dictionary {
        let id = document
            .trailer
            .get(b"Info")
            .and_then(Object::as_reference)
            .expect("info reference");
        document
            .get_object(id)
            .and_then(Object::as_dict)
            .expect("info dictionary")
    }

    fn string_entry(dictionary: &Dictionary, key: &[u8]) -> String {
        let bytes = dictionary
            .get(key)
            .and_then(Object::as_str)
            .expect("string entry");
        String::from_utf8_lossy(bytes).into_owned()
    }

    #[test]
    fn creates_missing_info_dictionary() {
        let mut document = Document::with_version("1.5");
        write_info(&mut document, &DocumentInfo::new("SOJAI - Press Release 2026", "SOJAI"));

        let info = info_dictionary(&document);
        assert_eq!(string_entry(info, b"Title"), "SOJAI - Press Release 2026");
        assert_eq!(string_entry(info, b"Author"), "SOJAI");
        assert!(info.get(b"Subject").is_err());
    }

    #[test]
    fn updates_existing_info_dictionary() {
        let mut document = Document::with_version("1.5");
        let mut existing = Dictionary::new();
        existing.set("Producer", Object::string_literal("printpdf"));
        let id = document.add_object(existing);
        document.trailer.set("Info", Object::Reference(id));

        let info = DocumentInfo::new("Title", "SOJAI")
            .with_subject("AI dental diagnostics")
            .with_creator("press-release");
        write_info(&mut document, &info);

        let dictionary = info_dictionary(&document);
        assert_eq!(string_entry(dictionary, b"Producer"), "printpdf");
        assert_eq!(string_entry(dictionary, b"Subject"), "AI dental diagnostics");
        assert_eq!(string_entry(dictionary, b"Creator"), "press-release");
    }
}
