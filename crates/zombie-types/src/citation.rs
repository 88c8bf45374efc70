use crate::types::Paragraph;

/// Build the trailing citation for a paragraph from its source metadata.
///
/// | sourcetext | sourceurl | result                  |
/// |------------|-----------|-------------------------|
/// | present    | present   | `---[text](url)`        |
/// | present    | absent    | `---text`               |
/// | absent     | present   | `---[url](url)`         |
/// | absent     | absent    | empty string            |
pub fn citation(paragraph: &Paragraph) -> String {
    match (paragraph.sourcetext.as_deref(), paragraph.sourceurl.as_deref()) {
        (Some(text), Some(url)) => format!("---[{}]({})", text, url),
        (Some(text), None) => format!("---{}", text),
        (None, Some(url)) => format!("---[{}]({})", url, url),
        (None, None) => String::new(),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: a citation is empty exactly when both sources are absent
        #[test]
        fn empty_iff_no_sources(
            text in proptest::option::of("[a-zA-Z ]{1,20}"),
            url in proptest::option::of("https://[a-z]{1,10}\\.com")
        ) {
            let mut p = Paragraph::new("content");
            p.sourcetext = text.clone();
            p.sourceurl = url.clone();
            let c = citation(&p);
            prop_assert_eq!(c.is_empty(), text.is_none() && url.is_none());
            if !c.is_empty() {
                prop_assert!(c.starts_with("---"));
            }
        }
    }
}
