//! Read-side helpers for snippets pulled off the clipboard

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExtractError {
    #[error("invalid snippet XML at byte {position}: {message}")]
    Xml { position: u64, message: String },
}

impl ExtractError {
    fn at(reader: &Reader<&[u8]>, err: impl std::fmt::Display) -> Self {
        Self::Xml {
            position: reader.buffer_position(),
            message: err.to_string(),
        }
    }
}

/// `name` attribute of every `Object` element, in document order.
///
/// Objects nested in buttons or groups are included. An object without a
/// name yields an empty string.
pub fn extract_object_names(xml: &str) -> Result<Vec<String>, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut names = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.name().as_ref() == b"Object" => {
                let name = match e
                    .try_get_attribute("name")
                    .map_err(|err| ExtractError::at(&reader, err))?
                {
                    Some(attr) => attr
                        .unescape_value()
                        .map_err(|err| ExtractError::at(&reader, err))?
                        .into_owned(),
                    None => String::new(),
                };
                names.push(name);
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(ExtractError::at(&reader, err)),
            _ => {}
        }
    }
    Ok(names)
}

/// Text of every `LocalCSS` element with its leading whitespace trimmed
pub fn extract_object_css(xml: &str) -> Result<Vec<String>, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut styles = Vec::new();
    let mut current: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"LocalCSS" => {
                current = Some(String::new());
            }
            Ok(Event::Empty(e)) if e.name().as_ref() == b"LocalCSS" => {
                styles.push(String::new());
            }
            Ok(Event::Text(t)) => {
                if let Some(css) = current.as_mut() {
                    let text = t.unescape().map_err(|err| ExtractError::at(&reader, err))?;
                    css.push_str(&text);
                }
            }
            Ok(Event::CData(c)) => {
                if let Some(css) = current.as_mut() {
                    css.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"LocalCSS" => {
                if let Some(css) = current.take() {
                    styles.push(css.trim_start().to_string());
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(ExtractError::at(&reader, err)),
            _ => {}
        }
    }
    Ok(styles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snippet::{FieldRef, LayoutFieldOptions, ScriptBinding, Snippet};
    use pretty_assertions::assert_eq;

    const PULLED: &str = r#"<fmxmlsnippet type="LayoutObjectList">
  <Layout>
    <Object type="Field" name="first &amp; last">
      <FieldObj>
        <Styles>
          <LocalCSS>
            self { font-size: 12; }
          </LocalCSS>
        </Styles>
      </FieldObj>
    </Object>
    <Object type="Text"/>
  </Layout>
</fmxmlsnippet>"#;

    #[test]
    fn test_names_in_document_order() {
        let names = extract_object_names(PULLED).unwrap();
        assert_eq!(names, vec!["first & last".to_string(), String::new()]);
    }

    #[test]
    fn test_css_leading_whitespace_trimmed() {
        let css = extract_object_css(PULLED).unwrap();
        assert_eq!(css.len(), 1);
        assert!(css[0].starts_with("self { font-size: 12; }"));
    }

    #[test]
    fn test_reads_generated_snippet() {
        let mut doc = Snippet::new();
        let field = LayoutFieldOptions::new(FieldRef::new("Contacts", "Company"));
        doc.layout_field(&field.clone().with_object_name("company")).unwrap();
        doc.layout_field_button(&field.with_object_name("go"), &ScriptBinding::new("12"))
            .unwrap();

        // The wrapped field inside the button is unnamed
        let names = extract_object_names(&doc.to_xml()).unwrap();
        assert_eq!(names, vec!["company", "go", ""]);

        let css = extract_object_css(&doc.to_xml()).unwrap();
        assert_eq!(css.len(), 2);
        assert!(css[0].starts_with("self {"));
    }

    #[test]
    fn test_malformed_xml() {
        let err = extract_object_names("<Object name=\"a\"></Layout>").unwrap_err();
        assert!(matches!(err, ExtractError::Xml { .. }));
    }
}
