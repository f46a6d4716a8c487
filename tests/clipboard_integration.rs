//! Integration tests for the clipboard bridge with a scripted backend

use std::io;

use fmsnippet::clipboard::escape::{decode_extended, escape_for_shell, unescape_shell};
use fmsnippet::snippet::extract_object_names;
use fmsnippet::{build, run, Automation, ClipboardBridge, ClipboardError, Command, LayoutConfig};

/// Records pushed payloads and plays back canned responses
struct Recorder {
    pushed: Vec<String>,
    responses: Vec<String>,
    clipboard: String,
}

impl Recorder {
    fn answering(responses: &[&str]) -> Self {
        Self {
            pushed: Vec::new(),
            responses: responses.iter().rev().map(|r| r.to_string()).collect(),
            clipboard: String::new(),
        }
    }
}

impl Automation for Recorder {
    fn push(&mut self, payload: &str) -> io::Result<String> {
        self.pushed.push(payload.to_string());
        self.clipboard = payload.to_string();
        Ok(self.responses.pop().unwrap_or_default())
    }

    fn pull(&mut self) -> io::Result<String> {
        if self.clipboard.is_empty() {
            return Err(io::Error::new(io::ErrorKind::NotFound, "clipboard empty"));
        }
        Ok(self.clipboard.clone())
    }
}

#[test]
fn test_shell_escaping_round_trips() {
    let samples = [
        "",
        "plain",
        "'",
        "''''",
        "it's a 'quoted' \"string\"",
        "'\\'' already escaped looking",
    ];
    for text in samples {
        assert_eq!(unescape_shell(&escape_for_shell(text)), text);
    }
}

#[test]
fn test_apostrophes_reach_clipboard_intact() {
    let doc = run(
        Command::SetVariable,
        "$name\t\"O'Brien\"",
        &LayoutConfig::default(),
    )
    .expect("Should build");

    let mut bridge = ClipboardBridge::new(Recorder::answering(&["OK"]));
    let response = bridge.push(&doc).expect("Apostrophe should not break the push");
    assert_eq!(response, "OK");

    let pushed = &bridge.automation().pushed[0];
    assert_eq!(unescape_shell(pushed), doc.to_xml());
}

#[test]
fn test_extended_characters_are_placeholders() {
    let xml = build(Command::SetVariable, "$dash\t\"a \u{2013} b\"").expect("Should build");
    let mut bridge = ClipboardBridge::new(Recorder::answering(&[""]));
    bridge.push_xml(&xml).expect("Should push");

    let pushed = &bridge.automation().pushed[0];
    assert!(pushed.is_ascii());
    assert!(pushed.contains("#:8211:#"));
    assert_eq!(decode_extended(pushed), xml);
}

#[test]
fn test_response_prefixes() {
    let mut bridge = ClipboardBridge::new(Recorder::answering(&[
        "Error validating XML\rline 3",
        "Error: -10004",
        "pasted\r",
    ]));
    let xml = build(Command::Fields, "Name").expect("Should build");

    match bridge.push_xml(&xml) {
        Err(ClipboardError::XmlValidation(response)) => {
            assert_eq!(response, "Error validating XML\nline 3")
        }
        other => panic!("expected XML validation error, got {:?}", other),
    }
    assert!(matches!(
        bridge.push_xml(&xml),
        Err(ClipboardError::Automation(_))
    ));
    assert_eq!(bridge.push_xml(&xml).expect("Should succeed"), "pasted\n");
}

#[test]
fn test_pull_then_extract_names() {
    let mut bridge = ClipboardBridge::new(Recorder::answering(&[""]));
    let err = bridge.pull().expect_err("Empty clipboard should fail");
    assert_eq!(err.to_string(), "Unrecognized clipboard data");

    let xml = build(Command::LayoutFields, "Contacts::Company\t\t\t\tcompany")
        .expect("Should build");
    bridge.push_xml(&xml).expect("Should push");
    let pulled = bridge.pull().expect("Should pull");
    assert_eq!(extract_object_names(&pulled).expect("Should parse"), vec!["company"]);
}
