//! Script step builders

use tracing::debug;

use crate::template::builtin::{
    SORT_FIELD, STEP_CONDITION, STEP_END_IF, STEP_SET_FIELD, STEP_SET_VARIABLE, STEP_SORT,
};
use crate::template::Bindings;

use super::{ElementType, FieldRef, Snippet, SnippetError, SortKey};

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

impl Snippet {
    fn append_step(&mut self, template: &str, bindings: &Bindings) -> Result<String, SnippetError> {
        self.expect_type(ElementType::ScriptStepList)?;
        let xml = self.templates.render(template, bindings)?;
        debug!(step = template, "appended script step");
        self.append(xml.clone());
        Ok(xml)
    }

    /// Append a Set Field step
    pub fn step_set_field(
        &mut self,
        field: &FieldRef,
        calculation: Option<&str>,
        repetition: Option<&str>,
    ) -> Result<String, SnippetError> {
        let bindings = Bindings::new()
            .with("table", &field.table)
            .with("field", &field.field)
            .with_opt("calculation", non_empty(calculation))
            .with_opt("repetition", non_empty(repetition));
        self.append_step(STEP_SET_FIELD, &bindings)
    }

    /// Append a Set Variable step; the repetition defaults to 1
    pub fn step_set_variable(
        &mut self,
        name: &str,
        value: Option<&str>,
        repetition: Option<&str>,
    ) -> Result<String, SnippetError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SnippetError::input("variable name is required").at_column(1));
        }
        let bindings = Bindings::new()
            .with("name", name)
            .with_opt("value", non_empty(value))
            .with("repetition", non_empty(repetition).unwrap_or("1"));
        self.append_step(STEP_SET_VARIABLE, &bindings)
    }

    /// Append a Sort Records step over the given keys, in order
    pub fn step_sort(&mut self, keys: &[SortKey]) -> Result<String, SnippetError> {
        if keys.is_empty() {
            return Err(SnippetError::input("sort step needs at least one field"));
        }
        let mut sorts = String::new();
        for key in keys {
            let bindings = Bindings::new()
                .with("direction", key.direction)
                .with("table", &key.field.table)
                .with("field", &key.field.field);
            sorts.push_str(&self.templates.render(SORT_FIELD, &bindings)?);
        }
        let bindings = Bindings::new()
            .with("no_interact", "True")
            .with("sorts", sorts.trim_end_matches('\n'));
        self.append_step(STEP_SORT, &bindings)
    }

    fn step_condition(&mut self, id: u32, name: &str, calculation: &str) -> Result<String, SnippetError> {
        let bindings = Bindings::new()
            .with("step_id", id)
            .with("step_name", name)
            .with("calculation", calculation);
        self.append_step(STEP_CONDITION, &bindings)
    }

    /// Append an If step
    pub fn step_if(&mut self, calculation: &str) -> Result<String, SnippetError> {
        self.step_condition(68, "If", calculation)
    }

    /// Append an Else If step
    pub fn step_else_if(&mut self, calculation: &str) -> Result<String, SnippetError> {
        self.step_condition(125, "Else If", calculation)
    }

    /// Append an End If step
    pub fn step_end_if(&mut self) -> Result<String, SnippetError> {
        self.append_step(STEP_END_IF, &Bindings::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snippet::SortDirection;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_field() {
        let mut doc = Snippet::new();
        let xml = doc
            .step_set_field(&FieldRef::new("Contacts", "Company"), Some(r#""Acme""#), None)
            .unwrap();
        assert_eq!(
            xml,
            r#"  <Step enable="True" id="76" name="Set Field">
    <Calculation><![CDATA["Acme"]]></Calculation>
    <Field table="Contacts" id="" name="Company"/>
  </Step>
"#
        );
    }

    #[test]
    fn test_set_field_with_repetition() {
        let mut doc = Snippet::new();
        let xml = doc
            .step_set_field(&FieldRef::new("Contacts", "Global"), Some("1"), Some("$i"))
            .unwrap();
        assert!(xml.contains("<Repetition>\n      <Calculation><![CDATA[$i]]></Calculation>"));
    }

    #[test]
    fn test_set_variable_defaults_repetition() {
        let mut doc = Snippet::new();
        let xml = doc.step_set_variable("$count", Some("0"), None).unwrap();
        assert_eq!(
            xml,
            r#"  <Step enable="True" id="141" name="Set Variable">
    <Value>
      <Calculation><![CDATA[0]]></Calculation>
    </Value>
    <Repetition>
      <Calculation><![CDATA[1]]></Calculation>
    </Repetition>
    <Name>$count</Name>
  </Step>
"#
        );
    }

    #[test]
    fn test_sort_keys_in_order() {
        let mut doc = Snippet::new();
        let keys = [
            SortKey::new(FieldRef::new("Contacts", "Company"), SortDirection::Descending),
            SortKey::new(FieldRef::new("Contacts", "Name"), SortDirection::Ascending),
        ];
        let xml = doc.step_sort(&keys).unwrap();
        let company = xml.find(r#"name="Company""#).unwrap();
        let name = xml.find(r#"name="Name""#).unwrap();
        assert!(company < name);
        assert!(xml.contains(r#"<Sort type="Descending">"#));
        assert!(xml.contains(r#"<NoInteract state="True"/>"#));
        assert!(xml.contains("    <SortList value=\"True\">\n      <Sort"));
        assert!(xml.contains("</Sort>\n    </SortList>"));
    }

    #[test]
    fn test_empty_sort_rejected() {
        let mut doc = Snippet::new();
        assert!(matches!(
            doc.step_sort(&[]),
            Err(SnippetError::InputFormat { .. })
        ));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_if_chain() {
        let mut doc = Snippet::new();
        doc.step_if("$x = 1").unwrap();
        let else_if = doc.step_else_if("$x = 2").unwrap();
        doc.step_end_if().unwrap();
        assert!(else_if.contains(r#"id="125" name="Else If""#));
        assert!(doc.fragments()[0].contains(r#"id="68" name="If""#));
        assert!(doc.fragments()[0].contains("<![CDATA[$x = 1]]>"));
        assert_eq!(doc.fragments()[2], "  <Step enable=\"True\" id=\"70\" name=\"End If\"/>\n");
    }
}
