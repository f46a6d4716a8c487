//! fmxmlsnippet fragment templates

pub const FIELD_DEFINITION: &str = "field_definition";
pub const LAYOUT_FIELD: &str = "layout_field";
pub const LAYOUT_TEXT: &str = "layout_text";
pub const GROUP_BUTTON: &str = "group_button";
pub const STEP_SET_FIELD: &str = "step_set_field";
pub const STEP_SET_VARIABLE: &str = "step_set_variable";
pub const STEP_SORT: &str = "step_sort";
pub const SORT_FIELD: &str = "sort_field";
pub const STEP_CONDITION: &str = "step_condition";
pub const STEP_END_IF: &str = "step_end_if";

pub const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (
        FIELD_DEFINITION,
        r#"  <Field id="" dataType="{{data_type}}" fieldType="{{field_type}}" name="{{name}}">
    {{#if comment}}
    <Comment>{{comment}}</Comment>
    {{/if}}
    {{#if calculation}}
    <Calculation table="">{{cdata calculation}}</Calculation>
    {{/if}}
    <Storage global="{{global}}" maxRepetition="{{repetitions}}"/>
  </Field>
"#,
    ),
    (
        LAYOUT_FIELD,
        r#"    <Object type="Field" key="" LabelKey="" name="{{object_name}}" flags="" rotation="0">
      <Bounds top="{{top}}" left="{{left}}" bottom="{{bottom}}" right="{{right}}"/>
      {{#if tooltip}}
      <ToolTip>
        <Calculation>{{cdata tooltip}}</Calculation>
      </ToolTip>
      {{/if}}
      <FieldObj numOfReps="1" flags="" inputMode="0" displayType="0" quickFind="1" pictFormat="5">
        <Name>{{field}}</Name>
        <Styles>
          <LocalCSS>
            self {
              font-family: -fm-font-family({{font}});
              font-size: {{font_size}};
            }
            {{#if padding}}
            self .inner_border { padding: {{padding}}; }
            {{/if}}
          </LocalCSS>
        </Styles>
      </FieldObj>
    </Object>
"#,
    ),
    (
        LAYOUT_TEXT,
        r#"    <Object type="Text" key="" LabelKey="0" name="" flags="0" rotation="0">
      <Bounds top="{{top}}" left="{{left}}" bottom="{{bottom}}" right="{{right}}"/>
      <TextObj flags="0">
        <Styles>
          <LocalCSS>
            self {
              font-size: {{font_size}};
              text-align: {{text_align}};
              {{#if left_margin}}
              -fm-paragraph-margin-left: {{left_margin}};
              {{/if}}
              {{#if right_margin}}
              -fm-paragraph-margin-right: {{right_margin}};
              {{/if}}
            }
          </LocalCSS>
        </Styles>
        <CharacterStyleVector>
          <Style>
            <Data>{{text}}</Data>
            <CharacterStyle mask="32695">
              <Font-family codeSet="" fontId="">{{font}}</Font-family>
              <Font-size>{{font_size}}</Font-size>
              <Face>0</Face>
              <Color>{{text_color}}</Color>
            </CharacterStyle>
          </Style>
        </CharacterStyleVector>
      </TextObj>
    </Object>
"#,
    ),
    (
        GROUP_BUTTON,
        r#"    <Object type="GroupButton" key="" LabelKey="0" name="{{object_name}}" flags="" rotation="0">
      <Bounds top="{{top}}" left="{{left}}" bottom="{{bottom}}" right="{{right}}"/>
      <GroupButtonObj numOfObjs="1">
        <Step enable="True" id="" name="Perform Script">
          <CurrentScript value="Pause"/>
          <Calculation>{{cdata script_parameter}}</Calculation>
          <Script id="{{script_id}}" name="{{script_name}}"/>
        </Step>
{{field}}
      </GroupButtonObj>
    </Object>
"#,
    ),
    (
        STEP_SET_FIELD,
        r#"  <Step enable="True" id="76" name="Set Field">
    {{#if calculation}}
    <Calculation>{{cdata calculation}}</Calculation>
    {{/if}}
    {{#if repetition}}
    <Repetition>
      <Calculation>{{cdata repetition}}</Calculation>
    </Repetition>
    {{/if}}
    <Field table="{{table}}" id="" name="{{field}}"/>
  </Step>
"#,
    ),
    (
        STEP_SET_VARIABLE,
        r#"  <Step enable="True" id="141" name="Set Variable">
    {{#if value}}
    <Value>
      <Calculation>{{cdata value}}</Calculation>
    </Value>
    {{/if}}
    <Repetition>
      <Calculation>{{cdata repetition}}</Calculation>
    </Repetition>
    <Name>{{name}}</Name>
  </Step>
"#,
    ),
    (
        STEP_SORT,
        r#"  <Step enable="True" id="39" name="Sort Records">
    <NoInteract state="{{no_interact}}"/>
    <Restore state="True"/>
    <SortList value="True">
{{sorts}}
    </SortList>
  </Step>
"#,
    ),
    (
        SORT_FIELD,
        r#"      <Sort type="{{direction}}">
        <PrimaryField>
          <Field table="{{table}}" id="" name="{{field}}"/>
        </PrimaryField>
      </Sort>
"#,
    ),
    (
        STEP_CONDITION,
        r#"  <Step enable="True" id="{{step_id}}" name="{{step_name}}">
    <Calculation>{{cdata calculation}}</Calculation>
  </Step>
"#,
    ),
    (
        STEP_END_IF,
        r#"  <Step enable="True" id="70" name="End If"/>
"#,
    ),
];
