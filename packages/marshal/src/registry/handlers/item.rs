//! Item structure: the root element, variable declarations, item body,
//! feedback and the response-processing rules.

use super::xhtml::{ARIA, BODY, DIR};
use crate::codec::AttrKind;
use crate::registry::types::{AttributeSpec, ChildRule, ContentModel, ElementSpec};
use crate::version::Version;

const CARDINALITY: &[&str] = &["single", "multiple", "ordered", "record"];

pub(crate) const BASE_TYPES: &[&str] = &[
    "identifier",
    "boolean",
    "integer",
    "float",
    "string",
    "point",
    "pair",
    "directedPair",
    "duration",
    "file",
    "uri",
    "intOrIdentifier",
];

const ITEM: &[AttributeSpec] = &[
    AttributeSpec::required("identifier", AttrKind::String),
    AttributeSpec::required("title", AttrKind::String),
    AttributeSpec::optional("label", AttrKind::String),
    AttributeSpec::optional("xml:lang", AttrKind::String),
    AttributeSpec::required("adaptive", AttrKind::Boolean),
    AttributeSpec::required("timeDependent", AttrKind::Boolean),
    AttributeSpec::optional("toolName", AttrKind::String),
    AttributeSpec::optional("toolVersion", AttrKind::String),
    AttributeSpec::optional("xsi:schemaLocation", AttrKind::String),
];

const VARIABLE: &[AttributeSpec] = &[
    AttributeSpec::required("identifier", AttrKind::Identifier),
    AttributeSpec::required("cardinality", AttrKind::Token(CARDINALITY)),
    AttributeSpec::optional("baseType", AttrKind::Token(BASE_TYPES)),
];

const OUTCOME: &[AttributeSpec] = &[
    AttributeSpec::optional("view", AttrKind::List),
    AttributeSpec::optional("interpretation", AttrKind::String),
    AttributeSpec::optional("longInterpretation", AttrKind::Uri),
    AttributeSpec::optional("normalMaximum", AttrKind::Float),
    AttributeSpec::optional("normalMinimum", AttrKind::Float),
    AttributeSpec::optional("masteryValue", AttrKind::Float),
    AttributeSpec::optional("externalScored", AttrKind::Token(&["human", "externalMachine"])).since(Version::V2_2_0),
    AttributeSpec::optional("variableIdentifierRef", AttrKind::Identifier).since(Version::V2_2_0),
];

const INTERPRETATION: &[AttributeSpec] = &[AttributeSpec::optional("interpretation", AttrKind::String)];

const VALUE: &[AttributeSpec] = &[
    AttributeSpec::optional("fieldIdentifier", AttrKind::Identifier),
    AttributeSpec::optional("baseType", AttrKind::Token(BASE_TYPES)),
];

const MAPPING: &[AttributeSpec] = &[
    AttributeSpec::optional("lowerBound", AttrKind::Float),
    AttributeSpec::optional("upperBound", AttrKind::Float),
    AttributeSpec::optional("defaultValue", AttrKind::Float),
];

const MAP_ENTRY: &[AttributeSpec] = &[
    AttributeSpec::required("mapKey", AttrKind::String),
    AttributeSpec::required("mappedValue", AttrKind::Float),
    AttributeSpec::optional("caseSensitive", AttrKind::Boolean),
];

const STYLESHEET: &[AttributeSpec] = &[
    AttributeSpec::required("href", AttrKind::Uri),
    AttributeSpec::required("type", AttrKind::String),
    AttributeSpec::optional("media", AttrKind::String),
    AttributeSpec::optional("title", AttrKind::String),
];

const MODAL_FEEDBACK: &[AttributeSpec] = &[
    AttributeSpec::required("outcomeIdentifier", AttrKind::Identifier),
    AttributeSpec::required("showHide", AttrKind::Token(&["show", "hide"])),
    AttributeSpec::required("identifier", AttrKind::Identifier),
    AttributeSpec::optional("title", AttrKind::String),
];

const RESPONSE_PROCESSING: &[AttributeSpec] = &[
    AttributeSpec::optional("template", AttrKind::Uri),
    AttributeSpec::optional("templateLocation", AttrKind::Uri),
];

const OUTCOME_TARGET: &[AttributeSpec] = &[AttributeSpec::required("identifier", AttrKind::Identifier)];

const ELEMENTS_ONLY: ContentModel = ContentModel::Elements(ChildRule::any());

/// One or more child elements (a fixed child such as an expression).
const REQUIRES_CHILD: ContentModel = ContentModel::Elements(ChildRule::at_least(1));

pub(crate) static ASSESSMENT_ITEM: ElementSpec = ElementSpec::new("assessmentItem", &[ITEM], ELEMENTS_ONLY);

pub(crate) static RESPONSE_DECLARATION: ElementSpec =
    ElementSpec::new("responseDeclaration", &[VARIABLE], ELEMENTS_ONLY);
pub(crate) static OUTCOME_DECLARATION: ElementSpec =
    ElementSpec::new("outcomeDeclaration", &[VARIABLE, OUTCOME], ELEMENTS_ONLY);
pub(crate) static DEFAULT_VALUE: ElementSpec = ElementSpec::new("defaultValue", &[INTERPRETATION], REQUIRES_CHILD);
pub(crate) static CORRECT_RESPONSE: ElementSpec =
    ElementSpec::new("correctResponse", &[INTERPRETATION], REQUIRES_CHILD);
pub(crate) static VALUE_ELEMENT: ElementSpec = ElementSpec::new("value", &[VALUE], ContentModel::Text);
pub(crate) static MAPPING_ELEMENT: ElementSpec = ElementSpec::new("mapping", &[MAPPING], REQUIRES_CHILD);
pub(crate) static MAP_ENTRY_ELEMENT: ElementSpec = ElementSpec::new("mapEntry", &[MAP_ENTRY], ContentModel::Empty);

pub(crate) static STYLESHEET_ELEMENT: ElementSpec =
    ElementSpec::new("stylesheet", &[STYLESHEET], ContentModel::Empty);
pub(crate) static ITEM_BODY: ElementSpec = ElementSpec::new("itemBody", &[BODY, DIR, ARIA], ELEMENTS_ONLY);
pub(crate) static MODAL_FEEDBACK_ELEMENT: ElementSpec = ElementSpec::new(
    "modalFeedback",
    &[MODAL_FEEDBACK],
    ContentModel::Mixed(ChildRule::any()),
);

pub(crate) static RESPONSE_PROCESSING_ELEMENT: ElementSpec =
    ElementSpec::new("responseProcessing", &[RESPONSE_PROCESSING], ELEMENTS_ONLY);
pub(crate) static RESPONSE_CONDITION: ElementSpec = ElementSpec::new("responseCondition", &[], REQUIRES_CHILD);
pub(crate) static RESPONSE_IF: ElementSpec = ElementSpec::new("responseIf", &[], REQUIRES_CHILD);
pub(crate) static RESPONSE_ELSE_IF: ElementSpec = ElementSpec::new("responseElseIf", &[], REQUIRES_CHILD);
pub(crate) static RESPONSE_ELSE: ElementSpec = ElementSpec::new("responseElse", &[], ELEMENTS_ONLY);
pub(crate) static SET_OUTCOME_VALUE: ElementSpec =
    ElementSpec::new("setOutcomeValue", &[OUTCOME_TARGET], REQUIRES_CHILD);
pub(crate) static EXIT_RESPONSE: ElementSpec = ElementSpec::new("exitResponse", &[], ContentModel::Empty);

pub(crate) static ELEMENTS: &[&ElementSpec] = &[
    &ASSESSMENT_ITEM,
    &RESPONSE_DECLARATION,
    &OUTCOME_DECLARATION,
    &DEFAULT_VALUE,
    &CORRECT_RESPONSE,
    &VALUE_ELEMENT,
    &MAPPING_ELEMENT,
    &MAP_ENTRY_ELEMENT,
    &STYLESHEET_ELEMENT,
    &ITEM_BODY,
    &MODAL_FEEDBACK_ELEMENT,
    &RESPONSE_PROCESSING_ELEMENT,
    &RESPONSE_CONDITION,
    &RESPONSE_IF,
    &RESPONSE_ELSE_IF,
    &RESPONSE_ELSE,
    &SET_OUTCOME_VALUE,
    &EXIT_RESPONSE,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_declaration_gates() {
        for name in ["externalScored", "variableIdentifierRef"] {
            let attr = OUTCOME_DECLARATION.attribute(name).unwrap();
            assert!(!attr.is_available(Version::V2_1_1));
            assert!(attr.is_available(Version::V2_2_0));
        }
        assert!(OUTCOME_DECLARATION.attribute("identifier").unwrap().required);
    }

    #[test]
    fn test_set_outcome_value_needs_expression() {
        assert_eq!(SET_OUTCOME_VALUE.content.min_children(), 1);
        assert_eq!(RESPONSE_ELSE.content.min_children(), 0);
    }
}
