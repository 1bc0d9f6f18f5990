//! Response-processing expressions.

use super::item::BASE_TYPES;
use crate::codec::AttrKind;
use crate::registry::types::{AttributeSpec, ChildRule, ContentModel, ElementSpec};

const IDENTIFIER: &[AttributeSpec] = &[AttributeSpec::required("identifier", AttrKind::Identifier)];

const VARIABLE: &[AttributeSpec] = &[
    AttributeSpec::required("identifier", AttrKind::Identifier),
    AttributeSpec::optional("weightIdentifier", AttrKind::Identifier),
];

const BASE_VALUE: &[AttributeSpec] = &[AttributeSpec::required("baseType", AttrKind::Token(BASE_TYPES))];

const EQUAL: &[AttributeSpec] = &[
    AttributeSpec::optional("toleranceMode", AttrKind::Token(&["exact", "absolute", "relative"])),
    AttributeSpec::optional("tolerance", AttrKind::List),
    AttributeSpec::optional("includeLowerBound", AttrKind::Boolean),
    AttributeSpec::optional("includeUpperBound", AttrKind::Boolean),
];

const CUSTOM_OPERATOR: &[AttributeSpec] = &[
    AttributeSpec::optional("class", AttrKind::String),
    AttributeSpec::optional("definition", AttrKind::Uri),
];

const OPERANDS: ContentModel = ContentModel::Elements(ChildRule::at_least(1));
const PAIR: ContentModel = ContentModel::Elements(ChildRule::at_least(2));

pub(crate) static DEFAULT: ElementSpec = ElementSpec::new("default", &[IDENTIFIER], ContentModel::Empty);
pub(crate) static VARIABLE_ELEMENT: ElementSpec = ElementSpec::new("variable", &[VARIABLE], ContentModel::Empty);
pub(crate) static CORRECT: ElementSpec = ElementSpec::new("correct", &[IDENTIFIER], ContentModel::Empty);
pub(crate) static BASE_VALUE_ELEMENT: ElementSpec = ElementSpec::new("baseValue", &[BASE_VALUE], ContentModel::Text);
pub(crate) static NULL: ElementSpec = ElementSpec::new("null", &[], ContentModel::Empty);
pub(crate) static MAP_RESPONSE: ElementSpec = ElementSpec::new("mapResponse", &[IDENTIFIER], ContentModel::Empty);

pub(crate) static IS_NULL: ElementSpec = ElementSpec::new("isNull", &[], OPERANDS);
pub(crate) static MATCH: ElementSpec = ElementSpec::new("match", &[], PAIR);
pub(crate) static SUM: ElementSpec = ElementSpec::new("sum", &[], OPERANDS);
pub(crate) static AND: ElementSpec = ElementSpec::new("and", &[], OPERANDS);
pub(crate) static OR: ElementSpec = ElementSpec::new("or", &[], OPERANDS);
pub(crate) static NOT: ElementSpec = ElementSpec::new("not", &[], OPERANDS);
pub(crate) static EQUAL_ELEMENT: ElementSpec = ElementSpec::new("equal", &[EQUAL], PAIR);

/// Extension operator, identified by an implementation class or a
/// definition URI.
pub(crate) static CUSTOM_OPERATOR_ELEMENT: ElementSpec = ElementSpec::new(
    "customOperator",
    &[CUSTOM_OPERATOR],
    ContentModel::Elements(ChildRule::any()),
)
.requiring_one_of(&["class", "definition"]);

pub(crate) static ELEMENTS: &[&ElementSpec] = &[
    &DEFAULT,
    &VARIABLE_ELEMENT,
    &CORRECT,
    &BASE_VALUE_ELEMENT,
    &NULL,
    &MAP_RESPONSE,
    &IS_NULL,
    &MATCH,
    &SUM,
    &AND,
    &OR,
    &NOT,
    &EQUAL_ELEMENT,
    &CUSTOM_OPERATOR_ELEMENT,
];
