//! Interactions and their choices.

use super::xhtml::{ARIA, BODY, DIR};
use crate::codec::AttrKind;
use crate::registry::types::{AttributeSpec, ChildRule, ContentModel, ElementSpec, Family};

const RESPONSE: &[AttributeSpec] = &[AttributeSpec::required("responseIdentifier", AttrKind::Identifier)];

const CHOICE_INTERACTION: &[AttributeSpec] = &[
    AttributeSpec::required("shuffle", AttrKind::Boolean),
    AttributeSpec::optional("maxChoices", AttrKind::Integer).with_default("1"),
    AttributeSpec::optional("minChoices", AttrKind::Integer),
    AttributeSpec::optional("orientation", AttrKind::Token(&["vertical", "horizontal"])),
];

const SIMPLE_CHOICE: &[AttributeSpec] = &[
    AttributeSpec::required("identifier", AttrKind::Identifier),
    AttributeSpec::optional("fixed", AttrKind::Boolean),
    AttributeSpec::optional("templateIdentifier", AttrKind::Identifier),
    AttributeSpec::optional("showHide", AttrKind::Token(&["show", "hide"])),
];

const TEXT_ENTRY: &[AttributeSpec] = &[
    AttributeSpec::optional("base", AttrKind::Integer),
    AttributeSpec::optional("stringIdentifier", AttrKind::Identifier),
    AttributeSpec::optional("expectedLength", AttrKind::Integer),
    AttributeSpec::optional("patternMask", AttrKind::String),
    AttributeSpec::optional("placeholderText", AttrKind::String),
];

const EXTENDED_TEXT: &[AttributeSpec] = &[
    AttributeSpec::optional("maxStrings", AttrKind::Integer),
    AttributeSpec::optional("minStrings", AttrKind::Integer),
    AttributeSpec::optional("expectedLines", AttrKind::Integer),
    AttributeSpec::optional("format", AttrKind::Token(&["plain", "preFormatted", "xhtml"])),
];

pub(crate) static CHOICE_INTERACTION_ELEMENT: ElementSpec = ElementSpec::new(
    "choiceInteraction",
    &[BODY, RESPONSE, CHOICE_INTERACTION, ARIA],
    ContentModel::Elements(ChildRule::at_least(1).with_families(&[Family::Choices])),
);

pub(crate) static PROMPT: ElementSpec = ElementSpec::new("prompt", &[BODY, DIR, ARIA], ContentModel::Mixed(ChildRule::any()));

pub(crate) static SIMPLE_CHOICE_ELEMENT: ElementSpec = ElementSpec::new(
    "simpleChoice",
    &[BODY, SIMPLE_CHOICE, DIR, ARIA],
    ContentModel::Mixed(ChildRule::any()),
);

pub(crate) static TEXT_ENTRY_INTERACTION: ElementSpec = ElementSpec::new(
    "textEntryInteraction",
    &[BODY, RESPONSE, TEXT_ENTRY, ARIA],
    ContentModel::Empty,
);

pub(crate) static EXTENDED_TEXT_INTERACTION: ElementSpec = ElementSpec::new(
    "extendedTextInteraction",
    &[BODY, RESPONSE, TEXT_ENTRY, EXTENDED_TEXT, ARIA],
    ContentModel::Elements(ChildRule::any()),
);

pub(crate) static ELEMENTS: &[&ElementSpec] = &[
    &CHOICE_INTERACTION_ELEMENT,
    &PROMPT,
    &TEXT_ENTRY_INTERACTION,
    &EXTENDED_TEXT_INTERACTION,
];

pub(crate) static FAMILY_MEMBERS: &[(Family, &ElementSpec)] = &[(Family::Choices, &SIMPLE_CHOICE_ELEMENT)];
