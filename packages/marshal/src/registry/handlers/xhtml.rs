//! XHTML content subset used inside item bodies, prompts and feedback.
//!
//! Also defines the attribute groups shared by every body element.

use crate::codec::AttrKind;
use crate::registry::types::{AttributeSpec, ChildRule, ContentModel, ElementSpec, Family};
use crate::version::Version;

/// Attributes common to all body elements.
pub(crate) const BODY: &[AttributeSpec] = &[
    AttributeSpec::optional("id", AttrKind::Identifier),
    AttributeSpec::optional("class", AttrKind::List),
    AttributeSpec::optional("xml:lang", AttrKind::String),
    AttributeSpec::optional("label", AttrKind::String),
];

const DIRECTIONS: &[&str] = &["ltr", "rtl", "auto"];

pub(crate) const DIR: &[AttributeSpec] = &[AttributeSpec::optional("dir", AttrKind::Token(DIRECTIONS))
    .since(Version::V2_2_0)
    .with_default("auto")];

pub(crate) const ARIA: &[AttributeSpec] = &[
    AttributeSpec::optional("aria-label", AttrKind::String).since(Version::V2_2_1),
    AttributeSpec::optional("aria-hidden", AttrKind::Boolean)
        .since(Version::V2_2_1)
        .with_default("false"),
];

const CITE: &[AttributeSpec] = &[AttributeSpec::optional("cite", AttrKind::Uri)];

const ANCHOR: &[AttributeSpec] = &[
    AttributeSpec::required("href", AttrKind::Uri),
    AttributeSpec::optional("type", AttrKind::String),
];

const IMAGE: &[AttributeSpec] = &[
    AttributeSpec::required("src", AttrKind::Uri),
    AttributeSpec::required("alt", AttrKind::String),
    AttributeSpec::optional("longdesc", AttrKind::Uri),
    AttributeSpec::optional("height", AttrKind::String),
    AttributeSpec::optional("width", AttrKind::String),
];

const IMAGE_OPTIONAL_ALT: &[AttributeSpec] = &[
    AttributeSpec::required("src", AttrKind::Uri),
    AttributeSpec::optional("alt", AttrKind::String),
    AttributeSpec::optional("longdesc", AttrKind::Uri),
    AttributeSpec::optional("height", AttrKind::String),
    AttributeSpec::optional("width", AttrKind::String),
];

const BDO_DIR: &[AttributeSpec] = &[AttributeSpec::required("dir", AttrKind::Token(DIRECTIONS))];

const TABLE: &[AttributeSpec] = &[AttributeSpec::optional("summary", AttrKind::String)];

const SPAN: &[AttributeSpec] = &[AttributeSpec::optional("span", AttrKind::Integer)];

const CELL: &[AttributeSpec] = &[
    AttributeSpec::optional("headers", AttrKind::List),
    AttributeSpec::optional("scope", AttrKind::Token(&["row", "col", "rowgroup", "colgroup"])),
    AttributeSpec::optional("abbr", AttrKind::String),
    AttributeSpec::optional("axis", AttrKind::String),
    AttributeSpec::optional("rowspan", AttrKind::Integer),
    AttributeSpec::optional("colspan", AttrKind::Integer),
];

const PRINTED_VARIABLE: &[AttributeSpec] = &[
    AttributeSpec::required("identifier", AttrKind::Identifier),
    AttributeSpec::optional("format", AttrKind::String),
    AttributeSpec::optional("base", AttrKind::Integer),
    AttributeSpec::optional("index", AttrKind::Integer),
    AttributeSpec::optional("powerForm", AttrKind::Boolean),
    AttributeSpec::optional("field", AttrKind::String),
    AttributeSpec::optional("delimiter", AttrKind::String),
    AttributeSpec::optional("mappingIndicator", AttrKind::String),
];

const MIXED: ContentModel = ContentModel::Mixed(ChildRule::any());

pub(crate) static DIV: ElementSpec = ElementSpec::new("div", &[BODY, DIR, ARIA], MIXED);
pub(crate) static P: ElementSpec = ElementSpec::new("p", &[BODY, DIR, ARIA], MIXED);
pub(crate) static SPAN_ELEMENT: ElementSpec = ElementSpec::new("span", &[BODY, DIR, ARIA], MIXED);
pub(crate) static EM: ElementSpec = ElementSpec::new("em", &[BODY, DIR, ARIA], MIXED);
pub(crate) static STRONG: ElementSpec = ElementSpec::new("strong", &[BODY, DIR, ARIA], MIXED);
pub(crate) static B: ElementSpec = ElementSpec::new("b", &[BODY, DIR, ARIA], MIXED);
pub(crate) static I: ElementSpec = ElementSpec::new("i", &[BODY, DIR, ARIA], MIXED);
pub(crate) static SUB: ElementSpec = ElementSpec::new("sub", &[BODY, DIR, ARIA], MIXED);
pub(crate) static SUP: ElementSpec = ElementSpec::new("sup", &[BODY, DIR, ARIA], MIXED);
pub(crate) static CODE: ElementSpec = ElementSpec::new("code", &[BODY, DIR, ARIA], MIXED);
pub(crate) static PRE: ElementSpec = ElementSpec::new("pre", &[BODY, DIR, ARIA], MIXED);
pub(crate) static BLOCKQUOTE: ElementSpec = ElementSpec::new("blockquote", &[BODY, CITE, DIR, ARIA], MIXED);
pub(crate) static H1: ElementSpec = ElementSpec::new("h1", &[BODY, DIR, ARIA], MIXED);
pub(crate) static H2: ElementSpec = ElementSpec::new("h2", &[BODY, DIR, ARIA], MIXED);
pub(crate) static H3: ElementSpec = ElementSpec::new("h3", &[BODY, DIR, ARIA], MIXED);
pub(crate) static H4: ElementSpec = ElementSpec::new("h4", &[BODY, DIR, ARIA], MIXED);
pub(crate) static H5: ElementSpec = ElementSpec::new("h5", &[BODY, DIR, ARIA], MIXED);
pub(crate) static H6: ElementSpec = ElementSpec::new("h6", &[BODY, DIR, ARIA], MIXED);
pub(crate) static A: ElementSpec = ElementSpec::new("a", &[BODY, ANCHOR, DIR, ARIA], MIXED);
pub(crate) static BR: ElementSpec = ElementSpec::new("br", &[BODY], ContentModel::Empty);
pub(crate) static HR: ElementSpec = ElementSpec::new("hr", &[BODY], ContentModel::Empty);

pub(crate) static IMG: ElementSpec = ElementSpec::new("img", &[BODY, IMAGE, ARIA], ContentModel::Empty);

/// `img` from 2.2.0 on: `alt` is no longer mandatory.
pub(crate) static IMG_V2P2: ElementSpec =
    ElementSpec::new("img", &[BODY, IMAGE_OPTIONAL_ALT, ARIA], ContentModel::Empty);

/// Bidirectional override; does not exist before 2.2.0.
pub(crate) static BDO: ElementSpec = ElementSpec::new("bdo", &[BODY, BDO_DIR, ARIA], MIXED).since(Version::V2_2_0);

// Lists, reached through their containers.
pub(crate) static UL: ElementSpec = ElementSpec::new(
    "ul",
    &[BODY, DIR, ARIA],
    ContentModel::Elements(ChildRule::at_least(1).with_families(&[Family::ListItems])),
);
pub(crate) static OL: ElementSpec = ElementSpec::new(
    "ol",
    &[BODY, DIR, ARIA],
    ContentModel::Elements(ChildRule::at_least(1).with_families(&[Family::ListItems])),
);
pub(crate) static LI: ElementSpec = ElementSpec::new("li", &[BODY, DIR, ARIA], MIXED);

pub(crate) static DL: ElementSpec = ElementSpec::new(
    "dl",
    &[BODY, DIR, ARIA],
    ContentModel::Elements(ChildRule::at_least(1).with_families(&[Family::DefinitionItems])),
);
pub(crate) static DT: ElementSpec = ElementSpec::new("dt", &[BODY, DIR, ARIA], MIXED);
pub(crate) static DD: ElementSpec = ElementSpec::new("dd", &[BODY, DIR, ARIA], MIXED);

// Tables. Only `table` itself is bound directly; everything below it is
// resolved through the table-content family.
const TABLE_PARTS: ChildRule = ChildRule::at_least(1).with_families(&[Family::TableContent]);

pub(crate) static TABLE_ELEMENT: ElementSpec =
    ElementSpec::new("table", &[BODY, TABLE, DIR, ARIA], ContentModel::Elements(TABLE_PARTS));
pub(crate) static CAPTION: ElementSpec = ElementSpec::new("caption", &[BODY, DIR, ARIA], MIXED);
pub(crate) static COLGROUP: ElementSpec = ElementSpec::new(
    "colgroup",
    &[BODY, SPAN],
    ContentModel::Elements(ChildRule::any().with_families(&[Family::TableContent])),
);
pub(crate) static COL: ElementSpec = ElementSpec::new("col", &[BODY, SPAN], ContentModel::Empty);
pub(crate) static THEAD: ElementSpec = ElementSpec::new("thead", &[BODY], ContentModel::Elements(TABLE_PARTS));
pub(crate) static TBODY: ElementSpec = ElementSpec::new("tbody", &[BODY], ContentModel::Elements(TABLE_PARTS));
pub(crate) static TFOOT: ElementSpec = ElementSpec::new("tfoot", &[BODY], ContentModel::Elements(TABLE_PARTS));
pub(crate) static TR: ElementSpec = ElementSpec::new("tr", &[BODY], ContentModel::Elements(TABLE_PARTS));
pub(crate) static TD: ElementSpec = ElementSpec::new("td", &[BODY, CELL, DIR, ARIA], MIXED);
pub(crate) static TH: ElementSpec = ElementSpec::new("th", &[BODY, CELL, DIR, ARIA], MIXED);

pub(crate) static PRINTED_VARIABLE_ELEMENT: ElementSpec =
    ElementSpec::new("printedVariable", &[BODY, PRINTED_VARIABLE], ContentModel::Empty);

/// Elements bound directly in the base registry.
pub(crate) static ELEMENTS: &[&ElementSpec] = &[
    &DIV,
    &P,
    &SPAN_ELEMENT,
    &EM,
    &STRONG,
    &B,
    &I,
    &SUB,
    &SUP,
    &CODE,
    &PRE,
    &BLOCKQUOTE,
    &H1,
    &H2,
    &H3,
    &H4,
    &H5,
    &H6,
    &A,
    &BR,
    &HR,
    &IMG,
    &BDO,
    &UL,
    &OL,
    &DL,
    &TABLE_ELEMENT,
    &PRINTED_VARIABLE_ELEMENT,
];

/// Elements only reachable through their container's families.
pub(crate) static FAMILY_MEMBERS: &[(Family, &ElementSpec)] = &[
    (Family::ListItems, &LI),
    (Family::DefinitionItems, &DT),
    (Family::DefinitionItems, &DD),
    (Family::TableContent, &CAPTION),
    (Family::TableContent, &COLGROUP),
    (Family::TableContent, &COL),
    (Family::TableContent, &THEAD),
    (Family::TableContent, &TBODY),
    (Family::TableContent, &TFOOT),
    (Family::TableContent, &TR),
    (Family::TableContent, &TD),
    (Family::TableContent, &TH),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_groups_are_gated() {
        let dir = P.attribute("dir").unwrap();
        assert_eq!(dir.since, Some(Version::V2_2_0));
        assert_eq!(dir.default, Some("auto"));

        assert!(P
            .attribute_specs()
            .filter(|a| a.name.starts_with("aria-"))
            .all(|a| a.since == Some(Version::V2_2_1)));
    }

    #[test]
    fn test_img_alt_relaxed() {
        assert!(IMG.attribute("alt").unwrap().required);
        assert!(!IMG_V2P2.attribute("alt").unwrap().required);
    }

    #[test]
    fn test_family_members_not_bound_directly() {
        for (_, member) in FAMILY_MEMBERS {
            assert!(
                !ELEMENTS.iter().any(|spec| spec.local == member.local),
                "{} listed twice",
                member.local
            );
        }
    }
}
