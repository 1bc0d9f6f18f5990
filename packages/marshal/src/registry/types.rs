//! Types for the element registry system.

use std::fmt;

use crate::codec::AttrKind;
use crate::version::Version;

/// Package-like grouping of element types that are only reachable through
/// a container that names the group.
///
/// Members of a family are not bound in the registry's main table; the
/// child-type resolver finds them when the enclosing container lists the
/// family among its candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Family {
    /// Items of `ul`/`ol`.
    ListItems,
    /// Terms and definitions of `dl`.
    DefinitionItems,
    /// Table structure (`caption`, `thead`, `tr`, `td`, ...).
    TableContent,
    /// Choices of a choice interaction.
    Choices,
    /// `source`/`track` children of media elements.
    MediaSources,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ListItems => "list-items",
            Self::DefinitionItems => "definition-items",
            Self::TableContent => "table-content",
            Self::Choices => "choices",
            Self::MediaSources => "media-sources",
        })
    }
}

/// Constraints on an element's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildRule {
    /// Families searched, in priority order, for children the registry
    /// does not bind directly.
    pub families: &'static [Family],
    /// Minimum number of child elements.
    pub min: usize,
}

impl ChildRule {
    /// Any number of children, no candidate families.
    #[must_use]
    pub const fn any() -> Self {
        Self {
            families: &[],
            min: 0,
        }
    }

    #[must_use]
    pub const fn at_least(min: usize) -> Self {
        Self { families: &[], min }
    }

    #[must_use]
    pub const fn with_families(self, families: &'static [Family]) -> Self {
        Self { families, ..self }
    }
}

/// Classification of an element's content, deciding how the tree codec
/// walks its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentModel {
    /// Attributes only.
    Empty,
    /// Character data only (e.g. `<value>`).
    Text,
    /// Child elements only; whitespace between them is not content.
    Elements(ChildRule),
    /// Text runs interleaved with child elements.
    Mixed(ChildRule),
}

impl ContentModel {
    /// Candidate families for unbound children.
    #[must_use]
    pub fn families(&self) -> &'static [Family] {
        match self {
            Self::Elements(rule) | Self::Mixed(rule) => rule.families,
            Self::Empty | Self::Text => &[],
        }
    }

    /// Minimum number of child elements.
    #[must_use]
    pub fn min_children(&self) -> usize {
        match self {
            Self::Elements(rule) | Self::Mixed(rule) => rule.min,
            Self::Empty | Self::Text => 0,
        }
    }
}

/// Declaration of one attribute an element accepts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeSpec {
    pub name: &'static str,
    pub kind: AttrKind,
    pub required: bool,
    /// First version in which the attribute exists.
    pub since: Option<Version>,
    /// Value equivalent to omitting the attribute.
    pub default: Option<&'static str>,
}

impl AttributeSpec {
    #[must_use]
    pub const fn required(name: &'static str, kind: AttrKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            since: None,
            default: None,
        }
    }

    #[must_use]
    pub const fn optional(name: &'static str, kind: AttrKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            since: None,
            default: None,
        }
    }

    #[must_use]
    pub const fn since(self, version: Version) -> Self {
        Self {
            since: Some(version),
            ..self
        }
    }

    #[must_use]
    pub const fn with_default(self, default: &'static str) -> Self {
        Self {
            default: Some(default),
            ..self
        }
    }

    /// True when the attribute exists in `version`.
    #[must_use]
    pub fn is_available(&self, version: Version) -> bool {
        version.supports(self.since)
    }
}

/// Declarative description of one vocabulary element.
///
/// A single generic handler interprets an `ElementSpec` for a bound
/// version, so revisions differ only in the `since` gates and in which
/// spec an overlay registers.
#[derive(Debug)]
pub struct ElementSpec {
    pub local: &'static str,
    /// `None` for the base vocabulary.
    pub namespace: Option<&'static str>,
    /// First version in which the element exists.
    pub since: Option<Version>,
    /// Attribute groups, flattened in order for output.
    pub attributes: &'static [&'static [AttributeSpec]],
    pub content: ContentModel,
    /// At least one of these attributes must be present.
    pub one_of: &'static [&'static str],
}

impl ElementSpec {
    /// Base-vocabulary element with the given attributes and content.
    #[must_use]
    pub const fn new(
        local: &'static str,
        attributes: &'static [&'static [AttributeSpec]],
        content: ContentModel,
    ) -> Self {
        Self {
            local,
            namespace: None,
            since: None,
            attributes,
            content,
            one_of: &[],
        }
    }

    #[must_use]
    pub const fn in_namespace(self, namespace: &'static str) -> Self {
        Self {
            namespace: Some(namespace),
            ..self
        }
    }

    #[must_use]
    pub const fn since(self, version: Version) -> Self {
        Self {
            since: Some(version),
            ..self
        }
    }

    #[must_use]
    pub const fn requiring_one_of(self, names: &'static [&'static str]) -> Self {
        Self {
            one_of: names,
            ..self
        }
    }

    /// Iterate over all attribute declarations in output order.
    pub fn attribute_specs(&self) -> impl Iterator<Item = &'static AttributeSpec> {
        self.attributes.iter().flat_map(|group| group.iter())
    }

    /// Look up an attribute declaration by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&'static AttributeSpec> {
        self.attribute_specs().find(|a| a.name == name)
    }

    /// True when the element exists in `version`.
    #[must_use]
    pub fn is_available(&self, version: Version) -> bool {
        version.supports(self.since)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORE: &[AttributeSpec] = &[AttributeSpec::optional("id", AttrKind::Identifier)];
    const EXTRA: &[AttributeSpec] = &[
        AttributeSpec::required("src", AttrKind::Uri),
        AttributeSpec::optional("dir", AttrKind::Token(&["ltr", "rtl"])).since(Version::V2_2_0),
    ];
    static SPEC: ElementSpec = ElementSpec::new("img", &[CORE, EXTRA], ContentModel::Empty);

    #[test]
    fn test_attribute_specs_flatten_in_order() {
        let names: Vec<_> = SPEC.attribute_specs().map(|a| a.name).collect();
        assert_eq!(names, ["id", "src", "dir"]);
    }

    #[test]
    fn test_attribute_availability() {
        let dir = SPEC.attribute("dir").unwrap();
        assert!(!dir.is_available(Version::V2_1_1));
        assert!(dir.is_available(Version::V2_2_0));
        assert!(SPEC.attribute("src").unwrap().required);
        assert!(SPEC.attribute("alt").is_none());
    }

    #[test]
    fn test_element_availability() {
        static LATE: ElementSpec =
            ElementSpec::new("bdo", &[], ContentModel::Mixed(ChildRule::any())).since(Version::V2_2_0);
        assert!(!LATE.is_available(Version::V2_1_0));
        assert!(LATE.is_available(Version::V2_2_2));
        assert!(SPEC.is_available(Version::V2_1_0));
    }

    #[test]
    fn test_content_model_accessors() {
        let model = ContentModel::Elements(ChildRule::at_least(2).with_families(&[Family::TableContent]));
        assert_eq!(model.families(), &[Family::TableContent]);
        assert_eq!(model.min_children(), 2);
        assert!(ContentModel::Text.families().is_empty());
    }
}
