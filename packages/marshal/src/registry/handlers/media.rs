//! HTML5 media sub-vocabulary, bound to its own namespace from 2.2.0.

use super::xhtml::{ARIA, BODY};
use crate::codec::AttrKind;
use crate::config::MEDIA_NAMESPACE;
use crate::registry::types::{AttributeSpec, ChildRule, ContentModel, ElementSpec, Family};
use crate::version::Version;

const CROSSORIGIN: &[&str] = &["anonymous", "use-credentials"];

const PLAYBACK: &[AttributeSpec] = &[
    AttributeSpec::optional("src", AttrKind::Uri),
    AttributeSpec::optional("autoplay", AttrKind::Boolean).with_default("false"),
    AttributeSpec::optional("controls", AttrKind::Boolean).with_default("false"),
    AttributeSpec::optional("crossorigin", AttrKind::Token(CROSSORIGIN)),
    AttributeSpec::optional("loop", AttrKind::Boolean).with_default("false"),
    AttributeSpec::optional("mediagroup", AttrKind::String),
    AttributeSpec::optional("muted", AttrKind::Boolean).with_default("false"),
    AttributeSpec::optional("preload", AttrKind::Token(&["none", "auto", "metadata"])),
];

const VIDEO: &[AttributeSpec] = &[
    AttributeSpec::optional("poster", AttrKind::Uri),
    AttributeSpec::optional("height", AttrKind::String),
    AttributeSpec::optional("width", AttrKind::String),
];

const SOURCE: &[AttributeSpec] = &[
    AttributeSpec::required("src", AttrKind::Uri),
    AttributeSpec::optional("type", AttrKind::String),
];

const TRACK: &[AttributeSpec] = &[
    AttributeSpec::required("src", AttrKind::Uri),
    AttributeSpec::optional(
        "kind",
        AttrKind::Token(&["subtitles", "captions", "descriptions", "chapters", "metadata"]),
    )
    .with_default("subtitles"),
    AttributeSpec::optional("srclang", AttrKind::String),
    AttributeSpec::optional("label", AttrKind::String),
    AttributeSpec::optional("default", AttrKind::Boolean).with_default("false"),
];

const SOURCES: ContentModel = ContentModel::Elements(ChildRule::any().with_families(&[Family::MediaSources]));

pub(crate) static AUDIO: ElementSpec = ElementSpec::new("audio", &[BODY, PLAYBACK, ARIA], SOURCES)
    .in_namespace(MEDIA_NAMESPACE)
    .since(Version::V2_2_0);

pub(crate) static VIDEO_ELEMENT: ElementSpec = ElementSpec::new("video", &[BODY, PLAYBACK, VIDEO, ARIA], SOURCES)
    .in_namespace(MEDIA_NAMESPACE)
    .since(Version::V2_2_0);

pub(crate) static SOURCE_ELEMENT: ElementSpec = ElementSpec::new("source", &[SOURCE], ContentModel::Empty)
    .in_namespace(MEDIA_NAMESPACE)
    .since(Version::V2_2_0);

pub(crate) static TRACK_ELEMENT: ElementSpec = ElementSpec::new("track", &[TRACK], ContentModel::Empty)
    .in_namespace(MEDIA_NAMESPACE)
    .since(Version::V2_2_0);

pub(crate) static ELEMENTS: &[&ElementSpec] = &[&AUDIO, &VIDEO_ELEMENT];

pub(crate) static FAMILY_MEMBERS: &[(Family, &ElementSpec)] = &[
    (Family::MediaSources, &SOURCE_ELEMENT),
    (Family::MediaSources, &TRACK_ELEMENT),
];
