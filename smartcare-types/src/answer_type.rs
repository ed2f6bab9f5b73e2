use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The kind of answer a question expects, decoded from the answer's type IRI.
///
/// Determines how a question is rendered as a widget and how the user's
/// input is captured into a [`Response`](crate::Response).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerType {
    /// Free text entered by the user.
    Text,

    /// Pick any number of options.
    MultipleChoice,

    /// Pick exactly one option.
    SingleChoice,

    /// Pick one of two options (yes/no style).
    Dichotomous,

    /// A slider between two poles.
    BipolarQuestion,

    /// Ordered cumulative options, pick one.
    GuttmanScale,

    /// Agreement scale, pick one.
    LikertScale,

    /// A slider with tick labels over a numeric range.
    ContinuousScale,

    /// Any tag we do not recognize. Rendered as a plain single-choice list,
    /// never captured.
    Unknown,
}

impl AnswerType {
    /// All recognized answer types, in dispatch order.
    pub const KNOWN: [AnswerType; 8] = [
        AnswerType::Text,
        AnswerType::MultipleChoice,
        AnswerType::SingleChoice,
        AnswerType::BipolarQuestion,
        AnswerType::Dichotomous,
        AnswerType::GuttmanScale,
        AnswerType::LikertScale,
        AnswerType::ContinuousScale,
    ];

    /// Decode a short type tag, e.g. `"SingleChoise"`.
    ///
    /// The tags are the class names used by the smart space ontology,
    /// including its spelling of "choice".
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Text" => Self::Text,
            "MultipleChoise" => Self::MultipleChoice,
            "SingleChoise" => Self::SingleChoice,
            "BipolarQuestion" => Self::BipolarQuestion,
            "Dichotomous" => Self::Dichotomous,
            "GuttmanScale" => Self::GuttmanScale,
            "LikertScale" => Self::LikertScale,
            "ContinuousScale" => Self::ContinuousScale,
            _ => Self::Unknown,
        }
    }

    /// Decode a full type IRI such as `"http://oss.fruct.org/smartcare#Text"`.
    pub fn from_iri(iri: &str) -> Self {
        Self::from_tag(type_fragment(iri))
    }

    /// The ontology tag for this type. `Unknown` has no tag of its own.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::MultipleChoice => "MultipleChoise",
            Self::SingleChoice => "SingleChoise",
            Self::Dichotomous => "Dichotomous",
            Self::BipolarQuestion => "BipolarQuestion",
            Self::GuttmanScale => "GuttmanScale",
            Self::LikertScale => "LikertScale",
            Self::ContinuousScale => "ContinuousScale",
            Self::Unknown => "Unknown",
        }
    }

    /// Types whose response carries exactly one synthesized value.
    pub fn is_single_value(&self) -> bool {
        matches!(
            self,
            Self::Text | Self::BipolarQuestion | Self::ContinuousScale
        )
    }

    /// Types whose response carries one snapshot per selected option.
    pub fn is_multi_value(&self) -> bool {
        matches!(
            self,
            Self::SingleChoice
                | Self::MultipleChoice
                | Self::GuttmanScale
                | Self::LikertScale
                | Self::Dichotomous
        )
    }

    /// Whether more than one option may be selected at once.
    pub fn allows_multiple(&self) -> bool {
        matches!(self, Self::MultipleChoice)
    }

    /// Slider-backed types read their bounds from the first two items.
    pub fn is_slider(&self) -> bool {
        matches!(self, Self::BipolarQuestion | Self::ContinuousScale)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl fmt::Display for AnswerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Return the fragment after the last `#` of an IRI-like string.
///
/// A string without `#` is returned unchanged.
pub fn type_fragment(iri: &str) -> &str {
    match iri.rsplit_once('#') {
        Some((_, fragment)) => fragment,
        None => iri,
    }
}

/// An answer type as it appears on the wire, plus its decoded form.
///
/// The raw IRI is kept so that a questionnaire serializes back exactly as it
/// was read; the [`AnswerType`] is decoded once when the tag is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeTag {
    iri: String,
    kind: AnswerType,
}

impl TypeTag {
    /// Create a tag from a type IRI (or a bare tag).
    pub fn new(iri: impl Into<String>) -> Self {
        let iri = iri.into();
        let kind = AnswerType::from_iri(&iri);
        Self { iri, kind }
    }

    /// The raw IRI as received.
    pub fn iri(&self) -> &str {
        &self.iri
    }

    /// The short type name, i.e. the IRI fragment.
    pub fn name(&self) -> &str {
        type_fragment(&self.iri)
    }

    /// The decoded answer type.
    pub fn kind(&self) -> AnswerType {
        self.kind
    }
}

/// A missing type decodes as [`AnswerType::Unknown`].
impl Default for TypeTag {
    fn default() -> Self {
        Self::new("")
    }
}

impl From<&str> for TypeTag {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TypeTag {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<AnswerType> for TypeTag {
    fn from(kind: AnswerType) -> Self {
        Self::new(kind.tag())
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.iri)
    }
}

impl Serialize for TypeTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.iri)
    }
}

impl<'de> Deserialize<'de> for TypeTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let iri = String::deserialize(deserializer)?;
        Ok(Self::new(iri))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_of_compound_iri() {
        assert_eq!(type_fragment("http://x#Foo"), "Foo");
        assert_eq!(
            type_fragment("http://oss.fruct.org/smartcare#SingleChoise"),
            "SingleChoise"
        );
    }

    #[test]
    fn fragment_uses_last_separator() {
        assert_eq!(type_fragment("a#b#LikertScale"), "LikertScale");
    }

    #[test]
    fn bare_string_is_its_own_fragment() {
        assert_eq!(type_fragment("Text"), "Text");
        assert_eq!(type_fragment(""), "");
    }

    #[test]
    fn decode_every_known_tag() {
        for kind in AnswerType::KNOWN {
            assert_eq!(AnswerType::from_tag(kind.tag()), kind);
            let iri = format!("http://oss.fruct.org/smartcare#{}", kind.tag());
            assert_eq!(AnswerType::from_iri(&iri), kind);
        }
    }

    #[test]
    fn unrecognized_tag_is_unknown() {
        assert_eq!(AnswerType::from_tag("SingleChoice"), AnswerType::Unknown);
        assert_eq!(AnswerType::from_iri("http://x#Ranking"), AnswerType::Unknown);
        assert!(AnswerType::Unknown.is_unknown());
    }

    #[test]
    fn value_classes_partition_known_types() {
        for kind in AnswerType::KNOWN {
            assert_ne!(kind.is_single_value(), kind.is_multi_value(), "{kind}");
        }
        assert!(!AnswerType::Unknown.is_single_value());
        assert!(!AnswerType::Unknown.is_multi_value());
    }

    #[test]
    fn type_tag_keeps_raw_iri() {
        let tag = TypeTag::new("http://oss.fruct.org/smartcare#ContinuousScale");
        assert_eq!(tag.name(), "ContinuousScale");
        assert_eq!(tag.kind(), AnswerType::ContinuousScale);
        assert_eq!(tag.iri(), "http://oss.fruct.org/smartcare#ContinuousScale");
    }

    #[test]
    fn type_tag_serializes_as_string() {
        let tag = TypeTag::new("http://x#Text");
        let json = serde_json::to_string(&tag).unwrap();
        assert_eq!(json, "\"http://x#Text\"");

        let back: TypeTag = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tag);
        assert_eq!(back.kind(), AnswerType::Text);
    }

    #[test]
    fn type_tag_from_answer_type() {
        let tag = TypeTag::from(AnswerType::SingleChoice);
        assert_eq!(tag.iri(), "SingleChoise");
        assert_eq!(tag.kind(), AnswerType::SingleChoice);

        let unknown = TypeTag::from(AnswerType::Unknown);
        assert_eq!(unknown.kind(), AnswerType::Unknown);
    }
}
