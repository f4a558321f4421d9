use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::workflows::slides::domain::{ContentBlock, ElementRole, Template};

/// Characters one square canvas unit of element area typically holds at
/// deck body-text sizes.
const CHARS_PER_SQUARE_UNIT: f32 = 0.002;

/// The fixed set of matching criteria. Changing this set is a build-time
/// decision; there is no runtime registration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DimensionId {
    LayoutType,
    ContentType,
    Capacity,
    TitleStructure,
    TextStructure,
    TextAmount,
    Visual,
}

impl DimensionId {
    pub const ALL: [DimensionId; 7] = [
        DimensionId::LayoutType,
        DimensionId::ContentType,
        DimensionId::Capacity,
        DimensionId::TitleStructure,
        DimensionId::TextStructure,
        DimensionId::TextAmount,
        DimensionId::Visual,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            DimensionId::LayoutType => "layout_type",
            DimensionId::ContentType => "content_type",
            DimensionId::Capacity => "capacity",
            DimensionId::TitleStructure => "title_structure",
            DimensionId::TextStructure => "text_structure",
            DimensionId::TextAmount => "text_amount",
            DimensionId::Visual => "visual",
        }
    }
}

impl fmt::Display for DimensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DimensionId {
    type Err = UnknownDimension;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        DimensionId::ALL
            .iter()
            .copied()
            .find(|dimension| dimension.as_str() == value)
            .ok_or_else(|| UnknownDimension(value.to_string()))
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown dimension id '{0}'")]
pub struct UnknownDimension(pub String);

/// One independent matching criterion over a (content, template) pair.
///
/// Evaluators never fail for missing data: a pair the criterion cannot
/// judge reports unavailable and is renormalized away by the scoring
/// engine. `score` is only called when `is_available` returned true and
/// must stay within `[0, 1]`.
pub(crate) trait DimensionEvaluator: Send + Sync {
    fn id(&self) -> DimensionId;
    fn is_available(&self, content: &ContentBlock, template: &Template) -> bool;
    fn score(&self, content: &ContentBlock, template: &Template) -> f32;
}

pub(crate) fn evaluator_for(dimension: DimensionId) -> Box<dyn DimensionEvaluator> {
    match dimension {
        DimensionId::LayoutType => Box::new(LayoutTypeDimension),
        DimensionId::ContentType => Box::new(ContentTypeDimension),
        DimensionId::Capacity => Box::new(CapacityDimension),
        DimensionId::TitleStructure => Box::new(TitleStructureDimension),
        DimensionId::TextStructure => Box::new(TextStructureDimension),
        DimensionId::TextAmount => Box::new(TextAmountDimension),
        DimensionId::Visual => Box::new(VisualStyleDimension),
    }
}

/// Declared layout intent. An unannotated template scores neutral 0.5 so
/// incremental annotation of the library never punishes the laggards,
/// while a declared-and-wrong layout is a genuine mismatch signal.
struct LayoutTypeDimension;

impl DimensionEvaluator for LayoutTypeDimension {
    fn id(&self) -> DimensionId {
        DimensionId::LayoutType
    }

    fn is_available(&self, content: &ContentBlock, _template: &Template) -> bool {
        content.layout_type().is_some()
    }

    fn score(&self, content: &ContentBlock, template: &Template) -> f32 {
        let declared = match content.layout_type() {
            Some(layout) => layout,
            None => return 0.0,
        };
        match template.layout_type() {
            None => 0.5,
            Some(layout) if layout == declared => 1.0,
            Some(_) => 0.0,
        }
    }
}

/// Declared content category, same neutral/exact/mismatch pattern as
/// layout.
struct ContentTypeDimension;

impl DimensionEvaluator for ContentTypeDimension {
    fn id(&self) -> DimensionId {
        DimensionId::ContentType
    }

    fn is_available(&self, content: &ContentBlock, _template: &Template) -> bool {
        content.content_type().is_some()
    }

    fn score(&self, content: &ContentBlock, template: &Template) -> f32 {
        let declared = match content.content_type() {
            Some(category) => category,
            None => return 0.0,
        };
        match template.content_type() {
            None => 0.5,
            Some(category) if category == declared => 1.0,
            Some(_) => 0.0,
        }
    }
}

/// Graduated under-utilization score. Over-capacity pairs never reach this
/// evaluator: the candidate filter vetoes them before scoring.
struct CapacityDimension;

impl DimensionEvaluator for CapacityDimension {
    fn id(&self) -> DimensionId {
        DimensionId::Capacity
    }

    fn is_available(&self, _content: &ContentBlock, _template: &Template) -> bool {
        true
    }

    fn score(&self, content: &ContentBlock, template: &Template) -> f32 {
        let ratio = content.item_count() as f32 / template.item_capacity() as f32;
        if ratio >= 1.0 {
            1.0
        } else if ratio >= 0.8 {
            0.9
        } else if ratio >= 0.6 {
            0.7
        } else if ratio >= 0.4 {
            0.5
        } else {
            0.3
        }
    }
}

/// How well the content's item headings line up with the template's
/// `itemTitle` slots.
struct TitleStructureDimension;

impl DimensionEvaluator for TitleStructureDimension {
    fn id(&self) -> DimensionId {
        DimensionId::TitleStructure
    }

    fn is_available(&self, _content: &ContentBlock, _template: &Template) -> bool {
        true
    }

    fn score(&self, content: &ContentBlock, template: &Template) -> f32 {
        structural_ratio(
            content.titled_item_count(),
            template.elements_with_role(ElementRole::ItemTitle),
        )
    }
}

/// How well the content's item bodies line up with the template's body
/// slots (`item` and `content` roles).
struct TextStructureDimension;

impl DimensionEvaluator for TextStructureDimension {
    fn id(&self) -> DimensionId {
        DimensionId::TextStructure
    }

    fn is_available(&self, _content: &ContentBlock, _template: &Template) -> bool {
        true
    }

    fn score(&self, content: &ContentBlock, template: &Template) -> f32 {
        structural_ratio(content.texted_item_count(), template.body_slot_count())
    }
}

fn structural_ratio(content_count: usize, slot_count: usize) -> f32 {
    match (content_count, slot_count) {
        (0, 0) => 1.0,
        (_, 0) => 0.0,
        (a, b) => a.min(b) as f32 / a.max(b) as f32,
    }
}

/// Ratio of total content characters to the template's estimated text
/// capacity, bucketed. Malformed geometry on any text-bearing element
/// makes the dimension unavailable rather than aborting the match.
struct TextAmountDimension;

impl DimensionEvaluator for TextAmountDimension {
    fn id(&self) -> DimensionId {
        DimensionId::TextAmount
    }

    fn is_available(&self, _content: &ContentBlock, template: &Template) -> bool {
        template
            .elements
            .iter()
            .filter(|element| element.role.holds_text())
            .all(|element| element.frame.is_well_formed())
    }

    fn score(&self, content: &ContentBlock, template: &Template) -> f32 {
        let ratio = content.character_count() as f32 / estimated_text_capacity(template);
        if (0.7..=1.0).contains(&ratio) {
            1.0
        } else if (0.5..0.7).contains(&ratio) {
            0.8
        } else if (0.3..0.5).contains(&ratio) {
            0.6
        } else {
            0.4
        }
    }
}

fn estimated_text_capacity(template: &Template) -> f32 {
    let text_area: f32 = template
        .elements
        .iter()
        .filter(|element| element.role.holds_text())
        .map(|element| element.frame.area())
        .sum();
    (text_area * CHARS_PER_SQUARE_UNIT).max(1.0)
}

/// Visual style is a soft preference: a mismatch costs half a point, never
/// a full exclusion, and the dimension only participates when both sides
/// declared a style.
struct VisualStyleDimension;

impl DimensionEvaluator for VisualStyleDimension {
    fn id(&self) -> DimensionId {
        DimensionId::Visual
    }

    fn is_available(&self, content: &ContentBlock, template: &Template) -> bool {
        content.visual_style().is_some() && template.visual_style().is_some()
    }

    fn score(&self, content: &ContentBlock, template: &Template) -> f32 {
        if content.visual_style() == template.visual_style() {
            1.0
        } else {
            0.5
        }
    }
}
