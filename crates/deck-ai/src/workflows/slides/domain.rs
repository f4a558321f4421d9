use serde::{Deserialize, Serialize};

/// Identifier wrapper for templates in the pool.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateId(pub String);

/// One slide's worth of AI-generated content, optionally tagged with the
/// generator's declared semantic intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBlock {
    pub title: String,
    #[serde(default)]
    pub items: Vec<ContentItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_features: Option<SemanticFeatures>,
}

impl ContentBlock {
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Items carrying a non-empty heading of their own.
    pub(crate) fn titled_item_count(&self) -> usize {
        self.items.iter().filter(|item| item.has_title()).count()
    }

    /// Items carrying non-empty body text.
    pub(crate) fn texted_item_count(&self) -> usize {
        self.items.iter().filter(|item| item.has_text()).count()
    }

    /// Total characters across the title and every item.
    pub(crate) fn character_count(&self) -> usize {
        let item_chars: usize = self
            .items
            .iter()
            .map(|item| {
                item.title.as_deref().map_or(0, |t| t.chars().count())
                    + item.text.as_deref().map_or(0, |t| t.chars().count())
            })
            .sum();
        self.title.chars().count() + item_chars
    }

    pub fn layout_type(&self) -> Option<&str> {
        self.semantic_features
            .as_ref()
            .and_then(|features| features.layout_type.as_deref())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.semantic_features
            .as_ref()
            .map(|features| features.content_type.as_str())
    }

    pub fn visual_style(&self) -> Option<&str> {
        self.semantic_features
            .as_ref()
            .and_then(|features| features.visual_style.as_deref())
    }
}

/// One bullet-level entry within a slide. Both fields are optional; the
/// generator frequently emits body text without a heading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ContentItem {
    pub(crate) fn has_title(&self) -> bool {
        self.title
            .as_deref()
            .is_some_and(|title| !title.trim().is_empty())
    }

    pub(crate) fn has_text(&self) -> bool {
        self.text
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty())
    }
}

/// Semantic tags the content generator attaches when it has an opinion
/// about presentation. Absent end-to-end for plain text generations; the
/// engine treats that absence as a first-class state, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticFeatures {
    pub content_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_style: Option<String>,
}

/// A reusable visual layout: an ordered collection of role-tagged
/// placeholder elements, optionally annotated by the template author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: TemplateId,
    pub elements: Vec<TemplateElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<TemplateAnnotation>,
}

impl Template {
    /// Declared slot capacity: the number of `item`-role elements, never
    /// below 1 so capacity ratios stay well defined.
    pub fn item_capacity(&self) -> usize {
        self.elements_with_role(ElementRole::Item).max(1)
    }

    pub(crate) fn elements_with_role(&self, role: ElementRole) -> usize {
        self.elements
            .iter()
            .filter(|element| element.role == role)
            .count()
    }

    /// Slots that hold item body text: `item` and `content` roles.
    pub(crate) fn body_slot_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|element| {
                matches!(element.role, ElementRole::Item | ElementRole::Content)
            })
            .count()
    }

    pub fn layout_type(&self) -> Option<&str> {
        self.annotation
            .as_ref()
            .and_then(|annotation| annotation.layout_type.as_deref())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.annotation
            .as_ref()
            .and_then(|annotation| annotation.content_type.as_deref())
    }

    pub fn visual_style(&self) -> Option<&str> {
        self.annotation
            .as_ref()
            .and_then(|annotation| annotation.visual_style.as_deref())
    }
}

/// A placeholder within a template, tagged with the role the rendering
/// layer substitutes content into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateElement {
    pub role: ElementRole,
    pub frame: ElementFrame,
}

/// Element geometry in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementFrame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ElementFrame {
    pub(crate) fn area(&self) -> f32 {
        (self.width * self.height).max(0.0)
    }

    pub(crate) fn is_well_formed(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }
}

/// Closed set of placeholder roles a template element may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementRole {
    Title,
    Subtitle,
    ItemTitle,
    Item,
    Content,
    Image,
    Decoration,
}

impl ElementRole {
    pub const fn label(self) -> &'static str {
        match self {
            ElementRole::Title => "title",
            ElementRole::Subtitle => "subtitle",
            ElementRole::ItemTitle => "itemTitle",
            ElementRole::Item => "item",
            ElementRole::Content => "content",
            ElementRole::Image => "image",
            ElementRole::Decoration => "decoration",
        }
    }

    /// Whether substituted text lands in this element.
    pub(crate) const fn holds_text(self) -> bool {
        matches!(
            self,
            ElementRole::Title
                | ElementRole::Subtitle
                | ElementRole::ItemTitle
                | ElementRole::Item
                | ElementRole::Content
        )
    }
}

/// Author-declared intent for a template. Every field is optional; part of
/// the library is annotated incrementally and unannotated templates must
/// not be punished for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateAnnotation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_style: Option<String>,
}
