use crate::workflows::slides::domain::{ContentBlock, Template};

/// Hard capacity veto: a template whose declared slot capacity cannot hold
/// every content item must never be masked by other dimensions scoring
/// well, so it is excluded before scoring instead of merely penalized.
pub(crate) fn capacity_sufficient(content: &ContentBlock, template: &Template) -> bool {
    content.item_count() <= template.item_capacity()
}

/// Survivors keep the pool's original order; the engine's first-seen
/// tie-break depends on it.
pub(crate) fn filter_candidates<'a>(
    content: &ContentBlock,
    templates: &'a [Template],
) -> Vec<&'a Template> {
    templates
        .iter()
        .filter(|template| capacity_sufficient(content, template))
        .collect()
}
