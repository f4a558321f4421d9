use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::workflows::slides::domain::{ContentBlock, Template};

/// Injectable randomness for fallback tie-breaking. This is the one place
/// true nondeterminism is intentional (spreading load across visually
/// equivalent templates); keeping it behind a trait lets tests pin a seed
/// without touching the deterministic scoring path.
///
/// Implementations return an index in `0..len`; callers guarantee
/// `len > 0`.
pub trait SelectionRng: Send + Sync {
    fn pick(&self, len: usize) -> usize;
}

/// Deterministic selection for tests and replayable runs.
pub struct SeededSelection {
    rng: Mutex<StdRng>,
}

impl SeededSelection {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl SelectionRng for SeededSelection {
    fn pick(&self, len: usize) -> usize {
        let mut rng = self.rng.lock().expect("selection rng mutex poisoned");
        rng.gen_range(0..len)
    }
}

/// Production selection backed by thread-local entropy.
#[derive(Default)]
pub struct EntropySelection;

impl SelectionRng for EntropySelection {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Degraded, annotation-free selection: prefer any template whose capacity
/// fits the content, picked uniformly at random; when everything is too
/// small, the globally largest capacity loses the least content, with
/// first-seen order winning ties. Returns `None` only for an empty pool.
pub(crate) fn fallback_pick<'a>(
    content: &ContentBlock,
    templates: &'a [Template],
    rng: &dyn SelectionRng,
) -> Option<&'a Template> {
    if templates.is_empty() {
        return None;
    }

    let needed = content.item_count();
    let sufficient: Vec<&Template> = templates
        .iter()
        .filter(|template| template.item_capacity() >= needed)
        .collect();
    if !sufficient.is_empty() {
        return Some(sufficient[rng.pick(sufficient.len())]);
    }

    let mut largest = &templates[0];
    for template in &templates[1..] {
        if template.item_capacity() > largest.item_capacity() {
            largest = template;
        }
    }
    Some(largest)
}
