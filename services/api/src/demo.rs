use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use deck_ai::error::AppError;
use deck_ai::workflows::slides::{
    ContentBlock, ContentItem, EntropySelection, MatchingConfig, SeededSelection, SelectionRng,
    SemanticFeatures, SlideMatchOutcome, SlideMatchingService,
};

use crate::infra::seeded_repository;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Seed for the fallback selection RNG (defaults to entropy)
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Match slide content from a JSON file instead of the built-in samples
    #[arg(long)]
    pub(crate) content: Option<PathBuf>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let rng: Arc<dyn SelectionRng> = match args.seed {
        Some(seed) => Arc::new(SeededSelection::new(seed)),
        None => Arc::new(EntropySelection),
    };

    let service =
        SlideMatchingService::new(seeded_repository(), MatchingConfig::standard(), rng)?;

    let blocks = match args.content {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            vec![serde_json::from_str::<ContentBlock>(&raw)?]
        }
        None => sample_blocks(),
    };

    for content in &blocks {
        let outcome = service.match_content(content)?;
        print_outcome(content, &outcome);
    }

    Ok(())
}

fn print_outcome(content: &ContentBlock, outcome: &SlideMatchOutcome) {
    println!("== {}", content.title);
    println!(
        "   items: {}  tagged: {}",
        content.item_count(),
        content.semantic_features.is_some()
    );
    println!(
        "   -> template '{}' via {:?}",
        outcome.selection.template_id.0, outcome.selection.strategy
    );
    if let Some(reason) = outcome.selection.fallback_reason {
        println!("   fallback reason: {}", reason.label());
    }
    if let Some(result) = &outcome.selection.result {
        println!("   total score: {:.3}", result.total_score);
        for score in &result.per_dimension {
            match score.raw_score {
                Some(raw) => println!(
                    "   {:<16} raw {:.2}  weight {:.2}",
                    score.dimension.as_str(),
                    raw,
                    score.weight
                ),
                None => println!("   {:<16} unavailable", score.dimension.as_str()),
            }
        }
    }
    println!();
}

fn item(title: Option<&str>, text: &str) -> ContentItem {
    ContentItem {
        title: title.map(str::to_string),
        text: Some(text.to_string()),
    }
}

fn sample_blocks() -> Vec<ContentBlock> {
    vec![
        ContentBlock {
            title: "Competitive case analysis".to_string(),
            items: vec![
                item(None, "Strengths of the incumbent offering."),
                item(None, "Weaknesses our wedge exploits today."),
                item(None, "Opportunities in the mid-market tier."),
                item(None, "Threats from adjacent platform vendors."),
            ],
            semantic_features: Some(SemanticFeatures {
                content_type: "case_analysis".to_string(),
                layout_type: Some("basic_matrix".to_string()),
                visual_style: Some("minimal".to_string()),
            }),
        },
        ContentBlock {
            title: "Key rollout checkpoints".to_string(),
            items: vec![
                item(Some("Pilot"), "Ten design partners live by March."),
                item(Some("Beta"), "Self-serve onboarding with billing."),
                item(Some("Launch"), "General availability announcement."),
            ],
            semantic_features: Some(SemanticFeatures {
                content_type: "key_points".to_string(),
                layout_type: Some("titled_list".to_string()),
                visual_style: None,
            }),
        },
        ContentBlock {
            title: "Raw meeting notes".to_string(),
            items: vec![
                item(None, "Finance wants the forecast restated."),
                item(None, "Hiring freeze lifts at quarter end."),
            ],
            semantic_features: None,
        },
    ]
}
