//! Generate and compare commands - run the workflow from the terminal

use clap::Args;

use crate::config::AppConfig;
use crate::infrastructure::review::{ReviewParams, ReviewResult};

#[derive(Args, Clone, Debug)]
pub struct ReviewArgs {
    /// Key theme of the review
    #[arg(long)]
    pub theme: String,

    /// Star rating, 1 to 5
    #[arg(long)]
    pub rating: u8,

    /// Business category (rubric)
    #[arg(long)]
    pub category: String,

    /// Model id from the catalogue; the configured default otherwise
    #[arg(long)]
    pub model: Option<String>,

    /// Print the full result as JSON
    #[arg(long)]
    pub json: bool,
}

impl From<&ReviewArgs> for ReviewParams {
    fn from(args: &ReviewArgs) -> Self {
        Self {
            theme: args.theme.clone(),
            rating: args.rating,
            category: args.category.clone(),
            model: args.model.clone(),
        }
    }
}

#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub review: ReviewArgs,
}

#[derive(Args, Clone, Debug)]
pub struct CompareArgs {
    #[command(flatten)]
    pub review: ReviewArgs,

    /// Second model to run the same request against
    #[arg(long)]
    pub second_model: String,
}

pub async fn run(config: AppConfig, args: GenerateArgs) -> anyhow::Result<()> {
    let service = crate::create_review_service(&config).await?;
    let result = service.generate((&args.review).into()).await?;

    if args.review.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", render(&result));
    }

    Ok(())
}

pub async fn run_compare(config: AppConfig, args: CompareArgs) -> anyhow::Result<()> {
    let service = crate::create_review_service(&config).await?;
    let result = service
        .compare((&args.review).into(), &args.second_model)
        .await?;

    if args.review.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}\n\n{}", render(&result.first), render(&result.second));
    }

    Ok(())
}

/// Human-readable block for one result
pub fn render(result: &ReviewResult) -> String {
    let mut lines = vec![format!("== {} ==", result.model)];

    if let Some(review) = &result.outcome.review {
        lines.push(review.clone());
    }
    if let Some(message) = &result.outcome.message {
        lines.push(format!("! {}", message));
    }
    if !result.exact_match && !result.examples.is_empty() {
        lines.push("(examples taken from other ratings of the category)".to_string());
    }
    if let Some(metrics) = &result.metrics {
        let avg = &metrics.average;
        let mut line = format!(
            "BLEU {:.3}  ROUGE {:.3}  lexical {:.3}",
            avg.bleu, avg.rouge, avg.lexical
        );
        if let Some(semantic) = avg.semantic {
            line.push_str(&format!("  semantic {:.3}", semantic));
        }
        line.push_str(&format!("  combined {:.3}", avg.combined));
        lines.push(line);
    }

    lines.join("\n")
}
