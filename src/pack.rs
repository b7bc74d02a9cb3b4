use crate::aggregate::{Aggregate, Aggregator};
use crate::config::ScanConfig;
use crate::errors::PromptError;
use crate::output::PromptSink;
use crate::reporting::{print_stats, TracingReporter};
use std::path::PathBuf;
use tiktoken_rs::get_bpe_from_model;
use tracing::{debug, info, trace, warn};

/// Everything needed for one run.
#[derive(Debug, Clone)]
pub struct PackRequest {
    /// Where the walk starts.
    pub scan_dir: PathBuf,
    /// Base for the paths printed in the file markers.
    pub project_root: PathBuf,
    pub config: ScanConfig,
    /// Tokenizer model for the stats tree; `None` turns stats off.
    pub stats_model: Option<String>,
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackSummary {
    pub files: usize,
    pub characters: usize,
    pub tokens: Option<usize>,
    pub delivered: bool,
}

/// Aggregates the request's tree and hands the prompt to `sink`.
///
/// An empty aggregate is not an error: nothing is delivered and the summary
/// says so.
pub async fn pack_project(
    request: PackRequest,
    sink: &dyn PromptSink,
) -> Result<PackSummary, PromptError> {
    let PackRequest {
        scan_dir,
        project_root,
        config,
        stats_model,
    } = request;

    debug!("Aggregating {}", scan_dir.display());
    let aggregate = tokio::task::spawn_blocking(move || {
        Aggregator::new(config).aggregate(&scan_dir, &project_root, &mut TracingReporter)
    })
    .await
    .map_err(|e| PromptError::Cancelled(e.to_string()))??;

    if aggregate.is_empty() {
        warn!("No files were added to the prompt. Check your path and configuration.");
        return Ok(PackSummary {
            files: 0,
            characters: 0,
            tokens: None,
            delivered: false,
        });
    }

    let tokens = match stats_model {
        Some(model) => Some(report_token_stats(&aggregate, &model)?),
        None => None,
    };

    let prompt = aggregate.render();
    let characters = prompt.chars().count();
    trace!("Final content length: {} bytes", prompt.len());

    sink.deliver(&prompt).await?;
    info!("Total size: {} characters", characters);

    Ok(PackSummary {
        files: aggregate.len(),
        characters,
        tokens,
        delivered: true,
    })
}

/// Prints the token tree and returns the overall count.
pub fn report_token_stats(aggregate: &Aggregate, model: &str) -> Result<usize, PromptError> {
    let tokenizer =
        get_bpe_from_model(model).map_err(|e| PromptError::TokenizerError(e.to_string()))?;

    let counts: Vec<(&str, usize)> = aggregate
        .blocks()
        .iter()
        .map(|block| {
            let count = tokenizer.encode_ordinary(block.text()).len();
            trace!("File {} has {} tokens", block.relative_path(), count);
            (block.relative_path(), count)
        })
        .collect();

    let total: usize = counts.iter().map(|(_, count)| count).sum();
    print_stats(counts);
    Ok(total)
}
