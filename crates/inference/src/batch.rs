use crate::types::SkeletonBatch;
use archmap_skeleton::Skeleton;

/// Pack skeletons into batches under a token budget.
///
/// Greedy in stable file order: a skeleton joins the open batch unless that
/// would exceed `max_tokens_per_batch`, in which case the batch is flushed.
/// A single oversized skeleton still gets a batch of its own; splitting a
/// file across model calls would lose its internal context. Empty skeletons
/// never reach a batch.
pub fn pack_batches(skeletons: &[Skeleton], max_tokens_per_batch: usize) -> Vec<SkeletonBatch> {
    let mut batches = Vec::new();
    let mut files: Vec<String> = Vec::new();
    let mut texts: Vec<&str> = Vec::new();
    let mut tokens = 0usize;

    let flush = |batches: &mut Vec<SkeletonBatch>,
                 files: &mut Vec<String>,
                 texts: &mut Vec<&str>,
                 tokens: &mut usize| {
        if texts.is_empty() {
            return;
        }
        let index = batches.len();
        batches.push(SkeletonBatch {
            index,
            files: std::mem::take(files),
            text: texts.join("\n\n"),
            estimated_tokens: *tokens,
        });
        texts.clear();
        *tokens = 0;
    };

    for skeleton in skeletons {
        if skeleton.is_empty() {
            continue;
        }

        let estimate = skeleton.estimated_tokens();
        if tokens > 0 && tokens + estimate > max_tokens_per_batch {
            flush(&mut batches, &mut files, &mut texts, &mut tokens);
        }

        files.push(skeleton.file_path.clone());
        texts.push(&skeleton.text);
        tokens += estimate;
    }
    flush(&mut batches, &mut files, &mut texts, &mut tokens);

    if let Some(over) = batches
        .iter()
        .find(|b| b.estimated_tokens > max_tokens_per_batch)
    {
        log::debug!(
            "Batch {} exceeds the token budget on its own ({} > {})",
            over.index,
            over.estimated_tokens,
            max_tokens_per_batch
        );
    }

    batches
}
