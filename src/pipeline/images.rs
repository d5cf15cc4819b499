// File: src/pipeline/images.rs
use crate::core::types::SentenceFile;
use crate::error::Result;
use crate::pipeline::{path_string, BatchReport, Throttle};
use crate::services::Downloader;
use log::{info, warn};
use std::fs;
use std::path::Path;

fn is_remote(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

/// Downloads sentence images that are still stored as URLs and replaces
/// them with local paths. With `dry_run` nothing is fetched or changed.
pub fn fetch_remote_images(
    file: &mut SentenceFile,
    downloader: &dyn Downloader,
    image_dir: &Path,
    throttle: Throttle,
    dry_run: bool,
) -> Result<BatchReport> {
    let mut report = BatchReport::default();
    let target_dir = image_dir.join("sentences");
    if !dry_run {
        fs::create_dir_all(&target_dir)?;
    }

    for sentence in file.sentences.iter_mut() {
        for (i, image) in sentence.images.iter_mut().enumerate() {
            if !is_remote(image) {
                continue;
            }
            let target = target_dir.join(format!("sentence_{}_{}.png", sentence.id, i));
            if dry_run {
                info!("[dry-run] would fetch {} -> {}", image, target.display());
                report.skip();
                continue;
            }

            let fetched = downloader.download(image);
            throttle.pause();
            match fetched.and_then(|bytes| fs::write(&target, bytes).map_err(Into::into)) {
                Ok(()) => {
                    *image = path_string(&target);
                    report.success();
                }
                Err(e) => {
                    warn!("Image {} of sentence {} failed: {}", i, sentence.id, e);
                    report.failure();
                }
            }
        }
    }
    report.log_summary(if dry_run { "fetch-images (dry run)" } else { "fetch-images" });
    Ok(report)
}
