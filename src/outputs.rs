//! Summary file output.
//!
//! One UTF-8 text file per run under the configured save directory. The
//! filename carries the UTC+8 clock at hour granularity, so two runs within
//! the same hour overwrite the same file; that is the intended behavior for
//! an hourly-scheduled job, not a defect.

use crate::utils::beijing_now;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

const FILENAME_PREFIX: &str = "财经资讯总结";

/// Write the summary text under `save_dir`, creating the directory if absent.
///
/// Returns the path of the written file. The caller decides whether a write
/// failure stops anything; in this pipeline it never does.
#[instrument(level = "info", skip_all, fields(save_dir = %save_dir))]
pub async fn write_summary(save_dir: &str, text: &str) -> Result<PathBuf, Box<dyn Error>> {
    fs::create_dir_all(save_dir).await?;

    let stamp = beijing_now().format("%Y%m%d_%H");
    let path = Path::new(save_dir).join(format!("{FILENAME_PREFIX}_{stamp}.txt"));

    info!(path = %path.display(), bytes = text.len(), "Writing summary file");
    fs::write(&path, text).await?;
    Ok(path)
}
