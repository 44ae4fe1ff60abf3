use std::collections::{BTreeMap, BTreeSet};
use std::process::{Command, Stdio};

use crate::error::AppError;
use crate::model::ImageRecord;

const PS_FORMAT: &str = "{{.Image}}\t{{.Names}}";

/// Whether a docker-compatible CLI (`docker`, `podman`, `nerdctl`) can be invoked.
pub fn is_runtime_available(runtime: &str) -> bool {
    Command::new(runtime)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// List the images backing running containers of one runtime.
///
/// An unavailable or failing runtime is skipped with a log line rather than
/// failing the whole scan.
pub fn list_running_images(runtime: &str) -> Result<Vec<ImageRecord>, AppError> {
    if !is_runtime_available(runtime) {
        log::debug!("{runtime} CLI not available, skipping");
        return Ok(Vec::new());
    }

    let output = Command::new(runtime).args(["ps", "--format", PS_FORMAT]).output()?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.trim().is_empty() {
            log::warn!("'{runtime} ps' exited with status {}", output.status);
        } else {
            log::warn!("'{runtime} ps' failed: {}", stderr.trim());
        }
        return Ok(Vec::new());
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let images = parse_ps_output(runtime, &stdout);
    log::debug!("{runtime}: {} image(s) in use", images.len());
    Ok(images)
}

/// Parse `ps --format "{{.Image}}\t{{.Names}}"` output into one record per image.
pub fn parse_ps_output(runtime: &str, stdout: &str) -> Vec<ImageRecord> {
    let mut grouped: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();

    for line in stdout.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (image, name) = match line.split_once('\t') {
            Some((image, name)) => (image.trim(), name.trim()),
            None => (line, ""),
        };
        if image.is_empty() {
            continue;
        }

        let names = grouped.entry(image).or_default();
        if !name.is_empty() {
            names.insert(name);
        }
    }

    grouped
        .into_iter()
        .map(|(image, names)| {
            ImageRecord::running(
                image.to_string(),
                runtime,
                names.into_iter().map(str::to_string).collect(),
            )
        })
        .collect()
}
