use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::error::AppError;
use crate::model::Report;
use crate::query::OutputFormat;
use crate::utils::{display_path, format_bytes};

pub fn render(report: &Report, format: OutputFormat) -> Result<String, AppError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(report)?),
    }
}

/// Write the report to `output`, or to stdout when no path is given.
pub fn write_report(
    report: &Report,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<(), AppError> {
    let mut stdout = io::stdout().lock();
    write_report_to(&mut stdout, report, format, output)
}

/// Like [`write_report`], with `out` standing in for stdout.
pub fn write_report_to<W: Write>(
    out: &mut W,
    report: &Report,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<(), AppError> {
    let rendered = render(report, format)?;

    let Some(path) = output else {
        write_line(out, rendered.trim_end())?;
        return Ok(());
    };

    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, &rendered)?;

    write_line(
        out,
        &format!(
            "Report written to {} ({})",
            display_path(path),
            format_bytes(rendered.len() as u64)
        ),
    )?;
    Ok(())
}

// A reader that went away (e.g. `| head`) is not a failure.
fn write_line<W: Write>(out: &mut W, line: &str) -> io::Result<()> {
    match writeln!(out, "{line}").and_then(|()| out.flush()) {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        result => result,
    }
}
