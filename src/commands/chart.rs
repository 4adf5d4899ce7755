//! The `chart` command: load a spreadsheet and emit a chart specification.
//!
//! The printed JSON is the handoff artifact for the external rendering
//! collaborator; this program draws nothing.

use crate::chart::{ChartKind, ChartSpec};
use crate::commands::report::warn_on_unexpected_extension;
use crate::commands::Out;
use crate::{Result, Session};
use anyhow::Context;
use std::path::Path;

/// Loads `path` into the session and derives the requested chart series.
pub fn chart(session: &mut Session, path: &Path, kind: ChartKind) -> Result<Out<ChartSpec>> {
    warn_on_unexpected_extension(path);
    session.load_file(path)?;
    let spec = session.chart(kind)?;
    let json = serde_json::to_string_pretty(&spec)
        .context("Unable to serialize the chart specification")?;
    Ok(Out::new(json, spec))
}
