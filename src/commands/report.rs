//! The `report` command: load a spreadsheet and print the summary report.

use crate::aggregate::AggregateResult;
use crate::commands::Out;
use crate::report::format_report;
use crate::{Result, Session};
use std::path::Path;
use tracing::warn;

/// Loads `path` into the session and renders the summary report.
pub fn report(session: &mut Session, path: &Path) -> Result<Out<AggregateResult>> {
    warn_on_unexpected_extension(path);
    session.load_file(path)?;
    let result = session.aggregate()?;
    let text = format_report(&result, session.options().unit_scale());
    Ok(Out::new(text, result))
}

/// The interactive file picker normally restricts selection to `.csv`; a
/// direct path can be anything, so say something when it looks off.
pub(crate) fn warn_on_unexpected_extension(path: &Path) {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    if !extension.eq_ignore_ascii_case("csv") {
        warn!(
            "'{}' does not have the expected .csv extension",
            path.display()
        );
    }
}
