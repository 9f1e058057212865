//! Executes a parsed script against a browsing session.

use pagesel_core::{BrowsingSession, PageOutcome, PageProvider, SelectionEvent};
use pagesel_model::{SelectionError, parse_baseline};
use tracing::{info, info_span, warn};

use crate::render::render_page;
use crate::script::{ScriptCommand, ScriptLine};
use crate::types::{BrowseReport, SelectionSummary};

/// Run `script` against `session`, fetching pages from `provider`.
///
/// The first page is loaded before the first command. Rejected input and
/// failed fetches are recorded in the report; they never stop the script.
pub fn run_script<P: PageProvider + ?Sized>(
    session: &mut BrowsingSession,
    provider: &mut P,
    script: &[ScriptLine],
) -> Result<BrowseReport, SelectionError> {
    let span = info_span!("script", commands = script.len());
    let _guard = span.enter();

    let mut report = BrowseReport::default();
    load(session, provider, 1, 0, &mut report)?;

    for ScriptLine { line, command } in script {
        let line = *line;
        match command {
            ScriptCommand::Page(number) => load(session, provider, *number, line, &mut report)?,
            ScriptCommand::Next => {
                let next = session.page().page_number() + 1;
                if next > session.total_pages().max(1) {
                    report.note(line, "already on the last page");
                } else {
                    load(session, provider, next, line, &mut report)?;
                }
            }
            ScriptCommand::Prev => {
                let current = session.page().page_number();
                if current <= 1 {
                    report.note(line, "already on the first page");
                } else {
                    load(session, provider, current - 1, line, &mut report)?;
                }
            }
            ScriptCommand::Toggle { id, selected } => {
                if !session.page().contains(id) {
                    report.ignored_events += 1;
                }
                session.handle(&SelectionEvent::ToggleItem {
                    id: id.clone(),
                    selected: *selected,
                })?;
            }
            ScriptCommand::All(checked) => {
                session.handle(&SelectionEvent::ToggleAllOnPage { checked: *checked })?;
            }
            ScriptCommand::Select(input) => match parse_baseline(input) {
                Ok(count) => {
                    session.handle(&SelectionEvent::ReplaceBaseline { count })?;
                }
                Err(error) => {
                    warn!(line, %error, "rejected baseline input");
                    report.note(line, format!("{} ({error})", error.user_message()));
                }
            },
            ScriptCommand::Show => report.views.push(render_page(session)),
        }
    }

    report.page_number = session.page().page_number();
    report.page_size = session.page().page_size();
    report.total_count = session.total_count();
    report.selection = SelectionSummary::from(session.model());
    info!(
        effective_count = report.selection.effective_count,
        pages_loaded = report.pages_loaded,
        fetch_failures = report.fetch_failures,
        "script finished"
    );
    Ok(report)
}

fn load<P: PageProvider + ?Sized>(
    session: &mut BrowsingSession,
    provider: &mut P,
    page_number: u64,
    line: usize,
    report: &mut BrowseReport,
) -> Result<(), SelectionError> {
    match session.load_page(provider, page_number) {
        Ok(PageOutcome::Applied { .. }) => report.pages_loaded += 1,
        Ok(PageOutcome::Failed(error)) => {
            report.fetch_failures += 1;
            report.note(line, format!("page {page_number}: {}", error.user_message()));
        }
        Ok(PageOutcome::Superseded { .. }) => {}
        Err(error @ SelectionError::PageOutOfRange { .. }) => {
            warn!(line, %error, "rejected page request");
            report.note(line, format!("page {page_number}: {}", error.user_message()));
        }
        Err(error) => return Err(error),
    }
    Ok(())
}
