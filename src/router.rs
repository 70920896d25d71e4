use crate::app::{App, PipelineRun};
use crate::errors::ServerError;
use crate::mailings::DigestOutcome;
use crate::responses::{html_response, ResultResp};
use crate::spreadsheets::export_deals_xlsx;
use crate::templates::components::NoticeKind;
use crate::templates::pages::{dashboard_page, DashboardVm};
use astra::Request;

pub fn handle(req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();
    tracing::debug!(method, path, "request");

    match (method, path) {
        ("GET", "/") => {
            let run = app.run_pipeline();
            html_response(dashboard_page(&dashboard_vm(app, run, None)))
        }
        ("POST", "/send") => send_now(app),
        ("GET", "/deals.xlsx") => {
            let run = app.run_pipeline();
            if let Some(e) = run.fetch_error {
                return Err(ServerError::Upstream(e.to_string()));
            }
            export_deals_xlsx(&run.deals, &run.checked_at.format("%Y-%m-%d").to_string())
        }
        _ => Err(ServerError::NotFound),
    }
}

/// Fetch fresh deals and mail them, then show the dashboard with the result.
fn send_now(app: &App) -> ResultResp {
    let run = app.run_pipeline();

    // Without data the dashboard shows no send button, so there is nothing to act on.
    let notice = if run.has_data() {
        Some(match app.send_digest(&run.deals) {
            Ok(DigestOutcome::Sent { count }) => {
                (NoticeKind::Info, format!("Email sent! ({count} deals)"))
            }
            Ok(DigestOutcome::NothingToSend) => {
                (NoticeKind::Warning, "No deals to send.".to_string())
            }
            Err(e) => (NoticeKind::Error, format!("Email failed: {e}")),
        })
    } else {
        None
    };

    html_response(dashboard_page(&dashboard_vm(app, run, notice)))
}

fn dashboard_vm(app: &App, run: PipelineRun, notice: Option<(NoticeKind, String)>) -> DashboardVm {
    DashboardVm {
        checked_at: run.checked_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        threshold_percent: app.config.threshold_percent(),
        fetch_error: run.fetch_error.map(|e| e.to_string()),
        fetched: run.fetched,
        deals: run.deals,
        notice,
    }
}
