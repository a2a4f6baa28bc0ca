use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Html,
    Form,
};
use tracing::{error, warn};

use super::run_blocking;
use crate::api::{
    state::AppState,
    types::{PageView, Tab, TextForm},
};
use crate::input::InputSource;

type PageResult = std::result::Result<Html<String>, (StatusCode, String)>;

fn render(state: &AppState, view: &PageView) -> PageResult {
    state.pages.render(view).map(Html).map_err(|e| {
        error!(error = %e, "page render failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })
}

/// GET /
pub async fn index(State(state): State<AppState>) -> PageResult {
    render(&state, &PageView::empty(Tab::Csv))
}

/// POST /predict/csv -- multipart upload, field `file`
pub async fn predict_csv(State(state): State<AppState>, mut multipart: Multipart) -> PageResult {
    let view = PageView::empty(Tab::Csv);

    let mut upload = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("file") => {
                let filename = field.file_name().map(str::to_string);
                match field.bytes().await {
                    Ok(bytes) => {
                        upload = Some((filename, bytes));
                        break;
                    }
                    Err(e) => {
                        warn!(error = %e, "csv upload could not be read");
                        return render(&state, &view.with_error(format!("Error: {e}")));
                    }
                }
            }
            Ok(Some(_)) => continue,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "malformed multipart body");
                return render(&state, &view.with_error(format!("Error: {e}")));
            }
        }
    }

    // Browsers send an unnamed empty part when no file was chosen. A named
    // file is always diagnosed, even when it has no content.
    let Some((filename, bytes)) =
        upload.filter(|(filename, _)| filename.as_deref().is_some_and(|name| !name.is_empty()))
    else {
        return render(&state, &view);
    };

    let service = state.diagnosis.clone();
    let result = run_blocking(move || service.diagnose_csv(&bytes)).await;
    let report = state.diagnosis.report(InputSource::Csv, &result);

    let mut view = view.with_report(&report);
    view.csv_filename = filename;
    render(&state, &view)
}

/// POST /predict/text -- urlencoded form, field `values`
pub async fn predict_text(State(state): State<AppState>, Form(form): Form<TextForm>) -> PageResult {
    let text = form.values;

    let service = state.diagnosis.clone();
    let input = text.clone();
    let result = run_blocking(move || service.diagnose_text(&input)).await;
    let report = state.diagnosis.report(InputSource::Text, &result);

    let mut view = PageView::empty(Tab::Text).with_report(&report);
    view.text_input = text;
    render(&state, &view)
}
