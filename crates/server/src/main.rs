//! # huji-server
//!
//! HTTP front end: upload a register, review the households, print one.

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use clap::Parser;
use huji_core::{Household, HouseholdStore};
use huji_render::{HtmlRenderer, MemoryPrintHost, PrintJob, Renderer};
use huji_sheet::SheetError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

/// Upload controls and the `printHousehold` hook for the review page.
const PAGE_CONTROLS: &str = r#"<div class="upload-area" id="uploadArea">
<p>拖拽Excel文件到此处，或选择文件</p>
<input type="file" id="fileInput" accept=".xlsx,.xls">
</div>
<script>
async function uploadFile(file) {
    if (!file) return;
    const response = await fetch('/upload?filename=' + encodeURIComponent(file.name), { method: 'POST', body: file });
    const body = await response.text();
    if (!response.ok) { alert(body); return; }
    document.open(); document.write(body); document.close();
}
function printHousehold(index) { window.open('/print/' + index, '_blank'); }
document.getElementById('fileInput').addEventListener('change', e => uploadFile(e.target.files[0]));
const area = document.getElementById('uploadArea');
function highlight(on) {
    area.style.borderColor = on ? '#2980b9' : '#3498db';
    area.style.backgroundColor = on ? '#f0f8ff' : '';
}
area.addEventListener('dragover', e => { e.preventDefault(); highlight(true); });
area.addEventListener('dragleave', e => { e.preventDefault(); highlight(false); });
area.addEventListener('drop', e => { e.preventDefault(); highlight(false); uploadFile(e.dataTransfer.files[0]); });
</script>"#;

/// Server options.
#[derive(Parser, Debug)]
#[command(name = "huji-server", version, about = "Household register viewer over HTTP")]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:3000")]
    addr: String,

    /// Largest accepted upload, in bytes
    #[arg(long, default_value_t = 20 * 1024 * 1024)]
    max_upload_bytes: usize,
}

/// Households from the last successful upload and their rendering.
#[derive(Debug, Default)]
pub struct AppState {
    pub store: HouseholdStore,
    pub renderer: HtmlRenderer,
}

/// State shared by all handlers.
pub type SharedState = Arc<RwLock<AppState>>;

/// Health check response.
#[derive(Serialize, Deserialize)]
pub struct Health {
    /// Server status ("ok" when healthy).
    pub status: String,
    /// Server version from Cargo.toml.
    pub version: String,
    /// Households currently loaded.
    pub households: usize,
}

/// Query string of an upload.
#[derive(Deserialize)]
pub struct UploadQuery {
    /// Original file name, used for the extension check. A missing name is
    /// rejected like a wrong extension.
    pub filename: Option<String>,
}

/// Health check endpoint handler.
pub async fn health(State(state): State<SharedState>) -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        households: state.read().await.store.len(),
    })
}

/// Review page for the current households.
pub async fn index(State(state): State<SharedState>) -> Html<String> {
    Html(state.read().await.renderer.page(PAGE_CONTROLS))
}

/// Accept a workbook as the raw request body.
///
/// A rejected or undecodable upload leaves the current households untouched.
/// When uploads overlap, whichever finishes decoding last is kept.
pub async fn upload(
    State(state): State<SharedState>,
    Query(query): Query<UploadQuery>,
    body: Bytes,
) -> Response {
    let file_name = query.filename.unwrap_or_default();
    let rows = match huji_sheet::decode_upload(&file_name, body.to_vec()).await {
        Ok(rows) => rows,
        Err(e) => {
            let status = match e {
                SheetError::InvalidExtension { .. } => StatusCode::BAD_REQUEST,
                SheetError::Decode(_) | SheetError::Io(_) => StatusCode::UNPROCESSABLE_ENTITY,
            };
            return (status, e.user_message()).into_response();
        }
    };

    let mut guard = state.write().await;
    let AppState { store, renderer } = &mut *guard;
    store.ingest(rows);
    renderer.render_all(store.households());

    Html(renderer.page(PAGE_CONTROLS)).into_response()
}

/// Current households as JSON.
pub async fn households(State(state): State<SharedState>) -> Json<Vec<Household>> {
    Json(state.read().await.store.households().to_vec())
}

/// Print document for one rendered household.
///
/// The browser prints the page on load and then closes it.
/// Anything that is not a block index, such as `-1`, is not found.
pub async fn print(State(state): State<SharedState>, Path(index): Path<String>) -> Response {
    let Ok(index) = index.parse::<usize>() else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let mut host = MemoryPrintHost::new();
    let printed = state.read().await.renderer.print_one(index, &mut host);

    match printed {
        Ok(true) => match host.into_jobs().pop() {
            Some(job) => Html(browser_document(&job)).into_response(),
            None => StatusCode::NOT_FOUND.into_response(),
        },
        Ok(false) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            tracing::error!(index, error = %e, "print failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Turn a captured print job into a page that prints and closes itself.
fn browser_document(job: &PrintJob) -> String {
    let mut actions = String::new();
    if job.printed {
        actions.push_str("window.print();");
    }
    if job.closed {
        actions.push_str("window.close();");
    }
    if actions.is_empty() {
        return job.document.clone();
    }

    let script = format!("<script>window.addEventListener('load', () => {{ {actions} }});</script>");
    match job.document.rfind("</body>") {
        Some(pos) => {
            let mut document = job.document.clone();
            document.insert_str(pos, &script);
            document
        }
        None => format!("{}{script}", job.document),
    }
}

/// Create the application router.
///
/// This is separated from `main()` to allow testing.
pub fn create_router(state: SharedState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/upload", post(upload))
        .route("/households", get(households))
        .route("/print/:index", get(print))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let state = SharedState::default();
    let app = create_router(state, args.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(&args.addr).await?;
    tracing::info!(addr = %args.addr, "huji-server listening");
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    const LIMIT: usize = 1024 * 1024;

    fn workbook(rows: &[[&str; 3]]) -> Vec<u8> {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        for (c, header) in ["户号", "地址", "姓名"].iter().enumerate() {
            sheet.write_string(0, c as u16, *header).unwrap();
        }
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    sheet.write_string(r as u32 + 1, c as u16, *value).unwrap();
                }
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn upload_req(filename: &str, bytes: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(format!("/upload?filename={filename}"))
            .body(Body::from(bytes))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_router(SharedState::default(), LIMIT);
        let (status, body) = send(app, get_req("/health")).await;

        assert_eq!(status, StatusCode::OK);
        let health: Health = serde_json::from_str(&body).unwrap();
        assert_eq!(health.status, "ok");
        assert_eq!(health.households, 0);
    }

    #[tokio::test]
    async fn test_index_shows_placeholder() {
        let app = create_router(SharedState::default(), LIMIT);
        let (status, body) = send(app, get_req("/")).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"<div class="no-data">未找到户籍数据</div>"#));
    }

    #[tokio::test]
    async fn test_upload_groups_and_renders() {
        let state = SharedState::default();
        let app = create_router(state.clone(), LIMIT);

        let bytes = workbook(&[["1", "", "A"], ["1", "Y", "B"], ["2", "X", "C"]]);
        let (status, body) = send(app, upload_req("data.xlsx", bytes)).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"id="household-0""#));
        assert!(body.contains("户号：2 | 地址：X"));

        let app = state.read().await;
        assert_eq!(app.store.len(), 2);
        assert_eq!(app.store.households()[0].address, "");
        assert_eq!(app.store.households()[0].members.len(), 2);
    }

    #[tokio::test]
    async fn test_upload_rejects_extension_without_touching_state() {
        let state = SharedState::default();
        let app = create_router(state.clone(), LIMIT);
        send(app.clone(), upload_req("data.xlsx", workbook(&[["1", "", "A"]]))).await;

        let (status, body) = send(app, upload_req("data.csv", b"a,b".to_vec())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, huji_sheet::INVALID_EXTENSION_MESSAGE);
        assert_eq!(state.read().await.store.len(), 1);
    }

    #[tokio::test]
    async fn test_upload_decode_failure_keeps_previous_data() {
        let state = SharedState::default();
        let app = create_router(state.clone(), LIMIT);
        send(app.clone(), upload_req("data.xlsx", workbook(&[["1", "", "A"]]))).await;

        let (status, body) = send(app, upload_req("broken.xlsx", b"not a workbook".to_vec())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body, huji_sheet::DECODE_FAILURE_MESSAGE);
        assert_eq!(state.read().await.store.len(), 1);
    }

    #[tokio::test]
    async fn test_upload_without_filename_is_rejected() {
        let state = SharedState::default();
        let app = create_router(state.clone(), LIMIT);
        let request = Request::builder()
            .method("POST")
            .uri("/upload")
            .body(Body::from(workbook(&[["1", "", "A"]])))
            .unwrap();

        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, huji_sheet::INVALID_EXTENSION_MESSAGE);
        assert!(state.read().await.store.is_empty());
    }

    #[tokio::test]
    async fn test_index_drag_highlight_colors() {
        let app = create_router(SharedState::default(), LIMIT);
        let (_, body) = send(app, get_req("/")).await;
        assert!(body.contains("on ? '#2980b9' : '#3498db'"));
    }

    #[tokio::test]
    async fn test_households_json() {
        let state = SharedState::default();
        let app = create_router(state, LIMIT);
        send(app.clone(), upload_req("data.xlsx", workbook(&[["b", "", "B"], ["a", "", "A"]]))).await;

        let (status, body) = send(app, get_req("/households")).await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json[0]["householdId"], "a");
        assert_eq!(json[1]["members"][0]["name"], "B");
    }

    #[tokio::test]
    async fn test_print_endpoint() {
        let state = SharedState::default();
        let app = create_router(state, LIMIT);
        send(app.clone(), upload_req("data.xlsx", workbook(&[["1", "X", "A"]]))).await;

        let (status, body) = send(app.clone(), get_req("/print/0")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<title>户籍信息打印</title>"));
        assert!(body.contains("window.print();window.close();"));
        assert!(!body.contains("print-btn"));

        for uri in ["/print/1", "/print/-1", "/print/abc"] {
            let (status, _) = send(app.clone(), get_req(uri)).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        }
    }

    #[test]
    fn test_browser_document_inserts_script_before_body_end() {
        let job = PrintJob {
            index: 0,
            document: "<html><body><p>x</p></body></html>".to_string(),
            printed: true,
            closed: true,
        };
        let doc = browser_document(&job);
        assert!(doc.ends_with("</script></body></html>"));
        assert!(doc.contains("window.print();window.close();"));
    }

    #[test]
    fn test_parse_args() {
        let args = Args::try_parse_from(["huji-server", "--addr", "127.0.0.1:8080"]).unwrap();
        assert_eq!(args.addr, "127.0.0.1:8080");
        assert_eq!(args.max_upload_bytes, 20 * 1024 * 1024);
    }
}
