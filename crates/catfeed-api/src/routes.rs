use axum::Router;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};

use catfeed_core::{FeedConfig, FeedError, ImagePolicy, Table, normalize};

use crate::state::AppState;

const UPLOAD_FORM: &str = r#"<!doctype html>
<html>
<head>
  <meta charset="utf-8">
  <title>Catfeed</title>
</head>
<body>
  <h1>Make your catalog export ad-feed ready</h1>
  <form action="/process" method="post" enctype="multipart/form-data">
    <p><label>Catalog export (CSV): <input type="file" name="file" required></label></p>
    <p><label>Domain: <input type="text" name="domain" placeholder="https://yourdomain.com" required></label></p>
    <p><label>Currency: <input type="text" name="currency" placeholder="USD"></label></p>
    <p><label>Google product category: <input type="text" name="google_product_category"></label></p>
    <p><label>Image policy:
      <select name="image_policy">
        <option value="explode">one row per image</option>
        <option value="first_only">first image only</option>
      </select>
    </label></p>
    <p><label><input type="checkbox" name="condition"> Mark every item as condition "new"</label></p>
    <p><button type="submit">Download processed.csv</button></p>
  </form>
</body>
</html>
"#;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/process", post(process))
        .with_state(state)
}

pub async fn index() -> Html<&'static str> {
    Html(UPLOAD_FORM)
}

/// Accepts the upload form, runs the normalizer, and returns the feed
/// as a downloadable attachment. The output is returned in memory; the
/// caller owns persistence.
pub async fn process(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, (StatusCode, String)> {
    let mut file: Option<Vec<u8>> = None;
    let mut domain: Option<String> = None;
    let mut currency: Option<String> = None;
    let mut category: Option<String> = None;
    let mut image_policy: Option<ImagePolicy> = None;
    let mut condition = false;

    while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let bytes = field.bytes().await.map_err(bad_request)?;
                file = Some(bytes.to_vec());
            }
            "domain" => domain = non_blank(field.text().await.map_err(bad_request)?),
            "currency" => currency = non_blank(field.text().await.map_err(bad_request)?),
            "google_product_category" => {
                category = non_blank(field.text().await.map_err(bad_request)?);
            }
            "image_policy" => {
                let raw = field.text().await.map_err(bad_request)?;
                if let Some(value) = non_blank(raw) {
                    let parsed = ImagePolicy::try_from(value.as_str())
                        .map_err(|message| (StatusCode::UNPROCESSABLE_ENTITY, message))?;
                    image_policy = Some(parsed);
                }
            }
            "condition" => condition = true,
            _ => {}
        }
    }

    let file = file.ok_or_else(|| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            "no file uploaded".to_string(),
        )
    })?;
    let domain = domain.ok_or_else(|| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            "domain is required".to_string(),
        )
    })?;

    let mut config = FeedConfig::new(domain);
    config.currency = currency.unwrap_or_else(|| state.default_currency.clone());
    config.google_product_category = category;
    config.set_condition = condition;
    if let Some(policy) = image_policy {
        config.image_policy = policy;
    }

    let table = Table::from_csv(&file).map_err(feed_error)?;
    let outcome = normalize(table, &config).map_err(feed_error)?;
    if !outcome.dropped.is_empty() {
        tracing::info!(
            dropped = outcome.dropped.len(),
            "rows dropped for unparseable price"
        );
    }
    let bytes = outcome.table.to_csv().map_err(feed_error)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"processed.csv\"",
            ),
        ],
        bytes,
    )
        .into_response())
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn bad_request(err: MultipartError) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, err.to_string())
}

fn feed_error(err: FeedError) -> (StatusCode, String) {
    tracing::error!("normalization failed: {err}");
    let status = match &err {
        FeedError::MissingColumn { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        FeedError::Csv(_) | FeedError::Io(_) => StatusCode::BAD_REQUEST,
    };
    (status, err.to_string())
}
