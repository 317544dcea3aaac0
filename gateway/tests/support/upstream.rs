//! Scripted stand-in for the GOV.UK search and content APIs.
//!
//! ```text
//! GET /api/search.json?q=bad      -> 422
//! GET /api/search.json?q=flaky    -> 503, 503, then 200
//! GET /api/search.json?q=down     -> 503 forever
//! GET /api/search.json?q=..       -> 200 with two hits, oldest first
//! GET /api/search.json?filter_content_id=cid-known -> link to /guidance/known
//! GET /api/content/guidance/known -> 200
//! GET /api/content/guidance/unprocessable -> 422
//! GET /api/content/..             -> 404
//! ```

use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use reqwest::Url;
use serde_json::json;

/// Requests observed by the fake upstream.
#[derive(Default)]
pub struct UpstreamLog {
    correlation_ids: Mutex<Vec<Option<String>>>,
    flaky_calls: AtomicU32,
}

impl UpstreamLog {
    fn observe(&self, req: &HttpRequest) {
        let id = req
            .headers()
            .get("x-correlation-id")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        self.correlation_ids
            .lock()
            .expect("upstream log mutex")
            .push(id);
    }

    /// Correlation header value of each request, in arrival order.
    pub fn correlation_ids(&self) -> Vec<Option<String>> {
        self.correlation_ids
            .lock()
            .expect("upstream log mutex")
            .clone()
    }
}

async fn search(
    req: HttpRequest,
    log: web::Data<UpstreamLog>,
    params: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    log.observe(&req);
    if let Some(id) = params.get("filter_content_id") {
        let results = if id == "cid-known" {
            json!([{ "link": "/guidance/known" }])
        } else {
            json!([])
        };
        return HttpResponse::Ok().json(json!({ "results": results, "total": 1 }));
    }

    match params.get("q").map(String::as_str) {
        Some("bad") => {
            HttpResponse::UnprocessableEntity().json(json!({ "error": "unknown filter" }))
        }
        Some("down") => HttpResponse::ServiceUnavailable().finish(),
        Some("flaky") if log.flaky_calls.fetch_add(1, Ordering::SeqCst) < 2 => {
            HttpResponse::ServiceUnavailable().finish()
        }
        _ => HttpResponse::Ok().json(json!({
            "results": [
                {
                    "title": "Older",
                    "link": "/guidance/older",
                    "public_timestamp": "2019-05-01T00:00:00Z"
                },
                {
                    "title": "Newer",
                    "link": "/guidance/newer",
                    "description": "Latest guidance",
                    "public_timestamp": "2024-05-01T00:00:00Z",
                    "content_id": "cid-newer"
                }
            ],
            "total": 2
        })),
    }
}

async fn content(req: HttpRequest, log: web::Data<UpstreamLog>) -> HttpResponse {
    log.observe(&req);
    match req.path() {
        "/api/content/guidance/known" => HttpResponse::Ok().json(json!({
            "base_path": "/guidance/known",
            "content_id": "cid-known",
            "public_updated_at": "2025-02-03T04:05:06Z",
            "title": "Known guidance"
        })),
        "/api/content/guidance/unprocessable" => {
            HttpResponse::UnprocessableEntity().json(json!({ "error": "unprocessable" }))
        }
        _ => HttpResponse::NotFound().json(json!({ "error": "not found" })),
    }
}

/// Start the fake upstream on an ephemeral port.
pub fn spawn_upstream() -> (Url, web::Data<UpstreamLog>) {
    let log = web::Data::new(UpstreamLog::default());
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    let app_log = log.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_log.clone())
            .route("/api/search.json", web::get().to(search))
            .route("/api/content/{tail:.*}", web::get().to(content))
    })
    .workers(1)
    .listen(listener)
    .expect("listen on ephemeral port")
    .run();
    actix_web::rt::spawn(server);

    let base = Url::parse(&format!("http://{addr}")).expect("upstream url");
    (base, log)
}
