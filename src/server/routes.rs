use crate::catalog::CatalogSource;
use crate::server::{api, AppState};

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn to_http_string(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_code,
            self.status_text,
            self.content_type,
            self.body.len(),
            self.body
        )
    }

    fn json(payload: Result<String, serde_json::Error>) -> Self {
        match payload {
            Ok(body) => HttpResponse {
                status_code: 200,
                status_text: "OK",
                content_type: "application/json",
                body,
            },
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        }
    }
}

pub fn route_request<S: CatalogSource>(
    state: &AppState<S>,
    method: &str,
    path: &str,
) -> HttpResponse {
    let path = path.split('?').next().unwrap_or(path);
    if method != "GET" {
        return error_response(405, "Method Not Allowed", "Only GET is supported");
    }
    match path {
        "/api/health" => HttpResponse::json(api::health_payload()),
        "/api/wizard" => HttpResponse::json(api::wizard_payload(state)),
        "/api/runes" => HttpResponse::json(api::runes_payload(state)),
        "/api/monsters" => HttpResponse::json(api::monsters_payload(state)),
        path if path.starts_with("/api/monsters/") => {
            let raw_id = path.trim_start_matches("/api/monsters/").trim_end_matches('/');
            let Ok(unit_id) = raw_id.parse::<u64>() else {
                return error_response(400, "Bad Request", &format!("Invalid unit id: {raw_id}"));
            };
            match api::monster_detail_payload(state, unit_id) {
                Some(payload) => HttpResponse::json(payload),
                None => error_response(404, "Not Found", &format!("No monster with unit id {unit_id}")),
            }
        }
        _ => error_response(404, "Not Found", "Route not found"),
    }
}

fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    }
}
