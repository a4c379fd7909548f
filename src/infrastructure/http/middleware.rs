//! HTTP Middleware
//!
//! HTTP 状态码错误日志中间件

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// HTTP 状态码错误日志中间件
///
/// 业务错误（errno != 0）以 HTTP 200 返回，在 ApiError::into_response() 中记录；
/// 这里只记录框架层面的拒绝，如 JSON 解析失败、请求体超限
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            elapsed_ms = elapsed_ms,
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            elapsed_ms = elapsed_ms,
            "HTTP client error"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use crate::infrastructure::http::handlers::test_util::{app, send};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };

    #[tokio::test]
    async fn test_unknown_route_is_client_error() {
        let request = Request::builder()
            .uri("/api/unknown")
            .body(Body::empty())
            .unwrap();

        let (status, _) = send(&app(), request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/novel/delete")
            .header("content-type", "application/json")
            .body(Body::from("{ not json"))
            .unwrap();

        let (status, _) = send(&app(), request).await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        // 测试应用的上限是 1 MiB 加 multipart 余量
        let request = Request::builder()
            .method("POST")
            .uri("/api/novel/import")
            .header("content-type", "application/json")
            .body(Body::from(vec![b' '; 4 * 1024 * 1024]))
            .unwrap();

        let (status, _) = send(&app(), request).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }
}
