//! HTTP Middleware

use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};
use std::time::Instant;

/// 4xx / 5xx 响应日志
///
/// 业务错误（errno != 0）走 HTTP 200，由 ApiError::into_response 记录；
/// 这里只覆盖路由不匹配、请求体解析失败等框架层错误
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if response.status().is_server_error() {
        tracing::error!(method = %method, uri = %uri, status, elapsed_ms, "HTTP server error");
    } else if response.status().is_client_error() {
        tracing::warn!(method = %method, uri = %uri, status, elapsed_ms, "HTTP client error");
    }

    response
}
