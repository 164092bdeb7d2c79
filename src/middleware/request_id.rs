// ABOUTME: Request ID generation and per-request tracing spans
// ABOUTME: Tags every request with an x-request-id and echoes it on the response
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

use http::{HeaderMap, HeaderName, HeaderValue, Request};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tracing::{info_span, Span};
use uuid::Uuid;

/// Header carrying the request correlation ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Generates `req_<uuid>` request IDs
#[derive(Debug, Clone, Copy, Default)]
pub struct MakePrefixedRequestId;

impl MakeRequestId for MakePrefixedRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = format!("req_{}", Uuid::new_v4().simple());
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Layers that assign a request ID (unless the client sent one) and copy it to the response
#[must_use]
pub fn request_tracing_layers() -> (
    SetRequestIdLayer<MakePrefixedRequestId>,
    PropagateRequestIdLayer,
) {
    let header = HeaderName::from_static(REQUEST_ID_HEADER);
    (
        SetRequestIdLayer::new(header.clone(), MakePrefixedRequestId),
        PropagateRequestIdLayer::new(header),
    )
}

/// Request ID previously assigned to a request, if any
#[must_use]
pub fn request_id_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(ToOwned::to_owned)
}

/// Span for one HTTP request, carrying method, path and request ID
pub fn make_request_span<B>(request: &Request<B>) -> Span {
    let request_id = request_id_from_headers(request.headers()).unwrap_or_default();
    info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_prefixed_and_unique() {
        let request = Request::new(());
        let mut make = MakePrefixedRequestId;
        let first = make.make_request_id(&request).unwrap();
        let second = make.make_request_id(&request).unwrap();

        let first = first.header_value().to_str().unwrap().to_owned();
        assert!(first.starts_with("req_"));
        assert_eq!(first.len(), 36);
        assert_ne!(first.as_str(), second.header_value().to_str().unwrap());
    }

    #[test]
    fn test_request_id_read_from_headers() {
        let mut headers = HeaderMap::new();
        assert_eq!(request_id_from_headers(&headers), None);

        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("req-42"));
        assert_eq!(request_id_from_headers(&headers).as_deref(), Some("req-42"));
    }
}
