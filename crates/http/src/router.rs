//! Router assembly for the SHELF HTTP server.

use axum::{extract::Request, http::HeaderValue, routing::get, Router};
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestId, RequestId, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use uuid::{Timestamp, Uuid};

use shelf_kernel::ModuleRegistry;

/// Builder chaining global middleware, bare routes, and module mounts into
/// the final router.
pub struct RouterBuilder {
    router: Router,
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self {
            router: Router::new(),
        }
    }

    /// Register a bare route on the root router.
    pub fn route(mut self, path: &str, route: axum::routing::MethodRouter) -> Self {
        self.router = self.router.route(path, route);
        self
    }

    /// Nest a module's routes under `/api/{name}`.
    pub fn mount_module(mut self, module_name: &str, module_router: Router) -> Self {
        let mount = format!("/api/{module_name}");
        self.router = self.router.nest(&mount, module_router);
        self
    }

    /// Request/response logging at INFO, spans capturing headers.
    pub fn with_tracing(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
        );
        self
    }

    /// CORS middleware; any origin, method, and header is accepted.
    pub fn with_cors(mut self) -> Self {
        self.router = self.router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
        self
    }

    /// Stamp an `x-request-id` header on requests that lack one.
    pub fn with_request_id(mut self) -> Self {
        self.router = self
            .router
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));
        self
    }

    /// Answer 408 to requests that run longer than `timeout_ms`.
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.router = self
            .router
            .layer(TimeoutLayer::new(Duration::from_millis(timeout_ms)));
        self
    }

    /// Collect every module's OpenAPI fragment into one document and serve
    /// it as plain JSON at `/docs/openapi.json`.
    pub fn with_openapi(mut self, registry: &ModuleRegistry) -> Self {
        let mut document = base_document();
        for module in registry.modules() {
            if let Some(fragment) = module.openapi() {
                merge_fragment(&mut document, module.name(), &fragment);
            }
        }

        // Round-trip through the typed model so a malformed fragment is
        // caught here rather than by consumers of the document.
        let served: utoipa::openapi::OpenApi =
            serde_json::from_value(document).unwrap_or_else(|error| {
                tracing::warn!(%error, "merged OpenAPI document is malformed; serving base info");
                utoipa::openapi::OpenApiBuilder::new()
                    .info(
                        utoipa::openapi::InfoBuilder::new()
                            .title("SHELF API")
                            .version("1.0.0")
                            .build(),
                    )
                    .build()
            });

        self.router = self.router.route(
            "/docs/openapi.json",
            get(move || async move { axum::Json(served.clone()) }),
        );
        self
    }

    pub fn build(self) -> Router {
        self.router
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Document skeleton: server-level metadata, the health probe, and the
/// response envelope schema every module refers to.
fn base_document() -> serde_json::Value {
    serde_json::json!({
        "openapi": "3.1.0",
        "info": {
            "title": "SHELF API",
            "version": "1.0.0",
            "description": "Bookshelf record-keeper API"
        },
        "paths": {
            "/healthz": {
                "get": {
                    "summary": "Health check",
                    "responses": {
                        "200": {
                            "description": "OK",
                            "content": {
                                "text/plain": {
                                    "schema": {"type": "string"}
                                }
                            }
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Envelope": {
                    "type": "object",
                    "properties": {
                        "status": {
                            "type": "string",
                            "enum": ["success", "fail", "error"]
                        },
                        "message": {"type": "string"},
                        "data": {"type": "object"}
                    },
                    "required": ["status"]
                }
            }
        }
    })
}

/// Fold one module's fragment into `document`, rebasing its relative paths
/// onto the module's mount point.
fn merge_fragment(document: &mut serde_json::Value, mount: &str, fragment: &serde_json::Value) {
    if let Some(paths) = fragment.get("paths").and_then(|paths| paths.as_object()) {
        for (path, item) in paths {
            let rebased = if path == "/" {
                format!("/api/{mount}")
            } else {
                format!("/api/{mount}{path}")
            };
            document["paths"][rebased] = item.clone();
        }
    }

    if let Some(schemas) = fragment
        .pointer("/components/schemas")
        .and_then(|schemas| schemas.as_object())
    {
        for (name, schema) in schemas {
            document["components"]["schemas"][name] = schema.clone();
        }
    }
}

/// Request ID generator; ids are time-ordered UUIDs
#[derive(Clone)]
struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let timestamp = Timestamp::now(uuid::NoContext);
        let request_id = Uuid::new_v7(timestamp)
            .to_string()
            .parse::<HeaderValue>()
            .ok()?;
        Some(RequestId::new(request_id))
    }
}
