//! Bookshelf module: CRUD over an in-memory, insertion-ordered collection.

pub mod handlers;
pub mod models;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    routing::{get, post},
    Router,
};
use serde_json::json;

use shelf_kernel::{InitCtx, Module};

use store::{BookStore, SharedBookStore};

/// Books module: owns the shared store and exposes the CRUD routes.
pub struct BooksModule {
    store: SharedBookStore,
}

impl BooksModule {
    pub fn new() -> Self {
        Self {
            store: Arc::new(BookStore::new()),
        }
    }
}

impl Default for BooksModule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", post(handlers::add_book).get(handlers::list_books))
            .route(
                "/{id}",
                get(handlers::get_book)
                    .put(handlers::update_book)
                    .delete(handlers::delete_book),
            )
            .with_state(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books",
                        "description": "Summaries in insertion order. When several filters are supplied, the last one in the order name, reading, finished decides the result.",
                        "tags": ["Books"],
                        "parameters": [
                            {
                                "name": "name",
                                "in": "query",
                                "required": false,
                                "description": "Case-insensitive substring match on the book name",
                                "schema": {"type": "string"}
                            },
                            {
                                "name": "reading",
                                "in": "query",
                                "required": false,
                                "description": "1 selects books being read, 0 the rest",
                                "schema": {"type": "string", "enum": ["0", "1"]}
                            },
                            {
                                "name": "finished",
                                "in": "query",
                                "required": false,
                                "description": "1 selects finished books, 0 the rest",
                                "schema": {"type": "string", "enum": ["0", "1"]}
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "Matching books",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "status": {"type": "string", "enum": ["success"]},
                                                "data": {
                                                    "type": "object",
                                                    "properties": {
                                                        "books": {
                                                            "type": "array",
                                                            "items": {"$ref": "#/components/schemas/BookSummary"}
                                                        }
                                                    }
                                                }
                                            },
                                            "required": ["status", "data"]
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Add a book",
                        "tags": ["Books"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": {"$ref": "#/components/schemas/BookInput"}
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Book stored",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "status": {"type": "string", "enum": ["success"]},
                                                "message": {"type": "string"},
                                                "data": {
                                                    "type": "object",
                                                    "properties": {
                                                        "bookId": {"type": "string"}
                                                    },
                                                    "required": ["bookId"]
                                                }
                                            },
                                            "required": ["status", "message", "data"]
                                        }
                                    }
                                }
                            },
                            "400": {
                                "description": "Name missing, or readPage greater than pageCount",
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/Envelope"}
                                    }
                                }
                            },
                            "500": {
                                "description": "Book not present after the append",
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/Envelope"}
                                    }
                                }
                            }
                        }
                    }
                },
                "/{id}": {
                    "parameters": [
                        {
                            "name": "id",
                            "in": "path",
                            "required": true,
                            "description": "Book identifier",
                            "schema": {"type": "string"}
                        }
                    ],
                    "get": {
                        "summary": "Fetch a book",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "Full record",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "status": {"type": "string", "enum": ["success"]},
                                                "data": {
                                                    "type": "object",
                                                    "properties": {
                                                        "book": {"$ref": "#/components/schemas/Book"}
                                                    },
                                                    "required": ["book"]
                                                }
                                            },
                                            "required": ["status", "data"]
                                        }
                                    }
                                }
                            },
                            "404": {
                                "description": "Unknown id",
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/Envelope"}
                                    }
                                }
                            }
                        }
                    },
                    "put": {
                        "summary": "Update a book",
                        "description": "Replaces every client-writable field. The finished flag keeps its value from creation.",
                        "tags": ["Books"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": {"$ref": "#/components/schemas/BookInput"}
                                }
                            }
                        },
                        "responses": {
                            "200": {
                                "description": "Book updated",
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/Envelope"}
                                    }
                                }
                            },
                            "400": {
                                "description": "Name missing, or readPage greater than pageCount",
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/Envelope"}
                                    }
                                }
                            },
                            "404": {
                                "description": "Unknown id",
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/Envelope"}
                                    }
                                }
                            }
                        }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "Book removed",
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/Envelope"}
                                    }
                                }
                            },
                            "404": {
                                "description": "Unknown id",
                                "content": {
                                    "application/json": {
                                        "schema": {"$ref": "#/components/schemas/Envelope"}
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "string",
                                "description": "Generated identifier"
                            },
                            "name": {"type": "string"},
                            "year": {"type": "integer"},
                            "author": {"type": "string"},
                            "summary": {"type": "string"},
                            "publisher": {"type": "string"},
                            "pageCount": {"type": "integer"},
                            "readPage": {"type": "integer"},
                            "finished": {
                                "type": "boolean",
                                "description": "Derived from readPage == pageCount at creation"
                            },
                            "reading": {"type": "boolean"},
                            "insertedAt": {
                                "type": "string",
                                "format": "date-time"
                            },
                            "updatedAt": {
                                "type": "string",
                                "format": "date-time"
                            }
                        },
                        "required": [
                            "id", "name", "year", "author", "summary", "publisher",
                            "pageCount", "readPage", "finished", "reading",
                            "insertedAt", "updatedAt"
                        ]
                    },
                    "BookInput": {
                        "type": "object",
                        "properties": {
                            "name": {"type": "string"},
                            "year": {"type": "integer"},
                            "author": {"type": "string"},
                            "summary": {"type": "string"},
                            "publisher": {"type": "string"},
                            "pageCount": {"type": "integer"},
                            "readPage": {
                                "type": "integer",
                                "description": "Must not be greater than pageCount"
                            },
                            "reading": {"type": "boolean"}
                        },
                        "required": ["name"]
                    },
                    "BookSummary": {
                        "type": "object",
                        "properties": {
                            "id": {"type": "string"},
                            "name": {"type": "string"},
                            "publisher": {"type": "string"}
                        },
                        "required": ["id", "name", "publisher"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            books = self.store.len(),
            "books module started"
        );
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(BooksModule::new())
}
