//! API documentation: an OpenAPI document and a Swagger UI page.

use axum::{response::Html, Json};
use serde_json::{json, Value};

const SWAGGER_UI_VERSION: &str = "5";

fn text_operation(summary: &str, example: &str) -> Value {
    json!({
        "get": {
            "summary": summary,
            "responses": {
                "200": {
                    "description": "OK",
                    "content": { "text/plain": { "schema": { "type": "string" }, "example": example } }
                },
                "500": { "description": "Ticket store error" },
                "503": { "description": "Ticket store unavailable after retries" }
            }
        }
    })
}

/// OpenAPI 3 description of the ticket routes.
pub fn openapi_document() -> Value {
    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "ticket-queue",
            "description": "Numbered-ticket queue",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "paths": {
            "/get_ticket": text_operation(
                "Issue a new ticket",
                "Sure thing, your ticket has number 7. 3 people are waiting",
            ),
            "/call_ticket": text_operation(
                "Call the oldest waiting ticket",
                "Customer with ticket 5, please proceed! 2 waiting",
            ),
            "/list_tickets": text_operation("Report the queue size", "2 people are waiting"),
        }
    })
}

pub async fn openapi_json() -> Json<Value> {
    Json(openapi_document())
}

pub async fn swagger_ui() -> Html<String> {
    Html(format!(
        r##"<!DOCTYPE html>
<html>
<head>
<title>ticket-queue</title>
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/swagger-ui-dist@{v}/swagger-ui.css">
</head>
<body>
<div id="swagger-ui"></div>
<script src="https://cdn.jsdelivr.net/npm/swagger-ui-dist@{v}/swagger-ui-bundle.js"></script>
<script>
SwaggerUIBundle({{ url: "/openapi.json", dom_id: "#swagger-ui" }});
</script>
</body>
</html>"##,
        v = SWAGGER_UI_VERSION
    ))
}
