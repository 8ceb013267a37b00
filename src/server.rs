//! HTTP surface: the GraphQL endpoint, uploaded files, and the front-end
//! bundle in production mode.
//!
//! | Route | Behaviour |
//! |-------|-----------|
//! | `POST /graphql` | Execute a GraphQL request |
//! | `GET /graphql` | GraphiQL explorer, or execute `?query=...` (queries only) |
//! | `GET /uploads/*` | Static files from the uploads directory |
//! | `GET *` | Front-end bundle with `index.html` fallback (production only) |

use std::path::PathBuf;

use async_graphql::http::GraphiQLSource;
use async_graphql::parser::{parse_query, types::OperationType};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Router,
    extract::{RawQuery, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::{error, info};

use crate::error::Result;
use crate::graphql::CatalogSchema;

pub const GRAPHQL_PATH: &str = "/graphql";

/// Directories served next to the GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct StaticAssets {
    pub uploads_dir: PathBuf,
    /// Front-end bundle; `None` outside production mode.
    pub client_dir: Option<PathBuf>,
}

pub fn router(schema: CatalogSchema, assets: StaticAssets) -> Router {
    let mut app = Router::new()
        .route(GRAPHQL_PATH, get(graphql_get).post(graphql_post))
        .nest_service("/uploads", ServeDir::new(&assets.uploads_dir));

    if let Some(client_dir) = &assets.client_dir {
        let index = client_dir.join("index.html");
        app = app.fallback_service(ServeDir::new(client_dir).fallback(ServeFile::new(index)));
    }

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(schema)
}

async fn graphql_post(State(schema): State<CatalogSchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

async fn graphql_get(
    State(schema): State<CatalogSchema>,
    RawQuery(query): RawQuery,
) -> Response {
    let explorer = || Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish()).into_response();

    let Some(query) = query.filter(|q| !q.is_empty()) else {
        return explorer();
    };
    let request = match async_graphql::http::parse_query_string(&query) {
        Ok(request) => request,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    // No document to run, whatever other parameters came along.
    if request.query.trim().is_empty() {
        return explorer();
    }

    if selects_mutation(&request) {
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            "Can only perform a mutation operation from a POST request.",
        )
            .into_response();
    }

    GraphQLResponse::from(schema.execute(request).await).into_response()
}

/// Whether the operation that would run for `request` is a mutation.
///
/// Documents that fail to parse are left to the executor, which reports the
/// syntax error in the response envelope.
fn selects_mutation(request: &async_graphql::Request) -> bool {
    let Ok(document) = parse_query(&request.query) else {
        return false;
    };
    let selected = request.operation_name.as_deref();

    document.operations.iter().any(|(name, operation)| {
        operation.node.ty == OperationType::Mutation
            && selected.is_none_or(|wanted| name.map(|n| n.as_str()) == Some(wanted))
    })
}

/// Binds and serves until Ctrl+C or SIGTERM.
pub async fn run_server(schema: CatalogSchema, address: &str, assets: StaticAssets) -> Result<()> {
    let app = router(schema, assets);

    let listener = TcpListener::bind(address).await?;
    info!("server started at {}", listener.local_addr()?);
    info!("GraphiQL: http://{}{}", listener.local_addr()?, GRAPHQL_PATH);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(query: &str) -> async_graphql::Request {
        async_graphql::Request::new(query)
    }

    #[test]
    fn test_query_is_not_mutation() {
        assert!(!selects_mutation(&request("{ events { title } }")));
        assert!(!selects_mutation(&request("query Q { users { email } }")));
    }

    #[test]
    fn test_mutation_detected() {
        assert!(selects_mutation(&request(
            r#"mutation { createUser(userInput: {email: "a@b.com", password: "x"}) { _id } }"#
        )));
    }

    #[test]
    fn test_operation_name_selects_operation() {
        let document = "query Q { events { title } } mutation M { createEvent(eventInput: {title: \"t\", description: \"d\", price: 1, date: \"2024-01-01\"}) { _id } }";

        assert!(!selects_mutation(&request(document).operation_name("Q")));
        assert!(selects_mutation(&request(document).operation_name("M")));
    }

    #[test]
    fn test_unparseable_document_is_left_to_executor() {
        assert!(!selects_mutation(&request("mutation {")));
    }
}
