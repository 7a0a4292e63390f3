use async_graphql::http::GraphiQLSource;
use async_graphql_axum::GraphQL;
use axum::Router;
use axum::response::{Html, IntoResponse};
use axum::routing::get;

use super::schema::CrewSchema;

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/").finish())
}

/// Serve the schema over HTTP on localhost until the process is stopped.
///
/// `GET /` returns the GraphiQL explorer, `POST /` executes requests.
pub async fn run_server(schema: CrewSchema, port: u16) -> std::io::Result<()> {
    let app = Router::new().route("/", get(graphiql).post_service(GraphQL::new(schema)));

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    tracing::info!(port, "GraphQL server listening");
    axum::serve(listener, app).await
}
