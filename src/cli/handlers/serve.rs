use crate::graphql::{build_schema, run_server};
use anyhow::Result;

use super::CommandContext;

pub fn handle_serve(ctx: CommandContext, port: u16) -> Result<()> {
    let schema = build_schema(ctx.config, ctx.root);

    println!("Starting GraphQL server on http://localhost:{}", port);
    println!("GraphiQL: http://localhost:{}", port);

    tokio::runtime::Runtime::new()?.block_on(run_server(schema, port))?;
    Ok(())
}
