use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    vendora_observability::init();

    let app = vendora_api::app::build_app();

    let addr = std::env::var("VENDORA_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "vendora api listening");

    axum::serve(listener, app).await?;
    Ok(())
}
