#[tokio::main]
async fn main() -> anyhow::Result<()> {
    joinflow_lib::run().await
}
