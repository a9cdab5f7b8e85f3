#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logcat_reader::run().await
}
