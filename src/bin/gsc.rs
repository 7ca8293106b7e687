use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    search_console::cli::run().await
}
