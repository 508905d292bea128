#[tokio::main]
async fn main() {
    katha_vault_be::start_server().await;
}
