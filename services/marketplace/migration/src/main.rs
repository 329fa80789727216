use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(ucademic_marketplace_migration::Migrator).await;
}
