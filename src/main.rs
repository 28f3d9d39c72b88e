#[tokio::main]
async fn main() -> Result<(), stockpulse_lib::domain::error::AppError> {
    stockpulse_lib::run().await
}
