pub use today::api::handler;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    today::setup_logging();
    lambda_runtime::run(lambda_runtime::service_fn(handler::function_handler)).await
}
