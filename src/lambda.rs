use aws_config::BehaviorVersion;
use aws_lambda_events::event::s3::S3Event;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::Client as S3Client;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use submission_relay::domain::model::RelayResponse;
use submission_relay::utils::{logger, validation::Validate};
use submission_relay::{AirtableClient, LambdaConfig, ObjectRef, RelayEngine, S3Storage};

type Engine = RelayEngine<S3Storage, AirtableClient>;

async fn function_handler(engine: &Engine, event: LambdaEvent<S3Event>) -> Result<RelayResponse, Error> {
    tracing::info!(request_id = %event.context.request_id, "Starting relay");

    let object = match ObjectRef::from_s3_event(&event.payload) {
        Ok(object) => object,
        Err(e) => {
            tracing::error!("❌ {}", e);
            return Ok(RelayResponse::failure(None));
        }
    };

    let response = engine.relay(&object).await;
    tracing::info!(status = response.status_code, "Relay finished");
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    // 設定只在冷啟動時讀取一次
    let lambda_config = LambdaConfig::from_env()?;
    lambda_config.validate()?;

    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let config = aws_sdk_s3::config::Builder::from(&config)
        .region(Region::new(lambda_config.s3_region.clone()))
        .build();
    let storage = S3Storage::new(S3Client::from_conf(config));

    let writer = AirtableClient::new(&lambda_config.relay.airtable);
    let engine = RelayEngine::new(storage, writer, lambda_config.relay.fields);

    run(service_fn(|event| function_handler(&engine, event))).await
}
