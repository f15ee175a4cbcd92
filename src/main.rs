use clap::Parser;
use submission_relay::core::trigger::decode_object_key;
use submission_relay::domain::model::FieldAliases;
use submission_relay::utils::{logger, validation::Validate};
use submission_relay::{
    AirtableClient, CliConfig, DryRunWriter, LocalStorage, ObjectRef, RelayEngine,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting submission-relay CLI");
    tracing::debug!("CLI config: {:?}", cli);

    let key = if cli.encoded_key {
        decode_object_key(&cli.key)?
    } else {
        cli.key.clone()
    };
    let object = ObjectRef {
        bucket: cli.bucket.clone(),
        key,
    };
    let storage = LocalStorage::new(&cli.root);

    let response = if cli.dry_run {
        // Dry run 不需要憑證，讀不到設定時使用預設欄位名
        let aliases = match cli.relay_config() {
            Ok(config) => config.fields,
            Err(e) => {
                tracing::warn!("Using default field names ({})", e);
                FieldAliases::default()
            }
        };
        RelayEngine::new(storage, DryRunWriter, aliases)
            .relay(&object)
            .await
    } else {
        let config = cli.relay_config()?;
        if let Err(e) = config.validate() {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
        let writer = AirtableClient::new(&config.airtable);
        RelayEngine::new(storage, writer, config.fields)
            .relay(&object)
            .await
    };

    println!("{}", response.body);
    if !response.is_success() {
        std::process::exit(1);
    }

    Ok(())
}
