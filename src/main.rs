use clap::Parser;
use rpc_stubgen::utils::{logger, validation::Validate};
use rpc_stubgen::{CliConfig, GenError, Generator, LocalStorage};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    if config.files.is_empty() {
        println!("usage: rpc-stubgen xx.proto");
        return;
    }

    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(&config) {
        tracing::debug!("{} (exit code {})", e, e.exit_code());
        tracing::debug!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }
}

fn run(config: &CliConfig) -> Result<(), GenError> {
    // 驗證配置
    config.validate()?;
    let file_config = config.load_file_config()?;
    let options = config.resolve_options(file_config.as_ref())?;

    tracing::debug!(
        "backends: {:?}, output dir: {:?}",
        options.selection.backends(),
        options.output_dir
    );

    let dry_run = options.dry_run;
    let generator = Generator::new(LocalStorage::new(), options);
    let reports = generator.run(&config.files)?;

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing was written");
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    Ok(())
}
