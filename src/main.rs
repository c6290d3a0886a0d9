use clap::Parser;
use dotreview::core::dashboard::{self, Dashboard};
use dotreview::core::insights::build_provider;
use dotreview::domain::ports::InsightProvider;
use dotreview::report::{self, text};
use dotreview::utils::error::{DotReviewError, ErrorSeverity};
use dotreview::utils::{logger, validation::Validate};
use dotreview::{
    AppConfig, CliConfig, Command, DatasetCache, LocalFileSource, Nutrient, ProductStore,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 先讀配置檔，日誌設定可能來自其中
    let file_config = cli.load_file_config();
    let (json_logs, verbose) = match &file_config {
        Ok(config) => (cli.log_json || config.json_logs(), cli.verbose || config.verbose()),
        Err(_) => (cli.log_json, cli.verbose),
    };

    // 初始化日誌
    if json_logs {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("Starting dotreview");
    tracing::debug!("CLI config: {:?}", cli);

    let file_config = match file_config {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    // 驗證配置
    if let Err(e) = file_config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    // 行程內唯一的資料集快取
    let mut cache = DatasetCache::new();

    match run(&cli, &file_config, &mut cache).await {
        Ok(output) => {
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
        }
        Err(e) => exit_with(&e),
    }

    Ok(())
}

/// 需要資料集的 view 共用的狀態
struct DatasetContext {
    store: Arc<ProductStore>,
    provider: Box<dyn InsightProvider>,
}

impl DatasetContext {
    fn load(
        cli: &CliConfig,
        file_config: &AppConfig,
        cache: &mut DatasetCache,
    ) -> dotreview::Result<Self> {
        let data_path = cli.data_path(file_config);
        let store = cache.get_or_load(&LocalFileSource::default(), &data_path)?;
        let provider = build_provider(&file_config.insights());
        Ok(Self { store, provider })
    }

    fn dashboard(&self) -> Dashboard<'_> {
        Dashboard::new(&self.store, self.provider.as_ref())
    }
}

async fn run(
    cli: &CliConfig,
    file_config: &AppConfig,
    cache: &mut DatasetCache,
) -> dotreview::Result<String> {
    let format = cli.format;

    match &cli.command {
        Command::Guidelines => {
            let sections = dashboard::guidelines();
            report::render(&sections, format, |s| text::guidelines(s))
        }
        Command::Bmi { weight, height } => {
            let result = dashboard::bmi(*weight, *height)?;
            report::render(&result, format, text::bmi)
        }
        Command::Calories {
            weight,
            height,
            age,
            gender,
            activity,
        } => {
            let estimate = dashboard::daily_calories(*weight, *height, *age, gender, activity)?;
            report::render(&estimate, format, text::calories)
        }
        Command::Analyze { name } => {
            let context = DatasetContext::load(cli, file_config, cache)?;
            let view = context
                .dashboard()
                .single_product(name, !cli.no_insights)
                .await?;
            report::render(&view, format, text::single_product)
        }
        Command::Compare { first, second } => {
            let context = DatasetContext::load(cli, file_config, cache)?;
            let view = context.dashboard().comparison(first, second)?;
            report::render(&view, format, text::comparison)
        }
        Command::Search { query, limit } => {
            let context = DatasetContext::load(cli, file_config, cache)?;
            let products = context.dashboard().search(query, *limit);
            let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
            report::render(&names, format, |_| text::search_results(query, &products))
        }
        Command::Top { nutrient, n } => {
            let nutrient: Nutrient = nutrient.parse()?;
            let context = DatasetContext::load(cli, file_config, cache)?;
            let ranking = context.dashboard().top_products(nutrient, *n)?;
            report::render(&ranking, format, text::ranking)
        }
    }
}

/// 輸出使用者看得懂的訊息，依嚴重程度決定退出碼
fn exit_with(e: &DotReviewError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::debug!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}
