use anyhow::{Context, bail};
use clap::{Arg, ArgAction, Command, value_parser};
use polyglot_i18n::{
    EngineConfig, NamingPattern, SizeCheck, catalog, featured, load_document_from_file,
    resolve_codes,
};
use polyglot_i18n_mt::{
    DirectorySink, GoogleTranslateProvider, MachineTranslator, MockMode, MockTranslator,
    OpenAiProvider, RunCoordinator, TranslationJob,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let matches = Command::new("polyglot-mt")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Machine-translate a .properties or .json file into many languages")
        .arg(
            Arg::new("file")
                .help("Source localization file (.properties or .json)")
                .required_unless_present("list-languages")
                .value_parser(value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("language")
                .long("language")
                .short('l')
                .help("Target language code, repeat for more (e.g. -l es -l fr)")
                .required_unless_present("list-languages")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("pattern")
                .long("pattern")
                .short('p')
                .help("Output naming pattern (default: {originalFileName}_{languageCode})"),
        )
        .arg(
            Arg::new("out")
                .long("out")
                .short('o')
                .help("Directory for translated files")
                .value_parser(value_parser!(PathBuf))
                .default_value("."),
        )
        .arg(
            Arg::new("provider")
                .long("provider")
                .help("Translation provider")
                .value_parser(["openai", "google", "mock"])
                .default_value("openai"),
        )
        .arg(
            Arg::new("max-concurrency")
                .long("max-concurrency")
                .help("Provider calls allowed in flight at once")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("list-languages")
                .long("list-languages")
                .help("Print the supported languages and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log every translated string")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let level = if matches.get_flag("verbose") { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.parse()?))
        .init();

    if matches.get_flag("list-languages") {
        print_languages();
        return Ok(());
    }

    let mut config = EngineConfig::from_env().context("Invalid engine configuration")?;
    if let Some(max_concurrency) = matches.get_one::<usize>("max-concurrency") {
        config.max_concurrency = *max_concurrency;
    }
    config.validate()?;

    // Pattern and languages are checked before any provider is built
    let pattern = matches
        .get_one::<String>("pattern")
        .unwrap_or(&config.default_naming_pattern);
    let pattern = NamingPattern::parse(pattern)?;

    let codes: Vec<&String> = matches
        .get_many::<String>("language")
        .map(|values| values.collect())
        .unwrap_or_default();
    let languages = resolve_codes(&codes)?;

    let Some(path) = matches.get_one::<PathBuf>("file") else {
        bail!("No input file given");
    };
    let document = load_document_from_file(path)?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .context("Input path has no file name")?;

    let job = TranslationJob::new(document, languages, pattern, file_name);
    let translator = build_translator(matches.get_one::<String>("provider").map(|s| s.as_str()))?;
    let coordinator = RunCoordinator::new(translator, config);

    let (total_units, size) = coordinator.estimate(&job);
    match size {
        SizeCheck::TooLarge => {
            bail!("❌ {} ({} units)", size.message().unwrap_or_default(), total_units)
        }
        SizeCheck::Warning => {
            println!("⚠️  {} ({} units)", size.message().unwrap_or_default(), total_units)
        }
        SizeCheck::Ok => {}
    }

    let out = matches
        .get_one::<PathBuf>("out")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));
    let sink = DirectorySink::new(&out);

    let progress = coordinator.progress();
    let reporter = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_millis(500));
        let mut last = -1.0;
        loop {
            ticker.tick().await;
            let snapshot = progress.snapshot();
            if snapshot.total > 0 && snapshot.percent != last {
                info!("{}: {}", snapshot.label(), snapshot.percent_text());
                last = snapshot.percent;
            }
        }
    });

    let result = coordinator.submit(job, &sink).await;
    reporter.abort();

    match result {
        Ok(Some(report)) => {
            println!("✅ Wrote {} files to {}", report.bundle.len(), out.display());
            for file in &report.bundle.files {
                println!("   {}", file.file_name);
            }
            Ok(())
        }
        Ok(None) => {
            println!("Nothing to translate");
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Translation failed: {}", e);
            Err(e.into())
        }
    }
}

fn build_translator(provider: Option<&str>) -> anyhow::Result<Arc<dyn MachineTranslator>> {
    let translator: Arc<dyn MachineTranslator> = match provider {
        Some("google") => Arc::new(GoogleTranslateProvider::from_env()?),
        Some("mock") => Arc::new(MockTranslator::new(MockMode::Suffix)),
        _ => Arc::new(OpenAiProvider::from_env().context(
            "Set OPENAI_API_KEY, or use --provider google / --provider mock",
        )?),
    };
    info!("Using {}", translator.provider_name());
    Ok(translator)
}

fn print_languages() {
    let featured = featured();
    for language in catalog() {
        let marker = if featured.contains(language) { "⭐" } else { "  " };
        println!("{} {:<6} {}", marker, language.code(), language.name());
    }
}
