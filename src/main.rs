use clap::Parser;
use family_annotator::utils::{logger, validation::Validate};
use family_annotator::{AnnotationEngine, CliConfig, TokioProcessRunner};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting family-annotator");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let settings = match cli.resolve().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(2);
        }
    };

    let runner = TokioProcessRunner::new().with_timeout(settings.timeout);
    let output = settings.output.clone();
    let engine = AnnotationEngine::new(settings, Arc::new(runner));

    match engine.run().await {
        Ok(summary) => {
            tracing::info!("✅ Annotation finished");
            println!(
                "✅ {} families written to {} ({} annotated)",
                summary.families,
                output.display(),
                summary.annotated
            );
        }
        Err(e) => {
            tracing::error!("❌ Annotation run failed: {}", e);
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }
}
