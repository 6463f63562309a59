use clap::Parser;
use std::time::Duration;

use menu_labeler::acquire::{DEFAULT_TIMEOUT, PageFetcher};
use menu_labeler::cli::{Cli, Command, InputSource};
use menu_labeler::export::{self, OutputFormat};
use menu_labeler::pipeline::MenuPipeline;
use menu_labeler::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    #[cfg(feature = "web")]
    {
        // A provider may already be installed by a dependency; either is fine.
        let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
    }

    match Cli::parse().command {
        Command::Label {
            input,
            name,
            output,
            timeout_secs,
        } => {
            // Reject bad output paths before doing any work.
            OutputFormat::from_path(&output)?;
            let fetcher = PageFetcher::new(Duration::from_secs(timeout_secs))?;
            let mut pipeline = MenuPipeline::new(fetcher);

            run_label(&mut pipeline, input, name.unwrap_or_default()).await?;

            let output_path = export::unique_output_path(&output);
            export::export(&output_path, pipeline.results())?;

            match pipeline.summary() {
                Some(summary) => println!("\n{summary}"),
                None => println!("No results to summarize"),
            }
        }
        Command::Serve { bind } => {
            let fetcher = PageFetcher::new(DEFAULT_TIMEOUT)?;
            server::serve(&bind, fetcher).await?;
        }
    }

    Ok(())
}

async fn run_label(
    pipeline: &mut MenuPipeline,
    input: InputSource,
    name: String,
) -> anyhow::Result<()> {
    if let Some(pdf) = input.pdf {
        pipeline.process_pdf(&pdf).await?;
    } else if let Some(url) = input.url {
        pipeline.process_url(&url, &name).await?;
    } else if let Some(dir) = input.pdfs_dir {
        pipeline.process_pdfs_directory(&dir).await?;
    } else if let Some(list) = input.restaurants_json {
        pipeline.process_restaurants_json(&list).await?;
    }
    Ok(())
}
