//! Command-line entry point: one image in, one header out.

use clap::Parser;

use imconv_lib::{AppConfig, Args};

fn main() -> anyhow::Result<()> {
    let dotenv = imconv_lib::load_dotenv();
    imconv_lib::init_tracing();
    match dotenv {
        Some(path) => tracing::debug!("Loaded .env from: {path}"),
        None => tracing::debug!("No .env file found, using system environment variables"),
    }

    let config = AppConfig::from_args(Args::parse());
    config.validate()?;

    let report = imconv_lib::run(&config)?;
    tracing::info!(
        header = %report.header_path.display(),
        width = report.width,
        height = report.height,
        data_len = report.data_len,
        "Done"
    );
    Ok(())
}
