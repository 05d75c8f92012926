use anyhow::Context;
use clap::Parser;
use csi_extstorage::{config::Cli, Error, Invocation, Outcome};
use csi_proto::GrpcPlugin;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    )
    .with_writer(std::io::stderr)
    .with_ansi(false)
    .init();

  let cli = Cli::parse();
  match run(&cli).await {
    Ok(Outcome::Attached(device)) => {
      println!("{}", device.display());
      ExitCode::SUCCESS
    }
    Ok(Outcome::Done) => ExitCode::SUCCESS,
    Err(e) => {
      eprintln!("{:#}", e);
      ExitCode::FAILURE
    }
  }
}

async fn run(cli: &Cli) -> anyhow::Result<Outcome> {
  let invocation = Invocation::new(
    cli.verb()?,
    cli.volume_request(),
    &cli.storage_root,
    cli.timeout(),
  );

  let plugin = async {
    let tls = cli.plugin_tls().await?;
    Ok::<_, Error>(GrpcPlugin::connect_with_tls(&cli.csi_endpoint, tls).await?)
  };

  invocation
    .run(cli.open_store(), plugin)
    .await
    .with_context(|| {
      format!(
        "{} {} failed",
        invocation.verb(),
        invocation.request().name()
      )
    })
}
