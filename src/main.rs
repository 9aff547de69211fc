use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use slideshow_client::AppConfig;
use slideshow_client::app::create_session;
use slideshow_client::modules::job::{JobService, PollEventKind};
use slideshow_client::modules::result::ResultService;
use slideshow_client::modules::selection::MediaFile;

const HELP: &str = "\
Turn a sequence of images (and an optional audio track) into a video
using a remote conversion service.

USAGE:
  slideshow-client [OPTIONS] IMAGE...

OPTIONS:
  --audio FILE             Audio track to mux under the images
  --output FILE            Download the finished video to FILE
  --api-url URL            Service base address [env: CONVERTER_API_URL]
  --poll-interval-ms N     Delay between status checks [env: POLL_INTERVAL_MS]
  --max-polls N            Stop after N status checks [env: POLL_MAX_ATTEMPTS]
  --check                  Only check that the service is reachable
  -h, --help               Print this help

Images are used in the order given.
";

struct Args {
    audio: Option<PathBuf>,
    output: Option<PathBuf>,
    api_url: Option<String>,
    poll_interval_ms: Option<u64>,
    max_polls: Option<u32>,
    check: bool,
    images: Vec<PathBuf>,
}

fn parse_args() -> Result<Option<Args>> {
    let mut pargs = pico_args::Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(None);
    }

    let args = Args {
        check: pargs.contains("--check"),
        audio: pargs.opt_value_from_str("--audio")?,
        output: pargs.opt_value_from_str("--output")?,
        api_url: pargs.opt_value_from_str("--api-url")?,
        poll_interval_ms: pargs.opt_value_from_str("--poll-interval-ms")?,
        max_polls: pargs.opt_value_from_str("--max-polls")?,
        images: pargs.finish().into_iter().map(PathBuf::from).collect(),
    };

    if let Some(flag) = args
        .images
        .iter()
        .find(|p| p.to_string_lossy().starts_with("--"))
    {
        bail!("Unknown option {}", flag.display());
    }

    Ok(Some(args))
}

fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = AppConfig::new()?;

    if let Some(url) = &args.api_url {
        config.set_api_url(url)?;
    }
    if let Some(ms) = args.poll_interval_ms {
        if ms == 0 {
            bail!("--poll-interval-ms must be positive");
        }
        config.poll_interval = std::time::Duration::from_millis(ms);
    }
    if args.max_polls.is_some() {
        config
            .set_max_polls(args.max_polls)
            .context("--max-polls must be positive")?;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let Some(args) = parse_args()? else {
        return Ok(());
    };

    let config = load_config(&args)?;
    let mut session = create_session(config).context("Failed to build HTTP client")?;

    if args.check {
        let health = JobService::health(session.state())
            .await
            .context("Service is not reachable")?;
        println!("Service status: {}", health.status);
        return Ok(());
    }

    let mut images = Vec::with_capacity(args.images.len());
    for path in &args.images {
        images.push(MediaFile::image_from_path(path).await?);
    }
    session.selection_mut().append_images(images);

    if let Some(path) = &args.audio {
        session
            .selection_mut()
            .set_audio(MediaFile::audio_from_path(path).await?);
    }

    info!(
        images = session.selection().len(),
        audio = session.selection().audio().is_some(),
        "Selection ready"
    );

    let job_id = match session.convert().await {
        Ok(id) => id,
        Err(e) if e.is_empty_selection() => bail!("{e}"),
        Err(e) => return Err(anyhow::Error::new(e).context(session.status_text().to_string())),
    };
    println!("Job {job_id}: {}", session.status_text());

    while let Some(event) = session.next_event().await {
        match &event {
            PollEventKind::JobFailed {
                message: Some(message),
            } => println!("Status: {} ({message})", session.status_text()),
            PollEventKind::PollFailed { reason } => {
                println!("Status: {} ({reason})", session.status_text())
            }
            _ => println!("Status: {}", session.status_text()),
        }
    }

    let Some(result) = session.result().cloned() else {
        bail!("No video was produced (last status: {})", session.status_text());
    };

    println!("Download result: {}", result.download_link());
    println!("Playback source: {}", result.playback_source());

    if let Some(dest) = &args.output {
        let bytes = ResultService::download_to(session.state(), &result, dest, |_, _| {}).await?;
        println!("Saved {} bytes to {}", bytes, dest.display());
    }

    Ok(())
}
