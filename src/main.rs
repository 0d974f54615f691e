#[cfg(not(feature = "playback"))]
fn main() {
    eprintln!(
        "The dataclip CLI requires the \"playback\" feature. Rebuild with `--features playback` to enable it."
    );
}

#[cfg(feature = "playback")]
mod cli {
    use std::env;
    use std::fs;
    use std::time::Duration;

    use anyhow::{bail, Context, Result};
    use dataclip::decode::rodio::RodioFileDecoder;
    use dataclip::sink::rodio::RodioPlaybackSink;
    use dataclip::{AudioFormat, AudioLoader, LoadOutcome, LoaderConfig};

    struct Args {
        source: String,
        format: Option<AudioFormat>,
        config_path: Option<String>,
        label: String,
    }

    fn print_usage(program: &str) {
        eprintln!("Usage: {program} [OPTIONS] <DATA_URL | @FILE>");
        eprintln!();
        eprintln!("Decode a base64 audio data URL and play it on the default audio device.");
        eprintln!("Pass @FILE to read the data URL from a file instead of the command line.");
        eprintln!();
        eprintln!("Options:");
        eprintln!("  --format <ogg|mp3|wav|flac>  Declared codec of the payload (default: ogg)");
        eprintln!("  --config <FILE>              JSON loader configuration");
        eprintln!("  --label <NAME>               Diagnostic label for log lines (default: cli)");
        eprintln!("  -h, --help                   Show this help");
    }

    fn parse_args() -> Result<Option<Args>> {
        let mut argv = env::args();
        let program = argv.next().unwrap_or_else(|| "dataclip".to_string());

        let mut source = None;
        let mut format = None;
        let mut config_path = None;
        let mut label = "cli".to_string();

        while let Some(arg) = argv.next() {
            match arg.as_str() {
                "-h" | "--help" => {
                    print_usage(&program);
                    return Ok(None);
                }
                "--format" => {
                    let value = argv.next().context("--format requires a value")?;
                    format = Some(value.parse::<AudioFormat>()?);
                }
                "--config" => {
                    config_path = Some(argv.next().context("--config requires a value")?);
                }
                "--label" => {
                    label = argv.next().context("--label requires a value")?;
                }
                other if other.starts_with("--") => bail!("unknown option '{other}'"),
                other => {
                    if source.is_some() {
                        bail!("unexpected extra argument '{other}'");
                    }
                    source = Some(other.to_string());
                }
            }
        }

        let source = match source {
            Some(s) => s,
            None => {
                print_usage(&program);
                bail!("missing data URL argument");
            }
        };

        Ok(Some(Args {
            source,
            format,
            config_path,
            label,
        }))
    }

    fn load_config(path: Option<&str>) -> Result<LoaderConfig> {
        match path {
            Some(p) => {
                let raw = fs::read_to_string(p)
                    .with_context(|| format!("failed to read config '{p}'"))?;
                serde_json::from_str(&raw).with_context(|| format!("invalid config '{p}'"))
            }
            None => Ok(LoaderConfig::default()),
        }
    }

    fn read_data_url(source: &str) -> Result<String> {
        if let Some(path) = source.strip_prefix('@') {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read data URL from '{path}'"))?;
            Ok(raw.trim().to_string())
        } else {
            Ok(source.to_string())
        }
    }

    pub fn run() -> Result<()> {
        tracing_subscriber::fmt::init();

        let args = match parse_args()? {
            Some(args) => args,
            None => return Ok(()),
        };

        let mut config = load_config(args.config_path.as_deref())?;
        if let Some(format) = args.format {
            config.format = format;
        }

        let data_url = read_data_url(&args.source)?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to build tokio runtime")?;

        runtime.block_on(async move {
            let sink = RodioPlaybackSink::new()?;
            let loader = AudioLoader::new(config);
            let decoder = RodioFileDecoder;

            match loader
                .load_and_play(&data_url, &sink, &decoder, &args.label)
                .await?
            {
                LoadOutcome::Started(started) => {
                    println!(
                        "Playing {:?} of audio (scratch file '{}')",
                        started.clip_duration,
                        started.scratch_path.display()
                    );

                    // Let the clip ring out, then wait for the deferred
                    // deletion so the scratch file is gone before exit.
                    tokio::time::sleep(started.clip_duration + Duration::from_millis(250)).await;
                    started
                        .cleanup
                        .await
                        .context("cleanup task was aborted")?;
                }
                LoadOutcome::Unavailable { reason } => {
                    eprintln!("Audio unavailable: {reason}");
                }
            }

            Ok(())
        })
    }
}

#[cfg(feature = "playback")]
fn main() {
    if let Err(err) = cli::run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
