//! Trafficlight — Main Entry Point
//!
//! Monitors one Jenkins job and shows its status on a traffic light
//! connected to the parallel port.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  HttpStatusSource   HardwareLight   StdDelay   LogEventSink  │
//! │  (StatusSource)     (LightPort)     (DelayNs)  (EventSink)   │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ─────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │              PollLoop (pure logic)                     │  │
//! │  │  StatusResolver · LightState cache · SignalDriver      │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;

use trafficlight::adapters::hardware::HardwareLight;
use trafficlight::adapters::http_source::HttpStatusSource;
use trafficlight::adapters::log_sink::LogEventSink;
use trafficlight::adapters::time::StdDelay;
use trafficlight::app::poll_loop::PollLoop;
use trafficlight::config::{FetchFailurePolicy, MonitorConfig};
use trafficlight::drivers::parport::ParallelPort;
use trafficlight::error;

// ── Command line ──────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "trafficlight",
    version,
    about = "trafficlight -- monitors a jenkins job and outputs the status on a trafficlight connected to the parallel port"
)]
struct Cli {
    /// After how many seconds do we update the status of a job
    #[arg(
        short = 'r',
        long = "refreshrate",
        value_name = "seconds",
        env = "TRAFFICLIGHT_REFRESH_RATE"
    )]
    refresh_rate: Option<u32>,

    /// The name of the job to monitor
    #[arg(short, long, value_name = "jobname", env = "TRAFFICLIGHT_JOB")]
    job: Option<String>,

    /// The url of the jenkins server
    #[arg(short, long, value_name = "url", env = "TRAFFICLIGHT_SERVER")]
    server: Option<String>,

    /// JSON config file; flags and environment override its values
    #[arg(short, long, value_name = "file", env = "TRAFFICLIGHT_CONFIG")]
    config: Option<PathBuf>,

    /// Give up on a status request after this many seconds
    #[arg(long, value_name = "seconds", env = "TRAFFICLIGHT_FETCH_TIMEOUT")]
    fetch_timeout: Option<u64>,

    /// Port I/O device the light is written through
    #[arg(long, value_name = "device", env = "TRAFFICLIGHT_PORT_DEVICE")]
    port_device: Option<String>,

    /// Parallel-port data register, decimal or 0x-prefixed hex
    #[arg(
        long,
        value_name = "address",
        value_parser = parse_port_address,
        env = "TRAFFICLIGHT_PORT_ADDRESS"
    )]
    port_address: Option<u16>,

    /// Stop at the first failed status request instead of retrying
    #[arg(long)]
    exit_on_fetch_failure: bool,
}

impl Cli {
    /// Layer the flags over the config file (or the defaults).
    fn into_config(self) -> error::Result<MonitorConfig> {
        let mut config = match &self.config {
            Some(path) => MonitorConfig::from_file(path)?,
            None => MonitorConfig::default(),
        };

        if let Some(rate) = self.refresh_rate {
            config.refresh_rate_secs = rate;
        }
        if let Some(job) = self.job {
            config.job = job;
        }
        if let Some(server) = self.server {
            config.server = server;
        }
        if let Some(timeout) = self.fetch_timeout {
            config.fetch_timeout_secs = timeout;
        }
        if let Some(device) = self.port_device {
            config.port_device = device;
        }
        if let Some(address) = self.port_address {
            config.port_address = address;
        }
        if self.exit_on_fetch_failure {
            config.on_fetch_failure = FetchFailurePolicy::Exit;
        }
        Ok(config)
    }
}

fn parse_port_address(s: &str) -> Result<u16, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid port address {s:?}: {e}"))
}

// ── Boot ──────────────────────────────────────────────────────

/// Everything that is fatal: configuration, then the output device.
fn boot(cli: Cli) -> error::Result<(MonitorConfig, HardwareLight)> {
    // ── 1. Configuration ──────────────────────────────────────
    let config = cli.into_config()?;
    config.validate()?;

    info!("Trafficlights! v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Acquire the output device ──────────────────────────
    let port = ParallelPort::open(&config.port_device, config.port_address)?;
    info!("Trafficlight initialised.");

    Ok((config, HardwareLight::new(port)))
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let (config, mut light) = boot(cli).context("startup failed")?;

    // ── 3. Construct adapters + core ──────────────────────────
    let source = HttpStatusSource::new(config.fetch_timeout());
    let mut delay = StdDelay::new();
    let mut sink = LogEventSink::new();
    let mut poll_loop = PollLoop::new(source, &config);

    info!("Updating status every {} seconds.", config.refresh_rate_secs);
    info!("Job name is {}", config.job);
    info!("Server is {}", config.server);

    // ── 4. Run until killed (or the exit policy fires) ────────
    let outcome = poll_loop.run(&mut light, &mut delay, &mut sink);
    info!("Trafficlight loop stopped after {}s.", delay.uptime_secs());
    match outcome {
        Ok(never) => match never {},
        Err(e) => Err(e).context("poll loop stopped"),
    }
}
