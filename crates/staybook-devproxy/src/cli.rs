//! Command-line interface definition

use clap::{ArgAction, Parser};
use std::net::SocketAddr;

use staybook_client::config::PRODUCTION_BASE_URL;

/// Development proxy: forwards `/api` requests from a local frontend dev
/// server to the booking backend, rewriting the origin on the way through.
#[derive(Parser, Debug)]
#[command(name = "staybook-devproxy", version, about)]
pub struct Cli {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:5173")]
    pub listen: SocketAddr,

    /// Backend origin requests are forwarded to
    #[arg(long, env = "BACKEND_URL", default_value = PRODUCTION_BASE_URL)]
    pub backend: String,

    /// Path prefix selecting the requests to forward
    #[arg(long, default_value = "/api")]
    pub path_prefix: String,

    /// Verify the backend's TLS certificate (relaxed by default; this is a
    /// development tool)
    #[arg(long)]
    pub verify_tls: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Default tracing filter for the chosen verbosity
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "staybook_devproxy=info",
            1 => "staybook_devproxy=debug",
            _ => "staybook_devproxy=trace,tower=debug",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["staybook-devproxy"]);
        assert_eq!(cli.path_prefix, "/api");
        assert_eq!(cli.backend, PRODUCTION_BASE_URL);
        assert!(!cli.verify_tls);
        assert_eq!(cli.log_filter(), "staybook_devproxy=info");
    }

    #[test]
    fn test_backend_flag_overrides_default() {
        let cli = Cli::parse_from([
            "staybook-devproxy",
            "--backend",
            "http://localhost:5000",
            "-vv",
        ]);
        assert_eq!(cli.backend, "http://localhost:5000");
        assert_eq!(cli.log_filter(), "staybook_devproxy=trace,tower=debug");
    }
}
