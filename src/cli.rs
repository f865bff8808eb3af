use std::env;
use std::net::SocketAddr;
use std::process;

use getopts::Options;
use tokio::time::Duration;

pub const ADDRESS_VAR: &str = "ACADEMY_FEED_ADDR";

#[derive(Debug)]
pub struct Args {
    pub address: SocketAddr,
    pub enable_cache: bool,
    pub cache_ttl: Duration,
}

fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag(
        "h",
        "help",
        concat!("Print the help output of ", env!("CARGO_PKG_NAME")),
    );
    opts.optopt(
        "a",
        "address",
        "Socket address (IP and port) to listen on [Default: $ACADEMY_FEED_ADDR or 127.0.0.1:8080]",
        "SOCKET_ADDRESS",
    );
    opts.optflag(
        "c",
        "enable-cache",
        "Enable caching of rendered calendar feeds [Default: false]",
    );
    opts.optopt(
        "t",
        "cache-ttl",
        "Time-to-live for cached feeds [Default: 600]",
        "SECONDS",
    );
    opts
}

fn default_address() -> Result<SocketAddr, String> {
    match env::var(ADDRESS_VAR) {
        Ok(value) => value
            .parse()
            .map_err(|err| format!("`{ADDRESS_VAR}` is invalid: {err}")),
        Err(_) => Ok(SocketAddr::from(([127, 0, 0, 1], 8080))),
    }
}

/// Parses arguments (without the program name). `Ok(None)` means help was
/// requested.
pub fn try_parse(args: Vec<String>) -> Result<Option<Args>, String> {
    let matches = opts().parse(args).map_err(|fail| fail.to_string())?;

    if matches.opt_present("help") {
        return Ok(None);
    }

    let address = match matches.opt_str("address") {
        Some(raw) => raw
            .parse()
            .map_err(|err| format!("Provided value for option 'address' is invalid: {err}"))?,
        None => default_address()?,
    };

    let enable_cache = matches.opt_present("enable-cache");

    let cache_ttl = matches
        .opt_get_default("cache-ttl", 600)
        .map(Duration::from_secs)
        .map_err(|err| format!("Provided value for option 'cache-ttl' is invalid: {err}"))?;

    Ok(Some(Args {
        address,
        enable_cache,
        cache_ttl,
    }))
}

pub fn parse(args: Vec<String>) -> Args {
    match try_parse(args) {
        Ok(Some(args)) => args,
        Ok(None) => {
            let opts = opts();
            println!("{}", opts.usage(&opts.short_usage(env!("CARGO_PKG_NAME"))));
            process::exit(0);
        }
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_every_option() {
        let parsed = try_parse(args(&["-a", "0.0.0.0:9000", "--enable-cache", "--cache-ttl", "30"]))
            .unwrap()
            .unwrap();
        assert_eq!(parsed.address, SocketAddr::from(([0, 0, 0, 0], 9000)));
        assert!(parsed.enable_cache);
        assert_eq!(parsed.cache_ttl, Duration::from_secs(30));
    }

    #[test]
    fn defaults_without_flags() {
        let parsed = try_parse(Vec::new()).unwrap().unwrap();
        assert!(!parsed.enable_cache);
        assert_eq!(parsed.cache_ttl, Duration::from_secs(600));
    }

    #[test]
    fn help_and_bad_values() {
        assert!(try_parse(args(&["--help"])).unwrap().is_none());
        assert!(try_parse(args(&["--cache-ttl", "soon"])).is_err());
        assert!(try_parse(args(&["--address", "nowhere"])).is_err());
        assert!(try_parse(args(&["--bogus"])).is_err());
    }
}
