/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::str::FromStr;
use std::time::{Duration, Instant};

use anyhow::{Context, anyhow};
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use clap_complete::Shell;
use http::{HeaderName, HeaderValue};

use pnego::{Credentials, NegotiationConfig, Negotiator, ProtocolSelection, TargetAddr};

mod logger;

const GLOBAL_ARG_COMPLETION: &str = "completion";
const GLOBAL_ARG_TARGET: &str = "target";
const GLOBAL_ARG_PROXY: &str = "proxy";
const GLOBAL_ARG_PROTOCOL: &str = "protocol";
const GLOBAL_ARG_USERNAME: &str = "username";
const GLOBAL_ARG_PASSWORD: &str = "password";
const GLOBAL_ARG_CONNECT_TIMEOUT: &str = "connect-timeout";
const GLOBAL_ARG_IO_TIMEOUT: &str = "io-timeout";
const GLOBAL_ARG_MAX_HEADER_SIZE: &str = "max-header-size";
const GLOBAL_ARG_HEADER: &str = "header";
const GLOBAL_ARG_VERBOSE: &str = "verbose";

fn build_cli_args() -> Command {
    Command::new("pnego-probe")
        .about("Negotiate a tunnel through a SOCKS5 or HTTP CONNECT proxy")
        .arg(
            Arg::new(GLOBAL_ARG_COMPLETION)
                .num_args(1)
                .value_name("SHELL")
                .long("completion")
                .value_parser(value_parser!(Shell))
                .exclusive(true),
        )
        .arg(
            Arg::new(GLOBAL_ARG_TARGET)
                .help("Target address, in host:port form")
                .num_args(1)
                .value_name("TARGET ADDRESS")
                .value_parser(value_parser!(TargetAddr))
                .required_unless_present(GLOBAL_ARG_COMPLETION),
        )
        .arg(
            Arg::new(GLOBAL_ARG_PROXY)
                .help("Proxy server address")
                .num_args(1)
                .value_name("PROXY ADDRESS")
                .long(GLOBAL_ARG_PROXY)
                .short('x')
                .required_unless_present(GLOBAL_ARG_COMPLETION),
        )
        .arg(
            Arg::new(GLOBAL_ARG_PROTOCOL)
                .help("Proxy protocol")
                .num_args(1)
                .value_name("PROTOCOL")
                .long(GLOBAL_ARG_PROTOCOL)
                .value_parser(["socks5", "http"])
                .default_value("socks5"),
        )
        .arg(
            Arg::new(GLOBAL_ARG_USERNAME)
                .help("Proxy username")
                .num_args(1)
                .value_name("USERNAME")
                .long(GLOBAL_ARG_USERNAME)
                .short('u'),
        )
        .arg(
            Arg::new(GLOBAL_ARG_PASSWORD)
                .help("Proxy password")
                .num_args(1)
                .value_name("PASSWORD")
                .long(GLOBAL_ARG_PASSWORD)
                .short('p')
                .requires(GLOBAL_ARG_USERNAME),
        )
        .arg(
            Arg::new(GLOBAL_ARG_CONNECT_TIMEOUT)
                .help("Timeout for connection to the proxy")
                .num_args(1)
                .value_name("TIMEOUT DURATION")
                .long(GLOBAL_ARG_CONNECT_TIMEOUT)
                .default_value("10s"),
        )
        .arg(
            Arg::new(GLOBAL_ARG_IO_TIMEOUT)
                .help("Read and write timeout for the negotiation")
                .num_args(1)
                .value_name("TIMEOUT DURATION")
                .long(GLOBAL_ARG_IO_TIMEOUT)
                .default_value("10s"),
        )
        .arg(
            Arg::new(GLOBAL_ARG_MAX_HEADER_SIZE)
                .help("Max size of the HTTP CONNECT response header")
                .num_args(1)
                .value_name("SIZE")
                .long(GLOBAL_ARG_MAX_HEADER_SIZE)
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new(GLOBAL_ARG_HEADER)
                .help("Extra HTTP CONNECT header, in name:value form")
                .value_name("HEADER")
                .long(GLOBAL_ARG_HEADER)
                .short('H')
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new(GLOBAL_ARG_VERBOSE)
                .help("show verbose message")
                .num_args(0)
                .action(ArgAction::Count)
                .short('v'),
        )
}

fn get_duration(args: &ArgMatches, id: &str) -> anyhow::Result<Option<Duration>> {
    let Some(s) = args.get_one::<String>(id) else {
        return Ok(None);
    };
    let timeout = humanize_rs::duration::parse(s)
        .map_err(|e| anyhow!("invalid {id} value {s}: {e:?}"))?;
    Ok(Some(timeout))
}

fn get_headers(args: &ArgMatches) -> anyhow::Result<Vec<(HeaderName, HeaderValue)>> {
    let mut headers = Vec::new();
    if let Some(v) = args.get_many::<String>(GLOBAL_ARG_HEADER) {
        for s in v {
            let Some((name, value)) = s.split_once(':') else {
                return Err(anyhow!("invalid HTTP header: {s}"));
            };
            let name = HeaderName::from_str(name.trim())
                .map_err(|e| anyhow!("invalid HTTP header name {name}: {e}"))?;
            let value = HeaderValue::from_str(value.trim())
                .map_err(|e| anyhow!("invalid HTTP header value {value}: {e}"))?;
            headers.push((name, value));
        }
    }
    Ok(headers)
}

fn build_negotiator(args: &ArgMatches) -> anyhow::Result<Negotiator> {
    let protocol = args
        .get_one::<String>(GLOBAL_ARG_PROTOCOL)
        .and_then(|s| ProtocolSelection::from_str(s).ok())
        .unwrap_or(ProtocolSelection::Socks5);

    let mut config = NegotiationConfig::default();
    if let Some(size) = args.get_one::<usize>(GLOBAL_ARG_MAX_HEADER_SIZE) {
        config.set_http_max_header_size(*size);
    }
    for (name, value) in get_headers(args)? {
        config.append_http_header(name, value);
    }
    Ok(Negotiator::with_config(protocol, config))
}

fn connect_to_proxy(proxy: &str, timeout: Duration) -> anyhow::Result<TcpStream> {
    let mut err = io::Error::new(io::ErrorKind::AddrNotAvailable, "no addr resolved");
    let addrs: Vec<SocketAddr> = proxy
        .to_socket_addrs()
        .map_err(|e| anyhow!("failed to resolve proxy address {proxy}: {e}"))?
        .collect();
    for addr in addrs {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(stream) => {
                log::info!("connected to proxy {addr}");
                return Ok(stream);
            }
            Err(e) => {
                log::info!("failed to connect to proxy {addr}: {e}");
                err = e;
            }
        }
    }
    Err(anyhow!("failed to connect to proxy {proxy}: {err}"))
}

fn main() -> anyhow::Result<()> {
    let args = build_cli_args().get_matches();

    if let Some(target) = args.get_one::<Shell>(GLOBAL_ARG_COMPLETION) {
        let mut app = build_cli_args();
        let bin_name = app.get_name().to_string();
        clap_complete::generate(*target, &mut app, bin_name, &mut io::stdout());
        return Ok(());
    }

    let verbose_level = args
        .get_one::<u8>(GLOBAL_ARG_VERBOSE)
        .copied()
        .unwrap_or_default();
    let logger = logger::SyncLogger::new(verbose_level);
    logger
        .into_global_logger()
        .map_err(|e| anyhow!("failed to setup logger: {e}"))?;

    let target = args
        .get_one::<TargetAddr>(GLOBAL_ARG_TARGET)
        .ok_or_else(|| anyhow!("no target address set"))?;
    let proxy = args
        .get_one::<String>(GLOBAL_ARG_PROXY)
        .ok_or_else(|| anyhow!("no proxy address set"))?;

    let credentials = match args.get_one::<String>(GLOBAL_ARG_USERNAME) {
        Some(username) => {
            let password = args
                .get_one::<String>(GLOBAL_ARG_PASSWORD)
                .map(|s| s.as_str())
                .unwrap_or_default();
            let c = Credentials::from_original(username, password)
                .context("invalid proxy credentials")?;
            Some(c)
        }
        None => None,
    };

    let negotiator = build_negotiator(&args)?;
    let connect_timeout =
        get_duration(&args, GLOBAL_ARG_CONNECT_TIMEOUT)?.unwrap_or(Duration::from_secs(10));
    let io_timeout =
        get_duration(&args, GLOBAL_ARG_IO_TIMEOUT)?.unwrap_or(Duration::from_secs(10));

    let mut stream = connect_to_proxy(proxy, connect_timeout)?;
    stream
        .set_read_timeout(Some(io_timeout))
        .context("failed to set read timeout")?;
    stream
        .set_write_timeout(Some(io_timeout))
        .context("failed to set write timeout")?;

    let time_start = Instant::now();
    match negotiator.negotiate(&mut stream, target, credentials.as_ref()) {
        Ok(_) => {
            println!(
                "{} tunnel to {target} via {proxy} established in {:?}",
                negotiator.protocol(),
                time_start.elapsed()
            );
            Ok(())
        }
        Err(e) => {
            if let Some(code) = e.reply_code() {
                println!("upstream reply code: {code}");
            }
            Err(anyhow!(
                "{} tunnel to {target} via {proxy} failed: {e}",
                negotiator.protocol()
            ))
        }
    }
}
