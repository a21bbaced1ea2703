#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

mod client_main;
mod network;
mod tui;

use std::io;
use std::net::{TcpListener, TcpStream};

use clap::{Command, arg};
use tictactoe::role::Role;

fn main() -> io::Result<()> {
    env_logger::Builder::new()
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let matches = Command::new("Tic-tac-toe")
        .version(clap::crate_version!())
        .about("Two-player tic-tac-toe played over a TCP link")
        .subcommand_required(true)
        .subcommand(
            Command::new("host")
                .about("Listen on a port, wait for one peer and play as the second mover")
                .arg(arg!([port] "Port to listen on").value_parser(clap::value_parser!(u16))),
        )
        .subcommand(
            Command::new("join")
                .about("Connect to a host and play as the first mover")
                .arg(arg!(<address> "Host address, e.g. 192.168.0.2:38613")),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("host", sub_matches)) => {
            let port =
                sub_matches.get_one::<u16>("port").copied().unwrap_or(network::DEFAULT_PORT);
            let listener = TcpListener::bind(("0.0.0.0", port)).map_err(setup_failure)?;
            log::info!("Listening on port {port}, waiting for a peer...");
            let (stream, peer_addr) = listener.accept().map_err(setup_failure)?;
            log::info!("Peer connected from {peer_addr}.");
            client_main::run(client_main::GameConfig { role: Role::SecondMover, stream })
        }
        Some(("join", sub_matches)) => {
            let address = server_address(sub_matches.get_one::<String>("address").unwrap());
            log::info!("Connecting to {address}...");
            let stream = TcpStream::connect(address.as_str()).map_err(setup_failure)?;
            log::info!("Connected.");
            client_main::run(client_main::GameConfig { role: Role::FirstMover, stream })
        }
        _ => unreachable!("Exhausted list of subcommands and subcommand_required prevents `None`"),
    }
}

fn server_address(address: &str) -> String {
    if address.contains(':') {
        address.to_owned()
    } else {
        format!("{}:{}", address, network::DEFAULT_PORT)
    }
}

fn setup_failure(err: io::Error) -> io::Error {
    log::error!("Cannot establish connection: {err}");
    err
}
