use std::{env, error::Error};

use anyhow::anyhow;
use bobber::{query_status, ServerStatus, DEFAULT_PORT, DEFAULT_PROTOCOL_VERSION};

fn main() -> Result<(), Box<dyn Error>> {
    let _ = dotenvy::dotenv();
    #[cfg(debug_assertions)]
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .init();
    #[cfg(not(debug_assertions))]
    env_logger::init();

    let target = env::args()
        .nth(1)
        .or_else(|| env::var("BOBBER_HOST").ok())
        .ok_or_else(|| anyhow!("usage: bobber <host[:port]>"))?;
    let (host, port) = parse_target(&target)?;
    let protocol_version = match env::var("BOBBER_PROTOCOL_VERSION") {
        Ok(raw) => raw
            .parse()
            .map_err(|_| anyhow!("invalid BOBBER_PROTOCOL_VERSION: {raw}"))?,
        Err(_) => DEFAULT_PROTOCOL_VERSION,
    };

    let document = query_status(host, port, protocol_version)?;
    let status = ServerStatus::from_value(&document)?;

    if let Some(version) = &status.version {
        println!("version: {} (protocol {})", version.name, version.protocol);
    }
    if let Some(players) = &status.players {
        println!("players: {}/{}", players.online, players.max);
    }
    let description = status.description_text();
    if !description.is_empty() {
        println!("description: {description}");
    }
    log::debug!("full status document: {document}");

    Ok(())
}

fn parse_target(target: &str) -> anyhow::Result<(&str, u16)> {
    match target.rsplit_once(':') {
        Some((host, port)) => {
            let port = port.parse().map_err(|_| anyhow!("invalid port: {port}"))?;
            Ok((host, port))
        }
        None => {
            let port = match env::var("BOBBER_PORT") {
                Ok(raw) => raw.parse().map_err(|_| anyhow!("invalid BOBBER_PORT: {raw}"))?,
                Err(_) => DEFAULT_PORT,
            };
            Ok((target, port))
        }
    }
}
