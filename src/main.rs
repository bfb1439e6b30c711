//! Find touch remotes on the local network and pair with them.
//!
//! Run with: cargo run -- [OPTIONS]
//!
//! Options:
//!   --scan-secs N                  Browse for N seconds (default 5)
//!   --pair <passcode> <service>    Pair every remote found using the passcode it shows
//!   --decode <file>                Pretty-print a DMAP payload and exit
//!   --registry <file>              Extra tags as JSON: {"tag": ["display name", "Kind"]}

use dacp_discovery::{RemoteBrowser, RemoteDiscovery};
use dacp_dmap::{Node, TagRegistry};
use dacp_pairing::{HttpTransport, TouchRemotePairing};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn option<'a>(args: &'a [String], flag: &str) -> Option<&'a String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut registry = TagRegistry::standard();
    if let Some(path) = option(&args, "--registry") {
        let added = registry.extend_from_json(&std::fs::read_to_string(path)?)?;
        println!("Loaded {} tag(s) from {}", added, path);
    }
    let registry = Arc::new(registry);

    if let Some(path) = option(&args, "--decode") {
        let data = std::fs::read(path)?;
        let mut offset = 0;
        while offset < data.len() {
            let (node, consumed) = Node::decode(&data[offset..], &registry)?;
            print!("{}", node.pretty(&registry));
            offset += consumed;
        }
        return Ok(());
    }

    let scan_secs: u64 = option(&args, "--scan-secs")
        .and_then(|v| v.parse().ok())
        .unwrap_or(5);

    println!("Scanning for touch remotes ({} seconds)...", scan_secs);
    let browser = RemoteBrowser::new()?;
    let remotes = browser.scan(Duration::from_secs(scan_secs)).await?;

    if remotes.is_empty() {
        println!("No remotes found. Open Settings > Add Library in the Remote app and retry.");
        return Ok(());
    }
    for remote in &remotes {
        println!("  {} (pair id {})", remote, remote.pair_id);
    }

    let Some(i) = args.iter().position(|a| a == "--pair") else {
        return Ok(());
    };
    let (Some(passcode), Some(service_name)) = (args.get(i + 1), args.get(i + 2)) else {
        eprintln!("Usage: {} --pair <passcode> <service-name>", args[0]);
        std::process::exit(1);
    };

    let pairing = TouchRemotePairing::with_transport(HttpTransport::new(), registry);
    for remote in &remotes {
        match pairing.pair(remote, passcode, service_name).await {
            Ok(guid) => println!("Paired with {}: GUID {:016X}", remote.name, guid),
            Err(e) => eprintln!("Pairing with {} failed: {}", remote.name, e),
        }
    }

    Ok(())
}
