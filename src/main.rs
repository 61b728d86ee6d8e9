// bidmesh binary - local auction mesh with an interactive prompt
//
// Mounts a host and a set of bidders on the in-process loopback
// transport and drives one bidder from stdin. A real rendezvous
// network would mount behind the same transport seam.

use bidmesh::auction::{Amount, AuctionError, AuctionId};
use bidmesh::node::{BidderNode, HostNode, NodeError};
use bidmesh::rpc::{Response, RpcEndpoint};
use bidmesh::storage::NodeStore;
use bidmesh::transport::MemoryMesh;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bidmesh", about = "P2P auction coordination node")]
struct Args {
    /// Directory holding the per-node byte-stores
    #[arg(long, default_value = "./db")]
    db: PathBuf,

    /// Label for the interactive bidder
    #[arg(long, default_value = "client-1")]
    client_id: String,

    /// Number of additional passive bidders in the local mesh
    #[arg(long, default_value_t = 2)]
    peers: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mesh = MemoryMesh::new();

    let host_store = NodeStore::open(args.db.join("host"))?;
    let host = HostNode::start(&host_store, mesh.transport())?;
    mesh.attach(host.peer_id(), Arc::new(RpcEndpoint::new(host.clone())))
        .await;

    // Passive bidders: they register, mirror broadcasts and ack
    // notifications, but nobody drives them.
    let mut passive = Vec::new();
    for n in 0..args.peers {
        let label = format!("peer-{n}");
        let store = NodeStore::open(args.db.join(&label))?;
        let bidder = BidderNode::start(&store, mesh.transport(), host.peer_id(), label.as_str())?;
        mesh.attach(bidder.peer_id(), Arc::new(RpcEndpoint::new(bidder.clone())))
            .await;
        bidder.register().await?;
        passive.push(bidder);
    }

    let store = NodeStore::open(args.db.join(&args.client_id))?;
    let me = BidderNode::start(&store, mesh.transport(), host.peer_id(), args.client_id.as_str())?;
    mesh.attach(me.peer_id(), Arc::new(RpcEndpoint::new(me.clone())))
        .await;
    me.register().await?;

    info!(
        client = me.label(),
        peers = me.known_peers().await.len(),
        "registered with host, ready for commands"
    );

    prompt_loop(&me).await?;
    Ok(())
}

/// Read commands until `exit`. A failed command prints its error and
/// returns to the prompt; it never takes the process down.
async fn prompt_loop(me: &BidderNode) -> Result<(), std::io::Error> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        stdout
            .write_all(b"Enter command (open, bid, close, exit): ")
            .await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let parts: Vec<&str> = line.split_whitespace().collect();

        let outcome = match parts.as_slice() {
            ["open", id, item, price] => open(me, id, item, price).await,
            ["bid", id, amount] => bid(me, id, amount).await,
            ["close", id] => me.close_auction(AuctionId::from(*id)).await,
            ["exit"] => break,
            [] => continue,
            _ => {
                println!("Unknown command");
                continue;
            }
        };

        match outcome {
            Ok(response) => println!("{}", response.status()),
            Err(e) => println!("Error: {e}"),
        }
    }

    Ok(())
}

async fn open(
    me: &BidderNode,
    id: &str,
    item: &str,
    price: &str,
) -> Result<Response, NodeError> {
    let price = parse_amount(price)?;
    me.open_auction(AuctionId::from(id), item, price).await
}

async fn bid(me: &BidderNode, id: &str, amount: &str) -> Result<Response, NodeError> {
    let amount = parse_amount(amount)?;
    me.place_bid(AuctionId::from(id), amount).await
}

/// Non-numeric input is an explicit validation error, not a silent
/// zero.
fn parse_amount(raw: &str) -> Result<Amount, NodeError> {
    raw.parse::<Amount>()
        .map_err(|_| AuctionError::InvalidStartingPrice(raw.to_string()).into())
}
