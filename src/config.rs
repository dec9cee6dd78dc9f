use clap::Parser;
use std::{net::SocketAddr, path::PathBuf};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8766";

#[derive(Parser, Debug)]
#[command(author, version, about = "Share files, text and clipboard images with your phone over WiFi", long_about = None)]
pub struct Args {
    /// Directory that receives uploads and is offered for download [default: your Downloads folder]
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// The network address to bind to
    #[arg(short, long, value_name = "ADDR", default_value = DEFAULT_BIND_ADDR)]
    pub bind_addr: SocketAddr,

    /// Reject uploads larger than this many bytes
    #[arg(long, value_name = "BYTES")]
    pub max_upload_size: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Sole root for every listed, uploaded and downloaded file
    pub download_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub max_upload_size: Option<u64>,
}

impl Config {
    pub fn from_args(args: Args) -> Self {
        Config {
            download_dir: args.dir.unwrap_or_else(default_download_dir),
            bind_addr: args.bind_addr,
            max_upload_size: args.max_upload_size,
        }
    }
}

/// The platform downloads folder, falling back to `~/Downloads`.
pub fn default_download_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| PathBuf::from("Downloads"))
}
