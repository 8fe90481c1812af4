use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use sparsebundle::{Bundle, BundleOptions, RawImageStore};
use sparsebundle_part::PartitionCatalog;

#[derive(Debug, Clone, Parser)]
#[command(version, about = "Inspect sparse bundle disk images")]
pub struct Args {
    #[command(subcommand)]
    cmd: Command,
    /// Maximum number of band files kept open at once
    #[arg(long, global = true, default_value_t = 16)]
    max_open_bands: usize,
}

#[derive(Debug, Clone, clap::Subcommand)]
pub enum Command {
    /// Print the size of the image
    Info(InfoArgs),
    /// List the GPT partitions of the image
    Partitions(PartitionsArgs),
    /// Hexdump a range of the image
    Dump(DumpArgs),
}

impl Command {
    pub fn verbose(&self) -> bool {
        match self {
            Command::Partitions(args) => args.verbose,
            Command::Info(_) | Command::Dump(_) => false,
        }
    }
}

#[derive(Debug, Clone, Parser)]
pub struct InfoArgs {
    image: PathBuf,
}

#[derive(Debug, Clone, Parser)]
pub struct PartitionsArgs {
    image: PathBuf,
    #[arg(short, long)]
    verbose: bool,
    /// Fail if the image has no protective MBR
    #[arg(long)]
    strict: bool,
}

#[derive(Debug, Clone, Parser)]
pub struct DumpArgs {
    image: PathBuf,
    #[arg(long, default_value_t = 0)]
    offset: u64,
    #[arg(long, default_value_t = 512)]
    length: u64,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    simple_logger::SimpleLogger::new()
        .with_level(if args.cmd.verbose() {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Warn
        })
        .init()
        .context("failed to initialize logging")?;

    let options = BundleOptions::default()
        .with_max_open_bands(args.max_open_bands)
        .with_read_only(true);
    match args.cmd {
        Command::Info(args) => info(&args.image, options),
        Command::Partitions(args) => partitions(&args, options),
        Command::Dump(args) => dump(&args, options),
    }
}

fn open(image: &Path, options: BundleOptions) -> anyhow::Result<Bundle<RawImageStore>> {
    Bundle::open(image, options).with_context(|| format!("cannot open {}", image.display()))
}

fn info(image: &Path, options: BundleOptions) -> anyhow::Result<()> {
    let mut bundle = open(image, options)?;
    let size = bundle.size();
    println!("Image: {}", image.display());
    println!("Size: {} bytes ({} sectors)", size, size / 512);
    bundle.close()?;
    Ok(())
}

fn partitions(args: &PartitionsArgs, options: BundleOptions) -> anyhow::Result<()> {
    let mut bundle = open(&args.image, options)?;
    let catalog = if args.strict {
        PartitionCatalog::with_decoder(sparsebundle_part::GptReader::strict())
    } else {
        PartitionCatalog::new()
    };
    let partitions = catalog
        .list_partitions(&mut bundle)
        .with_context(|| format!("cannot read the partition table of {}", args.image.display()))?;

    if partitions.is_empty() {
        println!("No partitions");
    }
    for (index, partition) in partitions.iter().enumerate() {
        println!("{index}: {partition}");
        if args.verbose {
            println!("\tType GUID: {}", partition.type_guid());
            println!("\tUnique GUID: {}", partition.unique_guid());
            println!("\tAttributes: {:#018x}", partition.attributes());
        }
    }
    bundle.close()?;
    Ok(())
}

fn dump(args: &DumpArgs, options: BundleOptions) -> anyhow::Result<()> {
    let mut bundle = open(&args.image, options)?;
    let size = u64::try_from(bundle.size()).unwrap_or(0);
    let length = dump_length(size, args.offset, args.length);
    if length < args.length {
        log::warn!(
            "image ends after {} of {} requested bytes",
            length,
            args.length
        );
    }
    let length = usize::try_from(length).context("length is too large")?;
    let mut buf = vec![0u8; length];
    let mut read = 0;
    while read < buf.len() {
        let n = bundle.read_at(&mut buf[read..], args.offset + read as u64)?;
        if n == 0 {
            break;
        }
        read += n;
    }
    for (line, chunk) in buf[..read].chunks(16).enumerate() {
        let address = args.offset.wrapping_add(line as u64 * 16);
        println!("{}", hexdump_line(address, chunk));
    }
    bundle.close()?;
    Ok(())
}

/// The number of bytes that can be dumped from `offset` in an image of `size` bytes.
fn dump_length(size: u64, offset: u64, length: u64) -> u64 {
    length.min(size.saturating_sub(offset))
}

fn hexdump_line(address: u64, chunk: &[u8]) -> String {
    let hex: Vec<String> = chunk.iter().map(|b| format!("{b:02x}")).collect();
    let ascii: String = chunk
        .iter()
        .map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '.'
            }
        })
        .collect();
    format!("{:08x}  {:<47}  |{}|", address, hex.join(" "), ascii)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dump_length_is_clamped() {
        assert_eq!(dump_length(4096, 0, 512), 512);
        assert_eq!(dump_length(4096, 4000, 512), 96);
        assert_eq!(dump_length(4096, 8192, 512), 0);
        assert_eq!(dump_length(4096, 0, u64::MAX), 4096);
    }

    #[test]
    fn test_hexdump_line() {
        assert_eq!(
            hexdump_line(0x1be, b"EFI PART\x00\x00\x01\x00"),
            "000001be  45 46 49 20 50 41 52 54 00 00 01 00              |EFI PART....|"
        );
        assert!(hexdump_line(u64::MAX, &[0xff]).starts_with("ffffffffffffffff  ff "));
    }
}
