// =============================================================================
// Dataset summary — pictor
// =============================================================================
//
// Builds one of the directory-backed datasets over a path and logs how many
// samples it found, plus what the first few samples look like.
//
// Usage:
//   cargo run -p dataset_summary -- --kind rmb --root data/rmb_split/train
//   cargo run -p dataset_summary -- --kind ants-bees --root data/hymenoptera/train
//   cargo run -p dataset_summary -- --kind portrait --root data/portrait --size 224
//   cargo run -p dataset_summary -- --kind pennfudan --root data/PennFudanPed
//   cargo run -p dataset_summary -- --kind celeba --root data/img_align_celeba
//
// Set RUST_LOG=debug to see the scan logs from pictor-data.

use pictor_data::{
    ClassFolder, ClassTable, Dataset, DetectionFolder, ImageDirectory, MaskFolder, Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Rmb,
    AntsBees,
    Portrait,
    PennFudan,
    CelebA,
}

impl Kind {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "rmb" => Some(Kind::Rmb),
            "ants-bees" => Some(Kind::AntsBees),
            "portrait" => Some(Kind::Portrait),
            "pennfudan" => Some(Kind::PennFudan),
            "celeba" => Some(Kind::CelebA),
            _ => None,
        }
    }
}

struct Config {
    kind: Kind,
    root: String,
    size: u32,
    seed: u64,
    show: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kind: Kind::Rmb,
            root: String::from("."),
            size: 224,
            seed: 1,
            show: 3,
        }
    }
}

fn usage() {
    println!("Dataset summary for pictor");
    println!();
    println!("Options:");
    println!("  --kind <k>      rmb | ants-bees | portrait | pennfudan | celeba (default: rmb)");
    println!("  --root <path>   Dataset root directory (default: .)");
    println!("  --size <n>      Portrait resize side length (default: 224)");
    println!("  --seed <n>      Portrait shuffle seed (default: 1)");
    println!("  --show <n>      Number of samples to load and describe (default: 3)");
}

fn parse_args() -> std::result::Result<Config, String> {
    let mut cfg = Config::default();
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        let mut value = || {
            i += 1;
            args.get(i)
                .cloned()
                .ok_or_else(|| format!("missing value for {flag}"))
        };
        match flag {
            "--kind" => {
                let v = value()?;
                cfg.kind = Kind::parse(&v).ok_or_else(|| format!("unknown kind {v:?}"))?;
            }
            "--root" => cfg.root = value()?,
            "--size" => cfg.size = value()?.parse().map_err(|e| format!("invalid --size: {e}"))?,
            "--seed" => cfg.seed = value()?.parse().map_err(|e| format!("invalid --seed: {e}"))?,
            "--show" => cfg.show = value()?.parse().map_err(|e| format!("invalid --show: {e}"))?,
            "--help" | "-h" => {
                usage();
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }
    Ok(cfg)
}

// ─────────────────────────────────────────────────────────────────────────────
// Summaries
// ─────────────────────────────────────────────────────────────────────────────

fn summarize<D: Dataset>(ds: &D, show: usize, describe: impl Fn(&D::Item) -> String) -> Result<()> {
    info!(dataset = ds.name(), samples = ds.len(), "dataset ready");
    for (i, item) in ds.iter().take(show).enumerate() {
        info!(index = i, "{}", describe(&item?));
    }
    Ok(())
}

fn run(cfg: &Config) -> Result<()> {
    match cfg.kind {
        Kind::Rmb => {
            let ds = ClassFolder::rmb(&cfg.root).build()?;
            summarize(&ds, cfg.show, |(img, label)| {
                format!("{}x{} image, class {label}", img.width(), img.height())
            })
        }
        Kind::AntsBees => {
            let ds = ClassFolder::with_classes(&cfg.root, ClassTable::ants_bees()).build()?;
            let names = ds.class_names();
            summarize(&ds, cfg.show, |(img, label)| {
                format!("{}x{} image, class {}", img.width(), img.height(), names[*label])
            })
        }
        Kind::Portrait => {
            let ds = MaskFolder::builder(&cfg.root)
                .in_size(cfg.size)
                .seed(cfg.seed)
                .build()?;
            summarize(&ds, cfg.show, |(img, mask)| {
                let fg = mask.as_slice().iter().filter(|&&v| v > 0.0).count();
                format!(
                    "image {}, mask {}, foreground {:.1}%",
                    img.shape(),
                    mask.shape(),
                    100.0 * fg as f64 / mask.len().max(1) as f64
                )
            })
        }
        Kind::PennFudan => {
            let ds = DetectionFolder::builder(&cfg.root).build()?;
            summarize(&ds, cfg.show, |(img, target)| {
                format!(
                    "{}x{} image, {} boxes {:?}",
                    img.width(),
                    img.height(),
                    target.len(),
                    target.boxes.iter().map(|b| b.as_array()).collect::<Vec<_>>()
                )
            })
        }
        Kind::CelebA => {
            let ds = ImageDirectory::builder(&cfg.root).build()?;
            summarize(&ds, cfg.show, |img| {
                format!("{}x{} image", img.width(), img.height())
            })
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = match parse_args() {
        Ok(cfg) => cfg,
        Err(msg) => {
            eprintln!("{msg}");
            usage();
            std::process::exit(2);
        }
    };

    if let Err(e) = run(&cfg) {
        error!(root = %cfg.root, "{e}");
        std::process::exit(1);
    }
}
