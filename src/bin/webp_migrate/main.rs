//! Offline maintenance tool: re-encode raster uploads as WebP, repoint
//! database image references, and delete unreferenced originals.
//!
//! Files are processed strictly sequentially. The tool is safe to re-run:
//! already converted files are skipped by the mtime/size rule in
//! [`convert::should_skip`].

mod convert;

use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::{env, fs, process};

use walkdir::WalkDir;

use pushkind_salon::db::establish_connection_pool;
use pushkind_salon::repository::{DieselRepository, ImageRefStore};

struct Options {
    uploads_dir: PathBuf,
    database_url: Option<String>,
    max_width: u32,
    quality: f32,
    dry_run: bool,
    keep_originals: bool,
}

impl Options {
    fn from_env() -> Result<Self, String> {
        let uploads_dir = env::var("UPLOADS_DIR").map_err(|_| "UPLOADS_DIR is not set")?;

        Ok(Self {
            uploads_dir: PathBuf::from(uploads_dir),
            database_url: env::var("DATABASE_URL").ok(),
            max_width: env_parsed("IMAGE_MAX_WIDTH", 1600)?,
            quality: env_parsed("IMAGE_WEBP_QUALITY", 82.0)?,
            dry_run: env_flag("DRY_RUN"),
            keep_originals: env_flag("KEEP_ORIGINALS"),
        })
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name).map(|v| v == "1").unwrap_or(false)
}

fn env_parsed<T: std::str::FromStr>(name: &str, default: T) -> Result<T, String> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| format!("{name} is not a valid number: {value}")),
        Err(_) => Ok(default),
    }
}

#[derive(Debug, Default)]
struct Summary {
    dry_run: bool,
    converted: usize,
    skipped: usize,
    rows_updated: usize,
    originals_deleted: usize,
}

impl Display for Summary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.dry_run {
            write!(
                f,
                "dry run: {} file(s) would be converted, {} already up to date",
                self.converted, self.skipped
            )
        } else {
            write!(
                f,
                "converted {} file(s) ({} skipped), updated {} row(s), deleted {} original(s)",
                self.converted, self.skipped, self.rows_updated, self.originals_deleted
            )
        }
    }
}

fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = match Options::from_env() {
        Ok(options) => options,
        Err(e) => {
            log::error!("{e}");
            process::exit(1);
        }
    };

    match run(&options) {
        Ok(summary) => println!("{summary}"),
        Err(e) => {
            log::error!("WebP migration failed: {e}");
            process::exit(1);
        }
    }
}

fn run(options: &Options) -> Result<Summary, Box<dyn std::error::Error>> {
    // A dry run never opens the database.
    let repo = if options.dry_run {
        None
    } else {
        let url = options
            .database_url
            .as_deref()
            .ok_or("DATABASE_URL is not set")?;
        Some(DieselRepository::new(establish_connection_pool(url)?))
    };

    let mut summary = Summary {
        dry_run: options.dry_run,
        ..Summary::default()
    };

    let candidates: Vec<PathBuf> = WalkDir::new(&options.uploads_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| convert::is_candidate(path))
        .collect();

    log::info!(
        "Scanning {}: {} candidate file(s)",
        options.uploads_dir.display(),
        candidates.len()
    );

    for source in candidates {
        let target = convert::webp_sibling(&source);
        if convert::should_skip(&source, &target) {
            summary.skipped += 1;
            continue;
        }
        if options.dry_run {
            summary.converted += 1;
            continue;
        }

        if let Err(e) = convert::convert_to_webp(&source, &target, options.max_width, options.quality)
        {
            log::error!("Failed to convert {}: {e}", source.display());
            continue;
        }
        summary.converted += 1;
        log::info!("Converted {}", source.display());

        let Some(repo) = repo.as_ref() else {
            continue;
        };
        let (Some(before), Some(after)) = (
            public_url(&options.uploads_dir, &source),
            public_url(&options.uploads_dir, &target),
        ) else {
            log::warn!("Skipping repoint for non-UTF-8 path {}", source.display());
            continue;
        };

        summary.rows_updated += repo.repoint_image_url(&before, &after)?;

        if !options.keep_originals && repo.count_image_url_refs(&before)? == 0 {
            match fs::remove_file(&source) {
                Ok(()) => summary.originals_deleted += 1,
                Err(e) => log::warn!("Failed to delete original {}: {e}", source.display()),
            }
        }
    }

    Ok(summary)
}

/// Public URL of a file under the uploads root, mirroring the relative path
/// under the fixed `/uploads` prefix.
fn public_url(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let mut url = String::from("/uploads");
    for component in relative.components() {
        url.push('/');
        url.push_str(component.as_os_str().to_str()?);
    }
    Some(url)
}
