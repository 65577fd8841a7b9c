//! Build automation tasks for Studio 3D
//!
//! Usage:
//!   cargo xtask build-web       # Build WASM + page into dist/web
//!   cargo xtask package-web     # Zip dist/web for upload

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::Command;

const WASM_NAME: &str = "studio-3d.wasm";
const MQ_JS_BUNDLE: &str = "https://raw.githubusercontent.com/not-fl3/macroquad/v0.4.14/js/mq_js_bundle.js";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for Studio 3D")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build WASM and assemble the web page in dist/web
    BuildWeb {
        /// Mark as dev build (adds a DEV tag to the page title)
        #[arg(long)]
        dev: bool,
    },
    /// Build the web page and zip it
    PackageWeb,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::BuildWeb { dev } => build_web(dev),
        Commands::PackageWeb => package_web(),
    }
}

/// Workspace root (parent of xtask/)
fn project_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask has no parent directory")
}

/// Run a command and check for success
fn run_cmd(cmd: &mut Command) -> Result<()> {
    let status = cmd.status().context("Failed to execute command")?;
    if !status.success() {
        anyhow::bail!("Command failed with status: {}", status);
    }
    Ok(())
}

fn download_file(url: &str, dest: &Path) -> Result<()> {
    println!("Downloading {}...", url);
    run_cmd(Command::new("curl").args(["-L", "-o"]).arg(dest).arg(url))
}

/// Copy every file of `src` into `dst` (non-recursive, web/ is flat)
fn copy_files(src: &Path, dst: &Path) -> Result<()> {
    for entry in std::fs::read_dir(src).with_context(|| format!("reading {}", src.display()))? {
        let path = entry?.path();
        if let Some(name) = path.file_name().filter(|_| path.is_file()) {
            std::fs::copy(&path, dst.join(name))?;
        }
    }
    Ok(())
}

fn build_web(dev: bool) -> Result<()> {
    let root = project_root()?;
    let dist = root.join("dist/web");

    println!("Building WASM...");
    run_cmd(
        Command::new("cargo")
            .current_dir(&root)
            .args(["build", "--release", "--target", "wasm32-unknown-unknown"]),
    )?;

    if dist.exists() {
        std::fs::remove_dir_all(&dist)?;
    }
    std::fs::create_dir_all(&dist)?;

    println!("Copying files to dist/web...");
    std::fs::copy(
        root.join("target/wasm32-unknown-unknown/release").join(WASM_NAME),
        dist.join(WASM_NAME),
    )
    .context("WASM binary missing after build")?;
    copy_files(&root.join("web"), &dist)?;

    // Icon font is optional at runtime
    let fonts = root.join("assets/runtime/fonts");
    if fonts.exists() {
        let dst = dist.join("assets/runtime/fonts");
        std::fs::create_dir_all(&dst)?;
        copy_files(&fonts, &dst)?;
    }

    download_file(MQ_JS_BUNDLE, &dist.join("mq_js_bundle.js"))?;

    if dev {
        println!("Applying DEV build modifications...");
        let index_path = dist.join("index.html");
        let index = std::fs::read_to_string(&index_path)?;
        let index = index
            .replace("Loading Studio 3D", "Loading Studio 3D (DEV)")
            .replace("<title>Studio 3D", "<title>[DEV] Studio 3D");
        std::fs::write(&index_path, index)?;
    }

    println!("Web build complete: dist/web/");
    Ok(())
}

fn package_web() -> Result<()> {
    build_web(false)?;

    let dist = project_root()?.join("dist");
    let zip_path = dist.join("studio-3d-web.zip");
    if zip_path.exists() {
        std::fs::remove_file(&zip_path)?;
    }

    println!("Creating zip...");
    run_cmd(
        Command::new("zip")
            .current_dir(dist.join("web"))
            .args(["-r", "../studio-3d-web.zip", "."]),
    )?;

    println!("Package ready: dist/studio-3d-web.zip");
    Ok(())
}
