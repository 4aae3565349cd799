//! Host-side helper: `cargo run` builds the WASM bundle into `static/pkg` and
//! serves `static/` on a local HTTP server.

#[cfg(not(target_arch = "wasm32"))]
mod dev {
    use std::path::PathBuf;
    use std::process::{Command, Stdio};

    use anyhow::{bail, Context, Result};
    use clap::Parser;

    #[derive(Debug, Parser)]
    #[command(about = "Build and serve the gradient background demo")]
    pub struct Args {
        /// Port for the local HTTP server.
        #[arg(long, default_value_t = 8000)]
        pub port: u16,
        /// Directory holding index.html; the bundle is written to its `pkg/`.
        #[arg(long, default_value = "static")]
        pub static_dir: PathBuf,
        /// Serve whatever bundle is already there.
        #[arg(long)]
        pub skip_build: bool,
    }

    pub fn run(args: Args) -> Result<()> {
        if !args.static_dir.join("index.html").exists() {
            bail!("{} has no index.html", args.static_dir.display());
        }

        if args.skip_build {
            log::info!("skipping wasm build; serving existing bundle");
        } else {
            build_bundle(&args)?;
        }

        log::info!(
            "serving {} at http://127.0.0.1:{}",
            args.static_dir.display(),
            args.port
        );
        let status = Command::new("python3")
            .arg("-m")
            .arg("http.server")
            .arg(args.port.to_string())
            .arg("--directory")
            .arg(&args.static_dir)
            .stdout(Stdio::null())
            .status()
            .context("failed to start http server (is python3 installed?)")?;
        if !status.success() {
            bail!("http server exited with {status}");
        }
        Ok(())
    }

    fn build_bundle(args: &Args) -> Result<()> {
        log::info!("building WASM pkg");
        let out_dir = args.static_dir.join("pkg");
        let status = Command::new("wasm-pack")
            .args(["build", "--release", "--target", "web", "--out-dir"])
            .arg(&out_dir)
            .status()
            .context(
                "wasm-pack not found in PATH; install it from https://rustwasm.github.io/wasm-pack/",
            )?;
        if !status.success() {
            bail!("wasm-pack finished with {status}");
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    dev::run(dev::Args::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
