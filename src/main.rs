// src/main.rs

use procgate::{cli, logging, run};

#[tokio::main]
async fn main() {
    match run_main().await {
        // Signal deaths come back as -signo; report them the way shells do.
        Ok(code) if code < 0 => std::process::exit(128 - code),
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("procgate error: {err:?}");
            std::process::exit(1);
        }
    }
}

async fn run_main() -> anyhow::Result<i32> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args).await
}
