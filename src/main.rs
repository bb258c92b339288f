//! urdfdom_headers bundler - builds the CMake project and stages its install tree.
//!
//! This binary configures, builds and installs urdfdom_headers, then copies
//! the installed headers and libraries into the package prefix.

use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match urdfdom_headers_bundle::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            log::debug!("Failed during {}", e.stage());
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
