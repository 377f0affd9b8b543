use s3_asset_pusher::{args, run_app};

fn main() {
    // Parse and validate command-line arguments
    let args = args::args_checks();

    // Run the upload; a failed upload must fail the build
    if let Err(e) = run_app(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
