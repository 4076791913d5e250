use std::path::PathBuf;

use crate::Result;
use crate::cli::TokenArgs;
use crate::core::operations;
use crate::core::options::TokenOptions;

use super::common::{config_load_options, report_diagnostics};

pub fn handle_make_token(args: TokenArgs, config_override: Option<&PathBuf>) -> Result<()> {
    let options = TokenOptions {
        config: config_load_options(config_override),
        bytes: args.bytes,
        hashed: args.hash,
        skip_env: args.no_env,
    };

    let output = operations::make_token(options, None)?;
    report_diagnostics(&output.diagnostics);

    let outcome = output.value;
    println!("✔ Generated token: {}", outcome.token);
    if outcome.hashed {
        println!("  digest → {}", outcome.token_path.display());
    } else {
        println!("  token  → {}", outcome.token_path.display());
    }
    if let Some((env_file, key)) = &outcome.env {
        println!("  env    → {key} in {}", env_file.display());
    }
    Ok(())
}
