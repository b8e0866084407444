use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use wescan::core::BreachProvider;
use wescan::utils::logger;
use wescan::{view, CliConfig, HibpClient, LookupState, LookupWorkflow};

const EXIT_LOOKUP_FAILED: i32 = 1;
const EXIT_CONFIG_ERROR: i32 = 2;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("Starting wescan");

    // 驗證配置
    let provider_config = match cli.provider_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(EXIT_CONFIG_ERROR);
        }
    };
    tracing::debug!("Provider config: {:?}", provider_config);

    let client = match HibpClient::new(&provider_config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("❌ Could not create HTTP client: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(EXIT_CONFIG_ERROR);
        }
    };
    let workflow = LookupWorkflow::new(client);

    let all_succeeded = match &cli.email {
        Some(email) => check_one(&workflow, email, cli.json).await?,
        None => check_interactive(&workflow, cli.json).await?,
    };

    if !all_succeeded {
        std::process::exit(EXIT_LOOKUP_FAILED);
    }
    Ok(())
}

async fn check_one<P: BreachProvider>(
    workflow: &LookupWorkflow<P>,
    email: &str,
    json: bool,
) -> anyhow::Result<bool> {
    let state = workflow.submit(email).await;
    print_state(&state, json)?;
    Ok(!matches!(state, LookupState::Failed(_)))
}

/// One lookup per stdin line, clearing between them like "Check another email".
async fn check_interactive<P: BreachProvider>(
    workflow: &LookupWorkflow<P>,
    json: bool,
) -> anyhow::Result<bool> {
    eprintln!("Enter an email to check (Ctrl-D to quit):");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut all_succeeded = true;

    while let Some(line) = lines.next_line().await.context("reading email from stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        all_succeeded &= check_one(workflow, &line, json).await?;
        workflow.clear();
    }

    Ok(all_succeeded)
}

fn print_state(state: &LookupState, json: bool) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(state).context("serializing lookup state")?
        );
    } else {
        print!("{}", view(state));
    }
    Ok(())
}
