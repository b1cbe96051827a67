use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reqwest::multipart::{Form, Part};
use serde_json::Value;

use requisition_relay::requisition::catalog;
use requisition_relay::requisition::extract::{
    CUSTOM_NAME_PREFIX, CUSTOM_QUANTITY_PREFIX, FIELD_CC_EMAIL, FIELD_CC_REQUESTED,
    FIELD_CUSTOM_COUNT, FIELD_DEPARTMENT, FIELD_NOTE, FIELD_PHOTO, FIELD_REQUESTER,
};

#[derive(Parser)]
#[command(name = "requisition-cli")]
#[command(about = "Command-line client for the requisition relay", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a requisition
    Submit {
        /// Requester name
        #[arg(long)]
        name: String,
        /// Requester department
        #[arg(long)]
        department: String,
        /// Catalog item as NAME=QTY (repeatable)
        #[arg(long = "item", value_parser = parse_standard_item)]
        items: Vec<(String, u64)>,
        /// Custom item as NAME=QUANTITY_OR_UNIT (repeatable)
        #[arg(long = "custom", value_parser = parse_custom_item)]
        custom: Vec<(String, String)>,
        /// Free-text note
        #[arg(long)]
        note: Option<String>,
        /// Send a copy of the email to this address
        #[arg(long)]
        cc: Option<String>,
        /// Photo to attach
        #[arg(long)]
        photo: Option<PathBuf>,
    },
    /// List the standard catalog
    Catalog,
    /// Check service health
    Health,
}

fn parse_standard_item(raw: &str) -> Result<(String, u64), String> {
    let (name, qty) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=QTY, got '{}'", raw))?;
    let qty = qty
        .trim()
        .parse()
        .map_err(|e| format!("invalid quantity '{}': {}", qty, e))?;
    let name = name.trim();
    if !catalog::all_items().any(|item| item == name) {
        return Err(format!(
            "'{}' is not a catalog item (see the `catalog` command)",
            name
        ));
    }
    Ok((name.to_string(), qty))
}

fn parse_custom_item(raw: &str) -> Result<(String, String), String> {
    let (name, unit) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=QUANTITY_OR_UNIT, got '{}'", raw))?;
    Ok((name.trim().to_string(), unit.trim().to_string()))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Submit {
            name,
            department,
            items,
            custom,
            note,
            cc,
            photo,
        } => {
            let mut form = Form::new()
                .text(FIELD_REQUESTER, name)
                .text(FIELD_DEPARTMENT, department);
            for (item, qty) in items {
                form = form.text(catalog::quantity_field(&item), qty.to_string());
            }
            form = form.text(FIELD_CUSTOM_COUNT, custom.len().to_string());
            for (i, (item, unit)) in custom.into_iter().enumerate() {
                form = form
                    .text(format!("{}{}", CUSTOM_NAME_PREFIX, i), item)
                    .text(format!("{}{}", CUSTOM_QUANTITY_PREFIX, i), unit);
            }
            if let Some(note) = note {
                form = form.text(FIELD_NOTE, note);
            }
            if let Some(cc) = cc {
                form = form.text(FIELD_CC_REQUESTED, "on").text(FIELD_CC_EMAIL, cc);
            }
            if let Some(path) = photo {
                let bytes = tokio::fs::read(&path).await?;
                let filename = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| FIELD_PHOTO.to_string());
                form = form.part(FIELD_PHOTO, Part::bytes(bytes).file_name(filename));
            }

            let res = client
                .post(format!("{}/api/solicitacao", cli.url))
                .multipart(form)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Catalog => {
            let res = client.get(format!("{}/api/catalog", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Health => {
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

/// Print a JSON response body; error statuses become a failed exit.
async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Err(format!("service returned status {}", status).into());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
