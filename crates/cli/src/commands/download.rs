use std::path::PathBuf;

use clap::Args;
use docdrop_ops::DocumentList;
use docdrop_ops::docdrop_client::DocdropClient;
use serde_json::json;

use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Store key of the document.
    pub key: String,
    /// File name as shown in the listing; its extension selects the
    /// content type asked of the store.
    pub file_name: String,
    /// Directory to save into.
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
}

pub async fn run(
    client: DocdropClient,
    args: &DownloadArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let list = DocumentList::new(client);

    match list.download(&args.key, &args.file_name, &args.out).await {
        Ok(Some(saved)) => match format {
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "path": saved.path,
                        "contentType": saved.content_type,
                    }))?
                );
            }
            OutputFormat::Text => {
                println!(
                    "Saved {path} ({content_type})",
                    path = saved.path.display(),
                    content_type = saved.content_type,
                );
            }
        },
        Ok(None) => {
            eprintln!("Another download is already in progress.");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Download failed: {e}");
            std::process::exit(1);
        }
    }

    Ok(())
}
