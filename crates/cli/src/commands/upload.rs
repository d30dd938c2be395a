use std::path::PathBuf;

use clap::Args;
use docdrop_core::{FileKind, format_size};
use docdrop_ops::docdrop_client::DocdropClient;
use docdrop_ops::{DocumentEvent, DocumentList, UploadController, UploadEvents};
use serde_json::json;

use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Path of the local file to upload.
    pub file: PathBuf,
    /// Reload and print the listing after a successful upload.
    #[arg(long)]
    pub refresh: bool,
}

pub async fn run(
    client: DocdropClient,
    args: &UploadArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let events = UploadEvents::new();
    // Subscribe before the upload so the completion event is not missed.
    let mut uploaded_rx = args.refresh.then(|| events.subscribe());
    let controller = UploadController::new(client.clone(), events);

    if let Err(e) = controller.select_file(&args.file).await {
        eprintln!("{e}");
        std::process::exit(1);
    }
    let file_name = controller
        .selected_file()
        .await
        .map(|f| f.file_name)
        .unwrap_or_default();

    // Byte-counted transfer progress, reported out of band.
    let mut progress = controller.progress();
    let reporter = tokio::spawn(async move {
        while progress.changed().await.is_ok() {
            eprint!("\rUploading... {:>3}%", *progress.borrow_and_update());
        }
        eprintln!();
    });

    let outcome = controller.upload().await;
    drop(controller);
    let _ = reporter.await;

    if let Err(e) = outcome {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "fileName": file_name,
                    "status": "uploaded",
                }))?
            );
        }
        OutputFormat::Text => {
            println!("{file_name} uploaded successfully!");
        }
    }

    if let Some(rx) = uploaded_rx.as_mut() {
        if matches!(rx.recv().await, Ok(DocumentEvent::Uploaded)) {
            let list = DocumentList::new(client);
            if list.load_documents().await.is_ok() {
                let documents = list.documents().await;
                println!("{} documents now stored:", documents.len());
                for doc in &documents {
                    println!(
                        "  {icon:>16}  {name} | {size} | key {key}",
                        icon = FileKind::from_file_name(&doc.file_name).icon(),
                        name = doc.file_name,
                        size = format_size(doc.size),
                        key = doc.key,
                    );
                }
            }
        }
    }

    Ok(())
}
