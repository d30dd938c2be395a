use clap::Args;
use docdrop_core::{FileKind, SortDirection, SortField, format_size, sort_indicator};
use docdrop_ops::DocumentList;
use docdrop_ops::docdrop_client::DocdropClient;

use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Field to order by.
    #[arg(long, default_value = "last-modified")]
    pub sort: SortArg,
    /// Order direction.
    #[arg(long, default_value = "desc")]
    pub direction: DirectionArg,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum SortArg {
    FileName,
    Size,
    LastModified,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum DirectionArg {
    Asc,
    Desc,
}

impl From<&SortArg> for SortField {
    fn from(arg: &SortArg) -> Self {
        match arg {
            SortArg::FileName => SortField::FileName,
            SortArg::Size => SortField::Size,
            SortArg::LastModified => SortField::LastModified,
        }
    }
}

impl From<&DirectionArg> for SortDirection {
    fn from(arg: &DirectionArg) -> Self {
        match arg {
            DirectionArg::Asc => SortDirection::Asc,
            DirectionArg::Desc => SortDirection::Desc,
        }
    }
}

pub async fn run(
    client: DocdropClient,
    args: &ListArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let list = DocumentList::new(client);

    if list.load_documents().await.is_err() {
        let message = list
            .error()
            .await
            .unwrap_or_else(|| "Failed to load documents.".to_string());
        eprintln!("{message}");
        std::process::exit(1);
    }
    list.sort_documents((&args.sort).into(), (&args.direction).into())
        .await;
    let documents = list.documents().await;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&documents)?);
        }
        OutputFormat::Text => {
            let field = SortField::from(&args.sort);
            let direction = SortDirection::from(&args.direction);
            println!(
                "{} documents (sorted by {field:?} {}):",
                documents.len(),
                sort_indicator(field, field, direction),
            );
            for doc in &documents {
                println!(
                    "  {icon:>16}  {name} | {size} | modified {modified} | key {key}",
                    icon = FileKind::from_file_name(&doc.file_name).icon(),
                    name = doc.file_name,
                    size = format_size(doc.size),
                    modified = doc.last_modified.to_rfc3339(),
                    key = doc.key,
                );
            }
        }
    }

    Ok(())
}
