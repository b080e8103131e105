use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use onix::{
    load_config, EncodedPayload, GraphData, Item, ItemType, ItemTypeAttribute, Link, LinkRule,
    LinkType, LinkTypeAttribute, Model, OnixClient, OnixError, OpResult, Partition, Payload,
    Privilege, Resource, Resources, Role, User,
};

/// Onix: command line client for the Onix configuration manager
#[derive(Parser)]
#[command(name = "onix")]
#[command(about = "Create, read and delete Onix configuration resources over the Web API.")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to ./onix.* and ONIX__* variables)
    #[arg(short, long, global = true, env = "ONIX_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or update a resource from a JSON file
    Put {
        kind: Kind,
        /// JSON file holding the resource
        #[arg(short, long)]
        file: PathBuf,
        /// Email new users about their account (users only)
        #[arg(long)]
        notify: bool,
        /// Print the request headers instead of sending the request
        #[arg(long)]
        dry_run: bool,
    },
    /// Fetch a resource by key
    Get {
        kind: Kind,
        key: String,
        /// Owning item/link type key (attributes only)
        #[arg(short, long)]
        parent: Option<String>,
    },
    /// Delete a resource by key
    Delete {
        kind: Kind,
        key: String,
        /// Owning item/link type key (attributes only)
        #[arg(short, long)]
        parent: Option<String>,
    },
    /// List the items linked from an item
    Children { key: String },
    /// Import a bulk graph data file
    Import {
        #[arg(short, long)]
        file: PathBuf,
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Kind {
    Model,
    ItemType,
    ItemTypeAttr,
    Item,
    LinkType,
    LinkTypeAttr,
    Link,
    LinkRule,
    Partition,
    Role,
    User,
    Privilege,
}

impl Kind {
    /// JSON field naming the owning type, for nested resources.
    fn parent_field(self) -> Option<&'static str> {
        match self {
            Kind::ItemTypeAttr => Some("itemTypeKey"),
            Kind::LinkTypeAttr => Some("linkTypeKey"),
            _ => None,
        }
    }
}

/// Runs `$action` with the typed sub-client matching `$kind`.
macro_rules! with_resources {
    ($kind:expr, $client:expr, $action:ident ( $($arg:expr),* )) => {
        match $kind {
            Kind::Model => $action($client.models(), $($arg),*).await,
            Kind::ItemType => $action($client.item_types(), $($arg),*).await,
            Kind::ItemTypeAttr => $action($client.item_type_attributes(), $($arg),*).await,
            Kind::Item => $action($client.items(), $($arg),*).await,
            Kind::LinkType => $action($client.link_types(), $($arg),*).await,
            Kind::LinkTypeAttr => $action($client.link_type_attributes(), $($arg),*).await,
            Kind::Link => $action($client.links(), $($arg),*).await,
            Kind::LinkRule => $action($client.link_rules(), $($arg),*).await,
            Kind::Partition => $action($client.partitions(), $($arg),*).await,
            Kind::Role => $action($client.roles(), $($arg),*).await,
            Kind::User => $action($client.users(), $($arg),*).await,
            Kind::Privilege => $action($client.privileges(), $($arg),*).await,
        }
    };
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        if let Some(err) = e.downcast_ref::<OnixError>() {
            print_json(&err.result()).ok();
        }
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Put {
            kind,
            file,
            dry_run: true,
            ..
        } => dry_run(kind, &file),
        Commands::Import {
            file,
            dry_run: true,
        } => print_headers(&read_json::<GraphData>(&file)?),
        command => {
            let client = connect(cli.config.as_deref())?;
            dispatch(&client, command).await
        }
    }
}

fn connect(config: Option<&Path>) -> anyhow::Result<OnixClient> {
    let conf = load_config(config).context("failed to load client configuration")?;
    tracing::info!(base_uri = %conf.base_uri, "connecting");
    Ok(OnixClient::from_config(&conf)?)
}

async fn dispatch(client: &OnixClient, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Put {
            kind: Kind::User,
            file,
            notify,
            ..
        } => {
            let user = read_json(&file)?;
            print_result(client.users().put_notify(&user, notify).await?)
        }
        Commands::Put { kind, file, .. } => with_resources!(kind, client, put_from_file(&file)),
        Commands::Get { kind, key, parent } => {
            with_resources!(kind, client, get_by_key(kind, &key, parent.as_deref()))
        }
        Commands::Delete { kind, key, parent } => {
            with_resources!(kind, client, delete_by_key(kind, &key, parent.as_deref()))
        }
        Commands::Children { key } => {
            let item = Item {
                key,
                ..Default::default()
            };
            print_json(&client.items().children(&item).await?)
        }
        Commands::Import { file, .. } => {
            let data: GraphData = read_json(&file)?;
            println!("Importing {} resources from {}", data.len(), file.display());
            print_result(client.data().put(&data).await?)
        }
    }
}

async fn put_from_file<R: Resource>(resources: Resources<R>, file: &Path) -> anyhow::Result<()> {
    let resource: R = read_json(file)?;
    print_result(resources.put(&resource).await?)
}

async fn get_by_key<R: Resource>(
    resources: Resources<R>,
    kind: Kind,
    key: &str,
    parent: Option<&str>,
) -> anyhow::Result<()> {
    let resource = keyed::<R>(kind, key, parent)?;
    print_json(&resources.get(&resource).await?)
}

async fn delete_by_key<R: Resource>(
    resources: Resources<R>,
    kind: Kind,
    key: &str,
    parent: Option<&str>,
) -> anyhow::Result<()> {
    let resource = keyed::<R>(kind, key, parent)?;
    print_result(resources.delete(&resource).await?)
}

/// A resource with only its addressing keys set.
fn keyed<R: Resource>(kind: Kind, key: &str, parent: Option<&str>) -> anyhow::Result<R> {
    let mut value = serde_json::json!({ "key": key });
    if let Some(field) = kind.parent_field() {
        let parent = parent.ok_or_else(|| anyhow!("--parent is required for {:?}", kind))?;
        value[field] = parent.into();
    }
    Ok(serde_json::from_value(value)?)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    serde_json::from_str(&source).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Print the headers a put of `file` would send.
fn dry_run(kind: Kind, file: &Path) -> anyhow::Result<()> {
    tracing::debug!(?kind, file = %file.display(), "dry run");
    match kind {
        Kind::Model => print_headers(&read_json::<Model>(file)?),
        Kind::ItemType => print_headers(&read_json::<ItemType>(file)?),
        Kind::ItemTypeAttr => print_headers(&read_json::<ItemTypeAttribute>(file)?),
        Kind::Item => print_headers(&read_json::<Item>(file)?),
        Kind::LinkType => print_headers(&read_json::<LinkType>(file)?),
        Kind::LinkTypeAttr => print_headers(&read_json::<LinkTypeAttribute>(file)?),
        Kind::Link => print_headers(&read_json::<Link>(file)?),
        Kind::LinkRule => print_headers(&read_json::<LinkRule>(file)?),
        Kind::Partition => print_headers(&read_json::<Partition>(file)?),
        Kind::Role => print_headers(&read_json::<Role>(file)?),
        Kind::User => print_headers(&read_json::<User>(file)?),
        Kind::Privilege => print_headers(&read_json::<Privilege>(file)?),
    }
}

fn print_headers(payload: &dyn Payload) -> anyhow::Result<()> {
    let encoded = EncodedPayload::new(payload)?;
    println!("Content-Type: application/json");
    println!("Content-MD5: {}", encoded.content_md5());
    println!("Content-Length: {}", encoded.len());
    Ok(())
}

fn print_result(result: OpResult) -> anyhow::Result<()> {
    print_json(&result)?;
    if result.error {
        return Err(anyhow!(result.message));
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyed_resources_carry_parent_keys() {
        let attr: ItemTypeAttribute = keyed(Kind::ItemTypeAttr, "cpu", Some("host")).unwrap();
        assert_eq!(attr.segments().unwrap(), vec!["itemtype", "host", "attribute", "cpu"]);

        let model: Model = keyed(Kind::Model, "m", None).unwrap();
        assert_eq!(model.key, "m");

        assert!(keyed::<ItemTypeAttribute>(Kind::ItemTypeAttr, "cpu", None).is_err());
    }

    #[test]
    fn cli_parses_put() {
        let cli = Cli::try_parse_from(["onix", "put", "item-type", "--file", "t.json", "--dry-run"])
            .unwrap();
        match cli.command {
            Commands::Put { kind, dry_run, .. } => {
                assert_eq!(kind, Kind::ItemType);
                assert!(dry_run);
            }
            _ => panic!("expected put"),
        }
    }
}
