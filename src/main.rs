use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::Value;

use meetpoint::api::{
    self, Endpoint, Resource, applications, directions, events, projects, specializations, statuses, tasks, teams, users,
};
use meetpoint::auth::claims::{current_user_id, decode_claims};
use meetpoint::config::{ClientConfig, ConfigError};
use meetpoint::net::{ApiClient, RequestError};
use meetpoint::pages::{ListView, table_for};
use meetpoint::table::{DefaultSort, SortDirection, render_text};

/// Tasks are paged server-side; the CLI pulls one large page and pages locally.
const TASK_FETCH_SIZE: u32 = 100;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error("not logged in; run `meetpoint login` first")]
    NotLoggedIn,
    #[error("no sortable column '{0}'")]
    UnknownSort(String),
    #[error("no filterable column '{0}'")]
    UnknownFilter(String),
    #[error("filter '{0}' must look like key=value")]
    MalformedFilter(String),
    #[error("no row with {key} = '{value}'")]
    UnknownFilterValue { key: String, value: String },
    #[error("invalid JSON output: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "meetpoint", about = "MeetPoint API client")]
struct Cli {
    /// Overrides MEETPOINT_BASE_URL.
    #[arg(long)]
    base_url: Option<String>,

    /// Overrides MEETPOINT_CREDENTIALS_PATH.
    #[arg(long)]
    credentials: Option<PathBuf>,

    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "MEETPOINT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Logout,
    Whoami,
    Verify,
    List(ListArgs),
    Get {
        resource: ResourceKind,
        id: i64,
    },
    Delete {
        resource: ResourceKind,
        id: i64,
    },
}

#[derive(Args, Debug)]
struct ListArgs {
    resource: ResourceKind,

    /// Field path to sort on, e.g. `surname` or `responsible_user.surname`.
    #[arg(long)]
    sort: Option<String>,

    #[arg(long, default_value_t = false)]
    desc: bool,

    #[arg(long, default_value_t = 1)]
    page: usize,

    #[arg(long, default_value_t = 10)]
    page_size: usize,

    /// Repeatable; values for the same key are OR-combined.
    #[arg(long = "filter", value_name = "KEY=VALUE")]
    filters: Vec<String>,

    /// Print the visible rows as JSON instead of a table.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum ResourceKind {
    Events,
    Directions,
    Projects,
    Teams,
    Applications,
    Specializations,
    Statuses,
    Users,
    Tasks,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    if let Err(e) = dotenv {
        tracing::debug!(error = %e, "no .env loaded");
    }

    let config = ClientConfig::from_env()?
        .with_base_url(cli.base_url)
        .with_credentials_path(cli.credentials);
    let client = ApiClient::from_config(&config)?;

    match cli.command {
        Command::Login { username, password } => {
            api::auth::login(&client, &username, &password).await?;
            println!("logged in as {username}");
            Ok(())
        }
        Command::Logout => {
            api::auth::logout(&client);
            println!("logged out");
            Ok(())
        }
        Command::Whoami => run_whoami(&client).await,
        Command::Verify => {
            let valid = api::auth::verify(&client).await?;
            println!("{}", if valid { "valid" } else { "invalid" });
            Ok(())
        }
        Command::List(args) => run_list(&client, &args).await,
        Command::Get { resource, id } => run_get(&client, resource, id).await,
        Command::Delete { resource, id } => run_delete(&client, resource, id).await,
    }
}

async fn run_whoami(client: &ApiClient) -> Result<(), CliError> {
    let store = client.credentials().as_ref();
    let Some(user_id) = current_user_id(store) else {
        return Err(CliError::NotLoggedIn);
    };
    let claims = match store.access_token().map(|token| decode_claims(&token)) {
        Some(Ok(claims)) => Some(claims),
        Some(Err(e)) => {
            tracing::debug!(error = %e, "access token payload unreadable");
            None
        }
        None => None,
    };
    let user = users::endpoint(client).get(user_id).await?;
    println!("{} (id {user_id})", user.full_name());
    if let Some(claims) = claims {
        let now = time::OffsetDateTime::now_utc().unix_timestamp();
        let state = if claims.is_expired_at(now) { "expired" } else { "live" };
        println!("access token {state}, exp {}", claims.exp);
    }
    Ok(())
}

async fn run_list(client: &ApiClient, args: &ListArgs) -> Result<(), CliError> {
    match args.resource {
        ResourceKind::Events => show(&events::endpoint(client).list().await?, args),
        ResourceKind::Directions => show(&directions::endpoint(client).list().await?, args),
        ResourceKind::Projects => show(&projects::endpoint(client).list().await?, args),
        ResourceKind::Teams => show(&teams::endpoint(client).list().await?, args),
        ResourceKind::Applications => show(&applications::endpoint(client).list().await?, args),
        ResourceKind::Specializations => show(&specializations::endpoint(client).list().await?, args),
        ResourceKind::Statuses => show(&statuses::endpoint(client).list().await?, args),
        ResourceKind::Users => show(&users::endpoint(client).list().await?, args),
        ResourceKind::Tasks => {
            let query = tasks::TaskQuery { page_size: TASK_FETCH_SIZE, ..tasks::TaskQuery::default() };
            let payload = tasks::list(client, &query).await?;
            if payload.has_next() {
                tracing::warn!(total = payload.total(), shown = TASK_FETCH_SIZE, "task list truncated");
            }
            show(&payload.into_items(), args)
        }
    }
}

/// Apply sort, filters, and paging from the command line, then print.
fn show<T: ListView>(rows: &[T], args: &ListArgs) -> Result<(), CliError> {
    let columns = T::columns();
    let mut table = table_for(rows);

    if let Some(key) = &args.sort {
        if !columns.iter().any(|c| c.sort_key.as_deref() == Some(key.as_str())) {
            return Err(CliError::UnknownSort(key.clone()));
        }
        let direction = if args.desc { SortDirection::Desc } else { SortDirection::Asc };
        table = table.default_sort(DefaultSort::new(key.clone(), direction));
    }

    let mut selected: Vec<(usize, Vec<Value>)> = Vec::new();
    for raw in &args.filters {
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| CliError::MalformedFilter(raw.clone()))?;
        let column = columns
            .iter()
            .position(|c| c.is_filterable() && c.sort_key.as_deref() == Some(key))
            .ok_or_else(|| CliError::UnknownFilter(key.to_owned()))?;
        let option = table
            .filter_options(column)
            .iter()
            .find(|o| o.label == value)
            .ok_or_else(|| CliError::UnknownFilterValue { key: key.to_owned(), value: value.to_owned() })?;
        match selected.iter_mut().find(|(c, _)| *c == column) {
            Some((_, values)) => values.push(option.value.clone()),
            None => selected.push((column, vec![option.value.clone()])),
        }
    }
    for (column, values) in selected {
        table.set_filter(column, values);
    }
    table.set_page(args.page, args.page_size);

    if args.json {
        print_json(&table.visible_rows())
    } else {
        println!("{}", render_text(&table.render()));
        Ok(())
    }
}

async fn run_get(client: &ApiClient, resource: ResourceKind, id: i64) -> Result<(), CliError> {
    match resource {
        ResourceKind::Events => print_json(&events::endpoint(client).get(id).await?),
        ResourceKind::Directions => print_json(&directions::endpoint(client).get(id).await?),
        ResourceKind::Projects => print_json(&projects::endpoint(client).get(id).await?),
        ResourceKind::Teams => print_json(&teams::endpoint(client).get(id).await?),
        ResourceKind::Applications => print_json(&applications::endpoint(client).get(id).await?),
        ResourceKind::Specializations => print_json(&specializations::endpoint(client).get(id).await?),
        ResourceKind::Statuses => print_json(&statuses::endpoint(client).get(id).await?),
        ResourceKind::Users => print_json(&users::endpoint(client).get(id).await?),
        ResourceKind::Tasks => print_json(&tasks::endpoint(client).get(id).await?),
    }
}

async fn run_delete(client: &ApiClient, resource: ResourceKind, id: i64) -> Result<(), CliError> {
    match resource {
        ResourceKind::Events => delete(&events::endpoint(client), id).await,
        ResourceKind::Directions => delete(&directions::endpoint(client), id).await,
        ResourceKind::Projects => delete(&projects::endpoint(client), id).await,
        ResourceKind::Teams => delete(&teams::endpoint(client), id).await,
        ResourceKind::Applications => delete(&applications::endpoint(client), id).await,
        ResourceKind::Specializations => delete(&specializations::endpoint(client), id).await,
        ResourceKind::Statuses => delete(&statuses::endpoint(client), id).await,
        ResourceKind::Users => delete(&users::endpoint(client), id).await,
        ResourceKind::Tasks => delete(&tasks::endpoint(client), id).await,
    }
}

async fn delete<R: Resource>(endpoint: &Endpoint<R>, id: i64) -> Result<(), CliError> {
    endpoint.delete(id).await?;
    println!("deleted {} {id}", R::NAME);
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
