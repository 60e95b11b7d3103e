use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use thiserror::Error;

use tourist_routes::api::ApiError;
use tourist_routes::api::http::HttpApi;
use tourist_routes::credentials::FileCredentialStore;
use tourist_routes::domain::filter::FilterCriteria;
use tourist_routes::domain::route::PlaceAdditionInfo;
use tourist_routes::domain::types::{PlaceId, Position, RouteId, TypeConstraintError};
use tourist_routes::dto::catalog::{FilterOptionDto, PlaceCardDto};
use tourist_routes::dto::routes::RouteOverviewDto;
use tourist_routes::forms::auth::{LoginForm, LoginPayload, RegisterForm, RegisterPayload};
use tourist_routes::forms::filter::FilterForm;
use tourist_routes::models::config::ClientConfig;
use tourist_routes::services::route_editor::{EditorError, RouteEditor};
use tourist_routes::services::{ServiceError, auth, places, routes, users};
use tourist_routes::session::{Session, SessionError};

#[derive(Debug, Parser)]
#[command(name = "tourist-routes", version, about = "Plan tourist routes from the command line")]
struct Args {
    /// YAML configuration file. Defaults to `config/default.yaml` when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Log in and remember the token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account.
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: String,
    },
    /// Forget the stored token.
    Logout,
    /// Show who the stored token belongs to.
    Whoami,
    /// Browse the place catalog.
    Places {
        #[arg(long)]
        min_cost: Option<String>,
        #[arg(long)]
        max_cost: Option<String>,
        #[arg(long = "category")]
        categories: Vec<String>,
        #[arg(long = "district")]
        districts: Vec<String>,
    },
    /// Show one place.
    Place { id: String },
    /// List categories and districts usable as filters.
    Filters,
    /// List your routes.
    Routes,
    /// Show one route with its places and totals.
    Route { id: String },
    /// Create a route from the given places, in order.
    CreateRoute {
        #[arg(long)]
        name: String,
        #[arg(long = "place")]
        places: Vec<String>,
    },
    /// Change an existing route and save it.
    EditRoute {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "add")]
        add: Vec<String>,
        #[arg(long = "remove")]
        remove: Vec<String>,
        /// Move a place, given as `PLACE_ID:POSITION` (one-based).
        #[arg(long = "move")]
        moves: Vec<String>,
    },
    /// Delete a route.
    DeleteRoute { id: String },
    /// List all users (administrators only).
    Users,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error(transparent)]
    TypeConstraint(#[from] TypeConstraintError),
    #[error("invalid move `{0}`, expected PLACE_ID:POSITION")]
    InvalidMove(String),
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), CliError> {
    let config = ClientConfig::load(args.config.as_deref())?;
    log::debug!("Using API at {}", config.api_base_url);

    let api = HttpApi::new(&config)?;
    let store = FileCredentialStore::new(config.token_path.clone());
    let session = Session::new(Arc::new(store))?;

    let result = dispatch(args.command, &session, &api).await;

    if let Err(CliError::Service(e)) = &result {
        if let Some(next) = e.redirect() {
            if let Err(e) = session.clear_token() {
                log::error!("Failed to clear token: {e}");
            }
            eprintln!("Please log in again ({next}).");
        }
    }
    result
}

async fn dispatch(command: Command, session: &Session, api: &HttpApi) -> Result<(), CliError> {
    match command {
        Command::Login { email, password } => {
            let payload = LoginPayload::try_from(LoginForm { email, password })
                .map_err(ServiceError::from)?;
            let next = auth::login(payload, session, api).await?;
            println!("Logged in. Next: {next}");
        }
        Command::Register {
            email,
            password,
            name,
        } => {
            let payload = RegisterPayload::try_from(RegisterForm {
                email,
                password,
                name,
            })
            .map_err(ServiceError::from)?;
            let next = auth::register(payload, api).await?;
            println!("Account created. Next: {next}");
        }
        Command::Logout => {
            let next = auth::logout(session)?;
            println!("Logged out. Next: {next}");
        }
        Command::Whoami => {
            let user = auth::current_user(session)?;
            println!("Name:  {}", user.name.as_deref().unwrap_or("-"));
            println!("Email: {}", user.email.as_deref().unwrap_or("-"));
            if let Some(expires_at) = user.expires_at {
                println!("Token expires at {expires_at}");
            }
        }
        Command::Places {
            min_cost,
            max_cost,
            categories,
            districts,
        } => {
            let filter = FilterCriteria::try_from(FilterForm {
                min_cost,
                max_cost,
                category_ids: categories,
                district_ids: districts,
            })
            .map_err(ServiceError::from)?;
            for place in places::list_places(Some(filter), session, api).await? {
                let card = PlaceCardDto::new(&place, true);
                println!("{}  {}", card.id, card.name);
            }
        }
        Command::Place { id } => {
            let place = places::get_place(&PlaceId::new(id)?, session, api).await?;
            println!("{}", place.name);
            if let Some(description) = &place.description {
                println!("{description}");
            }
            if let Some(cost) = place.cost {
                println!("Cost: {cost}");
            }
            if let Some(category) = &place.category {
                println!("Category: {category}");
            }
            if let Some(district) = &place.district {
                println!("District: {district}");
            }
            if let Some(coordinates) = place.coordinates {
                println!(
                    "Location: {}, {}",
                    coordinates.latitude.get(),
                    coordinates.longitude.get()
                );
            }
            for photo in &place.photos {
                println!("Photo: {photo}");
            }
        }
        Command::Filters => {
            let options = places::filter_options(&FilterCriteria::default(), session, api).await?;
            print_options("Categories", &options.categories);
            print_options("Districts", &options.districts);
        }
        Command::Routes => {
            for route in routes::list_routes(session, api).await? {
                println!("{}  {}", route.id, route.name);
            }
        }
        Command::Route { id } => {
            let editor = RouteEditor::open(RouteId::new(id)?, session, api).await?;
            print_overview(&editor.overview());
        }
        Command::CreateRoute { name, places } => {
            let mut editor = RouteEditor::new_route();
            editor.rename(name)?;
            for id in places {
                add_place(&mut editor, id, session, api).await?;
            }
            let next = editor.save(session, api).await?;
            print_overview(&editor.overview());
            if let Some(id) = editor.route_id() {
                println!("Saved as {id}.");
            }
            if let Some(next) = next {
                println!("Next: {next}");
            }
        }
        Command::EditRoute {
            id,
            name,
            add,
            remove,
            moves,
        } => {
            let mut editor = RouteEditor::open(RouteId::new(id)?, session, api).await?;
            if let Some(name) = name {
                editor.rename(name)?;
            }
            for id in remove {
                editor.remove_place(&PlaceId::new(id)?)?;
            }
            for id in add {
                add_place(&mut editor, id, session, api).await?;
            }
            for value in moves {
                let (id, position) = parse_move(&value)?;
                editor.move_place(&id, position)?;
            }
            editor.save(session, api).await?;
            print_overview(&editor.overview());
        }
        Command::DeleteRoute { id } => {
            routes::delete_route(&RouteId::new(id)?, session, api).await?;
            println!("Route deleted.");
        }
        Command::Users => {
            for user in users::list_users(session, api).await? {
                println!(
                    "{}  {}  {}  {}",
                    user.id,
                    user.name.as_ref().map_or("-", |n| n.as_str()),
                    user.email.as_ref().map_or("-", |e| e.as_str()),
                    user.role.as_deref().unwrap_or("-"),
                );
            }
        }
    }
    Ok(())
}

async fn add_place(
    editor: &mut RouteEditor,
    id: String,
    session: &Session,
    api: &HttpApi,
) -> Result<(), CliError> {
    let place = places::get_place(&PlaceId::new(id)?, session, api).await?;
    editor.add_place(PlaceAdditionInfo::from(&place))?;
    Ok(())
}

fn parse_move(value: &str) -> Result<(PlaceId, Position), CliError> {
    let invalid = || CliError::InvalidMove(value.to_string());
    let (id, position) = value.rsplit_once(':').ok_or_else(invalid)?;
    let position: usize = position.parse().map_err(|_| invalid())?;
    let position = position.checked_sub(1).ok_or_else(invalid)?;
    Ok((PlaceId::new(id)?, Position::new(position)))
}

fn print_options(title: &str, options: &[FilterOptionDto]) {
    println!("{title}:");
    for option in options {
        println!("  {}  {}", option.id, option.name);
    }
}

fn print_overview(overview: &RouteOverviewDto) {
    println!("{}", overview.name);
    for row in &overview.rows {
        println!("{:>3}. {}  {}", row.order, row.name, row.cost);
    }
    println!("Total cost: {}", overview.total_cost);
    println!("Total length: {} km", overview.total_length_km);
    if overview.missing_coordinates {
        println!("None of the places can be shown on a map.");
    }
}
