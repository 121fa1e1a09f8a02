// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod live;
mod scheduler;

use axum::{
    Json, Router,
    extract::{FromRef, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Weekday;
use chrono_tz::Tz;
use clap::Parser;
use courtbook_api::{
    ApiError, ApiResult, CreateMaintenanceBlockRequest, CreateMaintenanceBlockResponse,
    ListReservationsRequest, ListReservationsResponse, RegenerateWeekResponse,
    create_maintenance_block, list_week_reservations, parse_date, regenerate_week,
};
use courtbook_domain::AllocationPolicy;
use courtbook_persistence::Persistence;
use live::{LiveEvent, LiveEventBroadcaster};
use rand::SeedableRng;
use rand::rngs::StdRng;
use scheduler::WeeklySchedule;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::Date;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Courtbook Server - weekly venue allocation for the Courtbook reservation system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// IANA timezone the schedule and "today" are evaluated in
    #[arg(long, default_value = "Europe/Bucharest")]
    timezone: String,

    /// Weekday of the automatic weekly run
    #[arg(long, default_value = "sunday")]
    schedule_weekday: String,

    /// Local hour (0-23) of the automatic weekly run
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(0..24))]
    schedule_hour: u32,

    /// Disable the automatic weekly run; regeneration is then HTTP-only
    #[arg(long)]
    no_scheduler: bool,

    /// Fixed allocator seed for reproducible runs. Random per run when absent.
    #[arg(long)]
    seed: Option<u64>,
}

/// Application state shared across handlers and the scheduler.
#[derive(Clone)]
struct AppState {
    /// The persistence layer.
    persistence: Arc<Mutex<Persistence>>,
    /// Held for the whole of a regeneration run; runs never overlap.
    run_lock: Arc<Mutex<()>>,
    /// Quotas, windows and age partition.
    policy: Arc<AllocationPolicy>,
    /// Timezone used to decide what "today" is.
    timezone: Tz,
    /// Fixed allocator seed, if configured.
    seed: Option<u64>,
    /// Live event fan-out.
    live_events: Arc<LiveEventBroadcaster>,
}

impl AppState {
    fn new(persistence: Persistence, timezone: Tz, seed: Option<u64>) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            run_lock: Arc::new(Mutex::new(())),
            policy: Arc::new(AllocationPolicy::default()),
            timezone,
            seed,
            live_events: Arc::new(LiveEventBroadcaster::new()),
        }
    }

    /// Today's date in the configured timezone.
    fn today(&self) -> ApiResult<Date> {
        scheduler::to_calendar_date(scheduler::local_today(self.timezone)).map_err(|e| {
            ApiError::Internal {
                message: format!("Local date is out of range: {e}"),
            }
        })
    }
}

impl FromRef<AppState> for Arc<LiveEventBroadcaster> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.live_events)
    }
}

/// Runs one regeneration under the run lock.
///
/// A run that finds the lock taken is refused rather than queued.
async fn run_regeneration(state: &AppState, today: Date) -> ApiResult<RegenerateWeekResponse> {
    let Ok(_run_guard) = state.run_lock.try_lock() else {
        warn!(today = %today, "Refusing regeneration: another run is in progress");
        return Err(ApiError::RegenerationInProgress);
    };

    let seed: u64 = state.seed.unwrap_or_else(rand::random);
    info!(today = %today, seed, "Starting regeneration run");
    let mut rng: StdRng = StdRng::seed_from_u64(seed);

    let response: RegenerateWeekResponse = {
        let mut persistence = state.persistence.lock().await;
        regenerate_week(&mut persistence, today, &state.policy, &mut rng)?
    };

    state.live_events.broadcast(&LiveEvent::WeekRegenerated {
        week_start: response.week_start.clone(),
        week_end: response.week_end.clone(),
        deleted: response.deleted,
        count: response.count,
    });

    Ok(response)
}

/// Query parameters for a manual regeneration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
struct RegenerateQuery {
    /// Run as if on this date (ISO 8601) instead of today.
    today: Option<String>,
}

/// Query parameters for listing a week's reservations.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ListReservationsQuery {
    /// The Monday that starts the week (ISO 8601).
    week_start: String,
}

/// Health check response.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct HealthResponse {
    /// Always `ok` while the server answers.
    status: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::RegenerationInProgress => StatusCode::CONFLICT,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

async fn handle_regenerate(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<RegenerateQuery>,
) -> Result<Json<RegenerateWeekResponse>, HttpError> {
    let today: Date = match query.today.as_deref() {
        Some(value) => parse_date("today", value)?,
        None => state.today()?,
    };

    let response: RegenerateWeekResponse = run_regeneration(&state, today).await?;
    Ok(Json(response))
}

async fn handle_list_reservations(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<ListReservationsQuery>,
) -> Result<Json<ListReservationsResponse>, HttpError> {
    let request: ListReservationsRequest = ListReservationsRequest {
        week_start: query.week_start,
    };

    let mut persistence = state.persistence.lock().await;
    let response: ListReservationsResponse = list_week_reservations(&mut persistence, &request)?;
    Ok(Json(response))
}

async fn handle_create_maintenance_block(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<CreateMaintenanceBlockRequest>,
) -> Result<Json<CreateMaintenanceBlockResponse>, HttpError> {
    let response: CreateMaintenanceBlockResponse = {
        let mut persistence = state.persistence.lock().await;
        create_maintenance_block(&mut persistence, &request)?
    };

    state.live_events.broadcast(&LiveEvent::MaintenanceBlocked {
        venue_id: response.reservation.venue_id,
        date: response.reservation.date.clone(),
        slot: response.reservation.slot.clone(),
    });

    Ok(Json(response))
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handle_health))
        .route("/api/allocations/regenerate", post(handle_regenerate))
        .route("/api/reservations", get(handle_list_reservations))
        .route("/api/maintenance", post(handle_create_maintenance_block))
        .route("/api/live", get(live::live_events_handler))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Courtbook Server");

    let timezone: Tz = args
        .timezone
        .parse()
        .map_err(|e| format!("Invalid timezone '{}': {e}", args.timezone))?;
    let weekday: Weekday = args
        .schedule_weekday
        .parse()
        .map_err(|e| format!("Invalid weekday '{}': {e:?}", args.schedule_weekday))?;

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState::new(persistence, timezone, args.seed);

    if args.no_scheduler {
        info!("Weekly scheduler disabled");
    } else {
        let schedule: WeeklySchedule = WeeklySchedule {
            weekday,
            hour: args.schedule_hour,
        };
        info!(?schedule, timezone = %timezone, "Starting weekly scheduler");
        tokio::spawn(scheduler::run_weekly(app_state.clone(), schedule));
    }

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
